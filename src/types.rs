use std::fmt::{Debug, Display};

/// Suffix array cell type.
///
/// Cells hold text offsets during construction, but also ranks of marked suffixes and,
/// while building the Burrows-Wheeler transform, plain byte values.
pub trait SaIndex: Copy + Send + Sync + Eq + Ord + Default + Debug + Display {
    /// The largest text length whose offsets fit in this type.
    const MAX_INDEX: usize;

    fn from_index(idx: usize) -> Self;
    fn as_index(self) -> usize;
}

macro_rules! impl_sa_index {
    ($($uint:ident),*) => {
        $(
            impl SaIndex for $uint {
                const MAX_INDEX: usize = <$uint>::MAX as usize;

                #[inline(always)]
                fn from_index(idx: usize) -> Self {
                    debug_assert!(idx <= Self::MAX_INDEX);
                    idx as $uint
                }

                #[inline(always)]
                fn as_index(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

cfg_if! {
    if #[cfg(target_pointer_width = "64")] {
        impl_sa_index!(u32, u64, usize);
    } else {
        impl_sa_index!(u32, usize);
    }
}

#[cfg(test)]
mod tests {
    use super::SaIndex;

    #[test]
    fn index_casts() {
        assert_eq!(u32::from_index(7).as_index(), 7);
        assert_eq!(<u32 as SaIndex>::MAX_INDEX, u32::MAX as usize);
        assert_eq!(usize::from_index(usize::MAX).as_index(), usize::MAX);
    }
}
