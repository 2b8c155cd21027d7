use std::collections::TryReserveError;

use thiserror::Error;

/// Errors reported by the construction entry points.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// Malformed input: an output buffer shorter than the text, a text too long for the
    /// index type, or an out of range primary index.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Scratch memory could not be obtained.
    #[error("failed to allocate scratch memory")]
    AllocationFailure,
}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Error::AllocationFailure
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Allocate a default filled scratch vector, reporting failure instead of aborting.
pub fn try_filled<T: Clone + Default>(len: usize) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)?;
    v.resize(len, T::default());
    Ok(v)
}

/// Clone a scratch table, reporting failure instead of aborting.
pub fn try_clone<T: Copy>(src: &[T]) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(src.len())?;
    v.extend_from_slice(src);
    Ok(v)
}
