use super::types::*;

/// Cross-check trace line, only emitted with the `crosscheck` feature.
///
/// Lines go to the `log` facade under the `divsufsort::crosscheck` target, so tracing
/// never touches the filesystem by itself.
macro_rules! crosscheck {
    ($($arg:tt)*) => {
        if cfg!(feature = "crosscheck") {
            log::trace!(target: "divsufsort::crosscheck", $($arg)*);
        }
    };
}

/// Naive suffix array construction that sorts tiny input.
pub fn saca_tiny<I: SaIndex>(text: &[u8], suf: &mut [I]) {
    suf[..text.len()]
        .iter_mut()
        .enumerate()
        .for_each(|(i, p)| *p = I::from_index(i));
    suf[..text.len()].sort_by(|&i, &j| Ord::cmp(&text[i.as_index()..], &text[j.as_index()..]));
}

/// Test if `suf` is the suffix array of `text`: a permutation of `0..n` listing the
/// suffixes in ascending order.
pub fn check<I: SaIndex>(text: &[u8], suf: &[I]) -> bool {
    let n = text.len();
    if suf.len() != n {
        return false;
    }

    let mut seen = vec![false; n];
    for &x in suf.iter() {
        let x = x.as_index();
        if x >= n || seen[x] {
            return false;
        }
        seen[x] = true;
    }

    suf.windows(2)
        .all(|w| text[w[0].as_index()..] < text[w[1].as_index()..])
}

/// Suffix type, with the virtual sentinel appended to the text.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SuffixType {
    /// Larger than the suffix on its right (type A).
    L,
    /// Smaller than the suffix on its right, which is s-typed too (type B).
    S,
    /// Smaller than the suffix on its right, which is l-typed (type B*).
    BStar,
}

/// Enumerate suffix types, in reversed order.
///
/// The last suffix is l-typed because of the sentinel. Ties take the type of the right
/// neighbour, which falls out of scanning whole runs: an l-run continues while characters
/// do not increase reading leftwards, an s-run while they do not decrease.
#[inline]
pub fn foreach_typed<F>(text: &[u8], mut f: F)
where
    F: FnMut(usize, SuffixType),
{
    let mut i = text.len();
    while i > 0 {
        // l-typed run.
        i -= 1;
        f(i, SuffixType::L);
        while i > 0 && text[i - 1] >= text[i] {
            i -= 1;
            f(i, SuffixType::L);
        }
        if i == 0 {
            break;
        }

        // the rightmost s-typed suffix of a run is marked.
        i -= 1;
        f(i, SuffixType::BStar);
        while i > 0 && text[i - 1] <= text[i] {
            i -= 1;
            f(i, SuffixType::S);
        }
    }
}

/// Enumerate marked suffixes, in reversed order.
#[inline]
pub fn foreach_bstar<F>(text: &[u8], mut f: F)
where
    F: FnMut(usize),
{
    foreach_typed(text, |i, t| {
        if t == SuffixType::BStar {
            f(i)
        }
    });
}

/// Debug dump of a workspace, only emitted with the `crosscheck` feature.
pub fn inspect<I: SaIndex>(label: &str, suf: &[I]) {
    if cfg!(feature = "crosscheck")
        && log::log_enabled!(target: "divsufsort::crosscheck", log::Level::Trace)
    {
        let cells = suf
            .iter()
            .map(|x| x.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        crosscheck!("{}: [{}]", label, cells);
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    fn types(text: &[u8]) -> Vec<SuffixType> {
        let mut types = vec![SuffixType::L; text.len()];
        foreach_typed(text, |i, t| types[i] = t);
        types
    }

    /// Types straight from the definition, by comparing whole suffixes.
    fn naive_types(text: &[u8]) -> Vec<SuffixType> {
        let n = text.len();
        let stype = (0..n)
            .map(|i| text[i..] < text[i + 1..])
            .collect::<Vec<_>>();
        (0..n)
            .map(|i| match (stype[i], i + 1 < n && stype[i + 1]) {
                (false, _) => SuffixType::L,
                (true, true) => SuffixType::S,
                (true, false) => SuffixType::BStar,
            })
            .collect()
    }

    #[test]
    fn typed_banana() {
        use SuffixType::*;
        assert_eq!(types(b"banana"), vec![L, BStar, L, BStar, L, L]);
        assert_eq!(types(b"aaaa"), vec![L, L, L, L]);
        assert_eq!(types(b"abcd"), vec![S, S, BStar, L]);
        assert_eq!(types(b""), vec![]);
    }

    #[test]
    fn bstar_order() {
        let mut marked = Vec::new();
        foreach_bstar(b"mississippi", |i| marked.push(i));
        assert_eq!(marked, vec![7, 4, 1]);
    }

    #[test]
    fn tiny_and_check() {
        let mut suf = vec![0u32; 6];
        saca_tiny(b"banana", &mut suf[..]);
        assert_eq!(suf, vec![5, 3, 1, 0, 4, 2]);
        assert!(check(b"banana", &suf[..]));
        assert!(!check(b"banana", &[5u32, 3, 1, 0, 2, 4][..]));
        assert!(!check(b"banana", &[5u32, 3, 1, 0, 4, 4][..]));
        assert!(!check(b"banana", &[5u32, 3, 1][..]));
    }

    #[quickcheck]
    fn quickcheck_types(text: Vec<u8>) -> bool {
        types(&text[..]) == naive_types(&text[..])
    }

    #[quickcheck]
    fn quickcheck_types_small_alphabet(text: Vec<u8>) -> bool {
        let text = text.iter().map(|c| c % 3).collect::<Vec<_>>();
        types(&text[..]) == naive_types(&text[..])
    }
}
