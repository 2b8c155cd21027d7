use super::common::*;
use super::error::*;
use super::types::*;

/// Size of the byte alphabet.
pub const ALPHABET_SIZE: usize = 256;

/// Index of the two character bucket `(c0, c1)`.
#[inline(always)]
pub fn pair(c0: u8, c1: u8) -> usize {
    (c0 as usize) << 8 | c1 as usize
}

/// Frequencies gathered by one classification scan.
pub struct Counts {
    /// L-typed suffixes, by leading character.
    pub l: Vec<usize>,

    /// Unmarked s-typed suffixes, by leading character pair.
    pub s: Vec<usize>,

    /// Marked suffixes, by leading character pair.
    pub bstar: Vec<usize>,
}

impl Counts {
    /// Classify all suffixes of `text` and count them.
    ///
    /// Returns the counts together with the offsets of the marked suffixes, in text order.
    pub fn classify<I: SaIndex>(text: &[u8]) -> Result<(Counts, Vec<I>)> {
        let mut counts = Counts {
            l: try_filled(ALPHABET_SIZE)?,
            s: try_filled(ALPHABET_SIZE * ALPHABET_SIZE)?,
            bstar: try_filled(ALPHABET_SIZE * ALPHABET_SIZE)?,
        };

        // every marked suffix is followed by an l-typed one.
        let mut marked = Vec::new();
        marked.try_reserve_exact(text.len() / 2)?;

        foreach_typed(text, |i, t| match t {
            SuffixType::L => counts.l[text[i] as usize] += 1,
            SuffixType::S => counts.s[pair(text[i], text[i + 1])] += 1,
            SuffixType::BStar => {
                counts.bstar[pair(text[i], text[i + 1])] += 1;
                marked.push(I::from_index(i));
            }
        });
        marked.reverse();

        crosscheck!("post-count m={}", marked.len());
        Ok((counts, marked))
    }
}

/// Bucket boundaries derived from `Counts`.
///
/// The bucket of character `c` holds its l-typed suffixes first, then its s-typed
/// suffixes grouped by the second character in ascending order. Inside a pair group the
/// marked suffixes precede the unmarked ones, since a marked suffix is smaller than an
/// unmarked s-typed suffix sharing its first two characters.
pub struct Buckets {
    /// Start of each character bucket, `bucket_start[ALPHABET_SIZE] == n`.
    pub bucket_start: Vec<usize>,

    /// Start of the s-typed part of each character bucket.
    pub s_start: Vec<usize>,

    /// Exclusive end of each pair's s-typed suffixes in the suffix array.
    pub s_end: Vec<usize>,

    /// Start of each pair's marked suffixes in the compact workspace `0..m`.
    pub bstar_start: Vec<usize>,

    /// Exclusive end of each pair's marked suffixes in the compact workspace `0..m`.
    pub bstar_end: Vec<usize>,
}

impl Buckets {
    /// Compute all boundaries in one forward pass over the alphabet.
    pub fn new(counts: &Counts) -> Result<Self> {
        let mut bkt = Buckets {
            bucket_start: try_filled(ALPHABET_SIZE + 1)?,
            s_start: try_filled(ALPHABET_SIZE)?,
            s_end: try_filled(ALPHABET_SIZE * ALPHABET_SIZE)?,
            bstar_start: try_filled(ALPHABET_SIZE * ALPHABET_SIZE)?,
            bstar_end: try_filled(ALPHABET_SIZE * ALPHABET_SIZE)?,
        };

        let mut i = 0; // offset in the suffix array.
        let mut j = 0; // offset in the compact workspace.
        for c0 in 0..ALPHABET_SIZE {
            bkt.bucket_start[c0] = i;
            i += counts.l[c0];
            bkt.s_start[c0] = i;

            // equal pairs cannot start a marked suffix.
            let p = pair(c0 as u8, c0 as u8);
            debug_assert_eq!(counts.bstar[p], 0);
            i += counts.s[p];
            bkt.s_end[p] = i;

            for c1 in c0 + 1..ALPHABET_SIZE {
                let p = pair(c0 as u8, c1 as u8);
                bkt.bstar_start[p] = j;
                j += counts.bstar[p];
                bkt.bstar_end[p] = j;
                i += counts.bstar[p] + counts.s[p];
                bkt.s_end[p] = i;
            }
        }
        bkt.bucket_start[ALPHABET_SIZE] = i;

        crosscheck!("post-bucket n={} m={}", i, j);
        Ok(bkt)
    }

    /// Exclusive end of character `c`'s bucket.
    #[inline(always)]
    pub fn bucket_end(&self, c: u8) -> usize {
        self.bucket_start[c as usize + 1]
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    fn build(text: &[u8]) -> (Counts, Vec<u32>, Buckets) {
        let (counts, marked) = Counts::classify::<u32>(text).unwrap();
        let bkt = Buckets::new(&counts).unwrap();
        (counts, marked, bkt)
    }

    /// Every boundary table must tile its target range exactly.
    fn tiles(text: &[u8]) -> bool {
        let n = text.len();
        let (counts, marked, bkt) = build(text);
        let m = marked.len();

        if bkt.bucket_start[0] != 0 || bkt.bucket_start[ALPHABET_SIZE] != n {
            return false;
        }
        if bkt.bucket_start.windows(2).any(|w| w[0] > w[1]) {
            return false;
        }

        let mut compact = 0;
        for c0 in 0..ALPHABET_SIZE {
            let mut end = bkt.bucket_start[c0] + counts.l[c0];
            if bkt.s_start[c0] != end {
                return false;
            }
            for c1 in c0..ALPHABET_SIZE {
                let p = pair(c0 as u8, c1 as u8);
                end += counts.s[p] + counts.bstar[p];
                if bkt.s_end[p] != end {
                    return false;
                }
                if c1 > c0 {
                    if bkt.bstar_start[p] != compact {
                        return false;
                    }
                    compact += counts.bstar[p];
                    if bkt.bstar_end[p] != compact {
                        return false;
                    }
                }
            }
            if end != bkt.bucket_start[c0 + 1] {
                return false;
            }
        }
        compact == m
    }

    #[test]
    fn banana_buckets() {
        let (counts, marked, bkt) = build(b"banana");
        assert_eq!(marked, vec![1, 3]);
        assert_eq!(counts.l[b'a' as usize], 1);
        assert_eq!(counts.l[b'n' as usize], 2);
        assert_eq!(counts.l[b'b' as usize], 1);
        assert_eq!(counts.bstar[pair(b'a', b'n')], 2);

        // a: [0, 3), b: [3, 4), n: [4, 6).
        assert_eq!(bkt.bucket_start[b'a' as usize], 0);
        assert_eq!(bkt.bucket_start[b'b' as usize], 3);
        assert_eq!(bkt.bucket_start[b'n' as usize], 4);
        assert_eq!(bkt.bucket_end(b'n'), 6);
        assert_eq!(bkt.s_start[b'a' as usize], 1);
        assert_eq!(bkt.s_end[pair(b'a', b'n')], 3);
        assert_eq!(bkt.bstar_start[pair(b'a', b'n')], 0);
        assert_eq!(bkt.bstar_end[pair(b'a', b'n')], 2);
    }

    #[test]
    fn full_alphabet_buckets() {
        let mut text = (0..=255u8).collect::<Vec<_>>();
        text.extend((0..=255u8).rev());
        text.extend((0..=255u8).step_by(3));
        assert!(tiles(&text[..]));

        let (counts, _, bkt) = build(&text[..]);
        assert_eq!(bkt.bucket_start[ALPHABET_SIZE], text.len());
        assert_eq!(counts.l[255], 3);
    }

    #[test]
    fn no_marked_suffixes() {
        let (_, marked, bkt) = build(b"aaaa");
        assert!(marked.is_empty());
        assert_eq!(bkt.bucket_start[b'a' as usize], 0);
        assert_eq!(bkt.bucket_end(b'a'), 4);
        assert!(tiles(b"dcba"));
    }

    #[quickcheck]
    fn quickcheck_tiles(text: Vec<u8>) -> bool {
        tiles(&text[..])
    }

    #[quickcheck]
    fn quickcheck_tiles_small_alphabet(text: Vec<u8>) -> bool {
        let text = text.iter().map(|c| b'a' + c % 4).collect::<Vec<_>>();
        tiles(&text[..])
    }
}
