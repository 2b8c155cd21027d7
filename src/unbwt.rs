use super::buckets::ALPHABET_SIZE;
use super::error::*;

/// Invert the Burrows-Wheeler transform produced by `divbwt`.
///
/// `primary` is the index returned alongside `bwt`. The first `bwt.len()` bytes of
/// `text` receive the original string.
pub fn unbwt(bwt: &[u8], primary: usize, text: &mut [u8]) -> Result<()> {
    let n = bwt.len();
    if text.len() < n {
        return Err(Error::InvalidArgument("output shorter than the transform"));
    }
    if n == 0 {
        return match primary {
            0 => Ok(()),
            _ => Err(Error::InvalidArgument("primary index out of range")),
        };
    }
    if primary < 1 || primary > n {
        return Err(Error::InvalidArgument("primary index out of range"));
    }

    // the elided sentinel row sits at `primary` among n + 1 rows.
    let last = |r: usize| if r < primary { bwt[r] } else { bwt[r - 1] };

    // first row of each character, behind the sentinel row.
    let mut next = [0usize; ALPHABET_SIZE];
    bwt.iter().for_each(|&c| next[c as usize] += 1);
    next.iter_mut().fold(1, |sum, p| {
        let count = *p;
        *p = sum;
        sum + count
    });

    let mut lf = try_filled::<usize>(n + 1)?;
    for r in (0..=n).filter(|&r| r != primary) {
        let p = &mut next[last(r) as usize];
        lf[r] = *p;
        *p += 1;
    }

    let mut r = 0;
    for i in (0..n).rev() {
        if r == primary {
            return Err(Error::InvalidArgument("primary index does not match the transform"));
        }
        text[i] = last(r);
        r = lf[r];
    }
    log::debug!("inverted transform n={}", n);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inverted(bwt: &[u8], primary: usize) -> Vec<u8> {
        let mut text = vec![0u8; bwt.len()];
        unbwt(bwt, primary, &mut text[..]).unwrap();
        text
    }

    #[test]
    fn banana_inverse() {
        assert_eq!(inverted(b"annbaa", 4), b"banana".to_vec());
        assert_eq!(inverted(b"ipssmpissii", 5), b"mississippi".to_vec());
    }

    #[test]
    fn small_inverse() {
        assert_eq!(inverted(b"", 0), Vec::<u8>::new());
        assert_eq!(inverted(b"x", 1), b"x".to_vec());
        assert_eq!(inverted(b"ba", 1), b"ab".to_vec());
        assert_eq!(inverted(b"ab", 2), b"ba".to_vec());
        assert_eq!(inverted(b"aa", 2), b"aa".to_vec());
    }

    #[test]
    fn invalid_primary() {
        let mut text = vec![0u8; 6];
        assert!(unbwt(b"annbaa", 0, &mut text[..]).is_err());
        assert!(unbwt(b"annbaa", 7, &mut text[..]).is_err());
        assert!(unbwt(b"", 1, &mut text[..]).is_err());
        assert!(unbwt(b"annbaa", 4, &mut text[..3]).is_err());
    }
}
