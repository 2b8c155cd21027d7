use super::bstar::Marked;
use super::buckets::*;
use super::error::*;
use super::slots::*;
use super::types::*;

/// Complete the suffix array from the placed marked suffixes.
pub fn construct_sa<I: SaIndex>(text: &[u8], slots: &mut Slots<I>, marked: &Marked) -> Result<()> {
    let n = text.len();
    let bkt = &marked.buckets;

    if marked.m > 0 {
        // induce unmarked s-typed suffixes, scanning each bucket's s-typed part right to left.
        let mut cursor = try_clone(&bkt.s_end[..])?;
        for c1 in (0..ALPHABET_SIZE - 1).rev() {
            for j in (bkt.s_start[c1]..bkt.bucket_end(c1 as u8)).rev() {
                match slots.get(j) {
                    Slot::Induce(s) if s.as_index() > 0 => {
                        let s = s.as_index();
                        debug_assert_eq!(text[s] as usize, c1);
                        debug_assert!(text[s - 1] <= text[s]);
                        slots.set_skip(j, I::from_index(s));

                        let s = s - 1;
                        let c0 = text[s];
                        let p = &mut cursor[pair(c0, c1 as u8)];
                        *p -= 1;
                        debug_assert!(*p < j);
                        if s > 0 && text[s - 1] > c0 {
                            slots.set_skip(*p, I::from_index(s));
                        } else {
                            slots.set(*p, I::from_index(s));
                        }
                    }
                    Slot::Induce(s) => slots.set_skip(j, s),
                    Slot::Skip(s) => slots.set(j, s),
                }
            }
        }
    }
    crosscheck!("post-induce-s n={}", n);

    // induce l-typed suffixes left to right, starting from the last suffix.
    let mut cursor = try_clone(&bkt.bucket_start[..ALPHABET_SIZE])?;
    let c = text[n - 1];
    let x = I::from_index(n - 1);
    if text[n - 2] < c {
        slots.set_skip(cursor[c as usize], x);
    } else {
        slots.set(cursor[c as usize], x);
    }
    cursor[c as usize] += 1;

    for i in 0..n {
        match slots.get(i) {
            Slot::Induce(s) if s.as_index() > 0 => {
                let s = s.as_index() - 1;
                let c0 = text[s];
                debug_assert!(c0 >= text[s + 1]);
                let p = &mut cursor[c0 as usize];
                debug_assert!(i < *p);
                if s == 0 || text[s - 1] < c0 {
                    slots.set_skip(*p, I::from_index(s));
                } else {
                    slots.set(*p, I::from_index(s));
                }
                *p += 1;
            }
            Slot::Induce(_) => {}
            Slot::Skip(s) => slots.set(i, s),
        }
    }
    crosscheck!("post-induce-l n={}", n);
    Ok(())
}

/// Induce the transformed string from the placed marked suffixes.
///
/// On return, every cell holds the character preceding its suffix, except the cell of
/// suffix 0 whose offset is returned.
pub fn construct_bwt<I: SaIndex>(
    text: &[u8],
    slots: &mut Slots<I>,
    marked: &Marked,
) -> Result<usize> {
    let n = text.len();
    let bkt = &marked.buckets;
    let chr = |c: u8| I::from_index(c as usize);

    if marked.m > 0 {
        let mut cursor = try_clone(&bkt.s_end[..])?;
        for c1 in (0..ALPHABET_SIZE - 1).rev() {
            for j in (bkt.s_start[c1]..bkt.bucket_end(c1 as u8)).rev() {
                match slots.get(j) {
                    Slot::Induce(s) if s.as_index() > 0 => {
                        let s = s.as_index() - 1;
                        let c0 = text[s];
                        slots.set_skip(j, chr(c0));

                        let p = &mut cursor[pair(c0, c1 as u8)];
                        *p -= 1;
                        debug_assert!(*p < j);
                        if s > 0 && text[s - 1] > c0 {
                            slots.set_skip(*p, I::from_index(s));
                        } else {
                            slots.set(*p, I::from_index(s));
                        }
                    }
                    // suffix 0 stays put for the left to right scan.
                    Slot::Induce(_) => {}
                    Slot::Skip(s) => slots.set(j, s),
                }
            }
        }
    }
    crosscheck!("post-induce-s n={}", n);

    let mut cursor = try_clone(&bkt.bucket_start[..ALPHABET_SIZE])?;
    let c = text[n - 1];
    if text[n - 2] < c {
        slots.set_skip(cursor[c as usize], chr(text[n - 2]));
    } else {
        slots.set(cursor[c as usize], I::from_index(n - 1));
    }
    cursor[c as usize] += 1;

    let mut primary = n;
    for i in 0..n {
        match slots.get(i) {
            Slot::Induce(s) if s.as_index() > 0 => {
                let s = s.as_index() - 1;
                let c0 = text[s];
                slots.set(i, chr(c0));

                let p = &mut cursor[c0 as usize];
                debug_assert!(i < *p);
                if s > 0 && text[s - 1] < c0 {
                    slots.set_skip(*p, chr(text[s - 1]));
                } else {
                    slots.set(*p, I::from_index(s));
                }
                *p += 1;
            }
            Slot::Induce(_) => primary = i,
            Slot::Skip(c) => slots.set(i, c),
        }
    }
    debug_assert!(primary < n);
    crosscheck!("post-induce-l primary={}", primary);
    Ok(primary)
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::super::bstar::sort_bstar;
    use super::super::common::*;
    use super::*;

    fn induced(text: &[u8]) -> Vec<u32> {
        let mut suf = vec![0u32; text.len()];
        let mut slots = Slots::new(&mut suf[..]).unwrap();
        let marked = sort_bstar(text, &mut slots).unwrap();
        construct_sa(text, &mut slots, &marked).unwrap();
        drop(slots);
        suf
    }

    /// Preceding characters in suffix array order, and the offset of suffix 0.
    fn induced_bwt(text: &[u8]) -> (Vec<u8>, usize) {
        let mut suf = vec![0u32; text.len()];
        let mut slots = Slots::new(&mut suf[..]).unwrap();
        let marked = sort_bstar(text, &mut slots).unwrap();
        let primary = construct_bwt(text, &mut slots, &marked).unwrap();
        drop(slots);
        let chars = suf
            .iter()
            .enumerate()
            .map(|(i, &c)| if i == primary { 0 } else { c as u8 })
            .collect();
        (chars, primary)
    }

    fn naive(text: &[u8]) -> Vec<u32> {
        let mut suf = vec![0u32; text.len()];
        saca_tiny(text, &mut suf[..]);
        suf
    }

    fn naive_bwt(text: &[u8]) -> (Vec<u8>, usize) {
        let suf = naive(text);
        let primary = suf.iter().position(|&x| x == 0).unwrap();
        let chars = suf
            .iter()
            .map(|&x| if x == 0 { 0 } else { text[x as usize - 1] })
            .collect();
        (chars, primary)
    }

    #[test]
    fn tablecheck_induce() {
        let texts: &[&[u8]] = &[
            b"banana",
            b"mississippi",
            b"aaa",
            b"abc",
            b"cba",
            &[0, 0, 0, 0, 0, 0],
            &[2, 0, 2, 0, 2, 1, 4, 3],
            &[3, 2, 1, 3, 2, 3, 2, 1, 0, 1],
            &[2, 1, 4, 1, 1, 4, 1, 3, 1],
            &[2, 1, 1, 3, 3, 1, 1, 3, 3, 1, 2, 1],
            &[2, 2, 1, 4, 4, 1, 4, 4, 1, 3, 3, 1, 1],
            &[255, 0, 255, 0, 255, 255, 0, 0],
        ];

        for &text in texts.iter() {
            assert_eq!(induced(text), naive(text));
            assert_eq!(induced_bwt(text), naive_bwt(text));
        }
    }

    #[quickcheck]
    fn quickcheck_induce(text: Vec<u8>) -> bool {
        text.len() < 3 || induced(&text[..]) == naive(&text[..])
    }

    #[quickcheck]
    fn quickcheck_induce_bwt(text: Vec<u8>) -> bool {
        let text = text.iter().map(|c| c % 4).collect::<Vec<_>>();
        text.len() < 3 || induced_bwt(&text[..]) == naive_bwt(&text[..])
    }
}
