use std::mem;

use super::buckets::*;
use super::common::{foreach_bstar, inspect};
use super::error::*;
use super::refine::refine_ranks;
use super::slots::*;
use super::substring::sort_group;
use super::types::*;

/// Threshold to sort marked substring groups in parallel.
#[allow(unused)]
const PARALLEL_SORT_THRESHOLD: usize = 8192;

/// Classification result handed from the marked suffix sort to induction.
pub struct Marked {
    /// Number of marked suffixes.
    pub m: usize,
    pub counts: Counts,
    pub buckets: Buckets,
}

/// Sort the marked suffixes of `text` and put them at their final suffix array offsets.
///
/// Marked suffixes whose left neighbour is l-typed are tagged, so the s-typed induction
/// passes them over.
pub fn sort_bstar<I: SaIndex>(text: &[u8], slots: &mut Slots<I>) -> Result<Marked> {
    let n = text.len();
    debug_assert!(n >= 2 && slots.len() == n);

    let (counts, marked) = Counts::classify::<I>(text)?;
    let buckets = Buckets::new(&counts)?;
    let m = marked.len();
    log::debug!("classified n={} m={}", n, m);
    if m == 0 {
        return Ok(Marked { m, counts, buckets });
    }

    {
        let (order, rest) = slots.cells_mut().split_at_mut(m);
        let rank = &mut rest[..m];

        // bucket marked suffixes by their first two characters.
        let mut cursor = try_clone(&buckets.bstar_end[..])?;
        for k in (0..m).rev() {
            let i = marked[k].as_index();
            let p = &mut cursor[pair(text[i], text[i + 1])];
            *p -= 1;
            order[*p] = I::from_index(k);
        }

        let mut tied = try_filled::<bool>(m)?;
        sort_groups(text, &marked[..], order, &mut tied[..], &buckets);
        let ties = assign_ranks(order, rank, &tied[..]);
        log::debug!("sorted marked substrings, {} ties", ties);
        crosscheck!("post-sort ties={}", ties);

        if ties > 0 {
            let rounds = refine_ranks(rank, order)?;
            log::debug!("refined ranks in {} rounds", rounds);
        }
    }
    drop(marked);

    order_marked(text, slots, m);
    relocate_marked(slots, &counts, &buckets, m);
    inspect("post-relocate", slots.cells());
    Ok(Marked { m, counts, buckets })
}

/// Sort every two character group of marked suffixes by their marked substrings.
fn sort_groups<I: SaIndex>(
    text: &[u8],
    marked: &[I],
    mut order: &mut [I],
    mut tied: &mut [bool],
    bkt: &Buckets,
) {
    // split into disjoint groups, in ascending pair order.
    let mut groups = Vec::new();
    for c0 in 0..ALPHABET_SIZE {
        for c1 in c0 + 1..ALPHABET_SIZE {
            let p = pair(c0 as u8, c1 as u8);
            let len = bkt.bstar_end[p] - bkt.bstar_start[p];
            if len == 0 {
                continue;
            }
            let (group, rest) = mem::take(&mut order).split_at_mut(len);
            order = rest;
            let (flags, rest) = mem::take(&mut tied).split_at_mut(len);
            tied = rest;
            if len > 1 {
                groups.push((group, flags));
            }
        }
    }
    log::trace!("{} marked groups to sort", groups.len());
    sort_all_groups(text, marked, groups);
}

cfg_if! {
    if #[cfg(feature = "parallel")] {
        use rayon::prelude::*;

        fn sort_all_groups<I: SaIndex>(
            text: &[u8],
            marked: &[I],
            groups: Vec<(&mut [I], &mut [bool])>,
        ) {
            if marked.len() < PARALLEL_SORT_THRESHOLD {
                groups
                    .into_iter()
                    .for_each(|(group, flags)| sort_group(text, marked, group, flags, 2));
            } else {
                groups
                    .into_par_iter()
                    .for_each(|(group, flags)| sort_group(text, marked, group, flags, 2));
            }
        }
    } else {
        fn sort_all_groups<I: SaIndex>(
            text: &[u8],
            marked: &[I],
            groups: Vec<(&mut [I], &mut [bool])>,
        ) {
            groups
                .into_iter()
                .for_each(|(group, flags)| sort_group(text, marked, group, flags, 2));
        }
    }
}

/// Rank sorted marked substrings: a tied run ending at sorted offset `b` gets rank `b`.
///
/// Returns the number of elements tied with their predecessor.
fn assign_ranks<I: SaIndex>(order: &[I], rank: &mut [I], tied: &[bool]) -> usize {
    let mut ties = 0;
    let mut end = order.len() - 1;
    for s in (0..order.len()).rev() {
        rank[order[s].as_index()] = I::from_index(end);
        if tied[s] {
            ties += 1;
        } else if s > 0 {
            end = s - 1;
        }
    }
    ties
}

/// Write each marked suffix at the offset given by its rank, in the head of workspace.
fn order_marked<I: SaIndex>(text: &[u8], slots: &mut Slots<I>, m: usize) {
    let mut k = m;
    foreach_bstar(text, |t| {
        k -= 1;
        let r = slots.cells()[m + k].as_index();
        let x = I::from_index(t);
        if t > 0 && text[t - 1] > text[t] {
            // the l-typed neighbour waits for the left to right scan.
            slots.set_skip(r, x);
        } else {
            slots.set(r, x);
        }
    });
    debug_assert_eq!(k, 0);
}

/// Move the sorted marked suffixes from the head of workspace to the front of their
/// pair groups, last pair first.
fn relocate_marked<I: SaIndex>(slots: &mut Slots<I>, counts: &Counts, bkt: &Buckets, m: usize) {
    let mut k = m;
    for c0 in (0..ALPHABET_SIZE - 1).rev() {
        for c1 in (c0 + 1..ALPHABET_SIZE).rev() {
            let p = pair(c0 as u8, c1 as u8);
            let end = bkt.s_end[p] - counts.s[p];
            for d in 0..counts.bstar[p] {
                k -= 1;
                debug_assert!(end - 1 - d >= k);
                slots.move_cell(k, end - 1 - d);
            }
        }
    }
    debug_assert_eq!(k, 0);
}
