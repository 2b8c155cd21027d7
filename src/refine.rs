use super::error::*;
use super::types::*;

/// Refine the ranks of a reduced string until all of them are unique.
///
/// `rank[k]` is the rank of the `k`-th symbol in text order, where a run of equal symbols
/// at `order[a..=b]` shares the rank `b`. `order` lists the positions sorted by rank.
/// On return, `rank[k]` is the position of suffix `k` in the suffix array of the reduced
/// string and `order` is that suffix array. Positions past the end compare smallest.
///
/// This is prefix doubling over the unresolved groups only: after round `h`, suffixes
/// sharing a rank agree on their first `2h` symbols. Only `rank` and `order` are read.
///
/// Returns the number of doubling rounds.
pub fn refine_ranks<I: SaIndex>(rank: &mut [I], order: &mut [I]) -> Result<usize> {
    debug_assert_eq!(rank.len(), order.len());

    let mut groups = unresolved_groups(rank, order)?;
    let mut keyed: Vec<(usize, I)> = Vec::new();
    let mut rounds = 0;
    let mut h = 1;
    while !groups.is_empty() {
        let mut next = Vec::new();
        for &(start, end) in groups.iter() {
            // keys are computed before any rank of this group changes.
            keyed.clear();
            keyed.try_reserve(end - start + 1)?;
            keyed.extend(
                order[start..=end]
                    .iter()
                    .map(|&k| (key(rank, k.as_index() + h), k)),
            );
            keyed.sort_unstable_by_key(|&(key, _)| key);

            let mut a = 0;
            while a < keyed.len() {
                let mut b = a;
                while b + 1 < keyed.len() && keyed[b + 1].0 == keyed[a].0 {
                    b += 1;
                }
                let r = I::from_index(start + b);
                for (i, &(_, k)) in keyed[a..=b].iter().enumerate() {
                    order[start + a + i] = k;
                    rank[k.as_index()] = r;
                }
                if b > a {
                    next.try_reserve(1)?;
                    next.push((start + a, start + b));
                }
                a = b + 1;
            }
        }

        log::trace!("refine round {}: depth {}, {} groups left", rounds, 2 * h, next.len());
        groups = next;
        rounds += 1;
        h *= 2;
    }
    Ok(rounds)
}

/// Sort key of the suffix starting at `i`, the end of string being smallest.
#[inline(always)]
fn key<I: SaIndex>(rank: &[I], i: usize) -> usize {
    match rank.get(i) {
        Some(&r) => r.as_index() + 1,
        None => 0,
    }
}

/// Collect the groups of positions sharing a rank, as inclusive ranges of `order`.
fn unresolved_groups<I: SaIndex>(rank: &[I], order: &[I]) -> Result<Vec<(usize, usize)>> {
    let mut groups = Vec::new();
    let mut i = 0;
    while i < order.len() {
        let end = rank[order[i].as_index()].as_index();
        debug_assert!(end >= i);
        if end > i {
            groups.try_reserve(1)?;
            groups.push((i, end));
        }
        i = end + 1;
    }
    Ok(groups)
}
