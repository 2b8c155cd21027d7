use std::cmp::Ordering;

use super::types::*;

/// Marked substring of the `k`-th marked suffix in text order, skipping `depth` characters.
///
/// A marked substring runs up to and including the first two characters of the next
/// marked suffix. The last one runs to the end of the text.
#[inline(always)]
fn marked_substring<'a, I: SaIndex>(
    text: &'a [u8],
    marked: &[I],
    k: usize,
    depth: usize,
) -> &'a [u8] {
    let start = marked[k].as_index() + depth;
    let end = match marked.get(k + 1) {
        Some(&next) => next.as_index() + 2,
        None => text.len(),
    };
    &text[start..end]
}

/// Compare two marked substrings, identified by their index in text order.
///
/// The last marked substring is followed by the sentinel, so it is smaller than any
/// substring with the same characters.
#[inline]
pub fn compare<I: SaIndex>(
    text: &[u8],
    marked: &[I],
    depth: usize,
    a: usize,
    b: usize,
) -> Ordering {
    let last = marked.len() - 1;
    Ord::cmp(
        marked_substring(text, marked, a, depth),
        marked_substring(text, marked, b, depth),
    )
    .then_with(|| Ord::cmp(&(a != last), &(b != last)))
}

/// Sort a group of marked suffixes sharing their first `depth` characters by their
/// marked substrings.
///
/// `group` holds indices into `marked`. On return `tied[i]` tells whether `group[i]` has
/// the same marked substring as `group[i - 1]`; `tied[0]` is always false.
pub fn sort_group<I: SaIndex>(
    text: &[u8],
    marked: &[I],
    group: &mut [I],
    tied: &mut [bool],
    depth: usize,
) {
    debug_assert_eq!(group.len(), tied.len());
    group.sort_unstable_by(|&a, &b| compare(text, marked, depth, a.as_index(), b.as_index()));

    if let Some(first) = tied.first_mut() {
        *first = false;
    }
    for i in 1..group.len() {
        let (a, b) = (group[i - 1].as_index(), group[i].as_index());
        tied[i] = compare(text, marked, depth, a, b) == Ordering::Equal;
    }
}
