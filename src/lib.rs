//! Suffix array and Burrows-Wheeler transform construction for byte strings.
//!
//! Only the type B* suffixes (s-typed suffixes followed by an l-typed one) are sorted
//! directly, by their substrings and then by rank refinement of the reduced string. All
//! other suffixes are induced from them in two linear scans.

#[macro_use]
extern crate cfg_if;

#[macro_use]
mod common;
mod bstar;
mod buckets;
mod error;
mod induce;
mod refine;
mod slots;
mod substring;
mod types;
mod unbwt;

pub use common::check;
pub use error::{Error, Result};
pub use types::SaIndex;
pub use unbwt::unbwt;

use error::try_filled;
use slots::Slots;

/// Construct the suffix array of `text` into the first `text.len()` cells of `suf`.
pub fn divsufsort<I: SaIndex>(text: &[u8], suf: &mut [I]) -> Result<()> {
    let n = text.len();
    if suf.len() < n {
        return Err(Error::InvalidArgument("suffix array shorter than the text"));
    }
    if n > I::MAX_INDEX {
        return Err(Error::InvalidArgument("text too long for the index type"));
    }
    let suf = &mut suf[..n];

    match n {
        0 => {}
        1 => suf[0] = I::from_index(0),
        2 => {
            let m = (text[0] < text[1]) as usize;
            suf[m ^ 1] = I::from_index(0);
            suf[m] = I::from_index(1);
        }
        _ => {
            let mut slots = Slots::new(suf)?;
            let marked = bstar::sort_bstar(text, &mut slots)?;
            induce::construct_sa(text, &mut slots, &marked)?;
        }
    }
    crosscheck!("divsufsort done n={}", n);
    Ok(())
}

/// Construct the Burrows-Wheeler transform of `text` into the first `text.len()` bytes
/// of `bwt`, returning the primary index.
///
/// `bwt[0]` is the last character of the text; the row of the whole text, which would
/// hold the end marker, is left out. The primary index is one past that row, so it lies
/// in `1..=n` unless the text is empty. `scratch`, when given, must hold at least
/// `text.len()` cells and is used instead of allocating the workspace.
pub fn divbwt<I: SaIndex>(text: &[u8], bwt: &mut [u8], scratch: Option<&mut [I]>) -> Result<usize> {
    let n = text.len();
    if bwt.len() < n {
        return Err(Error::InvalidArgument("output shorter than the text"));
    }
    if n > I::MAX_INDEX {
        return Err(Error::InvalidArgument("text too long for the index type"));
    }
    if let Some(scratch) = scratch.as_ref() {
        if scratch.len() < n {
            return Err(Error::InvalidArgument("scratch shorter than the text"));
        }
    }
    if n <= 1 {
        bwt[..n].copy_from_slice(text);
        return Ok(n);
    }

    let mut owned;
    let work = match scratch {
        Some(scratch) => &mut scratch[..n],
        None => {
            owned = try_filled::<I>(n)?;
            &mut owned[..]
        }
    };

    let primary = {
        let mut slots = Slots::new(&mut work[..])?;
        let marked = bstar::sort_bstar(text, &mut slots)?;
        induce::construct_bwt(text, &mut slots, &marked)?
    };

    bwt[0] = text[n - 1];
    for i in 0..primary {
        bwt[i + 1] = work[i].as_index() as u8;
    }
    for i in primary + 1..n {
        bwt[i] = work[i].as_index() as u8;
    }
    crosscheck!("divbwt done n={} primary={}", n, primary + 1);
    Ok(primary + 1)
}

/// Version of this library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Construct the suffix array of `text` with 32-bit cells.
pub fn suffix_array(text: &[u8]) -> Result<Vec<u32>> {
    let mut suf = try_filled::<u32>(text.len())?;
    divsufsort(text, &mut suf[..])?;
    Ok(suf)
}

/// Construct the Burrows-Wheeler transform of `text` and its primary index.
pub fn bwt(text: &[u8]) -> Result<(Vec<u8>, usize)> {
    let mut out = try_filled::<u8>(text.len())?;
    let primary = divbwt::<u32>(text, &mut out[..], None)?;
    Ok((out, primary))
}
