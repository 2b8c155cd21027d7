#[macro_use]
extern crate clap;

use std::fs;
use std::io::{self, Write};
use std::mem;
use std::process;
use std::time;

use divsufsort::{check, divbwt, divsufsort, unbwt, version};
use libc::{getrusage, rusage, RUSAGE_SELF};

fn main() {
    let matches = clap_app!(divsufsort =>
        (version: version())
        (about: "Suffix array and Burrows-Wheeler transform construction test")
        (@arg TIMES: -t --times +takes_value "repeat multiple times")
        (@arg CHECK: -c --check "check the result")
        (@arg BWT: -b --bwt "construct the Burrows-Wheeler transform instead")
        (@arg OUTPUT: -o --output +takes_value "write the result to a file")
        (@arg INPUT: +required "the data to sort")
    )
    .get_matches();

    let input_file = matches.value_of("INPUT").unwrap_or_default();
    let check_result = matches.is_present("CHECK");
    let build_bwt = matches.is_present("BWT");
    let repeat_times = Ord::max(
        matches
            .value_of("TIMES")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(1),
        1,
    );

    let text = fs::read(&input_file).unwrap_or_else(|err| fail(err));
    eprintln!("load {} bytes from `{}`", text.len(), &input_file);
    if text.len() > u32::MAX as usize {
        fail("input too large for 32-bit suffix array cells");
    }

    let mut suf = vec![0u32; text.len()];
    let mut out = vec![0u8; text.len()];
    let mut primary = 0;
    let mut times = String::new();
    for _ in 0..repeat_times {
        let (res, dur) = if build_bwt {
            timeit(|| divbwt(&text[..], &mut out[..], Some(&mut suf[..])).map(|p| primary = p))
        } else {
            timeit(|| divsufsort(&text[..], &mut suf[..]))
        };
        if let Err(err) = res {
            fail(err);
        }
        times.push_str(format!("{:.3}s ", dur.as_secs_f64()).as_str());
    }
    eprintln!(" time: {}", times);
    eprintln!("  rss: {:.3}MiB", get_peak_rss_kib() as f64 / 1024.0);

    if check_result {
        let ok = if build_bwt {
            let mut back = vec![0u8; text.len()];
            unbwt(&out[..], primary, &mut back[..]).is_ok() && back == text
        } else {
            check(&text[..], &suf[..])
        };
        eprintln!("check: {}", ok);
    }

    if let Some(output_file) = matches.value_of("OUTPUT") {
        let res = if build_bwt {
            write_bwt(output_file, &out[..], primary)
        } else {
            write_suffix_array(output_file, &suf[..])
        };
        if let Err(err) = res {
            fail(err);
        }
        eprintln!("write result to `{}`", output_file);
    }
}

fn fail<E: std::fmt::Display>(err: E) -> ! {
    eprintln!("error: {}", err);
    process::exit(1);
}

fn timeit<F, T>(f: F) -> (T, time::Duration)
where
    F: FnOnce() -> T,
{
    let start = time::Instant::now();
    let ret = f();
    let dur = start.elapsed();
    (ret, dur)
}

fn get_peak_rss_kib() -> u64 {
    let mut ru;
    unsafe {
        ru = mem::zeroed::<rusage>();
        getrusage(RUSAGE_SELF, &mut ru as *mut rusage);
    }
    ru.ru_maxrss as u64
}

/// Suffix array as little endian 32-bit cells.
fn write_suffix_array(path: &str, suf: &[u32]) -> io::Result<()> {
    let mut file = io::BufWriter::new(fs::File::create(path)?);
    for &x in suf.iter() {
        file.write_all(&x.to_le_bytes())?;
    }
    file.flush()
}

/// Primary index on its own line, then the transformed bytes.
fn write_bwt(path: &str, bwt: &[u8], primary: usize) -> io::Result<()> {
    let mut file = io::BufWriter::new(fs::File::create(path)?);
    writeln!(file, "{}", primary)?;
    file.write_all(bwt)?;
    file.flush()
}
