//! romhex - binary-to-hex-dump conversion
//!
//! Reads a binary image and writes the text form simulators and
//! synthesis tools load ROMs from: one zero-padded lowercase hex value
//! per line. Whole-word mode emits one `.hex` file of 32-bit
//! little-endian words; byte mode emits one file per byte lane,
//! values interleaved at word stride, for memories built from
//! byte-wide banks.
//!
//! Usage:
//!   romhex -i image.bin -o rom              # rom.hex, 32-bit words
//!   romhex -i image.bin -o rom --byte       # rom0.hex .. rom3.hex
//!   romhex -i image.bin -o rom --byte --w64 # rom0.hex .. rom7.hex

use std::fs::File;
use std::io::{self, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "romhex")]
#[command(about = "Dump a binary image as .hex text files for ROM initialization")]
struct Args {
    /// Input binary (stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output base name; ".hex" (or "<lane>.hex") is appended
    #[arg(short, long, default_value = "aout")]
    output: String,

    /// Byte offset to start reading the input at
    #[arg(long, default_value_t = 0)]
    base: u64,

    /// Image size in bytes; shorter input is zero-padded
    #[arg(long, default_value_t = 1 << 16)]
    size: usize,

    /// Write one file per byte lane instead of whole words
    #[arg(long)]
    byte: bool,

    /// Keep trailing zero bytes instead of trimming them
    #[arg(long)]
    all: bool,

    /// Interleave eight byte lanes (64-bit words) instead of four
    #[arg(long)]
    w64: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut data = vec![0u8; args.size];
    let amount = read_image(&args, &mut data)?;
    log::info!("read {} bytes of {} requested", amount, args.size);

    let limit = if args.all {
        amount
    } else {
        trimmed_len(&data[..amount])
    };
    if limit < amount {
        log::info!("trimmed {} trailing zero bytes", amount - limit);
    }

    if args.byte {
        let stride = if args.w64 { 8 } else { 4 };
        for lane in 0..stride {
            let path = format!("{}{}.hex", args.output, lane);
            let file = File::create(&path).with_context(|| format!("cannot create {path}"))?;
            let mut out = BufWriter::new(file);
            dump_lane(&mut out, &data, limit, lane, stride)?;
            out.flush()?;
            log::info!("wrote {path}");
        }
    } else {
        let path = format!("{}.hex", args.output);
        let file = File::create(&path).with_context(|| format!("cannot create {path}"))?;
        let mut out = BufWriter::new(file);
        dump_words(&mut out, &data, limit)?;
        out.flush()?;
        log::info!("wrote {path}");
    }

    Ok(())
}

/// Read up to `data.len()` bytes from the selected input, starting at
/// the configured base offset. Returns the byte count actually read;
/// the rest of `data` stays zero.
fn read_image(args: &Args, data: &mut [u8]) -> Result<usize> {
    let mut reader: Box<dyn Read> = match &args.input {
        Some(path) => {
            let mut file =
                File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
            file.seek(SeekFrom::Start(args.base))
                .with_context(|| format!("cannot seek to {:#x}", args.base))?;
            Box::new(file)
        }
        None => {
            let mut stdin = io::stdin().lock();
            if args.base > 0 {
                // No seeking on a pipe; discard the prefix instead.
                io::copy(&mut stdin.by_ref().take(args.base), &mut io::sink())
                    .context("cannot skip base offset on stdin")?;
            }
            Box::new(stdin)
        }
    };

    let mut amount = 0;
    while amount < data.len() {
        let n = reader
            .read(&mut data[amount..])
            .context("cannot read input")?;
        if n == 0 {
            break;
        }
        amount += n;
    }
    Ok(amount)
}

/// Length of `data` with trailing zero bytes removed
fn trimmed_len(data: &[u8]) -> usize {
    let mut n = data.len();
    while n > 0 && data[n - 1] == 0 {
        n -= 1;
    }
    n
}

/// One 8-digit line per 32-bit little-endian word
///
/// A partial word at the cut-off is completed from the zero padding.
fn dump_words<W: Write>(out: &mut W, data: &[u8], limit: usize) -> io::Result<()> {
    let mut i = 0;
    while i < limit {
        let word = u32::from_le_bytes(std::array::from_fn(|k| {
            data.get(i + k).copied().unwrap_or(0)
        }));
        writeln!(out, "{word:08x}")?;
        i += 4;
    }
    Ok(())
}

/// One 2-digit line per byte of a single lane, at word stride
fn dump_lane<W: Write>(
    out: &mut W,
    data: &[u8],
    limit: usize,
    lane: usize,
    stride: usize,
) -> io::Result<()> {
    let mut i = 0;
    while i < limit {
        let byte = data.get(i + lane).copied().unwrap_or(0);
        writeln!(out, "{byte:02x}")?;
        i += stride;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(buf: &[u8]) -> Vec<&str> {
        std::str::from_utf8(buf).unwrap().lines().collect()
    }

    #[test]
    fn trims_only_trailing_zeros() {
        assert_eq!(trimmed_len(&[1, 0, 2, 0, 0]), 3);
        assert_eq!(trimmed_len(&[0, 0, 0]), 0);
        assert_eq!(trimmed_len(&[5]), 1);
        assert_eq!(trimmed_len(&[]), 0);
    }

    #[test]
    fn words_are_little_endian_zero_padded() {
        let data = [0x78, 0x56, 0x34, 0x12, 0xff, 0, 0, 0];
        let mut out = Vec::new();
        dump_words(&mut out, &data, data.len()).unwrap();
        assert_eq!(lines(&out), ["12345678", "000000ff"]);
    }

    #[test]
    fn partial_word_completed_with_zeros() {
        // A trim boundary inside a word still emits the whole word.
        let data = [0xaa, 0xbb, 0xcc, 0xdd, 0x01];
        let mut out = Vec::new();
        dump_words(&mut out, &data, 5).unwrap();
        assert_eq!(lines(&out), ["ddccbbaa", "00000001"]);
    }

    #[test]
    fn lanes_interleave_at_word_stride() {
        let data = [0x00, 0x01, 0x02, 0x03, 0x10, 0x11, 0x12, 0x13];
        let mut lane0 = Vec::new();
        dump_lane(&mut lane0, &data, data.len(), 0, 4).unwrap();
        assert_eq!(lines(&lane0), ["00", "10"]);

        let mut lane3 = Vec::new();
        dump_lane(&mut lane3, &data, data.len(), 3, 4).unwrap();
        assert_eq!(lines(&lane3), ["03", "13"]);
    }

    #[test]
    fn wide_lanes_use_eight_byte_stride() {
        let data: Vec<u8> = (0..16).collect();
        let mut lane7 = Vec::new();
        dump_lane(&mut lane7, &data, data.len(), 7, 8).unwrap();
        assert_eq!(lines(&lane7), ["07", "0f"]);
    }
}
