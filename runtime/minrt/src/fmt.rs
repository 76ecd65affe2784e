//! Minimal formatted output
//!
//! A reduced `%`-specifier interpreter for diagnostic text. Supported
//! conversions: `%s`, `%c`, `%d`/`%i`, `%u`, `%x`, `%b`, and `%%`,
//! with an optional field width, `0` (zero-pad, numeric only) and `-`
//! (left-align) flags, enough for fixed-width hex dumps like `%08x`.
//! No floating point, no positional arguments, no width from
//! arguments.
//!
//! C's varargs become an explicit [`Arg`] slice; the [`sprintf!`] and
//! [`printf!`] macros build it from plain expressions. Formatting is
//! best-effort in the library's usual sense: a missing or mismatched
//! argument renders as nothing, an unknown conversion is skipped, and
//! only buffer exhaustion is reported.
//!
//! [`sprintf!`]: crate::sprintf
//! [`printf!`]: crate::printf

use bitflags::bitflags;

use crate::{ascii, console, convert, cstr, Error, Result, SWord, Word};

/// Stack buffer size `printf` renders through
pub const PRINTF_BUF_LEN: usize = 256;

/// Typed argument for one conversion
#[derive(Debug, Clone, Copy)]
pub enum Arg<'a> {
    /// Consumed by `%s`
    Str(&'a str),
    /// Consumed by `%c`
    Char(u8),
    /// Consumed by `%d`/`%i`; reinterpreted for unsigned conversions
    Int(SWord),
    /// Consumed by `%u`/`%x`/`%b`; reinterpreted for `%d`
    Uint(Word),
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(v: &'a str) -> Self {
        Arg::Str(v)
    }
}

impl From<char> for Arg<'_> {
    fn from(v: char) -> Self {
        Arg::Char(v as u8)
    }
}

impl From<i32> for Arg<'_> {
    fn from(v: i32) -> Self {
        Arg::Int(v as SWord)
    }
}

impl From<SWord> for Arg<'_> {
    fn from(v: SWord) -> Self {
        Arg::Int(v)
    }
}

impl From<u32> for Arg<'_> {
    fn from(v: u32) -> Self {
        Arg::Uint(v as Word)
    }
}

impl From<Word> for Arg<'_> {
    fn from(v: Word) -> Self {
        Arg::Uint(v)
    }
}

bitflags! {
    /// Conversion flags parsed between `%` and the width
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct FmtFlags: u8 {
        /// `0`: pad numerics with zeros after the sign
        const ZERO_PAD = 1 << 0;
        /// `-`: left-align within the field (overrides `ZERO_PAD`)
        const LEFT_ALIGN = 1 << 1;
    }
}

/// Interpret `fmt` with `args` into `buf`
///
/// Returns the number of bytes written, excluding the NUL terminator
/// that always follows them. When the buffer runs out, the filled
/// prefix is still terminated and [`Error::Truncated`] is returned.
pub fn vsprintf(buf: &mut [u8], fmt: &str, args: &[Arg]) -> Result<usize> {
    let mut out = Writer { buf, pos: 0 };
    let bytes = fmt.as_bytes();
    let mut i = 0;
    let mut next_arg = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            out.put(bytes[i])?;
            i += 1;
            continue;
        }
        i += 1;
        if i >= bytes.len() {
            // Dangling '%' at the end of the format: dropped.
            break;
        }
        if bytes[i] == b'%' {
            out.put(b'%')?;
            i += 1;
            continue;
        }

        let mut flags = FmtFlags::empty();
        loop {
            match bytes.get(i).copied() {
                Some(b'0') => flags |= FmtFlags::ZERO_PAD,
                Some(b'-') => flags |= FmtFlags::LEFT_ALIGN,
                _ => break,
            }
            i += 1;
        }

        let mut width = 0usize;
        while let Some(v) = bytes.get(i).copied().and_then(ascii::digit_value) {
            width = width * 10 + v;
            i += 1;
        }

        let Some(&kind) = bytes.get(i) else {
            break;
        };
        i += 1;

        match kind {
            b's' | b'c' | b'd' | b'i' | b'u' | b'x' | b'b' => {
                let arg = args.get(next_arg).copied();
                next_arg += 1;
                render(&mut out, kind, flags, width, arg)?;
            }
            // Unknown conversion: skipped, no argument consumed.
            _ => {}
        }
    }

    out.terminate();
    Ok(out.pos)
}

/// Render `fmt` with `args` to the registered console
///
/// Formats through a fixed [`PRINTF_BUF_LEN`]-byte stack buffer;
/// output that does not fit is emitted as far as it fits. LF expands
/// to CRLF on the way out, matching
/// [`Console::puts`](crate::console::Console::puts).
pub fn printf(fmt: &str, args: &[Arg]) {
    let mut buf = [0u8; PRINTF_BUF_LEN];
    let len = match vsprintf(&mut buf, fmt, args) {
        Ok(len) => len,
        Err(_) => cstr::strlen(&buf),
    };
    for &b in &buf[..len] {
        if b == b'\n' {
            console::putc(b'\r');
        }
        console::putc(b);
    }
}

/// Format into a caller buffer with inline arguments
///
/// `sprintf!(buf, "%s=%08x", name, value)` builds the [`Arg`] slice
/// and calls [`fmt::vsprintf`](crate::fmt::vsprintf).
#[macro_export]
macro_rules! sprintf {
    ($buf:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::fmt::vsprintf($buf, $fmt, &[$($crate::fmt::Arg::from($arg)),*])
    };
}

/// Print to the registered console with inline arguments
#[macro_export]
macro_rules! printf {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::fmt::printf($fmt, &[$($crate::fmt::Arg::from($arg)),*])
    };
}

struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl Writer<'_> {
    /// Append one byte, keeping room for the terminator.
    fn put(&mut self, b: u8) -> Result<()> {
        if self.pos + 1 >= self.buf.len() {
            self.terminate();
            return Err(Error::Truncated {
                needed: self.pos + 2,
                have: self.buf.len(),
            });
        }
        self.buf[self.pos] = b;
        self.pos += 1;
        Ok(())
    }

    fn put_all(&mut self, text: &[u8]) -> Result<()> {
        for &b in text {
            self.put(b)?;
        }
        Ok(())
    }

    fn terminate(&mut self) {
        if self.pos < self.buf.len() {
            self.buf[self.pos] = 0;
        }
    }
}

fn render(
    out: &mut Writer<'_>,
    kind: u8,
    flags: FmtFlags,
    width: usize,
    arg: Option<Arg<'_>>,
) -> Result<()> {
    match (kind, arg) {
        (b's', Some(Arg::Str(s))) => pad_text(out, s.as_bytes(), flags, width),
        (b'c', Some(Arg::Char(c))) => pad_text(out, &[c], flags, width),
        (b'd' | b'i', Some(Arg::Int(v))) => render_signed(out, v, flags, width),
        (b'd' | b'i', Some(Arg::Uint(v))) => render_signed(out, v as SWord, flags, width),
        (b'u' | b'x' | b'b', Some(Arg::Uint(v))) => render_unsigned(out, kind, v, flags, width),
        (b'u' | b'x' | b'b', Some(Arg::Int(v))) => {
            render_unsigned(out, kind, v as Word, flags, width)
        }
        // Missing or mismatched argument: nothing rendered.
        _ => Ok(()),
    }
}

fn render_signed(out: &mut Writer<'_>, v: SWord, flags: FmtFlags, width: usize) -> Result<()> {
    let mut scratch = [0u8; convert::ITOA_BUF_LEN];
    let Ok(text) = convert::itoa(v, &mut scratch) else {
        return Ok(());
    };
    pad_number(out, strip_nul(text), flags, width)
}

fn render_unsigned(
    out: &mut Writer<'_>,
    kind: u8,
    v: Word,
    flags: FmtFlags,
    width: usize,
) -> Result<()> {
    // Sized for the widest rendering (binary).
    let mut scratch = [0u8; convert::BTOA_BUF_LEN];
    let Ok(text) = (match kind {
        b'u' => convert::utoa(v, &mut scratch),
        b'x' => convert::htoa(v, &mut scratch),
        _ => convert::btoa(v, &mut scratch),
    }) else {
        return Ok(());
    };
    pad_number(out, strip_nul(text), flags, width)
}

fn strip_nul(text: &[u8]) -> &[u8] {
    &text[..text.len() - 1]
}

fn pad_text(out: &mut Writer<'_>, text: &[u8], flags: FmtFlags, width: usize) -> Result<()> {
    let pad = width.saturating_sub(text.len());
    if !flags.contains(FmtFlags::LEFT_ALIGN) {
        for _ in 0..pad {
            out.put(b' ')?;
        }
    }
    out.put_all(text)?;
    if flags.contains(FmtFlags::LEFT_ALIGN) {
        for _ in 0..pad {
            out.put(b' ')?;
        }
    }
    Ok(())
}

fn pad_number(out: &mut Writer<'_>, text: &[u8], flags: FmtFlags, width: usize) -> Result<()> {
    if flags.contains(FmtFlags::ZERO_PAD) && !flags.contains(FmtFlags::LEFT_ALIGN) {
        // Zeros go between the sign and the digits; the width counts
        // the sign.
        let (sign, digits) = match text.split_first() {
            Some((&b'-', rest)) => (true, rest),
            _ => (false, text),
        };
        if sign {
            out.put(b'-')?;
        }
        for _ in 0..width.saturating_sub(text.len()) {
            out.put(b'0')?;
        }
        out.put_all(digits)
    } else {
        pad_text(out, text, flags, width)
    }
}
