//! Process-wide output sink
//!
//! A minimal console interface for diagnostic text: one `putc`, a
//! default `puts` with LF-to-CRLF expansion, and a registration slot
//! for the one console the process writes through. Output before (or
//! without) registration is silently dropped; diagnostics must never
//! make the program fail.

use spin::Once;

/// Console for diagnostic output
///
/// Implementations should block in `putc` until the underlying device
/// has accepted the byte.
pub trait Console: Send + Sync {
    /// Write a single byte to the console
    fn putc(&self, c: u8);

    /// Write a string to the console
    ///
    /// The default implementation writes byte by byte, expanding LF to
    /// CRLF for raw terminals.
    fn puts(&self, s: &str) {
        for byte in s.bytes() {
            if byte == b'\n' {
                self.putc(b'\r');
            }
            self.putc(byte);
        }
    }
}

/// Console that discards all output
///
/// For builds where diagnostic output is not wanted; every call
/// compiles down to nothing.
pub struct NullConsole;

impl Console for NullConsole {
    #[inline(always)]
    fn putc(&self, _c: u8) {}

    #[inline(always)]
    fn puts(&self, _s: &str) {}
}

static CONSOLE: Once<&'static dyn Console> = Once::new();

/// Register the process-wide console
///
/// The first registration wins; later calls are ignored.
pub fn register(console: &'static dyn Console) {
    CONSOLE.call_once(|| console);
}

/// The registered console, if any
pub fn console() -> Option<&'static dyn Console> {
    CONSOLE.get().copied()
}

/// Write one byte to the registered console
///
/// Dropped silently when no console is registered.
pub fn putc(c: u8) {
    if let Some(con) = console() {
        con.putc(c);
    }
}

/// Write a string to the registered console
///
/// Dropped silently when no console is registered.
pub fn puts(s: &str) {
    if let Some(con) = console() {
        con.puts(s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::String;
    use std::sync::Mutex;

    struct BufConsole(Mutex<String>);

    impl Console for BufConsole {
        fn putc(&self, c: u8) {
            self.0.lock().unwrap().push(c as char);
        }
    }

    #[test]
    fn default_puts_expands_newlines() {
        let con = BufConsole(Mutex::new(String::new()));
        con.puts("ab\ncd");
        assert_eq!(con.0.lock().unwrap().as_str(), "ab\r\ncd");
    }

    #[test]
    fn null_console_discards() {
        NullConsole.putc(b'x');
        NullConsole.puts("nothing to see");
    }

    // The registration slot itself is exercised in tests/printf.rs:
    // registering here would leak into every other unit test in this
    // binary.
}
