//! MinRT - Freestanding runtime support layer
//!
//! MinRT supplies the primitive routines that ordinary programs assume
//! exist but a bare-metal target does not provide: numeric conversion,
//! string handling, memory fills and copies, ordered memory-mapped I/O,
//! and a small printf family for diagnostic text. There is no operating
//! system and no hosted standard library beneath this crate.
//!
//! # Architecture
//!
//! The crate is organized into the following modules, leaves first:
//! - `ascii`: digit/hex character classification and value maps
//! - `cstr`: NUL-terminated string primitives over caller buffers
//! - `convert`: integer-to-string and string-to-integer conversion
//! - `mem`: byte fill and the asynchronous block-copy seam
//! - `mmio`: typed volatile register accessors and atomic swap
//! - `console`: process-wide output sink
//! - `fmt`: minimal `%`-specifier formatted output
//! - `debug`: non-fatal assertion support
//!
//! Higher modules call only into lower ones; `fmt` is the sole consumer
//! of `convert`. No module allocates: every buffer is caller-supplied,
//! and nothing here ever takes ownership of caller memory.

#![no_std]

#[cfg(test)]
extern crate std;

use thiserror::Error;

pub mod ascii;
pub mod console;
pub mod convert;
pub mod cstr;
pub mod debug;
pub mod fmt;
pub mod mem;
pub mod mmio;

/// Unsigned native machine word.
///
/// The build target's pointer width decides whether this is 32 or 64
/// bits; addresses, sizes, and conversion results all use this one
/// width within a given build.
pub type Word = usize;

/// Signed counterpart of [`Word`].
pub type SWord = isize;

#[cfg(target_pointer_width = "64")]
static_assertions::assert_eq_size!(Word, u64);
#[cfg(target_pointer_width = "32")]
static_assertions::assert_eq_size!(Word, u32);
static_assertions::assert_eq_size!(Word, SWord);

/// Error types for the bounded runtime operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A caller buffer was too small for the requested rendering.
    ///
    /// The filled prefix of the buffer is still NUL-terminated.
    #[error("destination buffer too small (need {needed} bytes, have {have})")]
    Truncated { needed: usize, have: usize },

    /// Source and destination of a block copy differ in length.
    #[error("copy length mismatch (destination {dest} bytes, source {src})")]
    LengthMismatch { dest: usize, src: usize },
}

pub type Result<T> = core::result::Result<T, Error>;
