//! Memory primitives
//!
//! Byte fill plus the block-copy seam. The copy is deliberately split
//! into two primitives: `push` starts a transfer and flags the engine
//! busy, `pull` is the public blocking entry that pushes and then waits
//! for visible completion. The software engine here finishes the copy
//! before `push` returns; a DMA- or interrupt-backed engine can
//! substitute without changing the `pull` contract, which blocks either
//! way.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::{mmio, Error, Result};

/// Fill `len` bytes at `dst` with `value`
///
/// Defined for `len == 0` (writes nothing). Returns `dst`.
///
/// # Safety
/// `dst` must be valid for writes of `len` bytes.
pub unsafe fn memset(dst: *mut u8, value: u8, len: usize) -> *mut u8 {
    let mut p = dst;
    let mut remaining = len;
    while remaining != 0 {
        p.write(value);
        p = p.add(1);
        remaining -= 1;
    }
    dst
}

/// Fill a caller buffer with one byte value
///
/// Safe bounded form of [`memset`].
pub fn fill(buf: &mut [u8], value: u8) {
    unsafe {
        memset(buf.as_mut_ptr(), value, buf.len());
    }
}

/// Block-copy engine
///
/// Owns the busy flag that makes copy completion observable. One
/// process-wide instance backs [`copy`]; drivers that front a real copy
/// unit can hold their own.
pub struct CopyEngine {
    busy: AtomicBool,
}

impl CopyEngine {
    /// Create an idle engine
    pub const fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
        }
    }

    /// Start a block copy
    ///
    /// Marks the engine busy for the duration of the transfer. This
    /// software engine completes the copy synchronously and is idle
    /// again by the time it returns; callers must still treat
    /// completion as asynchronous and observe it through
    /// [`is_busy`](Self::is_busy) or [`wait`](Self::wait).
    pub fn push(&self, dest: &mut [u8], src: &[u8]) -> Result<()> {
        if dest.len() != src.len() {
            return Err(Error::LengthMismatch {
                dest: dest.len(),
                src: src.len(),
            });
        }
        self.busy.store(true, Ordering::Release);
        dest.copy_from_slice(src);
        self.busy.store(false, Ordering::Release);
        Ok(())
    }

    /// Check whether a pushed copy is still in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Spin until the engine is idle
    pub fn wait(&self) {
        while self.is_busy() {
            mmio::pause();
        }
    }

    /// Blocking copy: push, then wait for visible completion
    ///
    /// The public entry point. Does not return until the copy is
    /// observably complete.
    pub fn pull(&self, dest: &mut [u8], src: &[u8]) -> Result<()> {
        self.push(dest, src)?;
        self.wait();
        Ok(())
    }
}

static ENGINE: CopyEngine = CopyEngine::new();

/// Copy `src` into `dest`, blocking until complete
///
/// Lengths must match exactly. Runs on the process-wide engine.
pub fn copy(dest: &mut [u8], src: &[u8]) -> Result<()> {
    ENGINE.pull(dest, src)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_writes_every_byte() {
        let mut buf = [0u8; 16];
        fill(&mut buf, 0x5A);
        assert!(buf.iter().all(|&b| b == 0x5A));
    }

    #[test]
    fn fill_zero_length_is_noop() {
        let mut buf = [7u8; 4];
        fill(&mut buf[..0], 0xFF);
        assert_eq!(buf, [7, 7, 7, 7]);
    }

    #[test]
    fn memset_returns_destination() {
        let mut buf = [0u8; 4];
        let p = buf.as_mut_ptr();
        let r = unsafe { memset(p, 1, buf.len()) };
        assert_eq!(r, p);
        assert_eq!(buf, [1, 1, 1, 1]);
    }

    #[test]
    fn copy_round_trips() {
        let src = *b"block copy payload";
        let mut dest = [0u8; 18];
        copy(&mut dest, &src).unwrap();
        assert_eq!(dest, src);
    }

    #[test]
    fn copy_rejects_length_mismatch() {
        let mut dest = [0u8; 4];
        assert_eq!(
            copy(&mut dest, b"12345"),
            Err(Error::LengthMismatch { dest: 4, src: 5 })
        );
    }

    #[test]
    fn engine_is_idle_after_pull() {
        let engine = CopyEngine::new();
        let mut dest = [0u8; 3];
        engine.pull(&mut dest, b"abc").unwrap();
        assert!(!engine.is_busy());
        assert_eq!(&dest, b"abc");
    }
}
