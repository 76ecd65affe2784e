//! Non-fatal assertion support
//!
//! [`soft_assert!`](crate::soft_assert) reports a violated condition
//! through the console and keeps running: the mechanism is
//! informational, not a safety barrier, and exists for environments
//! where halting would take the diagnostics down with it. Builds that
//! would rather die than run past a broken invariant enable the
//! `fatal-assert` feature, which upgrades every failure to `panic!`.

/// Report a failed assertion
///
/// Called by [`soft_assert!`](crate::soft_assert); use the macro, not
/// this directly, so expression and location are captured for you.
pub fn assert_failed(expr: &str, file: &str, line: u32) {
    #[cfg(feature = "fatal-assert")]
    {
        panic!("assertion failed: {} at {}:{}", expr, file, line);
    }
    #[cfg(not(feature = "fatal-assert"))]
    {
        use crate::fmt::{printf, Arg};
        printf(
            "assertion failed: %s at %s:%u\n",
            &[Arg::Str(expr), Arg::Str(file), Arg::Uint(line as crate::Word)],
        );
    }
}

/// Check a condition, reporting violations without halting
///
/// Prints the failing expression and its source location through the
/// registered console, then continues. With the `fatal-assert`
/// feature the failure panics instead.
#[macro_export]
macro_rules! soft_assert {
    ($cond:expr) => {
        if !$cond {
            $crate::debug::assert_failed(stringify!($cond), file!(), line!());
        }
    };
}
