//! Word-tokenizing demo
//!
//! Splits a fixed sample text into words, counts the unique ones, and
//! reports through the runtime's console path. The separator set is
//! local to this program on purpose: a consumer of the runtime layer
//! decides for itself what a word boundary is.

use minrt::console::{self, Console};
use minrt::cstr::{strcmp, Tokenizer};
use minrt::mem;
use minrt::printf;

const TEXT: &[u8] = b"this is a test this is only a test this test test test test\0";

/// Word boundaries for this demo, not the runtime's classification.
const SEPARATORS: &[u8] = b" \n\t.,";

const MAX_WORDS: usize = 16;

/// Console backed by the hosting OS's standard output
struct StdoutConsole;

impl Console for StdoutConsole {
    fn putc(&self, c: u8) {
        use std::io::Write;
        let _ = std::io::stdout().write_all(&[c]);
    }

    // Hosted terminals handle bare LF; skip the CRLF expansion.
    fn puts(&self, s: &str) {
        use std::io::Write;
        let _ = std::io::stdout().write_all(s.as_bytes());
    }
}

static STDOUT: StdoutConsole = StdoutConsole;

fn main() {
    console::register(&STDOUT);

    // Work on a scratch copy the tokenizer is free to cut up.
    let mut text = [0u8; TEXT.len()];
    if mem::copy(&mut text, TEXT).is_err() {
        return;
    }

    let mut words: [&[u8]; MAX_WORDS] = [b""; MAX_WORDS];
    let mut count = 0usize;
    let mut dropped = 0usize;

    let mut tok = Tokenizer::new(&mut text);
    while let Some(word) = tok.next_token(SEPARATORS) {
        let word: &[u8] = word;
        if words[..count].iter().any(|w| strcmp(w, word).is_eq()) {
            continue;
        }
        if count < MAX_WORDS {
            words[count] = word;
            count += 1;
        } else {
            dropped += 1;
        }
    }

    printf!("Unique tokens found: %u\n", count);
    for word in &words[..count] {
        match core::str::from_utf8(word) {
            Ok(text) => printf!("%s\n", text),
            Err(_) => printf!("(non-ascii token)\n"),
        }
    }
    if dropped > 0 {
        printf!("(table full, %u unique tokens dropped)\n", dropped);
    }
}
