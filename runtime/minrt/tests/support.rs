//! Cross-module properties of the runtime support layer.

use core::cmp::Ordering;

use minrt::convert::{self, ITOA_BUF_LEN};
use minrt::cstr::{strcmp, strlen, strncpy, Tokenizer};
use minrt::{mem, SWord};

#[test]
fn itoa_atoi_round_trip_sweep() {
    let mut buf = [0u8; ITOA_BUF_LEN];
    let samples = (-1000..=1000)
        .chain([SWord::MIN, SWord::MIN + 1, SWord::MAX - 1, SWord::MAX]);
    for v in samples {
        let text = convert::itoa(v, &mut buf).unwrap();
        assert_eq!(convert::atoi(text), v, "round trip of {}", v);
        // Sign appears exactly when negative.
        assert_eq!(text[0] == b'-', v < 0);
        // No leading zero on nonzero magnitudes.
        if v != 0 {
            let first_digit = if v < 0 { text[1] } else { text[0] };
            assert_ne!(first_digit, b'0');
        }
    }
}

#[test]
fn strncpy_zero_fills_every_tail_byte() {
    for n in 1..24usize {
        let mut dest = vec![0xFFu8; n];
        strncpy(&mut dest, b"word\0");
        let copied = n.min(4);
        assert_eq!(&dest[..copied], &b"word"[..copied]);
        assert!(
            dest[copied..].iter().all(|&b| b == 0),
            "tail not zeroed for n={}",
            n
        );
    }
}

#[test]
fn tokenizer_feeds_string_comparison() {
    let mut text = *b"gamma alpha beta alpha gamma gamma\0";
    let mut tok = Tokenizer::new(&mut text);
    let mut unique: Vec<Vec<u8>> = Vec::new();
    let mut total = 0;
    while let Some(word) = tok.next_token(b" ") {
        total += 1;
        if !unique.iter().any(|w| strcmp(w, word).is_eq()) {
            let mut owned = word.to_vec();
            owned.push(0);
            unique.push(owned);
        }
    }
    assert_eq!(total, 6);
    assert_eq!(unique.len(), 3);
    assert_eq!(strlen(&unique[0]), 5);
    assert_eq!(strcmp(&unique[1], b"alpha\0"), Ordering::Equal);
}

#[test]
fn block_copy_moves_whole_buffers() {
    let src: Vec<u8> = (0..=255).collect();
    let mut dest = vec![0u8; 256];
    mem::copy(&mut dest, &src).unwrap();
    assert_eq!(dest, src);
}

#[cfg(target_pointer_width = "64")]
#[test]
fn amoswap_two_callers_see_consistent_order() {
    use std::thread;

    // Two independent callers swap against the same address. Some
    // total order of the two swaps must hold: one observes the
    // initial value, the other observes the first caller's value, and
    // the final cell holds the remaining value.
    for _ in 0..64 {
        let cell = Box::leak(Box::new(0u64));
        let addr = core::ptr::from_mut(cell) as usize;

        let t1 = thread::spawn(move || unsafe { minrt::mmio::amoswap64(addr as *mut u64, 1) });
        let t2 = thread::spawn(move || unsafe { minrt::mmio::amoswap64(addr as *mut u64, 2) });
        let mut priors = [t1.join().unwrap(), t2.join().unwrap()];
        priors.sort_unstable();

        let last = unsafe { core::ptr::read(addr as *const u64) };
        assert!(last == 1 || last == 2);
        // The loser's value reached the cell; the winner's was
        // returned to the loser.
        assert_eq!(priors, [0, 3 - last]);
    }
}
