//! Case bodies shared by tests and benchmarks
//!
//! `benches/performance.rs` includes this file by path, so it must only
//! depend on `testorbench` and std.

#![allow(dead_code)]

use std::hint::black_box;

use testorbench::{Reporter, Tb};

/// Run-length encode `input` as (byte, count) pairs
pub fn rle_encode(input: &[u8]) -> Vec<(u8, u32)> {
    let mut out: Vec<(u8, u32)> = Vec::new();
    for &byte in input {
        if let Some((last, count)) = out.last_mut() {
            if *last == byte && *count < u32::MAX {
                *count += 1;
                continue;
            }
        }
        out.push((byte, 1));
    }
    out
}

pub fn rle_decode(runs: &[(u8, u32)]) -> Vec<u8> {
    runs.iter()
        .flat_map(|&(byte, count)| std::iter::repeat(byte).take(count as usize))
        .collect()
}

/// Deterministic input with long and short runs
pub fn sample_input(len: usize) -> Vec<u8> {
    (0..len).map(|i| ((i / 7) % 5) as u8).collect()
}

/// Encode/decode suite, one sub-case per input size
pub fn rle_suite(tb: &mut Tb<'_>) {
    for size in [16_usize, 1024, 16 * 1024] {
        tb.run(&format!("size_{size}"), |tb| {
            let input = sample_input(size);
            tb.reset_timer();

            for _ in 0..tb.iterations() {
                let runs = rle_encode(black_box(&input));
                let decoded = rle_decode(&runs);
                if decoded != input {
                    tb.fatal(&format!("round trip mismatch at size {size}"));
                }
            }
        });
    }
}

/// Sorting suite; checks order once per iteration
pub fn sort_suite(tb: &mut Tb<'_>) {
    tb.run("reversed", |tb| {
        let template: Vec<u32> = (0..2048).rev().collect();
        tb.reset_timer();

        for _ in 0..tb.iterations() {
            let mut data = template.clone();
            data.sort_unstable();
            if !data.windows(2).all(|w| w[0] <= w[1]) {
                tb.error("output not sorted");
            }
            black_box(&data);
        }
    });
}
