use std::collections::hash_map::Entry;

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;

const PACKET_MARKER_LEN: usize = 4;
const MESSAGE_MARKER_LEN: usize = 14;

/// Number of characters consumed once the last `n` of them are all distinct.
fn marker_end(stream: &[u8], n: usize) -> Option<usize> {
    let mut window = FxHashMap::<u8, usize>::default();

    for (i, &c) in stream.iter().enumerate() {
        *window.entry(c).or_insert(0) += 1;

        if i >= n {
            if let Entry::Occupied(mut leaving) = window.entry(stream[i - n]) {
                *leaving.get_mut() -= 1;
                if *leaving.get() == 0 {
                    leaving.remove();
                }
            }
        }

        if window.len() == n {
            return Some(i + 1);
        }
    }

    None
}

pub fn day6(input: &str) -> Result<(usize, usize)> {
    let stream = input.trim().as_bytes();

    let part1 = marker_end(stream, PACKET_MARKER_LEN).context("no start-of-packet marker")?;
    let part2 = marker_end(stream, MESSAGE_MARKER_LEN).context("no start-of-message marker")?;

    Ok((part1, part2))
}
