use anyhow::{bail, ensure, Context, Result};
use rustc_hash::FxHashSet;

fn priority(item: u8) -> Result<usize> {
    Ok(match item {
        b'a'..=b'z' => (item - b'a') as usize + 1,
        b'A'..=b'Z' => (item - b'A') as usize + 27,
        _ => bail!("invalid item {:?}", item as char),
    })
}

fn item_set(items: &[u8]) -> FxHashSet<u8> {
    items.iter().copied().collect()
}

/// Sums every item found in both compartments, not just the first one.
fn shared_priority(rucksack: &[u8]) -> Result<usize> {
    ensure!(
        rucksack.len() % 2 == 0,
        "rucksack of odd length {} can't be split evenly",
        rucksack.len()
    );
    let (left, right) = rucksack.split_at(rucksack.len() / 2);
    item_set(left)
        .intersection(&item_set(right))
        .map(|&item| priority(item))
        .sum()
}

fn badge_priority(group: &[&[u8]]) -> Result<usize> {
    ensure!(group.len() == 3, "incomplete group of {} rucksacks", group.len());
    let common = group[1..].iter().fold(item_set(group[0]), |acc, rucksack| {
        let items = item_set(rucksack);
        acc.intersection(&items).copied().collect()
    });
    // Several common items pick the lowest priority.
    let badge = common
        .into_iter()
        .map(priority)
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .min();
    badge.context("group has no common badge")
}

pub fn day3(input: &str) -> Result<(usize, usize)> {
    let rucksacks = input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::as_bytes)
        .collect::<Vec<_>>();
    for (i, rucksack) in rucksacks.iter().enumerate() {
        ensure!(
            rucksack.iter().all(u8::is_ascii_alphabetic),
            "rucksack {} contains a non-letter item",
            i + 1
        );
    }

    let mut part1 = 0;
    for (i, rucksack) in rucksacks.iter().enumerate() {
        part1 += shared_priority(rucksack).with_context(|| format!("rucksack {}", i + 1))?;
    }

    let mut part2 = 0;
    for (i, group) in rucksacks.chunks(3).enumerate() {
        part2 += badge_priority(group).with_context(|| format!("group {}", i + 1))?;
    }

    Ok((part1, part2))
}
