pub mod solutions;

use anyhow::{Context, Result};

use solutions::*;

/// Type-erased day entry point, answers already rendered for display.
pub type Solution = fn(&str) -> Result<(String, String)>;

macro_rules! solution {
    ($day:ident) => {
        |input: &str| -> Result<(String, String)> {
            let (part1, part2) = $day(input)?;
            Ok((part1.to_string(), part2.to_string()))
        }
    };
}

pub const ALL_SOLUTIONS: [Solution; 8] = [
    solution!(day1),
    solution!(day2),
    solution!(day3),
    solution!(day4),
    solution!(day5),
    solution!(day6),
    solution!(day7),
    solution!(day8),
];

pub fn load_input(name: &str) -> Result<String> {
    let path = format!("inputs/{}", name);
    std::fs::read_to_string(&path).with_context(|| format!("failed to read input file {}", path))
}

pub fn default_input(n: usize) -> Result<String> {
    load_input(&format!("{}.txt", n))
}

/// Parses a non-empty run of ASCII digits. Returns `None` for anything else, including overflow.
pub fn parse_usize(bytes: &[u8]) -> Option<usize> {
    if bytes.is_empty() {
        return None;
    }
    let mut ret: usize = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return None;
        }
        ret = ret.checked_mul(10)?.checked_add((b - b'0') as usize)?;
    }
    Some(ret)
}
