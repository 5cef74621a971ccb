use anyhow::{ensure, Context, Result};

use crate::parse_usize;

/// Closed range of section IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Assignment {
    start: usize,
    end: usize,
}

impl Assignment {
    fn contains(&self, other: &Assignment) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    fn overlaps(&self, other: &Assignment) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

fn fully_contains((a, b): &(Assignment, Assignment)) -> bool {
    a.contains(b) || b.contains(a)
}

fn overlaps_at_all((a, b): &(Assignment, Assignment)) -> bool {
    a.overlaps(b)
}

fn parse_assignment(s: &str) -> Result<Assignment> {
    let (start, end) = s.split_once('-').context("missing '-'")?;
    let start = parse_usize(start.as_bytes()).with_context(|| format!("invalid bound {:?}", start))?;
    let end = parse_usize(end.as_bytes()).with_context(|| format!("invalid bound {:?}", end))?;
    ensure!(start <= end, "reversed range {}-{}", start, end);
    Ok(Assignment { start, end })
}

fn parse_pair(line: &str) -> Result<(Assignment, Assignment)> {
    let (a, b) = line.split_once(',').context("missing ','")?;
    Ok((parse_assignment(a)?, parse_assignment(b)?))
}

pub fn day4(input: &str) -> Result<(usize, usize)> {
    let pairs = input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_pair(line.trim()).with_context(|| format!("line {}", i + 1)))
        .collect::<Result<Vec<_>>>()?;

    let part1 = pairs.iter().filter(|pair| fully_contains(pair)).count();
    let part2 = pairs.iter().filter(|pair| overlaps_at_all(pair)).count();

    Ok((part1, part2))
}
