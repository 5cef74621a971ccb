use anyhow::{bail, ensure, Context, Result};
use regex::Regex;

use crate::parse_usize;

/// Each stack is stored bottom to top, so its top crate is `last()`.
type Stacks = Vec<Vec<u8>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Move {
    count: usize,
    from: usize,
    to: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Crane {
    /// Moves one crate at a time.
    CrateMover9000,
    /// Moves the whole run at once, keeping its order.
    CrateMover9001,
}

fn parse_stacks(drawing: &str) -> Result<Stacks> {
    let mut rows = drawing.lines().rev();
    let labels = rows.next().context("missing stack labels")?;
    let count = labels.split_whitespace().count();
    for (i, label) in labels.split_whitespace().enumerate() {
        ensure!(
            parse_usize(label.as_bytes()) == Some(i + 1),
            "unexpected stack label {:?}",
            label
        );
    }
    ensure!(count > 0, "no stacks in drawing");

    let mut stacks = vec![Vec::new(); count];
    for row in rows {
        let row = row.as_bytes();
        ensure!(
            row.iter().skip(4 * count).all(u8::is_ascii_whitespace),
            "crate beyond the last stack in row {:?}",
            String::from_utf8_lossy(row)
        );
        for (i, stack) in stacks.iter_mut().enumerate() {
            match row.get(4 * i + 1) {
                Some(c) if c.is_ascii_alphabetic() => stack.push(*c),
                Some(b' ') | None => {}
                Some(c) => bail!("unexpected crate {:?} in stack {}", *c as char, i + 1),
            }
        }
    }

    Ok(stacks)
}

fn parse_moves(procedure: &str, stack_count: usize) -> Result<Vec<Move>> {
    let re = Regex::new(r"^move ([0-9]+) from ([0-9]+) to ([0-9]+)$")?;
    let stack_index = |s: &str| -> Result<usize> {
        match parse_usize(s.as_bytes()) {
            Some(n) if (1..=stack_count).contains(&n) => Ok(n - 1),
            _ => bail!("no stack {}", s),
        }
    };

    procedure
        .lines()
        .map(str::trim)
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(i, line)| -> Result<Move> {
            let caps = re
                .captures(line)
                .with_context(|| format!("move {}: invalid syntax {:?}", i + 1, line))?;
            Ok(Move {
                count: parse_usize(caps[1].as_bytes()).context("crate count out of range")?,
                from: stack_index(&caps[2])?,
                to: stack_index(&caps[3])?,
            })
        })
        .collect()
}

fn execute(mut stacks: Stacks, moves: &[Move], crane: Crane) -> Result<Stacks> {
    for (i, mv) in moves.iter().enumerate() {
        let from = &mut stacks[mv.from];
        ensure!(
            from.len() >= mv.count,
            "move {}: can't take {} crates from stack {} holding {}",
            i + 1,
            mv.count,
            mv.from + 1,
            from.len()
        );
        if mv.from == mv.to {
            continue;
        }
        let at = from.len() - mv.count;
        let mut lifted = from.split_off(at);
        if crane == Crane::CrateMover9000 {
            lifted.reverse();
        }
        stacks[mv.to].extend(lifted);
    }
    Ok(stacks)
}

fn top_crates(stacks: &Stacks) -> String {
    stacks.iter().filter_map(|s| s.last()).map(|&c| c as char).collect()
}

/// Splits the input at its first blank line into the drawing and the procedure.
fn split_sections(input: &str) -> Result<(&str, &str)> {
    let mut offset = 0;
    for line in input.split_inclusive('\n') {
        if line.trim_end().is_empty() {
            return Ok((&input[..offset], &input[offset + line.len()..]));
        }
        offset += line.len();
    }
    bail!("missing blank line after drawing")
}

pub fn day5(input: &str) -> Result<(String, String)> {
    let (drawing, procedure) = split_sections(input)?;
    let stacks = parse_stacks(drawing)?;
    let moves = parse_moves(procedure, stacks.len())?;

    let part1 = execute(stacks.clone(), &moves, Crane::CrateMover9000)?;
    let part2 = execute(stacks, &moves, Crane::CrateMover9001)?;

    Ok((top_crates(&part1), top_crates(&part2)))
}
