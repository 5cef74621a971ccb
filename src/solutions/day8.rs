use anyhow::{ensure, Context, Result};
use nalgebra::DMatrix;

fn parse_grid(input: &str) -> Result<DMatrix<u8>> {
    let rows = input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>();
    let width = rows.first().context("empty grid")?.len();

    let mut heights = Vec::with_capacity(rows.len() * width);
    for (i, row) in rows.iter().enumerate() {
        ensure!(
            row.len() == width,
            "row {} has width {}, expected {}",
            i + 1,
            row.len(),
            width
        );
        for &b in row.as_bytes() {
            ensure!(b.is_ascii_digit(), "row {}: invalid height {:?}", i + 1, b as char);
            heights.push(b - b'0');
        }
    }

    Ok(DMatrix::from_row_slice(rows.len(), width, &heights))
}

/// Trees seen along one line of sight, and whether a tree at least as tall ended it early.
fn viewing_distance(line: impl Iterator<Item = u8>, height: u8) -> (usize, bool) {
    let mut distance = 0;
    for other in line {
        distance += 1;
        if other >= height {
            return (distance, true);
        }
    }
    (distance, false)
}

/// Looks left, right, up and down from a tree. Edge trees get an empty line of sight.
fn look_around(grid: &DMatrix<u8>, row: usize, col: usize) -> [(usize, bool); 4] {
    let height = grid[(row, col)];
    [
        viewing_distance((0..col).rev().map(|c| grid[(row, c)]), height),
        viewing_distance((col + 1..grid.ncols()).map(|c| grid[(row, c)]), height),
        viewing_distance((0..row).rev().map(|r| grid[(r, col)]), height),
        viewing_distance((row + 1..grid.nrows()).map(|r| grid[(r, col)]), height),
    ]
}

pub fn day8(input: &str) -> Result<(usize, usize)> {
    let grid = parse_grid(input)?;

    let mut visible = 0;
    let mut best_score: usize = 0;
    for row in 0..grid.nrows() {
        for col in 0..grid.ncols() {
            let views = look_around(&grid, row, col);
            if views.iter().any(|&(_, blocked)| !blocked) {
                visible += 1;
            }
            let score: usize = views.iter().map(|&(distance, _)| distance).product();
            best_score = best_score.max(score);
        }
    }

    Ok((visible, best_score))
}
