use anyhow::{ensure, Context, Result};

use crate::parse_usize;

pub fn day1(input: &str) -> Result<(usize, usize)> {
    let mut calories = block_sums(input)?;
    ensure!(!calories.is_empty(), "no calorie blocks in input");

    calories.sort_unstable_by(|a, b| b.cmp(a));
    // Fewer than three elves just sums whatever is there.
    let top3 = calories.iter().take(3).sum();

    Ok((calories[0], top3))
}

/// Sums each blank-line separated block. The last block doesn't need a trailing blank line.
fn block_sums(input: &str) -> Result<Vec<usize>> {
    let mut sums = Vec::new();
    let mut current: Option<usize> = None;

    for (i, line) in input.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() {
            sums.extend(current.take());
            continue;
        }
        let calories = parse_usize(line.as_bytes())
            .with_context(|| format!("line {}: invalid calorie count {:?}", i + 1, line))?;
        let sum = current
            .unwrap_or(0)
            .checked_add(calories)
            .with_context(|| format!("line {}: calorie total overflows", i + 1))?;
        current = Some(sum);
    }
    sums.extend(current);

    Ok(sums)
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        1000
        2000
        3000

        4000

        5000
        6000

        7000
        8000
        9000

        10000
    "};

    #[test]
    fn test_day1() -> Result<()> {
        assert_eq!(day1(EXAMPLE)?, (24000, 45000));
        Ok(())
    }

    #[test]
    fn test_last_block_without_trailing_newline() -> Result<()> {
        assert_eq!(block_sums("1\n2\n\n3")?, vec![3, 3]);
        assert_eq!(day1("3\n\n1\n\n\n\n2")?, (3, 6));
        Ok(())
    }

    #[test]
    fn test_fewer_than_three_blocks() -> Result<()> {
        assert_eq!(day1("5\n5\n\n7\n")?, (10, 17));
        Ok(())
    }

    #[test]
    fn test_block_total_overflow() {
        let input = format!("{}\n1\n", usize::MAX);
        let err = day1(&input).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_malformed_input() {
        assert!(day1("").is_err());
        assert!(day1("\n\n").is_err());
        let err = day1("100\n2x0\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
