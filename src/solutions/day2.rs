use anyhow::{bail, Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Rock,
    Paper,
    Scissors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Win,
    Draw,
    Loss,
}

/// Second column of the strategy guide; its meaning differs between the two parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    X,
    Y,
    Z,
}

fn choice_score(choice: Choice) -> usize {
    match choice {
        Choice::Rock => 1,
        Choice::Paper => 2,
        Choice::Scissors => 3,
    }
}

fn outcome_score(outcome: Outcome) -> usize {
    match outcome {
        Outcome::Win => 6,
        Outcome::Draw => 3,
        Outcome::Loss => 0,
    }
}

/// The choice defeated by `choice`.
fn beats(choice: Choice) -> Choice {
    match choice {
        Choice::Rock => Choice::Scissors,
        Choice::Scissors => Choice::Paper,
        Choice::Paper => Choice::Rock,
    }
}

fn outcome(me: Choice, opponent: Choice) -> Outcome {
    if me == opponent {
        Outcome::Draw
    } else if beats(me) == opponent {
        Outcome::Win
    } else {
        Outcome::Loss
    }
}

fn needed_choice(opponent: Choice, outcome: Outcome) -> Choice {
    match outcome {
        Outcome::Draw => opponent,
        Outcome::Loss => beats(opponent),
        // The relation is a 3-cycle, so the winner is two steps along it.
        Outcome::Win => beats(beats(opponent)),
    }
}

fn round_score(me: Choice, opponent: Choice) -> usize {
    choice_score(me) + outcome_score(outcome(me, opponent))
}

fn parse_round(line: &str) -> Result<(Choice, Column)> {
    let (opponent, column) = line.split_once(' ').context("missing separator")?;
    let opponent = match opponent {
        "A" => Choice::Rock,
        "B" => Choice::Paper,
        "C" => Choice::Scissors,
        other => bail!("invalid opponent choice {:?}", other),
    };
    let column = match column {
        "X" => Column::X,
        "Y" => Column::Y,
        "Z" => Column::Z,
        other => bail!("invalid strategy column {:?}", other),
    };
    Ok((opponent, column))
}

pub fn day2(input: &str) -> Result<(usize, usize)> {
    let rounds = input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_round(line.trim()).with_context(|| format!("line {}", i + 1)))
        .collect::<Result<Vec<_>>>()?;

    let part1 = rounds
        .iter()
        .map(|&(opponent, column)| {
            let me = match column {
                Column::X => Choice::Rock,
                Column::Y => Choice::Paper,
                Column::Z => Choice::Scissors,
            };
            round_score(me, opponent)
        })
        .sum();

    let part2 = rounds
        .iter()
        .map(|&(opponent, column)| {
            let wanted = match column {
                Column::X => Outcome::Loss,
                Column::Y => Outcome::Draw,
                Column::Z => Outcome::Win,
            };
            round_score(needed_choice(opponent, wanted), opponent)
        })
        .sum();

    Ok((part1, part2))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn test_day2() -> Result<()> {
        let example = indoc! {"
            A Y
            B X
            C Z
        "};
        assert_eq!(day2(example)?, (15, 12));
        Ok(())
    }

    #[test]
    fn test_single_rounds() -> Result<()> {
        // Rock vs paper: 2 + 6.
        assert_eq!(day2("A Y")?.0, 8);
        // Opponent plays paper and we need to lose, so we pick rock: 1 + 0.
        assert_eq!(needed_choice(Choice::Paper, Outcome::Loss), Choice::Rock);
        assert_eq!(day2("B X")?.1, 1);
        Ok(())
    }

    #[test]
    fn test_beats_relation_is_consistent() {
        for opponent in [Choice::Rock, Choice::Paper, Choice::Scissors] {
            for wanted in [Outcome::Win, Outcome::Draw, Outcome::Loss] {
                assert_eq!(outcome(needed_choice(opponent, wanted), opponent), wanted);
            }
        }
    }

    #[test]
    fn test_malformed_round() {
        assert!(day2("A Y\nD X\n").is_err());
        assert!(day2("A W").is_err());
        assert!(day2("AY").is_err());
    }
}
