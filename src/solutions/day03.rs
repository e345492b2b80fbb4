use aoc_framework::parsing::parse_input_lines;
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;

#[solution_runner(
    name = "Day 3: Lobby",
    parsed = BatteryBanks,
    part_one = Day03,
    part_two = Day03,
    part_one_label = "Total output joltage",
    part_two_label = "Total output joltage"
)]
impl super::AdventOfCode2025<3> {}

/*
Input is banks of batteries, one bank per line. Each battery is a single digit for its joltage
rating, 1 through 9.

Turning on exactly some batteries in a bank produces a joltage of the number formed by the digits of
the turned on batteries, in order. Batteries can't be rearranged.
*/

/// A bank of battery joltage digits.
#[derive(Debug)]
struct Bank(Vec<u8>);

#[derive(Debug)]
struct BatteryBanks(Vec<Bank>);

#[derive(thiserror::Error, Debug)]
enum ParseBankError {
    #[error("invalid battery joltage character: {0:?}")]
    InvalidJoltage(char),
}

impl ParseData for BatteryBanks {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let banks = parse_input_lines(input, |_, line| {
            let line = line.trim();
            if line.is_empty() {
                return Ok(None);
            }
            line.chars()
                .map(|c| {
                    c.to_digit(10)
                        .and_then(|digit| u8::try_from(digit).ok())
                        .ok_or(ParseBankError::InvalidJoltage(c))
                })
                .collect::<Result<_, _>>()
                .map(|digits| Some(Bank(digits)))
        })
        .filter_map(Result::transpose)
        .collect::<Result<_, _>>()?;

        Ok(Self(banks))
    }
}

#[derive(thiserror::Error, Debug)]
enum JoltageError {
    #[error("bank of {bank_size} batteries can't turn on {count} batteries")]
    NotEnoughBatteries { bank_size: usize, count: usize },
}

impl Bank {
    /// The largest joltage from turning on exactly `count` batteries.
    ///
    /// Keeps a monotonic stack of chosen digits, popping smaller digits while enough batteries
    /// remain to fill the stack back up.
    fn max_joltage(&self, count: usize) -> Result<u64, JoltageError> {
        let digits = &self.0;
        if digits.len() < count {
            return Err(JoltageError::NotEnoughBatteries {
                bank_size: digits.len(),
                count,
            });
        }

        let mut droppable = digits.len() - count;
        let mut stack: Vec<u8> = Vec::with_capacity(digits.len());
        for &digit in digits {
            while droppable > 0 && stack.last().is_some_and(|&top| top < digit) {
                stack.pop();
                droppable -= 1;
            }
            stack.push(digit);
        }
        stack.truncate(count);

        Ok(stack
            .into_iter()
            .fold(0, |joltage, digit| joltage * 10 + u64::from(digit)))
    }
}

impl BatteryBanks {
    fn total_joltage(&self, count: usize) -> DynamicResult<u64> {
        let joltages = self
            .0
            .iter()
            .map(|bank| bank.max_joltage(count))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(joltages
            .into_iter()
            .checked_sum()
            .expect("total joltage should not overflow"))
    }
}

struct Day03;

/*
For part 1, turn on exactly two batteries in each bank. Sum the largest joltage possible from each
bank.
*/

impl Solution<PartOne> for Day03 {
    type Input = BatteryBanks;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        input.total_joltage(2)
    }
}

/*
For part 2, turn on exactly twelve batteries in each bank instead.
*/

impl Solution<PartTwo> for Day03 {
    type Input = BatteryBanks;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        input.total_joltage(12)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"987654321111111
811111111111119
234234234234278
818181911112111
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = BatteryBanks::parse(EXAMPLE_INPUT)?;
        let result = <Day03 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 357);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = BatteryBanks::parse(EXAMPLE_INPUT)?;
        let result = <Day03 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 3_121_910_778_619);
        Ok(())
    }

    #[test]
    fn picks_largest_per_bank() -> DynamicResult<()> {
        let parsed = BatteryBanks::parse(EXAMPLE_INPUT)?;
        let pairs = parsed
            .0
            .iter()
            .map(|bank| bank.max_joltage(2))
            .collect::<Result<Vec<_>, _>>()?;
        assert_eq!(pairs, [98, 89, 78, 92]);

        let twelves = parsed
            .0
            .iter()
            .map(|bank| bank.max_joltage(12))
            .collect::<Result<Vec<_>, _>>()?;
        assert_eq!(
            twelves,
            [987_654_321_111, 811_111_111_119, 434_234_234_278, 888_911_112_111]
        );
        Ok(())
    }

    #[test]
    fn short_bank_is_an_error() -> DynamicResult<()> {
        let parsed = BatteryBanks::parse("12345\n")?;
        assert!(<Day03 as Solution<PartTwo>>::solve(&parsed).is_err());
        assert_eq!(parsed.0[0].max_joltage(5)?, 12345);
        Ok(())
    }

    #[test]
    fn rejects_non_digit() {
        assert!(BatteryBanks::parse("1234x\n").is_err());
    }
}
