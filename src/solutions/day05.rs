use aoc_framework::parsing::{InputScanner, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};

use crate::inclusive_ranges::{InclusiveRange, MergedRanges};

#[solution_runner(
    name = "Day 5: Cafeteria",
    parsed = Inventory,
    part_one = Day05,
    part_two = Day05,
    part_one_label = "Fresh ingredient IDs",
    part_two_label = "IDs considered fresh by ranges"
)]
impl super::AdventOfCode2025<5> {}

/*
Input is a list of fresh ingredient ID ranges, a blank line, and a list of available ingredient IDs.

Ranges are inclusive and formatted as the first ID, a dash, and the last ID. Ranges can overlap.
*/

#[derive(Debug)]
struct Inventory {
    fresh: MergedRanges,
    available: Vec<u64>,
}

#[derive(thiserror::Error, Debug)]
enum ParseInventoryError {
    #[error("expected a dash ('-') to delimit range ends: {0:?}")]
    MissingDash(String),
}

#[derive(thiserror::Error, Debug)]
#[error("count of fresh IDs is too large for u64")]
struct FreshCountOverflow;

impl ParseData for Inventory {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut scanner = InputScanner::new(input);

        scanner.skip_empty();
        let ranges = scanner.collect_sequence(|_, line| -> DynamicResult<_> {
            let line = line.trim();
            let (start, end) = line
                .split_once('-')
                .ok_or_else(|| ParseInventoryError::MissingDash(line.to_owned()))?;
            Ok(InclusiveRange::new(
                parse_with_context(start)?,
                parse_with_context(end)?,
            )?)
        })?;

        let mut available = Vec::new();
        while scanner.skip_empty().is_some() {
            let ids = scanner.collect_sequence(|_, line| parse_with_context::<u64>(line.trim()))?;
            available.extend(ids);
        }

        Ok(Self {
            fresh: MergedRanges::merge(ranges),
            available,
        })
    }
}

struct Day05;

/*
For part 1, count how many of the available ingredient IDs are fresh, i.e. in any range.
*/

impl Solution<PartOne> for Day05 {
    type Input = Inventory;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input
            .available
            .iter()
            .filter(|&&id| input.fresh.contains(id))
            .count())
    }
}

/*
For part 2, ignore the available IDs and count every ID the fresh ranges consider fresh.
*/

impl Solution<PartTwo> for Day05 {
    type Input = Inventory;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.fresh.covered_count().ok_or(FreshCountOverflow)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"3-5
10-14
16-20
12-18

1
5
8
11
17
32
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Inventory::parse(EXAMPLE_INPUT)?;
        let result = <Day05 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 3);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Inventory::parse(EXAMPLE_INPUT)?;
        let result = <Day05 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 14);
        Ok(())
    }

    #[test]
    fn full_u64_range_count_is_an_error() -> DynamicResult<()> {
        let parsed = Inventory::parse("0-18446744073709551615\n\n5\n")?;
        assert_eq!(<Day05 as Solution<PartOne>>::solve(&parsed)?, 1);
        assert!(<Day05 as Solution<PartTwo>>::solve(&parsed).is_err());
        Ok(())
    }

    #[test]
    fn ranges_without_ids() -> DynamicResult<()> {
        let parsed = Inventory::parse("1-3\n2-10\n")?;
        assert!(parsed.available.is_empty());
        assert_eq!(<Day05 as Solution<PartTwo>>::solve(&parsed)?, 10);
        Ok(())
    }

    #[test]
    fn rejects_reversed_range() {
        assert!(Inventory::parse("5-3\n\n4\n").is_err());
        assert!(Inventory::parse("3-5\n\nfour\n").is_err());
    }
}
