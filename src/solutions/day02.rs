use std::collections::HashSet;

use aoc_framework::parsing::parse_with_context;
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};

use crate::inclusive_ranges::{InclusiveRange, MergedRanges};

#[solution_runner(
    name = "Day 2: Gift Shop",
    parsed = ProductIdRanges,
    part_one = Day02,
    part_two = Day02,
    part_one_label = "Sum of IDs repeated twice",
    part_two_label = "Sum of IDs repeated at least twice"
)]
impl super::AdventOfCode2025<2> {}

/*
Input is a single line of comma-separated product ID ranges. Each range is formatted as the first ID,
a dash, and the last ID (inclusive).

An invalid ID is made only of some sequence of digits repeated (without leading zeroes).
*/

/// The parsed, merged product ID ranges.
#[derive(Debug)]
struct ProductIdRanges(MergedRanges);

#[derive(thiserror::Error, Debug)]
enum ParseProductIdRangesError {
    #[error("expected a dash ('-') to delimit range ends: {0:?}")]
    MissingDash(String),
}

impl ParseData for ProductIdRanges {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let ranges = input
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| -> DynamicResult<_> {
                let (start, end) = part
                    .split_once('-')
                    .ok_or_else(|| ParseProductIdRangesError::MissingDash(part.to_owned()))?;
                Ok(InclusiveRange::new(
                    parse_with_context(start)?,
                    parse_with_context(end)?,
                )?)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self(MergedRanges::merge(ranges)))
    }
}

/// The count of decimal digits in a number.
fn digit_count(value: u64) -> u32 {
    value.checked_ilog10().map_or(1, |log| log + 1)
}

/// The multiplier that repeats a block of `block_digits` digits `repeats` times, e.g. `10101` for a
/// two digit block repeated three times. Returns `None` if the repeated number can't fit `u64`.
fn repeat_multiplier(block_digits: u32, repeats: u32) -> Option<u64> {
    let shift = 10u64.checked_pow(block_digits)?;
    (1..repeats).try_fold(1u64, |acc, _| acc.checked_mul(shift)?.checked_add(1))
}

impl ProductIdRanges {
    /// Sum the distinct invalid IDs inside the ranges whose digit block repeats a count accepted by
    /// `accept_repeats`.
    ///
    /// IDs are generated per total digit length by repeating every block of a dividing length,
    /// skipping lengths wholly outside the ranges' bounds.
    fn sum_repeated_ids(&self, accept_repeats: impl Fn(u32) -> bool) -> u64 {
        let Some((min_id, max_id)) = self.0.bounds() else {
            return 0;
        };

        let mut total: u64 = 0;
        for total_digits in 2..=digit_count(max_id) {
            // a number may repeat blocks of several lengths, e.g. 222222; count it once
            let mut seen = HashSet::new();

            for block_digits in (1..=total_digits / 2).filter(|d| total_digits % d == 0) {
                let repeats = total_digits / block_digits;
                if !accept_repeats(repeats) {
                    continue;
                }
                let Some(multiplier) = repeat_multiplier(block_digits, repeats) else {
                    continue;
                };

                let first_block = 10u64.pow(block_digits - 1);
                let last_block = 10u64.pow(block_digits) - 1;
                for block in first_block..=last_block {
                    let Some(id) = block.checked_mul(multiplier) else {
                        break;
                    };
                    if id > max_id {
                        break;
                    }
                    if id >= min_id && self.0.contains(id) && seen.insert(id) {
                        total = total
                            .checked_add(id)
                            .expect("sum of invalid IDs should not overflow");
                    }
                }
            }
        }
        total
    }
}

struct Day02;

/*
For part 1, an invalid ID is a sequence of digits repeated exactly twice, e.g. `6464`. Sum all invalid
IDs within the ranges.
*/

impl Solution<PartOne> for Day02 {
    type Input = ProductIdRanges;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.sum_repeated_ids(|repeats| repeats == 2))
    }
}

/*
For part 2, an invalid ID is a sequence of digits repeated at least twice, e.g. `123123123`.
*/

impl Solution<PartTwo> for Day02 {
    type Input = ProductIdRanges;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.sum_repeated_ids(|repeats| repeats >= 2))
    }
}
