//! Solutions implemented for Advent of Code 2025.
//!
//! This module provides [`run_day`] to dynamically run a solution by its day.
//!
//! Steps to make a solution available to run:
//! 1. Make a submodule to hold the solution implementation.
//! 2. Have the submodule implement [`AdventOfCode2025<DAY>`] for its day as a [`SolutionRunner`].
//! 3. Import the submodule below `IMPORT SUBMODULES HERE`
//! 4. Add a match case to run [`AdventOfCode2025<DAY>`] for a day, below `MATCH SOLUTIONS HERE`:
//!
//! ```ignore
//! // matching for day 1
//! 1 => AdventOfCode2025::<1>::run(input, handler, timed),
//! ```

#![warn(clippy::dbg_macro, clippy::print_stderr, clippy::print_stdout)]

use aoc_framework::DynamicResult;
use aoc_framework::runner::{OutputHandler, SolutionRunner};
use thiserror::Error;

// --- IMPORT SUBMODULES HERE ---
mod day01;
mod day02;
mod day03;
mod day04;
mod day05;
mod day06;
mod day07;
mod day08;
mod day09;
mod day10;
mod day11;
mod day12;

/// A structure collecting solutions by day.
///
/// In a submodule, implement this as a [`SolutionRunner`] for the day with
/// [`#[solution_runner]`][aoc_framework::runner::solution_runner]:
///
/// ```ignore
/// #[solution_runner(
///     name = "Day 1: Secret Entrance",
///     parsed = Rotations,
///     part_one = Day01,
///     part_two = Day01,
///     part_one_label = "Times at zero (end of rotation)"
/// )]
/// impl super::AdventOfCode2025<1> {}
/// ```
struct AdventOfCode2025<const DAY: u8>;

/// A solution for a day is not available.
#[derive(Error, Debug)]
#[error("no solution available for day {0}")]
pub struct DayNotAvailable(u8);

/// Run a solution based on the day.
///
/// # Errors
///
/// If the solution for the given day is not available, a [`DayNotAvailable`] error is returned.
///
/// Any dynamically dispatched error from running the solution is propagated.
pub fn run_day(
    day: u8,
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()> {
    match day {
        // --- MATCH SOLUTIONS HERE ---
        1 => AdventOfCode2025::<1>::run(input, handler, timed),
        2 => AdventOfCode2025::<2>::run(input, handler, timed),
        3 => AdventOfCode2025::<3>::run(input, handler, timed),
        4 => AdventOfCode2025::<4>::run(input, handler, timed),
        5 => AdventOfCode2025::<5>::run(input, handler, timed),
        6 => AdventOfCode2025::<6>::run(input, handler, timed),
        7 => AdventOfCode2025::<7>::run(input, handler, timed),
        8 => AdventOfCode2025::<8>::run(input, handler, timed),
        9 => AdventOfCode2025::<9>::run(input, handler, timed),
        10 => AdventOfCode2025::<10>::run(input, handler, timed),
        11 => AdventOfCode2025::<11>::run(input, handler, timed),
        12 => AdventOfCode2025::<12>::run(input, handler, timed),
        _ => Err(DayNotAvailable(day).into()),
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Display;
    use std::time::Duration;

    use aoc_framework::PartKind;

    use super::*;

    /// Collects captioned answers the way the CLI prints them.
    #[derive(Default)]
    struct AnswerRecorder {
        names: Vec<String>,
        answers: Vec<String>,
    }

    impl OutputHandler for AnswerRecorder {
        fn solution_name(&mut self, name: &str) {
            self.names.push(name.to_owned());
        }

        fn parse_start(&mut self) {}

        fn parse_end(&mut self, _duration_opt: Option<Duration>) {}

        fn part_start(&mut self, _part: PartKind) {}

        fn part_output(
            &mut self,
            _part: PartKind,
            label: Option<&str>,
            output: &dyn Display,
            _duration_opt: Option<Duration>,
        ) {
            self.answers
                .push(format!("{}: {output}", label.unwrap_or("answer")));
        }
    }

    #[test]
    fn unknown_day_is_not_available() {
        let mut recorder = AnswerRecorder::default();
        let Err(error) = run_day(13, "", &mut recorder, false) else {
            panic!("day 13 should not be available");
        };
        assert_eq!(error.to_string(), "no solution available for day 13");
        assert!(recorder.names.is_empty());
    }

    #[test]
    fn day_one_reports_captioned_answers() -> DynamicResult<()> {
        let mut recorder = AnswerRecorder::default();
        run_day(
            1,
            "L68\nL30\nR48\nL5\nR60\nL55\nL1\nL99\nR14\nL82\n",
            &mut recorder,
            false,
        )?;
        assert_eq!(recorder.names, ["Day 1: Secret Entrance"]);
        assert_eq!(
            recorder.answers,
            [
                "Times at zero (end of rotation): 3",
                "Zero clicks (during any rotation): 6",
            ]
        );
        Ok(())
    }

    #[test]
    fn day_twelve_reports_fittable_regions() -> DynamicResult<()> {
        let input = "0:\n###\n##.\n##.\n\n1:\n###\n##.\n.##\n\n\
            2:\n.##\n###\n##.\n\n3:\n##.\n###\n##.\n\n\
            4:\n###\n#..\n###\n\n5:\n###\n.#.\n###\n\n\
            4x4: 0 0 0 0 2 0\n12x5: 1 0 1 0 2 2\n12x5: 1 0 1 0 3 2\n";
        let mut recorder = AnswerRecorder::default();
        run_day(12, input, &mut recorder, true)?;
        assert_eq!(
            recorder.answers,
            ["Regions that can fit all presents: 2"]
        );
        Ok(())
    }

    #[test]
    fn parse_errors_propagate() {
        let mut recorder = AnswerRecorder::default();
        assert!(run_day(1, "L68\nU12\n", &mut recorder, false).is_err());
        assert!(recorder.answers.is_empty());
    }
}
