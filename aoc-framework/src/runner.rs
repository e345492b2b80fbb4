//! Functions and traits for running solutions.
//!
//! Annotate a structure or impl block with [`#[solution_runner]`][solution_runner] to generate a
//! [`SolutionRunner`]:
//!
//! ```
//! # use aoc_framework::runner::solution_runner;
//! # use aoc_framework::{DynamicResult, PartOne, Solution};
//! #
//! struct Day03;
//!
//! impl Solution<PartOne> for Day03 {
//!     type Input = str;
//!     /* ... */
//! #    type Output = usize;
//! #    fn solve(_input: &Self::Input) -> DynamicResult<usize> {
//! #        Ok(0)
//! #    }
//! }
//!
//! #[solution_runner(
//!     name = "Day 3: Lobby",
//!     part_one = Day03,
//!     part_one_label = "Total output joltage"
//! )]
//! struct Day03Runner;
//! ```

use std::fmt::Display;
use std::time::Duration;

use crate::{DynamicResult, ParseData, Part, PartKind, PartOne, PartTwo, Solution};

// re-export procedural macro
pub use aoc_framework_macros::solution_runner;

/// Display metadata of a solution.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolutionInfo<'a> {
    /// The name of the solution, output before anything else.
    pub name: &'a str,
    /// A caption for the answer of part one.
    pub part_one_label: Option<&'a str>,
    /// A caption for the answer of part two.
    pub part_two_label: Option<&'a str>,
}

impl<'a> SolutionInfo<'a> {
    /// Create info with only a name; parts are unlabelled.
    #[must_use]
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// Set the caption for part one's answer.
    #[must_use]
    pub fn with_part_one_label(mut self, label: &'a str) -> Self {
        self.part_one_label = Some(label);
        self
    }

    /// Set the caption for part two's answer.
    #[must_use]
    pub fn with_part_two_label(mut self, label: &'a str) -> Self {
        self.part_two_label = Some(label);
        self
    }

    /// The caption for a part's answer, if set.
    #[must_use]
    pub fn label(&self, part: PartKind) -> Option<&'a str> {
        match part {
            PartKind::One => self.part_one_label,
            PartKind::Two => self.part_two_label,
        }
    }
}

/// A trait for an output events handler.
///
/// When a solution runs, its steps emit events through a handler as feedback and logging.
pub trait OutputHandler {
    /// Called to output the name of the solution, at the start of running the solution.
    fn solution_name(&mut self, name: &str);

    /// Called when the solution starts parsing input.
    fn parse_start(&mut self);

    /// Called when parsing input is finished.
    ///
    /// The duration taken to parse is optionally passed.
    fn parse_end(&mut self, duration_opt: Option<Duration>);

    /// Called when a solution part starts, with a [`PartKind`] to identify the part.
    fn part_start(&mut self, part: PartKind);

    /// Called when a part finishes to output the result, with a [`PartKind`] to identify the part
    /// and the part's caption when the solution provides one.
    ///
    /// The duration taken to run the part is optionally passed.
    fn part_output(
        &mut self,
        part: PartKind,
        label: Option<&str>,
        output: &dyn Display,
        duration_opt: Option<Duration>,
    );
}

/// Measure the duration of an expression, evaluating to `(result, elapsed)`.
macro_rules! measure_duration {
    ($expr:expr) => {{
        let start = ::std::time::Instant::now();
        let result = $expr;
        let elapsed = start.elapsed();
        (result, elapsed)
    }};
}

/// Evaluate an expression, measuring its duration only if `$timed` is `true`.
///
/// Evaluates to `(result, Option<Duration>)`.
macro_rules! measure_with_optional_duration {
    ($expr:expr, $timed:expr) => {{
        if $timed {
            let (result, duration) = measure_duration!($expr);
            (result, Some(duration))
        } else {
            ($expr, None)
        }
    }};
}

/// Run a solution part, outputting events through the handler.
///
/// # Errors
///
/// Any dynamically dispatched error from the solution is propagated.
fn run_part<S, P>(
    info: &SolutionInfo<'_>,
    input: &S::Input,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    P: Part,
    S: Solution<P>,
{
    let part = P::kind();
    handler.part_start(part);
    let (result, duration_opt) = measure_with_optional_duration!(S::solve(input), timed);
    let output = result?;
    handler.part_output(part, info.label(part), &output, duration_opt);
    Ok(())
}

/// Run a solution's parse step, outputting events through the handler.
///
/// # Errors
///
/// Any dynamically dispatched error from parsing is propagated.
fn run_parse<D: ParseData>(
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<D> {
    handler.parse_start();
    let (result, duration_opt) = measure_with_optional_duration!(D::parse(input), timed);
    let parsed = result?;
    handler.parse_end(duration_opt);
    Ok(parsed)
}

/// Run a solution that only implements part one and accepts string input.
///
/// # Arguments
///
/// - `info` - The solution's name and part captions to output.
/// - `input` - The input string to solve.
/// - `handler` - The output handler to output events to.
/// - `timed` - A flag to measure the time to solve then output the elapsed time to the handler.
///
/// # Errors
///
/// Any dynamically dispatched error from the solution is propagated.
pub fn solve_half_solution<S1>(
    info: &SolutionInfo<'_>,
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    S1: Solution<PartOne, Input = str>,
{
    handler.solution_name(info.name);
    run_part::<S1, PartOne>(info, input, handler, timed)
}

/// Run a solution that implements both parts and accepts string input.
///
/// # Errors
///
/// Any dynamically dispatched error from the solution parts is propagated.
pub fn solve_full_solution<S1, S2>(
    info: &SolutionInfo<'_>,
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    S1: Solution<PartOne, Input = str>,
    S2: Solution<PartTwo, Input = str>,
{
    handler.solution_name(info.name);
    run_part::<S1, PartOne>(info, input, handler, timed)?;
    run_part::<S2, PartTwo>(info, input, handler, timed)
}

/// Run a solution that implements part one and has a parse data step for input.
///
/// # Errors
///
/// Any dynamically dispatched error from parsing or the solution is propagated.
pub fn solve_parsed_half_solution<D, S1>(
    info: &SolutionInfo<'_>,
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    D: ParseData,
    S1: Solution<PartOne, Input = D>,
{
    handler.solution_name(info.name);
    let parsed = run_parse::<D>(input, handler, timed)?;
    run_part::<S1, PartOne>(info, &parsed, handler, timed)
}

/// Run a solution that implements both parts and has a parse data step for input.
///
/// The input is parsed once and shared by both parts.
///
/// # Errors
///
/// Any dynamically dispatched error from parsing or the solution parts is propagated.
pub fn solve_parsed_full_solution<D, S1, S2>(
    info: &SolutionInfo<'_>,
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    D: ParseData,
    S1: Solution<PartOne, Input = D>,
    S2: Solution<PartTwo, Input = D>,
{
    handler.solution_name(info.name);
    let parsed = run_parse::<D>(input, handler, timed)?;
    run_part::<S1, PartOne>(info, &parsed, handler, timed)?;
    run_part::<S2, PartTwo>(info, &parsed, handler, timed)
}

/// A trait for solutions that can be run.
///
/// The trait can be implemented with the [`solution_runner`] attribute macro.
pub trait SolutionRunner {
    /// Run the solution.
    ///
    /// # Arguments
    ///
    /// - `input` - The input string to solve.
    /// - `handler` - The output handler to output events to.
    /// - `timed` - A flag to measure the time to process steps then output the elapsed times to the
    ///   handler.
    ///
    /// # Errors
    ///
    /// Any dynamically dispatched error from running the solution is propagated.
    fn run(input: &str, handler: &mut dyn OutputHandler, timed: bool) -> DynamicResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records events as strings for assertions.
    #[derive(Default)]
    struct RecordingHandler(Vec<String>);

    impl OutputHandler for RecordingHandler {
        fn solution_name(&mut self, name: &str) {
            self.0.push(format!("name {name}"));
        }

        fn parse_start(&mut self) {
            self.0.push("parse start".to_owned());
        }

        fn parse_end(&mut self, duration_opt: Option<Duration>) {
            self.0.push(format!("parse end timed={}", duration_opt.is_some()));
        }

        fn part_start(&mut self, part: PartKind) {
            self.0.push(format!("start {part}"));
        }

        fn part_output(
            &mut self,
            part: PartKind,
            label: Option<&str>,
            output: &dyn Display,
            duration_opt: Option<Duration>,
        ) {
            self.0.push(format!(
                "output {part} {label:?} {output} timed={}",
                duration_opt.is_some()
            ));
        }
    }

    struct Numbers(Vec<u32>);

    impl ParseData for Numbers {
        fn parse(input: &str) -> DynamicResult<Self> {
            let values = input
                .split_whitespace()
                .map(str::parse)
                .collect::<Result<_, _>>()?;
            Ok(Self(values))
        }
    }

    struct SumAndMax;

    impl Solution<PartOne> for SumAndMax {
        type Input = Numbers;
        type Output = u32;

        fn solve(input: &Numbers) -> DynamicResult<u32> {
            Ok(input.0.iter().sum())
        }
    }

    impl Solution<PartTwo> for SumAndMax {
        type Input = Numbers;
        type Output = u32;

        fn solve(input: &Numbers) -> DynamicResult<u32> {
            Ok(input.0.iter().copied().max().unwrap_or_default())
        }
    }

    #[test]
    fn parsed_full_solution_emits_events_in_order() -> DynamicResult<()> {
        let info = SolutionInfo::new("Sum").with_part_one_label("Total");
        let mut handler = RecordingHandler::default();
        solve_parsed_full_solution::<Numbers, SumAndMax, SumAndMax>(
            &info,
            "3 9 4",
            &mut handler,
            false,
        )?;
        assert_eq!(
            handler.0,
            [
                "name Sum",
                "parse start",
                "parse end timed=false",
                "start Part 1",
                "output Part 1 Some(\"Total\") 16 timed=false",
                "start Part 2",
                "output Part 2 None 9 timed=false",
            ]
        );
        Ok(())
    }

    #[test]
    fn timed_run_passes_durations() -> DynamicResult<()> {
        let info = SolutionInfo::new("Sum");
        let mut handler = RecordingHandler::default();
        solve_parsed_half_solution::<Numbers, SumAndMax>(&info, "1 2", &mut handler, true)?;
        assert_eq!(handler.0[2], "parse end timed=true");
        assert_eq!(handler.0[4], "output Part 1 None 3 timed=true");
        Ok(())
    }

    #[test]
    fn parse_failure_stops_before_parts() {
        let info = SolutionInfo::new("Sum");
        let mut handler = RecordingHandler::default();
        let result = solve_parsed_full_solution::<Numbers, SumAndMax, SumAndMax>(
            &info,
            "1 x",
            &mut handler,
            false,
        );
        assert!(result.is_err());
        assert_eq!(handler.0, ["name Sum", "parse start"]);
    }
}
