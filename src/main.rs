#![warn(clippy::pedantic)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::branches_sharing_code,
    clippy::collection_is_never_read,
    clippy::equatable_if_let,
    clippy::needless_collect,
    clippy::needless_pass_by_ref_mut,
    clippy::option_if_let_else,
    clippy::set_contains_or_insert,
    clippy::suboptimal_flops,
    clippy::suspicious_operation_groupings,
    clippy::trait_duplication_in_bounds,
    clippy::type_repetition_in_bounds,
    clippy::use_self,
    clippy::useless_let_if_seq
)]
#![deny(clippy::unwrap_used)]

use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Error, Result};
use aoc_framework::PartKind;
use aoc_framework::runner::OutputHandler;
use clap::{ArgAction, Parser};
use log::debug;

mod checked_product;
mod inclusive_ranges;
mod solutions;

/// Advent of Code 2025 puzzle solver.
///
/// Set `RUST_LOG=debug` for diagnostics from solutions.
#[derive(Parser, Debug)]
struct Cli {
    /// The day's solution to run (e.g. 1, 2, etc).
    day: u8,

    /// Sets an alternative input file to use over default input.
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Measure and print the durations of parsing and solving parts.
    #[arg(short, long, action = ArgAction::SetTrue)]
    timed: bool,

    /// Minimum duration (in milliseconds) required to print timing.
    /// 0 = always print.
    #[arg(long, value_name = "NUMBER", default_value_t)]
    min_timing_ms: u64,
}

/// The default input file path for a day, relative to the working directory.
fn default_input_path(day: u8) -> PathBuf {
    PathBuf::from("inputs").join(format!("day{day:02}.txt"))
}

/// Read the default input file for a day to a string.
fn get_default_input(day: u8) -> Result<String> {
    let path = default_input_path(day);

    fs::read_to_string(&path).with_context(|| {
        format!(
            "default input file missing: {}\n\n\
            please create the file or provide the input file argument",
            path.display()
        )
    })
}

/// Read the given input file to a string.
fn get_input(input_file: &Path) -> Result<String> {
    fs::read_to_string(input_file)
        .with_context(|| format!("could not read input file at: {}", input_file.display()))
}

struct CliOutputHandler {
    /// A minimum duration to filter any outputs of duration by.
    min_duration: Duration,
}

impl CliOutputHandler {
    fn new(min_duration: Duration) -> Self {
        Self { min_duration }
    }

    fn format_duration(duration: Duration) -> String {
        const ONE_SECOND: Duration = Duration::from_secs(1);
        const ONE_MILLISECOND: Duration = Duration::from_millis(1);
        const ONE_MICROSECOND: Duration = Duration::from_micros(1);
        const DECIMAL_PLACES: usize = 3;

        if duration >= ONE_SECOND {
            format!("{:.*} seconds", DECIMAL_PLACES, duration.as_secs_f32())
        } else {
            let nanos = duration.subsec_nanos();
            if duration >= ONE_MILLISECOND {
                format!("{:.*} milliseconds", DECIMAL_PLACES, f64::from(nanos) / 1e6)
            } else if duration >= ONE_MICROSECOND {
                format!("{:.*} microseconds", DECIMAL_PLACES, f64::from(nanos) / 1e3)
            } else {
                format!("{nanos} nanoseconds")
            }
        }
    }

    /// Convert an optional duration into a formatted duration, filtering out if the duration is
    /// shorter than the minimum duration.
    fn format_optional_duration_above_min(&self, duration: Option<Duration>) -> Option<String> {
        duration
            .filter(|d| *d >= self.min_duration)
            .map(Self::format_duration)
    }

    /// Format an answer with its caption, if there is one.
    fn format_answer(label: Option<&str>, output: &dyn Display) -> String {
        label.map_or_else(|| output.to_string(), |label| format!("{label}: {output}"))
    }
}

impl OutputHandler for CliOutputHandler {
    fn solution_name(&mut self, name: &str) {
        println!("= {name} =");
    }

    fn parse_start(&mut self) {
        debug!("parsing input");
    }

    fn parse_end(&mut self, duration_opt: Option<Duration>) {
        if let Some(formatted_duration) = self.format_optional_duration_above_min(duration_opt) {
            println!("Input parsed in {formatted_duration}");
        }
    }

    fn part_start(&mut self, part: PartKind) {
        println!("-- {part} --");
    }

    fn part_output(
        &mut self,
        _part: PartKind,
        label: Option<&str>,
        output: &dyn Display,
        duration_opt: Option<Duration>,
    ) {
        let answer = Self::format_answer(label, output);
        if let Some(formatted_duration) = self.format_optional_duration_above_min(duration_opt) {
            println!("{answer} ({formatted_duration})");
        } else {
            println!("{answer}");
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Cli::parse();
    let input_str = args.input.map_or_else(
        || get_default_input(args.day),
        |input_file| get_input(&input_file),
    )?;
    debug!("read {} bytes of input for day {}", input_str.len(), args.day);

    let mut handler = CliOutputHandler::new(Duration::from_millis(args.min_timing_ms));
    solutions::run_day(args.day, &input_str, &mut handler, args.timed).map_err(|dyn_error| {
        let anyhow_error = Error::from_boxed(dyn_error);
        anyhow_error.context("failed to run solution")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_input_is_zero_padded() {
        assert_eq!(
            default_input_path(7),
            PathBuf::from("inputs").join("day07.txt")
        );
    }

    #[test]
    fn answers_are_captioned_when_labelled() {
        assert_eq!(
            CliOutputHandler::format_answer(Some("Regions that can fit all presents"), &2),
            "Regions that can fit all presents: 2"
        );
        assert_eq!(CliOutputHandler::format_answer(None, &505), "505");
    }

    #[test]
    fn durations_below_minimum_are_hidden() {
        let handler = CliOutputHandler::new(Duration::from_millis(5));
        assert_eq!(
            handler.format_optional_duration_above_min(Some(Duration::from_millis(1))),
            None
        );
        assert_eq!(
            handler.format_optional_duration_above_min(Some(Duration::from_micros(7_250))),
            Some("7.250 milliseconds".to_owned())
        );
        assert_eq!(handler.format_optional_duration_above_min(None), None);
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::parse_from(["aoc-2025", "12", "--input", "sample.txt", "-t"]);
        assert_eq!(cli.day, 12);
        assert_eq!(cli.input, Some(PathBuf::from("sample.txt")));
        assert!(cli.timed);
        assert_eq!(cli.min_timing_ms, 0);
    }
}
