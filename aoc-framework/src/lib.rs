//! Framework of traits and utilities for Advent of Code solutions.
//!
//! A day's solution is split into a parse step and one or two solve steps:
//!
//! 1. Implement [`ParseData`] for the structure the puzzle input describes:
//!
//! ```
//! # use aoc_framework::{DynamicResult, ParseData};
//! #
//! struct Rotations(Vec<i32>);
//!
//! impl ParseData for Rotations {
//!     fn parse(input: &str) -> DynamicResult<Self> {
//!         let values = input
//!             .lines()
//!             .map(|line| line.parse())
//!             .collect::<Result<_, _>>()?;
//!         Ok(Self(values))
//!     }
//! }
//! ```
//!
//! 2. Implement [`Solution`] for each part, with the parsed structure as the input:
//!
//! ```
//! # use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
//! #
//! # struct Rotations(Vec<i32>);
//! # impl ParseData for Rotations {
//! #     fn parse(input: &str) -> DynamicResult<Self> {
//! #         Ok(Self(input.lines().map(|l| l.parse()).collect::<Result<_, _>>()?))
//! #     }
//! # }
//! #
//! struct Day01;
//!
//! impl Solution<PartOne> for Day01 {
//!     type Input = Rotations;
//!     type Output = i32;
//!
//!     fn solve(input: &Rotations) -> DynamicResult<i32> {
//!         Ok(input.0.iter().sum())
//!     }
//! }
//!
//! impl Solution<PartTwo> for Day01 {
//!     type Input = Rotations;
//!     type Output = usize;
//!
//!     fn solve(input: &Rotations) -> DynamicResult<usize> {
//!         Ok(input.0.iter().filter(|&&value| value == 0).count())
//!     }
//! }
//! ```
//!
//! 3. Run it through the [`runner`] module, usually by generating a
//!    [`SolutionRunner`][runner::SolutionRunner] with
//!    [`#[solution_runner]`][runner::solution_runner].
//!
//! Solutions that do not need a parse step can take the raw input with `Input = str`:
//!
//! ```
//! use aoc_framework::{DynamicResult, PartOne, Solution};
//!
//! struct CountBanks;
//!
//! impl Solution<PartOne> for CountBanks {
//!     type Input = str;
//!     type Output = usize;
//!
//!     fn solve(input: &str) -> DynamicResult<usize> {
//!         Ok(input.lines().filter(|line| !line.trim().is_empty()).count())
//!     }
//! }
//! ```

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
#![deny(
    clippy::expect_used,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::unwrap_used
)]

use std::error::Error;
use std::fmt::Display;

pub mod parsing;
pub mod runner;

mod private {
    /// Sealing trait for [`Part`][super::Part]; only this crate's part markers implement it.
    pub trait Sealed {}
}

/// A dynamically dispatched error, wrapped in a [`Box`].
pub type DynamicError = Box<dyn Error + Send + Sync + 'static>;
/// A result that can return a [`DynamicError`] as an error.
pub type DynamicResult<T> = Result<T, DynamicError>;

/// Identifies which part of a puzzle a solution answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    One,
    Two,
}

impl Display for PartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::One => write!(f, "Part 1"),
            Self::Two => write!(f, "Part 2"),
        }
    }
}

/// A marker trait used to identify a part for a solution.
///
/// Types implementing this trait are used as generic parameters to [`Solution<P>`].
pub trait Part: private::Sealed {
    /// Get the related [`PartKind`] for this part.
    fn kind() -> PartKind;
}

/// Indicates a [`Solution`] implements part one.
pub struct PartOne;
impl private::Sealed for PartOne {}
impl Part for PartOne {
    fn kind() -> PartKind {
        PartKind::One
    }
}

/// Indicates a [`Solution`] implements part two.
pub struct PartTwo;
impl private::Sealed for PartTwo {}
impl Part for PartTwo {
    fn kind() -> PartKind {
        PartKind::Two
    }
}

/// A solution answering one [`Part`] of a puzzle.
pub trait Solution<P: Part> {
    /// The input data type passed to the solution.
    ///
    /// [`Solution::solve`] accepts a reference to this type. For raw string input, set to `str`.
    type Input: ?Sized;

    /// The answer type, reported through its [`Display`] implementation.
    type Output: Display;

    /// Solve with the given input.
    ///
    /// # Errors
    ///
    /// Any problem found while solving, like input the puzzle rules cannot accept, is returned as
    /// a dynamically dispatched error.
    fn solve(input: &Self::Input) -> DynamicResult<Self::Output>;
}

/// A data structure created by parsing puzzle input.
///
/// Solutions receive the parsed data by setting [`Solution::Input`] to the implementing type.
pub trait ParseData {
    /// Parse an input string into an instance of self.
    ///
    /// # Errors
    ///
    /// If parsing fails, the resulting error is returned as a dynamically dispatched error.
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized;
}
