use std::collections::{HashMap, HashSet, VecDeque};

use aoc_framework::parsing::parse_input_lines;
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use nalgebra::DMatrix;

#[solution_runner(
    name = "Day 7: Laboratories",
    parsed = Manifold,
    part_one = Day07,
    part_two = Day07,
    part_one_label = "Beam splits",
    part_two_label = "Timelines"
)]
impl super::AdventOfCode2025<7> {}

/*
Input is a character grid diagram of a tachyon manifold: empty space (`.`), splitters (`^`), and a
single starting position (`S`) where a tachyon beam enters.

Beams always move downward. When a beam reaches a splitter it stops, and new beams continue downward
from the positions immediately left and right of the splitter.
*/

/// A cell in the manifold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ManifoldCell {
    Empty,
    Splitter,
    Start,
}

/// An error converting [`char`] to [`ManifoldCell`].
#[derive(thiserror::Error, Debug)]
enum ManifoldCellFromCharError {
    #[error("invalid character: {0:?}")]
    InvalidChar(char),
}

impl TryFrom<char> for ManifoldCell {
    type Error = ManifoldCellFromCharError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '.' => Ok(Self::Empty),
            '^' => Ok(Self::Splitter),
            'S' => Ok(Self::Start),
            _ => Err(ManifoldCellFromCharError::InvalidChar(value)),
        }
    }
}

#[derive(Debug)]
struct Manifold {
    grid: DMatrix<ManifoldCell>,
    /// The row and column of the starting position.
    start: (usize, usize),
}

#[derive(thiserror::Error, Debug)]
enum ParseManifoldError {
    #[error("expected grid width to be {expected} across rows, but found row width {found}")]
    UnequalGridWidth { expected: usize, found: usize },
    #[error("no starting position ('S') found")]
    MissingStart,
}

impl ParseData for Manifold {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut expected_width = None;
        let grid_rows = parse_input_lines(input.trim_end(), |_, line| -> DynamicResult<_> {
            let row: Vec<_> = line
                .chars()
                .map(ManifoldCell::try_from)
                .collect::<Result<_, _>>()?;

            match expected_width {
                Some(width) if row.len() != width => {
                    return Err(ParseManifoldError::UnequalGridWidth {
                        expected: width,
                        found: row.len(),
                    }
                    .into());
                }
                Some(_) => {}
                None => expected_width = Some(row.len()),
            }

            Ok(row)
        })
        .collect::<Result<Vec<_>, _>>()?;

        let start = grid_rows
            .iter()
            .enumerate()
            .find_map(|(row, cells)| {
                cells
                    .iter()
                    .position(|&cell| cell == ManifoldCell::Start)
                    .map(|col| (row, col))
            })
            .ok_or(ParseManifoldError::MissingStart)?;

        let rows = grid_rows.len();
        let cols = expected_width.unwrap_or(0);
        let grid = DMatrix::from_row_iterator(rows, cols, grid_rows.into_iter().flatten());

        Ok(Self { grid, start })
    }
}

impl Manifold {
    /// The row of the first splitter strictly below `row` in a column, if any.
    fn next_splitter(&self, row: usize, col: usize) -> Option<usize> {
        ((row + 1)..self.grid.nrows()).find(|&r| self.grid[(r, col)] == ManifoldCell::Splitter)
    }

    /// The columns a beam split at `col` continues down, skipping any outside the grid.
    fn split_columns(&self, col: usize) -> impl Iterator<Item = usize> {
        let cols = self.grid.ncols();
        [col.checked_sub(1), Some(col + 1).filter(|&c| c < cols)]
            .into_iter()
            .flatten()
    }

    /// Count the timelines for a particle starting downward at a position, memoized by position.
    fn timelines_from(
        &self,
        position: (usize, usize),
        memo: &mut HashMap<(usize, usize), u64>,
    ) -> u64 {
        if let Some(&count) = memo.get(&position) {
            return count;
        }

        let (row, col) = position;
        let count = match self.next_splitter(row, col) {
            None => 1,
            Some(splitter_row) => {
                // a branch leaving the grid sideways is a timeline of its own
                let left = match col.checked_sub(1) {
                    Some(left_col) => self.timelines_from((splitter_row, left_col), memo),
                    None => 1,
                };
                let right = if col + 1 < self.grid.ncols() {
                    self.timelines_from((splitter_row, col + 1), memo)
                } else {
                    1
                };
                left.checked_add(right)
                    .expect("timeline count should not overflow")
            }
        };

        memo.insert(position, count);
        count
    }
}

struct Day07;

/*
For part 1, count how many distinct splitters the beams are split by.
*/

impl Solution<PartOne> for Day07 {
    type Input = Manifold;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut queue = VecDeque::from([input.start]);
        let mut seen_beams = HashSet::new();
        let mut hit_splitters = HashSet::new();

        while let Some(beam) = queue.pop_front() {
            if !seen_beams.insert(beam) {
                continue;
            }
            let (row, col) = beam;
            if let Some(splitter_row) = input.next_splitter(row, col) {
                hit_splitters.insert((splitter_row, col));
                queue.extend(
                    input
                        .split_columns(col)
                        .map(|split_col| (splitter_row, split_col)),
                );
            }
        }

        Ok(hit_splitters.len())
    }
}

/*
For part 2, a single quantum tachyon particle takes both paths at every splitter, each splitting its
timeline. Count the timelines the particle ends up on after exiting the manifold.
*/

impl Solution<PartTwo> for Day07 {
    type Input = Manifold;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.timelines_from(input.start, &mut HashMap::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r".......S.......
...............
.......^.......
...............
......^.^......
...............
.....^.^.^.....
...............
....^.^...^....
...............
...^.^...^.^...
...............
..^...^.....^..
...............
.^.^.^.^.^...^.
...............
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Manifold::parse(EXAMPLE_INPUT)?;
        let result = <Day07 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 21);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Manifold::parse(EXAMPLE_INPUT)?;
        let result = <Day07 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 40);
        Ok(())
    }

    #[test]
    fn edge_splits_count_escaped_timelines() -> DynamicResult<()> {
        let parsed = Manifold::parse("S.\n^.\n")?;
        assert_eq!(<Day07 as Solution<PartOne>>::solve(&parsed)?, 1);
        assert_eq!(<Day07 as Solution<PartTwo>>::solve(&parsed)?, 2);
        Ok(())
    }

    #[test]
    fn no_splitters_is_one_timeline() -> DynamicResult<()> {
        let parsed = Manifold::parse("..S\n...\n")?;
        assert_eq!(<Day07 as Solution<PartOne>>::solve(&parsed)?, 0);
        assert_eq!(<Day07 as Solution<PartTwo>>::solve(&parsed)?, 1);
        Ok(())
    }

    #[test]
    fn requires_start() {
        assert!(Manifold::parse("...\n.^.\n").is_err());
    }
}
