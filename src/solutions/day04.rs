use aoc_framework::parsing::parse_input_lines;
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use nalgebra::DMatrix;

#[solution_runner(
    name = "Day 4: Printing Department",
    parsed = PaperGrid,
    part_one = Day04,
    part_two = Day04,
    part_one_label = "Accessible rolls",
    part_two_label = "Total removable rolls"
)]
impl super::AdventOfCode2025<4> {}

/*
Input is a character grid of rolls of paper (`@`) and empty floor (`.`).

A forklift can access a roll if fewer than four rolls are in the eight positions adjacent to it.
*/

/// The most adjacent rolls a roll can have and still be accessible.
const MAX_ACCESSIBLE_NEIGHBORS: usize = 3;

/// An error converting [`char`] to a grid cell.
#[derive(thiserror::Error, Debug)]
enum GridCellFromCharError {
    #[error("invalid character: {0:?}")]
    InvalidChar(char),
}

#[derive(thiserror::Error, Debug)]
enum ParsePaperGridError {
    #[error("expected grid width to be {expected} across rows, but found row width {found}")]
    UnequalGridWidth { expected: usize, found: usize },
}

/// The grid of cells, `true` where a roll of paper is.
#[derive(Debug, Clone)]
struct PaperGrid(DMatrix<bool>);

impl ParseData for PaperGrid {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut expected_width = None;
        let grid_rows = parse_input_lines(input, |_, line| -> DynamicResult<_> {
            let line = line.trim_end();
            if line.is_empty() {
                return Ok(None);
            }

            let row: Vec<_> = line
                .chars()
                .map(|c| match c {
                    '@' => Ok(true),
                    '.' => Ok(false),
                    _ => Err(GridCellFromCharError::InvalidChar(c)),
                })
                .collect::<Result<_, _>>()?;

            match expected_width {
                Some(width) if row.len() != width => {
                    return Err(ParsePaperGridError::UnequalGridWidth {
                        expected: width,
                        found: row.len(),
                    }
                    .into());
                }
                Some(_) => {}
                None => expected_width = Some(row.len()),
            }

            Ok(Some(row))
        })
        .filter_map(Result::transpose)
        .collect::<Result<Vec<_>, _>>()?;

        let rows = grid_rows.len();
        let cols = expected_width.unwrap_or(0);
        Ok(Self(DMatrix::from_row_iterator(
            rows,
            cols,
            grid_rows.into_iter().flatten(),
        )))
    }
}

impl PaperGrid {
    /// Count the rolls in the eight positions around a cell.
    fn adjacent_rolls(&self, row: usize, col: usize) -> usize {
        let (rows, cols) = self.0.shape();
        let row_range = row.saturating_sub(1)..=(row + 1).min(rows - 1);
        row_range
            .flat_map(|r| {
                let col_range = col.saturating_sub(1)..=(col + 1).min(cols - 1);
                col_range.map(move |c| (r, c))
            })
            .filter(|&(r, c)| (r, c) != (row, col) && self.0[(r, c)])
            .count()
    }

    /// Positions of rolls a forklift can access.
    fn accessible_rolls(&self) -> Vec<(usize, usize)> {
        let (rows, cols) = self.0.shape();
        (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .filter(|&(row, col)| {
                self.0[(row, col)] && self.adjacent_rolls(row, col) <= MAX_ACCESSIBLE_NEIGHBORS
            })
            .collect()
    }
}

struct Day04;

/*
For part 1, count how many rolls of paper can be accessed by a forklift.
*/

impl Solution<PartOne> for Day04 {
    type Input = PaperGrid;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.accessible_rolls().len())
    }
}

/*
For part 2, once a roll is accessed it can be removed, which may make more rolls accessible. Keep
removing accessible rolls until none remain accessible, and count the total rolls removed.
*/

impl Solution<PartTwo> for Day04 {
    type Input = PaperGrid;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut grid = input.clone();
        let mut removed = 0;
        loop {
            let accessible = grid.accessible_rolls();
            if accessible.is_empty() {
                break;
            }
            removed += accessible.len();
            for position in accessible {
                grid.0[position] = false;
            }
        }
        Ok(removed)
    }
}
