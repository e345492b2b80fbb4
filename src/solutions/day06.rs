use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;

use crate::checked_product::CheckedProduct;

#[solution_runner(
    name = "Day 6: Trash Compactor",
    parsed = Worksheet,
    part_one = Day06,
    part_two = Day06,
    part_one_label = "Grand total (part 1)",
    part_two_label = "Grand total (part 2)"
)]
impl super::AdventOfCode2025<6> {}

/*
Input is a math worksheet of problems arranged side by side. Each problem is a block of columns, with
problems separated by columns made entirely of spaces. The bottom row holds each problem's operation,
either addition (`+`) or multiplication (`*`); the rows above hold the numbers to operate on.

Alignment of numbers within a problem is significant, so whitespace in the input is kept as-is
(except for blank lines at the end).
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add,
    Multiply,
}

/// A problem cut out of the worksheet, with its numbers read both ways.
#[derive(Debug)]
struct Problem {
    operation: Operation,
    /// Numbers read left to right within each row, one per row.
    row_operands: Vec<u64>,
    /// Numbers read one per column from right to left, each column's digits top to bottom.
    column_operands: Vec<u64>,
}

#[derive(Debug)]
struct Worksheet(Vec<Problem>);

#[derive(thiserror::Error, Debug)]
enum ParseWorksheetError {
    #[error("unknown operation in columns {start}-{end}: {found:?}")]
    UnknownOperation {
        start: usize,
        end: usize,
        found: String,
    },
    #[error("invalid operand character {found:?} in row {row}, column {col}")]
    InvalidOperand { row: usize, col: usize, found: char },
    #[error("no operands found for problem in columns {start}-{end}")]
    MissingOperands { start: usize, end: usize },
    #[error("operand in problem in columns {start}-{end} is too large")]
    OperandOverflow { start: usize, end: usize },
}

impl ParseData for Worksheet {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut lines: Vec<&str> = input.lines().collect();
        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }
        let Some((operation_line, operand_lines)) = lines.split_last() else {
            return Ok(Self(Vec::new()));
        };

        let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
        let pad = |line: &str| -> Vec<char> {
            let mut cells: Vec<char> = line.chars().collect();
            cells.resize(width, ' ');
            cells
        };
        let operation_cells = pad(operation_line);
        let operand_grid: Vec<Vec<char>> = operand_lines.iter().map(|line| pad(line)).collect();

        let is_separator = |col: usize| {
            operation_cells[col] == ' ' && operand_grid.iter().all(|row| row[col] == ' ')
        };

        // contiguous runs of non-separator columns, as inclusive column bounds
        let mut spans = Vec::new();
        let mut span_start = None;
        for col in 0..width {
            match (is_separator(col), span_start) {
                (false, None) => span_start = Some(col),
                (true, Some(start)) => {
                    spans.push((start, col - 1));
                    span_start = None;
                }
                _ => {}
            }
        }
        if let Some(start) = span_start {
            spans.push((start, width - 1));
        }

        let problems = spans
            .into_iter()
            .map(|(start, end)| -> DynamicResult<_> {
                let operation_text: String = operation_cells[start..=end].iter().collect();
                let operation = match operation_text.trim().chars().next() {
                    Some('+') => Operation::Add,
                    Some('*') => Operation::Multiply,
                    _ => {
                        return Err(ParseWorksheetError::UnknownOperation {
                            start,
                            end,
                            found: operation_text,
                        }
                        .into());
                    }
                };

                let rows: Vec<Vec<char>> = operand_grid
                    .iter()
                    .map(|row| row[start..=end].to_vec())
                    .collect();
                for (row_index, row) in rows.iter().enumerate() {
                    if let Some((offset, &found)) = row
                        .iter()
                        .enumerate()
                        .find(|&(_, &c)| c != ' ' && !c.is_ascii_digit())
                    {
                        return Err(ParseWorksheetError::InvalidOperand {
                            row: row_index,
                            col: start + offset,
                            found,
                        }
                        .into());
                    }
                }
                if rows.iter().flatten().all(|&c| c == ' ') {
                    return Err(ParseWorksheetError::MissingOperands { start, end }.into());
                }

                let overflow = |_| ParseWorksheetError::OperandOverflow { start, end };
                let row_operands = read_rows(&rows).map_err(overflow)?;
                let column_operands = read_columns(&rows).map_err(overflow)?;
                Ok(Problem {
                    operation,
                    row_operands,
                    column_operands,
                })
            })
            .collect::<Result<_, _>>()?;

        Ok(Self(problems))
    }
}

/// A number with more digits than fit in a `u64`.
#[derive(Debug, Clone, Copy)]
struct NumberOverflow;

/// Build a number from digit characters, ignoring spaces. Returns `Ok(None)` if there are no
/// digits.
fn read_number(cells: impl IntoIterator<Item = char>) -> Result<Option<u64>, NumberOverflow> {
    cells
        .into_iter()
        .filter_map(|c| c.to_digit(10))
        .try_fold(None, |number: Option<u64>, digit| {
            number
                .unwrap_or(0)
                .checked_mul(10)
                .and_then(|n| n.checked_add(u64::from(digit)))
                .map(Some)
                .ok_or(NumberOverflow)
        })
}

/// Operands read left to right within each row of a problem's cells.
fn read_rows(rows: &[Vec<char>]) -> Result<Vec<u64>, NumberOverflow> {
    rows.iter()
        .filter_map(|row| read_number(row.iter().copied()).transpose())
        .collect()
}

/// Operands read one per column from right to left, each column's digits top to bottom.
fn read_columns(rows: &[Vec<char>]) -> Result<Vec<u64>, NumberOverflow> {
    let width = rows.first().map_or(0, Vec::len);
    (0..width)
        .rev()
        .filter_map(|col| read_number(rows.iter().map(|row| row[col])).transpose())
        .collect()
}

#[derive(thiserror::Error, Debug)]
enum TotalError {
    #[error("result of problem {0} is too large")]
    ProblemOverflow(usize),
    #[error("grand total is too large")]
    GrandTotalOverflow,
}

impl Problem {
    fn row_operands(&self) -> &[u64] {
        &self.row_operands
    }

    fn column_operands(&self) -> &[u64] {
        &self.column_operands
    }

    fn evaluate(&self, operands: &[u64]) -> Option<u64> {
        let operands = operands.iter().copied();
        match self.operation {
            Operation::Add => operands.checked_sum(),
            Operation::Multiply => operands.checked_product(),
        }
    }
}

impl Worksheet {
    fn grand_total(&self, operands: impl Fn(&Problem) -> &[u64]) -> Result<u64, TotalError> {
        self.0
            .iter()
            .enumerate()
            .map(|(index, problem)| {
                problem
                    .evaluate(operands(problem))
                    .ok_or(TotalError::ProblemOverflow(index))
            })
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .checked_sum()
            .ok_or(TotalError::GrandTotalOverflow)
    }
}

struct Day06;

/*
For part 1, each row of a problem holds one number. Evaluate each problem and sum the results.
*/

impl Solution<PartOne> for Day06 {
    type Input = Worksheet;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.grand_total(Problem::row_operands)?)
    }
}

/*
For part 2, numbers are written in columns instead: each column of a problem is one number, with the
most significant digit at the top. Problems are read right to left, one column at a time.
*/

impl Solution<PartTwo> for Day06 {
    type Input = Worksheet;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.grand_total(Problem::column_operands)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = "123 328  51 64 \n 45 64  387 23 \n  6 98  215 314\n*   +   *   +  \n";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Worksheet::parse(EXAMPLE_INPUT)?;
        let result = <Day06 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 4_277_556);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Worksheet::parse(EXAMPLE_INPUT)?;
        let result = <Day06 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 3_263_827);
        Ok(())
    }

    #[test]
    fn reads_operands_both_ways() -> DynamicResult<()> {
        let parsed = Worksheet::parse(EXAMPLE_INPUT)?;
        assert_eq!(parsed.0.len(), 4);
        let last = &parsed.0[3];
        assert_eq!(last.operation, Operation::Add);
        assert_eq!(last.row_operands, [64, 23, 314]);
        assert_eq!(last.column_operands, [4, 431, 623]);
        Ok(())
    }

    #[test]
    fn trailing_blank_lines_are_dropped() -> DynamicResult<()> {
        let parsed = Worksheet::parse("12\n 3\n+ \n\n   \n")?;
        assert_eq!(<Day06 as Solution<PartOne>>::solve(&parsed)?, 15);
        assert_eq!(<Day06 as Solution<PartTwo>>::solve(&parsed)?, 23 + 1);
        Ok(())
    }

    #[test]
    fn empty_worksheet_totals_zero() -> DynamicResult<()> {
        let parsed = Worksheet::parse("\n\n")?;
        assert_eq!(<Day06 as Solution<PartOne>>::solve(&parsed)?, 0);
        Ok(())
    }

    #[test]
    fn rejects_operands_too_large_for_u64() {
        assert!(Worksheet::parse("123456789012345678901234\n+\n").is_err());
        // each row fits, but a column 24 digits deep doesn't
        let tall_column = "9\n".repeat(24) + "*\n";
        assert!(Worksheet::parse(&tall_column).is_err());
        assert!(Worksheet::parse("18446744073709551615\n+\n").is_ok());
    }

    #[test]
    fn overflowing_results_are_errors() -> DynamicResult<()> {
        let parsed = Worksheet::parse("4294967296\n4294967296\n*\n")?;
        assert!(<Day06 as Solution<PartOne>>::solve(&parsed).is_err());
        let parsed = Worksheet::parse("18446744073709551615 1\n+                    +\n")?;
        assert!(<Day06 as Solution<PartOne>>::solve(&parsed).is_err());
        Ok(())
    }

    #[test]
    fn rejects_unknown_operation() {
        assert!(Worksheet::parse("1 2\n- +\n").is_err());
        assert!(Worksheet::parse("1 x\n+ +\n").is_err());
    }
}
