use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use log::trace;
use num_integer::Integer;
use num_rational::Ratio;
use num_traits::{One, Zero};
use regex::Regex;

#[solution_runner(
    name = "Day 10: Factory",
    parsed = Machines,
    part_one = Day10,
    part_two = Day10,
    part_one_label = "Fewest button presses across all machines",
    part_two_label = "Fewest button presses for counters"
)]
impl super::AdventOfCode2025<10> {}

/*
Input is a list of machines, one per line. Each line holds:
- An indicator light diagram in square brackets, lights off (`.`) or on (`#`) as the target state.
- Button wiring schematics in parentheses, each a comma-separated list of light indexes the button
  affects.
- Joltage requirements in curly braces, a comma-separated list of counter targets.

For example: `[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}`
*/

/// The most indicator lights a machine can have, so lights fit a bitmask.
const MAX_LIGHTS: usize = u64::BITS as usize;
/// The most free variables to try every combination of before falling back to greedy descent.
const MAX_ENUMERATED_FREE: usize = 20;

#[derive(Debug)]
struct Machine {
    /// The count of indicator lights.
    lights: usize,
    /// The target light state, bit `i` set for light `i` on.
    target: u64,
    /// The light or counter indexes each button affects.
    buttons: Vec<Vec<usize>>,
    /// The joltage counter targets.
    counters: Vec<i64>,
}

#[derive(Debug)]
struct Machines(Vec<Machine>);

#[derive(thiserror::Error, Debug)]
enum ParseMachineError {
    #[error("expected a light diagram, buttons, and counters: {0:?}")]
    InvalidFormat(String),
    #[error("machine has {0} lights, more than the supported {max}", max = MAX_LIGHTS)]
    TooManyLights(usize),
}

struct MachineParser {
    /// Regex for capturing the light diagram, the button section, and the optional counters.
    machine_re: Regex,
    /// Regex for capturing the contents of each button.
    button_re: Regex,
}

impl MachineParser {
    const MACHINE_PATTERN: &str = r"^\[([.#]*)\]([^{]*)(?:\{([^}]*)\})?$";
    const BUTTON_PATTERN: &str = r"\(([^)]*)\)";

    fn new() -> Self {
        let machine_re = Regex::new(Self::MACHINE_PATTERN).expect("pattern should be valid");
        let button_re = Regex::new(Self::BUTTON_PATTERN).expect("pattern should be valid");
        Self {
            machine_re,
            button_re,
        }
    }

    fn parse(&self, line: &str) -> DynamicResult<Machine> {
        let captures = self
            .machine_re
            .captures(line)
            .ok_or_else(|| ParseMachineError::InvalidFormat(line.to_owned()))?;

        let diagram = captures
            .get(1)
            .expect("diagram should be in capture group 1")
            .as_str();
        if diagram.len() > MAX_LIGHTS {
            return Err(ParseMachineError::TooManyLights(diagram.len()).into());
        }
        let target = diagram
            .bytes()
            .enumerate()
            .filter(|&(_, cell)| cell == b'#')
            .fold(0u64, |mask, (index, _)| mask | (1 << index));

        let button_section = captures
            .get(2)
            .expect("buttons should be in capture group 2")
            .as_str();
        let buttons = self
            .button_re
            .captures_iter(button_section)
            .map(|button| {
                let indexes = button.get(1).expect("indexes should be in capture group 1");
                parse_number_list::<usize>(indexes.as_str())
            })
            .collect::<Result<_, _>>()?;

        let counters = match captures.get(3) {
            Some(counters) => parse_number_list(counters.as_str())?,
            None => Vec::new(),
        };

        Ok(Machine {
            lights: diagram.len(),
            target,
            buttons,
            counters,
        })
    }
}

/// Parse a comma-separated list of numbers, ignoring empty entries.
fn parse_number_list<T>(list: &str) -> DynamicResult<Vec<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| -> DynamicResult<T> { Ok(parse_with_context(entry)?) })
        .collect()
}

impl ParseData for Machines {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let parser = MachineParser::new();
        let machines = parse_input_lines(input, |_, line| {
            let line = line.trim();
            if line.is_empty() {
                return Ok(None);
            }
            parser.parse(line).map(Some)
        })
        .filter_map(Result::transpose)
        .collect::<Result<_, _>>()?;
        Ok(Self(machines))
    }
}

#[derive(thiserror::Error, Debug)]
enum MachineError {
    #[error("machine has {0} buttons, more than the supported {max}", max = u64::BITS)]
    TooManyButtons(usize),
    #[error("no button presses reach the indicator light diagram")]
    LightsUnreachable,
    #[error("no button presses reach the joltage requirements")]
    CountersUnreachable,
}

/// The count of presses in a set of buttons to press, as a bitmask.
fn press_count(presses: u64) -> usize {
    presses.count_ones() as usize
}

impl Machine {
    /// The fewest button presses to reach the target light state.
    ///
    /// Pressing a button twice undoes it, so each button is pressed at most once. Lights form a
    /// linear system over GF(2): one equation per light, one variable per button. Solutions are a
    /// particular solution combined with any subset of the null space basis.
    fn min_light_presses(&self) -> Result<usize, MachineError> {
        let button_count = self.buttons.len();
        if button_count > u64::BITS as usize {
            return Err(MachineError::TooManyButtons(button_count));
        }

        // per light, bit `b` set if button `b` toggles it
        let mut rows = vec![0u64; self.lights];
        for (button, indexes) in self.buttons.iter().enumerate() {
            for &light in indexes.iter().filter(|&&light| light < self.lights) {
                rows[light] |= 1 << button;
            }
        }
        let mut targets: Vec<bool> = (0..self.lights)
            .map(|light| self.target & (1 << light) != 0)
            .collect();

        // reduce to row echelon form, recording each rank row's pivot column
        let mut pivot_cols = Vec::new();
        for col in 0..button_count {
            let rank = pivot_cols.len();
            if rank == self.lights {
                break;
            }
            let Some(pivot) = (rank..self.lights).find(|&row| rows[row] & (1 << col) != 0) else {
                continue;
            };
            rows.swap(rank, pivot);
            targets.swap(rank, pivot);
            for row in 0..self.lights {
                if row != rank && rows[row] & (1 << col) != 0 {
                    rows[row] ^= rows[rank];
                    targets[row] ^= targets[rank];
                }
            }
            pivot_cols.push(col);
        }
        let rank = pivot_cols.len();

        if (rank..self.lights).any(|row| rows[row] == 0 && targets[row]) {
            return Err(MachineError::LightsUnreachable);
        }

        // solve the pivot variables for a given assignment of free variables
        let back_substitute = |mut presses: u64, rhs: &dyn Fn(usize) -> bool| {
            for (row, &pivot_col) in pivot_cols.iter().enumerate() {
                let others = rows[row] & !(1 << pivot_col);
                let parity = (others & presses).count_ones() % 2 == 1;
                if rhs(row) ^ parity {
                    presses |= 1 << pivot_col;
                }
            }
            presses
        };

        let particular = back_substitute(0, &|row| targets[row]);
        let basis: Vec<u64> = (0..button_count)
            .filter(|col| !pivot_cols.contains(col))
            .map(|free_col| back_substitute(1 << free_col, &|_| false))
            .collect();
        trace!(
            "light system with rank {rank} and {} free variables",
            basis.len()
        );

        let fewest = if basis.len() <= MAX_ENUMERATED_FREE {
            (0u64..(1 << basis.len()))
                .map(|subset| {
                    basis
                        .iter()
                        .enumerate()
                        .filter(|&(index, _)| subset & (1 << index) != 0)
                        .fold(particular, |presses, (_, &vector)| presses ^ vector)
                })
                .map(press_count)
                .min()
                .expect("there should be at least the empty subset")
        } else {
            let mut current = particular;
            let mut improved = true;
            while improved {
                improved = false;
                for &vector in &basis {
                    let candidate = current ^ vector;
                    if press_count(candidate) < press_count(current) {
                        current = candidate;
                        improved = true;
                    }
                }
            }
            press_count(current)
        };

        Ok(fewest)
    }

    /// The fewest button presses to bring every joltage counter to its target, with each press
    /// adding one to the counters the button affects.
    ///
    /// Solves the linear system over rationals to get a particular solution and a null space
    /// basis, scales both to integers, then searches integer combinations of the basis for the
    /// non-negative solution with the fewest total presses.
    fn min_counter_presses(&self) -> Result<i64, MachineError> {
        if self.counters.is_empty() {
            return Ok(0);
        }

        let system = CounterSystem::eliminate(&self.buttons, &self.counters)?;
        let search = system.into_integer_search();
        trace!(
            "counter system with {} free variables and scale {}",
            search.basis.len(),
            search.scale
        );

        let max_need = self
            .counters
            .iter()
            .copied()
            .checked_sum()
            .expect("counter sum should not overflow");
        search
            .min_presses(max_need)
            .ok_or(MachineError::CountersUnreachable)
    }
}

type Fraction = Ratio<i64>;

/// A counter system in reduced row echelon form.
struct CounterSystem {
    /// Rows of coefficients per button, augmented with the counter target as the last column.
    rows: Vec<Vec<Fraction>>,
    pivot_cols: Vec<usize>,
    button_count: usize,
}

impl CounterSystem {
    fn eliminate(buttons: &[Vec<usize>], counters: &[i64]) -> Result<Self, MachineError> {
        let counter_count = counters.len();
        let button_count = buttons.len();

        let mut rows: Vec<Vec<Fraction>> = counters
            .iter()
            .map(|&target| {
                let mut row = vec![Fraction::zero(); button_count + 1];
                row[button_count] = Fraction::from_integer(target);
                row
            })
            .collect();
        for (button, indexes) in buttons.iter().enumerate() {
            for &counter in indexes.iter().filter(|&&counter| counter < counter_count) {
                rows[counter][button] = Fraction::one();
            }
        }

        let mut pivot_cols = Vec::new();
        for col in 0..button_count {
            let rank = pivot_cols.len();
            if rank == counter_count {
                break;
            }
            let Some(pivot) = (rank..counter_count).find(|&row| !rows[row][col].is_zero()) else {
                continue;
            };
            rows.swap(rank, pivot);

            let inverse = rows[rank][col].recip();
            for value in &mut rows[rank][col..] {
                *value *= inverse;
            }
            let pivot_row = rows[rank].clone();
            for (row_index, row) in rows.iter_mut().enumerate() {
                let factor = row[col];
                if row_index == rank || factor.is_zero() {
                    continue;
                }
                for (value, &pivot_value) in row[col..].iter_mut().zip(&pivot_row[col..]) {
                    *value -= factor * pivot_value;
                }
            }
            pivot_cols.push(col);
        }

        // rows past the rank have no coefficients left, so a nonzero target is a contradiction
        if rows[pivot_cols.len()..]
            .iter()
            .any(|row| !row[button_count].is_zero())
        {
            return Err(MachineError::CountersUnreachable);
        }

        Ok(Self {
            rows,
            pivot_cols,
            button_count,
        })
    }

    /// Scale the particular solution (free variables at zero) and the null space basis by the
    /// least common multiple of their denominators.
    fn into_integer_search(self) -> IntegerSearch {
        let Self {
            rows,
            pivot_cols,
            button_count,
        } = self;

        let mut particular = vec![Fraction::zero(); button_count];
        for (row, &pivot_col) in pivot_cols.iter().enumerate() {
            particular[pivot_col] = rows[row][button_count];
        }

        let basis: Vec<Vec<Fraction>> = (0..button_count)
            .filter(|col| !pivot_cols.contains(col))
            .map(|free_col| {
                let mut vector = vec![Fraction::zero(); button_count];
                vector[free_col] = Fraction::one();
                for (row, &pivot_col) in pivot_cols.iter().enumerate() {
                    vector[pivot_col] = -rows[row][free_col];
                }
                vector
            })
            .collect();

        let scale = particular
            .iter()
            .chain(basis.iter().flatten())
            .fold(1i64, |scale, value| scale.lcm(value.denom()));
        let to_integers = |values: &[Fraction]| -> Vec<i64> {
            values
                .iter()
                .map(|&value| (value * scale).to_integer())
                .collect()
        };

        IntegerSearch {
            particular: to_integers(&particular),
            basis: basis.iter().map(|vector| to_integers(vector)).collect(),
            scale,
        }
    }
}

/// Floor of `numerator / denominator`, for a nonzero denominator.
fn floor_div(numerator: i64, denominator: i64) -> i64 {
    Integer::div_floor(&numerator, &denominator)
}

/// Ceiling of `numerator / denominator`, for a nonzero denominator.
fn ceil_div(numerator: i64, denominator: i64) -> i64 {
    -Integer::div_floor(&-numerator, &denominator)
}

/// A search over integer combinations of a null space basis, with all values scaled by `scale`.
///
/// Button presses are `(particular + sum(coefficient * basis)) / scale`, valid when every value is
/// non-negative and divisible by the scale.
struct IntegerSearch {
    particular: Vec<i64>,
    basis: Vec<Vec<i64>>,
    scale: i64,
}

impl IntegerSearch {
    /// The fewest total presses, searching each basis coefficient in `-max_need..=max_need`.
    fn min_presses(&self, max_need: i64) -> Option<i64> {
        let ranges = vec![(-max_need, max_need); self.basis.len()];
        let mut coefficients = vec![0; self.basis.len()];
        let mut best = None;
        self.search(0, &ranges, &mut coefficients, &mut best);
        best
    }

    /// The scaled presses of a button from the first `fixed` coefficients.
    fn partial_presses(&self, button: usize, coefficients: &[i64], fixed: usize) -> i64 {
        self.particular[button]
            + coefficients[..fixed]
                .iter()
                .zip(&self.basis)
                .map(|(&coefficient, vector)| coefficient * vector[button])
                .sum::<i64>()
    }

    fn search(
        &self,
        index: usize,
        ranges: &[(i64, i64)],
        coefficients: &mut [i64],
        best: &mut Option<i64>,
    ) {
        let button_count = self.particular.len();

        if index == self.basis.len() {
            let mut total = 0;
            for button in 0..button_count {
                let scaled = self.partial_presses(button, coefficients, index);
                if scaled < 0 || scaled % self.scale != 0 {
                    return;
                }
                total += scaled / self.scale;
            }
            if best.is_none_or(|best_total| total < best_total) {
                *best = Some(total);
            }
            return;
        }

        // tighten this coefficient's range so every button can still end up non-negative, given
        // the most the later coefficients could add
        let (mut low, mut high) = ranges[index];
        for button in 0..button_count {
            let coefficient = self.basis[index][button];
            if coefficient == 0 {
                continue;
            }
            let partial = self.partial_presses(button, coefficients, index);
            let rest_max: i64 = ((index + 1)..self.basis.len())
                .map(|later| {
                    let later_coefficient = self.basis[later][button];
                    let (later_low, later_high) = ranges[later];
                    if later_coefficient >= 0 {
                        later_coefficient * later_high
                    } else {
                        later_coefficient * later_low
                    }
                })
                .sum();

            let bound = -partial - rest_max;
            if coefficient > 0 {
                low = low.max(ceil_div(bound, coefficient));
            } else {
                high = high.min(floor_div(bound, coefficient));
            }
            if low > high {
                return;
            }
        }

        for value in low..=high {
            coefficients[index] = value;
            self.search(index + 1, ranges, coefficients, best);
        }
    }
}

struct Day10;

/*
For part 1, each button toggles the lights it's wired to. All lights start off. Find the fewest total
button presses to make every machine's lights match its diagram.
*/

impl Solution<PartOne> for Day10 {
    type Input = Machines;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let presses = input
            .0
            .iter()
            .map(Machine::min_light_presses)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(presses
            .into_iter()
            .checked_sum()
            .expect("total presses should not overflow"))
    }
}

/*
For part 2, ignore the lights. Each button instead increases the joltage counters it's wired to by
one, and all counters start at zero. Find the fewest total button presses to make every machine's
counters match its joltage requirements.
*/

impl Solution<PartTwo> for Day10 {
    type Input = Machines;
    type Output = i64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let presses = input
            .0
            .iter()
            .map(Machine::min_counter_presses)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(presses
            .into_iter()
            .checked_sum()
            .expect("total presses should not overflow"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}
[...#.] (0,2,3,4) (2,3) (0,4) (0,1,2) (1,2,3,4) {7,5,12,7,2}
[.###.#] (0,1,2,3,4) (0,3,4) (0,1,2,4,5) (1,2) {10,11,11,5,10,5}
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Machines::parse(EXAMPLE_INPUT)?;
        let result = <Day10 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 7);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Machines::parse(EXAMPLE_INPUT)?;
        let result = <Day10 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 33);
        Ok(())
    }

    #[test]
    fn solves_each_example_machine() -> DynamicResult<()> {
        let parsed = Machines::parse(EXAMPLE_INPUT)?;
        let lights = parsed
            .0
            .iter()
            .map(Machine::min_light_presses)
            .collect::<Result<Vec<_>, _>>()?;
        assert_eq!(lights, [2, 3, 2]);
        let counters = parsed
            .0
            .iter()
            .map(Machine::min_counter_presses)
            .collect::<Result<Vec<_>, _>>()?;
        assert_eq!(counters, [10, 12, 11]);
        Ok(())
    }

    #[test]
    fn parses_machine_parts() -> DynamicResult<()> {
        let parsed = Machines::parse("[#.#] (0,2) () (1) {4,0}\n")?;
        let machine = &parsed.0[0];
        assert_eq!(machine.lights, 3);
        assert_eq!(machine.target, 0b101);
        assert_eq!(machine.buttons, [vec![0, 2], vec![], vec![1]]);
        assert_eq!(machine.counters, [4, 0]);
        Ok(())
    }

    #[test]
    fn machine_without_buttons() -> DynamicResult<()> {
        let parsed = Machines::parse("[...] {}\n[.#.]\n")?;
        assert_eq!(parsed.0[0].min_light_presses()?, 0);
        assert_eq!(parsed.0[0].min_counter_presses()?, 0);
        assert!(parsed.0[1].min_light_presses().is_err());
        Ok(())
    }

    #[test]
    fn unreachable_counters_are_an_error() -> DynamicResult<()> {
        // both counters always rise together, so they can't differ
        let parsed = Machines::parse("[..] (0,1) {2,3}\n")?;
        assert!(parsed.0[0].min_counter_presses().is_err());
        Ok(())
    }

    #[test]
    fn rounding_divisions() {
        assert_eq!(floor_div(7, 2), 3);
        assert_eq!(floor_div(-7, 2), -4);
        assert_eq!(floor_div(7, -2), -4);
        assert_eq!(ceil_div(7, 2), 4);
        assert_eq!(ceil_div(-7, 2), -3);
        assert_eq!(ceil_div(-7, -2), 4);
    }

    #[test]
    fn rejects_malformed_machine() {
        assert!(Machines::parse("(0,1) {3}\n").is_err());
        assert!(Machines::parse("[.#] (0,x)\n").is_err());
    }
}
