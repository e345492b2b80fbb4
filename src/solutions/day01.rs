use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};

#[solution_runner(
    name = "Day 1: Secret Entrance",
    parsed = Rotations,
    part_one = Day01,
    part_two = Day01,
    part_one_label = "Times at zero (end of rotation)",
    part_two_label = "Zero clicks (during any rotation)"
)]
impl super::AdventOfCode2025<1> {}

/*
Input is a sequence of rotations for a safe's dial, one per line. A rotation is a direction (`L` for
left towards lower numbers, `R` for right towards higher numbers) followed by a count of clicks.

The dial shows numbers 0 through 99 in a circle and starts pointing at 50.
*/

/// The count of numbers on the dial.
const DIAL_SIZE: u32 = 100;
/// The number the dial points at before any rotation.
const DIAL_START: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
}

/// A rotation of the dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rotation {
    direction: Direction,
    clicks: u32,
}

#[derive(Debug)]
struct Rotations(Vec<Rotation>);

#[derive(thiserror::Error, Debug)]
enum ParseRotationError {
    #[error("expected rotation to start with 'L' or 'R': {0:?}")]
    InvalidDirection(String),
}

impl ParseData for Rotations {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let rotations = parse_input_lines(input, |_, line| -> DynamicResult<_> {
            let line = line.trim();
            if line.is_empty() {
                return Ok(None);
            }

            let direction = match line.chars().next() {
                Some('L') => Direction::Left,
                Some('R') => Direction::Right,
                _ => return Err(ParseRotationError::InvalidDirection(line.to_owned()).into()),
            };
            // direction is a single ASCII character, so slicing after it is safe
            let clicks = parse_with_context(&line[1..])?;

            Ok(Some(Rotation { direction, clicks }))
        })
        .filter_map(Result::transpose)
        .collect::<Result<_, _>>()?;

        Ok(Self(rotations))
    }
}

/// The dial of the safe, tracking which number it points at.
#[derive(Debug, Clone, Copy)]
struct Dial {
    position: u32,
}

impl Dial {
    fn new() -> Self {
        Self {
            position: DIAL_START,
        }
    }

    /// Turn the dial, returning how many clicks during the turn landed on 0.
    fn rotate(&mut self, rotation: Rotation) -> u32 {
        let Rotation { direction, clicks } = rotation;
        if clicks == 0 {
            return 0;
        }

        // clicks needed from the current position to first reach 0; a full turn when already at 0
        let clicks_to_zero = match (direction, self.position) {
            (_, 0) => DIAL_SIZE,
            (Direction::Right, position) => DIAL_SIZE - position,
            (Direction::Left, position) => position,
        };
        let zero_clicks = if clicks >= clicks_to_zero {
            1 + (clicks - clicks_to_zero) / DIAL_SIZE
        } else {
            0
        };

        let offset = clicks % DIAL_SIZE;
        self.position = match direction {
            Direction::Right => (self.position + offset) % DIAL_SIZE,
            Direction::Left => (self.position + DIAL_SIZE - offset) % DIAL_SIZE,
        };

        zero_clicks
    }
}

struct Day01;

/*
For part 1, the password is the number of times the dial is left pointing at 0 after any rotation.
*/

impl Solution<PartOne> for Day01 {
    type Input = Rotations;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut dial = Dial::new();
        let count = input
            .0
            .iter()
            .filter(|&&rotation| {
                dial.rotate(rotation);
                dial.position == 0
            })
            .count();
        Ok(count)
    }
}

/*
For part 2, count every click that causes the dial to point at 0, whether during a rotation or at
its end.
*/

impl Solution<PartTwo> for Day01 {
    type Input = Rotations;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut dial = Dial::new();
        Ok(input
            .0
            .iter()
            .map(|&rotation| u64::from(dial.rotate(rotation)))
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"L68
L30
R48
L5
R60
L55
L1
L99
R14
L82
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Rotations::parse(EXAMPLE_INPUT)?;
        let result = <Day01 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 3);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Rotations::parse(EXAMPLE_INPUT)?;
        let result = <Day01 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 6);
        Ok(())
    }

    #[test]
    fn large_rotation_counts_every_wrap() {
        let mut dial = Dial::new();
        let zero_clicks = dial.rotate(Rotation {
            direction: Direction::Right,
            clicks: 1000,
        });
        assert_eq!(zero_clicks, 10);
        assert_eq!(dial.position, 50);
    }

    #[test]
    fn leaving_zero_does_not_count() {
        let mut dial = Dial { position: 0 };
        let zero_clicks = dial.rotate(Rotation {
            direction: Direction::Left,
            clicks: 5,
        });
        assert_eq!(zero_clicks, 0);
        assert_eq!(dial.position, 95);
    }

    #[test]
    fn rejects_unknown_direction() {
        assert!(Rotations::parse("L10\nU3\n").is_err());
    }
}
