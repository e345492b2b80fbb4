use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use nalgebra::Point3;
use petgraph::unionfind::UnionFind;

use crate::checked_product::CheckedProduct;

#[solution_runner(
    name = "Day 8: Playground",
    parsed = Junctions,
    part_one = Day08,
    part_two = Day08,
    part_one_label = "Circuit product",
    part_two_label = "Final connection X-product"
)]
impl super::AdventOfCode2025<8> {}

/*
Input is the positions of junction boxes in 3D space, one per line as comma-separated X, Y, and Z
coordinates.

Connecting two junction boxes puts them in the same circuit. Pairs of junction boxes are connected
closest first, by straight-line distance.
*/

/// How many of the closest pairs are connected for part 1.
const PART_ONE_CONNECTIONS: usize = 1000;
/// How many of the largest circuits multiply together for part 1.
const LARGEST_CIRCUITS: usize = 3;

#[derive(Debug)]
struct Junctions(Vec<Point3<i64>>);

#[derive(thiserror::Error, Debug)]
enum ParseJunctionError {
    #[error("expected 3 comma-separated coordinates, found {0}")]
    CoordinateCount(usize),
}

impl ParseData for Junctions {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let junctions = parse_input_lines(input, |_, line| -> DynamicResult<_> {
            let line = line.trim();
            if line.is_empty() {
                return Ok(None);
            }
            let coordinates = line
                .split(',')
                .map(|part| parse_with_context::<i64>(part.trim()))
                .collect::<Result<Vec<_>, _>>()?;
            let &[x, y, z] = coordinates.as_slice() else {
                return Err(ParseJunctionError::CoordinateCount(coordinates.len()).into());
            };
            Ok(Some(Point3::new(x, y, z)))
        })
        .filter_map(Result::transpose)
        .collect::<Result<_, _>>()?;

        Ok(Self(junctions))
    }
}

/// A possible connection between two junction boxes, by index.
#[derive(Debug, Clone, Copy)]
struct Pair {
    squared_distance: i64,
    a: usize,
    b: usize,
}

impl Junctions {
    /// Every pair of junction boxes, closest first. Pairs at equal distance keep index order.
    fn pairs_by_distance(&self) -> Vec<Pair> {
        let points = &self.0;
        let mut pairs: Vec<_> = (0..points.len())
            .flat_map(|a| ((a + 1)..points.len()).map(move |b| (a, b)))
            .map(|(a, b)| {
                let offset = points[a] - points[b];
                Pair {
                    squared_distance: offset.dot(&offset),
                    a,
                    b,
                }
            })
            .collect();
        pairs.sort_by_key(|pair| pair.squared_distance);
        pairs
    }

    /// Connect the closest `connections` pairs, then multiply the sizes of the three largest
    /// circuits. Missing circuits count as size 1.
    fn largest_circuit_product(&self, connections: usize) -> usize {
        let count = self.0.len();
        let mut circuits = UnionFind::<usize>::new(count);
        for pair in self.pairs_by_distance().into_iter().take(connections) {
            circuits.union(pair.a, pair.b);
        }

        let mut sizes = vec![0usize; count];
        for label in circuits.into_labeling() {
            sizes[label] += 1;
        }
        sizes.retain(|&size| size > 0);
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        sizes.resize(sizes.len().max(LARGEST_CIRCUITS), 1);

        sizes
            .into_iter()
            .take(LARGEST_CIRCUITS)
            .checked_product()
            .expect("circuit size product should not overflow")
    }
}

#[derive(thiserror::Error, Debug)]
enum ConnectionError {
    #[error("junction boxes never form a single circuit")]
    NeverConnected,
    #[error("product of X coordinates {0} and {1} overflowed")]
    ProductOverflow(i64, i64),
}

struct Day08;

/*
For part 1, connect the 1000 closest pairs of junction boxes. Multiply together the sizes of the three
largest circuits.
*/

impl Solution<PartOne> for Day08 {
    type Input = Junctions;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.largest_circuit_product(PART_ONE_CONNECTIONS))
    }
}

/*
For part 2, keep connecting closest pairs until every junction box is in one circuit. Multiply the X
coordinates of the last two junction boxes connected.
*/

impl Solution<PartTwo> for Day08 {
    type Input = Junctions;
    type Output = i64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let points = &input.0;
        let mut circuits = UnionFind::<usize>::new(points.len());
        let mut circuit_count = points.len();

        for Pair { a, b, .. } in input.pairs_by_distance() {
            if circuits.union(a, b) {
                circuit_count -= 1;
                if circuit_count == 1 {
                    let (x_a, x_b) = (points[a].x, points[b].x);
                    return Ok(x_a
                        .checked_mul(x_b)
                        .ok_or(ConnectionError::ProductOverflow(x_a, x_b))?);
                }
            }
        }

        Err(ConnectionError::NeverConnected.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"162,817,812
57,618,57
906,360,560
592,479,940
352,342,300
466,668,158
542,29,236
431,825,988
739,650,466
52,470,668
216,146,977
819,987,18
117,168,530
805,96,715
346,949,466
970,615,88
941,993,340
862,61,35
984,92,344
425,690,689
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Junctions::parse(EXAMPLE_INPUT)?;
        assert_eq!(parsed.largest_circuit_product(10), 40);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Junctions::parse(EXAMPLE_INPUT)?;
        let result = <Day08 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 25272);
        Ok(())
    }

    #[test]
    fn few_circuits_pad_with_one() -> DynamicResult<()> {
        let parsed = Junctions::parse("0,0,0\n1,0,0\n")?;
        assert_eq!(parsed.largest_circuit_product(1), 2);
        assert_eq!(parsed.largest_circuit_product(0), 1);
        Ok(())
    }

    #[test]
    fn single_junction_never_connects() -> DynamicResult<()> {
        let parsed = Junctions::parse("3,4,5\n")?;
        assert!(<Day08 as Solution<PartTwo>>::solve(&parsed).is_err());
        Ok(())
    }

    #[test]
    fn rejects_missing_coordinate() {
        assert!(Junctions::parse("1,2\n").is_err());
    }
}
