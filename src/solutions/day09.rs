use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use nalgebra::Point2;

#[solution_runner(
    name = "Day 9: Movie Theater",
    parsed = RedTiles,
    part_one = Day09,
    part_two = Day09,
    part_one_label = "Largest rectangle area",
    part_two_label = "Largest rectangle area with greens"
)]
impl super::AdventOfCode2025<9> {}

/*
Input is the positions of red tiles on a floor grid, one per line as comma-separated X and Y
coordinates.

A rectangle is picked by using two red tiles as opposite corners. Its area counts tiles, so the
corners' rows and columns are included.
*/

type Point = Point2<i64>;

#[derive(Debug)]
struct RedTiles(Vec<Point>);

#[derive(thiserror::Error, Debug)]
enum ParseRedTileError {
    #[error("expected 2 comma-separated coordinates, found {0}")]
    CoordinateCount(usize),
}

impl ParseData for RedTiles {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let tiles = parse_input_lines(input, |_, line| -> DynamicResult<_> {
            let line = line.trim();
            if line.is_empty() {
                return Ok(None);
            }
            let coordinates = line
                .split(',')
                .map(|part| parse_with_context::<i64>(part.trim()))
                .collect::<Result<Vec<_>, _>>()?;
            let &[x, y] = coordinates.as_slice() else {
                return Err(ParseRedTileError::CoordinateCount(coordinates.len()).into());
            };
            Ok(Some(Point::new(x, y)))
        })
        .filter_map(Result::transpose)
        .collect::<Result<_, _>>()?;

        Ok(Self(tiles))
    }
}

/// The tile area of the rectangle with opposite corners `a` and `b`, or `None` if the corners
/// share a row or column.
fn rectangle_area(a: Point, b: Point) -> Option<u64> {
    if a.x == b.x || a.y == b.y {
        return None;
    }
    let width = a.x.abs_diff(b.x) + 1;
    let height = a.y.abs_diff(b.y) + 1;
    Some(width.checked_mul(height).expect("rectangle area should fit u64"))
}

/// Which side of the line through `p` and `q` the point `r` is on, as a signum.
fn orientation(p: Point, q: Point, r: Point) -> i64 {
    ((q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y)).signum()
}

/// Check if `p` lies on the segment from `a` to `b`, endpoints included.
fn on_segment(a: Point, b: Point, p: Point) -> bool {
    a.x.min(b.x) <= p.x
        && p.x <= a.x.max(b.x)
        && a.y.min(b.y) <= p.y
        && p.y <= a.y.max(b.y)
        && (b.x - a.x) * (p.y - a.y) == (b.y - a.y) * (p.x - a.x)
}

/// Check if segments `a`-`b` and `c`-`d` cross at a single point interior to both.
///
/// Touching at an endpoint or overlapping collinearly isn't a proper crossing.
fn segments_properly_cross(a: Point, b: Point, c: Point, d: Point) -> bool {
    let o1 = orientation(a, b, c);
    let o2 = orientation(a, b, d);
    let o3 = orientation(c, d, a);
    let o4 = orientation(c, d, b);
    if (o1 == 0 && on_segment(a, b, c))
        || (o2 == 0 && on_segment(a, b, d))
        || (o3 == 0 && on_segment(c, d, a))
        || (o4 == 0 && on_segment(c, d, b))
    {
        return false;
    }
    o1 * o2 < 0 && o3 * o4 < 0
}

/// The closed polygon traced through the red tiles in order, wrapping back to the first.
struct Polygon<'a> {
    vertices: &'a [Point],
}

impl Polygon<'_> {
    fn edges(&self) -> impl Iterator<Item = (Point, Point)> {
        self.vertices
            .iter()
            .zip(self.vertices.iter().cycle().skip(1))
            .map(|(&a, &b)| (a, b))
    }

    /// Check if a point is inside the polygon, with the boundary counting as inside.
    ///
    /// Counts crossings of a ray cast in the positive X direction, comparing intersections exactly.
    fn contains(&self, point: Point) -> bool {
        let mut crossings = 0usize;
        for (a, b) in self.edges() {
            if on_segment(a, b, point) {
                return true;
            }
            if point.y < a.y.min(b.y) || point.y >= a.y.max(b.y) {
                continue;
            }
            // intersection x - point.x = offset / dy
            let dy = b.y - a.y;
            let offset = (point.y - a.y) * (b.x - a.x) + (a.x - point.x) * dy;
            if offset.signum() * dy.signum() > 0 {
                crossings += 1;
            }
        }
        crossings % 2 == 1
    }

    /// Check if the axis-aligned rectangle with opposite corners `a` and `b` lies inside the
    /// polygon: every corner inside, and no rectangle edge properly crossing a polygon edge.
    fn contains_rectangle(&self, a: Point, b: Point) -> bool {
        let (x1, x2) = (a.x.min(b.x), a.x.max(b.x));
        let (y1, y2) = (a.y.min(b.y), a.y.max(b.y));
        let corners = [
            Point::new(x1, y1),
            Point::new(x1, y2),
            Point::new(x2, y1),
            Point::new(x2, y2),
        ];
        if !corners.iter().all(|&corner| self.contains(corner)) {
            return false;
        }

        let rectangle_edges = [
            (corners[0], corners[1]),
            (corners[0], corners[2]),
            (corners[1], corners[3]),
            (corners[2], corners[3]),
        ];
        !rectangle_edges.iter().any(|&(r1, r2)| {
            self.edges()
                .any(|(p, q)| segments_properly_cross(r1, r2, p, q))
        })
    }
}

impl RedTiles {
    /// The largest rectangle area between pairs of red tiles that passes a check.
    fn largest_area(&self, mut accept: impl FnMut(Point, Point) -> bool) -> u64 {
        let tiles = &self.0;
        let mut largest = 0;
        for (i, &a) in tiles.iter().enumerate() {
            for &b in &tiles[(i + 1)..] {
                let Some(area) = rectangle_area(a, b) else {
                    continue;
                };
                // the check is costly, so skip rectangles that can't beat the best
                if area > largest && accept(a, b) {
                    largest = area;
                }
            }
        }
        largest
    }
}

struct Day09;

/*
For part 1, find the largest area of any rectangle with red tiles at opposite corners.
*/

impl Solution<PartOne> for Day09 {
    type Input = RedTiles;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.largest_area(|_, _| true))
    }
}

/*
For part 2, the red tiles in input order (wrapping around) are the vertices of a loop of green tiles;
the loop's interior is green too. The rectangle must only contain red or green tiles, i.e. lie inside
the loop.
*/

impl Solution<PartTwo> for Day09 {
    type Input = RedTiles;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let polygon = Polygon { vertices: &input.0 };
        Ok(input.largest_area(|a, b| polygon.contains_rectangle(a, b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"7,1
11,1
11,7
9,7
9,5
2,5
2,3
7,3
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = RedTiles::parse(EXAMPLE_INPUT)?;
        let result = <Day09 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 50);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = RedTiles::parse(EXAMPLE_INPUT)?;
        let result = <Day09 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 24);
        Ok(())
    }

    #[test]
    fn polygon_boundary_counts_as_inside() -> DynamicResult<()> {
        let parsed = RedTiles::parse(EXAMPLE_INPUT)?;
        let polygon = Polygon {
            vertices: &parsed.0,
        };
        assert!(polygon.contains(Point::new(7, 1)));
        assert!(polygon.contains(Point::new(9, 1)));
        assert!(polygon.contains(Point::new(8, 4)));
        assert!(!polygon.contains(Point::new(3, 1)));
        assert!(!polygon.contains(Point::new(3, 7)));
        Ok(())
    }

    #[test]
    fn proper_crossing_excludes_touching() {
        let p = |x, y| Point::new(x, y);
        assert!(segments_properly_cross(p(0, 1), p(2, 1), p(1, 0), p(1, 2)));
        assert!(!segments_properly_cross(p(0, 1), p(2, 1), p(2, 0), p(2, 2)));
        assert!(!segments_properly_cross(p(0, 0), p(2, 0), p(1, 0), p(3, 0)));
    }

    #[test]
    fn aligned_tiles_make_no_rectangle() -> DynamicResult<()> {
        let parsed = RedTiles::parse("1,1\n1,5\n4,5\n")?;
        assert_eq!(rectangle_area(Point::new(1, 1), Point::new(1, 5)), None);
        assert_eq!(<Day09 as Solution<PartOne>>::solve(&parsed)?, 4 * 5);
        Ok(())
    }
}
