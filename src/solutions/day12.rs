use std::collections::HashMap;

use aoc_framework::parsing::{InputScanner, InvalidLine, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, Solution};
use log::debug;
use regex::Regex;

#[solution_runner(
    name = "Day 12: Christmas Tree Farm",
    parsed = PresentsInput,
    part_one = Day12,
    part_one_label = "Regions that can fit all presents"
)]
impl super::AdventOfCode2025<12> {}

/*
Input is a catalog of present shapes, then a list of regions under Christmas trees.

Each shape is a block starting with its index and a colon, followed by grid lines where `#` is part
of the shape and anything else is not. Blocks are separated by blank lines.

Each region is a line of its width, `x`, its height, a colon, then space-separated counts of how many
presents of each shape (by declaration order) must fit in the region.

For example:
```text
0:
###
##.
##.

4x4: 1
```
*/

/// Regions with both dimensions at most this are searched exhaustively. Larger regions are assumed
/// to fit whenever their area suffices.
const SMALL_BOARD_LIMIT: usize = 12;

/// A cell position relative to a shape's origin, as `(row, col)`.
type Offset = (usize, usize);

/// A normalized arrangement of cells: minimum row and column are zero, and offsets are sorted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Orientation(Vec<Offset>);

impl Orientation {
    /// Shift signed cells so the minimum row and column are zero, then sort.
    fn normalize(cells: &[(i32, i32)]) -> Self {
        let min_row = cells.iter().map(|&(row, _)| row).min().unwrap_or(0);
        let min_col = cells.iter().map(|&(_, col)| col).min().unwrap_or(0);
        let mut offsets: Vec<Offset> = cells
            .iter()
            .map(|&(row, col)| {
                let row = usize::try_from(row - min_row).expect("shifted row should be positive");
                let col = usize::try_from(col - min_col).expect("shifted col should be positive");
                (row, col)
            })
            .collect();
        offsets.sort_unstable();
        Self(offsets)
    }

    fn cells(&self) -> &[Offset] {
        &self.0
    }
}

/// A present shape from the catalog.
#[derive(Debug)]
struct Shape {
    /// The shape's cells as declared, normalized.
    cells: Orientation,
    /// Every distinct rotation and reflection of the shape, in generation order.
    orientations: Vec<Orientation>,
}

impl Shape {
    /// Build a shape from its grid lines, with `#` marking cells.
    fn from_grid<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let cells: Vec<(i32, i32)> = lines
            .into_iter()
            .zip(0..)
            .flat_map(|(line, row)| {
                line.chars()
                    .zip(0..)
                    .filter(|&(c, _)| c == '#')
                    .map(move |(_, col)| (row, col))
            })
            .collect();

        Self {
            cells: Orientation::normalize(&cells),
            orientations: orientations_of(&cells),
        }
    }

    fn cell_count(&self) -> usize {
        self.cells.0.len()
    }
}

/// The distinct orientations of cells under the identity and a horizontal mirror, each under four
/// successive quarter turns.
///
/// Orientations are kept in the order first generated, with duplicates from symmetry dropped.
fn orientations_of(cells: &[(i32, i32)]) -> Vec<Orientation> {
    let mirror = |&(row, col): &(i32, i32)| (row, -col);
    let reflections = [cells.to_vec(), cells.iter().map(mirror).collect()];

    let mut orientations: Vec<Orientation> = Vec::with_capacity(8);
    for reflection in reflections {
        let mut turned = reflection;
        for _ in 0..4 {
            turned = turned.iter().map(|&(row, col)| (col, -row)).collect();
            let orientation = Orientation::normalize(&turned);
            if !orientations.contains(&orientation) {
                orientations.push(orientation);
            }
        }
    }
    orientations
}

/// A region under a tree and the presents it must fit.
#[derive(Debug, Clone)]
struct Region {
    width: usize,
    height: usize,
    /// The count of presents required per shape index.
    counts: Vec<u32>,
}

impl Region {
    fn area(&self) -> u64 {
        (self.width as u64) * (self.height as u64)
    }

    /// The total cells covered by all required presents.
    fn required_cells(&self, shapes: &[Shape]) -> u64 {
        self.counts
            .iter()
            .zip(shapes)
            .map(|(&count, shape)| u64::from(count) * shape.cell_count() as u64)
            .sum()
    }
}

#[derive(Debug)]
struct PresentsInput {
    shapes: Vec<Shape>,
    regions: Vec<Region>,
}

/// An error in the layout of the shape catalog or region list.
#[derive(thiserror::Error, Debug)]
enum FormatError {
    #[error("expected a shape header like \"0:\", found: {0:?}")]
    MissingShapeHeader(String),
    #[error("expected shape index {expected}, found {found}")]
    UnexpectedShapeIndex { expected: usize, found: usize },
    #[error("shape {0} has no grid lines")]
    HeaderWithoutGrid(usize),
    #[error("shape {0} has no cells")]
    EmptyShape(usize),
    #[error("expected a region like \"4x4: 0 1\", found: {0:?}")]
    InvalidRegion(String),
    #[error("region lists {found} counts, but only {shapes} shapes are declared")]
    TooManyCounts { found: usize, shapes: usize },
}

struct PresentsParser {
    /// Regex for capturing a shape header's index.
    header_re: Regex,
    /// Regex for capturing a region's width, height, and counts.
    region_re: Regex,
}

impl PresentsParser {
    const HEADER_PATTERN: &str = r"^(\d+):$";
    const REGION_PATTERN: &str = r"^(\d+)x(\d+):\s*(.*)$";

    fn new() -> Self {
        let header_re = Regex::new(Self::HEADER_PATTERN).expect("pattern should be valid");
        let region_re = Regex::new(Self::REGION_PATTERN).expect("pattern should be valid");
        Self {
            header_re,
            region_re,
        }
    }

    fn is_header(&self, line: &str) -> bool {
        self.header_re.is_match(line.trim())
    }

    fn parse_header(&self, line: &str, expected: usize) -> DynamicResult<usize> {
        let captures = self
            .header_re
            .captures(line.trim())
            .ok_or_else(|| FormatError::MissingShapeHeader(line.to_owned()))?;
        let index_match = captures.get(1).expect("index should be in capture group 1");
        let found = parse_with_context(index_match.as_str())?;
        if found != expected {
            return Err(FormatError::UnexpectedShapeIndex { expected, found }.into());
        }
        Ok(found)
    }

    fn parse_region(&self, line: &str, shape_count: usize) -> DynamicResult<Region> {
        let captures = self
            .region_re
            .captures(line.trim())
            .ok_or_else(|| FormatError::InvalidRegion(line.to_owned()))?;
        let capture = |group: usize| {
            captures
                .get(group)
                .map_or("", |capture_match| capture_match.as_str())
        };

        let width = parse_with_context(capture(1))?;
        let height = parse_with_context(capture(2))?;
        let mut counts = capture(3)
            .split_whitespace()
            .map(parse_with_context)
            .collect::<Result<Vec<u32>, _>>()?;
        if counts.len() > shape_count {
            return Err(FormatError::TooManyCounts {
                found: counts.len(),
                shapes: shape_count,
            }
            .into());
        }
        // unlisted shapes aren't required
        counts.resize(shape_count, 0);

        Ok(Region {
            width,
            height,
            counts,
        })
    }
}

impl ParseData for PresentsInput {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let parser = PresentsParser::new();
        let mut scanner = InputScanner::new(input);

        let mut shapes = Vec::new();
        while scanner.skip_empty().is_some() {
            let Some(&next_line) = scanner.remaining().first() else {
                break;
            };
            if !parser.is_header(next_line) {
                // the region list needs a shape catalog before it
                if shapes.is_empty() {
                    let error = FormatError::MissingShapeHeader(next_line.to_owned());
                    return Err(InvalidLine::new(scanner.position(), error).into());
                }
                break;
            }

            let header = scanner.next_in_sequence(|line_index, line| {
                parser
                    .parse_header(line, shapes.len())
                    .map(|index| (line_index, index))
            })?;
            let Some((header_line, index)) = header else {
                break;
            };

            let grid = scanner.collect_sequence(|_, line| -> DynamicResult<_> { Ok(line) })?;
            if grid.is_empty() {
                let error = FormatError::HeaderWithoutGrid(index);
                return Err(InvalidLine::new(header_line, error).into());
            }
            let shape = Shape::from_grid(grid);
            if shape.cell_count() == 0 {
                return Err(InvalidLine::new(header_line, FormatError::EmptyShape(index)).into());
            }
            shapes.push(shape);
        }

        let mut regions = Vec::new();
        while scanner.skip_empty().is_some() {
            let block = scanner
                .collect_sequence(|_, line| parser.parse_region(line, shapes.len()))?;
            regions.extend(block);
        }

        Ok(Self { shapes, regions })
    }
}

/// Which cells of a board are occupied, a bitmask per row with bit `col` set when filled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Board {
    width: usize,
    height: usize,
    rows: Vec<u64>,
}

impl Board {
    fn new(width: usize, height: usize) -> Self {
        assert!(
            width <= u64::BITS as usize,
            "board width {width} should fit a row bitmask"
        );
        Self {
            width,
            height,
            rows: vec![0; height],
        }
    }

    fn is_filled(&self, (row, col): Offset) -> bool {
        self.rows[row] & (1 << col) != 0
    }

    /// The first empty cell in raster order, top to bottom then left to right.
    fn first_empty(&self) -> Option<Offset> {
        (0..self.height)
            .flat_map(|row| (0..self.width).map(move |col| (row, col)))
            .find(|&cell| !self.is_filled(cell))
    }

    /// The board cells an orientation covers when its origin is placed at `origin`.
    fn covered_cells<'a>(
        orientation: &'a Orientation,
        origin: Offset,
    ) -> impl Iterator<Item = Offset> + 'a {
        orientation
            .cells()
            .iter()
            .map(move |&(row, col)| (origin.0 + row, origin.1 + col))
    }

    /// Check if an orientation placed at `origin` lies within the board and only covers empty
    /// cells.
    fn can_place(&self, orientation: &Orientation, origin: Offset) -> bool {
        Self::covered_cells(orientation, origin).all(|(row, col)| {
            row < self.height && col < self.width && !self.is_filled((row, col))
        })
    }

    /// Flip the cells covered by an orientation placed at `origin`. Toggling twice restores the
    /// board.
    fn toggle(&mut self, orientation: &Orientation, origin: Offset) {
        for cell in Self::covered_cells(orientation, origin) {
            self.toggle_cell(cell);
        }
    }

    fn toggle_cell(&mut self, (row, col): Offset) {
        self.rows[row] ^= 1 << col;
    }
}

/// A candidate placement of a present during the search.
#[derive(Debug, Clone, Copy)]
struct Placement<'a> {
    shape_index: usize,
    orientation: &'a Orientation,
    origin: Offset,
}

/// The placements that would cover `target`, for every shape in `shape_indexes`.
///
/// Placements are ordered by shape index, then orientation, then which of the orientation's cells
/// lands on `target`. Origins that would fall before the board's first row or column are skipped.
fn placements_covering<'a>(
    shapes: &'a [Shape],
    shape_indexes: Vec<usize>,
    target: Offset,
) -> impl Iterator<Item = Placement<'a>> {
    shape_indexes.into_iter().flat_map(move |shape_index| {
        shapes[shape_index]
            .orientations
            .iter()
            .flat_map(move |orientation| {
                orientation.cells().iter().filter_map(move |&(row, col)| {
                    Some(Placement {
                        shape_index,
                        orientation,
                        origin: (target.0.checked_sub(row)?, target.1.checked_sub(col)?),
                    })
                })
            })
    })
}

/// The mutable state of a packing search, and the key memoizing its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PackingState {
    board: Board,
    /// Presents still to place per shape index.
    remaining: Vec<u32>,
}

/// A backtracking search for placing every required present in a region, with presents allowed to
/// leave cells empty.
struct PackingSearch<'a> {
    shapes: &'a [Shape],
    state: PackingState,
    /// Count of cells either covered or given up as empty.
    occupied: usize,
    memo: HashMap<PackingState, bool>,
}

impl<'a> PackingSearch<'a> {
    fn new(shapes: &'a [Shape], region: &Region) -> Self {
        Self {
            shapes,
            state: PackingState {
                board: Board::new(region.width, region.height),
                remaining: region.counts.clone(),
            },
            occupied: 0,
            memo: HashMap::new(),
        }
    }

    fn place(&mut self, placement: Placement<'_>) {
        self.state.board.toggle(placement.orientation, placement.origin);
        self.occupied += placement.orientation.cells().len();
        self.state.remaining[placement.shape_index] -= 1;
    }

    /// Undo [`Self::place`] for the same placement.
    fn unplace(&mut self, placement: Placement<'_>) {
        self.state.remaining[placement.shape_index] += 1;
        self.occupied -= placement.orientation.cells().len();
        self.state.board.toggle(placement.orientation, placement.origin);
    }

    fn cells_needed(&self) -> usize {
        self.state
            .remaining
            .iter()
            .zip(self.shapes)
            .map(|(&count, shape)| count as usize * shape.cell_count())
            .sum()
    }

    fn free_cells(&self) -> usize {
        self.state.board.width * self.state.board.height - self.occupied
    }

    /// Search from the current state, returning whether every remaining present can be placed.
    ///
    /// A failed search restores the state. A successful one leaves the found packing on the board.
    fn search(&mut self) -> bool {
        let Some(target) = self.state.board.first_empty() else {
            return self.state.remaining.iter().all(|&count| count == 0);
        };

        let key = self.state.clone();
        if let Some(&known) = self.memo.get(&key) {
            return known;
        }

        let found = self.search_at(target);
        self.memo.insert(key, found);
        found
    }

    /// Decide the first empty cell `target`: cover it with some present, or leave it empty.
    fn search_at(&mut self, target: Offset) -> bool {
        if self.cells_needed() > self.free_cells() {
            return false;
        }

        // counts are restored between candidates, so the shapes to try stay fixed
        let shape_indexes: Vec<_> = (0..self.shapes.len())
            .filter(|&index| self.state.remaining[index] > 0)
            .collect();
        for placement in placements_covering(self.shapes, shape_indexes, target) {
            if !self
                .state
                .board
                .can_place(placement.orientation, placement.origin)
            {
                continue;
            }
            self.place(placement);
            if self.search() {
                return true;
            }
            self.unplace(placement);
        }

        self.state.board.toggle_cell(target);
        self.occupied += 1;
        if self.search() {
            return true;
        }
        self.occupied -= 1;
        self.state.board.toggle_cell(target);
        false
    }
}

impl PresentsInput {
    /// Decide if every present required by a region fits in it.
    fn region_fits(&self, region: &Region) -> bool {
        let required = region.required_cells(&self.shapes);
        let area = region.area();
        if required > area {
            debug!(
                "{}x{} region needs {required} cells but has {area}",
                region.width, region.height
            );
            return false;
        }

        if region.width <= SMALL_BOARD_LIMIT && region.height <= SMALL_BOARD_LIMIT {
            let fits = PackingSearch::new(&self.shapes, region).search();
            debug!(
                "{}x{} region searched: fits = {fits}",
                region.width, region.height
            );
            fits
        } else {
            debug!(
                "{}x{} region too large to search, assuming {required} cells fit in {area}",
                region.width, region.height
            );
            true
        }
    }
}

struct Day12;

/*
For part 1, presents can be rotated and flipped, but must be placed on the grid without overlapping
each other. Count how many regions can fit all of their listed presents.
*/

impl Solution<PartOne> for Day12 {
    type Input = PresentsInput;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input
            .regions
            .iter()
            .filter(|region| input.region_fits(region))
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"0:
###
##.
##.

1:
###
##.
.##

2:
.##
###
##.

3:
##.
###
##.

4:
###
#..
###

5:
###
.#.
###

4x4: 0 0 0 0 2 0
12x5: 1 0 1 0 2 2
12x5: 1 0 1 0 3 2
";

    fn shape(grid: &str) -> Shape {
        Shape::from_grid(grid.lines())
    }

    fn region(width: usize, height: usize, counts: &[u32]) -> Region {
        Region {
            width,
            height,
            counts: counts.to_vec(),
        }
    }

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = PresentsInput::parse(EXAMPLE_INPUT)?;
        let result = <Day12 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 2);
        Ok(())
    }

    #[test]
    fn decides_each_example_region() -> DynamicResult<()> {
        let parsed = PresentsInput::parse(EXAMPLE_INPUT)?;
        assert_eq!(parsed.shapes.len(), 6);
        assert!(parsed.shapes.iter().all(|shape| shape.cell_count() == 7));
        let fits: Vec<_> = parsed
            .regions
            .iter()
            .map(|region| parsed.region_fits(region))
            .collect();
        assert_eq!(fits, [true, true, false]);
        Ok(())
    }

    #[test]
    fn orientation_counts_follow_symmetry() {
        assert_eq!(shape("##\n##").orientations.len(), 1);
        assert_eq!(shape("#.\n##").orientations.len(), 4);
        assert_eq!(shape("###").orientations.len(), 2);
        assert_eq!(shape("#..\n###").orientations.len(), 8);
        assert_eq!(shape("###\n.#.\n###").orientations.len(), 2);
    }

    #[test]
    fn orientations_preserve_cells_and_are_distinct() -> DynamicResult<()> {
        let parsed = PresentsInput::parse(EXAMPLE_INPUT)?;
        for shape in &parsed.shapes {
            for (index, orientation) in shape.orientations.iter().enumerate() {
                assert_eq!(orientation.cells().len(), shape.cell_count());
                assert!(orientation.cells().iter().any(|&(row, _)| row == 0));
                assert!(orientation.cells().iter().any(|&(_, col)| col == 0));
                assert!(!shape.orientations[..index].contains(orientation));
            }
            assert!([1, 2, 4, 8].contains(&shape.orientations.len()));
        }
        Ok(())
    }

    #[test]
    fn first_orientation_is_a_quarter_turn() {
        // (r, c) -> (c, -r) turns the declared shape before anything is recorded
        let l_shape = shape("#.\n#.\n##");
        assert_eq!(l_shape.cells.cells(), [(0, 0), (1, 0), (2, 0), (2, 1)]);
        assert_eq!(
            l_shape.orientations[0].cells(),
            [(0, 0), (0, 1), (0, 2), (1, 0)]
        );
    }

    #[test]
    fn area_bound_rejects_without_search() {
        let input = PresentsInput {
            shapes: vec![shape("###\n###")],
            regions: Vec::new(),
        };
        assert!(!input.region_fits(&region(3, 3, &[2])));
        // too large to search, but the area bound still applies
        assert!(!input.region_fits(&region(50, 1, &[9])));
        assert!(input.region_fits(&region(50, 1, &[8])));
    }

    #[test]
    fn single_cell_fits_monomino() {
        let input = PresentsInput {
            shapes: vec![shape("#")],
            regions: Vec::new(),
        };
        assert!(input.region_fits(&region(1, 1, &[1])));
        assert!(!input.region_fits(&region(1, 1, &[2])));
    }

    #[test]
    fn nothing_required_always_fits() {
        let input = PresentsInput {
            shapes: vec![shape("##\n#.")],
            regions: Vec::new(),
        };
        assert!(input.region_fits(&region(0, 0, &[0])));
        assert!(input.region_fits(&region(3, 0, &[0])));
        assert!(input.region_fits(&region(5, 4, &[0])));
    }

    #[test]
    fn search_respects_geometry_beyond_area() {
        let input = PresentsInput {
            shapes: vec![shape("###")],
            regions: Vec::new(),
        };
        // 4 cells of area for 3, but no row or column is long enough
        assert!(!input.region_fits(&region(2, 2, &[1])));
        assert!(input.region_fits(&region(3, 2, &[2])));
    }

    #[test]
    fn regions_are_independent_and_repeatable() -> DynamicResult<()> {
        let parsed = PresentsInput::parse(EXAMPLE_INPUT)?;
        let infeasible = &parsed.regions[2];
        let feasible = &parsed.regions[1];
        assert!(!parsed.region_fits(infeasible));
        assert!(parsed.region_fits(feasible));

        let first = <Day12 as Solution<PartOne>>::solve(&parsed)?;
        let second = <Day12 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(first, second);
        assert_eq!(parsed.regions[2].counts, [1, 0, 1, 0, 3, 2]);
        Ok(())
    }

    #[test]
    fn toggle_is_self_inverse() {
        let l_shape = shape("#.\n##");
        let mut board = Board::new(4, 3);
        board.toggle_cell((0, 3));
        let before = board.clone();

        let orientation = &l_shape.orientations[0];
        assert!(board.can_place(orientation, (1, 1)));
        board.toggle(orientation, (1, 1));
        assert_ne!(board, before);
        assert!(!board.can_place(orientation, (1, 1)));
        board.toggle(orientation, (1, 1));
        assert_eq!(board, before);
    }

    #[test]
    fn placement_checks_bounds_and_overlap() {
        let horizontal = Orientation(vec![(0, 0), (0, 1)]);
        let mut board = Board::new(3, 2);
        assert!(board.can_place(&horizontal, (0, 1)));
        assert!(!board.can_place(&horizontal, (0, 2)));
        assert!(!board.can_place(&horizontal, (2, 0)));
        board.toggle_cell((1, 1));
        assert!(!board.can_place(&horizontal, (1, 0)));
        assert_eq!(board.first_empty(), Some((0, 0)));
    }

    #[test]
    fn placements_cover_target_in_order() {
        let shapes = [shape("##"), shape("#")];
        assert_eq!(shapes[0].orientations[0].cells(), [(0, 0), (1, 0)]);
        let placements: Vec<_> = placements_covering(&shapes, vec![0, 1], (0, 1))
            .map(|placement| (placement.shape_index, placement.origin))
            .collect();
        // the vertical bar can only hang down from the target, the horizontal bar can start at or
        // before it, then the monomino
        assert_eq!(
            placements,
            [(0, (0, 1)), (0, (0, 1)), (0, (0, 0)), (1, (0, 1))]
        );
    }

    #[test]
    fn missing_counts_are_zero() -> DynamicResult<()> {
        let parsed = PresentsInput::parse("0:\n#\n\n1:\n##\n\n2x2: 3\n")?;
        assert_eq!(parsed.regions[0].counts, [3, 0]);
        Ok(())
    }

    #[test]
    fn rejects_malformed_catalogs() {
        // regions before any shape
        assert!(PresentsInput::parse("4x4: 1\n").is_err());
        // header without a grid
        assert!(PresentsInput::parse("0:\n\n4x4: 1\n").is_err());
        // shape without cells
        assert!(PresentsInput::parse("0:\n...\n\n4x4: 1\n").is_err());
        // unparsable dimensions
        assert!(PresentsInput::parse("0:\n#\n\n4xx: 1\n").is_err());
        // more counts than shapes
        assert!(PresentsInput::parse("0:\n#\n\n4x4: 1 2\n").is_err());
        // stray line after the shapes
        assert!(PresentsInput::parse("0:\n#\n\nnot a region\n").is_err());
        // out of order index
        assert!(PresentsInput::parse("1:\n#\n\n4x4: 1\n").is_err());
    }
}
