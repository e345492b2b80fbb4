use std::collections::{HashMap, HashSet};

use aoc_framework::parsing::parse_input_lines;
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use petgraph::graph::{DiGraph, NodeIndex};

#[solution_runner(
    name = "Day 11: Reactor",
    parsed = Network,
    part_one = Day11,
    part_two = Day11,
    part_one_label = "Paths from you to out",
    part_two_label = "Paths from svr to out visiting dac and fft"
)]
impl super::AdventOfCode2025<11> {}

/*
Input is a list of devices and their outputs, one device per line: the device name, a colon, and
space-separated names of the devices its outputs connect to. Data only flows from a device through
its outputs.
*/

/// A directed graph of devices, with edges following outputs.
#[derive(Debug)]
struct Network {
    graph: DiGraph<String, ()>,
    nodes_by_name: HashMap<String, NodeIndex>,
}

#[derive(thiserror::Error, Debug)]
enum ParseNetworkError {
    #[error("expected a colon (':') after the device name")]
    MissingColon,
    #[error("device {0:?} has outputs listed more than once")]
    DuplicateDevice(String),
}

impl Network {
    fn node(&mut self, name: &str) -> NodeIndex {
        if let Some(&index) = self.nodes_by_name.get(name) {
            return index;
        }
        let index = self.graph.add_node(name.to_owned());
        self.nodes_by_name.insert(name.to_owned(), index);
        index
    }
}

impl ParseData for Network {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let devices = parse_input_lines(input, |_, line| -> DynamicResult<_> {
            if line.trim().is_empty() {
                return Ok(None);
            }
            let (name, outputs) = line.split_once(':').ok_or(ParseNetworkError::MissingColon)?;
            Ok(Some((name.trim(), outputs.split_whitespace().collect::<Vec<_>>())))
        })
        .filter_map(Result::transpose)
        .collect::<Result<Vec<_>, _>>()?;

        let mut network = Self {
            graph: DiGraph::new(),
            nodes_by_name: HashMap::new(),
        };
        let mut listed = HashSet::new();
        for (name, outputs) in devices {
            if !listed.insert(name) {
                return Err(ParseNetworkError::DuplicateDevice(name.to_owned()).into());
            }
            let from = network.node(name);
            for output in outputs {
                let to = network.node(output);
                network.graph.add_edge(from, to, ());
            }
        }

        Ok(network)
    }
}

#[derive(thiserror::Error, Debug)]
enum PathCountError {
    #[error("cycle through device {0:?} makes the path count infinite")]
    Cycle(String),
}

/// Counts paths from devices to a fixed end device, tracking which required devices were visited.
struct PathCounter<'a> {
    network: &'a Network,
    end: NodeIndex,
    /// Bit per required device, by node.
    required_bits: HashMap<NodeIndex, u32>,
    all_required: u32,
    memo: HashMap<(NodeIndex, u32), u64>,
    visiting: HashSet<NodeIndex>,
}

impl PathCounter<'_> {
    fn count(&mut self, node: NodeIndex, visited: u32) -> Result<u64, PathCountError> {
        if node == self.end {
            return Ok(u64::from(visited == self.all_required));
        }
        if let Some(&count) = self.memo.get(&(node, visited)) {
            return Ok(count);
        }
        if !self.visiting.insert(node) {
            return Err(PathCountError::Cycle(self.network.graph[node].clone()));
        }

        let visited_after = visited | self.required_bits.get(&node).copied().unwrap_or(0);
        let mut total: u64 = 0;
        for next in self.network.graph.neighbors(node) {
            total = total
                .checked_add(self.count(next, visited_after)?)
                .expect("path count should not overflow");
        }

        self.visiting.remove(&node);
        self.memo.insert((node, visited), total);
        Ok(total)
    }
}

impl Network {
    /// Count the paths from `start` to `end` that pass through every device in `required`.
    ///
    /// Missing devices have no paths through them.
    fn count_paths(
        &self,
        start: &str,
        end: &str,
        required: &[&str],
    ) -> Result<u64, PathCountError> {
        let (Some(&start), Some(&end)) =
            (self.nodes_by_name.get(start), self.nodes_by_name.get(end))
        else {
            return Ok(0);
        };

        let required_bits: HashMap<_, _> = required
            .iter()
            .enumerate()
            .filter_map(|(bit, name)| Some((*self.nodes_by_name.get(*name)?, 1 << bit)))
            .collect();
        let all_required = (1 << required.len()) - 1;

        let mut counter = PathCounter {
            network: self,
            end,
            required_bits,
            all_required,
            memo: HashMap::new(),
            visiting: HashSet::new(),
        };
        counter.count(start, 0)
    }
}

struct Day11;

/*
For part 1, count every path from the device `you` to the device `out`.
*/

impl Solution<PartOne> for Day11 {
    type Input = Network;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.count_paths("you", "out", &[])?)
    }
}

/*
For part 2, count the paths from the server rack `svr` to `out` that visit both the digital to analog
converter `dac` and the fast Fourier transform `fft`, in any order.
*/

impl Solution<PartTwo> for Day11 {
    type Input = Network;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.count_paths("svr", "out", &["dac", "fft"])?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"aaa: you hhh
you: bbb ccc
bbb: ddd eee
ccc: ddd eee fff
ddd: ggg
eee: out
fff: out
ggg: out
hhh: ccc fff iii
iii: out
";

    const EXAMPLE_INPUT_PART_TWO: &str = r"svr: aaa bbb
aaa: fft
fft: ccc
bbb: tty
tty: ccc
ccc: ddd eee
ddd: hub
hub: fff
eee: dac
dac: fff
fff: ggg hhh
ggg: out
hhh: out
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Network::parse(EXAMPLE_INPUT)?;
        let result = <Day11 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 5);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Network::parse(EXAMPLE_INPUT_PART_TWO)?;
        let result = <Day11 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 2);
        Ok(())
    }

    #[test]
    fn counts_all_paths_without_requirements() -> DynamicResult<()> {
        let parsed = Network::parse(EXAMPLE_INPUT_PART_TWO)?;
        assert_eq!(parsed.count_paths("svr", "out", &[])?, 8);
        assert_eq!(parsed.count_paths("svr", "out", &["dac"])?, 4);
        Ok(())
    }

    #[test]
    fn missing_devices_have_no_paths() -> DynamicResult<()> {
        let parsed = Network::parse(EXAMPLE_INPUT)?;
        assert_eq!(<Day11 as Solution<PartTwo>>::solve(&parsed)?, 0);
        Ok(())
    }

    #[test]
    fn cycle_is_an_error() -> DynamicResult<()> {
        let parsed = Network::parse("you: a\na: b\nb: a out\n")?;
        assert!(<Day11 as Solution<PartOne>>::solve(&parsed).is_err());
        Ok(())
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(Network::parse("you out\n").is_err());
        assert!(Network::parse("you: a\nyou: out\n").is_err());
    }
}
