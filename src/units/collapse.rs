//! Reduces every connected component of a [`ConversionGraph`] to one
//! representative unit.
//!
//! The representative of a component is its first unit in table order. Each
//! member gets the exact factor such that `1 member = factor representative`.
//! Factors come from the first path a breadth-first walk finds; redundant
//! edges that would give a different factor are not cross-checked.

use std::collections::{HashMap, HashSet, VecDeque};

use num_traits::One;
use tracing::debug;

use super::graph::ConversionGraph;
use crate::math::Num;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canonical {
    pub representative: String,
    pub factor: Num,
}

/// Unit -> (representative, factor), built once from a graph.
#[derive(Clone, Debug, Default)]
pub struct CanonicalMap {
    entries: HashMap<String, Canonical>,
    representatives: Vec<String>,
}

impl CanonicalMap {
    pub fn get(&self, unit: &str) -> Option<&Canonical> {
        self.entries.get(unit)
    }

    pub fn contains(&self, unit: &str) -> bool {
        self.entries.contains_key(unit)
    }

    /// One representative per connected component, in discovery order.
    pub fn representatives(&self) -> impl Iterator<Item = &str> {
        self.representatives.iter().map(String::as_str)
    }

    pub fn component_count(&self) -> usize {
        self.representatives.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn collapse(graph: &ConversionGraph) -> CanonicalMap {
    let mut map = CanonicalMap::default();
    let mut visited: HashSet<&str> = HashSet::with_capacity(graph.len());

    for unit in graph.units() {
        if visited.contains(unit) {
            continue;
        }
        let size = walk_component(graph, unit, &mut visited, &mut map.entries);
        debug!(representative = unit, size, "component collapsed");
        map.representatives.push(unit.to_owned());
    }
    map
}

fn walk_component<'g>(
    graph: &'g ConversionGraph,
    representative: &'g str,
    visited: &mut HashSet<&'g str>,
    entries: &mut HashMap<String, Canonical>,
) -> usize {
    let mut queue = VecDeque::new();
    queue.push_back((representative, Num::one()));
    visited.insert(representative);

    let mut size = 0;
    while let Some((unit, factor)) = queue.pop_front() {
        for (next, weight) in graph.neighbours(unit) {
            // marking on discovery keeps the first path's factor
            if visited.insert(next) {
                queue.push_back((next, &factor * weight));
            }
        }
        entries.insert(
            unit.to_owned(),
            Canonical {
                representative: representative.to_owned(),
                factor,
            },
        );
        size += 1;
    }
    size
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::num;
    use crate::units::graph::Edge;

    fn graph(rows: &[(&str, &str, &str)]) -> ConversionGraph {
        ConversionGraph::from_edges(
            rows.iter()
                .map(|(from, to, ratio)| Edge::parse(*from, *to, ratio).unwrap()),
        )
    }

    fn lengths_and_times() -> ConversionGraph {
        graph(&[
            ("m", "cm", "100"),
            ("mm", "m", "0.001"),
            ("km", "m", "1000"),
            ("h", "min", "60"),
            ("min", "s", "60"),
        ])
    }

    #[test]
    fn representative_has_unit_factor() {
        let map = collapse(&lengths_and_times());
        let m = map.get("m").unwrap();
        assert_eq!(m.representative, "m");
        assert_eq!(m.factor, num!(1, 1));
        assert_eq!(map.get("h").unwrap().factor, num!(1, 1));
    }

    #[test]
    fn factors_express_members_in_representative() {
        let map = collapse(&lengths_and_times());
        assert_eq!(map.get("cm").unwrap().factor, num!(1, 100));
        assert_eq!(map.get("mm").unwrap().factor, num!(1, 1000));
        assert_eq!(map.get("km").unwrap().factor, num!(1000, 1));

        let s = map.get("s").unwrap();
        assert_eq!(s.representative, "h");
        assert_eq!(s.factor, num!(1, 3600));
    }

    #[test]
    fn one_entry_per_unit_and_component() {
        let mut rows = vec![("a", "b", "12")];
        rows.extend([("m", "cm", "100"), ("km", "m", "1000")]);
        let map = collapse(&graph(&rows));
        assert_eq!(map.len(), 5);
        assert_eq!(map.component_count(), 2);
        assert_eq!(map.representatives().collect::<Vec<_>>(), vec!["a", "m"]);
        assert_eq!(map.get("b").unwrap().representative, "a");
        assert!(!map.contains("x"));
    }

    #[test]
    fn first_discovered_path_wins() {
        // a-b-c chain and an inconsistent shortcut a-c
        let map = collapse(&graph(&[("a", "b", "2"), ("b", "c", "3"), ("a", "c", "7")]));
        // c is a direct neighbour of a, found before the path through b
        assert_eq!(map.get("c").unwrap().factor, num!(1, 7));
        assert_eq!(map.get("b").unwrap().factor, num!(1, 2));
    }

    #[test]
    fn self_loops_are_ignored() {
        let map = collapse(&graph(&[("a", "a", "2"), ("a", "b", "3"), ("b", "b", "5")]));
        assert_eq!(map.component_count(), 1);
        assert_eq!(map.get("a").unwrap().factor, num!(1, 1));
        assert_eq!(map.get("b").unwrap().factor, num!(1, 3));
        assert_eq!(map.get("b").unwrap().representative, "a");
    }

    #[test]
    fn collapse_is_deterministic() {
        let g = lengths_and_times();
        let first = collapse(&g);
        for _ in 0..10 {
            let again = collapse(&g);
            for unit in g.units() {
                assert_eq!(first.get(unit), again.get(unit));
            }
        }
    }
}
