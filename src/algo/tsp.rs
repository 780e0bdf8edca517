// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Exact traveling-salesman paths over a subset of nodes
//!
//! A TSP path visits every requested node once, in some order, and may pass
//! through any other node on the way. Consecutive members are joined by
//! their shortest path, so the problem reduces to ordering the members over
//! the pairwise shortest-path distance matrix.
//!
//! [`WeightedGraph::tsp`] solves that ordering with Held-Karp dynamic
//! programming over `(visited members, last member)`.
//! [`WeightedGraph::tsp_exhaustive`] enumerates orderings recursively and is
//! kept as a reference for the DP.
//!
//! Both only start from members that can reach every other member.
//!
//! Every requested node appears once in the result unless every cheapest
//! ordering has a segment that runs through another member. Among equal-cost
//! orderings the one with the fewest such pass-throughs wins.

use super::shortest_path::ShortestPathTree;
use crate::error::{GraphError, Result};
use crate::graph::WeightedGraph;
use crate::types::NodeId;
use petgraph::graph::NodeIndex;
use tracing::debug;

/// Default largest subset accepted by [`WeightedGraph::tsp`]
pub const DEFAULT_TSP_MEMBER_LIMIT: usize = 16;

/// Hard ceiling on the subset size, whatever limit is configured
pub const MAX_TSP_MEMBERS: usize = 20;

const NO_PARENT: u8 = u8::MAX;

/// A TSP result: visited nodes in order and the total distance
pub type TspPath = (Vec<NodeId>, f64);

fn infeasible() -> TspPath {
    (Vec::new(), f64::INFINITY)
}

/// Cost of a partial ordering: total distance, then the number of times a
/// segment passes through another member
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cost {
    distance: f64,
    pass_throughs: usize,
}

impl Cost {
    const START: Self = Self {
        distance: 0.0,
        pass_throughs: 0,
    };

    const UNREACHED: Self = Self {
        distance: f64::INFINITY,
        pass_throughs: usize::MAX,
    };

    fn is_finite(self) -> bool {
        self.distance.is_finite()
    }

    fn then(self, step: Self) -> Self {
        Self {
            distance: self.distance + step.distance,
            pass_throughs: self.pass_throughs.saturating_add(step.pass_throughs),
        }
    }

    #[allow(clippy::float_cmp)]
    fn beats(self, other: Self) -> bool {
        self.distance < other.distance
            || (self.distance == other.distance && self.pass_throughs < other.pass_throughs)
    }
}

/// Pairwise shortest-path data between the members of a subset
struct MemberDistances<'g> {
    members: Vec<NodeIndex>,
    trees: Vec<ShortestPathTree<'g>>,
    /// `pass_throughs[from * k + to]`: members strictly inside the segment
    pass_throughs: Vec<usize>,
}

impl<'g> MemberDistances<'g> {
    fn build(graph: &'g WeightedGraph, members: Vec<NodeIndex>) -> Self {
        let trees: Vec<ShortestPathTree<'g>> = members
            .iter()
            .map(|&idx| ShortestPathTree::build(graph, idx))
            .collect();

        let member_ids: Vec<NodeId> = members.iter().map(|&idx| graph.id_at(idx)).collect();
        let mut pass_throughs = Vec::with_capacity(members.len() * members.len());
        for tree in &trees {
            for &to in &members {
                let segment = tree.path_at(to);
                let inner = segment.len().saturating_sub(2);
                let count = segment
                    .iter()
                    .skip(1)
                    .take(inner)
                    .filter(|id| member_ids.contains(id))
                    .count();
                pass_throughs.push(count);
            }
        }

        Self {
            members,
            trees,
            pass_throughs,
        }
    }

    fn len(&self) -> usize {
        self.members.len()
    }

    fn distance(&self, from: usize, to: usize) -> f64 {
        self.trees[from].distance_at(self.members[to])
    }

    fn step(&self, from: usize, to: usize) -> Cost {
        Cost {
            distance: self.distance(from, to),
            pass_throughs: self.pass_throughs[from * self.len() + to],
        }
    }

    /// Whether member `from` reaches every member in `targets`
    fn reaches_all(&self, from: usize, targets: impl IntoIterator<Item = usize>) -> bool {
        targets
            .into_iter()
            .all(|to| self.distance(from, to).is_finite())
    }

    /// Join the shortest paths between consecutive members of `order`.
    ///
    /// The junction node of each segment is not repeated. The distance is the
    /// sum of the segment distances, accumulated left to right.
    fn stitch(&self, order: &[usize]) -> TspPath {
        let Some(&first) = order.first() else {
            return infeasible();
        };

        let mut path = vec![self.trees[first].source()];
        let mut total = 0.0;
        for pair in order.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let segment = self.trees[from].path_at(self.members[to]);
            if segment.is_empty() {
                return infeasible();
            }
            total += self.distance(from, to);
            path.extend_from_slice(&segment[1..]);
        }
        (path, total)
    }
}

impl WeightedGraph {
    /// Shortest path visiting every node in `node_ids`, with the default
    /// subset limit.
    ///
    /// Returns `([], inf)` when no ordering of the nodes is reachable.
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`] for an unknown ID and
    /// [`GraphError::SubsetTooLarge`] above [`DEFAULT_TSP_MEMBER_LIMIT`]
    /// distinct nodes.
    pub fn tsp(&self, node_ids: &[NodeId]) -> Result<TspPath> {
        self.tsp_with_limit(node_ids, DEFAULT_TSP_MEMBER_LIMIT)
    }

    /// [`tsp`](Self::tsp) with an explicit subset limit, raised to at least
    /// one and capped at [`MAX_TSP_MEMBERS`]
    pub fn tsp_with_limit(&self, node_ids: &[NodeId], limit: usize) -> Result<TspPath> {
        let members = self.tsp_members(node_ids)?;
        let limit = limit.clamp(1, MAX_TSP_MEMBERS);
        if members.len() > limit {
            return Err(GraphError::SubsetTooLarge {
                requested: members.len(),
                limit,
            });
        }

        if let Some(result) = self.tsp_base_case(&members) {
            return Ok(result);
        }

        let distances = MemberDistances::build(self, members);
        let result = held_karp(&distances);
        debug!(members = distances.len(), distance = result.1, "tsp solved");
        Ok(result)
    }

    /// Reference solver: recursive search over every feasible ordering.
    ///
    /// Exponential in the subset size; same results as [`tsp`](Self::tsp)
    /// up to the choice between equal-cost orderings.
    pub fn tsp_exhaustive(&self, node_ids: &[NodeId]) -> Result<TspPath> {
        let members = self.tsp_members(node_ids)?;
        if let Some(result) = self.tsp_base_case(&members) {
            return Ok(result);
        }

        let distances = MemberDistances::build(self, members);
        let all: Vec<usize> = (0..distances.len()).collect();

        let mut best: Option<(Vec<usize>, Cost)> = None;
        for &lead in &all {
            let rest: Vec<usize> = all.iter().copied().filter(|&m| m != lead).collect();
            if !distances.reaches_all(lead, rest.iter().copied()) {
                continue;
            }
            if let Some(candidate) = best_order_from(&distances, lead, &rest) {
                if best.as_ref().map_or(true, |b| candidate.1.beats(b.1)) {
                    best = Some(candidate);
                }
            }
        }

        Ok(best.map_or_else(infeasible, |(order, _)| distances.stitch(&order)))
    }

    /// Validate IDs and drop repeats, keeping first occurrences
    fn tsp_members(&self, node_ids: &[NodeId]) -> Result<Vec<NodeIndex>> {
        let mut members: Vec<NodeIndex> = Vec::with_capacity(node_ids.len());
        for &id in node_ids {
            let idx = self.index_of(id)?;
            if !members.contains(&idx) {
                members.push(idx);
            }
        }
        Ok(members)
    }

    /// Results for subsets of fewer than three members
    fn tsp_base_case(&self, members: &[NodeIndex]) -> Option<TspPath> {
        match *members {
            [] => Some(infeasible()),
            [only] => Some((vec![self.id_at(only)], 0.0)),
            [a, b] => {
                let forward = ShortestPathTree::build(self, a);
                let backward = ShortestPathTree::build(self, b);
                let (d_ab, d_ba) = (forward.distance_at(b), backward.distance_at(a));

                if d_ab.is_infinite() && d_ba.is_infinite() {
                    Some(infeasible())
                } else if d_ab <= d_ba {
                    Some((forward.path_at(b), d_ab))
                } else {
                    Some((backward.path_at(a), d_ba))
                }
            }
            _ => None,
        }
    }
}

/// Held-Karp over `(mask of visited members, last member)`.
///
/// `cost[mask][last]` is the cheapest way to visit exactly the members in
/// `mask`, ending at `last`. Only members that reach all others seed a path.
fn held_karp(distances: &MemberDistances<'_>) -> TspPath {
    let k = distances.len();
    let full = (1usize << k) - 1;
    let slot = |mask: usize, last: usize| mask * k + last;

    let mut cost = vec![Cost::UNREACHED; (full + 1) * k];
    let mut parent = vec![NO_PARENT; (full + 1) * k];

    let mut seeded = 0;
    for lead in 0..k {
        if distances.reaches_all(lead, (0..k).filter(|&m| m != lead)) {
            cost[slot(1 << lead, lead)] = Cost::START;
            seeded += 1;
        }
    }
    if seeded == 0 {
        return infeasible();
    }

    for mask in 1..=full {
        for last in 0..k {
            if mask & (1 << last) == 0 {
                continue;
            }
            let here = cost[slot(mask, last)];
            if !here.is_finite() {
                continue;
            }
            for next in 0..k {
                if mask & (1 << next) != 0 {
                    continue;
                }
                let candidate = here.then(distances.step(last, next));
                let target = slot(mask | (1 << next), next);
                if candidate.beats(cost[target]) {
                    cost[target] = candidate;
                    // k is capped well below u8::MAX
                    parent[target] = u8::try_from(last).unwrap_or(NO_PARENT);
                }
            }
        }
    }

    let mut end: Option<usize> = None;
    for last in 0..k {
        let c = cost[slot(full, last)];
        if c.is_finite() && end.map_or(true, |e| c.beats(cost[slot(full, e)])) {
            end = Some(last);
        }
    }
    let Some(mut last) = end else {
        return infeasible();
    };

    let mut order = Vec::with_capacity(k);
    let mut mask = full;
    loop {
        order.push(last);
        let prev = parent[slot(mask, last)];
        mask &= !(1 << last);
        if prev == NO_PARENT {
            break;
        }
        last = usize::from(prev);
    }
    order.reverse();

    distances.stitch(&order)
}

/// Cheapest ordering of `rest` that starts at `current`.
///
/// Only steps to members that can still reach everything left over are
/// tried.
fn best_order_from(
    distances: &MemberDistances<'_>,
    current: usize,
    rest: &[usize],
) -> Option<(Vec<usize>, Cost)> {
    if rest.is_empty() {
        return Some((vec![current], Cost::START));
    }

    let mut best: Option<(Vec<usize>, Cost)> = None;
    for &next in rest {
        let step = distances.step(current, next);
        if !step.is_finite() {
            continue;
        }
        let remaining: Vec<usize> = rest.iter().copied().filter(|&m| m != next).collect();
        if !distances.reaches_all(next, remaining.iter().copied()) {
            continue;
        }
        let Some((tail, tail_cost)) = best_order_from(distances, next, &remaining) else {
            continue;
        };
        let total = step.then(tail_cost);
        if best.as_ref().map_or(true, |b| total.beats(b.1)) {
            let mut order = Vec::with_capacity(tail.len() + 1);
            order.push(current);
            order.extend(tail);
            best = Some((order, total));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_from(nodes: &[NodeId], edges: &[(NodeId, NodeId, f64)]) -> WeightedGraph {
        let mut graph = WeightedGraph::new();
        for &id in nodes {
            graph.add_node(id, None);
        }
        for &(src, dest, w) in edges {
            graph.add_edge(src, dest, w).unwrap();
        }
        graph
    }

    /// Sum of the shortest-path distances between consecutive requested nodes
    fn segment_sum(graph: &WeightedGraph, path: &[NodeId], requested: &[NodeId]) -> f64 {
        let order: Vec<NodeId> = path
            .iter()
            .copied()
            .filter(|id| requested.contains(id))
            .collect();
        order
            .windows(2)
            .map(|w| graph.shortest_path(w[0], w[1]).unwrap().0)
            .sum()
    }

    #[test]
    fn test_single_node() {
        let graph = graph_from(&[4], &[]);
        assert_eq!(graph.tsp(&[4]).unwrap(), (vec![4], 0.0));
        assert_eq!(graph.tsp_exhaustive(&[4]).unwrap(), (vec![4], 0.0));
    }

    #[test]
    fn test_empty_subset() {
        let graph = graph_from(&[0], &[]);
        let (path, distance) = graph.tsp(&[]).unwrap();
        assert!(path.is_empty());
        assert!(distance.is_infinite());
    }

    #[test]
    fn test_unknown_node() {
        let graph = graph_from(&[0, 1], &[(0, 1, 1.0)]);
        assert!(matches!(graph.tsp(&[0, 5]), Err(GraphError::NodeNotFound(5))));
    }

    #[test]
    fn test_pair_picks_cheaper_direction() {
        let graph = graph_from(&[0, 1], &[(0, 1, 5.0), (1, 0, 2.0)]);
        assert_eq!(graph.tsp(&[0, 1]).unwrap(), (vec![1, 0], 2.0));
    }

    #[test]
    fn test_pair_tie_keeps_requested_order() {
        let graph = graph_from(&[0, 1], &[(0, 1, 3.0), (1, 0, 3.0)]);
        assert_eq!(graph.tsp(&[1, 0]).unwrap(), (vec![1, 0], 3.0));
    }

    #[test]
    fn test_pair_through_connector() {
        let graph = graph_from(&[0, 1, 2], &[(0, 2, 1.0), (2, 1, 1.0)]);
        assert_eq!(graph.tsp(&[1, 0]).unwrap(), (vec![0, 2, 1], 2.0));
    }

    #[test]
    fn test_disconnected_subset() {
        let graph = graph_from(&[0, 1, 2], &[(0, 1, 1.0)]);

        let (path, distance) = graph.tsp(&[0, 2]).unwrap();
        assert!(path.is_empty());
        assert!(distance.is_infinite());

        let (path, distance) = graph.tsp(&[0, 1, 2]).unwrap();
        assert!(path.is_empty());
        assert!(distance.is_infinite());
    }

    #[test]
    fn test_line_requires_start_at_head() {
        let graph = graph_from(&[0, 1, 2, 3], &[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0)]);
        assert_eq!(graph.tsp(&[3, 1, 0, 2]).unwrap(), (vec![0, 1, 2, 3], 3.0));
    }

    #[test]
    fn test_uses_connectors_without_duplicating_junctions() {
        // hub 9 connects the requested nodes
        let mut graph = graph_from(&[1, 2, 3, 9], &[]);
        for leaf in [1, 2, 3] {
            graph.add_edge(leaf, 9, 1.0).unwrap();
            graph.add_edge(9, leaf, 1.0).unwrap();
        }

        let (path, distance) = graph.tsp(&[1, 2, 3]).unwrap();
        assert_eq!(distance, 4.0);
        assert_eq!(path.len(), 5);
        assert_eq!(path[1], 9);
        assert_eq!(path[3], 9);
        for id in [1, 2, 3] {
            assert_eq!(path.iter().filter(|&&n| n == id).count(), 1);
        }
    }

    #[test]
    fn test_distance_is_segment_sum() {
        let graph = graph_from(
            &[0, 1, 2, 3, 4],
            &[
                (0, 1, 2.0),
                (1, 2, 3.0),
                (2, 0, 1.0),
                (2, 3, 7.0),
                (3, 4, 1.0),
                (4, 0, 2.0),
                (1, 4, 9.0),
            ],
        );
        let requested = [0, 2, 3, 4];

        let (path, distance) = graph.tsp(&requested).unwrap();
        for id in requested {
            assert!(path.contains(&id), "{id} missing from {path:?}");
        }
        assert_eq!(distance, segment_sum(&graph, &path, &requested));
    }

    #[test]
    fn test_matches_exhaustive() {
        let graph = graph_from(
            &[0, 1, 2, 3, 4, 5],
            &[
                (0, 1, 4.0),
                (1, 0, 1.0),
                (1, 2, 2.0),
                (2, 3, 5.0),
                (3, 1, 1.0),
                (3, 4, 3.0),
                (4, 5, 2.0),
                (5, 0, 6.0),
                (2, 5, 8.0),
            ],
        );
        let requested = [0, 2, 3, 4, 5];

        let dp = graph.tsp(&requested).unwrap();
        let reference = graph.tsp_exhaustive(&requested).unwrap();
        assert_eq!(dp.1, reference.1);
        assert!(dp.1.is_finite());
    }

    #[test]
    fn test_equal_cost_prefers_order_without_revisits() {
        // 0 -> 2 runs through 1, and 2 -> 1 is free, so 0,2,1 ties with 0,1,2
        let graph = graph_from(&[0, 1, 2], &[(0, 1, 1.0), (1, 2, 1.0), (2, 1, 0.0)]);

        assert_eq!(graph.tsp(&[0, 1, 2]).unwrap(), (vec![0, 1, 2], 2.0));
        assert_eq!(graph.tsp(&[2, 1, 0]).unwrap(), (vec![0, 1, 2], 2.0));
        assert_eq!(graph.tsp_exhaustive(&[0, 1, 2]).unwrap(), (vec![0, 1, 2], 2.0));
    }

    #[test]
    fn test_unavoidable_revisit() {
        // every route from 2 to 3 goes back through 1
        let graph = graph_from(
            &[0, 1, 2, 3],
            &[(0, 1, 1.0), (1, 2, 1.0), (2, 1, 1.0), (1, 3, 1.0)],
        );

        let expected = (vec![0, 1, 2, 1, 3], 4.0);
        assert_eq!(graph.tsp(&[0, 1, 2, 3]).unwrap(), expected);
        assert_eq!(graph.tsp_exhaustive(&[0, 1, 2, 3]).unwrap(), expected);
    }

    #[test]
    fn test_limit_below_one_still_allows_single_node() {
        let graph = graph_from(&[5, 6], &[(5, 6, 1.0)]);

        assert_eq!(graph.tsp_with_limit(&[5], 0).unwrap(), (vec![5], 0.0));
        assert!(matches!(
            graph.tsp_with_limit(&[5, 6], 0),
            Err(GraphError::SubsetTooLarge { requested: 2, limit: 1 })
        ));
    }

    #[test]
    fn test_duplicates_collapse() {
        let graph = graph_from(&[0, 1, 2], &[(0, 1, 1.0), (1, 2, 1.0)]);
        assert_eq!(graph.tsp(&[0, 2, 0, 1]).unwrap(), (vec![0, 1, 2], 2.0));
    }

    #[test]
    fn test_subset_limit() {
        let ids: Vec<NodeId> = (0..5).collect();
        let graph = graph_from(&ids, &[]);

        assert!(matches!(
            graph.tsp_with_limit(&ids, 4),
            Err(GraphError::SubsetTooLarge { requested: 5, limit: 4 })
        ));
    }
}
