// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
#![no_main]

use arbitrary::Arbitrary;
use graphyard::WeightedGraph;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    nodes: u8,
    edges: Vec<(u8, u8, u16)>,
    tour: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let n = i64::from(input.nodes % 12);
    let mut graph = WeightedGraph::new();
    for id in 0..n {
        graph.add_node(id, None);
    }
    for (src, dest, w) in input.edges {
        let _ = graph.add_edge(i64::from(src), i64::from(dest), f64::from(w));
    }

    let (center, _) = graph.center();
    assert_eq!(center.is_some(), graph.is_strongly_connected() && n > 0);

    let tour: Vec<i64> = input.tour.iter().take(6).map(|&id| i64::from(id)).collect();
    if let (Ok(dp), Ok(reference)) = (graph.tsp(&tour), graph.tsp_exhaustive(&tour)) {
        assert_eq!(dp.1, reference.1);
    }
});
