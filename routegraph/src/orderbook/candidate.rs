//! Route candidates: every combination of one book level per hop along an
//! enumerated path.

use crate::graph::PairGraph;
use crate::market::{Level, Side};
use crate::num;
use petgraph::graph::{EdgeIndex, NodeIndex};

/// A single level of a specific directed edge, the atomic unit of
/// liquidity shared between routes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct EdgeLevel {
    /// The directed edge the level belongs to.
    pub edge: EdgeIndex,
    /// The position of the level in the edge's level list.
    pub level: usize,
}

/// One combination of level choices along a path.
#[derive(Clone, Debug)]
pub struct RouteCandidate {
    /// The index of the enumerated path this candidate belongs to.
    pub path: usize,
    /// The chosen level price for each hop, in path order.
    pub prices: Vec<f64>,
    /// The edge level consumed on each hop, in path order.
    pub levels: Vec<EdgeLevel>,
    /// The composite price: the product of the per-hop prices.
    pub final_price: f64,
    /// The volume the candidate could carry at creation time: the minimum
    /// quantity over its chosen levels. Quantities are taken as-is per hop;
    /// the shared inventory uses the same per-edge-level units.
    pub max_volume: f64,
}

/// Appends all route candidates for one path on one side to `out`.
///
/// A path with fewer than two currencies, a missing edge, or an empty book
/// side on any hop produces no candidates. Candidates with a non-finite
/// composite price or without positive volume are dropped.
pub fn enumerate_path(
    graph: &PairGraph,
    path_index: usize,
    path: &[NodeIndex],
    side: Side,
    out: &mut Vec<RouteCandidate>,
) {
    if path.len() < 2 {
        return;
    }

    let mut hops: Vec<(EdgeIndex, &[Level])> = Vec::with_capacity(path.len() - 1);
    for hop in path.windows(2) {
        match graph.edge(hop[0], hop[1]) {
            Some((edge, book)) => hops.push((edge, book.side(side))),
            None => return,
        }
    }
    if hops.iter().any(|(_, levels)| levels.is_empty()) {
        return;
    }

    // Walk the Cartesian product of level choices with one index per hop.
    let mut choice = vec![0; hops.len()];
    loop {
        let mut prices = Vec::with_capacity(hops.len());
        let mut levels = Vec::with_capacity(hops.len());
        let mut final_price = 1.0;
        let mut max_volume = f64::INFINITY;
        for (&(edge, hop_levels), &index) in hops.iter().zip(&choice) {
            let level = hop_levels[index];
            prices.push(level.price);
            levels.push(EdgeLevel { edge, level: index });
            final_price *= level.price;
            max_volume = num::min(max_volume, level.amount);
        }

        if final_price.is_finite() && max_volume > 0.0 {
            out.push(RouteCandidate {
                path: path_index,
                prices,
                levels,
                final_price,
                max_volume,
            });
        }

        let mut hop = hops.len();
        loop {
            if hop == 0 {
                return;
            }
            hop -= 1;
            choice[hop] += 1;
            if choice[hop] < hops[hop].1.len() {
                break;
            }
            choice[hop] = 0;
        }
    }
}
