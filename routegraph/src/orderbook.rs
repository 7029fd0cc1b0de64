//! Construction of virtual order books: the books of every bounded-depth
//! path between two currencies combined into a single synthetic book, with
//! liquidity shared between routes counted only once.

mod candidate;
mod inventory;

use self::inventory::Inventory;
use crate::graph::{paths, PairGraph};
use crate::market::{Market, Side, Symbol};
use crate::num;
use crate::Limits;
use petgraph::graph::NodeIndex;
use std::cmp::Ordering;

/// Two virtual levels within this absolute price distance are considered
/// equal and merged into one.
const PRICE_MERGE_TOLERANCE: f64 = 1e-8;

/// A price level of a virtual order book, annotated with the physical
/// route that executes it and the level price consumed on each hop.
#[derive(Clone, Debug, PartialEq)]
pub struct VirtualLevel {
    /// The composite price: the product of the per-hop level prices.
    pub price: f64,
    /// The quantity available at this price.
    pub amount: f64,
    /// The physical traversal order of the route. For bids this is the
    /// enumerated base -> quote path; for asks it is the reverse, since an
    /// ask execution consumes the quote side moving backwards along the
    /// chain.
    pub route: Vec<Symbol>,
    /// The price of the level consumed on each hop, in enumerated path
    /// order.
    pub level_prices: Vec<f64>,
}

/// A synthetic order book for a market combining direct and multi-hop
/// liquidity.
///
/// Asks ascend in price and bids descend; no two adjacent levels share a
/// price within the merge tolerance.
#[derive(Clone, Debug, PartialEq)]
pub struct VirtualOrderbook {
    /// The base or transaction currency.
    pub base: Symbol,
    /// The quote or counter currency.
    pub quote: Symbol,
    /// Levels acquiring the base currency, cheapest composite price first.
    pub asks: Vec<VirtualLevel>,
    /// Levels disposing of the base currency, best composite price first.
    pub bids: Vec<VirtualLevel>,
}

/// Builds the virtual order book for a market over a pair graph.
pub(crate) fn build(graph: &PairGraph, market: &Market, limits: &Limits) -> VirtualOrderbook {
    let paths = match (graph.node(&market.base), graph.node(&market.quote)) {
        (Some(start), Some(end)) => paths::simple_paths(graph, start, end, limits.max_path_len),
        _ => Vec::new(),
    };
    log::debug!(
        "found {} paths for {}->{}",
        paths.len(),
        market.base,
        market.quote,
    );

    VirtualOrderbook {
        base: market.base.clone(),
        quote: market.quote.clone(),
        asks: build_side(graph, &paths, Side::Ask),
        bids: build_side(graph, &paths, Side::Bid),
    }
}

/// Builds one side of the virtual book: enumerate candidates over all
/// paths, assign them liquidity greedily by best composite price against a
/// single shared inventory, then finalize.
fn build_side(graph: &PairGraph, paths: &[Vec<NodeIndex>], side: Side) -> Vec<VirtualLevel> {
    let mut candidates = Vec::new();
    for (index, path) in paths.iter().enumerate() {
        candidate::enumerate_path(graph, index, path, side, &mut candidates);
    }

    // NOTE: The sort must be stable so that equal-priced candidates keep
    // their insertion order, making the greedy assignment deterministic.
    candidates.sort_by(|a, b| compare_prices(a.final_price, b.final_price, side));

    let mut inventory = Inventory::from_candidates(graph, side, &candidates);
    let mut levels = Vec::new();
    for candidate in &candidates {
        let volume = inventory.usable_volume(candidate);
        if volume <= 0.0 {
            continue;
        }
        inventory.consume(candidate, volume);

        levels.push(VirtualLevel {
            price: candidate.final_price,
            amount: volume,
            route: route_symbols(graph, &paths[candidate.path], side),
            level_prices: candidate.prices.clone(),
        });
    }

    finalize(levels, side)
}

/// Compares composite prices best-first for a side: ascending for asks,
/// descending for bids.
fn compare_prices(a: f64, b: f64, side: Side) -> Ordering {
    match side {
        Side::Ask => num::compare(a, b),
        Side::Bid => num::compare(b, a),
    }
}

/// Returns the physical route for a path on a side, per the orientation
/// documented on [`VirtualLevel::route`].
fn route_symbols(graph: &PairGraph, path: &[NodeIndex], side: Side) -> Vec<Symbol> {
    let mut route = path
        .iter()
        .map(|&node| graph.symbol(node).clone())
        .collect::<Vec<_>>();
    if side == Side::Ask {
        route.reverse();
    }
    route
}

/// Sorts one side of the book best-first and merges adjacent equal-priced
/// levels. The first level of a merged run keeps its route and level
/// prices.
fn finalize(mut levels: Vec<VirtualLevel>, side: Side) -> Vec<VirtualLevel> {
    levels.sort_by(|a, b| compare_prices(a.price, b.price, side));

    let mut merged: Vec<VirtualLevel> = Vec::with_capacity(levels.len());
    for level in levels {
        match merged.last_mut() {
            Some(current) if (level.price - current.price).abs() < PRICE_MERGE_TOLERANCE => {
                current.amount += level.amount;
            }
            _ => merged.push(level),
        }
    }
    merged
}
