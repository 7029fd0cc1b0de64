//! A directed graph of trading pairs where currencies are vertices and
//! order books are edge data.
//!
//! Every input pair contributes a forward edge carrying its own books and a
//! synthetic reverse edge carrying the inverted books, so that paths can
//! traverse any pair in either direction.

pub mod paths;

use crate::market::{Level, Side, Symbol, TradingPair};
use crate::Limits;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use std::collections::HashMap;

/// The pair of level lists stored on one directed edge. For the edge
/// `from -> to` the books are expressed with `from` as the base currency and
/// `to` as the quote.
#[derive(Clone, Debug, Default)]
pub struct EdgeBook {
    /// Offers selling the edge base for the edge quote.
    pub asks: Vec<Level>,
    /// Offers buying the edge base with the edge quote.
    pub bids: Vec<Level>,
}

impl EdgeBook {
    /// Returns the ordered level list for one side of the book.
    pub fn side(&self, side: Side) -> &[Level] {
        match side {
            Side::Ask => &self.asks,
            Side::Bid => &self.bids,
        }
    }
}

/// A graph of currencies connected by order-book edges.
#[derive(Clone, Debug)]
pub struct PairGraph {
    /// Currencies as nodes, directed order books as edges.
    graph: DiGraph<Symbol, EdgeBook>,
    /// Interning map from currency symbol to its node.
    nodes: HashMap<Symbol, NodeIndex>,
}

impl PairGraph {
    /// Builds the graph from input pairs, truncating each book to the
    /// per-pair level cap before constructing the reverse edge.
    ///
    /// Later duplicates of the same (base, quote) pair replace earlier
    /// ones, reverse edge included.
    pub fn from_pairs(pairs: impl IntoIterator<Item = TradingPair>, limits: &Limits) -> Self {
        let mut result = PairGraph {
            graph: DiGraph::new(),
            nodes: HashMap::new(),
        };

        for pair in pairs {
            let TradingPair {
                base,
                quote,
                mut asks,
                mut bids,
            } = pair;
            asks.truncate(limits.max_levels_per_pair);
            bids.truncate(limits.max_levels_per_pair);

            let reverse = EdgeBook {
                asks: invert_levels(&bids),
                bids: invert_levels(&asks),
            };
            let forward = EdgeBook { asks, bids };

            let base = result.ensure_node(base);
            let quote = result.ensure_node(quote);
            result.graph.update_edge(base, quote, forward);
            result.graph.update_edge(quote, base, reverse);
        }

        log::debug!(
            "built pair graph with {} currencies and {} directed edges",
            result.graph.node_count(),
            result.graph.edge_count(),
        );

        result
    }

    /// Returns the node for a currency symbol, inserting it first if no
    /// pair has referenced it yet.
    fn ensure_node(&mut self, symbol: Symbol) -> NodeIndex {
        match self.nodes.get(&symbol) {
            Some(&node) => node,
            None => {
                let node = self.graph.add_node(symbol.clone());
                self.nodes.insert(symbol, node);
                node
            }
        }
    }

    /// Returns the node for a currency, or `None` if no pair references it.
    pub fn node(&self, symbol: &Symbol) -> Option<NodeIndex> {
        self.nodes.get(symbol).copied()
    }

    /// Returns the symbol stored at a node.
    pub fn symbol(&self, node: NodeIndex) -> &Symbol {
        &self.graph[node]
    }

    /// Returns the edge and its book between two currencies, or `None` when
    /// they are not directly connected.
    pub fn edge(&self, from: NodeIndex, to: NodeIndex) -> Option<(EdgeIndex, &EdgeBook)> {
        let edge = self.graph.find_edge(from, to)?;
        Some((edge, &self.graph[edge]))
    }

    /// Returns the book stored on an edge.
    pub fn book(&self, edge: EdgeIndex) -> &EdgeBook {
        &self.graph[edge]
    }

    /// Returns an iterator over the currencies directly reachable from a
    /// node.
    pub fn neighbors(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(node)
    }

    /// Returns the number of currencies in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }
}

/// Inverts a level list into the reverse pair's unit, dropping levels whose
/// price cannot be inverted.
fn invert_levels(levels: &[Level]) -> Vec<Level> {
    levels.iter().filter_map(|level| level.inverted()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::prelude::*;

    fn graph(pairs: Vec<TradingPair>) -> PairGraph {
        PairGraph::from_pairs(pairs, &Limits::default())
    }

    #[test]
    fn stores_forward_and_reverse_edges() {
        let graph = graph(trading_pairs! {
            "ETH"/"USDT" {
                asks [(40.0, 10.0)]
                bids [(30.0, 10.0), (20.0, 15.0)]
            }
        });

        let eth = graph.node(&symbol("ETH")).unwrap();
        let usdt = graph.node(&symbol("USDT")).unwrap();

        let (_, forward) = graph.edge(eth, usdt).unwrap();
        assert_eq!(forward.asks.len(), 1);
        assert_eq!(forward.bids.len(), 2);

        let (_, reverse) = graph.edge(usdt, eth).unwrap();
        assert_eq!(reverse.asks.len(), 2);
        assert_approx_eq!(reverse.asks[0].price, 1.0 / 30.0);
        assert_approx_eq!(reverse.asks[0].amount, 300.0);
        assert_approx_eq!(reverse.asks[1].price, 1.0 / 20.0);
        assert_approx_eq!(reverse.asks[1].amount, 300.0);
        assert_eq!(reverse.bids.len(), 1);
        assert_approx_eq!(reverse.bids[0].price, 1.0 / 40.0);
        assert_approx_eq!(reverse.bids[0].amount, 400.0);
    }

    #[test]
    fn caps_levels_before_inverting() {
        let pairs = vec![TradingPair {
            base: symbol("KNC"),
            quote: symbol("USDT"),
            asks: (1..=10)
                .map(|i| Level {
                    price: i as f64,
                    amount: 10.0,
                })
                .collect(),
            bids: Vec::new(),
        }];
        let graph = graph(pairs);

        let knc = graph.node(&symbol("KNC")).unwrap();
        let usdt = graph.node(&symbol("USDT")).unwrap();

        let (_, forward) = graph.edge(knc, usdt).unwrap();
        assert_eq!(forward.asks.len(), 5);
        assert_approx_eq!(forward.asks[4].price, 5.0);

        let (_, reverse) = graph.edge(usdt, knc).unwrap();
        assert_eq!(reverse.bids.len(), 5);
        assert_approx_eq!(reverse.bids[4].price, 0.2);
        assert_approx_eq!(reverse.bids[4].amount, 50.0);
    }

    #[test]
    fn drops_zero_price_levels_from_reverse_books() {
        let graph = graph(trading_pairs! {
            "KNC"/"USDT" {
                asks [(1.0, 200.0)]
                bids [(0.0, 100.0), (0.8, 300.0)]
            }
        });

        let usdt = graph.node(&symbol("USDT")).unwrap();
        let knc = graph.node(&symbol("KNC")).unwrap();

        let (_, reverse) = graph.edge(usdt, knc).unwrap();
        assert_eq!(reverse.asks.len(), 1);
        assert_approx_eq!(reverse.asks[0].price, 1.25);
    }

    #[test]
    fn last_duplicate_pair_wins() {
        let graph = graph(trading_pairs! {
            "KNC"/"USDT" {
                asks [(1.0, 200.0)]
                bids []
            }
            "KNC"/"USDT" {
                asks [(2.0, 50.0)]
                bids []
            }
        });

        let knc = graph.node(&symbol("KNC")).unwrap();
        let usdt = graph.node(&symbol("USDT")).unwrap();

        let (_, forward) = graph.edge(knc, usdt).unwrap();
        assert_eq!(forward.asks.len(), 1);
        assert_approx_eq!(forward.asks[0].price, 2.0);

        let (_, reverse) = graph.edge(usdt, knc).unwrap();
        assert_eq!(reverse.bids.len(), 1);
        assert_approx_eq!(reverse.bids[0].price, 0.5);
    }

    #[test]
    fn has_no_self_edges() {
        let graph = graph(trading_pairs! {
            "KNC"/"USDT" {
                asks [(1.0, 200.0)]
                bids [(0.9, 100.0)]
            }
        });

        let knc = graph.node(&symbol("KNC")).unwrap();
        assert!(graph.edge(knc, knc).is_none());
    }
}
