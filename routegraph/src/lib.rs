//! Computation of multi-hop trade execution routes over a graph of trading
//! pairs with finite order-book depth.
//!
//! A [`Routegraph`] is built once from a collection of trading pairs. For a
//! given market it synthesizes a *virtual order book*: the combination of
//! every acyclic trading path between the two currencies within a bounded
//! depth, where liquidity shared by overlapping routes is counted only once.
//! Executing a trade size against the virtual book yields the best-priced
//! sequence of fills together with the physical routes to place them over.


mod execution;
mod graph;
mod market;
mod num;
mod orderbook;

pub use crate::execution::{Execution, Fill, TradePlan};
pub use crate::market::{InvalidSymbol, Level, Market, Side, Symbol, TradingPair};
pub use crate::orderbook::{VirtualLevel, VirtualOrderbook};

use crate::graph::PairGraph;

/// Hard bounds on the size of the route search.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Limits {
    /// The maximum number of levels kept per side of each input pair.
    ///
    /// The cap is applied before reverse-edge construction, so a reverse
    /// book sees at most this many forward levels.
    pub max_levels_per_pair: usize,
    /// The maximum number of currencies on a single path, counting both
    /// endpoints.
    pub max_path_len: usize,
}

impl Limits {
    /// The default per-pair level cap.
    pub const DEFAULT_LEVELS_PER_PAIR: usize = 5;
    /// The default bound on currencies per path.
    pub const DEFAULT_PATH_LEN: usize = 5;
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_levels_per_pair: Limits::DEFAULT_LEVELS_PER_PAIR,
            max_path_len: Limits::DEFAULT_PATH_LEN,
        }
    }
}

/// API entry point for computing virtual order books and trade executions
/// over a set of trading pairs.
#[derive(Clone, Debug)]
pub struct Routegraph {
    graph: PairGraph,
    limits: Limits,
}

impl Routegraph {
    /// Creates a new `Routegraph` instance from an iterator of trading
    /// pairs using the default limits.
    pub fn new(pairs: impl IntoIterator<Item = TradingPair>) -> Self {
        Routegraph::with_limits(pairs, Limits::default())
    }

    /// Creates a new `Routegraph` instance with explicit limits.
    ///
    /// The level cap is applied while the graph is built, the path bound
    /// while paths are enumerated.
    pub fn with_limits(pairs: impl IntoIterator<Item = TradingPair>, limits: Limits) -> Self {
        Routegraph {
            graph: PairGraph::from_pairs(pairs, &limits),
            limits,
        }
    }

    /// Computes the virtual order book for a market by combining the books
    /// of every acyclic path from base to quote within the configured
    /// bounds.
    ///
    /// A market whose base or quote is referenced by no input pair yields
    /// an empty book.
    pub fn virtual_orderbook(&self, market: &Market) -> VirtualOrderbook {
        orderbook::build(&self.graph, market, &self.limits)
    }

    /// Builds the virtual order book for a market and executes `amount`
    /// base units against both of its sides.
    pub fn plan_trade(&self, market: &Market, amount: f64) -> TradePlan {
        self.virtual_orderbook(market).execute(amount)
    }
}
