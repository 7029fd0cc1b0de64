//! Walking a virtual order book to satisfy a requested trade size.

use crate::market::Symbol;
use crate::num;
use crate::orderbook::{VirtualLevel, VirtualOrderbook};

/// A slice of a virtual level consumed by an execution.
#[derive(Clone, Debug, PartialEq)]
pub struct Fill {
    /// The physical route the fill executes over.
    pub route: Vec<Symbol>,
    /// The composite price paid per base unit.
    pub price: f64,
    /// The consumed quantity in base units.
    pub amount: f64,
    /// The price of the level consumed on each hop.
    pub level_prices: Vec<f64>,
}

/// The result of walking one side of a virtual order book.
#[derive(Clone, Debug, PartialEq)]
pub struct Execution {
    /// The requested trade size in base units.
    pub requested: f64,
    /// The fills in consumption order, best price first.
    pub fills: Vec<Fill>,
    /// The total executed quantity in base units.
    pub executed: f64,
    /// The total quote amount paid or received over all fills.
    pub cost: f64,
}

impl Execution {
    /// Returns the volume-weighted price over all fills, or `None` when
    /// nothing was executed.
    pub fn effective_price(&self) -> Option<f64> {
        if self.executed > 0.0 {
            Some(self.cost / self.executed)
        } else {
            None
        }
    }

    /// Returns the requested quantity the book could not satisfy.
    pub fn shortfall(&self) -> f64 {
        (self.requested - self.executed).max(0.0)
    }

    /// Returns `true` when the book could not satisfy the full request.
    pub fn is_partial(&self) -> bool {
        self.shortfall() > 0.0
    }
}

/// The paired ask and bid executions answering a single trade request.
#[derive(Clone, Debug, PartialEq)]
pub struct TradePlan {
    /// Acquiring the base currency by spending the quote currency.
    pub ask: Execution,
    /// Disposing of the base currency to obtain the quote currency.
    pub bid: Execution,
}

impl VirtualOrderbook {
    /// Executes a trade of `amount` base units against both sides of the
    /// book.
    ///
    /// Partial fills are valid results, not errors: when the book holds
    /// less liquidity than requested the returned executions simply fall
    /// short of the target.
    pub fn execute(&self, amount: f64) -> TradePlan {
        TradePlan {
            ask: fill_levels(&self.asks, amount),
            bid: fill_levels(&self.bids, amount),
        }
    }
}

/// Walks an ordered level list best-first, consuming up to `target` base
/// units.
fn fill_levels(levels: &[VirtualLevel], target: f64) -> Execution {
    let mut fills = Vec::new();
    let mut executed = 0.0;
    let mut cost = 0.0;
    let mut remaining = target;

    for level in levels {
        if remaining <= 0.0 {
            break;
        }

        let amount = num::min(remaining, level.amount);
        fills.push(Fill {
            route: level.route.clone(),
            price: level.price,
            amount,
            level_prices: level.level_prices.clone(),
        });
        executed += amount;
        cost += amount * level.price;
        remaining -= amount;
    }

    Execution {
        requested: target,
        fills,
        executed,
        cost,
    }
}
