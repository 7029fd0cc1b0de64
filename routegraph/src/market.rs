//! Module containing the input market data model: currency symbols, order
//! book levels and trading pairs as supplied by the caller.

use crate::num;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A currency symbol consisting of one or more uppercase ASCII letters.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a new symbol, verifying that it is composed entirely of
    /// uppercase ASCII letters.
    pub fn new(symbol: impl Into<String>) -> Result<Self, InvalidSymbol> {
        let symbol = symbol.into();
        if !symbol.is_empty() && symbol.bytes().all(|byte| byte.is_ascii_uppercase()) {
            Ok(Symbol(symbol))
        } else {
            Err(InvalidSymbol(symbol))
        }
    }

    /// Returns the symbol as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Symbol {
    type Err = InvalidSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symbol::new(s)
    }
}

/// An error indicating a currency code that is not one or more uppercase
/// ASCII letters.
#[derive(Clone, Debug, Error)]
#[error("invalid currency symbol {0:?}")]
pub struct InvalidSymbol(pub String);

/// The side of an order book.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Side {
    /// Offers selling the base currency for the quote currency.
    Ask,
    /// Offers buying the base currency with the quote currency.
    Bid,
}

/// A single price level of an order book.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Level {
    /// The price of one unit of the base currency expressed in the quote
    /// currency.
    pub price: f64,
    /// The quantity available at this price, in the base currency.
    pub amount: f64,
}

impl Level {
    /// Returns this level as seen from the reverse pair: the price inverted
    /// and the quantity rescaled into the reverse base unit.
    ///
    /// Returns `None` for prices outside `(0, +∞)`, which cannot be
    /// inverted.
    pub fn inverted(self) -> Option<Level> {
        if num::is_strictly_positive_and_finite(self.price) {
            Some(Level {
                price: 1.0 / self.price,
                amount: self.amount * self.price,
            })
        } else {
            None
        }
    }
}

/// An order book for a pair of currencies as supplied by the caller.
///
/// Level order is preserved verbatim; the engine does not resort input
/// books and only ever truncates them to the configured per-pair cap.
#[derive(Clone, Debug, PartialEq)]
pub struct TradingPair {
    /// The transaction currency.
    pub base: Symbol,
    /// The counter currency prices are expressed in.
    pub quote: Symbol,
    /// Offers selling base for quote.
    pub asks: Vec<Level>,
    /// Offers buying base with quote.
    pub bids: Vec<Level>,
}

/// A market to build a virtual order book for.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Market {
    /// The base or transaction currency.
    pub base: Symbol,
    /// The quote or counter currency prices are expressed in.
    pub quote: Symbol,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::prelude::*;

    #[test]
    fn symbol_requires_uppercase_ascii() {
        assert!("ETH".parse::<Symbol>().is_ok());
        assert!("A".parse::<Symbol>().is_ok());

        for invalid in &["", "eth", "ET1", "ET-H", "ÉTH", "ETH "] {
            assert!(invalid.parse::<Symbol>().is_err(), "accepted {:?}", invalid);
        }
    }

    #[test]
    fn inverts_level_into_reverse_base_unit() {
        let level = Level {
            price: 30.0,
            amount: 10.0,
        };
        let inverted = level.inverted().unwrap();

        assert_approx_eq!(inverted.price, 1.0 / 30.0);
        assert_approx_eq!(inverted.amount, 300.0);
    }

    #[test]
    fn drops_non_positive_prices_on_inversion() {
        for price in &[0.0, -1.5] {
            let level = Level {
                price: *price,
                amount: 10.0,
            };
            assert_eq!(level.inverted(), None);
        }
    }

    #[test]
    fn double_inversion_round_trips() {
        for &(price, amount) in &[(0.0031, 400.0), (37.5, 0.125), (1e-6, 1e9)] {
            let level = Level { price, amount };
            let round_tripped = level.inverted().unwrap().inverted().unwrap();

            assert_approx_eq!(round_tripped.price, price, price * 1e-9);
            assert_approx_eq!(round_tripped.amount, amount, amount * 1e-9);
        }
    }
}
