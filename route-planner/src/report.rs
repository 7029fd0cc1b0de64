//! Human-readable rendering of virtual order books and trade executions.

use routegraph::{Execution, Symbol, TradePlan, VirtualLevel, VirtualOrderbook};

/// Formats a route as `A->B->C`.
pub fn format_route(route: &[Symbol]) -> String {
    route
        .iter()
        .map(Symbol::as_str)
        .collect::<Vec<_>>()
        .join("->")
}

/// Renders one executed test case: the virtual order book followed by the
/// ask and bid fill lists and their effective prices.
pub fn render(amount: f64, book: &VirtualOrderbook, plan: &TradePlan) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Virtual orderbook {}/{}\n",
        book.base, book.quote,
    ));
    push_levels(&mut out, "ASKS", &book.asks);
    push_levels(&mut out, "BIDS", &book.bids);

    out.push_str(&format!("Executing {} {}\n", amount, book.base));
    push_execution(&mut out, "ASK", &plan.ask);
    push_execution(&mut out, "BID", &plan.bid);
    out.push_str("---\n");

    out
}

fn push_levels(out: &mut String, label: &str, levels: &[VirtualLevel]) {
    out.push_str(&format!("{} ({}):\n", label, levels.len()));
    for level in levels {
        out.push_str(&format!(
            "  {:.8} {:.8} ({}) [{}]\n",
            level.price,
            level.amount,
            format_route(&level.route),
            format_prices(&level.level_prices),
        ));
    }
}

fn push_execution(out: &mut String, label: &str, execution: &Execution) {
    out.push_str(&format!("{} fills:\n", label));
    if execution.fills.is_empty() {
        out.push_str("  NO_ROUTE\n");
    } else {
        for (index, fill) in execution.fills.iter().enumerate() {
            out.push_str(&format!(
                "  {}. {} price {:.8} amount {:.8} [{}]\n",
                index + 1,
                format_route(&fill.route),
                fill.price,
                fill.amount,
                format_prices(&fill.level_prices),
            ));
        }
        if execution.is_partial() {
            out.push_str(&format!(
                "  (partial: {:.8} of {:.8} filled)\n",
                execution.executed, execution.requested,
            ));
        }
    }
    match execution.effective_price() {
        Some(price) => out.push_str(&format!("{} effective price: {:.8}\n", label, price)),
        None => out.push_str(&format!("{} effective price: -\n", label)),
    }
}

fn format_prices(prices: &[f64]) -> String {
    prices
        .iter()
        .map(|price| format!("{:.8}", price))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use routegraph::{Market, Routegraph};

    fn symbol(code: &str) -> Symbol {
        code.parse().unwrap()
    }

    #[test]
    fn formats_routes_with_arrows() {
        let route = vec![symbol("ETH"), symbol("USDT"), symbol("KNC")];
        assert_eq!(format_route(&route), "ETH->USDT->KNC");
    }

    #[test]
    fn renders_fills_and_marks_missing_routes() {
        let routegraph = Routegraph::new(vec![routegraph::TradingPair {
            base: symbol("KNC"),
            quote: symbol("ETH"),
            asks: vec![routegraph::Level {
                price: 0.0031,
                amount: 400.0,
            }],
            bids: Vec::new(),
        }]);
        let market = Market {
            base: symbol("KNC"),
            quote: symbol("ETH"),
        };
        let book = routegraph.virtual_orderbook(&market);
        let rendered = render(300.0, &book, &book.execute(300.0));

        assert!(rendered.contains("Virtual orderbook KNC/ETH"));
        assert!(rendered.contains("1. ETH->KNC price 0.00310000 amount 300.00000000"));
        assert!(rendered.contains("ASK effective price: 0.00310000"));
        assert!(rendered.contains("BID fills:\n  NO_ROUTE"));
        assert!(rendered.contains("BID effective price: -"));
    }

    #[test]
    fn marks_partial_fills() {
        let routegraph = Routegraph::new(vec![routegraph::TradingPair {
            base: symbol("KNC"),
            quote: symbol("ETH"),
            asks: vec![routegraph::Level {
                price: 0.0031,
                amount: 400.0,
            }],
            bids: Vec::new(),
        }]);
        let market = Market {
            base: symbol("KNC"),
            quote: symbol("ETH"),
        };
        let book = routegraph.virtual_orderbook(&market);
        let rendered = render(1000.0, &book, &book.execute(1000.0));

        assert!(rendered.contains("(partial: 400.00000000 of 1000.00000000 filled)"));
    }
}
