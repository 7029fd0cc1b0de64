//! Splitting and parsing of textual test case files.
//!
//! A case starts with a `<BASE> <QUOTE> <AMOUNT>` header line, followed by
//! a pair count and, per pair, a `<base> <quote>` line and the two level
//! lists, each prefixed with its count:
//!
//! ```text
//! KNC ETH 300
//! 2
//! KNC USDT
//! 2
//! 1.0 200
//! 1.4 400
//! 2
//! 0.9 100
//! 0.8 300
//! ETH USDT
//! ...
//! ```
//!
//! Comment lines starting with `#` and blank lines are skipped everywhere.

use anyhow::{anyhow, ensure, Context, Result};
use routegraph::{Level, Market, Symbol, TradingPair};

/// A single parsed test case: the market and size to route, and the input
/// pairs to route over.
#[derive(Clone, Debug, PartialEq)]
pub struct TestCase {
    /// The market to build the virtual book for.
    pub market: Market,
    /// The trade size in base units.
    pub amount: f64,
    /// The input order books.
    pub pairs: Vec<TradingPair>,
}

/// Returns `true` for a `<BASE> <QUOTE> <AMOUNT>` case header line: exactly
/// three whitespace-separated fields where the first two are valid currency
/// symbols and the third parses as a number.
fn is_case_header(line: &str) -> bool {
    let fields = line.split_whitespace().collect::<Vec<_>>();
    fields.len() == 3
        && fields[0].parse::<Symbol>().is_ok()
        && fields[1].parse::<Symbol>().is_ok()
        && fields[2].parse::<f64>().is_ok()
}

/// Splits an input file into one block per test case, dropping comments
/// and blank lines. Content before the first header forms a block of its
/// own so that it surfaces as a parse diagnostic instead of disappearing
/// silently.
pub fn split_cases(input: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current = String::new();

    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if is_case_header(line) && !current.is_empty() {
            blocks.push(std::mem::take(&mut current));
        }
        current.push_str(line);
        current.push('\n');
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

/// Parses one case block into a [`TestCase`].
pub fn parse_case(block: &str) -> Result<TestCase> {
    let mut lines = block.lines();

    let header = lines.next().ok_or_else(|| anyhow!("empty test case"))?;
    let (market, amount) = parse_case_header(header)?;

    let pair_count = lines
        .next()
        .ok_or_else(|| anyhow!("missing pair count"))?
        .trim()
        .parse::<usize>()
        .context("invalid pair count")?;

    let mut pairs = Vec::with_capacity(pair_count);
    for index in 0..pair_count {
        let pair = parse_pair(&mut lines).with_context(|| format!("pair {}", index + 1))?;
        pairs.push(pair);
    }

    Ok(TestCase {
        market,
        amount,
        pairs,
    })
}

fn parse_case_header(line: &str) -> Result<(Market, f64)> {
    let fields = line.split_whitespace().collect::<Vec<_>>();
    ensure!(
        fields.len() == 3,
        "case header expected '<BASE> <QUOTE> <AMOUNT>', got {:?}",
        line,
    );

    let base = fields[0].parse::<Symbol>()?;
    let quote = fields[1].parse::<Symbol>()?;
    let amount = fields[2]
        .parse::<f64>()
        .with_context(|| format!("invalid trade amount {:?}", fields[2]))?;
    ensure!(amount.is_finite(), "trade amount must be finite");

    Ok((Market { base, quote }, amount))
}

fn parse_pair<'a>(lines: &mut impl Iterator<Item = &'a str>) -> Result<TradingPair> {
    let header = lines.next().ok_or_else(|| anyhow!("missing pair header"))?;
    let fields = header.split_whitespace().collect::<Vec<_>>();
    ensure!(
        fields.len() == 2,
        "pair header expected '<base> <quote>', got {:?}",
        header,
    );

    let base = fields[0].parse::<Symbol>()?;
    let quote = fields[1].parse::<Symbol>()?;
    let asks = parse_levels(lines, "ask")?;
    let bids = parse_levels(lines, "bid")?;

    Ok(TradingPair {
        base,
        quote,
        asks,
        bids,
    })
}

fn parse_levels<'a>(lines: &mut impl Iterator<Item = &'a str>, side: &str) -> Result<Vec<Level>> {
    let count = lines
        .next()
        .ok_or_else(|| anyhow!("missing {} level count", side))?
        .trim()
        .parse::<usize>()
        .with_context(|| format!("invalid {} level count", side))?;

    let mut levels = Vec::with_capacity(count);
    for index in 0..count {
        let line = lines
            .next()
            .ok_or_else(|| anyhow!("missing {} level {}", side, index + 1))?;
        let fields = line.split_whitespace().collect::<Vec<_>>();
        ensure!(
            fields.len() == 2,
            "{} level expected '<price> <amount>', got {:?}",
            side,
            line,
        );

        let price = fields[0]
            .parse::<f64>()
            .with_context(|| format!("invalid {} price {:?}", side, fields[0]))?;
        let amount = fields[1]
            .parse::<f64>()
            .with_context(|| format!("invalid {} amount {:?}", side, fields[1]))?;
        ensure!(
            price.is_finite() && amount.is_finite(),
            "{} level values must be finite",
            side,
        );

        levels.push(Level { price, amount });
    }

    Ok(levels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(code: &str) -> Symbol {
        code.parse().unwrap()
    }

    #[test]
    fn recognizes_case_headers() {
        assert!(is_case_header("KNC ETH 300"));
        assert!(is_case_header("KNC ETH 0.5"));

        assert!(!is_case_header("KNC ETH"));
        assert!(!is_case_header("KNC USDT ETH"));
        assert!(!is_case_header("knc ETH 300"));
        assert!(!is_case_header("1.0 200 300"));
    }

    #[test]
    fn splits_cases_and_skips_comments() {
        let input = "\
# leading comment
KNC ETH 300
1

KNC ETH
1
0.0031 400
0
# trailing comment
BTC USDT 2
0
";
        let blocks = split_cases(input);
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].starts_with("KNC ETH 300"));
        assert!(blocks[1].starts_with("BTC USDT 2"));
    }

    #[test]
    fn junk_before_the_first_header_forms_its_own_block() {
        let blocks = split_cases("stray line\nKNC ETH 300\n1\n");
        assert_eq!(blocks.len(), 2);
        assert!(parse_case(&blocks[0]).is_err());
    }

    #[test]
    fn parses_a_complete_case() {
        let block = "\
KNC ETH 300
2
KNC USDT
2
1.0 200
1.4 400
2
0.9 100
0.8 300
ETH USDT
1
40 10
2
30 10
20 15
";
        let case = parse_case(block).unwrap();

        assert_eq!(case.market.base, symbol("KNC"));
        assert_eq!(case.market.quote, symbol("ETH"));
        assert_eq!(case.amount, 300.0);
        assert_eq!(case.pairs.len(), 2);
        assert_eq!(case.pairs[0].asks.len(), 2);
        assert_eq!(case.pairs[0].bids.len(), 2);
        assert_eq!(case.pairs[1].asks, vec![Level {
            price: 40.0,
            amount: 10.0,
        }]);
    }

    #[test]
    fn rejects_malformed_cases() {
        for block in &[
            "",
            "KNC ETH 300\n",
            "KNC ETH 300\nnope\n",
            "KNC ETH 300\n1\nKNC USDT\nx\n",
            "KNC ETH 300\n1\nKNC USDT\n1\n1.0\n0\n",
            "KNC ETH inf\n0\n",
        ] {
            assert!(parse_case(block).is_err(), "accepted {:?}", block);
        }
    }
}
