mod cases;
mod report;

use anyhow::{Context, Result};
use routegraph::{Limits, Routegraph};
use std::fs;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "route planner", rename_all = "kebab")]
struct Options {
    /// The input file containing one or more test cases in the textual
    /// order-book format.
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// The maximum number of levels considered per side of each input
    /// pair.
    #[structopt(long, env = "MAX_LEVELS", default_value = "5")]
    max_levels: usize,

    /// The maximum number of currencies on a single route, endpoints
    /// included.
    #[structopt(long, env = "MAX_DEPTH", default_value = "5")]
    max_depth: usize,
}

fn main() -> Result<()> {
    let options = Options::from_args();
    env_logger::init();
    log::info!("starting route planner with options: {:#?}", options);

    let limits = Limits {
        max_levels_per_pair: options.max_levels,
        max_path_len: options.max_depth,
    };
    let input = fs::read_to_string(&options.input)
        .with_context(|| format!("failed to read {}", options.input.display()))?;

    let mut executed = 0;
    let mut skipped = 0;
    for (index, block) in cases::split_cases(&input).iter().enumerate() {
        println!("=== Test Case {} ===", index + 1);
        let cases::TestCase {
            market,
            amount,
            pairs,
        } = match cases::parse_case(block) {
            Ok(case) => case,
            Err(err) => {
                log::warn!("skipping malformed test case {}: {:#}", index + 1, err);
                println!("SKIPPED: {:#}", err);
                skipped += 1;
                continue;
            }
        };

        let routegraph = Routegraph::with_limits(pairs, limits);
        let book = routegraph.virtual_orderbook(&market);
        let plan = book.execute(amount);
        print!("{}", report::render(amount, &book, &plan));
        executed += 1;
    }

    println!();
    println!("=== SUMMARY ===");
    println!("Total test cases: {}", executed + skipped);
    println!("Executed: {}", executed);
    println!("Skipped: {}", skipped);

    Ok(())
}
