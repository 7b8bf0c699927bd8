use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use tally_types::{parse_moment, Amount, Moment, PriceDb};
use tally_value::{PrintWidths, Value};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Tally - polymorphic values for ledger-style arithmetic
#[derive(Parser)]
#[command(name = "tally")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Evaluate, accumulate and price commodity amounts")]
struct Cli {
    /// Width of the first output line
    #[arg(long, global = true, default_value_t = 0, env = "TALLY_WIDTH")]
    width: usize,

    /// Width of every following line of a multi-commodity balance
    #[arg(long, global = true, env = "TALLY_LATTER_WIDTH")]
    latter_width: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a binary operator to two values
    Eval {
        left: String,
        /// One of + - * / or cmp
        op: String,
        right: String,
        /// Treat both operands as strings instead of amounts
        #[arg(long)]
        literal: bool,
    },
    /// Accumulate amounts; `QTY@@COST` records a total cost basis
    Sum {
        #[arg(required = true)]
        amounts: Vec<String>,
        /// Print the cost basis instead of the quantity
        #[arg(long)]
        cost: bool,
    },
    /// Market value of the accumulated amounts
    Value {
        #[arg(required = true)]
        amounts: Vec<String>,
        /// Price entry in the form SYMBOL=PRICE@DATE
        #[arg(long = "price", value_name = "ENTRY")]
        prices: Vec<String>,
        /// Valuation moment (defaults to now)
        #[arg(long, env = "TALLY_AT")]
        at: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let widths = PrintWidths::new(cli.width, cli.latter_width);

    let result = match cli.command {
        Commands::Eval {
            left,
            op,
            right,
            literal,
        } => eval_command(&left, &op, &right, literal),
        Commands::Sum { amounts, cost } => sum_command(&amounts, cost),
        Commands::Value {
            amounts,
            prices,
            at,
        } => value_command(&amounts, &prices, at.as_deref()),
    };

    match result.and_then(|value| emit(&value, &widths)) {
        Ok(()) => {}
        Err(err) => {
            eprintln!("Error: {:#}", err);
            std::process::exit(1);
        }
    }
}

fn emit(value: &Value, widths: &PrintWidths) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    value.print_with(&mut out, widths)?;
    writeln!(out)?;
    Ok(())
}

/// Plain integers stay integers; anything else is read as an amount.
fn operand(text: &str, literal: bool) -> Result<Value> {
    if !literal {
        if let Ok(n) = text.parse::<i64>() {
            return Ok(Value::from(n));
        }
    }
    Value::from_text(text, literal).with_context(|| format!("invalid operand '{}'", text))
}

fn eval_command(left: &str, op: &str, right: &str, literal: bool) -> Result<Value> {
    let left = operand(left, literal)?;
    let right = operand(right, literal)?;
    debug!(op, left = %left, right = %right, "eval");

    let result = match op {
        "+" => &left + &right,
        "-" => &left - &right,
        "*" | "x" => &left * &right,
        "/" => &left / &right,
        "cmp" => left
            .compare(&right)
            .map(|ordering| Value::from(ordering as i64)),
        other => bail!("unknown operator '{}'", other),
    };
    Ok(result?)
}

fn parse_posting(text: &str) -> Result<(Amount, Option<Amount>)> {
    let (quantity, cost) = match text.split_once("@@") {
        Some((quantity, cost)) => (quantity, Some(cost)),
        None => (text, None),
    };
    let quantity = quantity
        .trim()
        .parse::<Amount>()
        .with_context(|| format!("invalid amount '{}'", quantity.trim()))?;
    let cost = cost
        .map(|cost| {
            cost.trim()
                .parse::<Amount>()
                .with_context(|| format!("invalid cost '{}'", cost.trim()))
        })
        .transpose()?;
    Ok((quantity, cost))
}

fn accumulate(postings: &[String]) -> Result<Value> {
    let mut total = Value::default();
    for posting in postings {
        let (quantity, cost) = parse_posting(posting)?;
        total.add_amount(&quantity, cost.as_ref())?;
    }
    Ok(total)
}

fn sum_command(postings: &[String], cost: bool) -> Result<Value> {
    let total = accumulate(postings)?;
    if cost {
        Ok(total.cost()?)
    } else {
        Ok(total)
    }
}

/// Parse `SYMBOL=PRICE@DATE`, e.g. `AAPL=$150.00@2024-01-15`.
fn parse_price_entry(entry: &str) -> Result<(String, Moment, Amount)> {
    let (symbol, rest) = entry
        .split_once('=')
        .ok_or_else(|| anyhow!("price entry '{}' is missing '='", entry))?;
    let (price, date) = rest
        .rsplit_once('@')
        .ok_or_else(|| anyhow!("price entry '{}' is missing '@DATE'", entry))?;

    let symbol = symbol.trim();
    if symbol.is_empty() {
        bail!("price entry '{}' has no commodity", entry);
    }
    let price = price
        .trim()
        .parse::<Amount>()
        .with_context(|| format!("invalid price in '{}'", entry))?;
    let moment = parse_moment(date.trim()).with_context(|| format!("invalid date in '{}'", entry))?;
    Ok((symbol.to_string(), moment, price))
}

fn value_command(postings: &[String], entries: &[String], at: Option<&str>) -> Result<Value> {
    let mut prices = PriceDb::new();
    for entry in entries {
        let (symbol, moment, price) = parse_price_entry(entry)?;
        prices.add(symbol, moment, price);
    }
    let at = at
        .map(|text| parse_moment(text).with_context(|| format!("invalid --at '{}'", text)))
        .transpose()?;

    let total = accumulate(postings)?;
    Ok(total.value(at, &prices)?)
}
