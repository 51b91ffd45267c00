use anyhow::{bail, Context, Result};
use arithmetic_evaluator::interpreter::error::ValidationError;
use arithmetic_evaluator::interpreter::evaluator::{Evaluator, DEFAULT_MAX_DEPTH};
use arithmetic_evaluator::interpreter::normalizer::normalize;
use arithmetic_evaluator::interpreter::validator::diagnose;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use log::{debug, info, warn};
use std::io;

/// Evaluates an arithmetic expression made of numbers, + - * / and brackets
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Arguments {
    /// The expression to evaluate, read from standard input if left out
    expression: Option<String>,

    /// Digits to print after the decimal point
    #[clap(short, long, default_value_t = 2)]
    precision: usize,

    /// How deeply brackets may nest
    #[clap(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Only check the expression and list every problem in it
    #[clap(short, long)]
    check: bool,

    /// Print the evaluation tree before the result
    #[clap(short, long)]
    tree: bool,

    #[clap(flatten)]
    verbose: Verbosity,
}

fn main() -> Result<()> {
    let args = Arguments::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let expression = match args.expression {
        Some(expression) => expression,
        None => read_expression()?,
    };
    info!("Checking {:?}", expression);

    let problems = diagnose(&expression);
    if !problems.is_empty() {
        warn!("Found {} problem(s)", problems.len());
        for problem in &problems {
            eprintln!("{}", describe(&expression, problem));
        }
        bail!("Incorrect expression");
    }
    if args.check {
        println!("Correct expression");
        return Ok(());
    }

    let canonical = normalize(&expression);
    println!("{}", canonical);

    let evaluator = Evaluator::new(args.max_depth);
    let tree = evaluator
        .parse(&canonical)
        .with_context(|| format!("Failed to evaluate {}", canonical))?;
    debug!("Grouped as {}", tree.to_infix()?);
    if args.tree {
        print!("{}", tree);
    }

    let value = tree
        .evaluate()
        .with_context(|| format!("Failed to evaluate {}", canonical))?;
    println!("result = {:.*}", args.precision, value);
    Ok(())
}

fn read_expression() -> Result<String> {
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read the expression from standard input")?;
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}

/// The problem, followed by the expression with a caret under the offending position.
///
/// Tabs before the position are repeated so the caret lines up with them. Every other
/// character is assumed to take one column, so wide symbols such as CJK characters
/// before the position push the caret to the left of where it belongs.
fn describe(expression: &str, problem: &ValidationError) -> String {
    let padding: String = expression
        .chars()
        .take(problem.position())
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect();
    format!("{}\n    {}\n    {}^", problem, expression, padding)
}
