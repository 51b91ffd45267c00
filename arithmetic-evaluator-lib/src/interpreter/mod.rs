pub mod classifier;
pub mod error;
pub mod evaluator;
pub mod normalizer;
pub mod operator;
pub mod parser;
pub mod syntax;
pub mod validator;

use crate::debug;
use crate::interpreter::evaluator::Evaluator;
use crate::interpreter::normalizer::normalize;
use crate::interpreter::validator::validate;
use anyhow::{Context, Result};

/// Calculates the value of the given arithmetic expression.
///
/// The expression is validated first, then normalized and evaluated. Validation
/// failures carry a [`error::ValidationError`] and evaluation failures a
/// [`error::NumericError`], both retrievable with `downcast_ref`.
///
/// # Arguments
///
/// * `expression`: A text expression in infix format, as typed by a user.
///
/// returns: The value of the expression.
///
/// # Examples
///
/// ```
/// use arithmetic_evaluator::interpreter::calculate;
/// use arithmetic_evaluator::interpreter::error::ValidationError;
///
/// let value = calculate("1 + 2,5 * 2".to_string()).unwrap();
/// assert_eq!(value, 6.0);
///
/// let error = calculate("2 +".to_string()).unwrap_err();
/// assert!(error.downcast_ref::<ValidationError>().is_some());
/// ```
pub fn calculate(expression: String) -> Result<f64> {
    calculate_with(expression, &Evaluator::default())
}

/// Like [`calculate`], but evaluates with the given evaluator.
pub fn calculate_with(expression: String, evaluator: &Evaluator) -> Result<f64> {
    validate(&expression).context("Incorrect expression")?;
    let canonical = normalize(&expression);
    debug!(&canonical);
    let value = evaluator
        .evaluate(&canonical)
        .with_context(|| format!("Failed to evaluate {}", canonical))?;
    debug!(value);
    Ok(value)
}

#[macro_export]
#[cfg(debug_assertions)]
macro_rules! debug {
    ($( $args:expr ),*) => { dbg!( $( $args ),* ); }
}

#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! debug {
    ($( $args:expr ),*) => {()}
}
