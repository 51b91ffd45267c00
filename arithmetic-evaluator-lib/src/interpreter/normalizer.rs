use crate::interpreter::classifier::is_decimal_separator;

/// The decimal separator used by normalized expressions.
pub const CANONICAL_SEPARATOR: char = '.';

/// Rewrites an expression into the form the evaluator reads.
///
/// Every decimal separator becomes [`CANONICAL_SEPARATOR`] and all whitespace is removed.
/// Normalizing twice gives the same text as normalizing once.
///
/// # Examples
///
/// ```
/// use arithmetic_evaluator::interpreter::normalizer::normalize;
///
/// assert_eq!(normalize(" 1,5 * (2 - 0.5) "), "1.5*(2-0.5)");
/// ```
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| {
            if is_decimal_separator(c) {
                CANONICAL_SEPARATOR
            } else {
                c
            }
        })
        .collect()
}
