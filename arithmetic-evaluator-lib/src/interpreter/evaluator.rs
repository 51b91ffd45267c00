use crate::interpreter::error::NumericError;
use crate::interpreter::parser;
use crate::interpreter::syntax::expression_tree::Node;

/// How deeply brackets may nest before evaluation gives up.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Evaluates normalized expressions.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Evaluator {
    max_depth: usize,
}

impl Evaluator {
    pub fn new(max_depth: usize) -> Evaluator {
        Evaluator { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Builds the evaluation tree of a normalized expression without computing it.
    pub fn parse(&self, text: &str) -> Result<Node, NumericError> {
        parser::parse(text, self.max_depth)
    }

    /// Computes the value of a validated, normalized expression.
    ///
    /// # Examples
    ///
    /// ```
    /// use arithmetic_evaluator::interpreter::error::NumericError;
    /// use arithmetic_evaluator::interpreter::evaluator::Evaluator;
    ///
    /// let evaluator = Evaluator::new(8);
    /// assert_eq!(evaluator.evaluate("(2+3)*4"), Ok(20.0));
    /// assert_eq!(evaluator.evaluate("1/(2-2)"), Err(NumericError::DivisionByZero));
    /// ```
    pub fn evaluate(&self, text: &str) -> Result<f64, NumericError> {
        self.parse(text)?.evaluate()
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Evaluator::new(DEFAULT_MAX_DEPTH)
    }
}

/// Computes the value of a validated, normalized expression with the default depth limit.
pub fn evaluate(text: &str) -> Result<f64, NumericError> {
    Evaluator::default().evaluate(text)
}
