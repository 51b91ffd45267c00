use std::error::Error;
use std::fmt;
use std::fmt::Formatter;

/// The validation check that rejected an expression.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CheckKind {
    /// A character outside of the accepted set.
    Symbol,
    /// Brackets that do not pair up.
    Balance,
    /// Symbols in an order that does not form an expression.
    Order,
}

/// Why an expression was rejected before evaluation.
///
/// Positions are character (not byte) offsets into the text that was validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidSymbol { symbol: char, position: usize },
    UnmatchedCloseBracket { position: usize },
    /// `position` is the outermost bracket that is still open at the end of the text.
    UnclosedOpenBracket { position: usize },
    MisplacedSymbol { symbol: char, position: usize },
    /// A number with more than one decimal separator.
    MalformedNumber { literal: String, position: usize },
}

impl ValidationError {
    pub fn kind(&self) -> CheckKind {
        match self {
            ValidationError::InvalidSymbol { .. } => CheckKind::Symbol,
            ValidationError::UnmatchedCloseBracket { .. }
            | ValidationError::UnclosedOpenBracket { .. } => CheckKind::Balance,
            ValidationError::MisplacedSymbol { .. } | ValidationError::MalformedNumber { .. } => {
                CheckKind::Order
            }
        }
    }

    pub fn position(&self) -> usize {
        match self {
            ValidationError::InvalidSymbol { position, .. }
            | ValidationError::UnmatchedCloseBracket { position }
            | ValidationError::UnclosedOpenBracket { position }
            | ValidationError::MisplacedSymbol { position, .. }
            | ValidationError::MalformedNumber { position, .. } => *position,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidSymbol { symbol, position } => {
                write!(f, "Invalid symbol {:?} at position {}", symbol, position)
            }
            ValidationError::UnmatchedCloseBracket { position } => {
                write!(f, "Closing bracket at position {} has no opening bracket", position)
            }
            ValidationError::UnclosedOpenBracket { position } => {
                write!(f, "Opening bracket at position {} is never closed", position)
            }
            ValidationError::MisplacedSymbol { symbol, position } => {
                write!(f, "Unexpected {:?} at position {}", symbol, position)
            }
            ValidationError::MalformedNumber { literal, position } => write!(
                f,
                "Number {} at position {} has more than one decimal separator",
                literal, position
            ),
        }
    }
}

impl Error for ValidationError {}

/// Why a validated, normalized expression could still not be evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumericError {
    DivisionByZero,
    /// An operation overflowed to infinity or produced NaN.
    NonFiniteResult,
    InvalidNumber { literal: String },
    UnexpectedSymbol { symbol: char, position: usize },
    UnbalancedBrackets { position: usize },
    /// Two operands follow each other without an operator in between.
    MissingOperator,
    NestingTooDeep { limit: usize },
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::DivisionByZero => write!(f, "Division by zero"),
            NumericError::NonFiniteResult => write!(f, "Result is not a finite number"),
            NumericError::InvalidNumber { literal } => {
                write!(f, "Could not read {:?} as a number", literal)
            }
            NumericError::UnexpectedSymbol { symbol, position } => {
                write!(f, "Unexpected {:?} at byte {}", symbol, position)
            }
            NumericError::UnbalancedBrackets { position } => {
                write!(f, "Unbalanced bracket at byte {}", position)
            }
            NumericError::MissingOperator => write!(f, "Missing operator between two operands"),
            NumericError::NestingTooDeep { limit } => {
                write!(f, "Expression nests deeper than {} levels", limit)
            }
        }
    }
}

impl Error for NumericError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_errors_belong_to_balance_check() {
        let unmatched = ValidationError::UnmatchedCloseBracket { position: 0 };
        let unclosed = ValidationError::UnclosedOpenBracket { position: 3 };

        assert_eq!(unmatched.kind(), CheckKind::Balance);
        assert_eq!(unclosed.kind(), CheckKind::Balance);
    }

    #[test]
    fn malformed_number_belongs_to_order_check() {
        let error = ValidationError::MalformedNumber {
            literal: "2,0.5".into(),
            position: 4,
        };

        assert_eq!(error.kind(), CheckKind::Order);
        assert_eq!(error.position(), 4);
    }

    #[test]
    fn messages_name_the_offending_symbol() {
        let error = ValidationError::InvalidSymbol {
            symbol: 'a',
            position: 2,
        };

        assert_eq!(error.to_string(), "Invalid symbol 'a' at position 2");
    }
}
