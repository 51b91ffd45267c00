use crate::interpreter::error::NumericError;
use std::fmt;
use std::fmt::Formatter;

/// A binary mathematical operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// Which evaluation pass an operator is split in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Low,
    High,
}

impl BinaryOperator {
    pub fn from_symbol(symbol: char) -> Option<BinaryOperator> {
        match symbol {
            '+' => Some(BinaryOperator::Add),
            '-' => Some(BinaryOperator::Subtract),
            '*' => Some(BinaryOperator::Multiply),
            '/' => Some(BinaryOperator::Divide),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Subtract => '-',
            BinaryOperator::Multiply => '*',
            BinaryOperator::Divide => '/',
        }
    }

    pub fn priority(&self) -> Priority {
        match self {
            BinaryOperator::Add | BinaryOperator::Subtract => Priority::Low,
            BinaryOperator::Multiply | BinaryOperator::Divide => Priority::High,
        }
    }

    /// Applies the operator, refusing to produce infinities or NaN.
    pub fn evaluate(&self, a: f64, b: f64) -> Result<f64, NumericError> {
        let result = match self {
            BinaryOperator::Add => a + b,
            BinaryOperator::Subtract => a - b,
            BinaryOperator::Multiply => a * b,
            BinaryOperator::Divide => {
                if b == 0.0 {
                    return Err(NumericError::DivisionByZero);
                }
                a / b
            }
        };
        if result.is_finite() {
            Ok(result)
        } else {
            Err(NumericError::NonFiniteResult)
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_equality_correspond_with_priority() {
        let equal1 = BinaryOperator::Multiply;
        let equal2 = BinaryOperator::Divide;
        assert_eq!(equal1.priority(), equal2.priority())
    }

    #[test]
    fn operator_gt_correspond_with_priority() {
        let greater = BinaryOperator::Multiply;
        let lesser = BinaryOperator::Subtract;
        assert!(greater.priority() > lesser.priority())
    }

    #[test]
    fn symbols_map_back_to_their_operator() {
        for operator in [
            BinaryOperator::Add,
            BinaryOperator::Subtract,
            BinaryOperator::Multiply,
            BinaryOperator::Divide,
        ] {
            assert_eq!(BinaryOperator::from_symbol(operator.symbol()), Some(operator));
        }
        assert_eq!(BinaryOperator::from_symbol('^'), None);
    }

    #[test]
    fn division_by_zero_is_an_error() {
        let result = BinaryOperator::Divide.evaluate(1.0, 0.0);
        assert_eq!(result, Err(NumericError::DivisionByZero));
    }

    #[test]
    fn overflow_is_reported_as_non_finite() {
        let result = BinaryOperator::Multiply.evaluate(f64::MAX, 10.0);
        assert_eq!(result, Err(NumericError::NonFiniteResult));
    }

    #[test]
    fn subtraction_keeps_operand_order() {
        assert_eq!(BinaryOperator::Subtract.evaluate(2.0, 3.0), Ok(-1.0));
    }
}
