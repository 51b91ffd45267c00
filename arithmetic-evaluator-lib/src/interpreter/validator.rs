use crate::interpreter::classifier::{
    is_acceptable, is_decimal_separator, is_digit, is_high_priority_operator,
    next_symbol_category, SymbolCategory,
};
use crate::interpreter::error::ValidationError;

/// Checks that the expression is well formed enough to be evaluated.
///
/// The symbol, balance and order checks run in that order and the first failure is returned.
/// Use [`diagnose`] to get the result of every check.
///
/// # Arguments
///
/// * `text`: The expression as typed, before normalization.
///
/// returns: `Ok` if the expression can be normalized and evaluated.
///
/// # Examples
///
/// ```
/// use arithmetic_evaluator::interpreter::error::CheckKind;
/// use arithmetic_evaluator::interpreter::validator::validate;
///
/// assert!(validate("1 + (2,5 * 3)").is_ok());
///
/// let error = validate("2 + )").unwrap_err();
/// assert_eq!(error.kind(), CheckKind::Balance);
/// ```
pub fn validate(text: &str) -> Result<(), ValidationError> {
    check_symbols(text)?;
    check_balance(text)?;
    check_order(text)
}

/// Runs all three checks and returns every failure, in check order.
///
/// # Examples
///
/// ```
/// use arithmetic_evaluator::interpreter::error::CheckKind;
/// use arithmetic_evaluator::interpreter::validator::diagnose;
///
/// let kinds: Vec<CheckKind> = diagnose("(a +").iter().map(|error| error.kind()).collect();
/// assert_eq!(kinds, [CheckKind::Symbol, CheckKind::Balance, CheckKind::Order]);
/// ```
pub fn diagnose(text: &str) -> Vec<ValidationError> {
    [check_symbols(text), check_balance(text), check_order(text)]
        .into_iter()
        .filter_map(Result::err)
        .collect()
}

pub fn is_valid(text: &str) -> bool {
    validate(text).is_ok()
}

/// Every character must be part of the accepted set.
pub fn check_symbols(text: &str) -> Result<(), ValidationError> {
    match text.chars().enumerate().find(|(_, c)| !is_acceptable(*c)) {
        None => Ok(()),
        Some((position, symbol)) => Err(ValidationError::InvalidSymbol { symbol, position }),
    }
}

/// Every closing bracket must close an earlier opening bracket, and all of them must be closed.
pub fn check_balance(text: &str) -> Result<(), ValidationError> {
    let mut open_brackets: Vec<usize> = vec![];
    for (position, symbol) in text.chars().enumerate() {
        match symbol {
            '(' => open_brackets.push(position),
            ')' => {
                if open_brackets.pop().is_none() {
                    return Err(ValidationError::UnmatchedCloseBracket { position });
                }
            }
            _ => {}
        }
    }
    match open_brackets.first() {
        None => Ok(()),
        Some(&position) => Err(ValidationError::UnclosedOpenBracket { position }),
    }
}

/// Checks that symbols follow each other in an order that forms an expression.
///
/// The scan remembers the category of the previous symbol, starting as if the
/// expression was preceded by an opening bracket. Spaces carry no meaning and
/// characters outside the accepted set are left to [`check_symbols`].
pub fn check_order(text: &str) -> Result<(), ValidationError> {
    let symbols: Vec<char> = text.chars().collect();
    let mut previous = SymbolCategory::OpenBracket;
    let mut index = 0;

    while index < symbols.len() {
        let symbol = symbols[index];
        let misplaced = ValidationError::MisplacedSymbol {
            symbol,
            position: index,
        };

        match SymbolCategory::of(symbol) {
            SymbolCategory::Invalid => {}
            SymbolCategory::Number if is_decimal_separator(symbol) => return Err(misplaced),
            SymbolCategory::Operator => {
                let next = next_symbol_category(&symbols, index + 1);
                if previous == SymbolCategory::Operator || next == SymbolCategory::CloseBracket {
                    return Err(misplaced);
                }
                // `(-3` is a signed number, `(*3` is not.
                if is_high_priority_operator(symbol)
                    && previous == SymbolCategory::OpenBracket
                    && next == SymbolCategory::Number
                {
                    return Err(misplaced);
                }
                previous = SymbolCategory::Operator;
            }
            SymbolCategory::OpenBracket => {
                if matches!(
                    previous,
                    SymbolCategory::CloseBracket | SymbolCategory::Number
                ) {
                    return Err(misplaced);
                }
                previous = SymbolCategory::OpenBracket;
            }
            SymbolCategory::CloseBracket => {
                if matches!(
                    previous,
                    SymbolCategory::Operator | SymbolCategory::OpenBracket
                ) {
                    return Err(misplaced);
                }
                previous = SymbolCategory::CloseBracket;
            }
            SymbolCategory::Number => {
                if matches!(
                    previous,
                    SymbolCategory::CloseBracket | SymbolCategory::Number
                ) {
                    return Err(misplaced);
                }
                let number = number_at(&symbols, index);
                if number.iter().filter(|&&c| is_decimal_separator(c)).count() > 1 {
                    return Err(ValidationError::MalformedNumber {
                        literal: number.iter().collect(),
                        position: index,
                    });
                }
                previous = SymbolCategory::Number;
                index += number.len();
                continue;
            }
        }
        index += 1;
    }

    Ok(())
}

/// The longest run of digits and separators starting at `start`.
fn number_at(symbols: &[char], start: usize) -> &[char] {
    let length = symbols[start..]
        .iter()
        .take_while(|&&c| is_digit(c) || is_decimal_separator(c))
        .count();
    &symbols[start..start + length]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::error::CheckKind;
    use parameterized_macro::parameterized;

    #[parameterized(
    expression = {
    "()",
    "(+*)",
    "(+ 2*)  ",
    "(*3+5)",
    "(2)(3)",
    "2.0 3",
    "2,0.5 3.0",
    "2(3)",
    "2+",
    "(3-)",
    ".5",
    "1 + ,",
    "*3",
    }
    )]
    fn misordered_expression_fails_order_check(expression: &str) {
        assert!(check_order(expression).is_err())
    }

    #[parameterized(
    expression = {
    "2+3*(7*5*(-1))",
    "2+3/(7*5*(-1))",
    "((2)*(-7)/228.0+1337,0)",
    "((2)*(-7)/228+(((1337,24))))",
    "-(-(-10))",
    "+2+3",
    "2.",
    "",
    "    ",
    }
    )]
    fn well_ordered_expression_passes_order_check(expression: &str) {
        assert!(check_order(expression).is_ok())
    }

    #[parameterized(
    expression = {
    "(()",
    "(",
    "))  ))    ))",
    "((  ))) (((    ))",
    "((  )) (((    ))",
    ")",
    }
    )]
    fn unbalanced_expression_fails_balance_check(expression: &str) {
        assert!(check_balance(expression).is_err())
    }

    #[parameterized(
    expression = {
    "()",
    "()((()))    ()   ()    (())",
    "         ",
    "",
    }
    )]
    fn balanced_expression_passes_balance_check(expression: &str) {
        assert!(check_balance(expression).is_ok())
    }

    #[parameterized(
    expression = {
    "trash",
    "(()) a)",
    "//aa228.0",
    "1\t+ 2",
    }
    )]
    fn unknown_symbol_fails_symbol_check(expression: &str) {
        assert!(check_symbols(expression).is_err())
    }

    #[parameterized(
    expression = {
    "()()()   , ,.,., ,,. , 42154 ()()2423415421.0",
    "342143214 (( *+-**/-( 21.0",
    }
    )]
    fn known_symbols_pass_symbol_check(expression: &str) {
        assert!(check_symbols(expression).is_ok())
    }

    #[parameterized(
    expression = { "(()", ")", "))  ))    ))", "()", "(+*)", "(*3+5)", "2.0 3", "trash", "//aa228.0" },
    expected_kind = {
    CheckKind::Balance,
    CheckKind::Balance,
    CheckKind::Balance,
    CheckKind::Order,
    CheckKind::Order,
    CheckKind::Order,
    CheckKind::Order,
    CheckKind::Symbol,
    CheckKind::Symbol,
    }
    )]
    fn validate_reports_which_check_failed(expression: &str, expected_kind: CheckKind) {
        let error = validate(expression).unwrap_err();
        assert_eq!(error.kind(), expected_kind);
    }

    #[test]
    fn empty_and_blank_expressions_are_valid() {
        assert_eq!(validate(""), Ok(()));
        assert_eq!(validate("   "), Ok(()));
    }

    #[test]
    fn unmatched_close_bracket_reports_its_position() {
        assert_eq!(
            check_balance("(1))"),
            Err(ValidationError::UnmatchedCloseBracket { position: 3 })
        );
    }

    #[test]
    fn unclosed_open_bracket_reports_outermost_position() {
        assert_eq!(
            check_balance("1 + ((2)"),
            Err(ValidationError::UnclosedOpenBracket { position: 4 })
        );
    }

    #[test]
    fn number_with_two_separators_is_malformed() {
        assert_eq!(
            check_order("1 + 2,0.5"),
            Err(ValidationError::MalformedNumber {
                literal: "2,0.5".into(),
                position: 4,
            })
        );
    }

    #[test]
    fn operator_before_close_bracket_is_misplaced() {
        assert_eq!(
            check_order("(2 *)"),
            Err(ValidationError::MisplacedSymbol {
                symbol: '*',
                position: 3,
            })
        );
    }

    #[test]
    fn positions_count_characters_not_bytes() {
        assert_eq!(
            check_symbols("1 × 2"),
            Err(ValidationError::InvalidSymbol {
                symbol: '×',
                position: 2,
            })
        );
    }

    #[test]
    fn diagnose_lists_only_failing_checks() {
        let errors = diagnose("2 3)");

        pretty_assertions::assert_eq!(
            errors,
            vec![
                ValidationError::UnmatchedCloseBracket { position: 3 },
                ValidationError::MisplacedSymbol {
                    symbol: '3',
                    position: 2,
                },
            ]
        );
    }

    #[test]
    fn diagnose_of_valid_expression_is_empty() {
        assert!(diagnose("1 + 2").is_empty());
        assert!(is_valid("1 + 2"));
    }
}
