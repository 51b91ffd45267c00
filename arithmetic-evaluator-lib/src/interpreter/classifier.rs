//! Character predicates shared by the validator and the parser.

/// What kind of symbol a position in an expression holds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SymbolCategory {
    Number,
    OpenBracket,
    CloseBracket,
    Operator,
    Invalid,
}

impl SymbolCategory {
    /// Decimal separators count as part of a number; spaces and unknown characters are `Invalid`.
    pub fn of(c: char) -> SymbolCategory {
        match c {
            '(' => SymbolCategory::OpenBracket,
            ')' => SymbolCategory::CloseBracket,
            c if is_operator(c) => SymbolCategory::Operator,
            c if is_digit(c) || is_decimal_separator(c) => SymbolCategory::Number,
            _ => SymbolCategory::Invalid,
        }
    }
}

pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

pub fn is_decimal_separator(c: char) -> bool {
    c == '.' || c == ','
}

pub fn is_low_priority_operator(c: char) -> bool {
    c == '+' || c == '-'
}

pub fn is_high_priority_operator(c: char) -> bool {
    c == '*' || c == '/'
}

pub fn is_operator(c: char) -> bool {
    is_low_priority_operator(c) || is_high_priority_operator(c)
}

pub fn is_bracket(c: char) -> bool {
    c == '(' || c == ')'
}

pub fn is_space(c: char) -> bool {
    c == ' '
}

/// Whether the character may appear anywhere in an expression.
pub fn is_acceptable(c: char) -> bool {
    is_digit(c) || is_operator(c) || is_bracket(c) || is_space(c) || is_decimal_separator(c)
}

/// Finds the category of the first bracket, operator or digit at or after `start`.
///
/// Everything else is skipped. Running off the end of the text counts as a closing
/// bracket, as if the whole expression were wrapped in one pair of brackets.
///
/// # Examples
///
/// ```
/// use arithmetic_evaluator::interpreter::classifier::{next_symbol_category, SymbolCategory};
///
/// let text: Vec<char> = "2 +  (".chars().collect();
/// assert_eq!(next_symbol_category(&text, 1), SymbolCategory::Operator);
/// assert_eq!(next_symbol_category(&text, 3), SymbolCategory::OpenBracket);
/// assert_eq!(next_symbol_category(&text, 6), SymbolCategory::CloseBracket);
/// ```
pub fn next_symbol_category(text: &[char], start: usize) -> SymbolCategory {
    text.iter()
        .skip(start)
        .find_map(|&c| match c {
            '(' => Some(SymbolCategory::OpenBracket),
            ')' => Some(SymbolCategory::CloseBracket),
            c if is_operator(c) => Some(SymbolCategory::Operator),
            c if is_digit(c) => Some(SymbolCategory::Number),
            _ => None,
        })
        .unwrap_or(SymbolCategory::CloseBracket)
}
