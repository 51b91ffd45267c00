use crate::interpreter::classifier::{is_decimal_separator, is_digit};
use crate::interpreter::error::NumericError;
use crate::interpreter::operator::{BinaryOperator, Priority};
use crate::interpreter::syntax::expression_tree::Node;
use itertools::Itertools;

/// Splits a normalized expression into an evaluation tree.
///
/// Brackets are resolved first, innermost last to finish, by recursively parsing
/// their contents. What remains is cut at every `+` and `-`, each piece is cut at every
/// `*` and `/`, and the pieces are combined from the left, so chains like `2-3-4` group
/// as `(2-3)-4`. A piece with nothing in it becomes [`Node::Elided`].
///
/// Only brackets count towards `max_depth`; operator chains of any length are flat.
///
/// # Arguments
///
/// * `text`: A validated, normalized expression.
/// * `max_depth`: How many levels of nested brackets are allowed before giving up.
///
/// returns: The evaluation tree of the expression.
///
/// # Examples
///
/// ```
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// use arithmetic_evaluator::interpreter::parser::parse;
///
/// let tree = parse("2*(1+1)", 16)?;
/// assert_eq!(tree.evaluate()?, 4.0);
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn parse(text: &str, max_depth: usize) -> Result<Node, NumericError> {
    let parser = SubstringParser { text, max_depth };
    parser.parse_range(0, text.len(), 0)
}

/// A piece of an expression once its brackets have been resolved.
enum Segment {
    Operand(Node),
    Operator(BinaryOperator),
}

struct SubstringParser<'a> {
    text: &'a str,
    max_depth: usize,
}

impl<'a> SubstringParser<'a> {
    /// Parses `text[start..end]`. Positions in errors stay relative to the whole text.
    fn parse_range(&self, start: usize, end: usize, depth: usize) -> Result<Node, NumericError> {
        self.check_depth(depth)?;
        let segments = self.resolve_brackets(start, end, depth)?;
        self.split(segments)
    }

    fn resolve_brackets(
        &self,
        start: usize,
        end: usize,
        depth: usize,
    ) -> Result<Vec<Segment>, NumericError> {
        let mut segments = vec![];
        let mut symbols = self.text[start..end]
            .char_indices()
            .map(|(index, symbol)| (start + index, symbol))
            .peekable();

        while let Some((position, symbol)) = symbols.next() {
            match symbol {
                '(' => {
                    let close = self.matching_bracket(position, end)?;
                    let inner = self.parse_range(position + 1, close, depth + 1)?;
                    segments.push(Segment::Operand(Node::new_group(inner)));
                    while symbols.next_if(|&(index, _)| index <= close).is_some() {}
                }
                ')' => return Err(NumericError::UnbalancedBrackets { position }),
                symbol if is_digit(symbol) || is_decimal_separator(symbol) => {
                    let rest: usize = symbols
                        .peeking_take_while(|&(_, c)| is_digit(c) || is_decimal_separator(c))
                        .map(|(_, c)| c.len_utf8())
                        .sum();
                    let literal = &self.text[position..position + symbol.len_utf8() + rest];
                    segments.push(Segment::Operand(parse_literal(literal)?));
                }
                symbol => match BinaryOperator::from_symbol(symbol) {
                    Some(operator) => segments.push(Segment::Operator(operator)),
                    None => return Err(NumericError::UnexpectedSymbol { symbol, position }),
                },
            }
        }

        Ok(segments)
    }

    /// Finds the `)` closing the `(` at `open`, without looking past `end`.
    fn matching_bracket(&self, open: usize, end: usize) -> Result<usize, NumericError> {
        let mut balance = 0usize;
        for (index, symbol) in self.text[open..end].char_indices() {
            match symbol {
                '(' => balance += 1,
                ')' => {
                    balance -= 1;
                    if balance == 0 {
                        return Ok(open + index);
                    }
                }
                _ => {}
            }
        }
        Err(NumericError::UnbalancedBrackets { position: open })
    }

    /// Folds the segments of one bracket level into a tree, without adding nesting.
    fn split(&self, segments: Vec<Segment>) -> Result<Node, NumericError> {
        self.fold_priority(segments, Priority::Low)
    }

    /// Cuts the segments at every operator of `priority` and folds the pieces from the left.
    ///
    /// `a-b-c` becomes `(a-b)-c`, the same grouping as splitting at the rightmost
    /// operator first.
    fn fold_priority(
        &self,
        segments: Vec<Segment>,
        priority: Priority,
    ) -> Result<Node, NumericError> {
        let mut terms: Vec<Vec<Segment>> = vec![];
        let mut operators: Vec<BinaryOperator> = vec![];
        let mut term = vec![];
        for segment in segments {
            match segment {
                Segment::Operator(operator) if operator.priority() == priority => {
                    operators.push(operator);
                    terms.push(std::mem::take(&mut term));
                }
                segment => term.push(segment),
            }
        }
        terms.push(term);

        let mut terms = terms.into_iter();
        let first = self.fold_term(terms.next().unwrap_or_default(), priority)?;
        operators
            .into_iter()
            .zip(terms)
            .try_fold(first, |left_operand, (operator, term)| {
                let right_operand = self.fold_term(term, priority)?;
                Ok(Node::new_binary_operation(
                    operator,
                    left_operand,
                    right_operand,
                ))
            })
    }

    /// Folds a term between two operators of `priority` with the next tighter priority.
    fn fold_term(&self, segments: Vec<Segment>, priority: Priority) -> Result<Node, NumericError> {
        match priority {
            Priority::Low => self.fold_priority(segments, Priority::High),
            Priority::High => {
                let mut operands = segments.into_iter();
                match (operands.next(), operands.next()) {
                    (None, _) => Ok(Node::Elided),
                    (Some(Segment::Operand(operand)), None) => Ok(operand),
                    _ => Err(NumericError::MissingOperator),
                }
            }
        }
    }

    fn check_depth(&self, depth: usize) -> Result<(), NumericError> {
        if depth > self.max_depth {
            Err(NumericError::NestingTooDeep {
                limit: self.max_depth,
            })
        } else {
            Ok(())
        }
    }
}

fn parse_literal(literal: &str) -> Result<Node, NumericError> {
    match literal.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Node::new_literal(value)),
        Ok(_) => Err(NumericError::NonFiniteResult),
        Err(_) => Err(NumericError::InvalidNumber {
            literal: literal.to_string(),
        }),
    }
}
