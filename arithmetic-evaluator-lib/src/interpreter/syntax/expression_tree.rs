use crate::interpreter::error::NumericError;
use crate::interpreter::operator::BinaryOperator;
use crate::interpreter::syntax::syntax_visitor::{
    walk_binary_operation, walk_group, SyntaxVisitor,
};
use anyhow::{Context, Result};
use ptree::{write_tree, TreeBuilder};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use string_builder::Builder;

/// The shape an expression was split into during parsing.
#[derive(Clone, PartialEq)]
pub enum Node {
    // Terminal symbols (leaves)
    Literal(f64),
    /// A missing operand, such as the left side of a leading sign. Evaluates to zero.
    Elided,
    // Non-terminal symbols (non-leaves)
    /// A bracketed sub-expression, resolved before the operators around it.
    Group(Box<Node>),
    BinaryOperation {
        operator: BinaryOperator,
        left_operand: Box<Node>,
        right_operand: Box<Node>,
    },
}

impl Node {
    pub fn new_literal(value: f64) -> Node {
        Node::Literal(value)
    }

    pub fn new_group(inner: Node) -> Node {
        Node::Group(Box::new(inner))
    }

    pub fn new_binary_operation(
        operator: BinaryOperator,
        left_operand: Node,
        right_operand: Node,
    ) -> Node {
        Node::BinaryOperation {
            operator,
            left_operand: Box::new(left_operand),
            right_operand: Box::new(right_operand),
        }
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Node::BinaryOperation { .. })
    }

    pub fn as_binary_operator(&self) -> Option<BinaryOperator> {
        match self {
            Node::BinaryOperation { operator, .. } => Some(*operator),
            Node::Literal(_) | Node::Elided | Node::Group(_) => None,
        }
    }

    /// Computes the value of the tree.
    ///
    /// Fails on division by zero and on any operation whose result is not finite.
    pub fn evaluate(&self) -> Result<f64, NumericError> {
        match self {
            Node::Literal(value) => Ok(*value),
            Node::Elided => Ok(0.0),
            Node::Group(inner) => inner.evaluate(),
            Node::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => {
                let left = left_operand.evaluate()?;
                let right = right_operand.evaluate()?;
                operator.evaluate(left, right)
            }
        }
    }

    /// Number of nodes on the longest path from this node to a leaf, this node included.
    pub fn depth(&self) -> usize {
        match self {
            Node::Literal(_) | Node::Elided => 1,
            Node::Group(inner) => 1 + inner.depth(),
            Node::BinaryOperation {
                left_operand,
                right_operand,
                ..
            } => 1 + left_operand.depth().max(right_operand.depth()),
        }
    }

    /// Writes the tree back as text, bracketing every operation nested inside another
    /// so that the grouping chosen by the evaluator is visible.
    ///
    /// # Examples
    ///
    /// ```
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// use arithmetic_evaluator::interpreter::evaluator::Evaluator;
    ///
    /// let tree = Evaluator::default().parse("2-3-4")?;
    /// assert_eq!(tree.to_infix()?, "(2 - 3) - 4");
    /// # Ok::<(), anyhow::Error>(()) }
    /// ```
    pub fn to_infix(&self) -> Result<String> {
        let mut visitor = InfixBuilderVisitor {
            builder: Builder::new(self.depth() * 4),
        };
        self.accept(&mut visitor);
        visitor
            .builder
            .string()
            .context("Failed to build infix expression")
    }

    /// Calls the correct visitor method for the node variant on the given visitor.
    pub(crate) fn accept(&self, visitor: &mut impl SyntaxVisitor) {
        match self {
            Node::Literal(value) => visitor.visit_literal(*value),
            Node::Elided => visitor.visit_elided(),
            Node::Group(inner) => visitor.visit_group(inner),
            Node::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => visitor.visit_binary_operation(operator, left_operand, right_operand),
        }
    }

    fn format_tree(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut visitor = TreeBuilderVisitor {
            builder: TreeBuilder::new("expression".into()),
        };
        self.accept(&mut visitor);

        let mut buffer: Vec<u8> = Vec::new();
        match write_tree(&visitor.builder.build(), &mut buffer) {
            Ok(_) => {}
            Err(_) => return Err(fmt::Error),
        }
        let text = match std::str::from_utf8(&buffer) {
            Ok(text) => text,
            Err(_) => return Err(fmt::Error),
        };
        f.write_str(text)
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.format_tree(f)
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Node::Literal(value) => write!(f, "{:?}", value),
            Node::Elided => write!(f, "Elided"),
            Node::Group(inner) => write!(f, "Group({:?})", inner),
            Node::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => write!(f, "{:?}({:?}, {:?})", operator, left_operand, right_operand),
        }
    }
}

struct TreeBuilderVisitor {
    builder: TreeBuilder,
}

impl SyntaxVisitor for TreeBuilderVisitor {
    fn visit_literal(&mut self, value: f64) {
        self.builder.add_empty_child(format!("{}", value));
    }
    fn visit_elided(&mut self) {
        self.builder.add_empty_child("(empty) = 0".into());
    }
    fn visit_group(&mut self, inner: &Node) {
        self.builder.begin_child("( )".into());
        walk_group(self, inner);
        self.builder.end_child();
    }
    fn visit_binary_operation(
        &mut self,
        operator: &BinaryOperator,
        left_operand: &Node,
        right_operand: &Node,
    ) {
        self.builder.begin_child(format!("{}", operator));
        walk_binary_operation(self, left_operand, right_operand);
        self.builder.end_child();
    }
}

struct InfixBuilderVisitor {
    builder: Builder,
}

impl InfixBuilderVisitor {
    fn append_operand(&mut self, operand: &Node) {
        if operand.is_operator() {
            self.builder.append("(");
            operand.accept(self);
            self.builder.append(")");
        } else {
            operand.accept(self);
        }
    }
}

impl SyntaxVisitor for InfixBuilderVisitor {
    fn visit_literal(&mut self, value: f64) {
        self.builder.append(format!("{}", value));
    }
    fn visit_group(&mut self, inner: &Node) {
        self.builder.append("(");
        walk_group(self, inner);
        self.builder.append(")");
    }
    fn visit_binary_operation(
        &mut self,
        operator: &BinaryOperator,
        left_operand: &Node,
        right_operand: &Node,
    ) {
        // A leading sign is written against its operand.
        if *left_operand == Node::Elided {
            self.builder.append(operator.to_string());
        } else {
            self.append_operand(left_operand);
            self.builder.append(format!(" {} ", operator));
        }
        self.append_operand(right_operand);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn simple_tree_evaluates_to_its_value() {
        let tree = create_simple_tree();

        assert_eq!(tree.evaluate(), Ok(5.0));
    }

    #[test]
    fn elided_operand_evaluates_to_zero() {
        let tree =
            Node::new_binary_operation(BinaryOperator::Subtract, Node::Elided, Node::new_literal(4.0));

        assert_eq!(tree.evaluate(), Ok(-4.0));
    }

    #[test]
    fn division_by_zero_deep_in_tree_is_reported() {
        let zero = Node::new_group(Node::new_binary_operation(
            BinaryOperator::Subtract,
            Node::new_literal(2.0),
            Node::new_literal(2.0),
        ));
        let tree = Node::new_binary_operation(BinaryOperator::Divide, Node::new_literal(1.0), zero);

        assert_eq!(tree.evaluate(), Err(NumericError::DivisionByZero));
    }

    #[test]
    fn depth_counts_longest_path() {
        assert_eq!(Node::new_literal(1.0).depth(), 1);
        assert_eq!(create_simple_tree().depth(), 2);
        assert_eq!(create_complex_tree().depth(), 5);
    }

    #[test]
    fn print_succeeds() {
        let tree = create_complex_tree();

        print!("{}", tree);
    }

    #[test]
    fn printed_tree_contains_every_node() {
        let printed = create_complex_tree().to_string();

        for label in ["expression", "-", "*", "( )", "+", "1", "2", "3", "(empty) = 0"] {
            assert!(printed.contains(label), "{} is missing from\n{}", label, printed);
        }
    }

    #[test]
    fn simple_tree_converts_back_to_simple_expression() {
        let tree = create_simple_tree();

        assert_eq!(tree.to_infix().unwrap(), "2 + 3");
    }

    #[test]
    fn complex_tree_converts_back_to_bracketed_expression() {
        let tree = create_complex_tree();

        assert_eq!(tree.to_infix().unwrap(), "-((1 + 2) * 3)");
    }

    #[test]
    fn as_binary_operator_only_matches_operations() {
        assert_eq!(
            create_simple_tree().as_binary_operator(),
            Some(BinaryOperator::Add)
        );
        assert_eq!(Node::Elided.as_binary_operator(), None);
    }

    fn create_simple_tree() -> Node {
        // 2 + 3
        let two = Node::new_literal(2.0);
        let three = Node::new_literal(3.0);
        Node::new_binary_operation(BinaryOperator::Add, two, three)
    }

    fn create_complex_tree() -> Node {
        // -((1 + 2) * 3)
        let one = Node::new_literal(1.0);
        let two = Node::new_literal(2.0);
        let three = Node::new_literal(3.0);
        let plus = Node::new_binary_operation(BinaryOperator::Add, one, two);
        let star =
            Node::new_binary_operation(BinaryOperator::Multiply, Node::new_group(plus), three);
        Node::new_binary_operation(BinaryOperator::Subtract, Node::Elided, star)
    }
}
