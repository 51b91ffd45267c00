use crate::interpreter::operator::BinaryOperator;
use crate::interpreter::syntax::expression_tree::Node;

/// If a method is not implemented, the default implementation will continue in a pre-order
/// traversal of the tree.
pub(crate) trait SyntaxVisitor: Sized {
    fn visit_literal(&mut self, _value: f64) {}
    fn visit_elided(&mut self) {}
    fn visit_group(&mut self, inner: &Node) {
        walk_group(self, inner)
    }
    fn visit_binary_operation(
        &mut self,
        _operator: &BinaryOperator,
        left_operand: &Node,
        right_operand: &Node,
    ) {
        walk_binary_operation(self, left_operand, right_operand)
    }
}

pub(crate) fn walk_group(visitor: &mut impl SyntaxVisitor, inner: &Node) {
    inner.accept(visitor);
}

pub(crate) fn walk_binary_operation(
    visitor: &mut impl SyntaxVisitor,
    left_operand: &Node,
    right_operand: &Node,
) {
    left_operand.accept(visitor);
    right_operand.accept(visitor);
}
