//! Validation and evaluation of plain arithmetic expressions such as `1 + (2,5 * 3)`.
pub mod interpreter;
