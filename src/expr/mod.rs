//! A hand-rolled arithmetic/logical expression parser and evaluator.
//!
//! This module replaces Kalix's `functions` module (a parser for the
//! formula fields of hydrology model configs) with a general-purpose
//! expression engine: the same overall shape — normalize, parse to a
//! tree, optionally simplify, evaluate against positional inputs — built
//! to spec.md's grammar and numeric contract rather than the teacher's.
//!
//! See `catalogue.rs` for the set of recognized functions and operators,
//! and `parsed_function.rs` for the main entry point, `ParsedFunction`.

pub mod ast;
pub mod catalogue;
pub mod errors;
pub mod evaluator;
pub mod functions;
pub mod normalizer;
pub mod operators;
pub mod parser;
pub mod parsed_function;
pub mod simplifier;

pub use ast::ExprNode;
pub use errors::{EvalError, ExprError, ParseError};
pub use parsed_function::ParsedFunction;

/// Parse `expression` as a one-off, with no named variables or
/// parameters — only literals, `PI`/`E`, and catalogue functions/
/// operators are usable. Convenience wrapper over `ParsedFunction` for
/// callers that just want a tree back.
pub fn parse(expression: &str) -> Result<ParsedFunction, ParseError> {
    let mut pf = ParsedFunction::new();
    pf.parse(expression)?;
    Ok(pf)
}

/// Parse and immediately evaluate `expression` against `args`, binding
/// variables `x0, x1, ...` by position. A convenience for one-shot
/// evaluation; long-lived callers should build and reuse a
/// `ParsedFunction` instead, so the expression is only parsed once.
pub fn evaluate(expression: &str, args: &[f64]) -> Result<f64, ExprError> {
    let mut pf = ParsedFunction::new();
    let names: Vec<String> = (0..args.len()).map(|i| format!("x{i}")).collect();
    pf.set_variable_names(names);
    pf.parse(expression)?;
    pf.evaluate(args).map_err(ExprError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_arithmetic() {
        assert_eq!(evaluate("1 + 2 * 3", &[]).unwrap(), 7.0);
    }

    #[test]
    fn one_shot_variable_binding() {
        assert_eq!(evaluate("x0 + x1", &[2.0, 3.0]).unwrap(), 5.0);
    }

    #[test]
    fn one_shot_domain_error() {
        assert!(evaluate("sqrt(-1)", &[]).is_err());
    }
}
