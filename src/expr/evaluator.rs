//! Tree-walking evaluation (§4.5).
//!
//! Grounded on Kalix's `functions::evaluator::Evaluator::evaluate`, a
//! recursive post-order walk over the AST. The walk shape is unchanged;
//! what changes is dispatch (through the catalogue instead of a giant
//! `match` over operator strings) and the numeric contract (domain
//! violations are `Err`, never NaN/∞ silently threaded through — see
//! `functions.rs`).

use crate::expr::ast::ExprNode;
use crate::expr::catalogue;
use crate::expr::errors::EvalError;
use crate::expr::operators::{BinaryOp, UnaryOp};

/// Whether `logicalNumericAllowed` is in effect only changes whether
/// `AND`/`OR` short-circuit; it never changes what counts as boolean-like
/// (§8 scenario 4). A value counts as boolean-like when it is within
/// `tolerance` of `0.0` or `1.0`; anything else is a domain error, with
/// the operator name carried through for the error message.
pub fn require_boolish(context: &str, value: f64, tolerance: f64) -> Result<bool, EvalError> {
    if (value - 1.0).abs() <= tolerance {
        Ok(true)
    } else if value.abs() <= tolerance {
        Ok(false)
    } else {
        Err(EvalError::DomainError {
            function: context.to_string(),
            args: vec![value],
        })
    }
}

/// Evaluate `node` against a variable vector and a parameter vector.
///
/// `logical_numeric_allowed` controls only whether `AND`/`OR` short-
/// circuit: when `false`, both operands are always evaluated (and must
/// both be boolean-like) even if the left operand alone determines the
/// result; when `true`, the right operand is skipped once the left
/// operand already decides the outcome (`false AND _`, `true OR _`).
pub fn evaluate(
    node: &ExprNode,
    args: &[f64],
    param_values: &[f64],
    tolerance: f64,
    logical_numeric_allowed: bool,
) -> Result<f64, EvalError> {
    match node {
        ExprNode::Constant(v) => Ok(*v),

        ExprNode::Variable(i) => args.get(*i).copied().ok_or_else(|| EvalError::ContractViolation {
            message: format!("variable index {i} out of range for {} argument(s)", args.len()),
        }),

        ExprNode::Parameter(i) => {
            param_values.get(*i).copied().ok_or_else(|| EvalError::ContractViolation {
                message: format!(
                    "parameter index {i} out of range for {} parameter value(s)",
                    param_values.len()
                ),
            })
        }

        ExprNode::UnaryOp { op, operand } => {
            let v = evaluate(operand, args, param_values, tolerance, logical_numeric_allowed)?;
            match op {
                UnaryOp::Not => {
                    let b = require_boolish("NOT", v, tolerance)?;
                    Ok(if b { 0.0 } else { 1.0 })
                }
                UnaryOp::UMinus => Ok(-v),
                UnaryOp::UPlus => Ok(v),
            }
        }

        ExprNode::BinaryOp { op, tolerance: node_tolerance, left, right } => {
            let tol = *node_tolerance;
            if op.is_logical() {
                return evaluate_logical(*op, left, right, args, param_values, tol, logical_numeric_allowed);
            }
            let lv = evaluate(left, args, param_values, tolerance, logical_numeric_allowed)?;
            let rv = evaluate(right, args, param_values, tolerance, logical_numeric_allowed)?;
            let entry = catalogue::lookup(op.catalogue_name(), true)
                .expect("every BinaryOp variant has a catalogue entry");
            (entry.eval)(&[lv, rv], tol)
        }

        ExprNode::FunctionCall { name, args: call_args } => {
            let mut values = Vec::with_capacity(call_args.len());
            for a in call_args {
                values.push(evaluate(a, args, param_values, tolerance, logical_numeric_allowed)?);
            }
            let entry = catalogue::lookup(name, true).ok_or_else(|| EvalError::ContractViolation {
                message: format!("unknown catalogue entry '{name}' reached the evaluator"),
            })?;
            if !entry.arity.accepts(values.len()) {
                return Err(EvalError::ContractViolation {
                    message: format!(
                        "'{name}' expects {} argument(s), got {}",
                        entry.arity.describe(),
                        values.len()
                    ),
                });
            }
            (entry.eval)(&values, tolerance)
        }

        ExprNode::Conditional { cond, then_branch, else_branch } => {
            let c = evaluate(cond, args, param_values, tolerance, logical_numeric_allowed)?;
            let taken = require_boolish("IF", c, tolerance)?;
            if taken {
                evaluate(then_branch, args, param_values, tolerance, logical_numeric_allowed)
            } else {
                evaluate(else_branch, args, param_values, tolerance, logical_numeric_allowed)
            }
        }
    }
}

fn evaluate_logical(
    op: BinaryOp,
    left: &ExprNode,
    right: &ExprNode,
    args: &[f64],
    param_values: &[f64],
    tolerance: f64,
    logical_numeric_allowed: bool,
) -> Result<f64, EvalError> {
    let lv = evaluate(left, args, param_values, tolerance, logical_numeric_allowed)?;
    let lb = require_boolish(op.catalogue_name(), lv, tolerance)?;

    if logical_numeric_allowed {
        match (op, lb) {
            (BinaryOp::And, false) => return Ok(0.0),
            (BinaryOp::Or, true) => return Ok(1.0),
            _ => {}
        }
    }

    let rv = evaluate(right, args, param_values, tolerance, logical_numeric_allowed)?;
    let rb = require_boolish(op.catalogue_name(), rv, tolerance)?;
    let result = match op {
        BinaryOp::And => lb && rb,
        BinaryOp::Or => lb || rb,
        _ => unreachable!("evaluate_logical only called for AND/OR"),
    };
    Ok(if result { 1.0 } else { 0.0 })
}
