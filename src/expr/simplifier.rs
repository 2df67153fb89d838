//! Constant folding (§4.6).
//!
//! Grounded on the general shape of Kalix's tree-rewrite passes (the
//! teacher clones before rewriting rather than mutating an evaluator's
//! input tree in place; see `functions::ast`'s `clone_box` machinery).
//! `simplify` walks a fresh clone bottom-up: `Parameter` nodes are
//! resolved immediately against the supplied parameter values (so a later
//! call to `set_parameter_values` does not retroactively change an
//! already-simplified tree — §4.6's "does not auto-refresh" rule), and
//! any node whose every child turned out to be a `Constant` is folded by
//! actually evaluating it. `Variable` nodes can never fold, so any
//! subtree containing one stays intact up to its constant-only ancestors.
//!
//! Subtrees whose evaluation would raise a `DomainError` are left
//! unfolded rather than failing the whole simplification pass: folding is
//! an optimization, not a correctness gate, and the caller may still be
//! entitled to a successful `evaluate()` later if, for some other reason,
//! that subtree is never reached at runtime (e.g. it sits behind a
//! `Conditional` branch that a particular variable vector never takes).

use crate::expr::ast::ExprNode;
use crate::expr::catalogue;
use crate::expr::evaluator::require_boolish;
use crate::expr::operators::BinaryOp;

/// Produce a constant-folded copy of `root`. `param_values` are baked in
/// as `Constant` nodes wherever a `Parameter` reference appears.
pub fn simplify(root: &ExprNode, param_values: &[f64], tolerance: f64) -> ExprNode {
    fold(root, param_values, tolerance)
}

fn fold(node: &ExprNode, params: &[f64], tolerance: f64) -> ExprNode {
    match node {
        ExprNode::Constant(v) => ExprNode::Constant(*v),
        ExprNode::Variable(i) => ExprNode::Variable(*i),
        ExprNode::Parameter(i) => match params.get(*i) {
            Some(v) => ExprNode::Constant(*v),
            None => ExprNode::Parameter(*i),
        },
        ExprNode::UnaryOp { op, operand } => {
            let folded_operand = fold(operand, params, tolerance);
            if let ExprNode::Constant(v) = folded_operand {
                if let Some(result) = try_eval_unary(*op, v, tolerance) {
                    return ExprNode::Constant(result);
                }
            }
            ExprNode::UnaryOp { op: *op, operand: Box::new(folded_operand) }
        }
        ExprNode::BinaryOp { op, tolerance: node_tol, left, right } => {
            let folded_left = fold(left, params, tolerance);
            let folded_right = fold(right, params, tolerance);
            if let (ExprNode::Constant(lv), ExprNode::Constant(rv)) = (&folded_left, &folded_right) {
                if let Some(result) = try_eval_binary(*op, *lv, *rv, *node_tol) {
                    return ExprNode::Constant(result);
                }
            }
            ExprNode::BinaryOp {
                op: *op,
                tolerance: *node_tol,
                left: Box::new(folded_left),
                right: Box::new(folded_right),
            }
        }
        ExprNode::FunctionCall { name, args } => {
            let folded_args: Vec<ExprNode> = args.iter().map(|a| fold(a, params, tolerance)).collect();
            if folded_args.iter().all(|a| matches!(a, ExprNode::Constant(_))) {
                let values: Vec<f64> = folded_args
                    .iter()
                    .map(|a| match a {
                        ExprNode::Constant(v) => *v,
                        _ => unreachable!(),
                    })
                    .collect();
                if let Some(entry) = catalogue::lookup(name, true) {
                    if let Ok(result) = (entry.eval)(&values, tolerance) {
                        return ExprNode::Constant(result);
                    }
                }
            }
            ExprNode::FunctionCall { name, args: folded_args }
        }
        ExprNode::Conditional { cond, then_branch, else_branch } => {
            let folded_cond = fold(cond, params, tolerance);
            let folded_then = fold(then_branch, params, tolerance);
            let folded_else = fold(else_branch, params, tolerance);
            if let ExprNode::Constant(cv) = folded_cond {
                if let Ok(taken) = require_boolish("IF", cv, tolerance) {
                    return if taken { folded_then } else { folded_else };
                }
            }
            ExprNode::Conditional {
                cond: Box::new(folded_cond),
                then_branch: Box::new(folded_then),
                else_branch: Box::new(folded_else),
            }
        }
    }
}

fn try_eval_unary(op: crate::expr::operators::UnaryOp, v: f64, tolerance: f64) -> Option<f64> {
    let entry = catalogue::lookup(op.catalogue_name(), true);
    match op {
        crate::expr::operators::UnaryOp::Not => require_boolish("NOT", v, tolerance)
            .ok()
            .map(|b| if b { 0.0 } else { 1.0 }),
        _ => entry.and_then(|e| (e.eval)(&[v], tolerance).ok()),
    }
}

fn try_eval_binary(op: BinaryOp, lv: f64, rv: f64, tolerance: f64) -> Option<f64> {
    if op.is_logical() {
        let lb = require_boolish(op.catalogue_name(), lv, tolerance).ok()?;
        let rb = require_boolish(op.catalogue_name(), rv, tolerance).ok()?;
        let result = match op {
            BinaryOp::And => lb && rb,
            BinaryOp::Or => lb || rb,
            _ => unreachable!(),
        };
        return Some(if result { 1.0 } else { 0.0 });
    }
    let entry = catalogue::lookup(op.catalogue_name(), true)?;
    (entry.eval)(&[lv, rv], tolerance).ok()
}
