//! Raw numeric implementations of the catalogue's elementary functions.
//!
//! This module is the direct descendant of Kalix's
//! `functions::functions::evaluate_builtin_function`: one function per
//! catalogue entry, each validating its own domain and arity. The one
//! deliberate departure from the teacher is in the domain policy —
//! spec.md requires `DomainError` for out-of-domain inputs (negative
//! `sqrt`, non-positive `ln`, …) rather than the teacher's IEEE
//! NaN/∞-passthrough behaviour, so every domain check below returns an
//! `Err` instead of letting `f64::NAN`/`f64::INFINITY` flow through.

use crate::expr::errors::EvalError;

fn domain_error(name: &str, args: &[f64]) -> EvalError {
    EvalError::DomainError {
        function: name.to_string(),
        args: args.to_vec(),
    }
}

// ---------------------------------------------------------------------
// Unary numeric
// ---------------------------------------------------------------------

pub fn sin(x: f64) -> Result<f64, EvalError> {
    Ok(x.sin())
}
pub fn cos(x: f64) -> Result<f64, EvalError> {
    Ok(x.cos())
}
pub fn tan(x: f64) -> Result<f64, EvalError> {
    Ok(x.tan())
}
pub fn asin(x: f64) -> Result<f64, EvalError> {
    if !(-1.0..=1.0).contains(&x) {
        return Err(domain_error("ASIN", &[x]));
    }
    Ok(x.asin())
}
pub fn acos(x: f64) -> Result<f64, EvalError> {
    if !(-1.0..=1.0).contains(&x) {
        return Err(domain_error("ACOS", &[x]));
    }
    Ok(x.acos())
}
pub fn atan(x: f64) -> Result<f64, EvalError> {
    Ok(x.atan())
}
pub fn sinh(x: f64) -> Result<f64, EvalError> {
    Ok(x.sinh())
}
pub fn cosh(x: f64) -> Result<f64, EvalError> {
    Ok(x.cosh())
}
pub fn tanh(x: f64) -> Result<f64, EvalError> {
    Ok(x.tanh())
}
pub fn exp(x: f64) -> Result<f64, EvalError> {
    Ok(x.exp())
}
pub fn ln(x: f64) -> Result<f64, EvalError> {
    if x <= 0.0 {
        return Err(domain_error("LN", &[x]));
    }
    Ok(x.ln())
}
pub fn log10(x: f64) -> Result<f64, EvalError> {
    if x <= 0.0 {
        return Err(domain_error("LOG10", &[x]));
    }
    Ok(x.log10())
}
pub fn log2(x: f64) -> Result<f64, EvalError> {
    if x <= 0.0 {
        return Err(domain_error("LOG2", &[x]));
    }
    Ok(x.log2())
}
pub fn sqrt(x: f64) -> Result<f64, EvalError> {
    if x < 0.0 {
        return Err(domain_error("SQRT", &[x]));
    }
    Ok(x.sqrt())
}
pub fn abs(x: f64) -> Result<f64, EvalError> {
    Ok(x.abs())
}
pub fn ceiling(x: f64) -> Result<f64, EvalError> {
    Ok(x.ceil())
}
pub fn floor(x: f64) -> Result<f64, EvalError> {
    Ok(x.floor())
}
pub fn int(x: f64) -> Result<f64, EvalError> {
    Ok(x.trunc())
}
pub fn round(x: f64) -> Result<f64, EvalError> {
    Ok(x.round())
}
pub fn uminus(x: f64) -> Result<f64, EvalError> {
    Ok(-x)
}
pub fn uplus(x: f64) -> Result<f64, EvalError> {
    Ok(x)
}

// ---------------------------------------------------------------------
// Binary numeric
// ---------------------------------------------------------------------

pub fn add(a: f64, b: f64) -> Result<f64, EvalError> {
    Ok(a + b)
}
pub fn sub(a: f64, b: f64) -> Result<f64, EvalError> {
    Ok(a - b)
}
pub fn mul(a: f64, b: f64) -> Result<f64, EvalError> {
    Ok(a * b)
}
pub fn div(a: f64, b: f64) -> Result<f64, EvalError> {
    if b == 0.0 {
        return Err(domain_error("/", &[a, b]));
    }
    Ok(a / b)
}
/// `0^0 = 1`; `0^negative` and a negative base with a non-integral
/// exponent are both `DomainError` (undefined over the reals).
pub fn pow(a: f64, b: f64) -> Result<f64, EvalError> {
    if a == 0.0 && b == 0.0 {
        return Ok(1.0);
    }
    if a == 0.0 && b < 0.0 {
        return Err(domain_error("^", &[a, b]));
    }
    if a < 0.0 && b.fract() != 0.0 {
        return Err(domain_error("^", &[a, b]));
    }
    Ok(a.powf(b))
}
pub fn modulo(a: f64, b: f64) -> Result<f64, EvalError> {
    if b == 0.0 {
        return Err(domain_error("MOD", &[a, b]));
    }
    Ok(a % b)
}
pub fn atan2(y: f64, x: f64) -> Result<f64, EvalError> {
    Ok(y.atan2(x))
}

// ---------------------------------------------------------------------
// Comparison (tolerance-aware equality)
// ---------------------------------------------------------------------

fn bool_val(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

pub fn eq(a: f64, b: f64, tol: f64) -> Result<f64, EvalError> {
    Ok(bool_val((a - b).abs() <= tol))
}
pub fn ne(a: f64, b: f64, tol: f64) -> Result<f64, EvalError> {
    Ok(bool_val((a - b).abs() > tol))
}
pub fn lt(a: f64, b: f64) -> Result<f64, EvalError> {
    Ok(bool_val(a < b))
}
pub fn le(a: f64, b: f64) -> Result<f64, EvalError> {
    Ok(bool_val(a <= b))
}
pub fn gt(a: f64, b: f64) -> Result<f64, EvalError> {
    Ok(bool_val(a > b))
}
pub fn ge(a: f64, b: f64) -> Result<f64, EvalError> {
    Ok(bool_val(a >= b))
}

// ---------------------------------------------------------------------
// Logical (operands must already be boolean-like; see evaluator.rs)
// ---------------------------------------------------------------------

pub fn logical_and(a: bool, b: bool) -> f64 {
    bool_val(a && b)
}
pub fn logical_or(a: bool, b: bool) -> f64 {
    bool_val(a || b)
}
pub fn logical_not(a: bool) -> f64 {
    bool_val(!a)
}

// ---------------------------------------------------------------------
// Variadic aggregation
// ---------------------------------------------------------------------

pub fn min(args: &[f64]) -> Result<f64, EvalError> {
    args.iter()
        .copied()
        .fold(None, |acc, x| Some(acc.map_or(x, |a: f64| a.min(x))))
        .ok_or_else(|| domain_error("MIN", args))
}
pub fn max(args: &[f64]) -> Result<f64, EvalError> {
    args.iter()
        .copied()
        .fold(None, |acc, x| Some(acc.map_or(x, |a: f64| a.max(x))))
        .ok_or_else(|| domain_error("MAX", args))
}
pub fn sum(args: &[f64]) -> Result<f64, EvalError> {
    Ok(args.iter().sum())
}
pub fn avg(args: &[f64]) -> Result<f64, EvalError> {
    if args.is_empty() {
        return Err(domain_error("AVG", args));
    }
    Ok(args.iter().sum::<f64>() / args.len() as f64)
}
