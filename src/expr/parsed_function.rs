//! `ParsedFunction`: the front-facing aggregate (§3.2, §4.1).
//!
//! Grounded on the shape of Kalix's `functions` module public surface —
//! a struct that owns a parsed tree plus the configuration that governs
//! how it is evaluated — but with positional `Vec<f64>` variables and
//! parameters in place of the teacher's `HashMap<String, f64>` variable
//! lookup (§9: "drop the string-keyed variable map; bind variables by
//! position... one less hash per evaluation, and the position is fixed
//! the moment `set_variable_names` runs").

use crate::expr::ast::ExprNode;
use crate::expr::errors::{EvalError, ParseError};
use crate::expr::evaluator;
use crate::expr::parser::{self, ParseConfig};
use crate::expr::simplifier;

const DEFAULT_MAX_DEPTH: usize = 256;

/// A parsed, configured, evaluatable expression.
///
/// Variables and parameters are both positional vectors rather than
/// named maps: `set_variable_names`/`set_parameter_names` fix the names
/// used while parsing (so `x + y` resolves `x` and `y` to positions), but
/// `evaluate` itself takes a plain `&[f64]` indexed the same way.
#[derive(Debug, Clone)]
pub struct ParsedFunction {
    variable_names: Vec<String>,
    parameter_names: Vec<String>,
    parameter_values: Vec<f64>,

    case_sensitive: bool,
    simplify_allowed: bool,
    logical_numeric_allowed: bool,
    comparison_tolerance: f64,
    max_depth: usize,

    expression: Option<String>,
    root: Option<ExprNode>,
    simplified: Option<ExprNode>,
}

impl Default for ParsedFunction {
    fn default() -> Self {
        ParsedFunction {
            variable_names: Vec::new(),
            parameter_names: Vec::new(),
            parameter_values: Vec::new(),
            case_sensitive: false,
            simplify_allowed: true,
            logical_numeric_allowed: false,
            comparison_tolerance: 0.0,
            max_depth: DEFAULT_MAX_DEPTH,
            expression: None,
            root: None,
            simplified: None,
        }
    }
}

impl ParsedFunction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_variable_names(&mut self, names: Vec<String>) {
        self.variable_names = names;
        self.root = None;
        self.simplified = None;
    }

    pub fn set_parameter_names(&mut self, names: Vec<String>) {
        self.parameter_values = vec![0.0; names.len()];
        self.parameter_names = names;
        self.root = None;
        self.simplified = None;
    }

    /// Set the parameter values. The length must match the parameter
    /// names list established by `set_parameter_names`. Does not
    /// recompute an already-simplified tree — call `refresh_simplified`
    /// explicitly if the new values should be folded in (§4.6).
    pub fn set_parameter_values(&mut self, values: Vec<f64>) -> Result<(), ParseError> {
        if values.len() != self.parameter_names.len() {
            return Err(ParseError::ParameterMismatch {
                expected: self.parameter_names.len(),
                got: values.len(),
            });
        }
        self.parameter_values = values;
        Ok(())
    }

    pub fn set_case_sensitive(&mut self, value: bool) {
        self.case_sensitive = value;
    }

    pub fn set_simplify_allowed(&mut self, value: bool) {
        self.simplify_allowed = value;
        if !value {
            self.simplified = None;
        }
    }

    pub fn set_logical_numeric_allowed(&mut self, value: bool) {
        self.logical_numeric_allowed = value;
    }

    pub fn set_comparison_tolerance(&mut self, value: f64) {
        self.comparison_tolerance = value;
    }

    pub fn set_max_depth(&mut self, value: usize) {
        self.max_depth = value;
    }

    pub fn variable_names(&self) -> &[String] {
        &self.variable_names
    }

    pub fn parameter_names(&self) -> &[String] {
        &self.parameter_names
    }

    pub fn expression(&self) -> Option<&str> {
        self.expression.as_deref()
    }

    /// The raw parsed tree, before simplification. Exposed mainly for
    /// diagnostics and tests; `evaluate` itself prefers the simplified
    /// tree when one is available.
    pub fn root(&self) -> Option<&ExprNode> {
        self.root.as_ref()
    }

    /// The constant-folded tree, if simplification is enabled and a
    /// successful `parse` has run.
    pub fn simplified(&self) -> Option<&ExprNode> {
        self.simplified.as_ref()
    }

    /// Parse `expression`, replacing any previously parsed tree. Parsing
    /// is idempotent: calling this twice with different text simply
    /// discards the old tree and its simplified form.
    pub fn parse(&mut self, expression: &str) -> Result<(), ParseError> {
        let config = ParseConfig {
            variable_names: &self.variable_names,
            parameter_names: &self.parameter_names,
            case_sensitive: self.case_sensitive,
            comparison_tolerance: self.comparison_tolerance,
            max_depth: self.max_depth,
        };
        let root = parser::parse(expression, &config)?;
        self.expression = Some(expression.to_string());
        self.simplified = if self.simplify_allowed {
            Some(simplifier::simplify(&root, &self.parameter_values, self.comparison_tolerance))
        } else {
            None
        };
        self.root = Some(root);
        Ok(())
    }

    /// Recompute the simplified tree against the current parameter
    /// values. A no-op when simplification is disabled or nothing has
    /// been parsed yet.
    pub fn refresh_simplified(&mut self) {
        if !self.simplify_allowed {
            self.simplified = None;
            return;
        }
        if let Some(root) = &self.root {
            self.simplified = Some(simplifier::simplify(root, &self.parameter_values, self.comparison_tolerance));
        }
    }

    /// Evaluate the parsed expression against `args`, one value per
    /// entry in the variable-names list, in the same order.
    pub fn evaluate(&self, args: &[f64]) -> Result<f64, EvalError> {
        if args.len() != self.variable_names.len() {
            return Err(EvalError::ContractViolation {
                message: format!(
                    "evaluate called with {} argument(s), expected {} (one per variable name)",
                    args.len(),
                    self.variable_names.len()
                ),
            });
        }
        let tree = self.simplified.as_ref().or(self.root.as_ref()).ok_or_else(|| EvalError::ContractViolation {
            message: "evaluate called before a successful parse".to_string(),
        })?;
        evaluator::evaluate(
            tree,
            args,
            &self.parameter_values,
            self.comparison_tolerance,
            self.logical_numeric_allowed,
        )
    }

    /// A diagnostic text rendering of the parsed tree, or `None` if
    /// nothing has been parsed yet.
    pub fn dump(&self) -> Option<String> {
        self.root.as_ref().map(|r| r.dump(&self.variable_names, &self.parameter_names))
    }
}
