//! Operator tags used by `Operator` tree nodes.
//!
//! Grounded on Kalix's `functions::operators` module: small `Copy` enums
//! plus a `symbol()`/precedence mapping, rather than storing the operator
//! as a raw string on every node. `MOD`, `MIN`, `MAX` are deliberately
//! absent here — spec.md's precedence ladder (§4.3) never mentions them
//! as infix symbols, only as call-form catalogue functions, so they are
//! `FunctionCall` nodes, not `BinaryOp` nodes.

/// Binary operators that appear in the precedence ladder (§4.3 levels
/// 1, 2, 4, 5, 6, 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl BinaryOp {
    /// The catalogue entry name this operator's numeric semantics live
    /// under (see `catalogue.rs`).
    pub fn catalogue_name(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "<>",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "AND",
            BinaryOp::Or => "OR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        self.catalogue_name()
    }

    pub fn is_right_associative(&self) -> bool {
        matches!(self, BinaryOp::Pow)
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge
        )
    }
}

/// Unary operators: `NOT` (logical negation), `UMINUS`/`UPLUS` (arithmetic
/// sign), all right-associative by nature (a chain like `--x` nests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    UMinus,
    UPlus,
}

impl UnaryOp {
    pub fn catalogue_name(&self) -> &'static str {
        match self {
            UnaryOp::Not => "NOT",
            UnaryOp::UMinus => "UMINUS",
            UnaryOp::UPlus => "UPLUS",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::UMinus => "-",
            UnaryOp::UPlus => "+",
        }
    }
}
