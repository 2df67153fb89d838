//! The recursive-descent "splitting" parser (§4.3).
//!
//! Kalix's `functions::parser::Parser` consumes a flat token stream with a
//! classic `parse_expression` / `parse_term` / `parse_factor` ladder, one
//! function per precedence level, each pulling tokens off the front of a
//! shared cursor. spec.md §4.3 describes a different algorithm entirely:
//! given a character range, scan it (ignoring bracketed sub-ranges) for
//! the lowest-precedence operator still untried, split the range in two
//! around the match, and recurse on each half — starting back at
//! precedence level 1 every time, not at the level that found the split.
//!
//! That restart is not a redundant rescan: pick the match so nothing of
//! that precedence remains at bracket-depth 0 on the far side of the
//! split (rightmost match for a left-associative level, leftmost for a
//! right-associative one), and the half on that side is, by
//! construction, already clear of every level tried so far on the parent
//! range — the restart degenerates to a fast "not found" at each of those
//! levels before reaching the one that actually applies. The other half
//! (the chaining side) may still contain more of the same operator, which
//! is exactly what builds the left-deep or right-deep chain. Net effect:
//! a few wasted rescans in exchange for one recursive shape instead of
//! two, which is the trade this module makes deliberately rather than
//! inheriting the teacher's token-cursor design.
//!
//! The ladder (low to high precedence):
//! 1. `OR`  2. `AND`  3. `NOT` (prefix)  4. comparisons  5. `+ -`
//! 6. `* /`  7. unary `+ -` (prefix)  8. `^` (right-assoc)  9. primary.
//!
//! `MOD`/`MIN`/`MAX`/`IF` never reach the ladder as operators — the
//! normalizer only turns them into surrogates when followed by `(`
//! (whitespace in between is allowed), so they are recognized directly in
//! the primary rule as call-form syntax.

use crate::expr::ast::ExprNode;
use crate::expr::catalogue;
use crate::expr::errors::ParseError;
use crate::expr::normalizer;
use crate::expr::operators::{BinaryOp, UnaryOp};

const DEFAULT_MAX_DEPTH: usize = 256;

pub struct ParseConfig<'a> {
    pub variable_names: &'a [String],
    pub parameter_names: &'a [String],
    pub case_sensitive: bool,
    pub comparison_tolerance: f64,
    pub max_depth: usize,
}

impl<'a> ParseConfig<'a> {
    pub fn new(variable_names: &'a [String], parameter_names: &'a [String]) -> Self {
        ParseConfig {
            variable_names,
            parameter_names,
            case_sensitive: false,
            comparison_tolerance: 0.0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parse a raw (not yet normalized) expression string into a tree.
pub fn parse(source: &str, config: &ParseConfig<'_>) -> Result<ExprNode, ParseError> {
    let normalized = normalizer::normalize(source, config.case_sensitive)?;
    let chars: Vec<char> = normalized.chars().collect();
    let p = Parser { chars: &chars, config };
    let (lo, hi) = (0, p.chars.len());
    let (lo, hi) = p.trim(lo, hi);
    if lo >= hi {
        return Err(ParseError::EmptySubexpression { position: lo });
    }
    p.parse_at_level(lo, hi, 1, 0)
}

struct Parser<'a, 'b> {
    chars: &'a [char],
    config: &'a ParseConfig<'b>,
}

const COMPARISON_OPS: &[(char, BinaryOp)] = &[
    ('=', BinaryOp::Eq),
    (normalizer::NE, BinaryOp::Ne),
    (normalizer::LE, BinaryOp::Le),
    (normalizer::GE, BinaryOp::Ge),
    ('<', BinaryOp::Lt),
    ('>', BinaryOp::Gt),
];

impl<'a, 'b> Parser<'a, 'b> {
    fn check_depth(&self, depth: usize, position: usize) -> Result<(), ParseError> {
        if depth > self.config.max_depth {
            return Err(ParseError::MaxDepthExceeded {
                limit: self.config.max_depth,
                position,
            });
        }
        Ok(())
    }

    fn trim(&self, lo: usize, hi: usize) -> (usize, usize) {
        let mut lo = lo;
        let mut hi = hi;
        while lo < hi && self.chars[lo].is_whitespace() {
            lo += 1;
        }
        while hi > lo && self.chars[hi - 1].is_whitespace() {
            hi -= 1;
        }
        (lo, hi)
    }

    /// Index just past the matching close-paren for the `(` at `open`.
    fn matching_paren(&self, open: usize, hi: usize) -> Result<usize, ParseError> {
        let mut depth = 0i32;
        let mut i = open;
        while i < hi {
            match self.chars[i] {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(i);
                    }
                }
                _ => {}
            }
            i += 1;
        }
        Err(ParseError::Unbalanced { position: open })
    }

    fn prev_non_ws(&self, lo: usize, pos: usize) -> Option<char> {
        let mut i = pos;
        while i > lo {
            i -= 1;
            if !self.chars[i].is_whitespace() {
                return Some(self.chars[i]);
            }
        }
        None
    }

    /// Whether a `+`/`-` found at `pos` must be a unary sign rather than a
    /// binary operator, given what (if anything) precedes it in `[lo,pos)`.
    fn forces_unary_context(prev: Option<char>) -> bool {
        match prev {
            None => true,
            Some(c) => matches!(
                c,
                '(' | ',' | '+' | '-' | '*' | '/' | '^' | '=' | '<' | '>'
            ) || c == normalizer::NE
                || c == normalizer::LE
                || c == normalizer::GE
                || c == normalizer::AND
                || c == normalizer::OR
                || c == normalizer::NOT
                || c == normalizer::IF
                || c == normalizer::MOD
                || c == normalizer::MIN
                || c == normalizer::MAX,
        }
    }

    /// True when the `+`/`-` at `i` is the sign of a float literal's
    /// exponent (`1e+5`, `2.5E-10`) rather than a standalone token: the
    /// char scan that finds operator candidates has no notion of "inside
    /// a number", so this is checked directly against the preceding
    /// characters (no whitespace skipping — a genuine exponent sign never
    /// has space before it).
    ///
    /// A `e`/`E` preceded by a digit or `.` is not enough on its own: an
    /// identifier like `x1e` (letter, then digits — legal per §6's
    /// identifier grammar) ends in exactly that shape, so `x1e-5` must
    /// not have its `-` swallowed as an exponent sign. Walk the digit/`.`
    /// run back to the start of the numeric token and confirm nothing
    /// identifier-like (a letter or `_`) sits just before it.
    fn is_exponent_sign(&self, i: usize) -> bool {
        if i < 2 {
            return false;
        }
        let marker = self.chars[i - 1];
        if marker != 'e' && marker != 'E' {
            return false;
        }
        if !(self.chars[i - 2].is_ascii_digit() || self.chars[i - 2] == '.') {
            return false;
        }
        let mut k = i - 2;
        while self.chars[k].is_ascii_digit() || self.chars[k] == '.' {
            if k == 0 {
                return true;
            }
            k -= 1;
        }
        !(self.chars[k].is_ascii_alphabetic() || self.chars[k] == '_')
    }

    /// Find the rightmost (leftmost if `leftmost` is true) bracket-depth-0
    /// occurrence of any char in `targets` within `[lo, hi)`. When
    /// `exclude_unary_signs` is set, a `+`/`-` match is skipped when it is
    /// in unary position.
    fn find_depth0(
        &self,
        lo: usize,
        hi: usize,
        targets: &[char],
        leftmost: bool,
        exclude_unary_signs: bool,
    ) -> Option<usize> {
        let mut depth = 0i32;
        let mut found: Option<usize> = None;
        let mut i = lo;
        while i < hi {
            let c = self.chars[i];
            match c {
                '(' => depth += 1,
                ')' => depth -= 1,
                _ => {
                    if depth == 0 && targets.contains(&c) {
                        let is_sign = c == '+' || c == '-';
                        let skip = (is_sign && self.is_exponent_sign(i))
                            || (exclude_unary_signs
                                && is_sign
                                && Self::forces_unary_context(self.prev_non_ws(lo, i)));
                        if !skip {
                            found = Some(i);
                            if leftmost {
                                return found;
                            }
                        }
                    }
                }
            }
            i += 1;
        }
        found
    }

    fn binary_node(&self, op: BinaryOp, lo: usize, hi: usize, split: usize, depth: usize) -> Result<ExprNode, ParseError> {
        let left = self.parse_at_level(lo, split, 1, depth + 1)?;
        let right = self.parse_at_level(split + 1, hi, 1, depth + 1)?;
        Ok(ExprNode::BinaryOp {
            op,
            tolerance: self.config.comparison_tolerance,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn parse_at_level(&self, lo: usize, hi: usize, level: u8, depth: usize) -> Result<ExprNode, ParseError> {
        let (lo, hi) = self.trim(lo, hi);
        self.check_depth(depth, lo)?;
        if lo >= hi {
            return Err(ParseError::EmptySubexpression { position: lo });
        }

        match level {
            1 => {
                if let Some(split) = self.find_depth0(lo, hi, &[normalizer::OR], false, false) {
                    return self.binary_node(BinaryOp::Or, lo, hi, split, depth);
                }
                self.parse_at_level(lo, hi, 2, depth)
            }
            2 => {
                if let Some(split) = self.find_depth0(lo, hi, &[normalizer::AND], false, false) {
                    return self.binary_node(BinaryOp::And, lo, hi, split, depth);
                }
                self.parse_at_level(lo, hi, 3, depth)
            }
            3 => {
                if self.chars[lo] == normalizer::NOT {
                    let operand = self.parse_at_level(lo + 1, hi, 1, depth + 1)?;
                    return Ok(ExprNode::UnaryOp {
                        op: UnaryOp::Not,
                        operand: Box::new(operand),
                    });
                }
                self.parse_at_level(lo, hi, 4, depth)
            }
            4 => {
                let targets: Vec<char> = COMPARISON_OPS.iter().map(|(c, _)| *c).collect();
                if let Some(split) = self.find_depth0(lo, hi, &targets, false, false) {
                    let c = self.chars[split];
                    let op = COMPARISON_OPS.iter().find(|(cc, _)| *cc == c).unwrap().1;
                    return self.binary_node(op, lo, hi, split, depth);
                }
                self.parse_at_level(lo, hi, 5, depth)
            }
            5 => {
                if let Some(split) = self.find_depth0(lo, hi, &['+', '-'], false, true) {
                    let op = if self.chars[split] == '+' { BinaryOp::Add } else { BinaryOp::Sub };
                    return self.binary_node(op, lo, hi, split, depth);
                }
                self.parse_at_level(lo, hi, 6, depth)
            }
            6 => {
                if let Some(split) = self.find_depth0(lo, hi, &['*', '/'], false, false) {
                    let op = if self.chars[split] == '*' { BinaryOp::Mul } else { BinaryOp::Div };
                    return self.binary_node(op, lo, hi, split, depth);
                }
                self.parse_at_level(lo, hi, 7, depth)
            }
            7 => {
                if self.chars[lo] == '+' || self.chars[lo] == '-' {
                    let op = if self.chars[lo] == '+' { UnaryOp::UPlus } else { UnaryOp::UMinus };
                    let operand = self.parse_at_level(lo + 1, hi, 1, depth + 1)?;
                    return Ok(ExprNode::UnaryOp { op, operand: Box::new(operand) });
                }
                self.parse_at_level(lo, hi, 8, depth)
            }
            8 => {
                if let Some(split) = self.find_depth0(lo, hi, &['^'], true, false) {
                    return self.binary_node(BinaryOp::Pow, lo, hi, split, depth);
                }
                self.parse_at_level(lo, hi, 9, depth)
            }
            _ => self.parse_primary(lo, hi, depth),
        }
    }

    fn parse_primary(&self, lo: usize, hi: usize, depth: usize) -> Result<ExprNode, ParseError> {
        let (lo, hi) = self.trim(lo, hi);
        if lo >= hi {
            return Err(ParseError::EmptySubexpression { position: lo });
        }
        let c = self.chars[lo];

        if c == '(' {
            let close = self.matching_paren(lo, hi)?;
            if close == hi - 1 {
                return self.parse_at_level(lo + 1, close, 1, depth + 1);
            }
            return Err(ParseError::UnexpectedToken {
                expected: "operator".to_string(),
                found: self.chars[close + 1].to_string(),
                position: close + 1,
            });
        }

        if c == normalizer::IF {
            return self.parse_conditional(lo, hi, depth);
        }
        if c == normalizer::MOD || c == normalizer::MIN || c == normalizer::MAX {
            let name = match c {
                x if x == normalizer::MOD => "MOD",
                x if x == normalizer::MIN => "MIN",
                _ => "MAX",
            };
            return self.parse_call(name, lo, hi, depth);
        }

        if c.is_ascii_digit() || c == '.' {
            return self.parse_number(lo, hi);
        }

        if c.is_ascii_alphabetic() {
            let mut j = lo;
            while j < hi && (self.chars[j].is_ascii_alphanumeric() || self.chars[j] == '_') {
                j += 1;
            }
            let name: String = self.chars[lo..j].iter().collect();
            let (jt, _) = self.trim(j, hi);

            if jt < hi && self.chars[jt] == '(' {
                return self.parse_call_named(&name, lo, hi, jt, depth);
            }

            if j != hi {
                return Err(ParseError::UnexpectedToken {
                    expected: "end of expression".to_string(),
                    found: self.chars[j].to_string(),
                    position: j,
                });
            }

            if let Some(v) = catalogue::reserved_constant(&name, self.config.case_sensitive) {
                return Ok(ExprNode::Constant(v));
            }
            if let Some(idx) = find_name(self.config.variable_names, &name, self.config.case_sensitive) {
                return Ok(ExprNode::Variable(idx));
            }
            if let Some(idx) = find_name(self.config.parameter_names, &name, self.config.case_sensitive) {
                return Ok(ExprNode::Parameter(idx));
            }
            return Err(ParseError::UnknownIdentifier { name, position: lo });
        }

        Err(ParseError::UnexpectedToken {
            expected: "an operand".to_string(),
            found: c.to_string(),
            position: lo,
        })
    }

    fn parse_number(&self, lo: usize, hi: usize) -> Result<ExprNode, ParseError> {
        let mut j = lo;
        while j < hi && self.chars[j].is_ascii_digit() {
            j += 1;
        }
        if j < hi && self.chars[j] == '.' {
            j += 1;
            while j < hi && self.chars[j].is_ascii_digit() {
                j += 1;
            }
        }
        if j < hi && (self.chars[j] == 'e' || self.chars[j] == 'E') {
            let mut k = j + 1;
            if k < hi && (self.chars[k] == '+' || self.chars[k] == '-') {
                k += 1;
            }
            if k < hi && self.chars[k].is_ascii_digit() {
                while k < hi && self.chars[k].is_ascii_digit() {
                    k += 1;
                }
                j = k;
            }
        }
        if j != hi {
            return Err(ParseError::UnexpectedToken {
                expected: "end of number".to_string(),
                found: self.chars[j].to_string(),
                position: j,
            });
        }
        let text: String = self.chars[lo..hi].iter().collect();
        text.parse::<f64>().map(ExprNode::Constant).map_err(|_| ParseError::UnexpectedToken {
            expected: "a number".to_string(),
            found: text,
            position: lo,
        })
    }

    /// Split the contents of a parenthesized argument list (`open` is the
    /// index of `(`, `close` the index of the matching `)`) on bracket-
    /// depth-0 commas.
    fn split_args(&self, open: usize, close: usize) -> Result<Vec<(usize, usize)>, ParseError> {
        if open + 1 == close {
            return Ok(Vec::new());
        }
        let mut parts = Vec::new();
        let mut depth = 0i32;
        let mut start = open + 1;
        let mut i = start;
        while i < close {
            match self.chars[i] {
                '(' => depth += 1,
                ')' => depth -= 1,
                ',' if depth == 0 => {
                    parts.push((start, i));
                    start = i + 1;
                }
                _ => {}
            }
            i += 1;
        }
        parts.push((start, close));

        for (a, b) in &parts {
            let (ta, tb) = self.trim(*a, *b);
            if ta >= tb {
                return Err(ParseError::EmptySubexpression { position: *a });
            }
        }
        Ok(parts)
    }

    fn parse_conditional(&self, lo: usize, hi: usize, depth: usize) -> Result<ExprNode, ParseError> {
        let (open, _) = self.trim(lo + 1, hi);
        let close = self.matching_paren(open, hi)?;
        if close != hi - 1 {
            return Err(ParseError::UnexpectedToken {
                expected: "end of expression".to_string(),
                found: self.chars[close + 1].to_string(),
                position: close + 1,
            });
        }
        let parts = self.split_args(open, close)?;
        if parts.len() != 3 {
            return Err(ParseError::ArityError {
                function: "IF".to_string(),
                expected: "3".to_string(),
                got: parts.len(),
                position: lo,
            });
        }
        let cond = self.parse_at_level(parts[0].0, parts[0].1, 1, depth + 1)?;
        let then_branch = self.parse_at_level(parts[1].0, parts[1].1, 1, depth + 1)?;
        let else_branch = self.parse_at_level(parts[2].0, parts[2].1, 1, depth + 1)?;
        Ok(ExprNode::Conditional {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        })
    }

    fn parse_call(&self, name: &'static str, lo: usize, hi: usize, depth: usize) -> Result<ExprNode, ParseError> {
        let (open, _) = self.trim(lo + 1, hi);
        self.parse_call_args(name, lo, hi, open, depth)
    }

    fn parse_call_named(&self, name: &str, lo: usize, hi: usize, open: usize, depth: usize) -> Result<ExprNode, ParseError> {
        let entry = catalogue::lookup(name, self.config.case_sensitive).ok_or_else(|| ParseError::UnknownFunction {
            name: name.to_string(),
            position: lo,
        })?;
        self.parse_call_args(entry.name, lo, hi, open, depth)
    }

    fn parse_call_args(&self, name: &'static str, lo: usize, hi: usize, open: usize, depth: usize) -> Result<ExprNode, ParseError> {
        let close = self.matching_paren(open, hi)?;
        if close != hi - 1 {
            return Err(ParseError::UnexpectedToken {
                expected: "end of expression".to_string(),
                found: self.chars[close + 1].to_string(),
                position: close + 1,
            });
        }
        let parts = self.split_args(open, close)?;
        let entry = catalogue::lookup(name, true).expect("canonical catalogue name must resolve");
        if !entry.arity.accepts(parts.len()) {
            return Err(ParseError::ArityError {
                function: name.to_string(),
                expected: entry.arity.describe(),
                got: parts.len(),
                position: lo,
            });
        }
        let mut args = Vec::with_capacity(parts.len());
        for (a, b) in parts {
            args.push(self.parse_at_level(a, b, 1, depth + 1)?);
        }
        Ok(ExprNode::FunctionCall { name, args })
    }
}

fn find_name(names: &[String], needle: &str, case_sensitive: bool) -> Option<usize> {
    names.iter().position(|n| {
        if case_sensitive {
            n == needle
        } else {
            n.eq_ignore_ascii_case(needle)
        }
    })
}
