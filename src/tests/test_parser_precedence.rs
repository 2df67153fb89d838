use exprcalc::expr;

fn eval(expression: &str) -> f64 {
    expr::evaluate(expression, &[]).unwrap()
}

#[test]
fn right_associative_power_chain() {
    assert_eq!(eval("2^3^2"), 512.0);
}

#[test]
fn unary_minus_binds_looser_than_power() {
    assert_eq!(eval("-2^2"), -4.0);
}

#[test]
fn negative_exponent() {
    assert_eq!(eval("2^-1"), 0.5);
}

#[test]
fn unary_sign_after_binary_operator() {
    assert_eq!(eval("2+-3"), -1.0);
}

#[test]
fn unary_minus_binds_tighter_than_multiplication() {
    assert_eq!(eval("-2*3"), -6.0);
}

#[test]
fn parens_override_precedence() {
    assert_eq!(eval("(2 + 3) * 4"), 20.0);
}

#[test]
fn standard_precedence_ladder() {
    assert_eq!(eval("2 + 3 * 4"), 14.0);
    assert_eq!(eval("2 * 3 ^ 2"), 18.0);
}

#[test]
fn comparison_and_logical_mix() {
    assert_eq!(eval("1 = 1 AND 2 > 1"), 1.0);
    assert_eq!(eval("(1 = 2) OR (2 > 1)"), 1.0);
    assert_eq!(eval("NOT (1 = 2)"), 1.0);
    assert_eq!(eval("NOT 1 = 2"), 1.0);
}

#[test]
fn not_binds_tighter_than_and() {
    // NOT 0 AND 1 == (NOT 0) AND 1 == 1
    assert_eq!(eval("NOT 0 AND 1"), 1.0);
}

#[test]
fn conditional_form() {
    assert_eq!(eval("IF(1 > 0, 100, 200)"), 100.0);
    assert_eq!(eval("IF(1 < 0, 100, 200)"), 200.0);
}

#[test]
fn conditional_form_tolerates_space_before_the_paren() {
    // "IF (" (space before the argument list) must normalize and parse
    // the same as "IF(".
    assert_eq!(eval("IF (1 > 0, 100, 200)"), 100.0);
    assert_eq!(eval("MOD (7, 3)"), 1.0);
}

#[test]
fn identifier_ending_in_e_before_a_minus_is_not_mistaken_for_an_exponent() {
    // "x1e" is a legal identifier (letter, then alphanumerics) whose tail
    // happens to look like a float's mantissa-plus-exponent-marker; the
    // `-` in "x1e-5" is a subtraction operator, not an exponent sign.
    let mut pf = exprcalc::expr::ParsedFunction::new();
    pf.set_variable_names(vec!["x1e".to_string()]);
    pf.parse("x1e-5").unwrap();
    assert_eq!(pf.evaluate(&[12.0]).unwrap(), 7.0);
}

#[test]
fn numeric_exponent_sign_is_still_recognized() {
    assert_eq!(eval("1e+2"), 100.0);
    assert_eq!(eval("2.5E-1"), 0.25);
}

#[test]
fn call_form_keywords() {
    assert_eq!(eval("MOD(7, 3)"), 1.0);
    assert_eq!(eval("MIN(3, 7, 2)"), 2.0);
    assert_eq!(eval("MAX(3, 7, 2)"), 7.0);
}

#[test]
fn reserved_constants() {
    assert!((eval("PI") - std::f64::consts::PI).abs() < 1e-12);
    assert!((eval("E") - std::f64::consts::E).abs() < 1e-12);
}

#[test]
fn unknown_identifier_errors() {
    assert!(expr::evaluate("x + 5", &[]).is_err());
}

#[test]
fn unbalanced_parens_error() {
    assert!(expr::evaluate("(2 + 3", &[]).is_err());
}

#[test]
fn empty_argument_errors() {
    assert!(expr::evaluate("SIN()", &[]).is_err());
    assert!(expr::evaluate("MAX(1, , 2)", &[]).is_err());
}

#[test]
fn arity_mismatch_errors() {
    assert!(expr::evaluate("SIN(1, 2)", &[]).is_err());
    assert!(expr::evaluate("MIN(1)", &[]).is_err());
}
