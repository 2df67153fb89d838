use exprcalc::expr;

#[test]
fn sqrt_of_negative_is_domain_error() {
    assert!(expr::evaluate("SQRT(-1)", &[]).is_err());
}

#[test]
fn ln_of_nonpositive_is_domain_error() {
    assert!(expr::evaluate("LN(0)", &[]).is_err());
    assert!(expr::evaluate("LN(-1)", &[]).is_err());
}

#[test]
fn log10_and_log2_of_nonpositive_are_domain_errors() {
    assert!(expr::evaluate("LOG10(0)", &[]).is_err());
    assert!(expr::evaluate("LOG2(-5)", &[]).is_err());
}

#[test]
fn asin_acos_out_of_range_are_domain_errors() {
    assert!(expr::evaluate("ASIN(2)", &[]).is_err());
    assert!(expr::evaluate("ACOS(-2)", &[]).is_err());
}

#[test]
fn division_and_mod_by_zero_are_domain_errors() {
    assert!(expr::evaluate("5 / 0", &[]).is_err());
    assert!(expr::evaluate("MOD(5, 0)", &[]).is_err());
}

#[test]
fn zero_to_the_zero_is_one() {
    assert_eq!(expr::evaluate("0^0", &[]).unwrap(), 1.0);
}

#[test]
fn zero_to_a_negative_power_is_domain_error() {
    assert!(expr::evaluate("0^-1", &[]).is_err());
}

#[test]
fn negative_base_with_noninteger_exponent_is_domain_error() {
    assert!(expr::evaluate("(-8)^0.5", &[]).is_err());
}

#[test]
fn negative_base_with_integer_exponent_is_fine() {
    assert_eq!(expr::evaluate("(-2)^3", &[]).unwrap(), -8.0);
}

#[test]
fn avg_of_empty_args_is_domain_error() {
    // AVG requires at least one argument at the arity level already, but
    // SUM() with zero args is legal and should be zero.
    assert_eq!(expr::evaluate("SUM(1, 2, 3)", &[]).unwrap(), 6.0);
    assert!(expr::evaluate("AVG()", &[]).is_err());
}

#[test]
fn logical_operator_requires_boolish_operand() {
    // 0.5 is not within tolerance (0.0) of 0 or 1.
    assert!(expr::evaluate("0.5 AND 1", &[]).is_err());
}

#[test]
fn tolerant_equality_uses_parsed_function_tolerance() {
    let mut pf = exprcalc::expr::ParsedFunction::new();
    pf.set_variable_names(vec!["a".to_string(), "b".to_string()]);
    pf.set_comparison_tolerance(0.01);
    pf.parse("a = b").unwrap();
    assert_eq!(pf.evaluate(&[1.0, 1.005]).unwrap(), 1.0);
    assert_eq!(pf.evaluate(&[1.0, 1.1]).unwrap(), 0.0);
}
