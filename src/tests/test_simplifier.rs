use exprcalc::expr::ast::ExprNode;
use exprcalc::expr::operators::BinaryOp;
use exprcalc::expr::simplifier::simplify;
use exprcalc::expr::ParsedFunction;

#[test]
fn parameter_only_subtree_folds_to_a_constant() {
    let mut pf = ParsedFunction::new();
    pf.set_variable_names(vec!["x".to_string()]);
    pf.set_parameter_names(vec!["scale".to_string()]);
    pf.set_parameter_values(vec![3.0]).unwrap();
    pf.parse("x * (scale + 1)").unwrap();

    // Raw root still carries the Parameter reference.
    match pf.root().unwrap() {
        ExprNode::BinaryOp { right, .. } => {
            assert!(!matches!(**right, ExprNode::Constant(_)));
        }
        other => panic!("expected a BinaryOp root, got {other:?}"),
    }

    // The simplified tree has folded `scale + 1` to Constant(4.0).
    match pf.simplified().unwrap() {
        ExprNode::BinaryOp { right, .. } => {
            assert!(matches!(**right, ExprNode::Constant(v) if v == 4.0));
        }
        other => panic!("expected a BinaryOp root, got {other:?}"),
    }
    assert_eq!(pf.evaluate(&[2.0]).unwrap(), 8.0);
}

#[test]
fn subtree_containing_a_variable_never_folds() {
    let mut pf = ParsedFunction::new();
    pf.set_variable_names(vec!["x".to_string()]);
    pf.parse("x + 1").unwrap();
    match pf.simplified().unwrap() {
        ExprNode::BinaryOp { left, .. } => {
            assert!(matches!(**left, ExprNode::Variable(0)));
        }
        other => panic!("expected a BinaryOp root, got {other:?}"),
    }
}

#[test]
fn domain_error_prone_subtree_is_left_unfolded() {
    let mut pf = ParsedFunction::new();
    pf.set_parameter_names(vec!["x".to_string()]);
    pf.set_parameter_values(vec![-1.0]).unwrap();
    pf.parse("SQRT(x)").unwrap();
    // simplify() must not panic or lose the error — it just leaves this
    // subtree as-is since folding it would have to raise a DomainError.
    assert!(matches!(pf.simplified().unwrap(), ExprNode::FunctionCall { .. }));
    assert!(pf.evaluate(&[]).is_err());
}

#[test]
fn disabling_simplification_falls_back_to_the_raw_tree() {
    let mut pf = ParsedFunction::new();
    pf.set_variable_names(vec!["x".to_string()]);
    pf.set_parameter_names(vec!["scale".to_string()]);
    pf.set_parameter_values(vec![3.0]).unwrap();
    pf.set_simplify_allowed(false);
    pf.parse("x * scale").unwrap();
    assert!(pf.simplified().is_none());
    assert_eq!(pf.evaluate(&[2.0]).unwrap(), 6.0);
}

#[test]
fn setting_new_parameter_values_does_not_retroactively_change_an_already_simplified_tree() {
    let mut pf = ParsedFunction::new();
    pf.set_parameter_names(vec!["k".to_string()]);
    pf.set_parameter_values(vec![2.0]).unwrap();
    pf.parse("k * 10").unwrap();
    assert_eq!(pf.evaluate(&[]).unwrap(), 20.0);

    pf.set_parameter_values(vec![5.0]).unwrap();
    // Still 20.0: the simplified tree already baked k=2 in as a constant.
    assert_eq!(pf.evaluate(&[]).unwrap(), 20.0);

    pf.refresh_simplified();
    assert_eq!(pf.evaluate(&[]).unwrap(), 50.0);
}

#[test]
fn simplify_directly_on_a_tree() {
    let tree = ExprNode::BinaryOp {
        op: BinaryOp::Add,
        tolerance: 0.0,
        left: Box::new(ExprNode::Parameter(0)),
        right: Box::new(ExprNode::Constant(1.0)),
    };
    let folded = simplify(&tree, &[4.0], 0.0);
    assert!(matches!(folded, ExprNode::Constant(v) if v == 5.0));
}
