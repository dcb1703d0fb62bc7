use crate::ast::{Expression, count_indirection};

fn var(name: &str, ty: &str) -> Expression {
    Expression::Var {
        name: name.to_string(),
        ty: Some(ty.to_string()),
    }
}

#[test]
fn indirection_counts_trailing_stars() {
    assert_eq!(count_indirection("Tuple"), 0);
    assert_eq!(count_indirection("Shape*"), 1);
    assert_eq!(count_indirection("int**"), 2);
    assert_eq!(var("s", "Shape*").indirection(), 1);
}

#[test]
fn unresolved_type_counts_as_depth_zero() {
    let unbound = Expression::Var {
        name: "x".to_string(),
        ty: None,
    };
    assert_eq!(unbound.indirection(), 0);
}

#[test]
fn dereference_strips_one_level() {
    let expr = var("s", "Shape**").dereference();
    assert_eq!(expr.type_name(), Some("Shape*"));
    let expr = expr.dereference();
    assert_eq!(expr.type_name(), Some("Shape"));
}

#[test]
fn dereference_all_reaches_value_type() {
    let expr = var("s", "Shape**").dereference_all();
    assert_eq!(expr.type_name(), Some("Shape"));
    assert_eq!(expr.indirection(), 0);
}

#[test]
fn address_of_then_dereference_restores_type() {
    let expr = var("t", "Tuple").address_of();
    assert_eq!(expr.type_name(), Some("Tuple*"));
    let expr = expr.dereference();
    assert_eq!(expr.type_name(), Some("Tuple"));
}

#[test]
fn match_indirection_dereferences_down() {
    let target = var("t", "Shape");
    let expr = var("s", "Shape**").match_indirection(&target);
    assert_eq!(expr.indirection(), target.indirection());
    assert_eq!(expr.type_name(), Some("Shape"));
}

#[test]
fn match_indirection_takes_addresses_up() {
    let target = var("t", "Shape**");
    let expr = var("s", "Shape").match_indirection(&target);
    assert_eq!(expr.indirection(), 2);
    assert_eq!(expr.type_name(), Some("Shape**"));
}

#[test]
fn match_indirection_is_identity_when_aligned() {
    let target = var("t", "Shape*");
    let expr = var("s", "Shape*").match_indirection(&target);
    assert_eq!(expr, var("s", "Shape*"));
}

#[test]
fn match_indirection_against_unresolved_target_flattens() {
    let target = Expression::Var {
        name: "x".to_string(),
        ty: None,
    };
    let expr = var("s", "Shape*").match_indirection(&target);
    assert_eq!(expr.type_name(), Some("Shape"));
}
