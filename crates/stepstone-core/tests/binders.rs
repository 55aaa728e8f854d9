//! Positional parameter behavior: ordinal assignment, value order and
//! reuse across statements.

mod common;

use common::v2_builder;
use stepstone_core::{Binder, Literal};

#[test]
fn test_select_item_binder() {
    let (mut sql, t) = v2_builder();
    let stmt = sql
        .select(Binder::new(5))
        .unwrap()
        .from(&t)
        .unwrap()
        .get_binds()
        .unwrap();
    assert_eq!(stmt.sql, r#"SELECT $1 FROM "testTable";"#);
    assert_eq!(stmt.values, vec![Literal::Int(5)]);
}

#[test]
fn test_condition_binders_take_ordinals_left_to_right() {
    let (mut sql, t) = v2_builder();
    let col1 = t.column("col1").unwrap();
    let col3 = t.column("col3").unwrap();
    let stmt = sql
        .select(col1.clone())
        .unwrap()
        .from(&t)
        .unwrap()
        .where_clause(col1.eq_param("a").unwrap())
        .unwrap()
        .and(col3.gt_param(9).unwrap())
        .unwrap()
        .get_binds()
        .unwrap();
    assert_eq!(
        stmt.sql,
        r#"SELECT "col1" FROM "testTable" WHERE "col1" = $1 AND "col3" > $2;"#
    );
    assert_eq!(
        stmt.values,
        vec![Literal::Text(String::from("a")), Literal::Int(9)]
    );
}

#[test]
fn test_ordinals_follow_introducing_call_order() {
    // every binder registers at the call that introduces it, so the
    // where binder outranks the later limit binder
    let (mut sql, t) = v2_builder();
    let col3 = t.column("col3").unwrap();
    let stmt = sql
        .select(Binder::new(1))
        .unwrap()
        .from(&t)
        .unwrap()
        .where_clause(col3.eq_param(7).unwrap())
        .unwrap()
        .limit_param(10)
        .get_binds()
        .unwrap();
    assert_eq!(
        stmt.sql,
        r#"SELECT $1 FROM "testTable" WHERE "col3" = $2 LIMIT $3;"#
    );
    assert_eq!(
        stmt.values,
        vec![Literal::Int(1), Literal::Int(7), Literal::Int(10)]
    );
}

#[test]
fn test_limit_and_offset_params() {
    let (mut sql, t) = v2_builder();
    let col1 = t.column("col1").unwrap();
    let stmt = sql
        .select(col1)
        .unwrap()
        .from(&t)
        .unwrap()
        .limit_param(10)
        .offset_param(20)
        .get_binds()
        .unwrap();
    assert_eq!(
        stmt.sql,
        r#"SELECT "col1" FROM "testTable" LIMIT $1 OFFSET $2;"#
    );
    assert_eq!(stmt.values, vec![Literal::Int(10), Literal::Int(20)]);
}

#[test]
fn test_same_binder_used_twice_registers_once() {
    let (mut sql, t) = v2_builder();
    let col1 = t.column("col1").unwrap();
    let col2 = t.column("col2").unwrap();
    let bound = Binder::new("x");
    let stmt = sql
        .select(col1.clone())
        .unwrap()
        .from(&t)
        .unwrap()
        .where_clause(col1.eq(bound.clone()).unwrap())
        .unwrap()
        .and(col2.eq(bound).unwrap())
        .unwrap()
        .get_binds()
        .unwrap();
    assert_eq!(
        stmt.sql,
        r#"SELECT "col1" FROM "testTable" WHERE "col1" = $1 AND "col2" = $1;"#
    );
    assert_eq!(stmt.values, vec![Literal::Text(String::from("x"))]);
}

#[test]
fn test_binder_can_be_reused_on_a_later_statement() {
    let (mut sql, t) = v2_builder();
    let col1 = t.column("col1").unwrap();
    let col3 = t.column("col3").unwrap();
    let bound = Binder::new("x");

    let first = sql
        .select(col1.clone())
        .unwrap()
        .from(&t)
        .unwrap()
        .where_clause(col1.eq(bound.clone()).unwrap())
        .unwrap()
        .get_binds()
        .unwrap();
    assert_eq!(
        first.sql,
        r#"SELECT "col1" FROM "testTable" WHERE "col1" = $1;"#
    );

    // the reused binder registers fresh, after the new statement's
    // earlier placeholder
    let second = sql
        .select(col1.clone())
        .unwrap()
        .from(&t)
        .unwrap()
        .where_clause(col3.eq_param(1).unwrap())
        .unwrap()
        .and(col1.eq(bound).unwrap())
        .unwrap()
        .get_binds()
        .unwrap();
    assert_eq!(
        second.sql,
        r#"SELECT "col1" FROM "testTable" WHERE "col3" = $1 AND "col1" = $2;"#
    );
    assert_eq!(
        second.values,
        vec![Literal::Int(1), Literal::Text(String::from("x"))]
    );
}
