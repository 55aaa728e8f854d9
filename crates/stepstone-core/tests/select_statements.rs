//! End-to-end statement rendering through the fluent step API.

mod common;

use common::{multi_schema_builder, v1_builder, v2_builder};
use stepstone_core::{e, AggregateCall, Literal, ADD, ASTERISK, OR};

// =============================================================================
// Legacy (version 1) catalog: bare identifiers and literals
// =============================================================================

#[test]
fn test_single_column_single_table() {
    let (mut sql, t) = v1_builder();
    let col1 = t.column("col1").unwrap();
    let rendered = sql.select(col1).unwrap().from(&t).unwrap().get_sql().unwrap();
    assert_eq!(rendered, "SELECT col1 FROM testTable");
}

#[test]
fn test_or_group_renders_parenthesized() {
    let (mut sql, t) = v1_builder();
    let col1 = t.column("col1").unwrap();
    let col2 = t.column("col2").unwrap();
    let rendered = sql
        .select((col1.clone(), col2.clone()))
        .unwrap()
        .from(&t)
        .unwrap()
        .where_clause((col1.eq("x").unwrap(), OR, col2.eq("y").unwrap()))
        .unwrap()
        .get_sql()
        .unwrap();
    assert_eq!(
        rendered,
        "SELECT col1, col2 FROM testTable WHERE ( col1 = x OR col2 = y )"
    );
}

// =============================================================================
// Version 2 catalog: quoted identifiers, quoted text, semicolon
// =============================================================================

#[test]
fn test_literal_select_item() {
    let (mut sql, t) = v2_builder();
    let rendered = sql.select(1).unwrap().from(&t).unwrap().get_sql().unwrap();
    assert_eq!(rendered, r#"SELECT 1 FROM "testTable";"#);
}

#[test]
fn test_asterisk() {
    let (mut sql, t) = v2_builder();
    let rendered = sql
        .select(ASTERISK)
        .unwrap()
        .from(&t)
        .unwrap()
        .get_sql()
        .unwrap();
    assert_eq!(rendered, r#"SELECT * FROM "testTable";"#);
}

#[test]
fn test_text_literals_are_quoted_and_escaped() {
    let (mut sql, t) = v2_builder();
    let col1 = t.column("col1").unwrap();
    let rendered = sql
        .select(col1.clone())
        .unwrap()
        .from(&t)
        .unwrap()
        .where_clause(col1.eq("it's").unwrap())
        .unwrap()
        .get_sql()
        .unwrap();
    assert_eq!(
        rendered,
        r#"SELECT "col1" FROM "testTable" WHERE "col1" = 'it''s';"#
    );
}

#[test]
fn test_column_alias() {
    let (mut sql, t) = v2_builder();
    let col1 = t.column("col1").unwrap();
    let rendered = sql
        .select(col1.as_alias("C1"))
        .unwrap()
        .from(&t)
        .unwrap()
        .get_sql()
        .unwrap();
    assert_eq!(rendered, r#"SELECT "col1" AS "C1" FROM "testTable";"#);
}

#[test]
fn test_select_distinct() {
    let (mut sql, t) = v2_builder();
    let col1 = t.column("col1").unwrap();
    let rendered = sql
        .select_distinct(col1)
        .unwrap()
        .from(&t)
        .unwrap()
        .get_sql()
        .unwrap();
    assert_eq!(rendered, r#"SELECT DISTINCT "col1" FROM "testTable";"#);
}

#[test]
fn test_select_all() {
    let (mut sql, t) = v2_builder();
    let col1 = t.column("col1").unwrap();
    let rendered = sql
        .select_all(col1)
        .unwrap()
        .from(&t)
        .unwrap()
        .get_sql()
        .unwrap();
    assert_eq!(rendered, r#"SELECT ALL "col1" FROM "testTable";"#);
}

#[test]
fn test_arithmetic_expression_select_item() {
    let (mut sql, t) = v2_builder();
    let col3 = t.column("col3").unwrap();
    let col4 = t.column("col4").unwrap();
    let rendered = sql
        .select(e(col3, ADD, col4).unwrap())
        .unwrap()
        .from(&t)
        .unwrap()
        .get_sql()
        .unwrap();
    assert_eq!(rendered, r#"SELECT ("col3" + "col4") FROM "testTable";"#);
}

#[test]
fn test_where_and_or_chaining() {
    let (mut sql, t) = v2_builder();
    let col1 = t.column("col1").unwrap();
    let col3 = t.column("col3").unwrap();
    let rendered = sql
        .select(col1.clone())
        .unwrap()
        .from(&t)
        .unwrap()
        .where_clause(col1.eq("a").unwrap())
        .unwrap()
        .and(col3.gt(5).unwrap())
        .unwrap()
        .or(col3.lt(2).unwrap())
        .unwrap()
        .get_sql()
        .unwrap();
    assert_eq!(
        rendered,
        r#"SELECT "col1" FROM "testTable" WHERE "col1" = 'a' AND "col3" > 5 OR "col3" < 2;"#
    );
}

#[test]
fn test_is_null_rewriting() {
    let (mut sql, t) = v2_builder();
    let col1 = t.column("col1").unwrap();
    let rendered = sql
        .select(col1.clone())
        .unwrap()
        .from(&t)
        .unwrap()
        .where_clause(col1.eq(Literal::Null).unwrap())
        .unwrap()
        .get_sql()
        .unwrap();
    assert_eq!(
        rendered,
        r#"SELECT "col1" FROM "testTable" WHERE "col1" IS NULL;"#
    );

    let (mut sql, t) = v2_builder();
    let col1 = t.column("col1").unwrap();
    let rendered = sql
        .select(col1.clone())
        .unwrap()
        .from(&t)
        .unwrap()
        .where_clause(col1.is_not_null())
        .unwrap()
        .get_sql()
        .unwrap();
    assert_eq!(
        rendered,
        r#"SELECT "col1" FROM "testTable" WHERE "col1" IS NOT NULL;"#
    );
}

#[test]
fn test_group_by_and_having_with_aggregate() {
    let (mut sql, t) = v2_builder();
    let col1 = t.column("col1").unwrap();
    let col3 = t.column("col3").unwrap();
    let sum = AggregateCall::sum(col3).unwrap();
    let rendered = sql
        .select((col1.clone(), sum.clone()))
        .unwrap()
        .from(&t)
        .unwrap()
        .group_by(col1)
        .unwrap()
        .having(sum.gt(10).unwrap())
        .unwrap()
        .get_sql()
        .unwrap();
    assert_eq!(
        rendered,
        r#"SELECT "col1", SUM("col3") FROM "testTable" GROUP BY "col1" HAVING SUM("col3") > 10;"#
    );
}

#[test]
fn test_limit_and_offset() {
    let (mut sql, t) = v2_builder();
    let col1 = t.column("col1").unwrap();
    let rendered = sql
        .select(col1)
        .unwrap()
        .from(&t)
        .unwrap()
        .limit(10)
        .unwrap()
        .offset(20)
        .unwrap()
        .get_sql()
        .unwrap();
    assert_eq!(
        rendered,
        r#"SELECT "col1" FROM "testTable" LIMIT 10 OFFSET 20;"#
    );
}

#[test]
fn test_limit_all_and_limit_null() {
    let (mut sql, t) = v2_builder();
    let col1 = t.column("col1").unwrap();
    let rendered = sql
        .select(col1.clone())
        .unwrap()
        .from(&t)
        .unwrap()
        .limit_all()
        .get_sql()
        .unwrap();
    assert_eq!(rendered, r#"SELECT "col1" FROM "testTable" LIMIT ALL;"#);

    let rendered = sql
        .select(col1)
        .unwrap()
        .from(&t)
        .unwrap()
        .limit_null()
        .get_sql()
        .unwrap();
    assert_eq!(rendered, r#"SELECT "col1" FROM "testTable" LIMIT NULL;"#);
}

#[test]
fn test_cross_join_qualifies_columns() {
    let (mut sql, users, orders, _) = multi_schema_builder();
    let name = users.column("name").unwrap();
    let total = orders.column("total").unwrap();
    let rendered = sql
        .select((name, total))
        .unwrap()
        .from(&users)
        .unwrap()
        .cross_join(&orders)
        .unwrap()
        .get_sql()
        .unwrap();
    assert_eq!(
        rendered,
        r#"SELECT "users"."name", "orders"."total" FROM "users" CROSS JOIN "orders";"#
    );
}

// =============================================================================
// Builder reuse
// =============================================================================

#[test]
fn test_builder_is_reusable_after_get_sql() {
    let (mut sql, t) = v2_builder();
    let col1 = t.column("col1").unwrap();
    let col3 = t.column("col3").unwrap();

    let first = sql
        .select(col1.clone())
        .unwrap()
        .from(&t)
        .unwrap()
        .where_clause(col3.eq_param(7).unwrap())
        .unwrap()
        .get_binds()
        .unwrap();
    assert_eq!(
        first.sql,
        r#"SELECT "col1" FROM "testTable" WHERE "col3" = $1;"#
    );
    assert_eq!(first.values, vec![Literal::Int(7)]);

    // no state or values leak into the next statement
    let second = sql
        .select(col1)
        .unwrap()
        .from(&t)
        .unwrap()
        .get_binds()
        .unwrap();
    assert_eq!(second.sql, r#"SELECT "col1" FROM "testTable";"#);
    assert!(second.values.is_empty());
}

#[test]
fn test_abandoned_chain_is_discarded() {
    let (mut sql, t) = v2_builder();
    let col1 = t.column("col1").unwrap();
    let col2 = t.column("col2").unwrap();

    // started but never finalized
    let _ = sql.select(col2).unwrap();

    let rendered = sql
        .select(col1)
        .unwrap()
        .from(&t)
        .unwrap()
        .get_sql()
        .unwrap();
    assert_eq!(rendered, r#"SELECT "col1" FROM "testTable";"#);
}

#[test]
fn test_explicit_reset() {
    let (mut sql, t) = v2_builder();
    let col1 = t.column("col1").unwrap();
    let _ = sql.select(col1.clone()).unwrap();
    sql.reset();
    let rendered = sql
        .select(col1)
        .unwrap()
        .from(&t)
        .unwrap()
        .get_sql()
        .unwrap();
    assert_eq!(rendered, r#"SELECT "col1" FROM "testTable";"#);
}
