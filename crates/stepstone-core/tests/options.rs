//! Rendering option behavior: semicolon, alias `AS` keywords, table
//! and schema qualification.

mod common;

use common::{multi_schema_builder, v2_builder, v2_builder_with};
use stepstone_core::{
    AliasAsPolicy, Builder, BuilderOptions, Column, Database, Schema, SchemaQualifyPolicy, Table,
    TableQualifyPolicy,
};

#[test]
fn test_semicolon_can_be_dropped() {
    let (mut sql, t) = v2_builder_with(BuilderOptions {
        use_semicolon: false,
        ..BuilderOptions::default()
    });
    let col1 = t.column("col1").unwrap();
    let rendered = sql.select(col1).unwrap().from(&t).unwrap().get_sql().unwrap();
    assert_eq!(rendered, r#"SELECT "col1" FROM "testTable""#);
}

// =============================================================================
// Alias AS keywords
// =============================================================================

#[test]
fn test_column_alias_without_as() {
    let (mut sql, t) = v2_builder_with(BuilderOptions {
        add_as_before_column_alias: AliasAsPolicy::Never,
        ..BuilderOptions::default()
    });
    let col1 = t.column("col1").unwrap();
    let rendered = sql
        .select(col1.as_alias("C1"))
        .unwrap()
        .from(&t)
        .unwrap()
        .get_sql()
        .unwrap();
    assert_eq!(rendered, r#"SELECT "col1" "C1" FROM "testTable";"#);
}

#[test]
fn test_table_alias_with_and_without_as() {
    let (mut sql, t) = v2_builder();
    let col1 = t.column("col1").unwrap();
    let rendered = sql
        .select(col1)
        .unwrap()
        .from(t.alias("T"))
        .unwrap()
        .get_sql()
        .unwrap();
    assert_eq!(rendered, r#"SELECT "col1" FROM "testTable" AS "T";"#);

    let (mut sql, t) = v2_builder_with(BuilderOptions {
        add_as_before_table_alias: AliasAsPolicy::Never,
        ..BuilderOptions::default()
    });
    let col1 = t.column("col1").unwrap();
    let rendered = sql
        .select(col1)
        .unwrap()
        .from(t.alias("T"))
        .unwrap()
        .get_sql()
        .unwrap();
    assert_eq!(rendered, r#"SELECT "col1" FROM "testTable" "T";"#);
}

#[test]
fn test_qualified_column_uses_table_alias() {
    let (mut sql, t) = v2_builder_with(BuilderOptions {
        add_table_name: TableQualifyPolicy::Always,
        ..BuilderOptions::default()
    });
    let col1 = t.column("col1").unwrap();
    let rendered = sql
        .select(col1)
        .unwrap()
        .from(t.alias("T"))
        .unwrap()
        .get_sql()
        .unwrap();
    assert_eq!(rendered, r#"SELECT "T"."col1" FROM "testTable" AS "T";"#);
}

// =============================================================================
// Table-name qualification
// =============================================================================

#[test]
fn test_single_table_is_unqualified_by_default() {
    let (mut sql, t) = v2_builder();
    let col1 = t.column("col1").unwrap();
    let rendered = sql.select(col1).unwrap().from(&t).unwrap().get_sql().unwrap();
    assert_eq!(rendered, r#"SELECT "col1" FROM "testTable";"#);
}

#[test]
fn test_add_table_name_always() {
    let (mut sql, t) = v2_builder_with(BuilderOptions {
        add_table_name: TableQualifyPolicy::Always,
        ..BuilderOptions::default()
    });
    let col1 = t.column("col1").unwrap();
    let rendered = sql.select(col1).unwrap().from(&t).unwrap().get_sql().unwrap();
    assert_eq!(rendered, r#"SELECT "testTable"."col1" FROM "testTable";"#);
}

#[test]
fn test_two_tables_qualify_by_default() {
    let (mut sql, users, orders, _) = multi_schema_builder();
    let name = users.column("name").unwrap();
    let total = orders.column("total").unwrap();
    let rendered = sql
        .select((name, total))
        .unwrap()
        .from((&users, &orders))
        .unwrap()
        .get_sql()
        .unwrap();
    assert_eq!(
        rendered,
        r#"SELECT "users"."name", "orders"."total" FROM "users", "orders";"#
    );
}

// =============================================================================
// Schema-name qualification
// =============================================================================

#[test]
fn test_public_schema_always() {
    let (mut sql, t) = v2_builder_with(BuilderOptions {
        add_public_schema_name: SchemaQualifyPolicy::Always,
        ..BuilderOptions::default()
    });
    let col1 = t.column("col1").unwrap();
    let rendered = sql.select(col1).unwrap().from(&t).unwrap().get_sql().unwrap();
    assert_eq!(rendered, r#"SELECT "col1" FROM "public"."testTable";"#);
}

#[test]
fn test_other_schema_is_always_qualified() {
    let (mut sql, _, _, audit_users) = multi_schema_builder();
    let name = audit_users.column("name").unwrap();
    let rendered = sql
        .select(name)
        .unwrap()
        .from(&audit_users)
        .unwrap()
        .get_sql()
        .unwrap();
    assert_eq!(rendered, r#"SELECT "name" FROM "audit"."users";"#);
}

#[test]
fn test_public_prefix_appears_when_other_schema_mentioned() {
    let (mut sql, users, _, audit_users) = multi_schema_builder();
    let name = users.column("name").unwrap();
    let rendered = sql
        .select(name)
        .unwrap()
        .from((&users, &audit_users))
        .unwrap()
        .get_sql()
        .unwrap();
    // "users" is ambiguous across the two FROM schemas, so the column
    // prefix carries the schema as well
    assert_eq!(
        rendered,
        r#"SELECT "public"."users"."name" FROM "public"."users", "audit"."users";"#
    );
}

#[test]
fn test_schema_policy_governs_from_items_not_column_prefixes() {
    let test_table = Table::new("testTable", vec![Column::text("col2")]);
    let table1 = Table::new("table1", vec![Column::text("col1")]);
    let db = Database::new(
        vec![
            Schema::new("public", vec![test_table]),
            Schema::new("schema1", vec![table1]),
        ],
        2,
    );
    let test_table = db.table("public", "testTable").unwrap().clone();
    let table1 = db.table("schema1", "table1").unwrap().clone();
    let mut sql = Builder::new(db);
    let col2 = test_table.column("col2").unwrap();
    let col1 = table1.column("col1").unwrap();
    let rendered = sql
        .select((col2, col1))
        .unwrap()
        .from((&test_table, &table1))
        .unwrap()
        .get_sql()
        .unwrap();
    // distinct table names: the column prefixes stay bare even though
    // the FROM items are schema-qualified
    assert_eq!(
        rendered,
        r#"SELECT "testTable"."col2", "table1"."col1" FROM "public"."testTable", "schema1"."table1";"#
    );
}

#[test]
fn test_ambiguous_table_overrides_never_policy() {
    let users = Table::new("users", vec![Column::text("name")]);
    let audit_users = Table::new("users", vec![Column::text("name")]);
    let db = Database::new(
        vec![
            Schema::new("public", vec![users.clone()]),
            Schema::new("audit", vec![audit_users]),
        ],
        2,
    );
    let users = db.table("public", "users").unwrap().clone();
    let audit_users = db.table("audit", "users").unwrap().clone();
    let mut sql = Builder::with_options(
        db,
        BuilderOptions {
            add_public_schema_name: SchemaQualifyPolicy::Never,
            ..BuilderOptions::default()
        },
    );
    let name = users.column("name").unwrap();
    let rendered = sql
        .select(name)
        .unwrap()
        .from((&users, &audit_users))
        .unwrap()
        .get_sql()
        .unwrap();
    // the FROM item honors the policy, the column prefix cannot
    assert_eq!(
        rendered,
        r#"SELECT "public"."users"."name" FROM "users", "audit"."users";"#
    );
}
