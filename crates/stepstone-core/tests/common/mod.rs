//! Shared catalog fixtures for the integration tests.
#![allow(dead_code)]

use stepstone_core::{Builder, BuilderOptions, Column, Database, Schema, Table};

/// `testTable(col1 TEXT, col2 TEXT, col3 NUMBER, col4 NUMBER, flag BOOLEAN)`.
pub fn test_table() -> Table {
    Table::new(
        "testTable",
        vec![
            Column::text("col1"),
            Column::text("col2"),
            Column::number("col3"),
            Column::number("col4"),
            Column::boolean("flag"),
        ],
    )
}

/// A legacy (version 1) catalog: bare identifiers, bare text literals,
/// no trailing semicolon.
pub fn v1_builder() -> (Builder, Table) {
    let table = test_table();
    let db = Database::single_schema(vec![table.clone()], 1);
    let options = BuilderOptions {
        use_semicolon: false,
        ..BuilderOptions::default()
    };
    (Builder::with_options(db, options), table)
}

/// A version-2 catalog with default options: quoted identifiers,
/// quoted text literals, trailing semicolon.
pub fn v2_builder() -> (Builder, Table) {
    let table = test_table();
    let db = Database::single_schema(vec![table.clone()], 2);
    (Builder::new(db), table)
}

/// Like [`v2_builder`] but with explicit options.
pub fn v2_builder_with(options: BuilderOptions) -> (Builder, Table) {
    let table = test_table();
    let db = Database::single_schema(vec![table.clone()], 2);
    (Builder::with_options(db, options), table)
}

/// A two-schema, version-2 catalog: `public.users`, `public.orders`
/// and `audit.users`.
pub fn multi_schema_builder() -> (Builder, Table, Table, Table) {
    let users = Table::new(
        "users",
        vec![Column::text("name"), Column::number("age")],
    );
    let orders = Table::new(
        "orders",
        vec![Column::number("id"), Column::number("total")],
    );
    let audit_users = Table::new("users", vec![Column::text("name")]);
    let db = Database::new(
        vec![
            Schema::new("public", vec![users.clone(), orders.clone()]),
            Schema::new("audit", vec![audit_users.clone()]),
        ],
        2,
    );
    // the tables hand out refs carrying their assembled schema
    let users = db.table("public", "users").unwrap().clone();
    let orders = db.table("public", "orders").unwrap().clone();
    let audit_users = db.table("audit", "users").unwrap().clone();
    (Builder::new(db), users, orders, audit_users)
}
