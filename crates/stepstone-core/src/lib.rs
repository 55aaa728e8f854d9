//! # stepstone-core
//!
//! A fluent, schema-validated SQL `SELECT` builder for PostgreSQL.
//!
//! This crate provides:
//! - A typestate step API: each call returns the next legal grammar
//!   position, so an out-of-order chain does not compile
//! - Eager validation against a declared catalog: unknown columns and
//!   tables, and ill-typed expressions, are rejected at the call that
//!   introduces them
//! - Positional `$n` parameters through [`Binder`] values, collected
//!   per statement in first-use order
//!
//! ## Building a statement
//!
//! ```rust
//! use stepstone_core::{Builder, Column, Database, Table};
//!
//! let users = Table::new(
//!     "users",
//!     vec![Column::text("name"), Column::number("age")],
//! );
//! let db = Database::single_schema(vec![users.clone()], 2);
//! let mut builder = Builder::new(db);
//!
//! let name = users.column("name").unwrap();
//! let age = users.column("age").unwrap();
//!
//! let sql = builder
//!     .select((name, age.clone()))?
//!     .from(&users)?
//!     .where_clause(age.gt(21)?)?
//!     .get_sql()?;
//! assert_eq!(sql, r#"SELECT "name", "age" FROM "users" WHERE "age" > 21;"#);
//! # Ok::<(), stepstone_core::BuilderError>(())
//! ```
//!
//! ## Bound parameters
//!
//! Values passed through the `_param` helpers never appear in the
//! statement text:
//!
//! ```rust
//! use stepstone_core::{Builder, Column, Database, Literal, Table};
//!
//! let users = Table::new("users", vec![Column::text("name")]);
//! let db = Database::single_schema(vec![users.clone()], 2);
//! let mut builder = Builder::new(db);
//!
//! let name = users.column("name").unwrap();
//! let stmt = builder
//!     .select(name.clone())?
//!     .from(&users)?
//!     .where_clause(name.eq_param("Ada")?)?
//!     .get_binds()?;
//! assert_eq!(stmt.sql, r#"SELECT "name" FROM "users" WHERE "name" = $1;"#);
//! assert_eq!(stmt.values, vec![Literal::Text(String::from("Ada"))]);
//! # Ok::<(), stepstone_core::BuilderError>(())
//! ```

pub mod aggregate;
pub mod binder;
pub mod builder;
pub mod condition;
pub mod error;
pub mod expr;
pub mod options;
pub mod order_by;
pub mod schema;
pub mod select_item;
pub mod value;

pub use aggregate::{AggregateCall, AggregateFunction};
pub use binder::Binder;
pub use builder::{BoundStatement, Builder};
pub use condition::{Condition, ConditionGroup, LogicalOperator, AND, OR};
pub use error::{BuilderError, Result};
pub use expr::{
    e, ComparisonOperator, Expression, ExpressionType, Operand, Operator, ADD, CONCAT, DIV, GT,
    LT, MUL, SUB,
};
pub use options::{
    AliasAsPolicy, BuilderOptions, SchemaQualifyPolicy, SortMentionPolicy, TableQualifyPolicy,
};
pub use order_by::{
    IntoOrderByArgs, NullsPosition, OrderByArg, OrderByItem, OrderByItemInfo, SortDirection, ASC,
    DESC, NULLS_FIRST, NULLS_LAST,
};
pub use schema::{
    Column, ColumnRef, Database, DataType, IntoColumnRefs, IntoTableRefs, Schema, Table, TableRef,
    PUBLIC,
};
pub use select_item::{Asterisk, IntoSelectItems, SelectItem, SelectItemInfo, ASTERISK};
pub use value::Literal;
