//! Error types for statement construction and rendering.

use crate::expr::{ExpressionType, Operator};

/// Errors raised while assembling or rendering a `SELECT` statement.
///
/// Every variant signals programmer misuse; none are recoverable and
/// none are retried internally. Schema and type errors are raised at
/// the call that introduces the offending value, parenthesis errors at
/// render time, because only the complete token sequence can be
/// checked.
#[derive(Debug, thiserror::Error)]
pub enum BuilderError {
    /// A referenced column does not exist in the database catalog.
    #[error(r#"column "{0}" not found in database"#)]
    ColumnNotFound(String),

    /// A referenced table does not exist in the database catalog.
    #[error(r#"table "{0}" not found in database"#)]
    TableNotFound(String),

    /// An operator was applied to operand types it is not defined for.
    #[error(r#"cannot combine "{left}" and "{right}" with operator "{op}""#)]
    InvalidExpression {
        /// Value type of the left operand.
        left: ExpressionType,
        /// The operator that rejected the operands.
        op: Operator,
        /// Value type of the right operand.
        right: ExpressionType,
    },

    /// A lone expression used as a condition was not boolean-typed.
    #[error(r#"a condition cannot be built from a lone "{0}" expression"#)]
    InvalidCondition(ExpressionType),

    /// An aggregate function was given a non-numeric argument.
    #[error(r#"aggregate functions take a "NUMBER" expression, got "{0}""#)]
    NonNumericAggregate(ExpressionType),

    /// `select_distinct`/`select_all` was called with no items.
    #[error("select must have at least one item after DISTINCT or ALL")]
    EmptyDistinctSelect,

    /// `order_by` was called with no arguments.
    #[error("order by must have at least one item")]
    EmptyOrderBy,

    /// A direction or nulls marker appeared before any order-by item.
    #[error(r#""{0}" must come after a column or alias"#)]
    OrderByMarkerBeforeItem(String),

    /// The same marker kind was given twice for one order-by item.
    #[error(r#""{0}" was already given for this order by item"#)]
    DuplicateOrderByMarker(String),

    /// A string order-by argument did not match any declared alias.
    #[error(r#"alias "{0}" does not exist; if this is a column, pass the column itself"#)]
    UnknownAlias(String),

    /// A negative value was passed to `limit`.
    #[error("invalid limit value {0}, negative numbers are not allowed")]
    NegativeLimit(i64),

    /// A negative value was passed to `offset`.
    #[error("invalid offset value {0}, negative numbers are not allowed")]
    NegativeOffset(i64),

    /// WHERE/HAVING contained an empty parenthesis pair.
    #[error("invalid conditions, empty parentheses are not allowed")]
    EmptyParentheses,

    /// WHERE/HAVING closed a parenthesis that was never opened.
    #[error("invalid conditions, closing parenthesis must come after an opening one")]
    CloseBeforeOpen,

    /// WHERE/HAVING opened more parentheses than it closed.
    #[error("invalid conditions, more opening parentheses than closing ones")]
    UnclosedParentheses,
}

/// Result type for builder operations.
pub type Result<T> = std::result::Result<T, BuilderError>;
