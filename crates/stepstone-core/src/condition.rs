//! Boolean conditions and the WHERE/HAVING token model.

use std::fmt;

use crate::binder::{Binder, BinderStore};
use crate::builder::render::{Render, RenderContext};
use crate::error::{BuilderError, Result};
use crate::expr::{ComparisonOperator, Expression, ExpressionType, Operand, Operator};
use crate::schema::ColumnRef;
use crate::value::Literal;

/// A boolean-producing wrapper over an expression.
///
/// The binary form pairs two expressions with a comparison operator;
/// the unary form wraps a single BOOLEAN-typed expression used as an
/// implicit truth test. Conditions are immutable pure values.
#[derive(Debug, Clone)]
pub struct Condition {
    expression: Expression,
}

impl Condition {
    /// Combines two expressions with a comparison operator.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidExpression`] when the operand
    /// value types are not comparable with the given operator.
    pub fn new(left: Expression, op: ComparisonOperator, right: Expression) -> Result<Self> {
        let expression =
            Expression::binary(left.into_operand(), op.operator(), right.into_operand())?;
        Ok(Self { expression })
    }

    pub(crate) fn collect_columns<'a>(&'a self, out: &mut Vec<&'a ColumnRef>) {
        self.expression.collect_columns(out);
    }

    pub(crate) fn collect_binders<'a>(&'a self, out: &mut Vec<&'a Binder>) {
        self.expression.collect_binders(out);
    }
}

impl TryFrom<Expression> for Condition {
    type Error = BuilderError;

    /// Wraps a lone expression as a truth test; only BOOLEAN-typed
    /// expressions qualify.
    fn try_from(expression: Expression) -> Result<Self> {
        match expression.expression_type() {
            ExpressionType::Boolean => Ok(Self { expression }),
            other => Err(BuilderError::InvalidCondition(other)),
        }
    }
}

impl TryFrom<ColumnRef> for Condition {
    type Error = BuilderError;

    fn try_from(column: ColumnRef) -> Result<Self> {
        Self::try_from(Expression::leaf(column))
    }
}

impl Render for Condition {
    fn render(&self, ctx: &RenderContext<'_>, binders: &mut BinderStore) -> String {
        // `= NULL` / `<> NULL` are rewritten to the IS forms
        if let (Some(op), Some(Operand::Literal(Literal::Null))) =
            (self.expression.op, &self.expression.right)
        {
            let keyword = match op {
                Operator::Eq => Some("IS NULL"),
                Operator::Ne => Some("IS NOT NULL"),
                _ => None,
            };
            if let Some(keyword) = keyword {
                let left = self.expression.left.render(ctx, binders);
                return format!("{left} {keyword}");
            }
        }
        self.expression.render_with(ctx, binders, false)
    }
}

/// AND/OR marker placed between condition groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    /// Both sides must hold.
    And,
    /// Either side must hold.
    Or,
}

/// The AND connective.
pub const AND: LogicalOperator = LogicalOperator::And;
/// The OR connective.
pub const OR: LogicalOperator = LogicalOperator::Or;

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::And => "AND",
            Self::Or => "OR",
        })
    }
}

/// One token in the WHERE/HAVING accumulation sequence.
#[derive(Debug, Clone)]
pub enum WherePart {
    /// A condition.
    Condition(Condition),
    /// An AND/OR connective.
    Logical(LogicalOperator),
    /// An explicit opening parenthesis bracketing a group.
    Open,
    /// An explicit closing parenthesis bracketing a group.
    Close,
}

/// One `where`/`and`/`or`/`having` argument group: a single condition,
/// or two/three conditions joined by explicit connectives. Groups of
/// more than one condition are bracketed by parenthesis tokens.
pub trait ConditionGroup {
    /// Converts the group into its token sequence.
    fn into_parts(self) -> Vec<WherePart>;
}

impl ConditionGroup for Condition {
    fn into_parts(self) -> Vec<WherePart> {
        vec![WherePart::Condition(self)]
    }
}

impl ConditionGroup for (Condition, LogicalOperator, Condition) {
    fn into_parts(self) -> Vec<WherePart> {
        let (first, op, second) = self;
        vec![
            WherePart::Open,
            WherePart::Condition(first),
            WherePart::Logical(op),
            WherePart::Condition(second),
            WherePart::Close,
        ]
    }
}

impl ConditionGroup
    for (
        Condition,
        LogicalOperator,
        Condition,
        LogicalOperator,
        Condition,
    )
{
    fn into_parts(self) -> Vec<WherePart> {
        let (first, op1, second, op2, third) = self;
        vec![
            WherePart::Open,
            WherePart::Condition(first),
            WherePart::Logical(op1),
            WherePart::Condition(second),
            WherePart::Logical(op2),
            WherePart::Condition(third),
            WherePart::Close,
        ]
    }
}

impl ColumnRef {
    /// `self = value`; the value type must match the column type.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidExpression`] on a type mismatch.
    pub fn eq(&self, value: impl Into<Operand>) -> Result<Condition> {
        self.compare(ComparisonOperator::Equal, value)
    }

    /// `self <> value`; the value type must match the column type.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidExpression`] on a type mismatch.
    pub fn ne(&self, value: impl Into<Operand>) -> Result<Condition> {
        self.compare(ComparisonOperator::NotEqual, value)
    }

    /// `self > value`; defined for NUMBER operands only.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidExpression`] unless both sides
    /// are NUMBER-typed.
    pub fn gt(&self, value: impl Into<Operand>) -> Result<Condition> {
        self.compare(ComparisonOperator::GreaterThan, value)
    }

    /// `self >= value`; defined for NUMBER operands only.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidExpression`] unless both sides
    /// are NUMBER-typed.
    pub fn ge(&self, value: impl Into<Operand>) -> Result<Condition> {
        self.compare(ComparisonOperator::GreaterOrEqual, value)
    }

    /// `self < value`; defined for NUMBER operands only.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidExpression`] unless both sides
    /// are NUMBER-typed.
    pub fn lt(&self, value: impl Into<Operand>) -> Result<Condition> {
        self.compare(ComparisonOperator::LesserThan, value)
    }

    /// `self <= value`; defined for NUMBER operands only.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidExpression`] unless both sides
    /// are NUMBER-typed.
    pub fn le(&self, value: impl Into<Operand>) -> Result<Condition> {
        self.compare(ComparisonOperator::LesserOrEqual, value)
    }

    /// `self = $n`, binding the value as a positional parameter.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidExpression`] on a type mismatch.
    pub fn eq_param(&self, value: impl Into<Literal>) -> Result<Condition> {
        self.eq(Binder::new(value))
    }

    /// `self <> $n`, binding the value as a positional parameter.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidExpression`] on a type mismatch.
    pub fn ne_param(&self, value: impl Into<Literal>) -> Result<Condition> {
        self.ne(Binder::new(value))
    }

    /// `self > $n`, binding the value as a positional parameter.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidExpression`] on a type mismatch.
    pub fn gt_param(&self, value: impl Into<Literal>) -> Result<Condition> {
        self.gt(Binder::new(value))
    }

    /// `self IS NULL`.
    #[must_use]
    pub fn is_null(&self) -> Condition {
        Condition {
            expression: null_check(self, ComparisonOperator::Equal),
        }
    }

    /// `self IS NOT NULL`.
    #[must_use]
    pub fn is_not_null(&self) -> Condition {
        Condition {
            expression: null_check(self, ComparisonOperator::NotEqual),
        }
    }

    fn compare(&self, op: ComparisonOperator, value: impl Into<Operand>) -> Result<Condition> {
        Condition::new(
            Expression::leaf(self.clone()),
            op,
            Expression::leaf(value.into()),
        )
    }
}

fn null_check(column: &ColumnRef, op: ComparisonOperator) -> Expression {
    // NULL is comparable with every type, so this cannot fail
    match Expression::binary(column.clone(), op.operator(), Literal::Null) {
        Ok(expression) => expression,
        Err(_) => Expression::leaf(Literal::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Column, Table};

    fn table() -> Table {
        Table::new(
            "t",
            vec![
                Column::text("name"),
                Column::number("age"),
                Column::boolean("active"),
            ],
        )
    }

    #[test]
    fn unary_condition_requires_boolean() {
        let t = table();
        assert!(Condition::try_from(t.column("active").unwrap()).is_ok());

        let err = Condition::try_from(Expression::leaf(1_i64)).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"a condition cannot be built from a lone "NUMBER" expression"#
        );
        let err = Condition::try_from(t.column("name").unwrap()).unwrap_err();
        assert!(matches!(
            err,
            BuilderError::InvalidCondition(ExpressionType::Text)
        ));
    }

    #[test]
    fn comparison_helpers_enforce_column_type() {
        let t = table();
        assert!(t.column("name").unwrap().eq("x").is_ok());
        assert!(t.column("name").unwrap().eq(1_i64).is_err());
        assert!(t.column("age").unwrap().gt(21_i64).is_ok());
        // ordering comparisons are number-only
        assert!(t.column("name").unwrap().ne("y").is_ok());
        let err = t.column("name").unwrap().gt("y").unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"cannot combine "TEXT" and "TEXT" with operator ">""#
        );
    }

    #[test]
    fn multi_condition_groups_are_parenthesized() {
        let t = table();
        let parts = (
            t.column("name").unwrap().eq("x").unwrap(),
            OR,
            t.column("age").unwrap().gt(1_i64).unwrap(),
        )
            .into_parts();
        assert!(matches!(parts.first(), Some(WherePart::Open)));
        assert!(matches!(parts.last(), Some(WherePart::Close)));
        assert_eq!(parts.len(), 5);
    }
}
