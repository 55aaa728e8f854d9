//! Aggregate function calls over numeric expressions.

use crate::binder::{Binder, BinderStore};
use crate::builder::render::{Render, RenderContext};
use crate::condition::Condition;
use crate::error::{BuilderError, Result};
use crate::expr::{ComparisonOperator, Expression, ExpressionType, Operand};
use crate::select_item::SelectItemInfo;
use crate::value::Literal;

/// The supported aggregate functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunction {
    /// `SUM`
    Sum,
    /// `AVG`
    Avg,
    /// `COUNT`
    Count,
    /// `MAX`
    Max,
    /// `MIN`
    Min,
}

impl AggregateFunction {
    const fn name(self) -> &'static str {
        match self {
            Self::Sum => "SUM",
            Self::Avg => "AVG",
            Self::Count => "COUNT",
            Self::Max => "MAX",
            Self::Min => "MIN",
        }
    }
}

/// An aggregate function applied to a NUMBER-typed expression.
///
/// The result is itself NUMBER-typed and supports the same comparison
/// helpers as plain expressions, which makes aggregates usable in
/// `having`.
#[derive(Debug, Clone)]
pub struct AggregateCall {
    func: AggregateFunction,
    expression: Expression,
}

impl AggregateCall {
    /// `SUM(argument)`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::NonNumericAggregate`] when the argument
    /// is not NUMBER-typed.
    pub fn sum(argument: impl Into<Operand>) -> Result<Self> {
        Self::new(AggregateFunction::Sum, argument)
    }

    /// `AVG(argument)`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::NonNumericAggregate`] when the argument
    /// is not NUMBER-typed.
    pub fn avg(argument: impl Into<Operand>) -> Result<Self> {
        Self::new(AggregateFunction::Avg, argument)
    }

    /// `COUNT(argument)`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::NonNumericAggregate`] when the argument
    /// is not NUMBER-typed.
    pub fn count(argument: impl Into<Operand>) -> Result<Self> {
        Self::new(AggregateFunction::Count, argument)
    }

    /// `MAX(argument)`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::NonNumericAggregate`] when the argument
    /// is not NUMBER-typed.
    pub fn max(argument: impl Into<Operand>) -> Result<Self> {
        Self::new(AggregateFunction::Max, argument)
    }

    /// `MIN(argument)`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::NonNumericAggregate`] when the argument
    /// is not NUMBER-typed.
    pub fn min(argument: impl Into<Operand>) -> Result<Self> {
        Self::new(AggregateFunction::Min, argument)
    }

    fn new(func: AggregateFunction, argument: impl Into<Operand>) -> Result<Self> {
        let expression = match argument.into() {
            Operand::Expression(boxed) => *boxed,
            other => Expression::leaf(other),
        };
        match expression.expression_type() {
            ExpressionType::Number => Ok(Self { func, expression }),
            other => Err(BuilderError::NonNumericAggregate(other)),
        }
    }

    pub(crate) fn expression(&self) -> &Expression {
        &self.expression
    }

    /// Projects the call under an output alias.
    #[must_use]
    pub fn as_alias(self, alias: impl Into<String>) -> SelectItemInfo {
        SelectItemInfo::aliased(self, alias)
    }

    /// `self = value`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidExpression`] unless the value is
    /// NUMBER-typed.
    pub fn eq(&self, value: impl Into<Operand>) -> Result<Condition> {
        self.compare(ComparisonOperator::Equal, value)
    }

    /// `self <> value`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidExpression`] unless the value is
    /// NUMBER-typed.
    pub fn ne(&self, value: impl Into<Operand>) -> Result<Condition> {
        self.compare(ComparisonOperator::NotEqual, value)
    }

    /// `self > value`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidExpression`] unless the value is
    /// NUMBER-typed.
    pub fn gt(&self, value: impl Into<Operand>) -> Result<Condition> {
        self.compare(ComparisonOperator::GreaterThan, value)
    }

    /// `self >= value`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidExpression`] unless the value is
    /// NUMBER-typed.
    pub fn ge(&self, value: impl Into<Operand>) -> Result<Condition> {
        self.compare(ComparisonOperator::GreaterOrEqual, value)
    }

    /// `self < value`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidExpression`] unless the value is
    /// NUMBER-typed.
    pub fn lt(&self, value: impl Into<Operand>) -> Result<Condition> {
        self.compare(ComparisonOperator::LesserThan, value)
    }

    /// `self <= value`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidExpression`] unless the value is
    /// NUMBER-typed.
    pub fn le(&self, value: impl Into<Operand>) -> Result<Condition> {
        self.compare(ComparisonOperator::LesserOrEqual, value)
    }

    /// `self > $n`, binding the value as a positional parameter.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidExpression`] unless the value is
    /// NUMBER-typed.
    pub fn gt_param(&self, value: impl Into<Literal>) -> Result<Condition> {
        self.gt(Binder::new(value))
    }

    /// `self = $n`, binding the value as a positional parameter.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidExpression`] unless the value is
    /// NUMBER-typed.
    pub fn eq_param(&self, value: impl Into<Literal>) -> Result<Condition> {
        self.eq(Binder::new(value))
    }

    fn compare(&self, op: ComparisonOperator, value: impl Into<Operand>) -> Result<Condition> {
        Condition::new(
            Expression::leaf(self.clone()),
            op,
            Expression::leaf(value.into()),
        )
    }
}

impl Render for AggregateCall {
    fn render(&self, ctx: &RenderContext<'_>, binders: &mut BinderStore) -> String {
        let name = self.func.name();
        let argument = self.expression.render_with(ctx, binders, false);
        format!("{name}({argument})")
    }
}
