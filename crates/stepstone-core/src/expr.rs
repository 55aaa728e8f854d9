//! Typed operands, operators and expressions.
//!
//! Expressions are immutable operand trees. Every node carries an
//! inferred value type, and operators reject operand types they are
//! not defined for at construction time, so an ill-typed expression
//! can never enter builder state, not even transiently.

use std::fmt;

use crate::aggregate::AggregateCall;
use crate::binder::{Binder, BinderStore};
use crate::builder::render::{Render, RenderContext};
use crate::error::{BuilderError, Result};
use crate::schema::{ColumnRef, DataType};
use crate::value::Literal;

/// The inferred value type of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionType {
    /// The NULL literal; compatible with any equality comparison.
    Null,
    /// Boolean-valued.
    Boolean,
    /// Numeric-valued.
    Number,
    /// Text-valued.
    Text,
}

impl fmt::Display for ExpressionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Null => "NULL",
            Self::Boolean => "BOOLEAN",
            Self::Number => "NUMBER",
            Self::Text => "TEXT",
        })
    }
}

/// A binary operator combining two expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Numeric addition.
    Add,
    /// Numeric subtraction.
    Sub,
    /// Numeric multiplication.
    Mul,
    /// Numeric division.
    Div,
    /// Text concatenation.
    Concat,
    /// Equality.
    Eq,
    /// Inequality.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Ge,
    /// Less than.
    Lt,
    /// Less than or equal.
    Le,
}

/// Numeric addition.
pub const ADD: Operator = Operator::Add;
/// Numeric subtraction.
pub const SUB: Operator = Operator::Sub;
/// Numeric multiplication.
pub const MUL: Operator = Operator::Mul;
/// Numeric division.
pub const DIV: Operator = Operator::Div;
/// Text concatenation.
pub const CONCAT: Operator = Operator::Concat;
/// Greater-than comparison.
pub const GT: Operator = Operator::Gt;
/// Less-than comparison.
pub const LT: Operator = Operator::Lt;

impl Operator {
    /// The SQL symbol for this operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Concat => "||",
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Le => "<=",
        }
    }

    const fn is_arithmetic(self) -> bool {
        matches!(self, Self::Add | Self::Sub | Self::Mul | Self::Div)
    }

    const fn is_equality(self) -> bool {
        matches!(self, Self::Eq | Self::Ne)
    }

    const fn is_ordering(self) -> bool {
        matches!(self, Self::Gt | Self::Ge | Self::Lt | Self::Le)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The comparison operators usable to combine two expressions into a
/// [`Condition`](crate::condition::Condition).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    /// `=`
    Equal,
    /// `<>`
    NotEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterOrEqual,
    /// `<`
    LesserThan,
    /// `<=`
    LesserOrEqual,
}

impl ComparisonOperator {
    pub(crate) const fn operator(self) -> Operator {
        match self {
            Self::Equal => Operator::Eq,
            Self::NotEqual => Operator::Ne,
            Self::GreaterThan => Operator::Gt,
            Self::GreaterOrEqual => Operator::Ge,
            Self::LesserThan => Operator::Lt,
            Self::LesserOrEqual => Operator::Le,
        }
    }
}

/// One leaf or subtree position inside an expression.
#[derive(Debug, Clone)]
pub enum Operand {
    /// A reference to a schema column.
    Column(ColumnRef),
    /// An inline literal value.
    Literal(Literal),
    /// A bound parameter placeholder.
    Binder(Binder),
    /// A nested expression.
    Expression(Box<Expression>),
    /// An aggregate function call.
    Aggregate(Box<AggregateCall>),
}

impl Operand {
    pub(crate) fn expression_type(&self) -> ExpressionType {
        match self {
            Self::Column(col) => match col.data_type() {
                DataType::Text => ExpressionType::Text,
                DataType::Number => ExpressionType::Number,
                DataType::Boolean => ExpressionType::Boolean,
            },
            Self::Literal(lit) => literal_type(lit),
            Self::Binder(binder) => literal_type(binder.value()),
            Self::Expression(expr) => expr.expression_type(),
            Self::Aggregate(_) => ExpressionType::Number,
        }
    }

    pub(crate) fn collect_columns<'a>(&'a self, out: &mut Vec<&'a ColumnRef>) {
        match self {
            Self::Column(col) => out.push(col),
            Self::Expression(expr) => expr.collect_columns(out),
            Self::Aggregate(agg) => agg.expression().collect_columns(out),
            Self::Literal(_) | Self::Binder(_) => {}
        }
    }

    pub(crate) fn collect_binders<'a>(&'a self, out: &mut Vec<&'a Binder>) {
        match self {
            Self::Binder(binder) => out.push(binder),
            Self::Expression(expr) => expr.collect_binders(out),
            Self::Aggregate(agg) => agg.expression().collect_binders(out),
            Self::Column(_) | Self::Literal(_) => {}
        }
    }
}

const fn literal_type(literal: &Literal) -> ExpressionType {
    match literal {
        Literal::Null => ExpressionType::Null,
        Literal::Bool(_) => ExpressionType::Boolean,
        Literal::Int(_) | Literal::Float(_) => ExpressionType::Number,
        Literal::Text(_) => ExpressionType::Text,
    }
}

impl Render for Operand {
    fn render(&self, ctx: &RenderContext<'_>, binders: &mut BinderStore) -> String {
        match self {
            Self::Column(col) => col.render(ctx, binders),
            Self::Literal(lit) => lit.render(ctx, binders),
            Self::Binder(binder) => binder.render(ctx, binders),
            Self::Expression(expr) => expr.render(ctx, binders),
            Self::Aggregate(agg) => agg.render(ctx, binders),
        }
    }
}

macro_rules! impl_operand_from {
    ($($t:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$t> for Operand {
                fn from(value: $t) -> Self {
                    Self::$variant(value.into())
                }
            }
        )+
    };
}

impl_operand_from!(
    ColumnRef => Column,
    Literal => Literal,
    Binder => Binder,
    bool => Literal,
    i64 => Literal,
    i32 => Literal,
    f64 => Literal,
    &str => Literal,
    String => Literal,
);

impl From<&ColumnRef> for Operand {
    fn from(column: &ColumnRef) -> Self {
        Self::Column(column.clone())
    }
}

impl From<Expression> for Operand {
    fn from(expression: Expression) -> Self {
        Self::Expression(Box::new(expression))
    }
}

impl From<AggregateCall> for Operand {
    fn from(call: AggregateCall) -> Self {
        Self::Aggregate(Box::new(call))
    }
}

/// An immutable, typed operand tree: either a lone operand or a
/// `(left, operator, right)` combination.
#[derive(Debug, Clone)]
pub struct Expression {
    pub(crate) left: Operand,
    pub(crate) op: Option<Operator>,
    pub(crate) right: Option<Operand>,
    expr_type: ExpressionType,
}

impl Expression {
    /// Wraps a single operand.
    #[must_use]
    pub fn leaf(operand: impl Into<Operand>) -> Self {
        let left = operand.into();
        let expr_type = left.expression_type();
        Self {
            left,
            op: None,
            right: None,
            expr_type,
        }
    }

    /// Combines two operands with an operator, checking that the
    /// operator is defined for the operand types.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidExpression`] naming both operand
    /// types and the operator when the combination is not defined.
    pub fn binary(
        left: impl Into<Operand>,
        op: Operator,
        right: impl Into<Operand>,
    ) -> Result<Self> {
        let left = left.into();
        let right = right.into();
        let expr_type = infer_type(left.expression_type(), op, right.expression_type())?;
        Ok(Self {
            left,
            op: Some(op),
            right: Some(right),
            expr_type,
        })
    }

    /// The inferred value type of this expression.
    #[must_use]
    pub fn expression_type(&self) -> ExpressionType {
        self.expr_type
    }

    pub(crate) fn collect_columns<'a>(&'a self, out: &mut Vec<&'a ColumnRef>) {
        self.left.collect_columns(out);
        if let Some(right) = &self.right {
            right.collect_columns(out);
        }
    }

    pub(crate) fn collect_binders<'a>(&'a self, out: &mut Vec<&'a Binder>) {
        self.left.collect_binders(out);
        if let Some(right) = &self.right {
            right.collect_binders(out);
        }
    }

    /// Renders the tree; binary nodes are parenthesized unless the
    /// caller flattens the outermost level (conditions, aggregates).
    pub(crate) fn render_with(
        &self,
        ctx: &RenderContext<'_>,
        binders: &mut BinderStore,
        outer_parens: bool,
    ) -> String {
        match (&self.op, &self.right) {
            (Some(op), Some(right)) => {
                let left = self.left.render(ctx, binders);
                let right = right.render(ctx, binders);
                if outer_parens {
                    format!("({left} {op} {right})")
                } else {
                    format!("{left} {op} {right}")
                }
            }
            _ => self.left.render(ctx, binders),
        }
    }

    /// Unwraps a lone-operand expression back into its operand; keeps
    /// binary trees boxed.
    pub(crate) fn into_operand(self) -> Operand {
        if self.op.is_none() {
            self.left
        } else {
            Operand::Expression(Box::new(self))
        }
    }
}

impl Render for Expression {
    fn render(&self, ctx: &RenderContext<'_>, binders: &mut BinderStore) -> String {
        self.render_with(ctx, binders, true)
    }
}

/// Builds a typed binary expression, the shorthand entry point for
/// arithmetic and concatenation.
///
/// # Errors
///
/// Returns [`BuilderError::InvalidExpression`] when the operator is
/// not defined for the operand types.
pub fn e(left: impl Into<Operand>, op: Operator, right: impl Into<Operand>) -> Result<Expression> {
    Expression::binary(left, op, right)
}

fn infer_type(left: ExpressionType, op: Operator, right: ExpressionType) -> Result<ExpressionType> {
    let mismatch = || BuilderError::InvalidExpression { left, op, right };
    if op.is_arithmetic() {
        if left == ExpressionType::Number && right == ExpressionType::Number {
            return Ok(ExpressionType::Number);
        }
        return Err(mismatch());
    }
    if op == Operator::Concat {
        if left == ExpressionType::Text && right == ExpressionType::Text {
            return Ok(ExpressionType::Text);
        }
        return Err(mismatch());
    }
    if op.is_equality() {
        if left == right || left == ExpressionType::Null || right == ExpressionType::Null {
            return Ok(ExpressionType::Boolean);
        }
        return Err(mismatch());
    }
    debug_assert!(op.is_ordering());
    if left == ExpressionType::Number && right == ExpressionType::Number {
        return Ok(ExpressionType::Boolean);
    }
    Err(mismatch())
}
