//! Select list items: columns, expressions, aggregates, binders and
//! the `*` marker, with optional output aliases.

use crate::aggregate::AggregateCall;
use crate::binder::{Binder, BinderStore};
use crate::builder::render::{Render, RenderContext};
use crate::expr::Expression;
use crate::options::AliasAsPolicy;
use crate::schema::ColumnRef;
use crate::value::Literal;

/// The `*` select marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asterisk;

/// Selects every column: `SELECT *`.
pub const ASTERISK: Asterisk = Asterisk;

/// One projectable item in a select list.
#[derive(Debug, Clone)]
pub enum SelectItem {
    /// The `*` marker; never qualified or aliased.
    Asterisk,
    /// A schema column.
    Column(ColumnRef),
    /// A computed expression.
    Expression(Expression),
    /// An aggregate function call.
    Aggregate(AggregateCall),
    /// A bound parameter placeholder.
    Binder(Binder),
    /// An inline literal value.
    Literal(Literal),
}

impl SelectItem {
    pub(crate) fn collect_columns<'a>(&'a self, out: &mut Vec<&'a ColumnRef>) {
        match self {
            Self::Column(col) => out.push(col),
            Self::Expression(expr) => expr.collect_columns(out),
            Self::Aggregate(agg) => agg.expression().collect_columns(out),
            Self::Asterisk | Self::Binder(_) | Self::Literal(_) => {}
        }
    }

    pub(crate) fn collect_binders<'a>(&'a self, out: &mut Vec<&'a Binder>) {
        match self {
            Self::Binder(binder) => out.push(binder),
            Self::Expression(expr) => expr.collect_binders(out),
            Self::Aggregate(agg) => agg.expression().collect_binders(out),
            Self::Asterisk | Self::Column(_) | Self::Literal(_) => {}
        }
    }
}

impl Render for SelectItem {
    fn render(&self, ctx: &RenderContext<'_>, binders: &mut BinderStore) -> String {
        match self {
            Self::Asterisk => String::from("*"),
            Self::Column(col) => col.render(ctx, binders),
            Self::Expression(expr) => expr.render(ctx, binders),
            Self::Aggregate(agg) => agg.render(ctx, binders),
            Self::Binder(binder) => binder.render(ctx, binders),
            Self::Literal(lit) => lit.render(ctx, binders),
        }
    }
}

macro_rules! impl_select_item_from {
    ($($t:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$t> for SelectItem {
                fn from(value: $t) -> Self {
                    Self::$variant(value.into())
                }
            }
        )+
    };
}

impl_select_item_from!(
    ColumnRef => Column,
    Expression => Expression,
    AggregateCall => Aggregate,
    Binder => Binder,
    Literal => Literal,
    bool => Literal,
    i64 => Literal,
    i32 => Literal,
    f64 => Literal,
    &str => Literal,
    String => Literal,
);

impl From<&ColumnRef> for SelectItem {
    fn from(column: &ColumnRef) -> Self {
        Self::Column(column.clone())
    }
}

impl From<Asterisk> for SelectItem {
    fn from(_: Asterisk) -> Self {
        Self::Asterisk
    }
}

/// A select item paired with its optional output alias.
#[derive(Debug, Clone)]
pub struct SelectItemInfo {
    item: SelectItem,
    alias: Option<String>,
}

impl SelectItemInfo {
    /// Wraps an item without an alias.
    #[must_use]
    pub fn new(item: impl Into<SelectItem>) -> Self {
        Self {
            item: item.into(),
            alias: None,
        }
    }

    /// Wraps an item under an output alias.
    #[must_use]
    pub fn aliased(item: impl Into<SelectItem>, alias: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            alias: Some(alias.into()),
        }
    }

    /// The projected item.
    #[must_use]
    pub fn item(&self) -> &SelectItem {
        &self.item
    }

    /// The output alias, when one was given.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }
}

impl Render for SelectItemInfo {
    fn render(&self, ctx: &RenderContext<'_>, binders: &mut BinderStore) -> String {
        let rendered = self.item.render(ctx, binders);
        match &self.alias {
            Some(alias) => {
                let alias = ctx.quote_identifier(alias);
                match ctx.options().add_as_before_column_alias {
                    AliasAsPolicy::Always => format!("{rendered} AS {alias}"),
                    AliasAsPolicy::Never => format!("{rendered} {alias}"),
                }
            }
            None => rendered,
        }
    }
}

impl<T: Into<SelectItem>> From<T> for SelectItemInfo {
    fn from(item: T) -> Self {
        Self::new(item)
    }
}

impl ColumnRef {
    /// Projects this column under an output alias.
    #[must_use]
    pub fn as_alias(&self, alias: impl Into<String>) -> SelectItemInfo {
        SelectItemInfo::aliased(self.clone(), alias)
    }
}

impl Expression {
    /// Projects this expression under an output alias.
    #[must_use]
    pub fn as_alias(self, alias: impl Into<String>) -> SelectItemInfo {
        SelectItemInfo::aliased(self, alias)
    }
}

impl Binder {
    /// Projects this binder under an output alias.
    #[must_use]
    pub fn as_alias(&self, alias: impl Into<String>) -> SelectItemInfo {
        SelectItemInfo::aliased(self.clone(), alias)
    }
}

/// Conversion into the item list consumed by `select`.
pub trait IntoSelectItems {
    /// Converts `self` into an ordered select item list.
    fn into_select_items(self) -> Vec<SelectItemInfo>;
}

macro_rules! impl_into_select_items_single {
    ($($t:ty),+ $(,)?) => {
        $(
            impl IntoSelectItems for $t {
                fn into_select_items(self) -> Vec<SelectItemInfo> {
                    vec![self.into()]
                }
            }
        )+
    };
}

impl_into_select_items_single!(
    SelectItemInfo,
    ColumnRef,
    &ColumnRef,
    Expression,
    AggregateCall,
    Binder,
    Asterisk,
    bool,
    i64,
    i32,
    f64,
    &str,
    String,
);

impl IntoSelectItems for Vec<SelectItemInfo> {
    fn into_select_items(self) -> Vec<SelectItemInfo> {
        self
    }
}

impl IntoSelectItems for () {
    fn into_select_items(self) -> Vec<SelectItemInfo> {
        Vec::new()
    }
}

macro_rules! impl_into_select_items_tuple {
    ($($t:ident),+) => {
        impl<$($t: Into<SelectItemInfo>),+> IntoSelectItems for ($($t,)+) {
            fn into_select_items(self) -> Vec<SelectItemInfo> {
                #[allow(non_snake_case)]
                let ($($t,)+) = self;
                vec![$($t.into()),+]
            }
        }
    };
}

impl_into_select_items_tuple!(T0, T1);
impl_into_select_items_tuple!(T0, T1, T2);
impl_into_select_items_tuple!(T0, T1, T2, T3);
impl_into_select_items_tuple!(T0, T1, T2, T3, T4);
