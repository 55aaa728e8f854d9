//! ORDER BY arguments: sortable items, direction and nulls-placement
//! markers, and the accumulator that pairs markers with the item they
//! follow.

use crate::binder::BinderStore;
use crate::builder::render::{Render, RenderContext};
use crate::error::{BuilderError, Result};
use crate::expr::Expression;
use crate::options::SortMentionPolicy;
use crate::schema::ColumnRef;

/// Sort direction of one ORDER BY item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending, the SQL default.
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    const fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Placement of NULL values within one ORDER BY item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullsPosition {
    /// NULLs sort before every value.
    First,
    /// NULLs sort after every value, the SQL default for ASC.
    Last,
}

impl NullsPosition {
    const fn keyword(self) -> &'static str {
        match self {
            Self::First => "NULLS FIRST",
            Self::Last => "NULLS LAST",
        }
    }
}

/// One sortable item: a column, a declared select alias, or an
/// expression.
#[derive(Debug, Clone)]
pub enum OrderByItem {
    /// A schema column.
    Column(ColumnRef),
    /// The output alias of a select item, matched by name.
    Alias(String),
    /// A computed expression.
    Expression(Expression),
}

/// A sortable item together with the markers attached to it.
#[derive(Debug, Clone)]
pub struct OrderByItemInfo {
    item: OrderByItem,
    direction: Option<SortDirection>,
    nulls: Option<NullsPosition>,
}

impl OrderByItemInfo {
    fn new(item: OrderByItem) -> Self {
        Self {
            item,
            direction: None,
            nulls: None,
        }
    }

    /// The sortable item.
    #[must_use]
    pub fn item(&self) -> &OrderByItem {
        &self.item
    }

    /// Attaches a `NULLS FIRST` marker.
    #[must_use]
    pub fn nulls_first(mut self) -> Self {
        self.nulls = Some(NullsPosition::First);
        self
    }

    /// Attaches a `NULLS LAST` marker.
    #[must_use]
    pub fn nulls_last(mut self) -> Self {
        self.nulls = Some(NullsPosition::Last);
        self
    }
}

impl Render for OrderByItemInfo {
    fn render(&self, ctx: &RenderContext<'_>, binders: &mut BinderStore) -> String {
        let mut rendered = match &self.item {
            OrderByItem::Column(col) => col.render(ctx, binders),
            OrderByItem::Alias(alias) => ctx.quote_identifier(alias),
            OrderByItem::Expression(expr) => expr.render(ctx, binders),
        };
        // DESC always prints; ASC follows the option since it is the
        // SQL default anyway
        match (self.direction, ctx.options().print_asc) {
            (Some(SortDirection::Desc), _) => rendered.push_str(" DESC"),
            (Some(SortDirection::Asc), SortMentionPolicy::Always | SortMentionPolicy::WhenMentioned)
            | (None, SortMentionPolicy::Always) => rendered.push_str(" ASC"),
            _ => {}
        }
        // likewise NULLS FIRST always prints, NULLS LAST is the default
        match (self.nulls, ctx.options().print_nulls_last) {
            (Some(NullsPosition::First), _) => rendered.push_str(" NULLS FIRST"),
            (Some(NullsPosition::Last), SortMentionPolicy::Always | SortMentionPolicy::WhenMentioned)
            | (None, SortMentionPolicy::Always) => rendered.push_str(" NULLS LAST"),
            _ => {}
        }
        rendered
    }
}

impl ColumnRef {
    /// This column sorted ascending.
    #[must_use]
    pub fn asc(&self) -> OrderByItemInfo {
        OrderByItemInfo {
            item: OrderByItem::Column(self.clone()),
            direction: Some(SortDirection::Asc),
            nulls: None,
        }
    }

    /// This column sorted descending.
    #[must_use]
    pub fn desc(&self) -> OrderByItemInfo {
        OrderByItemInfo {
            item: OrderByItem::Column(self.clone()),
            direction: Some(SortDirection::Desc),
            nulls: None,
        }
    }

    /// This column with NULLs sorted first.
    #[must_use]
    pub fn nulls_first(&self) -> OrderByItemInfo {
        OrderByItemInfo::new(OrderByItem::Column(self.clone())).nulls_first()
    }

    /// This column with NULLs sorted last.
    #[must_use]
    pub fn nulls_last(&self) -> OrderByItemInfo {
        OrderByItemInfo::new(OrderByItem::Column(self.clone())).nulls_last()
    }
}

/// One `order_by` argument: an item, or a marker modifying the item
/// before it.
#[derive(Debug, Clone)]
pub enum OrderByArg {
    /// A sortable item.
    Item(OrderByItemInfo),
    /// An `ASC`/`DESC` marker for the preceding item.
    Direction(SortDirection),
    /// A `NULLS FIRST`/`NULLS LAST` marker for the preceding item.
    Nulls(NullsPosition),
}

/// Sorts the preceding item ascending.
pub const ASC: OrderByArg = OrderByArg::Direction(SortDirection::Asc);
/// Sorts the preceding item descending.
pub const DESC: OrderByArg = OrderByArg::Direction(SortDirection::Desc);
/// Sorts the preceding item's NULLs first.
pub const NULLS_FIRST: OrderByArg = OrderByArg::Nulls(NullsPosition::First);
/// Sorts the preceding item's NULLs last.
pub const NULLS_LAST: OrderByArg = OrderByArg::Nulls(NullsPosition::Last);

impl From<OrderByItemInfo> for OrderByArg {
    fn from(item: OrderByItemInfo) -> Self {
        Self::Item(item)
    }
}

impl From<ColumnRef> for OrderByArg {
    fn from(column: ColumnRef) -> Self {
        Self::Item(OrderByItemInfo::new(OrderByItem::Column(column)))
    }
}

impl From<&ColumnRef> for OrderByArg {
    fn from(column: &ColumnRef) -> Self {
        column.clone().into()
    }
}

impl From<Expression> for OrderByArg {
    fn from(expression: Expression) -> Self {
        Self::Item(OrderByItemInfo::new(OrderByItem::Expression(expression)))
    }
}

impl From<&str> for OrderByArg {
    fn from(alias: &str) -> Self {
        Self::Item(OrderByItemInfo::new(OrderByItem::Alias(String::from(
            alias,
        ))))
    }
}

impl From<String> for OrderByArg {
    fn from(alias: String) -> Self {
        Self::Item(OrderByItemInfo::new(OrderByItem::Alias(alias)))
    }
}

/// Conversion into the argument list consumed by `order_by`.
pub trait IntoOrderByArgs {
    /// Converts `self` into the ordered argument list.
    fn into_order_by_args(self) -> Vec<OrderByArg>;
}

macro_rules! impl_into_order_by_args_single {
    ($($t:ty),+ $(,)?) => {
        $(
            impl IntoOrderByArgs for $t {
                fn into_order_by_args(self) -> Vec<OrderByArg> {
                    vec![self.into()]
                }
            }
        )+
    };
}

impl_into_order_by_args_single!(
    OrderByArg,
    OrderByItemInfo,
    ColumnRef,
    &ColumnRef,
    Expression,
    &str,
    String,
);

impl IntoOrderByArgs for Vec<OrderByArg> {
    fn into_order_by_args(self) -> Vec<OrderByArg> {
        self
    }
}

impl IntoOrderByArgs for () {
    fn into_order_by_args(self) -> Vec<OrderByArg> {
        Vec::new()
    }
}

macro_rules! impl_into_order_by_args_tuple {
    ($($t:ident),+) => {
        impl<$($t: Into<OrderByArg>),+> IntoOrderByArgs for ($($t,)+) {
            fn into_order_by_args(self) -> Vec<OrderByArg> {
                #[allow(non_snake_case)]
                let ($($t,)+) = self;
                vec![$($t.into()),+]
            }
        }
    };
}

impl_into_order_by_args_tuple!(T0, T1);
impl_into_order_by_args_tuple!(T0, T1, T2);
impl_into_order_by_args_tuple!(T0, T1, T2, T3);
impl_into_order_by_args_tuple!(T0, T1, T2, T3, T4);
impl_into_order_by_args_tuple!(T0, T1, T2, T3, T4, T5);

/// Folds the flat argument list into finished items, attaching each
/// marker to the item it follows.
///
/// # Errors
///
/// Rejects a marker with no preceding item, a second direction or
/// nulls marker on the same item, and an empty argument list.
pub(crate) fn assemble(args: Vec<OrderByArg>) -> Result<Vec<OrderByItemInfo>> {
    let mut items: Vec<OrderByItemInfo> = Vec::new();
    let mut pending: Option<OrderByItemInfo> = None;
    for arg in args {
        match arg {
            OrderByArg::Item(item) => {
                if let Some(done) = pending.take() {
                    items.push(done);
                }
                pending = Some(item);
            }
            OrderByArg::Direction(direction) => {
                let Some(current) = pending.as_mut() else {
                    return Err(BuilderError::OrderByMarkerBeforeItem(String::from(
                        direction.keyword(),
                    )));
                };
                if current.direction.is_some() {
                    return Err(BuilderError::DuplicateOrderByMarker(String::from(
                        direction.keyword(),
                    )));
                }
                current.direction = Some(direction);
            }
            OrderByArg::Nulls(nulls) => {
                let Some(mut current) = pending.take() else {
                    return Err(BuilderError::OrderByMarkerBeforeItem(String::from(
                        nulls.keyword(),
                    )));
                };
                if current.nulls.is_some() {
                    return Err(BuilderError::DuplicateOrderByMarker(String::from(
                        nulls.keyword(),
                    )));
                }
                current.nulls = Some(nulls);
                // a nulls marker closes the item, so the next
                // direction marker cannot reach back past it
                items.push(current);
            }
        }
    }
    if let Some(done) = pending {
        items.push(done);
    }
    if items.is_empty() {
        return Err(BuilderError::EmptyOrderBy);
    }
    Ok(items)
}
