//! The fluent statement builder.
//!
//! One [`Builder`] owns a single mutable statement record; the step
//! handles in [`steps`] walk the SELECT grammar over that record and
//! finalizing a statement resets it, so the builder is immediately
//! reusable.

pub(crate) mod render;
pub mod steps;

use std::sync::Arc;

use tracing::trace;

use crate::binder::{Binder, BinderStore};
use crate::condition::{ConditionGroup, LogicalOperator, WherePart};
use crate::error::{BuilderError, Result};
use crate::options::BuilderOptions;
use crate::order_by::{assemble, IntoOrderByArgs, OrderByItem, OrderByItemInfo};
use crate::schema::{ColumnRef, Database, TableRef};
use crate::select_item::{IntoSelectItems, SelectItemInfo};
use crate::value::Literal;

use steps::SelectStep;

/// A finalized statement together with its positional values;
/// `values[i]` backs placeholder `$i+1`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundStatement {
    /// The statement text.
    pub sql: String,
    /// The positional value array.
    pub values: Vec<Literal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DistinctMode {
    #[default]
    Plain,
    Distinct,
    All,
}

#[derive(Debug, Clone, Copy)]
enum JoinKind {
    Comma,
    Cross,
}

#[derive(Debug, Clone)]
pub(crate) struct FromItem {
    table: TableRef,
    join: JoinKind,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Clause {
    Where,
    Having,
}

#[derive(Debug, Clone)]
enum LimitValue {
    Count(i64),
    All,
    Null,
    Binder(Binder),
}

#[derive(Debug, Clone)]
enum OffsetValue {
    Count(i64),
    Binder(Binder),
}

/// The single mutable record a statement is accumulated into.
#[derive(Debug)]
pub(crate) struct QueryData {
    database: Arc<Database>,
    options: BuilderOptions,
    distinct: DistinctMode,
    select_items: Vec<SelectItemInfo>,
    from_items: Vec<FromItem>,
    where_parts: Vec<WherePart>,
    group_by_items: Vec<ColumnRef>,
    having_parts: Vec<WherePart>,
    order_by_items: Vec<OrderByItemInfo>,
    limit: Option<LimitValue>,
    offset: Option<OffsetValue>,
    binders: BinderStore,
}

impl QueryData {
    fn new(database: Arc<Database>, options: BuilderOptions) -> Self {
        Self {
            database,
            options,
            distinct: DistinctMode::Plain,
            select_items: Vec::new(),
            from_items: Vec::new(),
            where_parts: Vec::new(),
            group_by_items: Vec::new(),
            having_parts: Vec::new(),
            order_by_items: Vec::new(),
            limit: None,
            offset: None,
            binders: BinderStore::default(),
        }
    }

    /// Clears every per-statement field and unregisters the binders.
    fn reset(&mut self) {
        self.distinct = DistinctMode::Plain;
        self.select_items.clear();
        self.from_items.clear();
        self.where_parts.clear();
        self.group_by_items.clear();
        self.having_parts.clear();
        self.order_by_items.clear();
        self.limit = None;
        self.offset = None;
        self.binders.reset();
        trace!("builder state cleared");
    }

    fn validate_columns<'a>(&self, columns: &[&'a ColumnRef]) -> Result<()> {
        for column in columns {
            if !self.database.column_exists(column) {
                return Err(BuilderError::ColumnNotFound(String::from(column.name())));
            }
        }
        Ok(())
    }

    pub(crate) fn add_from(&mut self, tables: Vec<TableRef>) -> Result<()> {
        for table in &tables {
            if !self.database.table_exists(table) {
                return Err(BuilderError::TableNotFound(String::from(table.name())));
            }
        }
        self.from_items.extend(tables.into_iter().map(|table| FromItem {
            table,
            join: JoinKind::Comma,
        }));
        Ok(())
    }

    pub(crate) fn add_cross_join(&mut self, table: TableRef) -> Result<()> {
        if !self.database.table_exists(&table) {
            return Err(BuilderError::TableNotFound(String::from(table.name())));
        }
        self.from_items.push(FromItem {
            table,
            join: JoinKind::Cross,
        });
        Ok(())
    }

    pub(crate) fn push_condition_group(
        &mut self,
        clause: Clause,
        connective: Option<LogicalOperator>,
        group: impl ConditionGroup,
    ) -> Result<()> {
        let parts = group.into_parts();
        let mut columns = Vec::new();
        for part in &parts {
            if let WherePart::Condition(condition) = part {
                condition.collect_columns(&mut columns);
            }
        }
        self.validate_columns(&columns)?;
        // binders take their ordinals at the call that introduces
        // them, so ordinals follow chain order
        for part in &parts {
            if let WherePart::Condition(condition) = part {
                let mut binders = Vec::new();
                condition.collect_binders(&mut binders);
                for binder in binders {
                    self.binders.register(binder);
                }
            }
        }
        let target = match clause {
            Clause::Where => &mut self.where_parts,
            Clause::Having => &mut self.having_parts,
        };
        if let Some(op) = connective {
            target.push(WherePart::Logical(op));
        }
        target.extend(parts);
        Ok(())
    }

    pub(crate) fn set_group_by(&mut self, columns: Vec<ColumnRef>) -> Result<()> {
        let refs: Vec<&ColumnRef> = columns.iter().collect();
        self.validate_columns(&refs)?;
        self.group_by_items.extend(columns);
        Ok(())
    }

    pub(crate) fn set_order_by(&mut self, args: impl IntoOrderByArgs) -> Result<()> {
        let items = assemble(args.into_order_by_args())?;
        for item in &items {
            match item.item() {
                OrderByItem::Column(column) => self.validate_columns(&[column])?,
                OrderByItem::Expression(expression) => {
                    let mut columns = Vec::new();
                    expression.collect_columns(&mut columns);
                    self.validate_columns(&columns)?;
                }
                OrderByItem::Alias(alias) => {
                    let declared = self
                        .select_items
                        .iter()
                        .any(|si| si.alias() == Some(alias.as_str()));
                    if !declared {
                        return Err(BuilderError::UnknownAlias(alias.clone()));
                    }
                }
            }
        }
        self.order_by_items.extend(items);
        Ok(())
    }

    pub(crate) fn set_limit(&mut self, count: i64) -> Result<()> {
        if count < 0 {
            return Err(BuilderError::NegativeLimit(count));
        }
        self.limit = Some(LimitValue::Count(count));
        Ok(())
    }

    pub(crate) fn set_limit_all(&mut self) {
        self.limit = Some(LimitValue::All);
    }

    pub(crate) fn set_limit_null(&mut self) {
        self.limit = Some(LimitValue::Null);
    }

    pub(crate) fn set_limit_param(&mut self, value: impl Into<Literal>) {
        let binder = Binder::new(value);
        self.binders.register(&binder);
        self.limit = Some(LimitValue::Binder(binder));
    }

    pub(crate) fn set_offset(&mut self, count: i64) -> Result<()> {
        if count < 0 {
            return Err(BuilderError::NegativeOffset(count));
        }
        self.offset = Some(OffsetValue::Count(count));
        Ok(())
    }

    pub(crate) fn set_offset_param(&mut self, value: impl Into<Literal>) {
        let binder = Binder::new(value);
        self.binders.register(&binder);
        self.offset = Some(OffsetValue::Binder(binder));
    }

    /// Renders, captures the positional values, then resets.
    pub(crate) fn finalize(&mut self) -> Result<(String, Vec<Literal>)> {
        let rendered = self.render_sql();
        let values = self.binders.values();
        self.reset();
        Ok((rendered?, values))
    }
}

/// Entry point of the fluent SELECT grammar.
///
/// ```
/// use stepstone_core::{Builder, Column, Database, Table};
///
/// let users = Table::new("users", vec![Column::text("name")]);
/// let db = Database::single_schema(vec![users.clone()], 2);
/// let mut builder = Builder::new(db);
///
/// let sql = builder
///     .select(users.column("name").unwrap())?
///     .from(&users)?
///     .get_sql()?;
/// assert_eq!(sql, r#"SELECT "name" FROM "users";"#);
/// # Ok::<(), stepstone_core::BuilderError>(())
/// ```
#[derive(Debug)]
pub struct Builder {
    data: QueryData,
}

impl Builder {
    /// Creates a builder over a catalog with default options.
    #[must_use]
    pub fn new(database: impl Into<Arc<Database>>) -> Self {
        Self::with_options(database, BuilderOptions::default())
    }

    /// Creates a builder with explicit rendering options.
    #[must_use]
    pub fn with_options(database: impl Into<Arc<Database>>, options: BuilderOptions) -> Self {
        Self {
            data: QueryData::new(database.into(), options),
        }
    }

    /// Starts a `SELECT` statement, discarding any leftover state
    /// from an abandoned chain.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::ColumnNotFound`] when an item
    /// references a column the catalog does not declare.
    pub fn select(&mut self, items: impl IntoSelectItems) -> Result<SelectStep<'_>> {
        self.start(DistinctMode::Plain, items.into_select_items())
    }

    /// Starts a `SELECT DISTINCT` statement.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::EmptyDistinctSelect`] for an empty item
    /// list and [`BuilderError::ColumnNotFound`] for an unknown column.
    pub fn select_distinct(&mut self, items: impl IntoSelectItems) -> Result<SelectStep<'_>> {
        let items = items.into_select_items();
        if items.is_empty() {
            return Err(BuilderError::EmptyDistinctSelect);
        }
        self.start(DistinctMode::Distinct, items)
    }

    /// Starts a `SELECT ALL` statement.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::EmptyDistinctSelect`] for an empty item
    /// list and [`BuilderError::ColumnNotFound`] for an unknown column.
    pub fn select_all(&mut self, items: impl IntoSelectItems) -> Result<SelectStep<'_>> {
        let items = items.into_select_items();
        if items.is_empty() {
            return Err(BuilderError::EmptyDistinctSelect);
        }
        self.start(DistinctMode::All, items)
    }

    /// Discards any accumulated statement state.
    pub fn reset(&mut self) {
        self.data.reset();
    }

    fn start(
        &mut self,
        distinct: DistinctMode,
        items: Vec<SelectItemInfo>,
    ) -> Result<SelectStep<'_>> {
        self.data.reset();
        let mut columns = Vec::new();
        for item in &items {
            item.item().collect_columns(&mut columns);
        }
        self.data.validate_columns(&columns)?;
        // select-item binders take their ordinals now, like every
        // binder does at the call that introduces it
        for item in &items {
            let mut binders = Vec::new();
            item.item().collect_binders(&mut binders);
            for binder in binders {
                self.data.binders.register(binder);
            }
        }
        self.data.distinct = distinct;
        self.data.select_items = items;
        Ok(SelectStep {
            data: &mut self.data,
        })
    }
}
