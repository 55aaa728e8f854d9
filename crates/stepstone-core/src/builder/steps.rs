//! Typestate step handles walking the SELECT grammar.
//!
//! Every handle borrows the builder's statement record; each method
//! consumes the handle and returns the next grammar position, so an
//! out-of-order chain does not compile. Finalizing from any position
//! is always available through `get_sql`/`get_binds`.

use crate::condition::{ConditionGroup, LogicalOperator};
use crate::error::Result;
use crate::order_by::IntoOrderByArgs;
use crate::schema::{IntoColumnRefs, IntoTableRefs, TableRef};
use crate::value::Literal;

use super::{BoundStatement, Clause, QueryData};

macro_rules! define_step {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[must_use]
        #[derive(Debug)]
        pub struct $name<'a> {
            pub(crate) data: &'a mut QueryData,
        }
    };
}

define_step!(
    /// Position right after `select`; only `from` advances the grammar.
    SelectStep
);
define_step!(
    /// Position after `from`; every later clause is reachable.
    FromStep
);
define_step!(
    /// Position inside the WHERE clause; `and`/`or` append groups.
    WhereStep
);
define_step!(
    /// Position after `group_by`; `having` filters the groups.
    GroupByStep
);
define_step!(
    /// Position inside the HAVING clause; `and`/`or` append groups.
    HavingStep
);
define_step!(
    /// Position after `order_by`.
    OrderByStep
);
define_step!(
    /// Position after a `limit` variant.
    LimitStep
);
define_step!(
    /// Position after an `offset` variant; the grammar ends here.
    OffsetStep
);

impl<'a> SelectStep<'a> {
    /// Names the tables to select from.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::TableNotFound`](crate::BuilderError::TableNotFound)
    /// when a table is not in the catalog.
    pub fn from(self, tables: impl IntoTableRefs) -> Result<FromStep<'a>> {
        self.data.add_from(tables.into_table_refs())?;
        Ok(FromStep { data: self.data })
    }
}

impl<'a> FromStep<'a> {
    /// Appends a `CROSS JOIN` to the FROM clause.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::TableNotFound`](crate::BuilderError::TableNotFound)
    /// when the table is not in the catalog.
    pub fn cross_join(self, table: impl Into<TableRef>) -> Result<FromStep<'a>> {
        self.data.add_cross_join(table.into())?;
        Ok(self)
    }

    /// Opens the WHERE clause with one condition group.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::ColumnNotFound`](crate::BuilderError::ColumnNotFound)
    /// when a condition references a column the catalog does not
    /// declare.
    pub fn where_clause(self, group: impl ConditionGroup) -> Result<WhereStep<'a>> {
        self.data.push_condition_group(Clause::Where, None, group)?;
        Ok(WhereStep { data: self.data })
    }
}

impl<'a> GroupByStep<'a> {
    /// Opens the HAVING clause with one condition group.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::ColumnNotFound`](crate::BuilderError::ColumnNotFound)
    /// when a condition references a column the catalog does not
    /// declare.
    pub fn having(self, group: impl ConditionGroup) -> Result<HavingStep<'a>> {
        self.data.push_condition_group(Clause::Having, None, group)?;
        Ok(HavingStep { data: self.data })
    }
}

macro_rules! impl_logical_stage {
    ($step:ident, $clause:path) => {
        impl<'a> $step<'a> {
            /// Appends an `AND`-connected condition group.
            ///
            /// # Errors
            ///
            /// Returns [`BuilderError::ColumnNotFound`](crate::BuilderError::ColumnNotFound)
            /// for a column the catalog does not declare.
            pub fn and(self, group: impl ConditionGroup) -> Result<$step<'a>> {
                self.data
                    .push_condition_group($clause, Some(LogicalOperator::And), group)?;
                Ok(self)
            }

            /// Appends an `OR`-connected condition group.
            ///
            /// # Errors
            ///
            /// Returns [`BuilderError::ColumnNotFound`](crate::BuilderError::ColumnNotFound)
            /// for a column the catalog does not declare.
            pub fn or(self, group: impl ConditionGroup) -> Result<$step<'a>> {
                self.data
                    .push_condition_group($clause, Some(LogicalOperator::Or), group)?;
                Ok(self)
            }
        }
    };
}

impl_logical_stage!(WhereStep, Clause::Where);
impl_logical_stage!(HavingStep, Clause::Having);

macro_rules! impl_group_by_stage {
    ($($step:ident),+ $(,)?) => {
        $(
            impl<'a> $step<'a> {
                /// Groups the result rows by the given columns.
                ///
                /// # Errors
                ///
                /// Returns [`BuilderError::ColumnNotFound`](crate::BuilderError::ColumnNotFound)
                /// for a column the catalog does not declare.
                pub fn group_by(self, columns: impl IntoColumnRefs) -> Result<GroupByStep<'a>> {
                    self.data.set_group_by(columns.into_column_refs())?;
                    Ok(GroupByStep { data: self.data })
                }
            }
        )+
    };
}

impl_group_by_stage!(FromStep, WhereStep);

macro_rules! impl_order_by_stage {
    ($($step:ident),+ $(,)?) => {
        $(
            impl<'a> $step<'a> {
                /// Orders the result rows.
                ///
                /// Accepts a flat mixture of columns, expressions,
                /// select-alias strings, pre-built items, and
                /// `ASC`/`DESC`/`NULLS_FIRST`/`NULLS_LAST` markers;
                /// each marker modifies the item before it.
                ///
                /// # Errors
                ///
                /// Rejects a marker with no preceding item, a
                /// duplicated marker, an empty argument list, an
                /// unknown column, and an alias no select item
                /// declares.
                pub fn order_by(self, args: impl IntoOrderByArgs) -> Result<OrderByStep<'a>> {
                    self.data.set_order_by(args)?;
                    Ok(OrderByStep { data: self.data })
                }
            }
        )+
    };
}

impl_order_by_stage!(FromStep, WhereStep, GroupByStep, HavingStep);

macro_rules! impl_limit_stage {
    ($($step:ident),+ $(,)?) => {
        $(
            impl<'a> $step<'a> {
                /// Caps the number of result rows.
                ///
                /// # Errors
                ///
                /// Returns [`BuilderError::NegativeLimit`](crate::BuilderError::NegativeLimit)
                /// for a negative count.
                pub fn limit(self, count: i64) -> Result<LimitStep<'a>> {
                    self.data.set_limit(count)?;
                    Ok(LimitStep { data: self.data })
                }

                /// Renders `LIMIT ALL` (no cap, stated explicitly).
                pub fn limit_all(self) -> LimitStep<'a> {
                    self.data.set_limit_all();
                    LimitStep { data: self.data }
                }

                /// Renders `LIMIT NULL` (equivalent to `LIMIT ALL`).
                pub fn limit_null(self) -> LimitStep<'a> {
                    self.data.set_limit_null();
                    LimitStep { data: self.data }
                }

                /// Caps the row count through a bound parameter.
                pub fn limit_param(self, value: impl Into<Literal>) -> LimitStep<'a> {
                    self.data.set_limit_param(value);
                    LimitStep { data: self.data }
                }
            }
        )+
    };
}

impl_limit_stage!(FromStep, WhereStep, GroupByStep, HavingStep, OrderByStep);

macro_rules! impl_offset_stage {
    ($($step:ident),+ $(,)?) => {
        $(
            impl<'a> $step<'a> {
                /// Skips the first `count` result rows.
                ///
                /// # Errors
                ///
                /// Returns [`BuilderError::NegativeOffset`](crate::BuilderError::NegativeOffset)
                /// for a negative count.
                pub fn offset(self, count: i64) -> Result<OffsetStep<'a>> {
                    self.data.set_offset(count)?;
                    Ok(OffsetStep { data: self.data })
                }

                /// Skips rows through a bound parameter.
                pub fn offset_param(self, value: impl Into<Literal>) -> OffsetStep<'a> {
                    self.data.set_offset_param(value);
                    OffsetStep { data: self.data }
                }
            }
        )+
    };
}

impl_offset_stage!(
    FromStep,
    WhereStep,
    GroupByStep,
    HavingStep,
    OrderByStep,
    LimitStep,
);

macro_rules! impl_terminal {
    ($($step:ident),+ $(,)?) => {
        $(
            impl $step<'_> {
                /// Renders the statement and resets the builder.
                ///
                /// # Errors
                ///
                /// Returns the bracketing errors detected while
                /// assembling the WHERE/HAVING clauses.
                pub fn get_sql(self) -> Result<String> {
                    let (sql, _) = self.data.finalize()?;
                    Ok(sql)
                }

                /// Renders the statement with its positional values
                /// and resets the builder.
                ///
                /// # Errors
                ///
                /// Returns the bracketing errors detected while
                /// assembling the WHERE/HAVING clauses.
                pub fn get_binds(self) -> Result<BoundStatement> {
                    let (sql, values) = self.data.finalize()?;
                    Ok(BoundStatement { sql, values })
                }
            }
        )+
    };
}

impl_terminal!(
    SelectStep,
    FromStep,
    WhereStep,
    GroupByStep,
    HavingStep,
    OrderByStep,
    LimitStep,
    OffsetStep,
);
