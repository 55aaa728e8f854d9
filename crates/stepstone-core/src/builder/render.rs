//! Statement assembly: identifier qualification, clause ordering and
//! WHERE/HAVING token validation.

use tracing::debug;

use crate::binder::BinderStore;
use crate::condition::WherePart;
use crate::error::{BuilderError, Result};
use crate::options::{AliasAsPolicy, BuilderOptions, SchemaQualifyPolicy, TableQualifyPolicy};
use crate::schema::{ColumnRef, Database, TableRef, PUBLIC};

use super::{DistinctMode, FromItem, JoinKind, LimitValue, OffsetValue, QueryData};

/// Emits the SQL fragment for one model node.
///
/// Binders register themselves on first render, which is what gives
/// expression-level placeholders their left-to-right ordinals.
pub(crate) trait Render {
    fn render(&self, ctx: &RenderContext<'_>, binders: &mut BinderStore) -> String;
}

/// Per-statement rendering state, computed once from the finalized
/// FROM set before any fragment is emitted.
pub(crate) struct RenderContext<'a> {
    database: &'a Database,
    options: &'a BuilderOptions,
    table_count: usize,
    mentions_other_schema: bool,
    /// Table names appearing under more than one schema in FROM.
    ambiguous_tables: Vec<&'a str>,
    /// `(schema, table, alias)` for aliased FROM items.
    aliases: Vec<(&'a str, &'a str, &'a str)>,
}

impl<'a> RenderContext<'a> {
    pub(crate) fn new(
        database: &'a Database,
        options: &'a BuilderOptions,
        from_items: &'a [FromItem],
    ) -> Self {
        let mentions_other_schema = from_items.iter().any(|f| f.table.schema() != PUBLIC);
        let mut ambiguous_tables = Vec::new();
        for item in from_items {
            let name = item.table.name();
            let seen_elsewhere = from_items
                .iter()
                .any(|other| other.table.name() == name && other.table.schema() != item.table.schema());
            if seen_elsewhere && !ambiguous_tables.contains(&name) {
                ambiguous_tables.push(name);
            }
        }
        let aliases = from_items
            .iter()
            .filter_map(|f| {
                f.table
                    .alias()
                    .map(|alias| (f.table.schema(), f.table.name(), alias))
            })
            .collect();
        Self {
            database,
            options,
            table_count: from_items.len(),
            mentions_other_schema,
            ambiguous_tables,
            aliases,
        }
    }

    pub(crate) fn options(&self) -> &BuilderOptions {
        self.options
    }

    /// Whether this catalog revision quotes identifiers and text.
    pub(crate) fn quoting(&self) -> bool {
        self.database.quotes_identifiers()
    }

    /// Quotes one identifier part, doubling embedded quotes.
    pub(crate) fn quote_identifier(&self, name: &str) -> String {
        if self.quoting() {
            let escaped = name.replace('"', "\"\"");
            format!("\"{escaped}\"")
        } else {
            String::from(name)
        }
    }

    fn alias_for(&self, schema: &str, table: &str) -> Option<&str> {
        self.aliases
            .iter()
            .find(|(s, t, _)| *s == schema && *t == table)
            .map(|(_, _, alias)| *alias)
    }

    /// Whether a column's table prefix also needs the schema name.
    ///
    /// Only an ambiguous table name forces it, since the bare prefix
    /// would not identify the table. The `add_public_schema_name`
    /// policy governs FROM items, never column prefixes.
    fn column_schema_prefix(&self, table: &str) -> bool {
        self.ambiguous_tables.contains(&table)
    }

    fn table_schema_prefix(&self, schema: &str) -> bool {
        if schema != PUBLIC {
            return true;
        }
        match self.options.add_public_schema_name {
            SchemaQualifyPolicy::Always => true,
            SchemaQualifyPolicy::Never => false,
            SchemaQualifyPolicy::WhenOtherSchemaMentioned => self.mentions_other_schema,
        }
    }
}

impl Render for ColumnRef {
    fn render(&self, ctx: &RenderContext<'_>, _binders: &mut BinderStore) -> String {
        let name = ctx.quote_identifier(self.name());
        let qualify = match ctx.options().add_table_name {
            TableQualifyPolicy::Always => true,
            TableQualifyPolicy::WhenTwoOrMore => ctx.table_count >= 2,
        };
        if !qualify {
            return name;
        }
        // an aliased FROM item hides its table name
        if let Some(alias) = ctx.alias_for(self.schema(), self.table()) {
            let alias = ctx.quote_identifier(alias);
            return format!("{alias}.{name}");
        }
        let table = ctx.quote_identifier(self.table());
        if ctx.column_schema_prefix(self.table()) {
            let schema = ctx.quote_identifier(self.schema());
            format!("{schema}.{table}.{name}")
        } else {
            format!("{table}.{name}")
        }
    }
}

fn render_table(ctx: &RenderContext<'_>, table: &TableRef) -> String {
    let mut rendered = ctx.quote_identifier(table.name());
    if ctx.table_schema_prefix(table.schema()) {
        let schema = ctx.quote_identifier(table.schema());
        rendered = format!("{schema}.{rendered}");
    }
    if let Some(alias) = table.alias() {
        let alias = ctx.quote_identifier(alias);
        match ctx.options().add_as_before_table_alias {
            AliasAsPolicy::Always => {
                rendered.push_str(" AS ");
                rendered.push_str(&alias);
            }
            AliasAsPolicy::Never => {
                rendered.push(' ');
                rendered.push_str(&alias);
            }
        }
    }
    rendered
}

/// Checks group bracketing with a running balance counter.
fn validate_parts(parts: &[WherePart]) -> Result<()> {
    let mut depth = 0_usize;
    let mut open_is_empty = false;
    for part in parts {
        match part {
            WherePart::Open => {
                depth += 1;
                open_is_empty = true;
            }
            WherePart::Close => {
                if open_is_empty {
                    return Err(BuilderError::EmptyParentheses);
                }
                if depth == 0 {
                    return Err(BuilderError::CloseBeforeOpen);
                }
                depth -= 1;
            }
            WherePart::Condition(_) | WherePart::Logical(_) => open_is_empty = false,
        }
    }
    if depth > 0 {
        return Err(BuilderError::UnclosedParentheses);
    }
    Ok(())
}

fn render_parts(
    parts: &[WherePart],
    ctx: &RenderContext<'_>,
    binders: &mut BinderStore,
) -> String {
    let rendered: Vec<String> = parts
        .iter()
        .map(|part| match part {
            WherePart::Condition(condition) => condition.render(ctx, binders),
            WherePart::Logical(op) => op.to_string(),
            WherePart::Open => String::from("("),
            WherePart::Close => String::from(")"),
        })
        .collect();
    rendered.join(" ")
}

impl QueryData {
    /// Assembles the finished statement text.
    ///
    /// # Errors
    ///
    /// Rejects malformed WHERE/HAVING bracketing; every other input
    /// was validated by the step that accepted it.
    pub(crate) fn render_sql(&mut self) -> Result<String> {
        validate_parts(&self.where_parts)?;
        validate_parts(&self.having_parts)?;

        let binders = &mut self.binders;
        let ctx = RenderContext::new(&self.database, &self.options, &self.from_items);

        let mut sql = String::from("SELECT");
        match self.distinct {
            DistinctMode::Plain => {}
            DistinctMode::Distinct => sql.push_str(" DISTINCT"),
            DistinctMode::All => sql.push_str(" ALL"),
        }
        if !self.select_items.is_empty() {
            let items: Vec<String> = self
                .select_items
                .iter()
                .map(|item| item.render(&ctx, binders))
                .collect();
            sql.push(' ');
            sql.push_str(&items.join(", "));
        }

        if !self.from_items.is_empty() {
            sql.push_str(" FROM ");
            for (index, item) in self.from_items.iter().enumerate() {
                if index > 0 {
                    sql.push_str(match item.join {
                        JoinKind::Comma => ", ",
                        JoinKind::Cross => " CROSS JOIN ",
                    });
                }
                sql.push_str(&render_table(&ctx, &item.table));
            }
        }

        if !self.where_parts.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&render_parts(&self.where_parts, &ctx, binders));
        }

        if !self.group_by_items.is_empty() {
            let columns: Vec<String> = self
                .group_by_items
                .iter()
                .map(|col| col.render(&ctx, binders))
                .collect();
            sql.push_str(" GROUP BY ");
            sql.push_str(&columns.join(", "));
        }

        if !self.having_parts.is_empty() {
            sql.push_str(" HAVING ");
            sql.push_str(&render_parts(&self.having_parts, &ctx, binders));
        }

        if !self.order_by_items.is_empty() {
            let items: Vec<String> = self
                .order_by_items
                .iter()
                .map(|item| item.render(&ctx, binders))
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&items.join(", "));
        }

        match &self.limit {
            Some(LimitValue::Count(n)) => {
                sql.push_str(" LIMIT ");
                sql.push_str(&n.to_string());
            }
            Some(LimitValue::All) => sql.push_str(" LIMIT ALL"),
            Some(LimitValue::Null) => sql.push_str(" LIMIT NULL"),
            Some(LimitValue::Binder(binder)) => {
                sql.push_str(" LIMIT ");
                sql.push_str(&binder.render(&ctx, binders));
            }
            None => {}
        }

        match &self.offset {
            Some(OffsetValue::Count(n)) => {
                sql.push_str(" OFFSET ");
                sql.push_str(&n.to_string());
            }
            Some(OffsetValue::Binder(binder)) => {
                sql.push_str(" OFFSET ");
                sql.push_str(&binder.render(&ctx, binders));
            }
            None => {}
        }

        if self.options.use_semicolon {
            sql.push(';');
        }

        debug!(sql = %sql, "rendered select statement");
        Ok(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{LogicalOperator, WherePart};
    use crate::schema::{Column, Table};

    fn condition() -> WherePart {
        let t = Table::new("t", vec![Column::number("n")]);
        WherePart::Condition(t.column("n").unwrap().gt(1_i64).unwrap())
    }

    #[test]
    fn bracketing_errors_are_distinguished() {
        assert!(matches!(
            validate_parts(&[WherePart::Open, WherePart::Close]),
            Err(BuilderError::EmptyParentheses)
        ));
        assert!(matches!(
            validate_parts(&[condition(), WherePart::Close]),
            Err(BuilderError::CloseBeforeOpen)
        ));
        assert!(matches!(
            validate_parts(&[WherePart::Open, condition()]),
            Err(BuilderError::UnclosedParentheses)
        ));
        assert!(validate_parts(&[
            WherePart::Open,
            condition(),
            WherePart::Logical(LogicalOperator::Or),
            condition(),
            WherePart::Close,
        ])
        .is_ok());
    }
}
