//! Rendering options.
//!
//! Every field has a sensible default; callers override individual
//! fields with struct-update syntax:
//!
//! ```
//! use stepstone_core::BuilderOptions;
//!
//! let options = BuilderOptions {
//!     use_semicolon: false,
//!     ..BuilderOptions::default()
//! };
//! assert!(!options.use_semicolon);
//! ```

/// When to prefix a column with its table name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableQualifyPolicy {
    /// Prefix every column.
    Always,
    /// Prefix only when the statement selects from two or more tables.
    #[default]
    WhenTwoOrMore,
}

/// When to prefix a `public`-schema table with its schema name.
///
/// Tables in any other schema are always prefixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaQualifyPolicy {
    /// Prefix every `public` table.
    Always,
    /// Never prefix a `public` table.
    Never,
    /// Prefix `public` tables only when the statement also mentions a
    /// table from another schema.
    #[default]
    WhenOtherSchemaMentioned,
}

/// Whether to put the `AS` keyword before an alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AliasAsPolicy {
    /// `item AS alias`.
    #[default]
    Always,
    /// `item alias`.
    Never,
}

/// When to print a sort keyword that matches the SQL default
/// (`ASC`, `NULLS LAST`). The non-default keywords `DESC` and
/// `NULLS FIRST` always print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMentionPolicy {
    /// Print on every ORDER BY item.
    Always,
    /// Never print, even when explicitly requested.
    Never,
    /// Print only where the caller explicitly requested it.
    #[default]
    WhenMentioned,
}

/// Rendering options applied when a statement is finalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderOptions {
    /// Terminate the statement with `;`.
    pub use_semicolon: bool,
    /// Column table-name qualification.
    pub add_table_name: TableQualifyPolicy,
    /// `public` schema-name qualification.
    pub add_public_schema_name: SchemaQualifyPolicy,
    /// `AS` before column aliases.
    pub add_as_before_column_alias: AliasAsPolicy,
    /// `AS` before table aliases.
    pub add_as_before_table_alias: AliasAsPolicy,
    /// `ASC` printing on ORDER BY items.
    pub print_asc: SortMentionPolicy,
    /// `NULLS LAST` printing on ORDER BY items.
    pub print_nulls_last: SortMentionPolicy,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            use_semicolon: true,
            add_table_name: TableQualifyPolicy::default(),
            add_public_schema_name: SchemaQualifyPolicy::default(),
            add_as_before_column_alias: AliasAsPolicy::default(),
            add_as_before_table_alias: AliasAsPolicy::default(),
            print_asc: SortMentionPolicy::default(),
            print_nulls_last: SortMentionPolicy::default(),
        }
    }
}
