//! Read-only database catalog: schemas, tables and typed columns.
//!
//! The builder never mutates the catalog; it only asks whether tables
//! and columns exist and what value type a column was declared with.

/// Name of the default schema.
pub const PUBLIC: &str = "public";

/// Declared value type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// Character data.
    Text,
    /// Integer or floating point data.
    Number,
    /// Boolean data.
    Boolean,
}

/// A column definition inside a [`Table`].
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    data_type: DataType,
}

impl Column {
    /// Declares a text column.
    #[must_use]
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: DataType::Text,
        }
    }

    /// Declares a numeric column.
    #[must_use]
    pub fn number(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: DataType::Number,
        }
    }

    /// Declares a boolean column.
    #[must_use]
    pub fn boolean(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: DataType::Boolean,
        }
    }

    /// The column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared value type.
    #[must_use]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }
}

/// A table definition inside a [`Schema`].
///
/// The owning schema name is stitched in when the [`Database`] is
/// assembled; a free-standing table belongs to `public`.
#[derive(Debug, Clone)]
pub struct Table {
    schema: String,
    name: String,
    columns: Vec<Column>,
}

impl Table {
    /// Creates a table definition.
    #[must_use]
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            schema: String::from(PUBLIC),
            name: name.into(),
            columns,
        }
    }

    /// The table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The owning schema name.
    #[must_use]
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Hands out a reference to the named column, or `None` when the
    /// table has no such column.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<ColumnRef> {
        self.columns.iter().find(|c| c.name == name).map(|c| ColumnRef {
            schema: self.schema.clone(),
            table: self.name.clone(),
            name: c.name.clone(),
            data_type: c.data_type,
        })
    }

    /// A plain reference to this table, usable in `from`.
    #[must_use]
    pub fn to_ref(&self) -> TableRef {
        TableRef {
            schema: self.schema.clone(),
            name: self.name.clone(),
            alias: None,
        }
    }

    /// An aliased reference to this table, usable in `from`.
    #[must_use]
    pub fn alias(&self, alias: impl Into<String>) -> TableRef {
        TableRef {
            schema: self.schema.clone(),
            name: self.name.clone(),
            alias: Some(alias.into()),
        }
    }
}

/// A named schema grouping tables.
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    tables: Vec<Table>,
}

impl Schema {
    /// Creates a schema definition.
    #[must_use]
    pub fn new(name: impl Into<String>, tables: Vec<Table>) -> Self {
        Self {
            name: name.into(),
            tables,
        }
    }

    /// The schema name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The database catalog the builder validates statements against.
#[derive(Debug, Clone)]
pub struct Database {
    schemas: Vec<Schema>,
    version: u32,
}

impl Database {
    /// Creates a catalog from explicit schemas.
    ///
    /// `version` is the catalog's dialect revision: version 1 renders
    /// identifiers and text literals bare (legacy behavior), version 2
    /// and later double-quote identifiers and single-quote text.
    #[must_use]
    pub fn new(mut schemas: Vec<Schema>, version: u32) -> Self {
        for schema in &mut schemas {
            for table in &mut schema.tables {
                table.schema.clone_from(&schema.name);
            }
        }
        Self { schemas, version }
    }

    /// Creates a catalog whose tables all live in `public`.
    #[must_use]
    pub fn single_schema(tables: Vec<Table>, version: u32) -> Self {
        Self::new(vec![Schema::new(PUBLIC, tables)], version)
    }

    /// Looks up a table by schema and name.
    #[must_use]
    pub fn table(&self, schema: &str, name: &str) -> Option<&Table> {
        self.schemas
            .iter()
            .find(|s| s.name == schema)?
            .tables
            .iter()
            .find(|t| t.name == name)
    }

    /// Whether the referenced table exists in this catalog.
    #[must_use]
    pub fn table_exists(&self, table: &TableRef) -> bool {
        self.table(&table.schema, &table.name).is_some()
    }

    /// Whether the referenced column exists in this catalog.
    #[must_use]
    pub fn column_exists(&self, column: &ColumnRef) -> bool {
        self.table(&column.schema, &column.table)
            .is_some_and(|t| t.columns.iter().any(|c| c.name == column.name))
    }

    pub(crate) fn quotes_identifiers(&self) -> bool {
        self.version >= 2
    }
}

/// A lightweight reference to a table, optionally aliased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    schema: String,
    name: String,
    alias: Option<String>,
}

impl TableRef {
    /// The owning schema name.
    #[must_use]
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// The table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The alias, when one was given.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }
}

impl From<&Table> for TableRef {
    fn from(table: &Table) -> Self {
        table.to_ref()
    }
}

/// A lightweight reference to a column, carrying its identity and
/// declared value type. Cheap to clone; comparison helpers live next
/// to the condition and order-by models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    schema: String,
    table: String,
    name: String,
    data_type: DataType,
}

impl ColumnRef {
    /// The owning schema name.
    #[must_use]
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// The owning table name.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// The column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared value type.
    #[must_use]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }
}

/// Conversion into the list of table references consumed by `from`.
///
/// Implemented for single references and for tuples of mixed
/// reference kinds, so `from(&users)` and `from((&users, &orders))`
/// both read naturally.
pub trait IntoTableRefs {
    /// Converts `self` into an ordered table reference list.
    fn into_table_refs(self) -> Vec<TableRef>;
}

macro_rules! impl_into_table_refs_single {
    ($($t:ty),+ $(,)?) => {
        $(
            impl IntoTableRefs for $t {
                fn into_table_refs(self) -> Vec<TableRef> {
                    vec![self.into()]
                }
            }
        )+
    };
}

impl_into_table_refs_single!(TableRef, &Table);

impl IntoTableRefs for &TableRef {
    fn into_table_refs(self) -> Vec<TableRef> {
        vec![self.clone()]
    }
}

impl IntoTableRefs for Vec<TableRef> {
    fn into_table_refs(self) -> Vec<TableRef> {
        self
    }
}

macro_rules! impl_into_table_refs_tuple {
    ($($t:ident),+) => {
        impl<$($t: Into<TableRef>),+> IntoTableRefs for ($($t,)+) {
            fn into_table_refs(self) -> Vec<TableRef> {
                #[allow(non_snake_case)]
                let ($($t,)+) = self;
                vec![$($t.into()),+]
            }
        }
    };
}

impl_into_table_refs_tuple!(T0);
impl_into_table_refs_tuple!(T0, T1);
impl_into_table_refs_tuple!(T0, T1, T2);
impl_into_table_refs_tuple!(T0, T1, T2, T3);

/// Conversion into the column list consumed by `group_by`.
pub trait IntoColumnRefs {
    /// Converts `self` into an ordered column reference list.
    fn into_column_refs(self) -> Vec<ColumnRef>;
}

impl IntoColumnRefs for ColumnRef {
    fn into_column_refs(self) -> Vec<ColumnRef> {
        vec![self]
    }
}

impl IntoColumnRefs for &ColumnRef {
    fn into_column_refs(self) -> Vec<ColumnRef> {
        vec![self.clone()]
    }
}

impl IntoColumnRefs for Vec<ColumnRef> {
    fn into_column_refs(self) -> Vec<ColumnRef> {
        self
    }
}

macro_rules! impl_into_column_refs_tuple {
    ($($t:ident),+) => {
        impl<$($t: Into<ColumnRef>),+> IntoColumnRefs for ($($t,)+) {
            fn into_column_refs(self) -> Vec<ColumnRef> {
                #[allow(non_snake_case)]
                let ($($t,)+) = self;
                vec![$($t.into()),+]
            }
        }
    };
}

impl From<&ColumnRef> for ColumnRef {
    fn from(column: &ColumnRef) -> Self {
        column.clone()
    }
}

impl_into_column_refs_tuple!(T0, T1);
impl_into_column_refs_tuple!(T0, T1, T2);
impl_into_column_refs_tuple!(T0, T1, T2, T3);
