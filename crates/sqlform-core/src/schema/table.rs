//! Tables: mutable column registries with typed column factories.

use std::fmt;
use std::hash::{Hash, Hasher};

use bytes::Bytes;
use chrono::{DateTime, Utc};

use super::column::{Column, ColumnDef, TableRef};
use super::field_set::{ColumnSet, FieldSet};
use crate::builder::{Format, QueryBuilder};
use crate::expression::AnyExpression;
use crate::select::Select;
use crate::types::{SqlEnum, SqlType};
use crate::value::ToSqlValue;

/// A named registry of columns.
///
/// Columns are declared through the factory methods, each of which
/// registers the column and returns a typed handle. Two tables compare
/// equal when their names match, regardless of their columns.
///
/// ```rust
/// use sqlform_core::{Column, FieldSet, Operand, Query, Table};
///
/// let mut table = Table::new("users");
/// let id: Column<i32> = table.integer("id");
/// let name: Column<String> = table.text("name");
///
/// let query = table.select_where(id.equals(1)).build().unwrap();
/// assert_eq!(query.sql(), "SELECT `id`, `name` FROM `users` WHERE `id` = 1");
/// # let _ = name;
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    columns: Vec<ColumnDef>,
}

impl Table {
    /// Creates an empty table called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Creates an empty table named after the schema type `S`.
    ///
    /// The name is the last path segment of `S` with a trailing `Table`
    /// removed, so `app::schema::UserTable` becomes `User`.
    #[must_use]
    pub fn for_schema<S: ?Sized>() -> Self {
        Self::new(schema_type_name(std::any::type_name::<S>()))
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the backtick-quoted table name.
    #[must_use]
    pub fn quoted_name(&self) -> String {
        self.to_builder().sql().to_string()
    }

    /// Returns a non-owning handle to this table.
    #[must_use]
    pub fn table_ref(&self) -> TableRef {
        TableRef::new(self.name.clone())
    }

    /// Returns the registered columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Returns the number of registered columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns whether no columns are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Registers a column of any supported type.
    ///
    /// Duplicate names are not rejected.
    pub fn add_column<T: SqlType>(&mut self, name: impl Into<String>) -> Column<T> {
        let column = Column::<T>::new(self.table_ref(), name.into());
        self.columns.push(column.def().clone());
        column
    }

    /// Registers an `INT` column.
    pub fn integer(&mut self, name: impl Into<String>) -> Column<i32> {
        self.add_column(name)
    }

    /// Registers a `SMALLINT` column.
    pub fn short(&mut self, name: impl Into<String>) -> Column<i16> {
        self.add_column(name)
    }

    /// Registers a `CHAR(1)` column.
    pub fn char(&mut self, name: impl Into<String>) -> Column<char> {
        self.add_column(name)
    }

    /// Registers a `FLOAT` column.
    pub fn float(&mut self, name: impl Into<String>) -> Column<f32> {
        self.add_column(name)
    }

    /// Registers a `DOUBLE` column.
    pub fn double(&mut self, name: impl Into<String>) -> Column<f64> {
        self.add_column(name)
    }

    /// Registers a `BIGINT` column.
    pub fn long(&mut self, name: impl Into<String>) -> Column<i64> {
        self.add_column(name)
    }

    /// Registers a `DATETIME` column.
    pub fn date(&mut self, name: impl Into<String>) -> Column<DateTime<Utc>> {
        self.add_column(name)
    }

    /// Registers a `BOOLEAN` column.
    pub fn bool(&mut self, name: impl Into<String>) -> Column<bool> {
        self.add_column(name)
    }

    /// Registers a `BLOB` column.
    pub fn blob(&mut self, name: impl Into<String>) -> Column<Vec<u8>> {
        self.add_column(name)
    }

    /// Registers a `TEXT` column.
    pub fn text(&mut self, name: impl Into<String>) -> Column<String> {
        self.add_column(name)
    }

    /// Registers a `VARBINARY` column.
    pub fn binary(&mut self, name: impl Into<String>) -> Column<Bytes> {
        self.add_column(name)
    }

    /// Registers an `ENUM` column over the variants of `T`.
    pub fn enumeration<T: SqlEnum>(&mut self, name: impl Into<String>) -> Column<T> {
        self.add_column(name)
    }

    /// Replaces `column` with a nullable version of itself.
    ///
    /// The old handle is consumed; use the returned one from now on. The
    /// registry entry is replaced in place, so declaration order is kept.
    /// With duplicate column names the first matching entry is replaced.
    pub fn nullable<T: SqlType>(&mut self, column: Column<T>) -> Column<Option<T>> {
        let old = column.into_def();
        let new = old.clone().with_nullable(true);
        self.replace_column(&old, new.clone());
        Column::from_def(new)
    }

    /// Marks `column` as referencing `target` (a foreign key).
    pub fn references<T: SqlType, U: SqlType>(&mut self, column: Column<T>, target: &Column<U>) -> Column<T> {
        let old = column.into_def();
        let new = old.clone().with_referee(target.def().clone());
        self.replace_column(&old, new.clone());
        Column::from_def(new)
    }

    /// Sets the default value of `column`.
    pub fn with_default<T: SqlType + ToSqlValue>(&mut self, column: Column<T>, value: T) -> Column<T> {
        let old = column.into_def();
        let new = old.clone().with_default(value.to_sql_value());
        self.replace_column(&old, new.clone());
        Column::from_def(new)
    }

    // Removes exactly one matching entry; a column from elsewhere is appended.
    fn replace_column(&mut self, old: &ColumnDef, new: ColumnDef) {
        match self.columns.iter().position(|c| c == old) {
            Some(index) => self.columns[index] = new,
            None => self.columns.push(new),
        }
    }
}

fn schema_type_name(full: &str) -> String {
    let path = full.split('<').next().unwrap_or(full);
    let simple = path.rsplit("::").next().unwrap_or(path);
    simple
        .strip_suffix("Table")
        .filter(|name| !name.is_empty())
        .unwrap_or(simple)
        .to_string()
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Table {}

impl Hash for Table {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Format for Table {
    fn format(&self, builder: &mut QueryBuilder) {
        builder.append_identifier(&self.name);
    }
}

impl FieldSet for Table {
    fn fields(&self) -> Vec<AnyExpression> {
        self.columns.iter().map(ColumnDef::field).collect()
    }

    fn source(&self) -> TableRef {
        self.table_ref()
    }
}

impl ColumnSet for Table {
    fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }
}

/// A schema description: a struct that owns a [`Table`] and keeps the
/// typed column handles as fields.
///
/// ```rust
/// use sqlform_core::{Column, Operand, Query, Schema, Table};
///
/// struct PostTable {
///     table: Table,
///     id: Column<i64>,
///     title: Column<String>,
/// }
///
/// impl PostTable {
///     fn new() -> Self {
///         let mut table = Table::for_schema::<Self>();
///         let id = table.long("id");
///         let title = table.text("title");
///         Self { table, id, title }
///     }
/// }
///
/// impl Schema for PostTable {
///     fn table(&self) -> &Table {
///         &self.table
///     }
/// }
///
/// let posts = PostTable::new();
/// let sql = posts.select_where(posts.id.equals(7)).build().unwrap();
/// assert_eq!(sql.sql(), "SELECT `id`, `title` FROM `Post` WHERE `id` = 7");
/// # let _ = &posts.title;
/// ```
pub trait Schema {
    /// Returns the table owning the schema's columns.
    fn table(&self) -> &Table;

    /// Selects every column of the table.
    fn select(&self) -> Select {
        self.table().select()
    }

    /// Selects every column of the table matching `predicate`.
    fn select_where(&self, predicate: crate::Expression<bool>) -> Select {
        self.table().select_where(predicate)
    }
}
