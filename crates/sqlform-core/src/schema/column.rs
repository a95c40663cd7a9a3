//! Columns.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::builder::{Format, QueryBuilder};
use crate::expression::{AnyExpression, Expr, Expression, Operand};
use crate::types::{SqlType, ValueType};
use crate::value::SqlValue;

/// A non-owning handle naming a table.
///
/// Columns refer back to their table through this handle; the [`Table`]
/// itself owns the columns.
///
/// [`Table`]: crate::Table
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRef {
    name: String,
}

impl TableRef {
    /// Creates a handle for the table called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Format for TableRef {
    fn format(&self, builder: &mut QueryBuilder) {
        builder.append_identifier(&self.name);
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A column as recorded in its table's registry, without a static type.
///
/// Identity is structural: two definitions are equal when they share the
/// table name, the column name and the value type. Nullability, the
/// referenced column and the default value do not take part.
#[derive(Debug, Clone)]
pub struct ColumnDef {
    table: TableRef,
    name: String,
    value_type: ValueType,
    nullable: bool,
    referee: Option<Box<ColumnDef>>,
    default_value: Option<SqlValue>,
}

impl ColumnDef {
    pub(crate) fn new(table: TableRef, name: String, value_type: ValueType, nullable: bool) -> Self {
        Self {
            table,
            name,
            value_type,
            nullable,
            referee: None,
            default_value: None,
        }
    }

    /// Returns the owning table.
    #[must_use]
    pub const fn table(&self) -> &TableRef {
        &self.table
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the backtick-quoted column name.
    #[must_use]
    pub fn quoted_name(&self) -> String {
        self.to_builder().sql().to_string()
    }

    /// Returns the value type tag.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Returns whether the column accepts NULL.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Returns the column this one references as a foreign key.
    #[must_use]
    pub fn referee(&self) -> Option<&Self> {
        self.referee.as_deref()
    }

    /// Returns the default value.
    #[must_use]
    pub const fn default_value(&self) -> Option<&SqlValue> {
        self.default_value.as_ref()
    }

    /// Returns the column as a selectable field.
    #[must_use]
    pub fn field(&self) -> AnyExpression {
        AnyExpression::new(Expr::column(self.name.clone()), self.value_type, self.nullable)
    }

    pub(crate) fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub(crate) fn with_referee(mut self, referee: Self) -> Self {
        self.referee = Some(Box::new(referee));
        self
    }

    pub(crate) fn with_default(mut self, value: SqlValue) -> Self {
        self.default_value = Some(value);
        self
    }
}

impl PartialEq for ColumnDef {
    fn eq(&self, other: &Self) -> bool {
        self.table == other.table && self.name == other.name && self.value_type == other.value_type
    }
}

impl Eq for ColumnDef {}

impl Hash for ColumnDef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.table.hash(state);
        self.name.hash(state);
        self.value_type.hash(state);
    }
}

impl Format for ColumnDef {
    fn format(&self, builder: &mut QueryBuilder) {
        builder.append_identifier(&self.name);
    }
}

impl fmt::Display for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.name)
    }
}

/// A typed column handle.
///
/// Handles are returned by the [`Table`](crate::Table) factory methods and
/// are meant to be kept as fields of a schema description. Formatting emits
/// the quoted column name only, never table-qualified.
pub struct Column<T> {
    def: ColumnDef,
    _type: PhantomData<fn() -> T>,
}

impl<T: SqlType> Column<T> {
    pub(crate) fn new(table: TableRef, name: String) -> Self {
        Self::from_def(ColumnDef::new(table, name, T::VALUE_TYPE, T::NULLABLE))
    }

    pub(crate) const fn from_def(def: ColumnDef) -> Self {
        Self {
            def,
            _type: PhantomData,
        }
    }

    pub(crate) fn into_def(self) -> ColumnDef {
        self.def
    }

    /// Returns the registry entry backing this handle.
    #[must_use]
    pub const fn def(&self) -> &ColumnDef {
        &self.def
    }

    /// Returns the owning table.
    #[must_use]
    pub const fn table(&self) -> &TableRef {
        self.def.table()
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.def.name()
    }

    /// Returns the backtick-quoted column name.
    #[must_use]
    pub fn quoted_name(&self) -> String {
        self.def.quoted_name()
    }

    /// Returns the value type tag.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.def.value_type()
    }

    /// Returns whether the column accepts NULL.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.def.is_nullable()
    }

    /// Returns the column this one references as a foreign key.
    #[must_use]
    pub fn referee(&self) -> Option<&ColumnDef> {
        self.def.referee()
    }

    /// Returns the default value.
    #[must_use]
    pub const fn default_value(&self) -> Option<&SqlValue> {
        self.def.default_value()
    }
}

impl<T: SqlType> Operand<T> for Column<T> {
    fn expression(&self) -> Expression<T> {
        Expression::new(Expr::column(self.def.name.clone()))
    }
}

impl<T: SqlType> crate::expression::IntoExpression<T> for &Column<T> {
    fn into_expression(self) -> Expression<T> {
        self.expression()
    }
}

impl<T: SqlType> crate::expression::IntoExpression<T> for Column<T> {
    fn into_expression(self) -> Expression<T> {
        self.expression()
    }
}

impl<T: SqlType> From<&Column<T>> for AnyExpression {
    fn from(column: &Column<T>) -> Self {
        column.field()
    }
}

impl<T: SqlType> From<Column<T>> for AnyExpression {
    fn from(column: Column<T>) -> Self {
        column.field()
    }
}

impl From<&ColumnDef> for AnyExpression {
    fn from(column: &ColumnDef) -> Self {
        column.field()
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            def: self.def.clone(),
            _type: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Column").field(&self.def).finish()
    }
}

impl<T, U> PartialEq<Column<U>> for Column<T> {
    fn eq(&self, other: &Column<U>) -> bool {
        self.def == other.def
    }
}

impl<T> PartialEq<ColumnDef> for Column<T> {
    fn eq(&self, other: &ColumnDef) -> bool {
        self.def == *other
    }
}

impl<T> Eq for Column<T> {}

impl<T> Hash for Column<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.def.hash(state);
    }
}

impl<T> Format for Column<T> {
    fn format(&self, builder: &mut QueryBuilder) {
        self.def.format(builder);
    }
}

impl<T> fmt::Display for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.def, f)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use super::*;

    fn hash_of(value: &impl Hash) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    fn column<T: SqlType>(table: &str, name: &str) -> Column<T> {
        Column::new(TableRef::new(table), String::from(name))
    }

    #[test]
    fn test_structural_equality() {
        let a = column::<i32>("users", "id");
        let b = column::<i32>("users", "id");
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_equality_ignores_nullability() {
        let a = column::<i32>("users", "id");
        let b = column::<Option<i32>>("users", "id");
        assert!(a == b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_inequality() {
        assert_ne!(column::<i32>("users", "id"), column::<i32>("posts", "id"));
        assert_ne!(column::<i32>("users", "id"), column::<i32>("users", "age"));
        assert!(column::<i32>("users", "id") != column::<i64>("users", "id"));
    }

    #[test]
    fn test_display_and_quoting() {
        let c = column::<String>("users", "name");
        assert_eq!(c.to_string(), "users.name");
        assert_eq!(c.quoted_name(), "`name`");
        assert_eq!(c.to_builder().sql(), "`name`");
    }
}
