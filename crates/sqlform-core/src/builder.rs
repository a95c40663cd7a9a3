//! The text and parameter accumulator that formatting writes into.

use crate::dialect::{Dialect, MySqlDialect};
use crate::value::SqlValue;

/// Accumulates SQL text and bound parameters.
///
/// Expressions append themselves through [`Format::format`]; the finished
/// builder is handed to a [`Connection`](crate::Connection) for submission.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    sql: String,
    params: Vec<SqlValue>,
    placeholders: Vec<usize>,
    dialect: MySqlDialect,
}

impl QueryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends raw SQL text.
    pub fn append(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    /// Appends an unsigned integer, e.g. a `LIMIT` count.
    pub fn append_count(&mut self, n: u64) -> &mut Self {
        self.sql.push_str(&n.to_string());
        self
    }

    /// Appends a quoted identifier.
    pub fn append_identifier(&mut self, name: &str) -> &mut Self {
        let quoted = self.dialect.quote_identifier(name);
        self.sql.push_str(&quoted);
        self
    }

    /// Appends a literal value.
    ///
    /// Quote-free values are rendered inline; everything else becomes a
    /// placeholder with the value pushed onto the parameter list.
    pub fn append_value(&mut self, value: &SqlValue) -> &mut Self {
        if value.is_inline() {
            self.sql.push_str(&value.to_sql_inline());
        } else {
            self.placeholders.push(self.sql.len());
            self.sql.push_str(self.dialect.parameter_placeholder());
            self.params.push(value.clone());
        }
        self
    }

    /// Appends each item through `f`, separated by `separator`.
    pub fn append_separated<I, F>(&mut self, items: I, separator: &str, mut f: F) -> &mut Self
    where
        I: IntoIterator,
        F: FnMut(&mut Self, I::Item),
    {
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.sql.push_str(separator);
            }
            f(self, item);
        }
        self
    }

    /// Returns the SQL text.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the bound parameters, in placeholder order.
    #[must_use]
    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    /// Returns whether nothing has been appended yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Renders the SQL with every parameter substituted inline (escaped).
    ///
    /// **Warning**: For display and debugging. Submit the builder itself
    /// so parameters stay bound.
    #[must_use]
    pub fn to_sql_inline(&self) -> String {
        let placeholder_len = self.dialect.parameter_placeholder().len();
        let mut out = String::with_capacity(self.sql.len());
        let mut cursor = 0;
        for (&at, value) in self.placeholders.iter().zip(&self.params) {
            out.push_str(&self.sql[cursor..at]);
            out.push_str(&value.to_sql_inline());
            cursor = at + placeholder_len;
        }
        out.push_str(&self.sql[cursor..]);
        out
    }

    /// Consumes the builder and returns the SQL and parameters.
    #[must_use]
    pub fn build(self) -> (String, Vec<SqlValue>) {
        (self.sql, self.params)
    }
}

/// Something that renders itself into a [`QueryBuilder`].
///
/// Formatting is pure: it only appends to the builder.
pub trait Format {
    /// Appends this node's SQL to `builder`.
    fn format(&self, builder: &mut QueryBuilder);

    /// Formats into a fresh builder.
    fn to_builder(&self) -> QueryBuilder {
        let mut builder = QueryBuilder::new();
        self.format(&mut builder);
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_quoting() {
        let mut b = QueryBuilder::new();
        b.append_identifier("users");
        assert_eq!(b.sql(), "`users`");
    }

    #[test]
    fn test_inline_and_bound_values() {
        let mut b = QueryBuilder::new();
        b.append("a = ")
            .append_value(&SqlValue::Int(1))
            .append(" AND b = ")
            .append_value(&SqlValue::Text(String::from("x")));
        assert_eq!(b.sql(), "a = 1 AND b = ?");
        assert_eq!(b.params(), &[SqlValue::Text(String::from("x"))]);
    }

    #[test]
    fn test_append_separated() {
        let mut b = QueryBuilder::new();
        b.append_separated(["a", "b", "c"], ", ", |b, name| {
            b.append_identifier(name);
        });
        assert_eq!(b.sql(), "`a`, `b`, `c`");
    }

    #[test]
    fn test_to_sql_inline_substitutes_parameters() {
        let mut b = QueryBuilder::new();
        b.append_identifier("why?")
            .append(" = ")
            .append_value(&SqlValue::Text(String::from("it's")))
            .append(" OR x = ")
            .append_value(&SqlValue::Blob(vec![0xAB]));
        assert_eq!(b.sql(), "`why?` = ? OR x = ?");
        assert_eq!(b.to_sql_inline(), "`why?` = 'it''s' OR x = X'AB'");
    }

    #[test]
    fn test_build_returns_parts() {
        let mut b = QueryBuilder::new();
        b.append("SELECT ").append_value(&SqlValue::Text(String::from("v")));
        let (sql, params) = b.build();
        assert_eq!(sql, "SELECT ?");
        assert_eq!(params.len(), 1);
    }
}
