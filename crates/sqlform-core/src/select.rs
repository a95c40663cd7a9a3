//! The SELECT statement.
//!
//! A [`Select`] accumulates clauses in any order and always renders them in
//! the fixed SQL order: `SELECT`, `FROM`, `WHERE`, `GROUP BY`, `HAVING`,
//! `ORDER BY`, `LIMIT`/`OFFSET`, `FOR UPDATE`.

use crate::builder::{Format, QueryBuilder};
use crate::error::{Error, Result};
use crate::execute::Query;
use crate::expression::{AnyExpression, Expression};
use crate::schema::{FieldSet, TableRef};

/// A SELECT statement over one source.
///
/// ```rust
/// use sqlform_core::{ColumnSet, FieldSet, Operand, Query, Table};
///
/// let mut table = Table::new("orders");
/// let customer = table.long("customer");
/// let total = table.double("total");
///
/// let query = table
///     .slice([customer.field(), sqlform_core::sum(&total).into_any()])
///     .select_where(total.greater_than(0.0))
///     .group_by(&customer)
///     .order_by(&customer, true)
///     .limit(10)
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     query.sql(),
///     "SELECT `customer`, SUM(`total`) FROM `orders` WHERE `total` > 0 \
///      GROUP BY `customer` ORDER BY `customer` ASC LIMIT 10"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Select {
    fields: Vec<AnyExpression>,
    source: TableRef,
    where_clause: Option<Expression<bool>>,
    group_by: Vec<AnyExpression>,
    having: Option<Expression<bool>>,
    order_by: Vec<(AnyExpression, bool)>,
    limit: Option<u64>,
    offset: Option<u64>,
    for_update: bool,
}

impl Select {
    /// Creates a SELECT of `set`'s fields from its source.
    #[must_use]
    pub fn new<S: FieldSet + ?Sized>(set: &S, predicate: Option<Expression<bool>>) -> Self {
        Self {
            fields: set.fields(),
            source: set.source(),
            where_clause: predicate,
            group_by: vec![],
            having: None,
            order_by: vec![],
            limit: None,
            offset: None,
            for_update: false,
        }
    }

    /// Adds a GROUP BY expression. Repeated calls accumulate in order.
    #[must_use]
    pub fn group_by(mut self, expr: impl Into<AnyExpression>) -> Self {
        self.group_by.push(expr.into());
        self
    }

    /// Adds several GROUP BY expressions.
    #[must_use]
    pub fn group_by_all<I>(mut self, exprs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AnyExpression>,
    {
        self.group_by.extend(exprs.into_iter().map(Into::into));
        self
    }

    /// Sets the HAVING predicate, replacing any previous one.
    #[must_use]
    pub fn having(mut self, predicate: Expression<bool>) -> Self {
        self.having = Some(predicate);
        self
    }

    /// Adds an ORDER BY expression. Repeated calls accumulate in order.
    #[must_use]
    pub fn order_by(mut self, expr: impl Into<AnyExpression>, ascending: bool) -> Self {
        self.order_by.push((expr.into(), ascending));
        self
    }

    /// Adds an ascending ORDER BY expression.
    #[must_use]
    pub fn order_by_asc(self, expr: impl Into<AnyExpression>) -> Self {
        self.order_by(expr, true)
    }

    /// Adds a descending ORDER BY expression.
    #[must_use]
    pub fn order_by_desc(self, expr: impl Into<AnyExpression>) -> Self {
        self.order_by(expr, false)
    }

    /// Adds several `(expression, ascending)` ORDER BY pairs.
    #[must_use]
    pub fn order_by_all<I, E>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (E, bool)>,
        E: Into<AnyExpression>,
    {
        self.order_by
            .extend(pairs.into_iter().map(|(e, ascending)| (e.into(), ascending)));
        self
    }

    /// Sets the LIMIT, replacing any previous one.
    #[must_use]
    pub const fn limit(mut self, count: u64) -> Self {
        self.limit = Some(count);
        self
    }

    /// Sets the OFFSET, replacing any previous one. Requires a LIMIT.
    #[must_use]
    pub const fn offset(mut self, index: u64) -> Self {
        self.offset = Some(index);
        self
    }

    /// Locks the selected rows (`FOR UPDATE`).
    #[must_use]
    pub const fn for_update(mut self) -> Self {
        self.for_update = true;
        self
    }

    /// Returns the selected expressions.
    #[must_use]
    pub fn fields(&self) -> &[AnyExpression] {
        &self.fields
    }

    /// Returns the source table.
    #[must_use]
    pub const fn source(&self) -> &TableRef {
        &self.source
    }

    /// Returns the WHERE predicate.
    #[must_use]
    pub const fn where_clause(&self) -> Option<&Expression<bool>> {
        self.where_clause.as_ref()
    }

    /// Returns the GROUP BY expressions.
    #[must_use]
    pub fn grouping(&self) -> &[AnyExpression] {
        &self.group_by
    }

    /// Returns the HAVING predicate.
    #[must_use]
    pub const fn having_clause(&self) -> Option<&Expression<bool>> {
        self.having.as_ref()
    }

    /// Returns the ORDER BY pairs.
    #[must_use]
    pub fn ordering(&self) -> &[(AnyExpression, bool)] {
        &self.order_by
    }

    /// Returns the LIMIT.
    #[must_use]
    pub const fn limit_count(&self) -> Option<u64> {
        self.limit
    }

    /// Returns the OFFSET.
    #[must_use]
    pub const fn offset_index(&self) -> Option<u64> {
        self.offset
    }

    /// Returns whether rows are locked for update.
    #[must_use]
    pub const fn is_for_update(&self) -> bool {
        self.for_update
    }

    /// Checks that the statement can be rendered.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyFieldSet`] without fields, [`Error::ZeroLimit`] for
    /// `LIMIT 0`, and [`Error::OffsetWithoutLimit`] for an offset with no
    /// limit.
    pub fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(Error::EmptyFieldSet {
                table: self.source.name().to_string(),
            });
        }
        match (self.limit, self.offset) {
            (Some(0), _) => Err(Error::ZeroLimit),
            (None, Some(_)) => Err(Error::OffsetWithoutLimit),
            _ => Ok(()),
        }
    }
}

impl Query for Select {
    fn format(&self, builder: &mut QueryBuilder) -> Result<()> {
        self.validate()?;

        builder.append("SELECT ");
        builder.append_separated(&self.fields, ", ", |b, field| field.format(b));

        builder.append(" FROM ");
        self.source.format(builder);

        if let Some(ref predicate) = self.where_clause {
            builder.append(" WHERE ");
            predicate.format(builder);
        }

        if !self.group_by.is_empty() {
            builder.append(" GROUP BY ");
            builder.append_separated(&self.group_by, ", ", |b, expr| expr.format(b));
        }

        if let Some(ref predicate) = self.having {
            builder.append(" HAVING ");
            predicate.format(builder);
        }

        if !self.order_by.is_empty() {
            builder.append(" ORDER BY ");
            builder.append_separated(&self.order_by, ", ", |b, (expr, ascending)| {
                expr.format(b);
                b.append(if *ascending { " ASC" } else { " DESC" });
            });
        }

        if let Some(count) = self.limit {
            builder.append(" LIMIT ").append_count(count);
            if let Some(index) = self.offset {
                builder.append(" OFFSET ").append_count(index);
            }
        }

        if self.for_update {
            builder.append(" FOR UPDATE");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::{count_all, Operand};
    use crate::schema::{ColumnSet, Slice, Table};

    fn users() -> (Table, crate::Column<i32>, crate::Column<String>) {
        let mut table = Table::new("users");
        let id = table.integer("id");
        let name = table.text("name");
        (table, id, name)
    }

    #[test]
    fn test_select_all_columns() {
        let (table, _, _) = users();
        let sql = table.select().to_sql().unwrap();
        assert_eq!(sql, "SELECT `id`, `name` FROM `users`");
    }

    #[test]
    fn test_clauses_render_in_fixed_order() {
        let (table, id, name) = users();
        // Mutators applied out of SQL order on purpose.
        let sql = table
            .select_where(id.greater_than(3))
            .for_update()
            .offset(5)
            .limit(10)
            .order_by_desc(&name)
            .having(count_all().greater_than(1_i64))
            .group_by(&name)
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            "SELECT `id`, `name` FROM `users` WHERE `id` > 3 GROUP BY `name` \
             HAVING COUNT(*) > 1 ORDER BY `name` DESC LIMIT 10 OFFSET 5 FOR UPDATE"
        );
    }

    #[test]
    fn test_group_and_order_accumulate() {
        let (table, id, name) = users();
        let sql = table
            .select()
            .group_by(&id)
            .group_by_all([&name])
            .order_by(&id, true)
            .order_by_all([(&name, false)])
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            "SELECT `id`, `name` FROM `users` GROUP BY `id`, `name` ORDER BY `id` ASC, `name` DESC"
        );
    }

    #[test]
    fn test_single_valued_clauses_last_wins() {
        let (table, id, _) = users();
        let select = table
            .select()
            .limit(1)
            .limit(20)
            .having(id.equals(1))
            .having(id.equals(2));
        assert_eq!(select.limit_count(), Some(20));
        assert_eq!(
            select.to_sql().unwrap(),
            "SELECT `id`, `name` FROM `users` HAVING `id` = 2 LIMIT 20"
        );
    }

    #[test]
    fn test_empty_field_set_is_rejected() {
        let (table, _, _) = users();
        let err = table.slice(Vec::<AnyExpression>::new()).select().build().unwrap_err();
        assert_eq!(
            err,
            Error::EmptyFieldSet {
                table: String::from("users")
            }
        );
    }

    #[test]
    fn test_offset_without_limit_is_rejected() {
        let (table, _, _) = users();
        let err = table.select().offset(3).build().unwrap_err();
        assert_eq!(err, Error::OffsetWithoutLimit);
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        let (table, _, _) = users();
        assert_eq!(table.select().limit(0).build().unwrap_err(), Error::ZeroLimit);
    }

    #[test]
    fn test_rejected_select_leaves_builder_untouched() {
        let (table, _, _) = users();
        let mut builder = QueryBuilder::new();
        assert!(table.select().offset(1).format(&mut builder).is_err());
        assert!(builder.is_empty());
    }

    #[test]
    fn test_parameters_follow_clause_order() {
        let (table, id, name) = users();
        let query = Slice::new(table.table_ref(), [&name])
            .select_where(name.equals("a"))
            .having(name.not_equals("b"))
            .group_by(&id)
            .build()
            .unwrap();
        assert_eq!(
            query.sql(),
            "SELECT `name` FROM `users` WHERE `name` = ? GROUP BY `id` HAVING `name` != ?"
        );
        assert_eq!(
            query.params(),
            &[
                crate::SqlValue::Text(String::from("a")),
                crate::SqlValue::Text(String::from("b")),
            ]
        );
    }
}
