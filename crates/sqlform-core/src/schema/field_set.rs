//! Field sets: what a query selects and where from.

use super::column::{ColumnDef, TableRef};
use crate::builder::Format;
use crate::expression::{AnyExpression, Expression};
use crate::select::Select;

/// An ordered list of expressions to select, plus the source they are
/// selected from.
pub trait FieldSet {
    /// Returns the expressions to select, in order.
    fn fields(&self) -> Vec<AnyExpression>;

    /// Returns the table the fields are selected from.
    fn source(&self) -> TableRef;

    /// Starts a `SELECT` of these fields.
    fn select(&self) -> Select {
        Select::new(self, None)
    }

    /// Starts a `SELECT` of these fields filtered by `predicate`.
    fn select_where(&self, predicate: Expression<bool>) -> Select {
        Select::new(self, Some(predicate))
    }
}

/// A field set whose fields are exactly its declared columns and whose
/// source is itself. [`Table`](crate::Table) is the canonical one.
pub trait ColumnSet: FieldSet + Format {
    /// Returns the declared columns.
    fn columns(&self) -> &[ColumnDef];

    /// Projects an explicit list of expressions from this source.
    fn slice<I>(&self, fields: I) -> Slice
    where
        Self: Sized,
        I: IntoIterator,
        I::Item: Into<AnyExpression>,
    {
        Slice::new(self.source(), fields)
    }
}

/// A field set over an explicit subset or reordering of expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    source: TableRef,
    fields: Vec<AnyExpression>,
}

impl Slice {
    /// Creates a slice of `fields` drawn from `source`.
    #[must_use]
    pub fn new<I>(source: TableRef, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AnyExpression>,
    {
        Self {
            source,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Appends one more field.
    #[must_use]
    pub fn field(mut self, field: impl Into<AnyExpression>) -> Self {
        self.fields.push(field.into());
        self
    }
}

impl FieldSet for Slice {
    fn fields(&self) -> Vec<AnyExpression> {
        self.fields.clone()
    }

    fn source(&self) -> TableRef {
        self.source.clone()
    }
}
