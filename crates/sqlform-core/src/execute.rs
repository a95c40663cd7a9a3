//! Query submission.
//!
//! The core never talks to a database itself. A [`Connection`] accepts a
//! finished [`QueryBuilder`] and resolves with its own result type or its
//! own error, which this layer hands back unchanged.

use crate::builder::QueryBuilder;
use crate::error::{Result, RunError};

/// Something that executes finished queries.
#[allow(async_fn_in_trait)]
pub trait Connection {
    /// What a successful submission yields.
    type QueryResult;

    /// What a failed submission yields.
    type Error: std::error::Error + 'static;

    /// Executes the builder's SQL with its bound parameters.
    async fn submit(&self, query: QueryBuilder) -> std::result::Result<Self::QueryResult, Self::Error>;
}

/// A statement that renders into a builder and can be executed.
#[allow(async_fn_in_trait)]
pub trait Query {
    /// Appends the statement to `builder`.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving `builder` untouched, if the statement
    /// cannot be rendered to valid SQL.
    fn format(&self, builder: &mut QueryBuilder) -> Result<()>;

    /// Formats the statement into a fresh builder.
    ///
    /// # Errors
    ///
    /// See [`Query::format`].
    fn build(&self) -> Result<QueryBuilder> {
        let mut builder = QueryBuilder::new();
        self.format(&mut builder)?;
        Ok(builder)
    }

    /// Returns the SQL text, with `?` for bound parameters.
    ///
    /// # Errors
    ///
    /// See [`Query::format`].
    fn to_sql(&self) -> Result<String> {
        self.build().map(|b| b.build().0)
    }

    /// Returns the SQL text with parameters inlined, for display.
    ///
    /// # Errors
    ///
    /// See [`Query::format`].
    fn to_sql_inline(&self) -> Result<String> {
        self.build().map(|b| b.to_sql_inline())
    }

    /// Formats the statement and submits it to `connection`.
    ///
    /// # Errors
    ///
    /// [`RunError::Build`] if the statement is invalid, otherwise
    /// whatever the connection reports, as [`RunError::Connection`].
    async fn run<C: Connection>(
        &self,
        connection: &C,
    ) -> std::result::Result<C::QueryResult, RunError<C::Error>> {
        let builder = self.build()?;
        builder.run(connection).await.map_err(RunError::Connection)
    }
}

impl QueryBuilder {
    /// Submits the finished builder to `connection`.
    ///
    /// # Errors
    ///
    /// Whatever the connection reports.
    pub async fn run<C: Connection>(self, connection: &C) -> std::result::Result<C::QueryResult, C::Error> {
        connection.submit(self).await
    }
}
