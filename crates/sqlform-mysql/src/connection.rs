//! The sqlx-backed [`Connection`].

use std::fmt;

use sqlform_core::{Connection, QueryBuilder, SqlValue};
use sqlx::mysql::{MySql, MySqlArguments, MySqlPool, MySqlRow};
use sqlx::query::Query;
use tracing::{debug, warn};

use crate::error::MySqlError;

/// Rows returned by a submitted query.
#[derive(Default)]
pub struct QueryResult {
    rows: Vec<MySqlRow>,
}

impl fmt::Debug for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryResult")
            .field("rows", &self.rows.len())
            .finish()
    }
}

impl QueryResult {
    /// Returns the rows.
    #[must_use]
    pub fn rows(&self) -> &[MySqlRow] {
        &self.rows
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether no rows came back.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Consumes the result and returns the rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<MySqlRow> {
        self.rows
    }
}

impl IntoIterator for QueryResult {
    type Item = MySqlRow;
    type IntoIter = std::vec::IntoIter<MySqlRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

/// Submits queries to a MySQL pool.
///
/// ```ignore
/// use sqlform_core::{FieldSet, Operand, Query, Table};
/// use sqlform_mysql::MySqlConfig;
///
/// let connection = MySqlConfig::from_env()?.connect().await?;
///
/// let mut users = Table::new("users");
/// let id = users.integer("id");
/// let rows = users.select_where(id.equals(1)).run(&connection).await?;
/// ```
#[derive(Debug, Clone)]
pub struct MySqlConnection {
    pool: MySqlPool,
}

impl MySqlConnection {
    /// Wraps an existing pool.
    #[must_use]
    pub const fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Closes the pool, waiting for checked-out connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl Connection for MySqlConnection {
    type QueryResult = QueryResult;
    type Error = MySqlError;

    async fn submit(&self, query: QueryBuilder) -> Result<QueryResult, MySqlError> {
        let (sql, params) = query.build();
        debug!(sql = %sql, params = params.len(), "Submitting query");

        let mut bound = sqlx::query(&sql);
        for value in params {
            bound = bind_value(bound, value);
        }

        match bound.fetch_all(&self.pool).await {
            Ok(rows) => {
                debug!(rows = rows.len(), "Query completed");
                Ok(QueryResult { rows })
            }
            Err(e) => {
                warn!(error = %e, "Query failed");
                Err(e.into())
            }
        }
    }
}

/// Binds a `SqlValue` parameter to a query.
fn bind_value(
    query: Query<'_, MySql, MySqlArguments>,
    value: SqlValue,
) -> Query<'_, MySql, MySqlArguments> {
    match value {
        SqlValue::Null => query.bind(Option::<i64>::None),
        SqlValue::Bool(b) => query.bind(b),
        SqlValue::Int(i) => query.bind(i),
        SqlValue::Float(f) => query.bind(f),
        SqlValue::Text(s) => query.bind(s),
        SqlValue::Blob(b) => query.bind(b),
        SqlValue::DateTime(t) => query.bind(t),
    }
}
