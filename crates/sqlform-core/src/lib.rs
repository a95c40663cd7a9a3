//! # sqlform-core
//!
//! A typed query-construction layer for MySQL.
//!
//! This crate provides:
//! - A schema model: tables that register typed columns
//! - A typed expression AST whose comparisons only yield boolean predicates
//! - A `SELECT` builder that renders clauses in a fixed order with
//!   backtick-quoted identifiers
//! - A narrow [`Connection`] interface for submitting finished queries
//!
//! ## Declaring a schema
//!
//! ```rust
//! use sqlform_core::{Column, Operand, Query, Schema, Table};
//!
//! struct UserTable {
//!     table: Table,
//!     id: Column<i32>,
//!     email: Column<Option<String>>,
//! }
//!
//! impl UserTable {
//!     fn new() -> Self {
//!         let mut table = Table::for_schema::<Self>();
//!         let id = table.integer("id");
//!         let email = table.text("email");
//!         let email = table.nullable(email);
//!         Self { table, id, email }
//!     }
//! }
//!
//! impl Schema for UserTable {
//!     fn table(&self) -> &Table {
//!         &self.table
//!     }
//! }
//!
//! let users = UserTable::new();
//! let query = users
//!     .select_where(users.id.greater_than(10).and(users.email.is_not_null()))
//!     .order_by_desc(&users.id)
//!     .limit(5)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     query.sql(),
//!     "SELECT `id`, `email` FROM `User` WHERE `id` > 10 AND `email` IS NOT NULL \
//!      ORDER BY `id` DESC LIMIT 5"
//! );
//! ```
//!
//! ## SQL injection prevention
//!
//! Text, binary and timestamp literals are bound as parameters; only numbers
//! and booleans are rendered inline:
//!
//! ```rust
//! use sqlform_core::{FieldSet, Operand, Query, SqlValue, Table};
//!
//! let mut table = Table::new("users");
//! let name = table.text("name");
//!
//! let user_input = "'; DROP TABLE users; --";
//! let query = table.select_where(name.equals(user_input)).build().unwrap();
//!
//! assert_eq!(query.sql(), "SELECT `name` FROM `users` WHERE `name` = ?");
//! assert_eq!(query.params(), &[SqlValue::Text(user_input.to_string())]);
//! ```

mod builder;
pub mod dialect;
mod error;
mod execute;
pub mod expression;
pub mod schema;
mod select;
mod types;
mod value;

pub use builder::{Format, QueryBuilder};
pub use error::{Error, Result, RunError};
pub use execute::{Connection, Query};
pub use expression::{
    avg, count, count_all, count_distinct, lit, max, min, sum, AnyExpression, Expr, Expression,
    IntoExpression, Operand,
};
pub use schema::{Column, ColumnDef, ColumnSet, FieldSet, Schema, Slice, Table, TableRef};
pub use select::Select;
pub use types::{Numeric, SqlEnum, SqlType, ValueType};
pub use value::{SqlValue, ToSqlValue};
