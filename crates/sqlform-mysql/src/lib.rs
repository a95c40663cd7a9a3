//! # sqlform-mysql
//!
//! Executes [`sqlform_core`] queries against MySQL through an sqlx pool.
//!
//! ```ignore
//! use sqlform_core::{FieldSet, Operand, Query, Table};
//! use sqlform_mysql::MySqlConfig;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let connection = MySqlConfig::from_url("mysql://app@localhost/app")
//!         .max_connections(10)
//!         .connect()
//!         .await?;
//!
//!     let mut users = Table::new("users");
//!     let id = users.integer("id");
//!     let result = users.select_where(id.greater_than(100)).run(&connection).await?;
//!     println!("{} rows", result.len());
//!     Ok(())
//! }
//! ```

mod config;
mod connection;
mod error;

pub use config::{MySqlConfig, DATABASE_URL_ENV};
pub use connection::{MySqlConnection, QueryResult};
pub use error::{MySqlError, Result};
