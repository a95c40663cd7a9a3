//! Schema model: tables, typed columns and field sets.

mod column;
mod field_set;
mod table;

pub use column::{Column, ColumnDef, TableRef};
pub use field_set::{ColumnSet, FieldSet, Slice};
pub use table::{Schema, Table};
