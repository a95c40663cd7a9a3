#![allow(dead_code)]

use std::cell::RefCell;

use sqlform_core::{sql_enum, Column, Connection, QueryBuilder, Schema, SqlValue, Table};

sql_enum! {
    pub enum Role {
        Admin = "admin",
        Member = "member",
    }
}

/// A users schema declared the way applications declare theirs.
pub struct UserTable {
    pub table: Table,
    pub id: Column<i32>,
    pub name: Column<String>,
    pub email: Column<Option<String>>,
    pub role: Column<Role>,
    pub score: Column<f64>,
}

impl UserTable {
    pub fn new() -> Self {
        let mut table = Table::for_schema::<Self>();
        let id = table.integer("id");
        let name = table.text("name");
        let email = table.text("email");
        let email = table.nullable(email);
        let role = table.enumeration::<Role>("role");
        let score = table.double("score");
        Self {
            table,
            id,
            name,
            email,
            role,
            score,
        }
    }
}

impl Schema for UserTable {
    fn table(&self) -> &Table {
        &self.table
    }
}

/// A table named `T` with integer columns `A` and `B`.
pub fn table_t() -> (Table, Column<i32>, Column<i32>) {
    let mut table = Table::new("T");
    let a = table.integer("A");
    let b = table.integer("B");
    (table, a, b)
}

#[derive(Debug, thiserror::Error)]
#[error("connection refused")]
pub struct Refused;

/// Records every submitted query and answers with a canned outcome.
#[derive(Default)]
pub struct RecordingConnection {
    pub submitted: RefCell<Vec<(String, Vec<SqlValue>)>>,
    pub fail: bool,
}

impl RecordingConnection {
    pub fn failing() -> Self {
        Self {
            submitted: RefCell::default(),
            fail: true,
        }
    }
}

impl Connection for RecordingConnection {
    type QueryResult = usize;
    type Error = Refused;

    async fn submit(&self, query: QueryBuilder) -> Result<usize, Refused> {
        self.submitted.borrow_mut().push(query.build());
        if self.fail {
            Err(Refused)
        } else {
            Ok(self.submitted.borrow().len())
        }
    }
}
