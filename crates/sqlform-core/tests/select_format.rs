//! Rendering of complete SELECT statements.

mod common;

use common::{table_t, Role, UserTable};
use sqlform_core::{
    count_all, max, ColumnSet, FieldSet, Operand, Query, QueryBuilder, Schema, Select, SqlValue,
};

#[test]
fn test_minimal_select_with_predicate() {
    let (table, a, b) = table_t();
    let sql = table
        .slice([a.field(), b.field()])
        .select_where(a.equals(1))
        .to_sql()
        .unwrap();
    assert_eq!(sql, "SELECT `A`, `B` FROM `T` WHERE `A` = 1");
}

#[test]
fn test_clauses_appended_in_fixed_order() {
    let (table, a, b) = table_t();
    let sql = table
        .slice([a.field(), b.field()])
        .select_where(a.equals(1))
        .group_by(&a)
        .order_by(&b, false)
        .limit(10)
        .offset(5)
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT `A`, `B` FROM `T` WHERE `A` = 1 GROUP BY `A` ORDER BY `B` DESC LIMIT 10 OFFSET 5"
    );
}

#[test]
fn test_for_update_is_always_last() {
    let (table, a, _) = table_t();
    let variants: Vec<Select> = vec![
        table.select().for_update(),
        table.select_where(a.equals(1)).for_update(),
        table.select().for_update().group_by(&a),
        table.select().for_update().order_by_asc(&a).limit(3),
        table.select().for_update().limit(3).offset(1),
    ];
    for select in variants {
        let sql = select.to_sql().unwrap();
        assert!(sql.ends_with(" FOR UPDATE"), "{sql}");
        assert_eq!(sql.matches("FOR UPDATE").count(), 1);
    }
}

#[test]
fn test_formatting_is_idempotent() {
    let users = UserTable::new();
    let select = users
        .select_where(users.name.like("a%").or(users.email.is_null()))
        .group_by(&users.role)
        .having(count_all().greater_than(2_i64))
        .order_by_desc(&users.score)
        .limit(50)
        .offset(100)
        .for_update();

    let mut first = QueryBuilder::new();
    let mut second = QueryBuilder::new();
    select.format(&mut first).unwrap();
    select.format(&mut second).unwrap();

    assert_eq!(first.sql(), second.sql());
    assert_eq!(first.params(), second.params());
}

#[test]
fn test_table_name_derived_from_schema_type() {
    let users = UserTable::new();
    assert_eq!(users.table().name(), "User");
    assert_eq!(
        users.select().to_sql().unwrap(),
        "SELECT `id`, `name`, `email`, `role`, `score` FROM `User`"
    );
}

#[test]
fn test_enum_literal_is_bound_as_label() {
    let users = UserTable::new();
    let query = users
        .table()
        .slice([&users.id])
        .select_where(users.role.equals(Role::Admin))
        .build()
        .unwrap();
    assert_eq!(query.sql(), "SELECT `id` FROM `User` WHERE `role` = ?");
    assert_eq!(query.params(), &[SqlValue::Text(String::from("admin"))]);
}

#[test]
fn test_computed_fields_and_aggregates() {
    let users = UserTable::new();
    let sql = users
        .table()
        .slice([users.role.field(), max(&users.score).into_any(), count_all().into_any()])
        .select()
        .group_by(&users.role)
        .having(max(&users.score).greater_or_equal(9.5))
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT `role`, MAX(`score`), COUNT(*) FROM `User` GROUP BY `role` HAVING MAX(`score`) >= 9.5"
    );
}

#[test]
fn test_arithmetic_in_fields_and_predicates() {
    let users = UserTable::new();
    let doubled = users.score.expression() * 2.0;
    let sql = users
        .table()
        .slice([doubled.clone().into_any()])
        .select_where((users.score.expression() + 1.0).greater_than(users.score.expression() * 2.0))
        .order_by_desc(doubled)
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT `score` * 2 FROM `User` WHERE `score` + 1 > `score` * 2 ORDER BY `score` * 2 DESC"
    );
}

#[test]
fn test_inline_rendering_for_display() {
    let users = UserTable::new();
    let sql = users
        .table()
        .slice([&users.id])
        .select_where(users.name.in_list(["ann", "o'neil"]))
        .to_sql_inline()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT `id` FROM `User` WHERE `name` IN ('ann', 'o''neil')"
    );
}

#[test]
fn test_empty_in_list_renders_valid_sql() {
    let (table, a, _) = table_t();
    let sql = table
        .slice([&a])
        .select_where(a.in_list(Vec::<i32>::new()))
        .to_sql()
        .unwrap();
    assert_eq!(sql, "SELECT `A` FROM `T` WHERE FALSE");

    let sql = table
        .slice([&a])
        .select_where(a.not_in_list(Vec::<i32>::new()))
        .to_sql()
        .unwrap();
    assert_eq!(sql, "SELECT `A` FROM `T` WHERE TRUE");
}
