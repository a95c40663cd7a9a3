//! Literals and aggregate functions.

use super::{Expr, Expression, FunctionCall, Operand};
use crate::types::{Numeric, SqlType};
use crate::value::ToSqlValue;

/// Creates a literal expression.
#[must_use]
pub fn lit<T: SqlType + ToSqlValue>(value: T) -> Expression<T> {
    Expression::new(Expr::Literal(value.to_sql_value()))
}

fn aggregate<R: SqlType>(name: &'static str, args: Vec<Expr>, distinct: bool, nullable: bool) -> Expression<R> {
    Expression::with_nullability(
        Expr::Function(FunctionCall {
            name,
            args,
            distinct,
        }),
        nullable,
    )
}

/// `COUNT(*)`.
#[must_use]
pub fn count_all() -> Expression<i64> {
    aggregate("COUNT", vec![Expr::Wildcard], false, false)
}

/// `COUNT(expr)`.
#[must_use]
pub fn count<T: SqlType>(operand: &impl Operand<T>) -> Expression<i64> {
    aggregate("COUNT", vec![operand.expression().into_expr()], false, false)
}

/// `COUNT(DISTINCT expr)`.
#[must_use]
pub fn count_distinct<T: SqlType>(operand: &impl Operand<T>) -> Expression<i64> {
    aggregate("COUNT", vec![operand.expression().into_expr()], true, false)
}

/// `SUM(expr)`. NULL over an empty group.
#[must_use]
pub fn sum<T: Numeric>(operand: &impl Operand<T>) -> Expression<T> {
    aggregate("SUM", vec![operand.expression().into_expr()], false, true)
}

/// `AVG(expr)`. NULL over an empty group.
#[must_use]
pub fn avg<T: Numeric>(operand: &impl Operand<T>) -> Expression<f64> {
    aggregate("AVG", vec![operand.expression().into_expr()], false, true)
}

/// `MIN(expr)`. NULL over an empty group.
#[must_use]
pub fn min<T: SqlType>(operand: &impl Operand<T>) -> Expression<T> {
    aggregate("MIN", vec![operand.expression().into_expr()], false, true)
}

/// `MAX(expr)`. NULL over an empty group.
#[must_use]
pub fn max<T: SqlType>(operand: &impl Operand<T>) -> Expression<T> {
    aggregate("MAX", vec![operand.expression().into_expr()], false, true)
}
