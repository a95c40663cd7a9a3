//! The typed expression AST.
//!
//! [`Expr`] is the untyped tree that the formatter walks. [`Expression`]
//! wraps it with the Rust type of the value it produces, which is what lets
//! the compiler reject e.g. a text expression used as a `WHERE` predicate.
//! [`AnyExpression`] is the type-erased form stored in field sets, grouping
//! and ordering lists.

mod functions;
mod ops;

use std::fmt;
use std::marker::PhantomData;

pub use functions::{avg, count, count_all, count_distinct, lit, max, min, sum};
pub use ops::{BinaryOp, UnaryOp, ATOM_PRECEDENCE, COMPARISON_PRECEDENCE};

use crate::builder::{Format, QueryBuilder};
use crate::types::{Numeric, SqlType, ValueType};
use crate::value::{SqlValue, ToSqlValue};

/// A function call, e.g. an aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// The function name.
    pub name: &'static str,
    /// The arguments.
    pub args: Vec<Expr>,
    /// Whether DISTINCT was specified.
    pub distinct: bool,
}

/// An untyped SQL expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A column reference, rendered as the quoted column name.
    Column(String),

    /// A literal value.
    Literal(SqlValue),

    /// `*`, only meaningful as a `COUNT` argument.
    Wildcard,

    /// A binary expression.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<Expr>,
    },

    /// A unary expression.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<Expr>,
    },

    /// IS NULL expression.
    IsNull {
        /// The expression to check.
        expr: Box<Expr>,
        /// Whether this is IS NOT NULL.
        negated: bool,
    },

    /// IN expression.
    In {
        /// The expression to check.
        expr: Box<Expr>,
        /// The list of values.
        list: Vec<Expr>,
        /// Whether this is NOT IN.
        negated: bool,
    },

    /// BETWEEN expression.
    Between {
        /// The expression to check.
        expr: Box<Expr>,
        /// Lower bound.
        low: Box<Expr>,
        /// Upper bound.
        high: Box<Expr>,
        /// Whether this is NOT BETWEEN.
        negated: bool,
    },

    /// A function call.
    Function(FunctionCall),
}

impl Expr {
    /// Creates a column reference.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(name.into())
    }

    /// Creates a binary expression.
    #[must_use]
    pub fn binary(self, op: BinaryOp, right: Self) -> Self {
        Self::Binary {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }

    /// Returns how tightly this node binds when it appears as an operand.
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Binary { op, .. } => op.precedence(),
            Self::Unary { op, .. } => op.precedence(),
            Self::IsNull { .. } | Self::In { .. } | Self::Between { .. } => {
                COMPARISON_PRECEDENCE
            }
            Self::Column(_) | Self::Literal(_) | Self::Wildcard | Self::Function(_) => {
                ATOM_PRECEDENCE
            }
        }
    }

    fn format_operand(&self, builder: &mut QueryBuilder, wrap: bool) {
        if wrap {
            builder.append("(");
            self.format(builder);
            builder.append(")");
        } else {
            self.format(builder);
        }
    }

    fn is_negative_literal(&self) -> bool {
        match self {
            Self::Literal(SqlValue::Int(n)) => *n < 0,
            Self::Literal(SqlValue::Float(f)) => f.is_sign_negative(),
            _ => false,
        }
    }
}

impl Format for Expr {
    fn format(&self, builder: &mut QueryBuilder) {
        match self {
            Self::Column(name) => {
                builder.append_identifier(name);
            }
            Self::Literal(value) => {
                builder.append_value(value);
            }
            Self::Wildcard => {
                builder.append("*");
            }
            Self::Binary { left, op, right } => {
                let prec = op.precedence();
                left.format_operand(builder, left.precedence() < prec);
                builder.append(" ").append(op.as_str()).append(" ");
                right.format_operand(builder, right.precedence() <= prec);
            }
            Self::Unary { op, operand } => {
                builder.append(op.as_str());
                let wrap = operand.precedence() < op.precedence()
                    || (*op == UnaryOp::Neg && operand.is_negative_literal());
                operand.format_operand(builder, wrap);
            }
            Self::IsNull { expr, negated } => {
                expr.format_operand(builder, expr.precedence() <= COMPARISON_PRECEDENCE);
                builder.append(if *negated { " IS NOT NULL" } else { " IS NULL" });
            }
            Self::In { list, negated, .. } if list.is_empty() => {
                // MySQL has no empty IN list; nothing matches.
                builder.append_value(&SqlValue::Bool(*negated));
            }
            Self::In {
                expr,
                list,
                negated,
            } => {
                expr.format_operand(builder, expr.precedence() <= COMPARISON_PRECEDENCE);
                builder.append(if *negated { " NOT IN (" } else { " IN (" });
                builder.append_separated(list, ", ", |b, item| item.format(b));
                builder.append(")");
            }
            Self::Between {
                expr,
                low,
                high,
                negated,
            } => {
                expr.format_operand(builder, expr.precedence() <= COMPARISON_PRECEDENCE);
                builder.append(if *negated { " NOT BETWEEN " } else { " BETWEEN " });
                low.format_operand(builder, low.precedence() <= COMPARISON_PRECEDENCE);
                builder.append(" AND ");
                high.format_operand(builder, high.precedence() <= COMPARISON_PRECEDENCE);
            }
            Self::Function(call) => {
                builder.append(call.name).append("(");
                if call.distinct {
                    builder.append("DISTINCT ");
                }
                builder.append_separated(&call.args, ", ", |b, arg| arg.format(b));
                builder.append(")");
            }
        }
    }
}

/// A type-erased expression with its value type and nullability.
#[derive(Debug, Clone, PartialEq)]
pub struct AnyExpression {
    expr: Expr,
    value_type: ValueType,
    nullable: bool,
}

impl AnyExpression {
    pub(crate) const fn new(expr: Expr, value_type: ValueType, nullable: bool) -> Self {
        Self {
            expr,
            value_type,
            nullable,
        }
    }

    /// Returns the underlying tree.
    #[must_use]
    pub const fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Returns the value type tag.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Returns whether the expression may evaluate to NULL.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }
}

impl Format for AnyExpression {
    fn format(&self, builder: &mut QueryBuilder) {
        self.expr.format(builder);
    }
}

impl fmt::Display for AnyExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_builder().to_sql_inline())
    }
}

/// An expression producing values of type `T`.
pub struct Expression<T> {
    inner: AnyExpression,
    _type: PhantomData<fn() -> T>,
}

impl<T: SqlType> Expression<T> {
    /// Wraps a raw tree, taking nullability from `T`.
    #[must_use]
    pub fn new(expr: Expr) -> Self {
        Self::with_nullability(expr, T::NULLABLE)
    }

    pub(crate) const fn with_nullability(expr: Expr, nullable: bool) -> Self {
        Self {
            inner: AnyExpression {
                expr,
                value_type: T::VALUE_TYPE,
                nullable,
            },
            _type: PhantomData,
        }
    }

    /// Returns the underlying tree.
    #[must_use]
    pub const fn expr(&self) -> &Expr {
        &self.inner.expr
    }

    /// Returns the value type tag.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.inner.value_type
    }

    /// Returns whether the expression may evaluate to NULL.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.inner.nullable
    }

    /// Erases the value type.
    #[must_use]
    pub fn into_any(self) -> AnyExpression {
        self.inner
    }

    fn into_expr(self) -> Expr {
        self.inner.expr
    }
}

impl<T> Clone for Expression<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _type: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Expression<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expression")
            .field("expr", &self.inner.expr)
            .field("value_type", &self.inner.value_type)
            .field("nullable", &self.inner.nullable)
            .finish()
    }
}

impl<T> Format for Expression<T> {
    fn format(&self, builder: &mut QueryBuilder) {
        self.inner.expr.format(builder);
    }
}

impl<T> fmt::Display for Expression<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl<T> From<Expression<T>> for AnyExpression {
    fn from(expr: Expression<T>) -> Self {
        expr.inner
    }
}

impl<T> From<&Expression<T>> for AnyExpression {
    fn from(expr: &Expression<T>) -> Self {
        expr.inner.clone()
    }
}

/// Conversion into an expression of type `T`.
///
/// Implemented for expressions, columns, plain values of `T`, and plain
/// values of `T` where an `Option<T>` operand is expected.
pub trait IntoExpression<T> {
    /// Performs the conversion.
    fn into_expression(self) -> Expression<T>;
}

impl<T: SqlType> IntoExpression<T> for Expression<T> {
    fn into_expression(self) -> Expression<T> {
        self
    }
}

impl<T: SqlType> IntoExpression<T> for &Expression<T> {
    fn into_expression(self) -> Expression<T> {
        self.clone()
    }
}

impl<T: SqlType + ToSqlValue> IntoExpression<T> for T {
    fn into_expression(self) -> Expression<T> {
        lit(self)
    }
}

impl<T: SqlType + ToSqlValue> IntoExpression<Option<T>> for T {
    fn into_expression(self) -> Expression<Option<T>> {
        Expression::with_nullability(Expr::Literal(self.to_sql_value()), false)
    }
}

impl IntoExpression<String> for &str {
    fn into_expression(self) -> Expression<String> {
        lit(String::from(self))
    }
}

impl IntoExpression<Option<String>> for &str {
    fn into_expression(self) -> Expression<Option<String>> {
        IntoExpression::<Option<String>>::into_expression(String::from(self))
    }
}

/// Marker for types that `LIKE` applies to.
pub trait Textual: SqlType {}

impl Textual for String {}
impl Textual for char {}
impl<T: Textual> Textual for Option<T> {}

fn predicate(expr: Expr, nullable: bool) -> Expression<bool> {
    Expression::with_nullability(expr, nullable)
}

fn compare<T: SqlType>(left: Expression<T>, op: BinaryOp, right: Expression<T>) -> Expression<bool> {
    let nullable = left.is_nullable() || right.is_nullable();
    predicate(left.into_expr().binary(op, right.into_expr()), nullable)
}

fn in_list<T, I>(operand: Expression<T>, values: I, negated: bool) -> Expression<bool>
where
    T: SqlType,
    I: IntoIterator,
    I::Item: IntoExpression<T>,
{
    let mut nullable = operand.is_nullable();
    let list = values
        .into_iter()
        .map(|v| {
            let v = v.into_expression();
            nullable |= v.is_nullable();
            v.into_expr()
        })
        .collect();
    predicate(
        Expr::In {
            expr: Box::new(operand.into_expr()),
            list,
            negated,
        },
        nullable,
    )
}

fn between<T: SqlType>(
    operand: Expression<T>,
    low: Expression<T>,
    high: Expression<T>,
    negated: bool,
) -> Expression<bool> {
    let nullable = operand.is_nullable() || low.is_nullable() || high.is_nullable();
    predicate(
        Expr::Between {
            expr: Box::new(operand.into_expr()),
            low: Box::new(low.into_expr()),
            high: Box::new(high.into_expr()),
            negated,
        },
        nullable,
    )
}

/// Anything usable as the left-hand side of an operator.
///
/// Implemented by [`Column`](crate::Column) and [`Expression`]. Every
/// comparison produces an `Expression<bool>`, the only type accepted as a
/// predicate.
pub trait Operand<T: SqlType> {
    /// Returns this operand as an expression.
    fn expression(&self) -> Expression<T>;

    /// Returns this operand as a selectable field.
    fn field(&self) -> AnyExpression {
        self.expression().into_any()
    }

    /// Creates an `=` comparison.
    fn equals(&self, rhs: impl IntoExpression<T>) -> Expression<bool> {
        compare(self.expression(), BinaryOp::Eq, rhs.into_expression())
    }

    /// Creates a `!=` comparison.
    fn not_equals(&self, rhs: impl IntoExpression<T>) -> Expression<bool> {
        compare(self.expression(), BinaryOp::NotEq, rhs.into_expression())
    }

    /// Creates a `<` comparison.
    fn less_than(&self, rhs: impl IntoExpression<T>) -> Expression<bool> {
        compare(self.expression(), BinaryOp::Lt, rhs.into_expression())
    }

    /// Creates a `<=` comparison.
    fn less_or_equal(&self, rhs: impl IntoExpression<T>) -> Expression<bool> {
        compare(self.expression(), BinaryOp::LtEq, rhs.into_expression())
    }

    /// Creates a `>` comparison.
    fn greater_than(&self, rhs: impl IntoExpression<T>) -> Expression<bool> {
        compare(self.expression(), BinaryOp::Gt, rhs.into_expression())
    }

    /// Creates a `>=` comparison.
    fn greater_or_equal(&self, rhs: impl IntoExpression<T>) -> Expression<bool> {
        compare(self.expression(), BinaryOp::GtEq, rhs.into_expression())
    }

    /// Creates a `LIKE` match.
    fn like(&self, pattern: impl IntoExpression<T>) -> Expression<bool>
    where
        T: Textual,
    {
        compare(self.expression(), BinaryOp::Like, pattern.into_expression())
    }

    /// Creates an `IS NULL` check.
    fn is_null(&self) -> Expression<bool> {
        predicate(
            Expr::IsNull {
                expr: Box::new(self.expression().into_expr()),
                negated: false,
            },
            false,
        )
    }

    /// Creates an `IS NOT NULL` check.
    fn is_not_null(&self) -> Expression<bool> {
        predicate(
            Expr::IsNull {
                expr: Box::new(self.expression().into_expr()),
                negated: true,
            },
            false,
        )
    }

    /// Creates an `IN (...)` check. An empty list renders as `FALSE`.
    fn in_list<I>(&self, values: I) -> Expression<bool>
    where
        I: IntoIterator,
        I::Item: IntoExpression<T>,
    {
        in_list(self.expression(), values, false)
    }

    /// Creates a `NOT IN (...)` check. An empty list renders as `TRUE`.
    fn not_in_list<I>(&self, values: I) -> Expression<bool>
    where
        I: IntoIterator,
        I::Item: IntoExpression<T>,
    {
        in_list(self.expression(), values, true)
    }

    /// Creates a `BETWEEN .. AND ..` check.
    fn between(&self, low: impl IntoExpression<T>, high: impl IntoExpression<T>) -> Expression<bool> {
        between(
            self.expression(),
            low.into_expression(),
            high.into_expression(),
            false,
        )
    }

    /// Creates a `NOT BETWEEN .. AND ..` check.
    fn not_between(
        &self,
        low: impl IntoExpression<T>,
        high: impl IntoExpression<T>,
    ) -> Expression<bool> {
        between(
            self.expression(),
            low.into_expression(),
            high.into_expression(),
            true,
        )
    }
}

impl<T: SqlType> Operand<T> for Expression<T> {
    fn expression(&self) -> Self {
        self.clone()
    }
}

impl Expression<bool> {
    /// Creates an `AND` conjunction.
    #[must_use]
    pub fn and(self, rhs: impl IntoExpression<bool>) -> Self {
        let rhs = rhs.into_expression();
        let nullable = self.is_nullable() || rhs.is_nullable();
        predicate(self.into_expr().binary(BinaryOp::And, rhs.into_expr()), nullable)
    }

    /// Creates an `OR` disjunction.
    #[must_use]
    pub fn or(self, rhs: impl IntoExpression<bool>) -> Self {
        let rhs = rhs.into_expression();
        let nullable = self.is_nullable() || rhs.is_nullable();
        predicate(self.into_expr().binary(BinaryOp::Or, rhs.into_expr()), nullable)
    }
}

impl std::ops::Not for Expression<bool> {
    type Output = Self;

    fn not(self) -> Self {
        let nullable = self.is_nullable();
        predicate(
            Expr::Unary {
                op: UnaryOp::Not,
                operand: Box::new(self.into_expr()),
            },
            nullable,
        )
    }
}

impl<T: Numeric> std::ops::Neg for Expression<T> {
    type Output = Self;

    fn neg(self) -> Self {
        let nullable = self.is_nullable();
        Self::with_nullability(
            Expr::Unary {
                op: UnaryOp::Neg,
                operand: Box::new(self.into_expr()),
            },
            nullable,
        )
    }
}

macro_rules! impl_arithmetic {
    ($($trait:ident :: $method:ident => $op:ident),+ $(,)?) => {
        $(
            impl<T: Numeric, R: IntoExpression<T>> std::ops::$trait<R> for Expression<T> {
                type Output = Self;

                fn $method(self, rhs: R) -> Self {
                    let rhs = rhs.into_expression();
                    let nullable = self.is_nullable() || rhs.is_nullable();
                    Self::with_nullability(
                        self.into_expr().binary(BinaryOp::$op, rhs.into_expr()),
                        nullable,
                    )
                }
            }
        )+
    };
}

impl_arithmetic!(
    Add::add => Add,
    Sub::sub => Sub,
    Mul::mul => Mul,
    Div::div => Div,
    Rem::rem => Mod,
);
