// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Expression capture.
//!
//! An [`Expr`] pairs a value with the text of the expression that produced
//! it. Comparisons and logical combinations of captured expressions build
//! their text from the operand texts, so a failed check can report what was
//! compared without inspecting the values again.
//!
//! ```
//! use unittest::expr::{capture, capture_with};
//!
//! let e = capture(2).lt(3) & capture_with(4, "four").gt(5);
//! assert!(!e.value());
//! assert_eq!(e.text(), "(2 < 3 && four > 5)");
//! ```

use core::{
    fmt::{self, Display},
    ops::{BitAnd, BitOr, Not},
};

/// A value together with the text of the expression it came from.
///
/// The text is fixed at construction and never re-derived from the value.
#[derive(Clone, Debug)]
pub struct Expr<T> {
    value: T,
    text: String,
}

impl<T> Expr<T> {
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (T, String) {
        (self.value, self.text)
    }

    pub fn eq<R>(self, rhs: R) -> Expr<bool>
    where
        R: IntoExpr,
        T: PartialEq<R::Value>,
    {
        crate::expr::eq(self, rhs)
    }

    pub fn ne<R>(self, rhs: R) -> Expr<bool>
    where
        R: IntoExpr,
        T: PartialEq<R::Value>,
    {
        crate::expr::ne(self, rhs)
    }

    pub fn lt<R>(self, rhs: R) -> Expr<bool>
    where
        R: IntoExpr,
        T: PartialOrd<R::Value>,
    {
        crate::expr::lt(self, rhs)
    }

    pub fn le<R>(self, rhs: R) -> Expr<bool>
    where
        R: IntoExpr,
        T: PartialOrd<R::Value>,
    {
        crate::expr::le(self, rhs)
    }

    pub fn gt<R>(self, rhs: R) -> Expr<bool>
    where
        R: IntoExpr,
        T: PartialOrd<R::Value>,
    {
        crate::expr::gt(self, rhs)
    }

    pub fn ge<R>(self, rhs: R) -> Expr<bool>
    where
        R: IntoExpr,
        T: PartialOrd<R::Value>,
    {
        crate::expr::ge(self, rhs)
    }
}

impl Expr<bool> {
    /// Logical `&&`. Both sides are already evaluated.
    pub fn and<R: IntoExpr<Value = bool>>(self, rhs: R) -> Expr<bool> {
        crate::expr::and(self, rhs)
    }

    /// Logical `||`. Both sides are already evaluated.
    pub fn or<R: IntoExpr<Value = bool>>(self, rhs: R) -> Expr<bool> {
        crate::expr::or(self, rhs)
    }
}

/// Captures `value` with its `Display` rendering as text.
///
/// `bool` renders as `true`/`false`; use [`capture_option`] or [`Null`] for
/// absent values, which render as `null`.
pub fn capture<T: Display>(value: T) -> Expr<T> {
    let text = value.to_string();
    Expr { value, text }
}

/// Captures `value` with caller-supplied text, typically the source text of
/// the expression (see [`expr!`](crate::expr!)).
pub fn capture_with<T>(value: T, text: impl Into<String>) -> Expr<T> {
    Expr {
        value,
        text: text.into(),
    }
}

/// Captures an optional value; `None` renders as `null`.
pub fn capture_option<T: Display>(value: Option<T>) -> Expr<Option<T>> {
    let text = match &value {
        Some(inner) => inner.to_string(),
        None => Null.to_string(),
    };
    Expr { value, text }
}

/// The absent value. Renders as `null`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Null;

impl Display for Null {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null")
    }
}

/// Wraps an operand into an [`Expr`] unless it already is one.
///
/// Every operator below converts each operand through this trait exactly
/// once, so raw and captured operands mix freely without double wrapping.
pub trait IntoExpr {
    type Value;

    fn into_expr(self) -> Expr<Self::Value>;
}

impl<T> IntoExpr for Expr<T> {
    type Value = T;

    #[inline]
    fn into_expr(self) -> Expr<T> {
        self
    }
}

// `Expr` never implements `Display`, so the two impls cannot overlap.
impl<T: Display> IntoExpr for T {
    type Value = T;

    #[inline]
    fn into_expr(self) -> Expr<T> {
        capture(self)
    }
}

/// A checkable condition: a plain `bool` takes the given source text, a
/// captured `Expr<bool>` keeps its own.
pub trait Condition {
    fn into_condition(self, source: &str) -> Expr<bool>;
}

impl Condition for bool {
    fn into_condition(self, source: &str) -> Expr<bool> {
        capture_with(self, source)
    }
}

impl Condition for Expr<bool> {
    fn into_condition(self, _source: &str) -> Expr<bool> {
        self
    }
}

macro_rules! comparison {
    ($(#[$attr:meta])* $name:ident, $op:tt, $bound:ident) => {
        $(#[$attr])*
        pub fn $name<L, R>(lhs: L, rhs: R) -> Expr<bool>
        where
            L: IntoExpr,
            R: IntoExpr,
            L::Value: $bound<R::Value>,
        {
            let (lhs, rhs) = (lhs.into_expr(), rhs.into_expr());
            let value = lhs.value $op rhs.value;
            Expr {
                value,
                text: format!("{} {} {}", lhs.text, stringify!($op), rhs.text),
            }
        }
    };
}

macro_rules! logical {
    ($(#[$attr:meta])* $name:ident, $op:tt) => {
        $(#[$attr])*
        pub fn $name<L, R>(lhs: L, rhs: R) -> Expr<bool>
        where
            L: IntoExpr<Value = bool>,
            R: IntoExpr<Value = bool>,
        {
            let (lhs, rhs) = (lhs.into_expr(), rhs.into_expr());
            Expr {
                value: lhs.value $op rhs.value,
                text: format!("({} {} {})", lhs.text, stringify!($op), rhs.text),
            }
        }
    };
}

comparison!(
    /// `lhs == rhs`
    eq, ==, PartialEq
);
comparison!(
    /// `lhs != rhs`
    ne, !=, PartialEq
);
comparison!(
    /// `lhs < rhs`
    lt, <, PartialOrd
);
comparison!(
    /// `lhs <= rhs`
    le, <=, PartialOrd
);
comparison!(
    /// `lhs > rhs`
    gt, >, PartialOrd
);
comparison!(
    /// `lhs >= rhs`
    ge, >=, PartialOrd
);
logical!(
    /// `(lhs && rhs)`
    and, &&
);
logical!(
    /// `(lhs || rhs)`
    or, ||
);

impl Not for Expr<bool> {
    type Output = Expr<bool>;

    fn not(self) -> Expr<bool> {
        Expr {
            value: !self.value,
            text: format!("!({})", self.text),
        }
    }
}

impl<R: IntoExpr<Value = bool>> BitAnd<R> for Expr<bool> {
    type Output = Expr<bool>;

    fn bitand(self, rhs: R) -> Expr<bool> {
        and(self, rhs)
    }
}

impl<R: IntoExpr<Value = bool>> BitOr<R> for Expr<bool> {
    type Output = Expr<bool>;

    fn bitor(self, rhs: R) -> Expr<bool> {
        or(self, rhs)
    }
}
