// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! A small unit-testing core.
//!
//! Tests are declared with [`def_test`], collected at link time and copied
//! into the process-wide [`Registry`] by [`init`]. A test body checks
//! conditions through its [`Context`]; each check is counted and reported as
//! one line through the registry's stat handler. Captured expressions
//! ([`expr`]) keep the text of what was compared so a failure line shows it.
//!
//! ```ignore
//! use unittest::{Context, def_test, ensure, expr};
//!
//! #[def_test(module = "Math")]
//! fn addition(ctx: &mut Context<'_>) {
//!     ensure!(ctx, "small", expr!(2 + 2).lt(5));
//!     unittest::expect!(ctx, "exact", 2 + 2 == 4);
//! }
//!
//! fn main() {
//!     let ok = unittest::test_run_ok(&unittest::Selection::All);
//!     std::process::exit(if ok { 0 } else { 1 });
//! }
//! ```

#[macro_use]
extern crate log;
extern crate alloc;

pub mod expr;
pub mod failure;
pub mod handler;
pub mod registry;
pub mod runner;
pub mod test_framework;

pub use expr::{Expr, IntoExpr, Null, capture, capture_option, capture_with};
pub use failure::{Failure, raise};
pub use handler::{Recorder, StatHandler, default_stat_handler};
// Re-export the def_test attribute from the unittest-macros crate
pub use macros::def_test;
pub use registry::{Registry, Selection};
pub use runner::{REGISTRY_BUSY, TESTS, global, init, test_run, test_run_ok};
pub use test_framework::{Context, FnTest, Test, TestDescriptor, TestFn, TestStats};

// Used by the code `def_test` expands to.
#[doc(hidden)]
pub use linkme;
#[doc(hidden)]
pub use runner::module_name as __module_name;

/// Captures an expression together with its source text.
///
/// ```
/// let limit = 3;
/// let e = unittest::expr!(limit).ge(4);
/// assert_eq!(e.text(), "limit >= 4");
/// ```
#[macro_export]
macro_rules! expr {
    ($e:expr) => {
        $crate::expr::capture_with($e, stringify!($e))
    };
}

/// Checks a condition, reporting its source text on failure.
///
/// The condition is a `bool` or an already captured `Expr<bool>`, whose own
/// text is kept. Evaluates to the outcome.
#[macro_export]
macro_rules! expect {
    ($ctx:expr, $msg:expr, $cond:expr $(,)?) => {
        $ctx.expect(
            $msg,
            $crate::expr::Condition::into_condition($cond, stringify!($cond)),
        )
    };
}

/// Like [`expect!`], but returns from the enclosing test body on failure.
#[macro_export]
macro_rules! ensure {
    ($ctx:expr, $msg:expr, $cond:expr $(,)?) => {
        if !$crate::expect!($ctx, $msg, $cond) {
            return;
        }
    };
}
