// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Test entities and the context a running test checks through.

use core::fmt;

use crate::{expr::IntoExpr, registry::Registry};

/// A named, runnable test.
///
/// Tests live for the whole process; the registry only keeps `&'static`
/// references to them. `run` reports outcomes through [`Context::expect`]
/// and may return early at any point.
pub trait Test: Sync {
    fn module(&self) -> &str;
    fn name(&self) -> &str;
    fn run(&self, ctx: &mut Context<'_>);
}

/// Body of a statically declared test.
pub type TestFn = fn(&mut Context<'_>);

/// Static test descriptor, as emitted by `#[def_test]`.
#[derive(Clone, Copy)]
pub struct TestDescriptor {
    pub module: &'static str,
    pub name: &'static str,
    pub body: TestFn,
}

impl TestDescriptor {
    pub const fn new(module: &'static str, name: &'static str, body: TestFn) -> Self {
        Self { module, name, body }
    }
}

impl Test for TestDescriptor {
    fn module(&self) -> &str {
        self.module
    }

    fn name(&self) -> &str {
        self.name
    }

    fn run(&self, ctx: &mut Context<'_>) {
        (self.body)(ctx)
    }
}

impl fmt::Debug for TestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestDescriptor")
            .field("module", &self.module)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

type BoxedBody = Box<dyn Fn(&mut Context<'_>) + Send + Sync>;

/// A test assembled at run time from owned names and a closure.
pub struct FnTest {
    module: String,
    name: String,
    body: BoxedBody,
}

impl FnTest {
    pub fn new<F>(module: impl Into<String>, name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut Context<'_>) + Send + Sync + 'static,
    {
        Self {
            module: module.into(),
            name: name.into(),
            body: Box::new(body),
        }
    }
}

impl Test for FnTest {
    fn module(&self) -> &str {
        &self.module
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, ctx: &mut Context<'_>) {
        (self.body)(ctx)
    }
}

impl fmt::Debug for FnTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTest")
            .field("module", &self.module)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// The running test bound to the registry that executes it.
pub struct Context<'a> {
    registry: &'a mut Registry,
    test: &'a dyn Test,
}

impl<'a> Context<'a> {
    pub fn new(registry: &'a mut Registry, test: &'a dyn Test) -> Self {
        Self { registry, test }
    }

    pub fn test(&self) -> &dyn Test {
        self.test
    }

    pub fn registry(&mut self) -> &mut Registry {
        self.registry
    }

    /// Records one check for the running test and returns its outcome.
    pub fn expect<E: IntoExpr<Value = bool>>(&mut self, msg: &str, condition: E) -> bool {
        self.registry.check(condition, self.test, msg)
    }
}

/// Cumulative check counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TestStats {
    pub passed: usize,
    pub failed: usize,
}

impl TestStats {
    pub const fn new() -> Self {
        Self {
            passed: 0,
            failed: 0,
        }
    }

    pub const fn total(&self) -> usize {
        self.passed + self.failed
    }

    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{expr::capture, handler::Recorder};

    fn noop(_: &mut Context<'_>) {}

    #[test]
    fn test_descriptor_identity() {
        let desc = TestDescriptor::new("Math", "add", noop);
        assert_eq!(desc.module(), "Math");
        assert_eq!(desc.name(), "add");
        assert!(format!("{desc:?}").contains("add"));
    }

    #[test]
    fn test_context_expect_reports_running_test() {
        let recorder = Recorder::new();
        let mut registry = Registry::with_stat_handler(recorder.handler());
        let test = FnTest::new("Math", "cmp", |_| {});

        let mut ctx = Context::new(&mut registry, &test);
        assert_eq!(ctx.test().name(), "cmp");
        assert!(ctx.expect("lt", capture(1).lt(2)));
        assert!(!ctx.expect("gt", capture(1).gt(2)));

        assert_eq!(
            recorder.lines(),
            [
                "[   OK   ] Math::cmp.lt\n",
                "[ FAILED ] Math::cmp.gt [  WITH  ] 1 > 2\n",
            ]
        );
        assert_eq!(registry.stats(), TestStats { passed: 1, failed: 1 });
    }

    #[test]
    fn test_stats_totals() {
        let stats = TestStats { passed: 2, failed: 0 };
        assert_eq!(stats.total(), 2);
        assert!(stats.all_passed());
        assert!(!TestStats { passed: 0, failed: 1 }.all_passed());
        assert_eq!(TestStats::new(), TestStats::default());
    }
}
