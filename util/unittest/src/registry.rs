// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Test registry.
//!
//! The registry maps module name to test name to test, keeps the cumulative
//! pass/fail counters and owns the active stat handler. Every emission goes
//! through the handler synchronously, in call order.
//!
//! Registration under an existing `(module, name)` key replaces the earlier
//! test. Selecting an unknown module or test name runs nothing. Neither is
//! reported as an error.

use alloc::collections::BTreeMap;
use core::{fmt, panic::AssertUnwindSafe};
use std::panic;

use crate::{
    expr::IntoExpr,
    failure::Failure,
    handler::{StatHandler, default_stat_handler, info_format, stat_format},
    test_framework::{Context, FnTest, Test, TestDescriptor, TestStats},
};

/// Which tests an execution selects.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Every test, module order then test order
    #[default]
    All,
    /// Every test of exactly this module
    Module(String),
    /// Every test of exactly this name, across all modules
    Test(String),
}

pub struct Registry {
    tests: BTreeMap<String, BTreeMap<String, &'static dyn Test>>,
    passed: usize,
    failed: usize,
    handler: StatHandler,
}

impl Registry {
    /// An empty registry printing to stdout.
    pub fn new() -> Self {
        Self::with_stat_handler(default_stat_handler)
    }

    pub fn with_stat_handler(handler: impl FnMut(&str) + Send + 'static) -> Self {
        Self {
            tests: BTreeMap::new(),
            passed: 0,
            failed: 0,
            handler: Box::new(handler),
        }
    }

    /// Replaces the stat handler. Only later emissions are affected.
    pub fn set_stat_handler(&mut self, handler: impl FnMut(&str) + Send + 'static) {
        self.handler = Box::new(handler);
    }

    /// Restores the stdout handler.
    pub fn reset_stat_handler(&mut self) {
        self.set_stat_handler(default_stat_handler);
    }

    pub fn register(&mut self, test: &'static dyn Test) {
        let module = self.tests.entry(test.module().to_owned()).or_default();
        if module.insert(test.name().to_owned(), test).is_some() {
            debug!("replaced test {}::{}", test.module(), test.name());
        } else {
            debug!("registered test {}::{}", test.module(), test.name());
        }
    }

    /// Registers a closure as a test. The test is leaked to give it the
    /// process lifetime every registered test has.
    pub fn register_fn<F>(
        &mut self,
        module: impl Into<String>,
        name: impl Into<String>,
        body: F,
    ) -> &'static dyn Test
    where
        F: Fn(&mut Context<'_>) + Send + Sync + 'static,
    {
        let test: &'static FnTest = Box::leak(Box::new(FnTest::new(module, name, body)));
        self.register(test);
        test
    }

    pub fn register_all(&mut self, descriptors: &'static [TestDescriptor]) {
        for descriptor in descriptors {
            self.register(descriptor);
        }
    }

    /// Records one check made by `test` and emits its line.
    ///
    /// Returns the outcome so the caller can stop the test early.
    pub fn check<E: IntoExpr<Value = bool>>(
        &mut self,
        condition: E,
        test: &dyn Test,
        msg: &str,
    ) -> bool {
        let expr = condition.into_expr();
        let ok = *expr.value();
        if ok {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        let line = info_format(test.module(), test.name(), msg, expr.text(), ok);
        self.emit(&line);
        ok
    }

    /// Runs every test of module `name` in name order.
    pub fn execute_module(&mut self, name: &str) {
        let Some(module) = self.tests.get(name) else {
            debug!("no module named {name:?}");
            return;
        };
        let selected: Vec<_> = module.values().copied().collect();
        self.run_each(selected);
    }

    /// Runs every test called `name`, whatever its module.
    pub fn execute_test(&mut self, name: &str) {
        let selected: Vec<_> = self
            .tests
            .values()
            .filter_map(|module| module.get(name).copied())
            .collect();
        if selected.is_empty() {
            debug!("no test named {name:?}");
        }
        self.run_each(selected);
    }

    pub fn execute_all(&mut self) {
        let selected: Vec<_> = self.iter().collect();
        self.run_each(selected);
    }

    pub fn execute(&mut self, selection: &Selection) {
        match selection {
            Selection::All => self.execute_all(),
            Selection::Module(name) => self.execute_module(name),
            Selection::Test(name) => self.execute_test(name),
        }
    }

    // The selection is collected first: a body may register further tests.
    fn run_each(&mut self, tests: Vec<&'static dyn Test>) {
        for test in tests {
            trace!("running {}::{}", test.module(), test.name());
            let mut ctx = Context::new(self, test);
            test.run(&mut ctx);
        }
    }

    /// Emits the summary line and returns the counts it shows.
    pub fn stat(&mut self) -> TestStats {
        let stats = self.stats();
        self.emit(&stat_format(stats.passed, stats.failed));
        stats
    }

    /// Emits the summary line and returns whether no check failed.
    pub fn stat_ok(&mut self) -> bool {
        self.stat().all_passed()
    }

    /// Runs `call`, forwarding the text of any failure to the stat handler.
    ///
    /// Returns `true` when `call` completed. Nothing is emitted in that case.
    pub fn try_catch<F: FnOnce()>(&mut self, call: F) -> bool {
        match panic::catch_unwind(AssertUnwindSafe(call)) {
            Ok(()) => true,
            Err(payload) => {
                self.report(Failure::from_panic(payload));
                false
            }
        }
    }

    /// Like [`try_catch`](Self::try_catch), for a call that needs the
    /// registry itself, such as an execution.
    pub fn run_guarded<F: FnOnce(&mut Registry)>(&mut self, call: F) -> bool {
        let result = panic::catch_unwind(AssertUnwindSafe(|| call(self)));
        match result {
            Ok(()) => true,
            Err(payload) => {
                self.report(Failure::from_panic(payload));
                false
            }
        }
    }

    fn report(&mut self, failure: Failure) {
        error!("guarded invocation failed: {failure}");
        self.emit(&failure.to_string());
    }

    fn emit(&mut self, text: &str) {
        (self.handler)(text)
    }

    pub fn stats(&self) -> TestStats {
        TestStats {
            passed: self.passed,
            failed: self.failed,
        }
    }

    pub fn passed(&self) -> usize {
        self.passed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn contains(&self, module: &str, name: &str) -> bool {
        self.get(module, name).is_some()
    }

    pub fn get(&self, module: &str, name: &str) -> Option<&'static dyn Test> {
        self.tests.get(module)?.get(name).copied()
    }

    /// Module names in key order.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.tests.keys().map(String::as_str)
    }

    /// Every registered test, module order then test order.
    pub fn iter(&self) -> impl Iterator<Item = &'static dyn Test> + '_ {
        self.tests
            .values()
            .flat_map(|module| module.values().copied())
    }

    pub fn len(&self) -> usize {
        self.tests.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("modules", &self.tests.keys().collect::<Vec<_>>())
            .field("tests", &self.len())
            .field("passed", &self.passed)
            .field("failed", &self.failed)
            .finish_non_exhaustive()
    }
}
