// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Test collection and the process-wide registry.
//!
//! `#[def_test]` places a [`TestDescriptor`] in [`TESTS`] at link time. No
//! test is visible to the [`global`] registry until [`init`] copies the
//! descriptors into it, so registration never depends on static
//! initialization order.

use lazy_static::lazy_static;
use linkme::distributed_slice;
use spin::{Mutex, MutexGuard};

use crate::{
    registry::{Registry, Selection},
    test_framework::{TestDescriptor, TestStats},
};

/// Every test declared with `#[def_test]` in the linked program.
#[distributed_slice]
pub static TESTS: [TestDescriptor];

lazy_static! {
    static ref GLOBAL: Mutex<Registry> = Mutex::new(Registry::new());
}

/// Panic message of a reentrant [`global`] call.
pub const REGISTRY_BUSY: &str = "global registry is locked by a running test";

/// Locks the process-wide registry.
///
/// # Panics
/// When the registry is already locked, which is the case for the whole of a
/// [`test_run`]. A test body checks through the context it is given; calling
/// `global()` or [`init`] from it unwinds with [`REGISTRY_BUSY`] instead of
/// spinning forever, and the guarded run reports that text.
pub fn global() -> MutexGuard<'static, Registry> {
    match GLOBAL.try_lock() {
        Some(registry) => registry,
        None => panic!("{REGISTRY_BUSY}"),
    }
}

/// Registers every collected descriptor into the global registry and returns
/// how many there were.
///
/// Calling it again re-registers the same keys, which leaves the registry
/// unchanged.
pub fn init() -> usize {
    if TESTS.is_empty() {
        warn!("================================");
        warn!("No tests found!");
        warn!("================================");
        return 0;
    }

    global().register_all(&TESTS);
    debug!("collected {} tests", TESTS.len());
    TESTS.len()
}

/// Runs the selected tests on the global registry and emits the summary.
///
/// Execution is guarded: a failure escaping a test body is reported through
/// the stat handler and ends the run, keeping the counts made so far.
///
/// # Example
/// ```no_run
/// use unittest::Selection;
///
/// fn main() {
///     let stats = unittest::test_run(&Selection::All);
///     std::process::exit(if stats.all_passed() { 0 } else { 1 });
/// }
/// ```
pub fn test_run(selection: &Selection) -> TestStats {
    init();

    let mut registry = global();
    registry.run_guarded(|registry| registry.execute(selection));
    registry.stat()
}

/// Runs the selected tests and returns whether no check failed.
pub fn test_run_ok(selection: &Selection) -> bool {
    test_run(selection).all_passed()
}

/// Last segment of a `module_path!()`, used as the default module name.
pub const fn module_name(path: &'static str) -> &'static str {
    let bytes = path.as_bytes();
    let mut start = bytes.len();
    while start > 0 && bytes[start - 1] != b':' {
        start -= 1;
    }
    let (_, tail) = bytes.split_at(start);
    match core::str::from_utf8(tail) {
        Ok(name) => name,
        Err(_) => path,
    }
}
