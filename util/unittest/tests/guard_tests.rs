// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Guarded invocation through a private registry.

#![cfg(test)]

use std::{fmt, io, panic};

use unittest::{Recorder, Registry, failure::UNEXPECTED_ERROR, raise};

fn recording() -> (Registry, Recorder) {
    let recorder = Recorder::new();
    (Registry::with_stat_handler(recorder.handler()), recorder)
}

#[derive(Debug)]
struct FixtureError {
    path: &'static str,
}

impl fmt::Display for FixtureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fixture {} is missing", self.path)
    }
}

impl std::error::Error for FixtureError {}

#[test]
fn test_completed_call_emits_nothing() {
    let (mut registry, recorder) = recording();
    let mut ran = false;
    assert!(registry.try_catch(|| ran = true));
    assert!(ran);
    assert!(recorder.is_empty());
}

#[test]
fn test_text_is_forwarded_verbatim() {
    let (mut registry, recorder) = recording();
    registry.try_catch(|| panic!("boom"));
    assert_eq!(recorder.lines(), ["boom"]);

    let code = 3;
    registry.try_catch(|| panic!("exit code {code}"));
    assert_eq!(recorder.lines(), ["boom", "exit code 3"]);
}

#[test]
fn test_error_description_is_forwarded() {
    let (mut registry, recorder) = recording();
    registry.try_catch(|| raise(FixtureError { path: "data.bin" }));
    registry.try_catch(|| raise(io::Error::other("disk gone")));
    assert_eq!(
        recorder.lines(),
        ["fixture data.bin is missing", "disk gone"]
    );
}

#[test]
fn test_unknown_failure_uses_fallback() {
    let (mut registry, recorder) = recording();
    registry.try_catch(|| panic::panic_any(vec![1_u8, 2, 3]));
    assert_eq!(recorder.lines(), [UNEXPECTED_ERROR]);
}

#[test]
fn test_guard_does_not_touch_counters() {
    let (mut registry, _recorder) = recording();
    registry.try_catch(|| panic!("boom"));
    assert_eq!(registry.passed(), 0);
    assert_eq!(registry.failed(), 0);
}

#[test]
fn test_run_guarded_reports_failing_body() {
    let (mut registry, recorder) = recording();
    registry.register_fn("Io", "read", |ctx| {
        ctx.expect("opened", true);
        raise(FixtureError { path: "input.txt" });
    });

    assert!(!registry.run_guarded(|registry| registry.execute_module("Io")));
    assert_eq!(
        recorder.lines(),
        ["[   OK   ] Io::read.opened\n", "fixture input.txt is missing"]
    );
}
