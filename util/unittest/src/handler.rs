// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Stat handler: the sink for check lines, summaries and caught failures.

use alloc::sync::Arc;

use spin::Mutex;

/// Receives every piece of report text, in emission order.
pub type StatHandler = Box<dyn FnMut(&str) + Send>;

/// Writes `text` verbatim to stdout.
pub fn default_stat_handler(text: &str) {
    if let Err(err) = klogger::kprint!("{text}") {
        warn!("stat handler failed to write to stdout: {err}");
    }
}

/// Formats the line emitted for one check.
pub fn info_format(module: &str, name: &str, msg: &str, text: &str, ok: bool) -> String {
    if ok {
        format!("[   OK   ] {module}::{name}.{msg}\n")
    } else {
        format!("[ FAILED ] {module}::{name}.{msg} [  WITH  ] {text}\n")
    }
}

/// Formats the summary line.
pub fn stat_format(passed: usize, failed: usize) -> String {
    format!(
        "\nOK: {passed} FAILED: {failed} TOTAL: {}\n",
        passed + failed
    )
}

/// A handler that keeps every emission in memory.
///
/// Clones share the same buffer, so one clone can be installed while another
/// inspects what was emitted.
#[derive(Clone, Default)]
pub struct Recorder {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handler appending to this recorder.
    pub fn handler(&self) -> impl FnMut(&str) + Send + 'static {
        let lines = self.lines.clone();
        move |text: &str| lines.lock().push(text.to_owned())
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// Drains and returns everything recorded so far.
    pub fn take(&self) -> Vec<String> {
        core::mem::take(&mut *self.lines.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_line() {
        assert_eq!(
            info_format("Math", "add", "sum", "1 + 1 == 2", true),
            "[   OK   ] Math::add.sum\n"
        );
    }

    #[test]
    fn test_failure_line() {
        assert_eq!(
            info_format("Math", "add", "sum", "1 + 1 == 3", false),
            "[ FAILED ] Math::add.sum [  WITH  ] 1 + 1 == 3\n"
        );
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(stat_format(3, 1), "\nOK: 3 FAILED: 1 TOTAL: 4\n");
        assert_eq!(stat_format(0, 0), "\nOK: 0 FAILED: 0 TOTAL: 0\n");
    }

    #[test]
    fn test_recorder_shares_buffer() {
        let recorder = Recorder::new();
        let mut sink = recorder.handler();
        sink("one");
        sink("two");
        assert_eq!(recorder.lines(), ["one", "two"]);
        assert_eq!(recorder.take().len(), 2);
        assert!(recorder.is_empty());
    }
}
