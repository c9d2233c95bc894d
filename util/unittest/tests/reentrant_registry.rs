// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! A test body reaching for the global registry while it runs.

#![cfg(test)]

use unittest::{
    Context, REGISTRY_BUSY, Recorder, Selection, TestStats, def_test, expect, global,
};

#[def_test(module = "Nested")]
fn registers_during_run(ctx: &mut Context<'_>) {
    expect!(ctx, "before", true);
    unittest::init();
    expect!(ctx, "after", true);
}

#[test]
fn test_init_during_run_is_reported_not_hung() {
    let recorder = Recorder::new();
    global().set_stat_handler(recorder.handler());

    let stats = unittest::test_run(&Selection::All);

    assert_eq!(stats, TestStats { passed: 1, failed: 0 });
    assert_eq!(
        recorder.take(),
        [
            "[   OK   ] Nested::registers_during_run.before\n",
            REGISTRY_BUSY,
            "\nOK: 1 FAILED: 0 TOTAL: 1\n",
        ]
    );

    // The lock is released once the run is over.
    assert_eq!(unittest::init(), 1);
    assert!(global().contains("Nested", "registers_during_run"));
}
