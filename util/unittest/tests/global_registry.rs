// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Static declaration, `init` and the global registry.
//!
//! The global registry is shared by the whole test binary, so everything
//! touching it lives in a single `#[test]`.

#![cfg(test)]

use unittest::{Context, Recorder, Selection, TestStats, def_test, ensure, expect, expr, global, init};

#[def_test(module = "Alpha")]
fn shared(ctx: &mut Context<'_>) {
    expect!(ctx, "alpha", 1 + 1 == 2);
}

mod beta {
    use super::*;

    #[def_test]
    fn shared(ctx: &mut Context<'_>) {
        ensure!(ctx, "beta", expr!(3).gt(4));
        expect!(ctx, "unreached", true);
    }

    #[def_test(name = "solo")]
    fn solo_body(ctx: &mut Context<'_>) {
        expect!(ctx, "solo", true);
    }
}

#[test]
fn test_global_registry_lifecycle() {
    let recorder = Recorder::new();
    global().set_stat_handler(recorder.handler());

    // ========== Collection ==========
    assert_eq!(init(), 3);
    assert_eq!(init(), 3, "init is repeatable");
    {
        let registry = global();
        assert_eq!(registry.len(), 3);
        assert!(registry.contains("Alpha", "shared"));
        assert!(registry.contains("beta", "shared"));
        assert!(registry.contains("beta", "solo"));
        assert!(!registry.contains("beta", "solo_body"));
    }

    // ========== Selection ==========
    global().execute_test("shared");
    assert_eq!(
        recorder.take(),
        [
            "[   OK   ] Alpha::shared.alpha\n",
            "[ FAILED ] beta::shared.beta [  WITH  ] 3 > 4\n",
        ]
    );

    global().execute_module("NoSuchModule");
    global().execute_test("no_such_test");
    assert!(recorder.is_empty());
    assert_eq!(global().stats(), TestStats { passed: 1, failed: 1 });

    // ========== Full run ==========
    let stats = unittest::test_run(&Selection::Module("beta".into()));
    assert_eq!(stats, TestStats { passed: 2, failed: 2 });
    assert_eq!(
        recorder.take(),
        [
            "[ FAILED ] beta::shared.beta [  WITH  ] 3 > 4\n",
            "[   OK   ] beta::solo.solo\n",
            "\nOK: 2 FAILED: 2 TOTAL: 4\n",
        ]
    );

    assert!(!unittest::test_run_ok(&Selection::Test("missing".into())));
    assert_eq!(recorder.take(), ["\nOK: 2 FAILED: 2 TOTAL: 4\n"]);
}
