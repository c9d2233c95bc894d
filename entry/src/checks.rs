// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Self-checks of the framework, run by the launcher like any other tests.

use unittest::{
    Context, Failure, Null, Recorder, Registry, capture, capture_option, capture_with, def_test,
    ensure, expect, expr, handler::stat_format,
};

#[def_test(module = "Expr")]
fn comparison_text(ctx: &mut Context<'_>) {
    let e = capture(2).lt(capture(3));
    expect!(ctx, "value", *e.value());
    expect!(ctx, "text", e.text() == "2 < 3");
}

#[def_test(module = "Expr")]
fn negation_text(ctx: &mut Context<'_>) {
    let e = !capture_with(true, "x");
    expect!(ctx, "value", !*e.value());
    expect!(ctx, "text", e.text() == "!(x)");
}

#[def_test(module = "Expr")]
fn logical_grouping(ctx: &mut Context<'_>) {
    let e = capture(2).lt(3) & capture(4).gt(5);
    ensure!(ctx, "value", !*e.value());
    expect!(ctx, "text", e.text() == "(2 < 3 && 4 > 5)");
}

#[def_test(module = "Expr")]
fn literal_forms(ctx: &mut Context<'_>) {
    ctx.expect("bool", expr!(capture(false).text()).eq("false"));
    ctx.expect("null", expr!(capture(Null).text()).eq("null"));
    ctx.expect("none", expr!(capture_option(None::<u8>).text()).eq("null"));
}

#[def_test(module = "Registry")]
fn counters_are_cumulative(ctx: &mut Context<'_>) {
    let recorder = Recorder::new();
    let mut inner = Registry::with_stat_handler(recorder.handler());
    inner.register_fn("Inner", "t", |inner_ctx| {
        inner_ctx.expect("ok", true);
        inner_ctx.expect("bad", false);
    });
    inner.execute_all();
    let first = inner.stat();
    let second = inner.stat();

    expect!(ctx, "stable", first == second);
    ctx.expect("passed", expr!(first.passed).eq(1));
    ctx.expect("failed", expr!(first.failed).eq(1));
    expect!(ctx, "summary", recorder.lines().last() == Some(&stat_format(1, 1)));
}

#[def_test(module = "Registry")]
fn unknown_names_are_ignored(ctx: &mut Context<'_>) {
    let recorder = Recorder::new();
    let mut inner = Registry::with_stat_handler(recorder.handler());
    inner.execute_module("NoSuchModule");
    inner.execute_test("NoSuchTest");
    expect!(ctx, "silent", recorder.is_empty());
    ctx.expect("total", expr!(inner.stats().total()).eq(0));
}

#[def_test(module = "Guard")]
fn completed_call_is_silent(ctx: &mut Context<'_>) {
    let recorder = Recorder::new();
    let mut inner = Registry::with_stat_handler(recorder.handler());
    let mut ran = false;
    let completed = inner.try_catch(|| ran = true);
    expect!(ctx, "completed", completed && ran);
    expect!(ctx, "silent", recorder.is_empty());
}

#[def_test(module = "Guard")]
fn failure_text(ctx: &mut Context<'_>) {
    ctx.expect("text", expr!(Failure::Text("boom".into()).to_string()).eq("boom"));
    expect!(
        ctx,
        "fallback",
        Failure::Unknown.to_string() == unittest::failure::UNEXPECTED_ERROR
    );
}
