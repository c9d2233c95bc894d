// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Test launcher.
//!
//! Every test linked into this binary is collected, the selected ones run
//! under a guard, and the summary decides the exit status.

mod checks;

use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use unittest::Selection;

#[derive(Parser, Debug)]
#[command(name = "unittest-runner", version, about = "Run the linked unit tests")]
struct Args {
    /// Run only the tests of this module
    #[arg(long, value_name = "NAME", conflicts_with = "test")]
    module: Option<String>,

    /// Run every test with this name, in any module
    #[arg(long, value_name = "NAME")]
    test: Option<String>,

    /// Log level for diagnostics on stderr
    #[arg(long, env = "UNITTEST_LOG", default_value = "warn")]
    log_level: String,

    /// List the collected tests instead of running them
    #[arg(long)]
    list: bool,
}

impl Args {
    fn selection(&self) -> Selection {
        match (&self.module, &self.test) {
            (Some(module), _) => Selection::Module(module.clone()),
            (None, Some(test)) => Selection::Test(test.clone()),
            (None, None) => Selection::All,
        }
    }
}

fn list() -> std::io::Result<()> {
    unittest::init();
    let registry = unittest::global();
    for test in registry.iter() {
        klogger::kprintln!("{}::{}", test.module(), test.name())?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    klogger::init_klogger();
    klogger::set_log_level(&args.log_level);

    if args.list {
        return match list() {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                error!("failed to list tests: {err}");
                ExitCode::FAILURE
            }
        };
    }

    let selection = args.selection();
    info!("running {selection:?}");
    if unittest::test_run_ok(&selection) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
