// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Logger backend and verbatim stdout printing.
//!
//! Two independent channels leave the process through this crate:
//! [`kprint!`] writes text exactly as given (used for test reports), and the
//! [`log`] backend installed by [`init_klogger`] writes decorated diagnostic
//! records.

use std::{
    fmt,
    io::{self, Write},
    str::FromStr,
    sync::Mutex,
};

use log::{Level, LevelFilter, Log, Metadata, Record};
pub use log::{debug, error, info, trace, warn};

#[macro_export]
macro_rules! kprint {
    ($($arg:tt)*) => {
        $crate::print_fmt(format_args!($($arg)*))
    }
}

#[macro_export]
macro_rules! kprintln {
    () => { $crate::kprint!("\n") };
    ($($arg:tt)*) => {
        $crate::print_fmt(format_args!("{}\n", format_args!($($arg)*)))
    }
}

#[cfg(feature = "color")]
macro_rules! color_fmt {
    ($color_code:expr, $($arg:tt)*) => {
        format_args!("\u{1B}[{}m{}\u{1B}[m", $color_code as u8, format_args!($($arg)*))
    };
}

#[repr(u8)]
#[allow(dead_code)]
enum AnsiColor {
    Red         = 31,
    Green       = 32,
    Yellow      = 33,
    Cyan        = 36,
    White       = 37,
    BrightBlack = 90,
}

static LOCK: Mutex<()> = Mutex::new(());

struct KernelLogger;

impl Log for KernelLogger {
    #[inline]
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level = record.level();
        let line = record.line().unwrap_or(0);
        let path = record.target();
        let color = match level {
            Level::Error => AnsiColor::Red,
            Level::Warn => AnsiColor::Yellow,
            Level::Info => AnsiColor::Green,
            Level::Debug => AnsiColor::Cyan,
            Level::Trace => AnsiColor::BrightBlack,
        };
        let time = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.6f");

        // Diagnostics go to stderr so they never interleave with report text.
        let _guard = LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut err = io::stderr().lock();
        cfg_if::cfg_if! {
            if #[cfg(feature = "color")] {
                let _ = writeln!(
                    err,
                    "{}",
                    color_fmt!(
                        AnsiColor::White,
                        "[{time} {path}:{line}] {args}",
                        args = color_fmt!(color, "{}", record.args()),
                    )
                );
            } else {
                let _ = color;
                let _ = writeln!(err, "[{time} {path}:{line}] {level:<5} {}", record.args());
            }
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// Writes `args` verbatim to stdout and flushes.
pub fn print_fmt(args: fmt::Arguments) -> io::Result<()> {
    let _guard = LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let mut out = io::stdout().lock();
    out.write_fmt(args)?;
    out.flush()
}

/// Installs the logger with the `Warn` level. A second call is a no-op.
pub fn init_klogger() {
    if log::set_logger(&KernelLogger).is_ok() {
        log::set_max_level(LevelFilter::Warn);
    }
}

/// Sets the maximum level from a name such as `"debug"`; unknown names turn
/// logging off.
pub fn set_log_level(level: &str) {
    log::set_max_level(parse_level(level));
}

fn parse_level(level: &str) -> LevelFilter {
    LevelFilter::from_str(level.trim())
        .ok()
        .unwrap_or(LevelFilter::Off)
}
