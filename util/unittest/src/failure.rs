// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Failures caught by a guarded invocation.
//!
//! A test body that unwinds is classified by its panic payload: plain text,
//! a structured error, or something unrecognized. The [`Display`] form of a
//! [`Failure`] is exactly the text forwarded to the stat handler.

use core::fmt;
use std::{any::Any, error::Error, panic};

/// Text forwarded for a payload that is neither text nor an error.
pub const UNEXPECTED_ERROR: &str = "Unexpected error.";

/// A boxed error as carried by [`raise`].
pub type BoxedError = Box<dyn Error + Send + Sync + 'static>;

/// Classified unwind payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// `panic!("...")` or any `&str`/`String` payload
    Text(String),
    /// A structured error raised with [`raise`], carrying its description
    Error(String),
    /// Any other payload
    Unknown,
}

impl Failure {
    /// Classifies a payload returned by `std::panic::catch_unwind`.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        if let Some(text) = payload.downcast_ref::<&'static str>() {
            Failure::Text((*text).to_owned())
        } else if let Some(text) = payload.downcast_ref::<String>() {
            Failure::Text(text.clone())
        } else if let Some(err) = payload.downcast_ref::<BoxedError>() {
            Failure::Error(err.to_string())
        } else if let Some(failure) = payload.downcast_ref::<Failure>() {
            failure.clone()
        } else {
            Failure::Unknown
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Text(text) | Failure::Error(text) => f.write_str(text),
            Failure::Unknown => f.write_str(UNEXPECTED_ERROR),
        }
    }
}

impl Error for Failure {}

/// Unwinds with `err` as a structured payload.
///
/// A guarded invocation reports the error's `Display` text.
pub fn raise<E: Error + Send + Sync + 'static>(err: E) -> ! {
    let boxed: BoxedError = Box::new(err);
    panic::panic_any(boxed)
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    fn payload_of(f: impl FnOnce() + panic::UnwindSafe) -> Box<dyn Any + Send> {
        match panic::catch_unwind(f) {
            Ok(()) => panic!("expected an unwind"),
            Err(payload) => payload,
        }
    }

    #[test]
    fn test_static_text_payload() {
        let failure = Failure::from_panic(payload_of(|| panic!("boom")));
        assert_eq!(failure, Failure::Text("boom".into()));
        assert_eq!(failure.to_string(), "boom");
    }

    #[test]
    fn test_formatted_text_payload() {
        let code = 7;
        let failure = Failure::from_panic(payload_of(move || panic!("code {code}")));
        assert_eq!(failure, Failure::Text("code 7".into()));
    }

    #[test]
    fn test_raised_error_payload() {
        let failure = Failure::from_panic(payload_of(|| {
            raise(io::Error::new(io::ErrorKind::NotFound, "missing fixture"))
        }));
        assert_eq!(failure, Failure::Error("missing fixture".into()));
    }

    #[test]
    fn test_failure_payload_round_trips() {
        let failure = Failure::from_panic(payload_of(|| {
            panic::panic_any(Failure::Error("nested".into()))
        }));
        assert_eq!(failure.to_string(), "nested");
    }

    #[test]
    fn test_unknown_payload() {
        let failure = Failure::from_panic(payload_of(|| panic::panic_any(42_u32)));
        assert_eq!(failure, Failure::Unknown);
        assert_eq!(failure.to_string(), UNEXPECTED_ERROR);
    }
}
