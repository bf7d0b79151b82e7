// src/outcome/failure.rs

//! The error payload carried by the error side of an [`Outcome`](super::Outcome).

use std::backtrace::Backtrace;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::config::{self, Config};
use crate::types::StackCapture;

#[derive(Debug)]
struct Payload<C, D> {
    code: C,
    details: Option<D>,
    stack: String,
}

/// A failed operation: caller-chosen `code`, optional structured `details`,
/// and the call-site `stack` captured when it was built.
///
/// Cloning is cheap and shares the payload, so a forwarded failure stays the
/// same failure ([`Failure::same_as`]) and never gets a second stack.
pub struct Failure<C = String, D = ()> {
    inner: Arc<Payload<C, D>>,
}

impl<C, D> Failure<C, D> {
    /// Build a new payload, capturing the caller's location (and a backtrace
    /// when the active config asks for one).
    #[track_caller]
    pub fn new(code: C, details: Option<D>) -> Self {
        let stack = capture_stack(Location::caller(), config::current());
        Self {
            inner: Arc::new(Payload {
                code,
                details,
                stack,
            }),
        }
    }

    pub fn code(&self) -> &C {
        &self.inner.code
    }

    pub fn details(&self) -> Option<&D> {
        self.inner.details.as_ref()
    }

    /// Diagnostic text only; never empty.
    pub fn stack(&self) -> &str {
        &self.inner.stack
    }

    /// True if both handles refer to the one payload built by a single
    /// `Failure::new`.
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

fn capture_stack(at: &Location<'_>, cfg: &Config) -> String {
    let mut stack = format!("at {at}");
    if cfg.stack_capture == StackCapture::Backtrace {
        let trace = Backtrace::force_capture().to_string();
        for line in trace.lines().take(cfg.max_stack_lines) {
            stack.push('\n');
            stack.push_str(line);
        }
    }
    stack
}

impl<C, D> Clone for Failure<C, D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: fmt::Debug, D: fmt::Debug> fmt::Debug for Failure<C, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Failure")
            .field("code", &self.inner.code)
            .field("details", &self.inner.details)
            .field("stack", &self.inner.stack)
            .finish()
    }
}

/// Renders the code, the way the failure would read as an error message.
impl<C: fmt::Display, D> fmt::Display for Failure<C, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner.code, f)
    }
}

impl<C: fmt::Display + fmt::Debug, D: fmt::Debug> std::error::Error for Failure<C, D> {}

impl<C: Serialize, D: Serialize> Serialize for Failure<C, D> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Failure", 3)?;
        state.serialize_field("code", &self.inner.code)?;
        state.serialize_field("details", &self.inner.details)?;
        state.serialize_field("stack", &self.inner.stack)?;
        state.end()
    }
}
