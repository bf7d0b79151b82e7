// src/outcome/mod.rs

//! Outcomes of fallible operations, as values.
//!
//! An [`Outcome`] is a plain `std::result::Result` whose error side is a
//! [`Failure`]: a caller-chosen code, optional details, and the call-site
//! stack captured when the failure was built. Everything in `Result`'s API
//! (`?`, `map`, `and_then`, pattern matching) applies.
//!
//! Build outcomes through the factories:
//! - [`ok`] / [`done`] for success,
//! - [`err`] / [`err_with`] for a new failure (captures the stack),
//! - [`pass_err`] to forward an existing failure from a lower layer unchanged.
//!
//! ```
//! use returnit::{err_with, ok, pass_err, Outcome};
//!
//! fn parse_port(s: &str) -> Outcome<u16, &'static str, String> {
//!     match s.parse() {
//!         Ok(port) => ok(port),
//!         Err(_) => err_with("BAD_PORT", s.to_string()),
//!     }
//! }
//!
//! fn connect(s: &str) -> Outcome<(), &'static str, String> {
//!     let port = match parse_port(s) {
//!         Ok(port) => port,
//!         Err(failure) => return pass_err(failure),
//!     };
//!     assert!(port > 0);
//!     ok(())
//! }
//!
//! let failure = connect("http").unwrap_err();
//! assert_eq!(*failure.code(), "BAD_PORT");
//! assert_eq!(failure.details().map(String::as_str), Some("http"));
//! ```

pub mod failure;

use std::future::Future;
use std::pin::Pin;

pub use failure::Failure;

/// Result of a fallible operation.
pub type Outcome<T, C = String, D = ()> = std::result::Result<T, Failure<C, D>>;

/// A pending outcome: an owned, type-erased future that will resolve to one.
pub type Pending<T, C = String, D = ()> =
    Pin<Box<dyn Future<Output = Outcome<T, C, D>> + Send + 'static>>;

/// Success holding `value`.
pub fn ok<T, C, D>(value: T) -> Outcome<T, C, D> {
    Ok(value)
}

/// Success with no value.
pub fn done<C, D>() -> Outcome<(), C, D> {
    Ok(())
}

/// A new failure with `code` and no details.
#[track_caller]
pub fn err<T, C, D>(code: C) -> Outcome<T, C, D> {
    Err(Failure::new(code, None))
}

/// A new failure with `code` and `details`.
#[track_caller]
pub fn err_with<T, C, D>(code: C, details: D) -> Outcome<T, C, D> {
    Err(Failure::new(code, Some(details)))
}

/// Forward an existing failure as-is: same payload, same stack.
pub fn pass_err<T, C, D>(failure: Failure<C, D>) -> Outcome<T, C, D> {
    Err(failure)
}

/// Positional two-slot view of an outcome: `(value, failure)`, exactly one
/// of which is `Some`. The failure slot being `Some` is the only failure
/// signal.
pub trait Slots<T, C, D> {
    fn into_slots(self) -> (Option<T>, Option<Failure<C, D>>);
}

impl<T, C, D> Slots<T, C, D> for Outcome<T, C, D> {
    fn into_slots(self) -> (Option<T>, Option<Failure<C, D>>) {
        match self {
            Ok(value) => (Some(value), None),
            Err(failure) => (None, Some(failure)),
        }
    }
}
