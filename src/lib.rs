// src/lib.rs

//! Errors as values for async Rust.
//!
//! Fallible operations return an [`Outcome`]: either a value or a
//! [`Failure`] carrying a caller-chosen code, optional details and the stack
//! of the place it was built. [`all`] runs many such operations at once and
//! combines them into one outcome: every value in input order, or the first
//! failure observed.
//!
//! ```
//! use returnit::{all, err, ok, Pending};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let lookups: Vec<Pending<u32, &str>> = vec![
//!     Box::pin(async { ok(1) }),
//!     Box::pin(async { ok(2) }),
//! ];
//! assert_eq!(all(lookups).await.unwrap(), vec![1, 2]);
//!
//! let lookups: Vec<Pending<u32, &str>> = vec![
//!     Box::pin(async { ok(1) }),
//!     Box::pin(async { err("NOT_FOUND") }),
//! ];
//! assert_eq!(*all(lookups).await.unwrap_err().code(), "NOT_FOUND");
//! # }
//! ```
//!
//! Ambient pieces:
//! - [`config`] controls how much stack a failure captures.
//! - [`logging`] installs a `tracing` subscriber for applications that have
//!   none.
//! - [`errors`] are the crate's own operational errors (config, logging).

pub mod combinator;
pub mod config;
pub mod errors;
pub mod logging;
pub mod outcome;
pub mod types;

pub use combinator::{all, all_local, All};
pub use outcome::{done, err, err_with, ok, pass_err, Failure, Outcome, Pending, Slots};
