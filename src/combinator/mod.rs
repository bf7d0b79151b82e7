// src/combinator/mod.rs

//! Combinators over many pending outcomes.
//!
//! - [`all`] / [`all_local`] fan a fixed list of outcome-producing futures out
//!   as independent tasks and fan their outcomes back in: every success in
//!   input order, or the first failure observed.
//! - [`fanin`] holds the synchronous bookkeeping shared by those tasks.

pub mod all;
pub(crate) mod fanin;

pub use all::{all, all_local, All};
