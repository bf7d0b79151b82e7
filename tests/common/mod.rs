#![allow(dead_code)]

pub use returnit_test_utils::{gate, init_tracing, with_timeout, Gate, Gated};

/// Heterogeneous success payload, standing in for `[1, "a", true]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Str(&'static str),
    Bool(bool),
}

/// Let the spawned input tasks run.
pub async fn settle_tasks() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
