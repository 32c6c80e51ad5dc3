//! Core types and trait definitions for the draftlab study backend.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; the only runtime machinery it carries is
//! the async mutex guarding the in-memory conversation store.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod conversation;
pub mod gateway;
pub mod record;
pub mod store;
