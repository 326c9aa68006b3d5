//! Client domain records.
//!
//! This crate contains the read-only client record as supplied by the external
//! client data store, plus the display-name resolution used on rendered
//! documents. Pure data and deterministic helpers (no IO, no HTTP, no storage).

pub mod client;

pub use client::{Client, ClientId};
