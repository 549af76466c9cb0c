//! Compensation Engine for Argentine labor-law claims
//!
//! This crate computes statutory compensation for two scenarios: incapacity
//! benefits under Law 26.773 and severance after dismissal without cause
//! under the LCT. Both calculators are pure functions in [`calculation`];
//! the HTTP API in [`api`] and the JSON-RPC tool server in [`mcp`] reach
//! them through the shared [`dispatch`] layer.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod mcp;
pub mod models;
