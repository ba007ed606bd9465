//! # folioguard-contracts
//!
//! Shared types, schemas, and contracts for the FolioGuard guardrail pipeline.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate: only data definitions and error types.

pub mod error;
pub mod filter;
pub mod message;
pub mod tool;
pub mod turn;
pub mod verify;
