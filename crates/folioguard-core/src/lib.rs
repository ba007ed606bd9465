//! # folioguard-core
//!
//! The guardrail-bound turn runtime for FolioGuard.
//!
//! This crate provides:
//! - The trait seams (`InputGuard`, `OutputGuard`, `ResponseVerifier`,
//!   `ToolExecutor`, `ChatModel`)
//! - The `TurnRunner` that wires them together in the correct trust order
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folioguard_core::{TurnRunner, traits::{ChatModel, ToolExecutor}};
//!
//! let response = runner.run_turn(inbound, &model, &tools).await?;
//! ```

pub mod runner;
pub mod traits;

pub use runner::{ToolRecorder, TurnRunner};
