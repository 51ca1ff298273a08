//! Shared types and configuration for Rxledger.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Decimal helpers for display rounding and clamping
//! - Configuration management

pub mod config;
pub mod types;

pub use config::EngineConfig;
