//! # ctrl-core
//!
//! Core types and error types for llmctrl.
//!
//! This crate provides the data model shared across all llmctrl crates:
//! - The immutable [`AuditRecord`](entities::AuditRecord) and its trigger details
//! - Classification, severity, impact and language enums
//! - The category lookup table that every record's category must map into
//! - Derivation of cached record views (answer preview, trigger names)
//! - Cross-cutting error types

pub mod category;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod preview;
