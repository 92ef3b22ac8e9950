//! Netdiagram Core Types and Definitions
//!
//! This crate provides the foundational types shared by the netdiagram
//! crates. It includes:
//!
//! - **Identifiers**: Random lowercase identifiers for unnamed elements ([`identifier`] module)
//! - **Attributes**: Ordered key/value style attributes ([`attributes::Attributes`])
//! - **DOT**: The in-memory graph description and its printer ([`dot::DotGraph`])

pub mod attributes;
pub mod dot;
pub mod identifier;
