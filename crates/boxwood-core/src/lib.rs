//! Boxwood Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Boxwood diagram
//! engine. It includes:
//!
//! - **Identifiers**: Interned, opaque element identities ([`identifier::ElementId`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Palette**: Deterministic classifier-to-color assignment ([`palette::Palette`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Drawable primitives, text metrics and render layers ([`draw`] module)
//! - **Semantic**: The node forest and edge model consumed by layout ([`semantic`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
pub mod palette;
pub mod semantic;
