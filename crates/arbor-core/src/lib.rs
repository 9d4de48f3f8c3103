//! Arbor Core Types and Definitions
//!
//! This crate provides the foundational types shared by the arbor parser
//! and renderer:
//!
//! - **Colors**: Hex RGBA colors with luminance and the depth fade law ([`color::Color`])
//! - **Styles**: Node shapes, corner styles, layout direction and resolved node styles ([`style`] module)
//! - **Tree**: The arena-backed mindmap tree and its canonical form ([`tree`] module)

pub mod color;
pub mod style;
pub mod tree;
