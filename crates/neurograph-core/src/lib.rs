//! Neurograph Core Types and Definitions
//!
//! This crate provides the foundational types shared by the neurograph
//! loader, styler and drawing backend. It includes:
//!
//! - **Colors**: CSS color handling and the fixed node palette ([`color`] module)
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Stroke, node shape and arrow head definitions ([`draw`] module)
//! - **Render**: The render instructions handed to a drawing backend ([`render`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod render;
