//! Derive a 16-color palette from an image and stamp it into text templates.
//!
//! The pipeline lives in [`pipeline`]: [`pipeline::sample`] bounds the pixel
//! set, an [`pipeline::extract::Extractor`] produces candidate colors and
//! [`pipeline::assign::assemble`] orders them into a [`Palette`].

pub mod cache;
pub mod cli;
pub mod color;
pub mod error;
pub mod paths;
pub mod pipeline;
pub mod preview;
pub mod template;
pub mod tui;

pub use color::{Color, Pixel};
pub use error::ExtractError;
pub use pipeline::assign::Palette;
pub use pipeline::{extract_palette, ExtractOptions};
