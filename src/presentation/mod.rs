//! Storefront HTML rendering: page blocks plus the header/footer chrome.

pub mod blocks;
pub mod views;

pub use blocks::{PageRenderer, RenderError};
