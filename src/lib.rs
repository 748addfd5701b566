//! Pressroom: storefront content core for a print shop.
//!
//! The crate is layered the same way top to bottom: `domain` holds the
//! navigation tree, block, schema, and page models; `application` holds
//! the editor state machines and gateway traits; `infra` holds the HTTP
//! client and telemetry; `presentation` renders the storefront HTML.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
