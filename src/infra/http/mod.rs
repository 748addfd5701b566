//! HTTP gateway to the storefront backend.

mod client;
mod convert;

pub use client::ApiClient;
