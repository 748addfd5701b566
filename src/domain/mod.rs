pub mod blocks;
pub mod error;
pub mod navigation;
pub mod pages;
pub mod schema;
pub mod settings;
pub mod slug;

pub use error::DomainError;
