#![deny(clippy::all, clippy::pedantic)]

pub mod navigation;
pub mod pages;
pub mod render;
pub mod search;
pub mod settings;
pub mod uploads;
