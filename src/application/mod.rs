pub mod forms;
pub mod gateway;
pub mod navigation;
pub mod page_editor;
pub mod search;
