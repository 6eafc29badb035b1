pub mod catalog_handlers;
pub mod timeline_handlers;
