pub mod catalog_view;
pub mod html;
pub mod timeline_view;
pub mod toast;
