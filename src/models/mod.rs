pub mod post;
pub mod resource;
