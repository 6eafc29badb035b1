pub mod api_client;
pub mod resource_repository;
pub mod timeline_repository;
