pub mod resource_dtos;
pub mod timeline_dtos;
// short aliases: `crate::dtos::resource`, `crate::dtos::timeline`
pub use resource_dtos as resource;
pub use timeline_dtos as timeline;
