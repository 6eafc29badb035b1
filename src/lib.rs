//! Client for the Souline resource catalog and timeline.
//!
//! Repositories talk to the Django backend, services keep the view-models in
//! step with its answers, handlers turn page events into service calls.

pub mod config;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;
pub mod views;

pub use error::ClientError;
