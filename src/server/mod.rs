pub mod context;
/// CORS Handle
pub mod cors;
/// Media lookup
pub mod media;
/// Predefined includes
pub mod preclude;
pub mod result;
/// Routes
pub mod route;
/// Services
pub mod service;
/// Traits
pub mod traits;
#[cfg(test)]
mod unittest;
/// Version
pub mod version;
