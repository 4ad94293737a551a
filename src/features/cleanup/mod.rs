pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod workers;

pub use services::CleanupService;
pub use workers::RetentionWorker;
