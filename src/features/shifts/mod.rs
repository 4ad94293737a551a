pub mod handler;
pub mod model;
pub mod routes;

pub use model::{catalog, shift_name, Shift};
