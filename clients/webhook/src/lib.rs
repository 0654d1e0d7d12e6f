pub mod envelope;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod tracers;
