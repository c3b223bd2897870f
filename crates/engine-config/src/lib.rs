pub mod error;
pub mod job;
pub mod loader;
pub mod settings;
