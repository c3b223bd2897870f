pub mod aggregate;
pub mod combine;
pub mod error;
pub mod extract;
pub mod partition;
pub mod pool;
