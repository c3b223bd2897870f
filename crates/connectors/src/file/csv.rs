pub mod filter;
pub mod metadata;
pub mod settings;
pub mod sink;
pub mod source;
