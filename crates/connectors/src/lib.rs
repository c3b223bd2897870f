pub mod discovery;
pub mod file;
pub mod sink;
pub mod source;
