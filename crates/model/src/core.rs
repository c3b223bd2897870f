pub mod data_type;
pub mod key;
pub mod value;
