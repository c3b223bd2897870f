pub mod row;
pub mod table;
pub mod work_item;
