pub mod dates;
pub mod unicode;
pub mod virtual_list;
