pub mod countdown;
pub mod table;
