pub mod catalog;
pub mod limit;
