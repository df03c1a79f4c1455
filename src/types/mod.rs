pub mod data_kind;
pub mod location;
pub mod payload;
pub mod provider;
pub mod task;
pub mod tier;
