pub mod admission;
pub mod duplicates;
pub mod error;
