#![forbid(unsafe_code)]

pub mod catalog;
pub mod import;

pub use catalog::*;
