pub mod config;
pub mod document;
pub mod error;
pub mod floors;
pub mod geometry;
pub mod loops;
pub mod mass;
pub mod math;
pub mod nodes;
pub mod operations;
pub mod tessellation;
pub mod topology;

pub use error::{Result, StoreysError};
