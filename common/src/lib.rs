pub mod error;
pub mod models;
pub mod persistence;
pub mod util;
