mod common;
pub use common::*;

pub mod s3;
