mod extraction;
pub use extraction::*;
