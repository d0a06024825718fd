pub mod mime;
pub mod state;
