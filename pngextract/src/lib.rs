pub mod error;
pub mod extract;
pub mod handler;
pub mod render;
pub mod state;

#[cfg(test)]
mod testing;
