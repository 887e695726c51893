//! Domain types and rules for the directory endpoints

pub mod entities;
pub mod errors;
pub mod resolution;
pub mod state;
