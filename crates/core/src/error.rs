//! Error types for the core library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Position {position} out of range (collection has {len} tasks)")]
    OutOfRange { position: usize, len: usize },

    #[error("Persistence error: {0}")]
    Persistence(String),
}
