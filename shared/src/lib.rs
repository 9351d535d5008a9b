// Data records and display helpers shared by the engine and its consumers.
pub mod error;
pub mod models;
pub mod utils;

pub use error::ValidationError;
