// Engine library root: the goal calculator, the screener normalizer and the
// plumbing (config, input decoding, errors) the CLI builds on.

pub mod config;
pub mod data;
pub mod error;
pub mod goals;
pub mod screener;
pub mod services;

pub use error::EngineError;
