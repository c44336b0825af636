pub mod analytics;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod form;
pub mod generator;
pub mod models;
pub mod normalizer;
pub mod runner;
pub mod state;

pub use error::{LottoError, Result};
