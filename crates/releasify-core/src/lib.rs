pub mod action;
pub mod config;
pub mod error;
pub mod executor;
pub mod io;
pub mod operator;
pub mod retry;
pub mod runner;

pub use error::{ReleasifyError, Result};
