//! Core trait definitions

mod runner;

pub use runner::CommandRunner;
