pub mod config;
pub mod main_lib;
pub mod metrics;

pub use main_lib::{build_runner, build_sink, init_tracing, run_once};
