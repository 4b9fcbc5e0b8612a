// * Operations: logging setup for the binary and embedding hosts

pub mod telemetry;

pub use telemetry::{init_tracing, init_tracing_pretty, init_tracing_with_level};
