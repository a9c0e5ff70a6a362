pub mod commands;
pub mod params;
pub mod run;

pub use commands::{Cli, Commands};
pub use run::run;
