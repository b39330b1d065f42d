//! Common CLI utilities

use cgmodel_core::Model;
use clap::Args;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Which model to load
#[derive(Args)]
pub struct ModelArgs {
    /// Model name, as used for the exported symbols
    pub name: String,

    /// Library path without extension
    #[arg(value_name = "LIB")]
    pub lib: PathBuf,
}

impl ModelArgs {
    pub fn load(&self) -> Result<Model, Box<dyn std::error::Error>> {
        Ok(Model::load(&self.name, &self.lib)?)
    }
}

/// Input and parameter vectors for a call
#[derive(Args)]
pub struct VectorArgs {
    /// Input vector, comma separated (may include the parameters appended)
    #[arg(short = 'x', long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    pub input: Vec<f64>,

    /// Parameter vector, comma separated
    #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
    pub params: Vec<f64>,
}

/// Install the stderr log subscriber
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
