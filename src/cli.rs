//! cgmodel CLI - inspect and evaluate compiled models

pub mod commands;
pub mod common;
pub mod output;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cgmodel")]
#[command(version, about = "Evaluate compiled automatic-differentiation models")]
#[command(after_help = "LIB is the library path without its extension, e.g. build/libMyModel")]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a model's dimensions and capabilities
    Info(commands::info::InfoArgs),

    /// Evaluate the model
    Eval(commands::eval::EvalArgs),

    /// Evaluate the Jacobian with respect to the input
    Jacobian(commands::jacobian::JacobianArgs),

    /// Evaluate the Hessian of one output component
    Hessian(commands::hessian::HessianArgs),
}
