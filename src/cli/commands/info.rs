//! Info command - show a compiled model's dimensions and capabilities

use crate::cli::common::ModelArgs;
use cgmodel_core::{DerivativeOrder, Model};
use clap::Args;
use serde_json::json;

#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: InfoArgs) -> Result<(), Box<dyn std::error::Error>> {
    let model = args.model.load()?;

    if args.json {
        print_json(&model)?;
    } else {
        print_pretty(&model);
    }

    Ok(())
}

fn print_pretty(model: &Model) {
    println!("Model:    {}", model.name());
    if let Some(path) = model.path() {
        println!("Library:  {}", path.display());
    }
    let dims = model.dimensions();
    println!("Inputs:   {}", dims.input_size);
    println!("Params:   {}", dims.param_size);
    println!("Outputs:  {}", dims.output_size);
    println!("Hessian:  {}", if model.supports_hessian() { "yes" } else { "no" });
}

fn print_json(model: &Model) -> Result<(), Box<dyn std::error::Error>> {
    let order = match model.derivative_order() {
        DerivativeOrder::First => 1,
        DerivativeOrder::Second => 2,
    };
    let dims = model.dimensions();
    let info = json!({
        "name": model.name(),
        "path": model.path().map(|p| p.display().to_string()),
        "input_size": dims.input_size,
        "param_size": dims.param_size,
        "output_size": dims.output_size,
        "derivative_order": order,
    });
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}
