//! Eval command - evaluate the model's function

use crate::cli::common::{ModelArgs, VectorArgs};
use crate::cli::output::{label, print_output, OutputFormat};
use cgmodel_core::CallRequest;
use clap::Args;

#[derive(Args)]
pub struct EvalArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    #[command(flatten)]
    pub vectors: VectorArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: OutputFormat,
}

pub fn execute(args: EvalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let model = args.model.load()?;

    let request = CallRequest::Evaluate {
        input: &args.vectors.input,
        params: &args.vectors.params,
    };
    let output = model.call(request)?;

    print_output(label(request.operation()), &output, args.format);
    Ok(())
}
