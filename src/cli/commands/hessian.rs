//! Hessian command

use crate::cli::common::{ModelArgs, VectorArgs};
use crate::cli::output::{label, print_output, OutputFormat};
use cgmodel_core::CallRequest;
use clap::Args;

#[derive(Args)]
pub struct HessianArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    #[command(flatten)]
    pub vectors: VectorArgs,

    /// Output component to differentiate
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub index: i64,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: OutputFormat,
}

pub fn execute(args: HessianArgs) -> Result<(), Box<dyn std::error::Error>> {
    let model = args.model.load()?;

    let request = CallRequest::Hessian {
        input: &args.vectors.input,
        params: &args.vectors.params,
        output_index: args.index,
    };
    let output = model.call(request)?;

    print_output(&format!("{}{}", label(request.operation()), args.index), &output, args.format);
    Ok(())
}
