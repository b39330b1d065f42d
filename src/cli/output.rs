//! Output formatting for CLI

use cgmodel_core::{CallOutput, Operation};
use clap::ValueEnum;
use ndarray::{Array1, Array2};
use serde_json::{json, Value};

/// Output format for compute commands
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable format: label[shape] = data
    #[default]
    Pretty,
    /// JSON format for scripting
    Json,
}

/// Name printed in front of a result
pub fn label(operation: Operation) -> &'static str {
    match operation {
        Operation::Evaluate => "y",
        Operation::Jacobian => "J",
        Operation::Hessian => "H",
    }
}

/// Format and print a call result
pub fn print_output(label: &str, output: &CallOutput, format: OutputFormat) {
    match format {
        OutputFormat::Pretty => println!("{}", format_pretty(label, output)),
        OutputFormat::Json => println!("{}", to_json(output)),
    }
}

fn format_pretty(label: &str, output: &CallOutput) -> String {
    let shape = format_shape(output.shape());
    match output {
        CallOutput::Vector(v) => format!("{}[{}] = {}", label, shape, v),
        // matrices go on their own lines so rows stay aligned
        CallOutput::Matrix(m) => format!("{}[{}] =\n{}", label, shape, m),
    }
}

/// JSON with `shape` and nested row-major `data`
pub fn to_json(output: &CallOutput) -> Value {
    match output {
        CallOutput::Vector(v) => json!({
            "shape": output.shape(),
            "data": vector_to_json(v),
        }),
        CallOutput::Matrix(m) => json!({
            "shape": output.shape(),
            "data": matrix_to_json(m),
        }),
    }
}

fn vector_to_json(v: &Array1<f64>) -> Value {
    Value::from(v.to_vec())
}

fn matrix_to_json(m: &Array2<f64>) -> Value {
    Value::from(m.rows().into_iter().map(|row| Value::from(row.to_vec())).collect::<Vec<_>>())
}

fn format_shape(shape: &[usize]) -> String {
    shape.iter().map(|d| d.to_string()).collect::<Vec<_>>().join(", ")
}
