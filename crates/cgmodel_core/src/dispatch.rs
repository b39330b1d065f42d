//! Call validation and dispatch
//!
//! Every call goes through the same steps: check the artifact supports the
//! requested derivative, apply the argument overload policy, check the
//! Hessian output index, then hand flat buffers to the compiled routine.
//! No numerical work happens here.

use crate::dims::Dimensions;
use crate::error::{DimensionError, ModelError, ModelResult, Operation};
use crate::symbols::{SymbolNames, SymbolTable};
use ndarray::{Array1, Array2};
use std::os::raw::c_int;

/// A single evaluation request against a model
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CallRequest<'a> {
    Evaluate {
        input: &'a [f64],
        params: &'a [f64],
    },
    Jacobian {
        input: &'a [f64],
        params: &'a [f64],
    },
    /// Hessian of output `output_index` with respect to the input.
    Hessian {
        input: &'a [f64],
        params: &'a [f64],
        output_index: i64,
    },
}

impl CallRequest<'_> {
    pub fn operation(&self) -> Operation {
        match self {
            CallRequest::Evaluate { .. } => Operation::Evaluate,
            CallRequest::Jacobian { .. } => Operation::Jacobian,
            CallRequest::Hessian { .. } => Operation::Hessian,
        }
    }
}

/// Result of a [`CallRequest`]
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutput {
    Vector(Array1<f64>),
    Matrix(Array2<f64>),
}

impl CallOutput {
    pub fn shape(&self) -> &[usize] {
        match self {
            CallOutput::Vector(v) => v.shape(),
            CallOutput::Matrix(m) => m.shape(),
        }
    }

    pub fn into_vector(self) -> Option<Array1<f64>> {
        match self {
            CallOutput::Vector(v) => Some(v),
            CallOutput::Matrix(_) => None,
        }
    }

    pub fn into_matrix(self) -> Option<Array2<f64>> {
        match self {
            CallOutput::Matrix(m) => Some(m),
            CallOutput::Vector(_) => None,
        }
    }
}

/// Input and parameter slices after the overload policy has been applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arguments<'a> {
    pub input: &'a [f64],
    /// Empty when the model has no parameters
    pub params: &'a [f64],
}

/// Match caller-supplied vectors against the model's declared sizes.
///
/// Accepted shapes:
/// - `input` of `input_size` and empty `params`, for models without
///   parameters;
/// - `input` of `input_size` and `params` of `param_size`;
/// - a single `input` of `input_size + param_size` holding the input followed
///   by the parameters, with empty `params`.
///
/// The input length is checked before the parameter length.
pub fn split_arguments<'a>(
    dims: &Dimensions,
    input: &'a [f64],
    params: &'a [f64],
) -> Result<Arguments<'a>, DimensionError> {
    if params.is_empty() {
        if dims.has_params() && input.len() == dims.combined_input_size() {
            let (input, params) = input.split_at(dims.input_size);
            return Ok(Arguments { input, params });
        }

        if input.len() != dims.input_size {
            return Err(DimensionError::InputSizeMismatch {
                expected: dims.input_size,
                actual: input.len(),
            });
        }

        if dims.has_params() {
            return Err(DimensionError::ParamSizeMismatch {
                expected: dims.param_size,
                actual: 0,
            });
        }

        return Ok(Arguments { input, params });
    }

    if input.len() != dims.input_size {
        return Err(DimensionError::InputSizeMismatch {
            expected: dims.input_size,
            actual: input.len(),
        });
    }

    if params.len() != dims.param_size {
        return Err(DimensionError::ParamSizeMismatch {
            expected: dims.param_size,
            actual: params.len(),
        });
    }

    Ok(Arguments { input, params })
}

/// Check a Hessian output index against `[0, output_size)`
pub fn check_output_index(dims: &Dimensions, index: i64) -> ModelResult<usize> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < dims.output_size)
        .ok_or(ModelError::OutputIndexOutOfRange {
            index,
            output_size: dims.output_size,
        })
}

/// Routes validated calls to a model's compiled entry points
#[derive(Clone, Copy)]
pub(crate) struct Dispatcher<'a> {
    pub model_name: &'a str,
    pub symbols: &'a SymbolTable,
    pub dims: &'a Dimensions,
}

impl Dispatcher<'_> {
    pub fn dispatch(&self, request: CallRequest<'_>) -> ModelResult<CallOutput> {
        match request {
            CallRequest::Evaluate { input, params } => self.evaluate(input, params).map(CallOutput::Vector),
            CallRequest::Jacobian { input, params } => self.jacobian(input, params).map(CallOutput::Matrix),
            CallRequest::Hessian {
                input,
                params,
                output_index,
            } => self.hessian(input, params, output_index).map(CallOutput::Matrix),
        }
    }

    pub fn evaluate(&self, input: &[f64], params: &[f64]) -> ModelResult<Array1<f64>> {
        let args = split_arguments(self.dims, input, params)?;

        let mut output = Array1::<f64>::zeros(self.dims.output_size);
        // Safety: buffers are sized from the model's declared dimensions.
        let code = unsafe { (self.symbols.forward)(args.input.as_ptr(), params_ptr(args.params), output.as_mut_ptr()) };
        self.check_status(code, |names| names.forward)?;

        Ok(output)
    }

    pub fn jacobian(&self, input: &[f64], params: &[f64]) -> ModelResult<Array2<f64>> {
        let args = split_arguments(self.dims, input, params)?;

        let mut jac = Array2::<f64>::zeros((self.dims.output_size, self.dims.input_size));
        // Safety: `jac` is a fresh row-major output_size x input_size buffer.
        let code = unsafe { (self.symbols.jacobian)(args.input.as_ptr(), params_ptr(args.params), jac.as_mut_ptr()) };
        self.check_status(code, |names| names.jacobian)?;

        Ok(jac)
    }

    pub fn hessian(&self, input: &[f64], params: &[f64], output_index: i64) -> ModelResult<Array2<f64>> {
        let hessian_fn = self.symbols.hessian.ok_or_else(|| ModelError::Unsupported {
            model: self.model_name.to_string(),
            operation: Operation::Hessian,
        })?;
        let args = split_arguments(self.dims, input, params)?;
        let index = check_output_index(self.dims, output_index)?;

        let mut weights = vec![0.0; self.dims.output_size];
        weights[index] = 1.0;

        let mut hess = Array2::<f64>::zeros((self.dims.input_size, self.dims.input_size));
        // Safety: `hess` is a fresh row-major input_size x input_size buffer
        // and `weights` has output_size entries.
        let code = unsafe {
            hessian_fn(
                args.input.as_ptr(),
                params_ptr(args.params),
                weights.as_ptr(),
                hess.as_mut_ptr(),
            )
        };
        self.check_status(code, |names| names.hessian)?;

        Ok(hess)
    }

    fn check_status(&self, code: c_int, symbol: impl FnOnce(SymbolNames) -> String) -> ModelResult<()> {
        if code == 0 {
            return Ok(());
        }
        Err(ModelError::Evaluation {
            symbol: symbol(SymbolNames::new(self.model_name)),
            code,
        })
    }
}

fn params_ptr(params: &[f64]) -> *const f64 {
    if params.is_empty() {
        std::ptr::null()
    } else {
        params.as_ptr()
    }
}
