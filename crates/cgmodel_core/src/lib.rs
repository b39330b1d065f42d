//! cgmodel core
//!
//! Loads models compiled ahead of time by an automatic-differentiation code
//! generator and evaluates them:
//! - `artifact`: locating and opening the shared library
//! - `symbols`: binding the model's entry points
//! - `dims`: the model's declared input, parameter and output sizes
//! - `dispatch`: argument validation and routing to value/Jacobian/Hessian
//! - `Model`: the handle tying these together
//!
//! ```no_run
//! use cgmodel_core::Model;
//!
//! # fn main() -> cgmodel_core::ModelResult<()> {
//! let model = Model::load("ExampleModel", "build/libExampleModel")?;
//!
//! let x = [1.0, 2.0, 3.0];
//! let p = [1.0, 1.0, 1.0];
//! let y = model.evaluate(&x, &p)?;
//! let jac = model.jacobian(&x, &p)?;
//! println!("y = {y}\nJ = {jac}");
//! # Ok(())
//! # }
//! ```

pub mod artifact;
pub mod dims;
pub mod dispatch;
pub mod error;
pub mod model;
pub mod symbols;

pub use artifact::{library_exists, library_generic_path, library_real_path, shared_lib_extension};
pub use dims::Dimensions;
pub use dispatch::{CallOutput, CallRequest};
pub use error::{DimensionError, LoadError, ModelError, ModelResult, Operation};
pub use model::{DerivativeOrder, Model};
pub use symbols::{SymbolNames, SymbolTable};
