//! Symbol table for compiled model entry points
//!
//! A compiled model exports its routines under names prefixed by the model
//! name, so several models can share one library:
//!
//! ```text
//! size_t <name>_input_size(void);
//! size_t <name>_output_size(void);
//! size_t <name>_param_size(void);                                  // optional
//! int    <name>_forward(const double* x, const double* p, double* y);
//! int    <name>_jacobian(const double* x, const double* p, double* jac);
//! int    <name>_hessian(const double* x, const double* p,
//!                       const double* w, double* hess);             // optional
//! ```
//!
//! `p` is null when the model has no parameters. Matrices are row-major.
//! The Hessian routine computes the Hessian of `Σ wᵢ yᵢ`. Compute routines
//! return `0` on success.

use crate::artifact::ArtifactHandle;
use crate::error::LoadError;
use libloading::Library;
use std::os::raw::c_int;

/// `size_t f(void)`
pub type SizeFn = unsafe extern "C" fn() -> usize;

/// `int f(const double* x, const double* p, double* y)`
pub type ForwardFn = unsafe extern "C" fn(*const f64, *const f64, *mut f64) -> c_int;

/// `int f(const double* x, const double* p, double* jac)`
pub type JacobianFn = unsafe extern "C" fn(*const f64, *const f64, *mut f64) -> c_int;

/// `int f(const double* x, const double* p, const double* w, double* hess)`
pub type HessianFn = unsafe extern "C" fn(*const f64, *const f64, *const f64, *mut f64) -> c_int;

/// Exported symbol names for one model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolNames {
    pub input_size: String,
    pub output_size: String,
    pub param_size: String,
    pub forward: String,
    pub jacobian: String,
    pub hessian: String,
}

impl SymbolNames {
    pub fn new(model_name: &str) -> Self {
        Self {
            input_size: format!("{}_input_size", model_name),
            output_size: format!("{}_output_size", model_name),
            param_size: format!("{}_param_size", model_name),
            forward: format!("{}_forward", model_name),
            jacobian: format!("{}_jacobian", model_name),
            hessian: format!("{}_hessian", model_name),
        }
    }
}

/// Entry points bound for one model.
///
/// Resolved once at load time and never looked up again. A table resolved
/// from a library is only valid while that library stays loaded; `Model`
/// keeps both together.
///
/// Tables can be built from in-process functions and handed to the unsafe
/// [`Model::from_symbols`](crate::Model::from_symbols). Nothing public
/// resolves a table from a library or calls through one:
///
/// ```compile_fail
/// use cgmodel_core::artifact::ArtifactHandle;
///
/// let handle = ArtifactHandle::open("build/libExampleModel");
/// ```
///
/// ```compile_fail
/// # use cgmodel_core::{Dimensions, SymbolTable};
/// fn sizes(table: &SymbolTable) {
///     let _ = Dimensions::query(table);
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SymbolTable {
    pub input_size: SizeFn,
    pub output_size: SizeFn,
    /// Absent for models built without parameters
    pub param_size: Option<SizeFn>,
    pub forward: ForwardFn,
    pub jacobian: JacobianFn,
    /// Absent for low-order artifacts
    pub hessian: Option<HessianFn>,
}

impl SymbolTable {
    /// Resolve the entry points for `model_name` from an opened artifact.
    ///
    /// The returned pointers are only valid while `handle` stays loaded.
    pub(crate) fn resolve(handle: &ArtifactHandle, model_name: &str) -> Result<Self, LoadError> {
        let names = SymbolNames::new(model_name);
        let library = handle.library();

        // Safety: the signatures are the calling convention every model
        // library exports. The pointers are copied out so the library can be
        // stored next to them.
        let table = unsafe {
            Self {
                input_size: required::<SizeFn>(library, &names.input_size)?,
                output_size: required::<SizeFn>(library, &names.output_size)?,
                param_size: optional::<SizeFn>(library, &names.param_size),
                forward: required::<ForwardFn>(library, &names.forward)?,
                jacobian: required::<JacobianFn>(library, &names.jacobian)?,
                hessian: optional::<HessianFn>(library, &names.hessian),
            }
        };

        tracing::debug!(
            model = model_name,
            has_params = table.param_size.is_some(),
            has_hessian = table.hessian.is_some(),
            "resolved model symbols"
        );

        Ok(table)
    }

    pub fn supports_hessian(&self) -> bool {
        self.hessian.is_some()
    }
}

unsafe fn required<T: Copy>(library: &Library, name: &str) -> Result<T, LoadError> {
    library
        .get::<T>(name.as_bytes())
        .map(|symbol| *symbol)
        .map_err(|_| LoadError::MissingSymbol {
            symbol: name.to_string(),
        })
}

unsafe fn optional<T: Copy>(library: &Library, name: &str) -> Option<T> {
    library.get::<T>(name.as_bytes()).ok().map(|symbol| *symbol)
}

/// Check that a model name is usable as a C symbol prefix
pub(crate) fn validate_model_name(name: &str) -> Result<(), LoadError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_') && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        },
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(LoadError::InvalidModelName { name: name.to_string() })
    }
}
