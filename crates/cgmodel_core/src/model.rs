//! Model handle over one compiled artifact

use crate::artifact::{library_generic_path, ArtifactHandle};
use crate::dims::Dimensions;
use crate::dispatch::{CallOutput, CallRequest, Dispatcher};
use crate::error::ModelResult;
use crate::symbols::{validate_model_name, SymbolTable};
use ndarray::{Array1, Array2};
use std::cell::Cell;
use std::marker::PhantomData;
use std::path::Path;

/// Highest derivative a compiled model provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DerivativeOrder {
    /// Value and Jacobian only (low-order artifact)
    First,
    /// Value, Jacobian and Hessian
    Second,
}

/// A loaded compiled model.
///
/// Construction opens the artifact, binds its entry points and caches its
/// dimensions; a `Model` that exists is always ready to evaluate. Failed calls
/// do not affect later ones.
///
/// `Model` is `Send` but not `Sync`. Compiled routines are not assumed to be
/// reentrant, so an instance may move between threads but must not be called
/// from two threads at once. Wrap it in a `Mutex` to share it.
pub struct Model {
    name: String,
    symbols: SymbolTable,
    dims: Dimensions,
    // Declared last so the library outlives everything bound from it.
    artifact: Option<ArtifactHandle>,
    _not_sync: PhantomData<Cell<()>>,
}

impl Model {
    /// Load model `name` from the library at `base_path` plus the platform
    /// extension (`so`, `dylib` or `dll`).
    pub fn load(name: &str, base_path: impl AsRef<Path>) -> ModelResult<Self> {
        validate_model_name(name)?;

        let artifact = ArtifactHandle::open(base_path)?;
        let symbols = SymbolTable::resolve(&artifact, name)?;
        let dims = Dimensions::query(&symbols)?;

        tracing::debug!(
            model = name,
            path = %artifact.path().display(),
            input_size = dims.input_size,
            param_size = dims.param_size,
            output_size = dims.output_size,
            hessian = symbols.supports_hessian(),
            "loaded compiled model"
        );

        Ok(Self {
            name: name.to_string(),
            symbols,
            dims,
            artifact: Some(artifact),
            _not_sync: PhantomData,
        })
    }

    /// Load model `name` from `<dir>/lib<name>` plus the platform extension.
    pub fn load_from_dir(name: &str, dir: impl AsRef<Path>) -> ModelResult<Self> {
        Self::load(name, library_generic_path(name, dir))
    }

    /// Build a model over entry points already linked into the process.
    ///
    /// # Safety
    ///
    /// Every function in `symbols` must follow the calling convention
    /// documented in [`crate::symbols`]: it must read and write exactly as many
    /// elements as the size accessors report and must stay valid for the
    /// lifetime of the returned model.
    pub unsafe fn from_symbols(name: &str, symbols: SymbolTable) -> ModelResult<Self> {
        validate_model_name(name)?;
        let dims = Dimensions::query(&symbols)?;

        Ok(Self {
            name: name.to_string(),
            symbols,
            dims,
            artifact: None,
            _not_sync: PhantomData,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the loaded library, `None` for in-process models
    pub fn path(&self) -> Option<&Path> {
        self.artifact.as_ref().map(|a| a.path())
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Size of the input vector, excluding parameters
    pub fn input_size(&self) -> usize {
        self.dims.input_size
    }

    pub fn output_size(&self) -> usize {
        self.dims.output_size
    }

    /// Size of the parameter vector; `0` when the model takes none
    pub fn param_size(&self) -> usize {
        self.dims.param_size
    }

    pub fn supports_hessian(&self) -> bool {
        self.symbols.supports_hessian()
    }

    pub fn derivative_order(&self) -> DerivativeOrder {
        if self.supports_hessian() {
            DerivativeOrder::Second
        } else {
            DerivativeOrder::First
        }
    }

    /// Evaluate the function.
    ///
    /// Pass an empty `params` for models without parameters, or to supply the
    /// parameters appended to `input`.
    pub fn evaluate(&self, input: &[f64], params: &[f64]) -> ModelResult<Array1<f64>> {
        self.dispatcher().evaluate(input, params)
    }

    /// Jacobian of the output with respect to the input, `output_size x input_size`.
    /// Parameters are held constant.
    pub fn jacobian(&self, input: &[f64], params: &[f64]) -> ModelResult<Array2<f64>> {
        self.dispatcher().jacobian(input, params)
    }

    /// Hessian of output `output_index` with respect to the input,
    /// `input_size x input_size`. Parameters are held constant.
    pub fn hessian(&self, input: &[f64], params: &[f64], output_index: usize) -> ModelResult<Array2<f64>> {
        let output_index = i64::try_from(output_index).unwrap_or(i64::MAX);
        self.dispatcher().hessian(input, params, output_index)
    }

    /// Evaluate a single request
    pub fn call(&self, request: CallRequest<'_>) -> ModelResult<CallOutput> {
        self.dispatcher().dispatch(request)
    }

    fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher {
            model_name: &self.name,
            symbols: &self.symbols,
            dims: &self.dims,
        }
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("name", &self.name)
            .field("path", &self.artifact.as_ref().map(|a| a.path().to_path_buf()))
            .field("dims", &self.dims)
            .field("derivative_order", &self.derivative_order())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DimensionError, LoadError, ModelError, Operation};
    use std::os::raw::c_int;
    use std::slice;

    unsafe extern "C" fn two() -> usize {
        2
    }

    // y = [x0 * x1], H = [[0, 1], [1, 0]]
    unsafe extern "C" fn product(x: *const f64, _p: *const f64, y: *mut f64) -> c_int {
        let x = slice::from_raw_parts(x, 2);
        *y = x[0] * x[1];
        0
    }

    unsafe extern "C" fn product_jacobian(x: *const f64, _p: *const f64, jac: *mut f64) -> c_int {
        let x = slice::from_raw_parts(x, 2);
        let jac = slice::from_raw_parts_mut(jac, 2);
        jac[0] = x[1];
        jac[1] = x[0];
        0
    }

    unsafe extern "C" fn product_hessian(_x: *const f64, _p: *const f64, w: *const f64, h: *mut f64) -> c_int {
        let h = slice::from_raw_parts_mut(h, 4);
        h[1] = *w;
        h[2] = *w;
        0
    }

    unsafe extern "C" fn one() -> usize {
        1
    }

    fn product_symbols() -> SymbolTable {
        SymbolTable {
            input_size: two,
            output_size: one,
            param_size: None,
            forward: product,
            jacobian: product_jacobian,
            hessian: Some(product_hessian),
        }
    }

    fn product_model() -> Model {
        unsafe { Model::from_symbols("product", product_symbols()) }.unwrap()
    }

    #[test]
    fn test_in_process_model_queries() {
        let model = product_model();
        assert_eq!(model.name(), "product");
        assert!(model.path().is_none());
        assert_eq!(model.input_size(), 2);
        assert_eq!(model.output_size(), 1);
        assert_eq!(model.param_size(), 0);
        assert_eq!(
            model.dimensions(),
            Dimensions {
                input_size: 2,
                param_size: 0,
                output_size: 1
            }
        );
        assert!(model.supports_hessian());
        assert_eq!(model.derivative_order(), DerivativeOrder::Second);
    }

    #[test]
    fn test_in_process_model_calls() {
        let model = product_model();
        let x = [3.0, 4.0];

        assert_eq!(model.evaluate(&x, &[]).unwrap().to_vec(), vec![12.0]);
        assert_eq!(model.jacobian(&x, &[]).unwrap().iter().copied().collect::<Vec<_>>(), vec![4.0, 3.0]);
        assert_eq!(
            model.hessian(&x, &[], 0).unwrap().iter().copied().collect::<Vec<_>>(),
            vec![0.0, 1.0, 1.0, 0.0]
        );
    }

    #[test]
    fn test_low_order_model() {
        let mut symbols = product_symbols();
        symbols.hessian = None;
        let model = unsafe { Model::from_symbols("product", symbols) }.unwrap();

        assert_eq!(model.derivative_order(), DerivativeOrder::First);
        assert!(model.evaluate(&[1.0, 2.0], &[]).is_ok());
        assert_eq!(
            model.hessian(&[1.0, 2.0], &[], 0),
            Err(ModelError::Unsupported {
                model: "product".to_string(),
                operation: Operation::Hessian
            })
        );
    }

    #[test]
    fn test_errors_do_not_poison_model() {
        let model = product_model();

        assert_eq!(
            model.evaluate(&[1.0], &[]),
            Err(ModelError::Dimension(DimensionError::InputSizeMismatch { expected: 2, actual: 1 }))
        );
        assert!(matches!(
            model.hessian(&[1.0, 2.0], &[], 1),
            Err(ModelError::OutputIndexOutOfRange { index: 1, output_size: 1 })
        ));
        assert_eq!(model.evaluate(&[1.0, 2.0], &[]).unwrap().to_vec(), vec![2.0]);
    }

    #[test]
    fn test_call_matches_direct_methods() {
        let model = product_model();
        let x = [3.0, 4.0];

        let via_call = model
            .call(CallRequest::Evaluate { input: &x, params: &[] })
            .unwrap()
            .into_vector()
            .unwrap();
        assert_eq!(via_call, model.evaluate(&x, &[]).unwrap());

        let negative = model.call(CallRequest::Hessian {
            input: &x,
            params: &[],
            output_index: -1,
        });
        assert_eq!(
            negative,
            Err(ModelError::OutputIndexOutOfRange {
                index: -1,
                output_size: 1
            })
        );
    }

    #[test]
    fn test_invalid_name_is_rejected_before_loading() {
        assert!(matches!(
            Model::load("not a name", "/nonexistent/libmodel"),
            Err(ModelError::Load(LoadError::InvalidModelName { .. }))
        ));
    }

    #[test]
    fn test_model_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Model>();
    }
}
