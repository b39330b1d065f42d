#![allow(dead_code)]

use approx::assert_abs_diff_eq;
use cgmodel_core::{library_generic_path, Model};
use ndarray::{Array1, Array2};
use std::path::PathBuf;

/// Directory holding the compiled fixture libraries, if the build script
/// found a C compiler. Missing fixtures fail the test when `CI` is set and
/// print a skip notice otherwise.
pub fn fixture_dir() -> Option<PathBuf> {
    let dir = option_env!("CGMODEL_FIXTURE_DIR").map(PathBuf::from);
    if dir.is_none() {
        assert!(
            std::env::var_os("CI").is_none(),
            "compiled model fixtures were not built"
        );
        eprintln!("skipping: compiled model fixtures were not built (no C compiler)");
    }
    dir
}

/// Base path (no extension) of a fixture library
pub fn fixture_base(lib_name: &str) -> Option<PathBuf> {
    fixture_dir().map(|dir| library_generic_path(lib_name, dir))
}

/// Load model `name` from fixture library `lib_name`, or `None` when the
/// fixtures were not built.
pub fn load_fixture(name: &str, lib_name: &str) -> Option<Model> {
    let base = fixture_base(lib_name)?;
    Some(Model::load(name, base).unwrap())
}

pub fn assert_vec_approx_eq(actual: &Array1<f64>, expected: &[f64], eps: f64) {
    assert_eq!(actual.len(), expected.len(), "Length mismatch: {} vs {}", actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert_abs_diff_eq!(*a, *e, epsilon = eps);
    }
}

pub fn assert_matrix_approx_eq(actual: &Array2<f64>, expected: &Array2<f64>, eps: f64) {
    assert_eq!(actual.shape(), expected.shape(), "Shape mismatch");
    for ((idx, a), e) in actual.indexed_iter().zip(expected.iter()) {
        assert!((a - e).abs() <= eps, "Mismatch at {:?}: {} vs {} (eps={})", idx, a, e, eps);
    }
}
