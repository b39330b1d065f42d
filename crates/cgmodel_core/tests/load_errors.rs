mod common;

use cgmodel_core::{library_exists, library_real_path, LoadError, Model, ModelError};
use common::{fixture_base, fixture_dir, load_fixture};

#[test]
fn test_nonexistent_library() {
    let result = Model::load("FakeModel", "nonexistent_path");
    assert!(matches!(result, Err(ModelError::Load(LoadError::NotFound { .. }))));
}

#[test]
fn test_nonexistent_library_in_dir() {
    let dir = tempfile::tempdir().unwrap();
    let result = Model::load_from_dir("FakeModel", dir.path());

    match result {
        Err(ModelError::Load(LoadError::NotFound { path })) => {
            assert_eq!(path, library_real_path("FakeModel", dir.path()));
        },
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_corrupt_library() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(library_real_path("Corrupt", dir.path()), b"\x7fELF but not really").unwrap();

    let result = Model::load_from_dir("Corrupt", dir.path());
    assert!(matches!(result, Err(ModelError::Load(LoadError::LoadFailed { .. }))));
}

#[test]
fn test_fixture_paths_resolve() {
    let Some(dir) = fixture_dir() else {
        return;
    };

    assert!(library_exists(cgmodel_core::library_generic_path("BasicTestModel", &dir)));
    let model = Model::load_from_dir("BasicTestModel", &dir).unwrap();
    assert_eq!(model.input_size(), 3);
}

#[test]
fn test_wrong_model_name_for_library() {
    let Some(base) = fixture_base("BasicTestModel") else {
        return;
    };

    assert_eq!(
        Model::load("OtherModel", &base).unwrap_err(),
        ModelError::Load(LoadError::MissingSymbol {
            symbol: "OtherModel_input_size".to_string()
        })
    );
}

#[test]
fn test_missing_jacobian_symbol() {
    let Some(base) = fixture_base("BrokenTestModels") else {
        return;
    };

    assert_eq!(
        Model::load("NoJacobianModel", &base).unwrap_err(),
        ModelError::Load(LoadError::MissingSymbol {
            symbol: "NoJacobianModel_jacobian".to_string()
        })
    );
}

#[test]
fn test_zero_output_size_is_rejected() {
    let Some(base) = fixture_base("BrokenTestModels") else {
        return;
    };

    assert_eq!(
        Model::load("ZeroOutputModel", &base).unwrap_err(),
        ModelError::Load(LoadError::InvalidDimensions {
            input_size: 2,
            output_size: 0
        })
    );
}

#[test]
fn test_native_failure_is_reported_and_recoverable() {
    let Some(model) = load_fixture("DomainCheckedModel", "BrokenTestModels") else {
        return;
    };

    assert_eq!(
        model.evaluate(&[-1.0], &[]),
        Err(ModelError::Evaluation {
            symbol: "DomainCheckedModel_forward".to_string(),
            code: -1
        })
    );
    assert_eq!(
        model.jacobian(&[-1.0], &[]),
        Err(ModelError::Evaluation {
            symbol: "DomainCheckedModel_jacobian".to_string(),
            code: -1
        })
    );
    assert_eq!(model.evaluate(&[4.0], &[]).unwrap().to_vec(), vec![4.0]);
}

#[test]
fn test_error_messages() {
    let err = Model::load("FakeModel", "nonexistent_path").unwrap_err();
    assert!(err.to_string().contains("nonexistent_path"));

    let err = ModelError::OutputIndexOutOfRange {
        index: 3,
        output_size: 3,
    };
    assert_eq!(err.to_string(), "output index 3 out of range: valid range is [0, 3)");
}
