use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Test fixtures: (source file, library name without `lib` prefix or extension)
const FIXTURES: &[(&str, &str)] = &[
    ("basic_model.c", "BasicTestModel"),
    ("parameterized_model.c", "ParameterizedTestModel"),
    ("math_functions_model.c", "MathFunctionsTestModel"),
    ("low_order_model.c", "LowOrderTestModel"),
    ("broken_models.c", "BrokenTestModels"),
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=tests/fixtures");
    println!("cargo:rerun-if-env-changed=CI");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let sources = manifest_dir.join("tests").join("fixtures");
    let fixture_dir = out_dir.join("fixtures");

    // Integration tests load these libraries. Without a C compiler the
    // library still builds and those tests skip themselves, except on CI.
    match build_fixtures(&sources, &fixture_dir) {
        Ok(()) => println!("cargo:rustc-env=CGMODEL_FIXTURE_DIR={}", fixture_dir.display()),
        Err(e) if env::var_os("CI").is_some() => panic!("compiled model fixtures are required on CI: {}", e),
        Err(e) => println!("cargo:warning=compiled model fixtures unavailable: {}", e),
    }
}

fn build_fixtures(sources: &Path, fixture_dir: &Path) -> Result<(), String> {
    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    let ext = match target_os.as_str() {
        "macos" | "ios" => "dylib",
        "windows" => "dll",
        _ => "so",
    };

    let compiler = cc::Build::new()
        .cargo_metadata(false)
        .try_get_compiler()
        .map_err(|e| e.to_string())?;

    if compiler.is_like_msvc() {
        return Err("fixtures require a gcc- or clang-compatible compiler".into());
    }

    fs::create_dir_all(fixture_dir).map_err(|e| format!("failed to create {}: {}", fixture_dir.display(), e))?;

    for (source, lib_name) in FIXTURES {
        let source_path = sources.join(source);
        let output_path = fixture_dir.join(format!("lib{}.{}", lib_name, ext));

        let mut cmd = compiler.to_command();
        cmd.arg("-shared")
            .arg("-fPIC")
            .arg("-O2")
            .arg("-o")
            .arg(&output_path)
            .arg(&source_path);

        if target_os == "linux" {
            cmd.arg("-lm");
        }

        let output = cmd
            .output()
            .map_err(|e| format!("failed to run {}: {}", compiler.path().display(), e))?;

        if !output.status.success() {
            return Err(format!(
                "compiling {} failed:\n{}",
                source_path.display(),
                String::from_utf8_lossy(&output.stderr)
            ));
        }
    }

    Ok(())
}
