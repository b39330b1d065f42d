use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Models the CLI tests run against: (source file, library name)
const FIXTURES: &[(&str, &str)] = &[
    ("parameterized_model.c", "ParameterizedTestModel"),
    ("low_order_model.c", "LowOrderTestModel"),
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=crates/cgmodel_core/tests/fixtures");
    println!("cargo:rerun-if-env-changed=CI");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let sources = manifest_dir.join("crates").join("cgmodel_core").join("tests").join("fixtures");
    let fixture_dir = out_dir.join("fixtures");

    match build_fixtures(&sources, &fixture_dir) {
        Ok(()) => println!("cargo:rustc-env=CGMODEL_CLI_FIXTURE_DIR={}", fixture_dir.display()),
        Err(e) if env::var_os("CI").is_some() => panic!("CLI model fixtures are required on CI: {}", e),
        Err(e) => println!("cargo:warning=CLI model fixtures unavailable: {}", e),
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

        let output = compiler
            .to_command()
            .args(["-shared", "-fPIC", "-O2", "-o"])
            .arg(&output_path)
            .arg(&source_path)
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
