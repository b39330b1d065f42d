//! Artifact resolution
//!
//! Locates a compiled model library from a base path (no extension) and opens
//! it with the platform's dynamic loader.

use crate::error::LoadError;
use libloading::Library;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Get the shared library extension for the current platform
pub fn shared_lib_extension() -> &'static str {
    #[cfg(target_os = "macos")]
    {
        "dylib"
    }
    #[cfg(target_os = "windows")]
    {
        "dll"
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        "so"
    }
}

/// Path of a model library without its extension: `<dir>/lib<model_name>`.
pub fn library_generic_path(model_name: &str, dir: impl AsRef<Path>) -> PathBuf {
    dir.as_ref().join(format!("lib{}", model_name))
}

/// Path of a model library including the platform extension.
pub fn library_real_path(model_name: &str, dir: impl AsRef<Path>) -> PathBuf {
    with_platform_extension(library_generic_path(model_name, dir))
}

/// Append the platform extension to a base path.
///
/// The extension is appended rather than substituted, so base paths that
/// already contain dots (`build/libmodel.v2`) are preserved.
pub fn with_platform_extension(base: impl AsRef<Path>) -> PathBuf {
    let mut raw: OsString = base.as_ref().as_os_str().to_owned();
    raw.push(".");
    raw.push(shared_lib_extension());
    PathBuf::from(raw)
}

/// Check whether a library exists for the given base path.
pub fn library_exists(base: impl AsRef<Path>) -> bool {
    with_platform_extension(base).is_file()
}

/// An opened model library.
///
/// The library stays mapped for as long as the handle lives and is unloaded
/// when it is dropped. Only `Model` holds one, next to the entry points
/// resolved from it.
pub(crate) struct ArtifactHandle {
    library: Library,
    path: PathBuf,
}

impl ArtifactHandle {
    /// Open the library at `base` plus the platform extension.
    pub(crate) fn open(base: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = with_platform_extension(base);

        if !path.is_file() {
            return Err(LoadError::NotFound { path });
        }

        // dlopen only searches the working directory for names containing a
        // separator, so hand it an absolute path.
        let path = std::fs::canonicalize(&path).map_err(|_| LoadError::NotFound { path: path.clone() })?;

        // Safety: loading runs the library's initializers. The artifact is
        // trusted to be a model library produced by the code generator.
        let library = unsafe { Library::new(&path) }.map_err(|e| LoadError::LoadFailed {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        tracing::debug!(path = %path.display(), "opened compiled model library");

        Ok(Self { library, path })
    }

    /// Resolved path of the opened library, including its extension
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn library(&self) -> &Library {
        &self.library
    }
}

impl std::fmt::Debug for ArtifactHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactHandle").field("path", &self.path).finish()
    }
}
