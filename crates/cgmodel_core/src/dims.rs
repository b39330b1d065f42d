//! Declared model dimensions

use crate::error::LoadError;
use crate::symbols::SymbolTable;

/// Sizes declared by a compiled model.
///
/// Queried once when the model is loaded; every call is validated against
/// these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub input_size: usize,
    pub param_size: usize,
    pub output_size: usize,
}

impl Dimensions {
    /// Ask the compiled model for its sizes.
    ///
    /// Callers guarantee the table's entry points are still loaded.
    pub(crate) fn query(symbols: &SymbolTable) -> Result<Self, LoadError> {
        // Safety: size accessors take no arguments and have no side effects.
        let dims = unsafe {
            Self {
                input_size: (symbols.input_size)(),
                param_size: symbols.param_size.map(|f| f()).unwrap_or(0),
                output_size: (symbols.output_size)(),
            }
        };

        dims.validate()?;
        Ok(dims)
    }

    fn validate(&self) -> Result<(), LoadError> {
        let combined = self.input_size.checked_add(self.param_size);
        if self.input_size == 0 || self.output_size == 0 || combined.is_none() {
            return Err(LoadError::InvalidDimensions {
                input_size: self.input_size,
                output_size: self.output_size,
            });
        }
        Ok(())
    }

    /// Length of the concatenated `[input | parameters]` vector
    pub fn combined_input_size(&self) -> usize {
        self.input_size.saturating_add(self.param_size)
    }

    pub fn has_params(&self) -> bool {
        self.param_size > 0
    }
}
