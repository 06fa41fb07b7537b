use crate::filter::ClassFilter;
use crate::Result;
use std::path::PathBuf;

/// Everything one slimming run needs.
#[derive(Debug, Clone)]
pub struct SlimConfig {
    pub filter: ClassFilter,
    pub output: PathBuf,
    pub input: PathBuf,
    /// Resource folders in the order their `values*` files get numbered.
    pub res_folders: Vec<PathBuf>,
}

impl SlimConfig {
    /// Validates the allowlist prefix. Paths are not checked here; a missing
    /// file surfaces when the run opens it.
    pub fn new(
        classes_allowlist: impl Into<String>,
        output: impl Into<PathBuf>,
        input: impl Into<PathBuf>,
        res_folders: Vec<PathBuf>,
    ) -> Result<Self> {
        Ok(Self {
            filter: ClassFilter::new(classes_allowlist)?,
            output: output.into(),
            input: input.into(),
            res_folders,
        })
    }
}
