//! Selection of the classes that stay in the slimmed `classes.jar`.

use crate::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

// R classes are regenerated from R.txt when the final app is built, so any
// copy bundled here would clash with it.
static GENERATED_R_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.+/R(\$[A-Za-z0-9$]*)?\.class$").expect("valid R class regex")
});

/// Returns true for `<package>/R.class` and its inner classes such as
/// `<package>/R$string.class`.
pub fn is_generated_r_class(name: &str) -> bool {
    GENERATED_R_CLASS.is_match(name)
}

/// Keeps jar entries under an allowlisted prefix, minus generated R classes.
#[derive(Debug, Clone)]
pub struct ClassFilter {
    prefix: String,
}

impl ClassFilter {
    /// Fails with [`Error::Config`] when `prefix` is empty, since an empty
    /// prefix would keep every dependency class.
    pub fn new(prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(Error::Config(
                "--classes-allowlist must not be empty".to_string(),
            ));
        }
        Ok(Self { prefix })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn accepts(&self, name: &str) -> bool {
        name.starts_with(&self.prefix) && !is_generated_r_class(name)
    }
}
