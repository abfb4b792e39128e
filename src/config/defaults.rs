//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [api] Section Defaults
// ============================================================================

pub mod api {
    /// Local FastAPI development server
    pub fn url() -> String {
        "http://localhost:8000".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn products() -> PathBuf {
        "src/lib/data/products.json".into()
    }

    pub fn output() -> PathBuf {
        "dist".into()
    }
}
