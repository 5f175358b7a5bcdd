//! Shared test utilities for integration tests.
//!
//! Import from integration test files as:
//! ```ignore
//! mod common;
//! ```

use std::path::PathBuf;
use tempfile::TempDir;

/// Initialize tracing for tests, respecting RUST_LOG env var.
///
/// Safe to call multiple times. Subsequent calls are no-ops.
#[allow(dead_code)]
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// Menu definition of a small site: home, an article section with a detail page that needs
/// the article id, an admin section and an external link.
#[allow(dead_code)]
pub const SITE_MENU: &str = r#"
name = "main"
title = "Home"
link = "Homepage:default"

[[items]]
name = "articles"
title = "Articles"
link = "Article:default"
class = "section"

[[items.items]]
name = "detail"
title = "Article detail"
link = "Article:show"
param = { key = "article" }

[[items.items]]
name = "comments"
title = "Comments"
link = "Article:comments"
args = { page = 1 }
param = { key = "article", name = "article" }

[[items]]
name = "admin"
title = "Administration"
link = "Admin:default"
authorization = { resource = "admin" }

[[items]]
name = "docs"
title = "Documentation"
link = "https://docs.example.org/"
currentable = false
"#;

/// Route table matching [`SITE_MENU`].
#[allow(dead_code)]
pub const SITE_ROUTES: &str = r#"
base_url = "https://example.org"

[routes]
"Homepage:default" = "/"
"Article:default" = "/articles"
"Article:show" = "/articles/{id}"
"Article:comments" = "/articles/{article}/comments"
"Admin:default" = "/admin"
"#;

/// Write `content` to `name` inside `temp_dir` and return the file's path.
#[allow(dead_code)]
pub fn write_file(temp_dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = temp_dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}
