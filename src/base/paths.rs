//! Helpers for working with Go import paths.

/// The last segment of an import path, which is the default package alias.
///
/// `k8s.io/apimachinery/pkg/apis/meta/v1` -> `v1`.
pub fn final_segment(path: &str) -> &str {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(path)
}

/// Whether an import path names a standard-library package.
///
/// Standard-library paths carry no domain qualifier (`fmt`, `encoding/json`),
/// while third-party paths start with a host name (`github.com/...`). A path
/// without any `.` is treated as standard library.
pub fn is_stdlib_path(path: &str) -> bool {
    !path.contains('.')
}
