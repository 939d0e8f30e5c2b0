//! Route classification for the session gate.

/// Path prefixes that require a verified session.
pub const PROTECTED_PREFIXES: [&str; 5] = [
    "/userprofile",
    "/dashboard",
    "/settings",
    "/my-account",
    "/orders",
];

pub mod paths {
    pub const LOGIN: &str = "/login";
}

/// True iff `path` starts with any of `prefixes`. Case-sensitive, no slash
/// normalization, so `/dashboard-old` is protected and `/Dashboard` is not.
#[must_use]
pub fn classify<S: AsRef<str>>(path: &str, prefixes: &[S]) -> bool {
    prefixes
        .iter()
        .any(|prefix| path.starts_with(prefix.as_ref()))
}

/// Classifies `path` against [`PROTECTED_PREFIXES`].
#[must_use]
pub fn is_protected(path: &str) -> bool {
    classify(path, &PROTECTED_PREFIXES)
}
