//! Path joining and normalization.
//!
//! # Responsibilities
//! - Join a group prefix with a route path
//! - Normalize separators lexically (no filesystem access)
//! - Enforce a leading separator on non-empty results
//!
//! # Design Decisions
//! - One rule everywhere: `qualify = prepend_slash(join(prefix, path))`
//! - The bare root `/` collapses to `""` so "no segment" never registers as `/`
//! - `..` never climbs above the root of a rooted path

/// Joins `prefix` and `path` into one cleaned path.
///
/// Empty elements are ignored. Duplicate separators, trailing separators and
/// `.` segments are dropped; `..` removes the preceding segment. The result is
/// rooted iff the first non-empty element starts with `/`.
pub fn join(prefix: &str, path: &str) -> String {
    let rooted = if prefix.is_empty() {
        path.starts_with('/')
    } else {
        prefix.starts_with('/')
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in prefix.split('/').chain(path.split('/')) {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(last) if *last != ".." => {
                    segments.pop();
                }
                _ if rooted => {}
                _ => segments.push(".."),
            },
            s => segments.push(s),
        }
    }

    let body = segments.join("/");
    if rooted {
        format!("/{}", body)
    } else {
        body
    }
}

/// Ensures a non-empty path starts with `/`. The bare root collapses to `""`.
pub fn prepend_slash(path: &str) -> String {
    match path {
        "" | "/" => String::new(),
        p if p.starts_with('/') => p.to_string(),
        p => format!("/{}", p),
    }
}

/// Qualifies `path` with `prefix` using the join + leading-separator rule.
pub fn qualify(prefix: &str, path: &str) -> String {
    prepend_slash(&join(prefix, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_basic() {
        assert_eq!(join("photos", ""), "photos");
        assert_eq!(join("photos", "/:id"), "photos/:id");
        assert_eq!(join("/v1", "photos"), "/v1/photos");
        assert_eq!(join("", "/:id"), "/:id");
        assert_eq!(join("", ""), "");
    }

    #[test]
    fn test_join_collapses_separators() {
        assert_eq!(join("/v1/", "/photos/"), "/v1/photos");
        assert_eq!(join("v1//", "//photos"), "v1/photos");
        assert_eq!(join("/", "/"), "/");
    }

    #[test]
    fn test_join_dot_segments() {
        assert_eq!(join("/v1/./a", "../photos"), "/v1/photos");
        assert_eq!(join("/", "../../x"), "/x");
        assert_eq!(join("a", "../../b"), "../b");
        assert_eq!(join(".", ""), "");
    }

    #[test]
    fn test_prepend_slash() {
        assert_eq!(prepend_slash(""), "");
        assert_eq!(prepend_slash("/"), "");
        assert_eq!(prepend_slash("photos"), "/photos");
        assert_eq!(prepend_slash("/photos"), "/photos");
    }

    #[test]
    fn test_qualify() {
        assert_eq!(qualify("photos", ""), "/photos");
        assert_eq!(qualify("v1", "/photos/:id"), "/v1/photos/:id");
        assert_eq!(qualify("", ""), "");
        assert_eq!(qualify("/", ""), "");
        assert_eq!(qualify("", "/photos"), "/photos");
        assert_eq!(qualify("/api/", "v1/*path"), "/api/v1/*path");
    }
}
