//! Route declarations.

use std::fmt;

/// One declared endpoint: method, path and an ordered handler chain.
///
/// Inside a group the path is relative to the group prefix. Items handed out
/// by enumeration are fully qualified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteItem<H> {
    /// HTTP verb, passed through unvalidated.
    pub method: String,
    /// Path pattern; may contain `:param` and `*catchall` segments.
    pub path: String,
    /// Handlers in execution order.
    pub handlers: Vec<H>,
}

impl<H> RouteItem<H> {
    pub fn new(method: impl Into<String>, path: impl Into<String>, handlers: Vec<H>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            handlers,
        }
    }
}

impl<H> fmt::Display for RouteItem<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.method, self.path, self.handlers.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let item = RouteItem::new("GET", "/photos/:id", vec!["log", "get_photo"]);
        assert_eq!(item.to_string(), "GET /photos/:id 2");
    }
}
