//! Composable route group.
//!
//! # Responsibilities
//! - Collect route declarations and group middleware
//! - Compose groups (mount, scoped subgroups)
//! - Resolve routes lazily with prefix and middleware applied
//! - Register resolved routes with an external router (dock)
//!
//! # Design Decisions
//! - Declarations stay unqualified; qualification happens on every read
//! - Mounting copies resolved routes; source groups are only borrowed
//! - The receiver's middleware is applied at its own enumeration, never at mount
//! - No validation: the registrar decides what it rejects

use std::fmt;
use std::iter::FusedIterator;

use crate::dock::Registrar;
use crate::group::path::qualify;
use crate::group::route::RouteItem;

/// A reusable namespace of route declarations.
///
/// Routes are bound to a router only by [`RouteGroup::dock`], so the same
/// group can be mounted under several prefixes or docked more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGroup<H> {
    prefix: String,
    middleware: Vec<H>,
    routes: Vec<RouteItem<H>>,
}

impl<H> Default for RouteGroup<H> {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            middleware: Vec::new(),
            routes: Vec::new(),
        }
    }
}

impl<H: Clone> RouteGroup<H> {
    /// Create an empty group with a path prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    /// Create a group with a path prefix and initial middleware.
    pub fn with_middleware(prefix: impl Into<String>, middleware: impl IntoIterator<Item = H>) -> Self {
        Self {
            prefix: prefix.into(),
            middleware: middleware.into_iter().collect(),
            routes: Vec::new(),
        }
    }

    /// Append middleware, preserving order.
    pub fn use_middleware(&mut self, middleware: impl IntoIterator<Item = H>) -> &mut Self {
        self.middleware.extend(middleware);
        self
    }

    /// Declare a route relative to this group.
    pub fn handle(
        &mut self,
        method: impl Into<String>,
        path: impl Into<String>,
        handlers: impl IntoIterator<Item = H>,
    ) -> &mut Self {
        self.routes.push(RouteItem::new(
            method,
            path,
            handlers.into_iter().collect(),
        ));
        self
    }

    pub fn get(&mut self, path: impl Into<String>, handlers: impl IntoIterator<Item = H>) -> &mut Self {
        self.handle("GET", path, handlers)
    }

    pub fn post(&mut self, path: impl Into<String>, handlers: impl IntoIterator<Item = H>) -> &mut Self {
        self.handle("POST", path, handlers)
    }

    pub fn put(&mut self, path: impl Into<String>, handlers: impl IntoIterator<Item = H>) -> &mut Self {
        self.handle("PUT", path, handlers)
    }

    pub fn patch(&mut self, path: impl Into<String>, handlers: impl IntoIterator<Item = H>) -> &mut Self {
        self.handle("PATCH", path, handlers)
    }

    pub fn delete(&mut self, path: impl Into<String>, handlers: impl IntoIterator<Item = H>) -> &mut Self {
        self.handle("DELETE", path, handlers)
    }

    pub fn head(&mut self, path: impl Into<String>, handlers: impl IntoIterator<Item = H>) -> &mut Self {
        self.handle("HEAD", path, handlers)
    }

    pub fn options(&mut self, path: impl Into<String>, handlers: impl IntoIterator<Item = H>) -> &mut Self {
        self.handle("OPTIONS", path, handlers)
    }

    /// Declare routes through an ephemeral subgroup prefixed with `path`.
    ///
    /// The subgroup already carries `path` as its prefix, so it is mounted
    /// with an empty prefix.
    pub fn with_scope<F>(&mut self, path: impl Into<String>, configure: F) -> &mut Self
    where
        F: FnOnce(&mut RouteGroup<H>),
    {
        let mut subgroup = RouteGroup::new(path);
        configure(&mut subgroup);
        self.mount("", [&subgroup])
    }

    /// Copy the resolved routes of `groups` into this group under `prefix`.
    pub fn mount<'g, I>(&mut self, prefix: &str, groups: I) -> &mut Self
    where
        I: IntoIterator<Item = &'g RouteGroup<H>>,
        H: 'g,
    {
        for group in groups {
            self.routes.extend(group.iter().map(|route| RouteItem {
                path: qualify(prefix, &route.path),
                ..route
            }));
        }
        self
    }

    /// Lazily enumerate resolved routes in declaration order.
    pub fn iter(&self) -> Routes<'_, H> {
        Routes {
            group: self,
            inner: self.routes.iter(),
        }
    }

    /// Snapshot of all resolved routes.
    pub fn routes(&self) -> Vec<RouteItem<H>> {
        self.iter().collect()
    }

    /// Register every resolved route with `registrar`, qualified with `prefix`.
    ///
    /// Stops at the first registration error. Returns the number of routes
    /// registered.
    pub fn dock<R>(&self, prefix: &str, registrar: &mut R) -> Result<usize, R::Error>
    where
        R: Registrar<H>,
    {
        let mut docked = 0;
        for route in self.iter() {
            let path = qualify(prefix, &route.path);
            tracing::debug!(
                method = %route.method,
                path = %path,
                handlers = route.handlers.len(),
                "Docking route"
            );
            registrar.register(&route.method, &path, route.handlers)?;
            docked += 1;
        }

        tracing::info!(
            group_prefix = %self.prefix,
            dock_prefix = %prefix,
            routes = docked,
            "Route group docked"
        );
        Ok(docked)
    }

    fn resolve(&self, route: &RouteItem<H>) -> RouteItem<H> {
        let mut handlers = Vec::with_capacity(self.middleware.len() + route.handlers.len());
        handlers.extend_from_slice(&self.middleware);
        handlers.extend_from_slice(&route.handlers);
        RouteItem {
            method: route.method.clone(),
            path: qualify(&self.prefix, &route.path),
            handlers,
        }
    }
}

impl<H> RouteGroup<H> {
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn middleware(&self) -> &[H] {
        &self.middleware
    }

    /// Number of declared (including mounted) routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<H: Clone> fmt::Display for RouteGroup<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for route in self.iter() {
            writeln!(f, "{}", route)?;
        }
        Ok(())
    }
}

impl<'a, H: Clone> IntoIterator for &'a RouteGroup<H> {
    type Item = RouteItem<H>;
    type IntoIter = Routes<'a, H>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy enumeration of a group's resolved routes.
///
/// Created by [`RouteGroup::iter`]. A clone continues from the current
/// position; call `iter` again to start over.
#[derive(Debug)]
pub struct Routes<'a, H> {
    group: &'a RouteGroup<H>,
    inner: std::slice::Iter<'a, RouteItem<H>>,
}

impl<H> Clone for Routes<'_, H> {
    fn clone(&self) -> Self {
        Self {
            group: self.group,
            inner: self.inner.clone(),
        }
    }
}

impl<H: Clone> Iterator for Routes<'_, H> {
    type Item = RouteItem<H>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|route| self.group.resolve(route))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<H: Clone> ExactSizeIterator for Routes<'_, H> {}

impl<H: Clone> FusedIterator for Routes<'_, H> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dock::RouteTable;

    type Group = RouteGroup<&'static str>;

    fn photos() -> Group {
        let mut photos = Group::new("photos");
        photos.handle("GET", "", ["query_photos"]);
        photos.handle("GET", "/:id", ["get_photo"]);
        photos
    }

    fn summary(group: &Group) -> Vec<String> {
        group.iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn test_handle_qualifies_paths() {
        let routes = photos().routes();
        assert_eq!(
            routes,
            vec![
                RouteItem::new("GET", "/photos", vec!["query_photos"]),
                RouteItem::new("GET", "/photos/:id", vec!["get_photo"]),
            ]
        );
    }

    #[test]
    fn test_empty_prefix_and_empty_path() {
        let mut group = Group::new("");
        group.handle("GET", "", ["root"]);
        group.handle("GET", "status", ["status"]);
        let paths: Vec<String> = group.iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["", "/status"]);
    }

    #[test]
    fn test_paths_start_with_separator() {
        let mut group = Group::new("api//v2/");
        group.handle("GET", "", ["a"]);
        group.handle("POST", "items/", ["b"]);
        group.handle("DELETE", "//items/:id", ["c"]);
        for route in group.iter() {
            assert!(route.path.starts_with('/'), "{}", route.path);
        }
        assert_eq!(group.routes()[2].path, "/api/v2/items/:id");
    }

    #[test]
    fn test_use_middleware_order() {
        let mut group = Group::with_middleware("photos", ["m1"]);
        group.use_middleware(["m2"]).handle("GET", "", ["h1"]);
        assert_eq!(group.routes()[0].handlers, vec!["m1", "m2", "h1"]);
    }

    #[test]
    fn test_use_after_handle_applies_on_next_read() {
        let mut group = photos();
        let before = group.routes();
        group.use_middleware(["log"]);
        let after = group.routes();

        assert_eq!(before[0].handlers, vec!["query_photos"]);
        assert_eq!(after[0].handlers, vec!["log", "query_photos"]);
    }

    #[test]
    fn test_routes_is_idempotent() {
        let mut group = photos();
        group.use_middleware(["log"]);
        assert_eq!(group.routes(), group.routes());
    }

    #[test]
    fn test_mount_into_empty_prefix_group() {
        let mut v1 = Group::new("v1");
        v1.mount("", [&photos()]);
        assert_eq!(
            summary(&v1),
            vec!["GET /v1/photos 1", "GET /v1/photos/:id 1"]
        );
    }

    #[test]
    fn test_mount_with_prefix() {
        let mut root = Group::new("");
        root.mount("v1", [&photos()]);
        let paths: Vec<String> = root.iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/v1/photos", "/v1/photos/:id"]);
    }

    #[test]
    fn test_mount_empty_into_empty_reproduces_child() {
        let child = photos();
        let mut parent = Group::new("");
        parent.mount("", [&child]);
        assert_eq!(parent.routes(), child.routes());
    }

    #[test]
    fn test_mount_does_not_double_wrap_middleware() {
        let mut child = Group::with_middleware("photos", ["child_mw"]);
        child.handle("GET", "", ["h"]);

        let mut parent = Group::with_middleware("v1", ["parent_mw"]);
        parent.mount("", [&child]);

        assert_eq!(parent.len(), 1);
        assert_eq!(
            parent.routes()[0].handlers,
            vec!["parent_mw", "child_mw", "h"]
        );
    }

    #[test]
    fn test_mount_multiple_groups_in_order() {
        let mut users = Group::new("users");
        users.get("", ["list_users"]);

        let mut v1 = Group::new("v1");
        v1.get("/health", ["health"]);
        v1.mount("", [&photos(), &users]);

        let paths: Vec<String> = v1.iter().map(|r| r.path).collect();
        assert_eq!(
            paths,
            vec!["/v1/health", "/v1/photos", "/v1/photos/:id", "/v1/users"]
        );
    }

    #[test]
    fn test_mounted_source_stays_reusable() {
        let mut source = photos();
        let mut a = Group::new("a");
        let mut b = Group::new("b");
        a.mount("", [&source]);
        source.handle("POST", "", ["create_photo"]);
        b.mount("", [&source]);

        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 3);
        assert_eq!(source.len(), 3);
        assert_eq!(b.routes()[2].path, "/b/photos");
    }

    #[test]
    fn test_with_scope_applies_path_once() {
        let mut v1 = Group::new("/v1");
        v1.with_scope("photos", |photos| {
            photos.use_middleware(["log"]);
            photos.handle("GET", "", ["log", "query_photos"]);
            photos.handle("GET", "/:id", ["get_photo"]);
        });

        assert_eq!(
            summary(&v1),
            vec!["GET /v1/photos 3", "GET /v1/photos/:id 2"]
        );
    }

    #[test]
    fn test_iter_early_exit() {
        let group = photos();
        let first = group.iter().find(|r| r.path.ends_with(":id"));
        assert_eq!(first.map(|r| r.handlers), Some(vec!["get_photo"]));
        assert_eq!(group.iter().len(), 2);
    }

    #[test]
    fn test_display_lists_routes() {
        let mut group = photos();
        group.use_middleware(["log"]);
        assert_eq!(group.to_string(), "GET /photos 2\nGET /photos/:id 2\n");
    }

    #[test]
    fn test_dock_qualifies_with_prefix() {
        let mut v1 = Group::new("v1");
        v1.mount("", [&photos()]);

        let mut table = RouteTable::new();
        let count = v1.dock("api", &mut table).unwrap();

        assert_eq!(count, 2);
        let paths: Vec<&str> = table.entries().iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/api/v1/photos", "/api/v1/photos/:id"]);
    }

    #[test]
    fn test_dock_twice_repeats_registrations() {
        let group = photos();
        let mut table = RouteTable::new();
        group.dock("", &mut table).unwrap();
        group.dock("", &mut table).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.entries()[0], table.entries()[2]);
    }

    #[test]
    fn test_dock_stops_on_registrar_error() {
        struct RejectPost(usize);

        impl Registrar<&'static str> for RejectPost {
            type Error = String;

            fn register(&mut self, method: &str, path: &str, _: Vec<&'static str>) -> Result<(), String> {
                if method == "POST" {
                    return Err(format!("rejected {} {}", method, path));
                }
                self.0 += 1;
                Ok(())
            }
        }

        let mut group = photos();
        group.post("", ["create_photo"]);
        group.get("/recent", ["recent"]);

        let mut registrar = RejectPost(0);
        let err = group.dock("", &mut registrar).unwrap_err();
        assert_eq!(err, "rejected POST /photos");
        assert_eq!(registrar.0, 2);
    }
}
