//! In-memory registrar that records what would be registered.

use std::convert::Infallible;

use crate::dock::Registrar;
use crate::group::RouteItem;

/// Records registrations in order. Never rejects anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable<H> {
    entries: Vec<RouteItem<H>>,
}

impl<H> RouteTable<H> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn entries(&self) -> &[RouteItem<H>] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<RouteItem<H>> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Registrar<H> for RouteTable<H> {
    type Error = Infallible;

    fn register(&mut self, method: &str, path: &str, handlers: Vec<H>) -> Result<(), Infallible> {
        self.entries.push(RouteItem::new(method, path, handlers));
        Ok(())
    }
}
