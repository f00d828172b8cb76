//! Plugin descriptor consumed by the console plugin loader.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::route::{MenuEntry, Route};

/// Route contributed under an existing console route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRecord {
    /// Name of the host route the route is nested under.
    pub parent_name: String,
    pub route: Route,
}

impl RouteRecord {
    /// Creates a record nesting `route` under `parent_name`.
    pub fn new(parent_name: impl Into<String>, route: Route) -> Self {
        Self {
            parent_name: parent_name.into(),
            route,
        }
    }
}

/// Everything a plugin registers with the console.
///
/// The `components`, `routes` and `extensionPoints` keys are part of the
/// host contract and are always serialized, even when empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginDescriptor {
    /// Globally registered components, by name.
    #[serde(default)]
    pub components: BTreeMap<String, String>,
    #[serde(default)]
    pub routes: Vec<RouteRecord>,
    /// Extension point handlers, by extension point name.
    #[serde(default)]
    pub extension_points: BTreeMap<String, Value>,
}

impl PluginDescriptor {
    /// Creates an empty descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route nested under `parent_name`.
    #[must_use]
    pub fn with_route(mut self, parent_name: impl Into<String>, route: Route) -> Self {
        self.routes.push(RouteRecord::new(parent_name, route));
        self
    }

    /// Checks the descriptor against the rules the host router enforces.
    ///
    /// # Errors
    ///
    /// Returns the first violation found: an empty parent or route name, a
    /// route name used twice, or a top-level path that is not absolute.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();

        for record in &self.routes {
            if record.parent_name.is_empty() {
                return Err(Error::EmptyParentName {
                    path: record.route.path.clone(),
                });
            }
            if !record.route.path.starts_with('/') {
                return Err(Error::RelativeRootPath {
                    path: record.route.path.clone(),
                });
            }

            let mut result = Ok(());
            record.route.walk("", &mut |route, full_path| {
                if result.is_err() {
                    return;
                }
                let Some(name) = route.name.as_deref() else {
                    return;
                };
                if name.is_empty() {
                    result = Err(Error::EmptyRouteName {
                        path: full_path.to_owned(),
                    });
                } else if !names.insert(name) {
                    result = Err(Error::duplicate_route_name(name));
                }
            });
            result?;
        }

        Ok(())
    }

    /// Finds a route by name anywhere in the route tree.
    pub fn find_route(&self, name: &str) -> Option<&Route> {
        let mut found = None;
        for record in &self.routes {
            record.route.walk("", &mut |route, _| {
                if found.is_none() && route.name.as_deref() == Some(name) {
                    found = Some(route);
                }
            });
        }
        found
    }

    /// Flattens the menu metadata of every route, ordered by group and
    /// then priority. Routes with equal keys keep their declaration order.
    pub fn menu_entries(&self) -> Vec<MenuEntry> {
        let mut entries = Vec::new();
        for record in &self.routes {
            record.route.walk("", &mut |route, full_path| {
                let Some(menu) = route.meta.as_ref().and_then(|meta| meta.menu.as_ref()) else {
                    return;
                };
                entries.push(MenuEntry {
                    route_name: route.name.clone(),
                    path: full_path.to_owned(),
                    name: menu.name.clone(),
                    group: menu.group.clone(),
                    icon: menu.icon.clone(),
                    priority: menu.priority,
                });
            });
        }

        entries.sort_by(|a, b| a.group.cmp(&b.group).then(a.priority.cmp(&b.priority)));
        entries
    }
}
