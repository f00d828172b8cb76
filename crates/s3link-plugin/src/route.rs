//! Console route records.

use serde::{Deserialize, Serialize};

/// A route contributed to the console router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Path segment, absolute for top-level routes.
    pub path: String,
    /// Unique route name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Identifier of the component rendered by the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<RouteMeta>,
    /// Nested routes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Route>,
}

impl Route {
    /// Creates a route with only a path.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: None,
            component: None,
            meta: None,
            children: Vec::new(),
        }
    }

    /// Set the route name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the rendered component identifier.
    #[must_use]
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Set the route metadata.
    #[must_use]
    pub fn with_meta(mut self, meta: RouteMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Append a child route.
    #[must_use]
    pub fn with_child(mut self, child: Route) -> Self {
        self.children.push(child);
        self
    }

    /// Visits this route and its descendants depth-first, passing the full
    /// path of each one.
    pub(crate) fn walk<'a>(&'a self, parent_path: &str, visit: &mut dyn FnMut(&'a Route, &str)) {
        let full_path = join_path(parent_path, &self.path);
        visit(self, &full_path);
        for child in &self.children {
            child.walk(&full_path, visit);
        }
    }
}

/// Metadata the host reads from a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMeta {
    /// Page title.
    pub title: String,
    /// Whether the route is offered by the console search.
    #[serde(default)]
    pub searchable: bool,
    /// Navigation menu entry, if the route has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu: Option<MenuMeta>,
}

/// Navigation menu entry of a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuMeta {
    pub name: String,
    /// Menu group the entry is listed under.
    pub group: String,
    /// Icon identifier, resolved by the host.
    pub icon: String,
    /// Order within the group, lowest first.
    #[serde(default)]
    pub priority: i32,
}

/// A menu entry flattened for the navigation UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    /// Name of the route the entry opens.
    pub route_name: Option<String>,
    /// Full path of the route.
    pub path: String,
    pub name: String,
    pub group: String,
    pub icon: String,
    pub priority: i32,
}

fn join_path(parent: &str, path: &str) -> String {
    match (parent.trim_end_matches('/'), path.trim_start_matches('/')) {
        (parent, "") if parent.is_empty() => "/".to_owned(),
        (parent, "") => parent.to_owned(),
        (parent, path) => format!("{parent}/{path}"),
    }
}
