#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod descriptor;
mod error;
mod route;

use std::sync::LazyLock;

pub use descriptor::{PluginDescriptor, RouteRecord};
pub use error::{Error, Result};
pub use route::{MenuEntry, MenuMeta, Route, RouteMeta};

/// Tracing target for plugin registration.
pub const TRACING_TARGET: &str = "s3link_plugin";

/// Name of the host route the plugin route is nested under.
pub const PARENT_ROUTE: &str = "Root";

/// Name of the plugin page route.
pub const ROUTE_NAME: &str = "S3Link";

/// Path of the plugin page.
pub const ROUTE_PATH: &str = "/s3link";

/// Identifier of the component rendering the plugin page.
pub const HOME_COMPONENT: &str = "HomeView";

const MENU_TITLE: &str = "关联S3文件";
const MENU_GROUP: &str = "工具";
const MENU_ICON: &str = "carbon:folder-details-reference";

static PLUGIN: LazyLock<PluginDescriptor> = LazyLock::new(|| {
    let descriptor = build_descriptor();
    tracing::debug!(
        target: TRACING_TARGET,
        routes = descriptor.routes.len(),
        "Plugin descriptor built"
    );
    descriptor
});

/// Returns the plugin descriptor, building it on first access.
pub fn plugin() -> &'static PluginDescriptor {
    &PLUGIN
}

fn build_descriptor() -> PluginDescriptor {
    let page = Route::new("")
        .with_name(ROUTE_NAME)
        .with_component(HOME_COMPONENT)
        .with_meta(RouteMeta {
            title: MENU_TITLE.to_owned(),
            searchable: true,
            menu: Some(MenuMeta {
                name: MENU_TITLE.to_owned(),
                group: MENU_GROUP.to_owned(),
                icon: MENU_ICON.to_owned(),
                priority: 0,
            }),
        });

    PluginDescriptor::new().with_route(PARENT_ROUTE, Route::new(ROUTE_PATH).with_child(page))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_host_shape() {
        let json = serde_json::to_value(plugin()).unwrap();
        assert_eq!(
            json,
            json!({
                "components": {},
                "routes": [{
                    "parentName": "Root",
                    "route": {
                        "path": "/s3link",
                        "children": [{
                            "path": "",
                            "name": "S3Link",
                            "component": "HomeView",
                            "meta": {
                                "title": "关联S3文件",
                                "searchable": true,
                                "menu": {
                                    "name": "关联S3文件",
                                    "group": "工具",
                                    "icon": "carbon:folder-details-reference",
                                    "priority": 0
                                }
                            }
                        }]
                    }
                }],
                "extensionPoints": {}
            })
        );
    }

    #[test]
    fn test_built_once() {
        assert!(std::ptr::eq(plugin(), plugin()));
    }

    #[test]
    fn test_descriptor_is_valid() {
        assert_eq!(plugin().validate(), Ok(()));
    }

    #[test]
    fn test_single_menu_entry() {
        let entries = plugin().menu_entries();
        assert_eq!(entries.len(), 1);

        let entry = &entries[0];
        assert_eq!(entry.route_name.as_deref(), Some(ROUTE_NAME));
        assert_eq!(entry.path, ROUTE_PATH);
        assert_eq!(entry.group, "工具");
        assert_eq!(entry.priority, 0);
    }

    #[test]
    fn test_find_page_route() {
        let route = plugin().find_route(ROUTE_NAME).unwrap();
        assert_eq!(route.component.as_deref(), Some(HOME_COMPONENT));
        assert!(route.meta.as_ref().is_some_and(|meta| meta.searchable));
    }

    #[test]
    fn test_round_trip_through_host_json() {
        let json = serde_json::to_string(plugin()).unwrap();
        let decoded: PluginDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(&decoded, plugin());
    }
}
