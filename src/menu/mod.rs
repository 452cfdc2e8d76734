//! Team navigation: the static menu tree, role filtering, and the projection
//! into namespaced, active-aware views for the sidebar, breadcrumb and setting
//! tabs.
//!
//! Filtering and projection are separate passes. [`filter_by_role`] prunes the
//! tree without touching urls; [`project`] rewrites urls under a namespace and
//! marks the items matching the current path.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::routes;
use crate::types::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub title: String,
    /// Namespace-relative url.
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_role: Option<Vec<Role>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_role: Option<Vec<Role>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MenuItem>>,
    /// Title of the parent item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl MenuItem {
    pub fn new(title: &str, url: &str) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
            icon: None,
            include_role: None,
            exclude_role: None,
            children: None,
            parent: None,
        }
    }

    pub fn icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    pub fn include(mut self, roles: &[Role]) -> Self {
        self.include_role = Some(roles.to_vec());
        self
    }

    pub fn exclude(mut self, roles: &[Role]) -> Self {
        self.exclude_role = Some(roles.to_vec());
        self
    }

    pub fn children(mut self, children: Vec<MenuItem>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn parent(mut self, title: &str) -> Self {
        self.parent = Some(title.to_string());
        self
    }

    /// Unrestricted items are visible to every role.
    pub fn allows(&self, role: Role) -> bool {
        if let Some(include) = &self.include_role {
            if !include.contains(&role) {
                return false;
            }
        }
        if let Some(exclude) = &self.exclude_role {
            if exclude.contains(&role) {
                return false;
            }
        }
        true
    }
}

pub static SETTING_MENUS: Lazy<Vec<MenuItem>> = Lazy::new(|| {
    [
        ("General", routes::SETTING),
        ("Members", routes::SETTING_MEMBER),
        ("Billing", routes::SETTING_BILL),
        ("Notifications", routes::SETTING_NOTIFY),
        ("Activity Log", routes::SETTING_LOG),
    ]
    .into_iter()
    .map(|(title, url)| MenuItem::new(title, url).parent("Setting"))
    .collect()
});

pub static TEAM_MENUS: Lazy<Vec<MenuItem>> = Lazy::new(|| {
    vec![
        MenuItem::new("Dashboard", routes::DASHBOARD).icon("LayoutDashboard"),
        MenuItem::new("Setting", routes::SETTING)
            .icon("Settings")
            .exclude(&[Role::Guest])
            .children(SETTING_MENUS.clone()),
    ]
});

/// Flat lookup list: setting pages first, then the top-level team menu.
pub static ALL_MENUS: Lazy<Vec<MenuItem>> =
    Lazy::new(|| SETTING_MENUS.iter().chain(TEAM_MENUS.iter()).cloned().collect());

static INDEX: Lazy<MenuIndex<'static>> = Lazy::new(|| MenuIndex::new(&ALL_MENUS));

/// Drops every item `role` may not see. Children are filtered on their own;
/// sibling order is preserved.
pub fn filter_by_role(items: &[MenuItem], role: Role) -> Vec<MenuItem> {
    items
        .iter()
        .filter(|item| item.allows(role))
        .map(|item| MenuItem {
            children: item.children.as_deref().map(|children| filter_by_role(children, role)),
            ..item.clone()
        })
        .collect()
}

/// A menu item placed under a team namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuView {
    pub title: String,
    pub url: String,
    pub origin_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MenuView>>,
}

/// Prefixes urls with `/{namespace}`. A leaf is active when its url is the
/// current path; a parent is active when the current path lies under its
/// original url.
pub fn project(items: &[MenuItem], namespace: &str, current_path: &str) -> Vec<MenuView> {
    let current = normalize(current_path);
    let relative = relative_path(namespace, &current);
    project_with(items, namespace, &current, &relative)
}

fn project_with(items: &[MenuItem], namespace: &str, current: &str, relative: &str) -> Vec<MenuView> {
    items
        .iter()
        .map(|item| {
            let url = routes::team_path(namespace, &item.url);
            let (is_active, children) = match &item.children {
                Some(children) => (
                    is_descendant(relative, &item.url),
                    Some(project_with(children, namespace, current, relative)),
                ),
                None => (url == current, None),
            };
            MenuView {
                title: item.title.clone(),
                url,
                origin_url: item.url.clone(),
                icon: item.icon.clone(),
                is_active,
                children,
            }
        })
        .collect()
}

/// Title to item lookup over a flat menu list, for walking `parent` labels.
#[derive(Debug, Clone)]
pub struct MenuIndex<'a> {
    by_title: HashMap<&'a str, &'a MenuItem>,
}

impl<'a> MenuIndex<'a> {
    /// Indexes `items` and their descendants. The first item with a given
    /// title wins.
    pub fn new(items: &'a [MenuItem]) -> Self {
        let mut by_title = HashMap::new();
        let mut pending: Vec<&'a MenuItem> = items.iter().collect();
        let mut next = Vec::new();
        while !pending.is_empty() {
            for item in pending.drain(..) {
                by_title.entry(item.title.as_str()).or_insert(item);
                if let Some(children) = &item.children {
                    next.extend(children.iter());
                }
            }
            std::mem::swap(&mut pending, &mut next);
        }
        Self { by_title }
    }

    pub fn get(&self, title: &str) -> Option<&'a MenuItem> {
        self.by_title.get(title).copied()
    }

    /// Ancestors of `item`, root first. Stops at an item without a parent, an
    /// unknown label, or a label already visited.
    pub fn parents(&self, item: &MenuItem) -> Vec<&'a MenuItem> {
        let mut chain = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(item.title.as_str());

        let mut current = item;
        while let Some(label) = current.parent.as_deref() {
            let Some(parent) = self.get(label) else {
                break;
            };
            if !seen.insert(parent.title.as_str()) {
                break;
            }
            chain.push(parent);
            current = parent;
        }

        chain.reverse();
        chain
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crumb {
    pub title: String,
    pub url: String,
}

/// `[namespace, ancestors.., page]` for the page at `path`. Unknown pages get
/// only the namespace crumb.
pub fn breadcrumb(namespace: &str, path: &str) -> Vec<Crumb> {
    let relative = relative_path(namespace, &normalize(path));

    let mut crumbs = vec![Crumb {
        title: namespace.to_string(),
        url: routes::team_path(namespace, routes::DASHBOARD),
    }];

    if let Some(item) = ALL_MENUS.iter().find(|item| item.url == relative) {
        crumbs.extend(
            INDEX
                .parents(item)
                .into_iter()
                .chain(std::iter::once(item))
                .map(|menu| Crumb {
                    title: menu.title.clone(),
                    url: routes::team_path(namespace, &menu.url),
                }),
        );
    }

    crumbs
}

/// Sidebar for `role` inside `namespace`.
pub fn sidebar(role: Role, namespace: &str, path: &str) -> Vec<MenuView> {
    project(&filter_by_role(&TEAM_MENUS, role), namespace, path)
}

/// Setting page tabs inside `namespace`.
pub fn setting_tabs(namespace: &str, path: &str) -> Vec<MenuView> {
    project(&SETTING_MENUS, namespace, path)
}

/// True when `path` is a setting page of `namespace`.
pub fn is_setting_path(namespace: &str, path: &str) -> bool {
    is_descendant(&relative_path(namespace, &normalize(path)), routes::SETTING)
}

fn normalize(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// `path` with the `/{namespace}` prefix removed, always starting with `/`.
fn relative_path(namespace: &str, path: &str) -> String {
    let prefix = format!("/{}", namespace);
    match path.strip_prefix(&prefix) {
        Some("") => "/".to_string(),
        Some(rest) if rest.starts_with('/') => rest.to_string(),
        _ => path.to_string(),
    }
}

fn is_descendant(path: &str, ancestor: &str) -> bool {
    if ancestor == "/" {
        return true;
    }
    path == ancestor
        || path
            .strip_prefix(ancestor)
            .map_or(false, |rest| rest.starts_with('/'))
}
