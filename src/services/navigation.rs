//! Navigation menu loading and lookup.

use std::collections::HashSet;
use std::path::Path;
use tracing::info;

use crate::error::{AppError, Result};
use crate::types::NavItem;

/// The application's navigation tree.
#[derive(Debug, Clone)]
pub struct NavigationMenu {
    items: Vec<NavItem>,
}

impl NavigationMenu {
    /// Build a menu, rejecting duplicate ids anywhere in the tree.
    pub fn from_items(items: Vec<NavItem>) -> Result<Self> {
        let mut seen = HashSet::new();
        for item in items.iter().flat_map(NavItem::iter) {
            if !seen.insert(item.id.as_str()) {
                return Err(AppError::BadRequest(format!(
                    "Duplicate navigation id: {}",
                    item.id
                )));
            }
        }
        Ok(Self { items })
    }

    /// Parse a menu from a JSON array of items.
    pub fn from_json(json: &str) -> Result<Self> {
        let items: Vec<NavItem> = serde_json::from_str(json)?;
        Self::from_items(items)
    }

    /// Load a menu from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let menu = Self::from_json(&json)?;
        info!(
            "Loaded navigation menu from {} ({} entries)",
            path.display(),
            menu.len()
        );
        Ok(menu)
    }

    /// Load from `path` when given, otherwise use the built-in menu.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    /// Total number of entries at every level.
    pub fn len(&self) -> usize {
        self.items.iter().map(|item| item.iter().count()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&NavItem> {
        self.items.iter().find_map(|item| item.find(id))
    }

    /// Entry whose `href` matches a location exactly.
    pub fn find_by_href(&self, href: &str) -> Option<&NavItem> {
        self.items
            .iter()
            .flat_map(NavItem::iter)
            .find(|item| item.href == href)
    }

    /// The menu as seen by a viewer holding `visibility`.
    pub fn visible_to(&self, visibility: Option<&str>) -> Vec<NavItem> {
        self.items
            .iter()
            .filter_map(|item| item.filter_visibility(visibility))
            .collect()
    }
}

impl Default for NavigationMenu {
    fn default() -> Self {
        let items = vec![
            NavItem::new("home", "Home", "/home"),
            NavItem::new("projects", "Projects", "/projects"),
            NavItem::new("components", "Components", "/components"),
            NavItem::new("licenses", "Licenses", "/licenses"),
            NavItem::new("ecc", "ECC", "/ecc"),
            NavItem::new("vulnerabilities", "Vulnerabilities", "/vulnerabilities"),
            NavItem::new("requests", "Requests", "/requests").with_childs(vec![
                NavItem::new("moderation-requests", "Moderation Requests", "/requests#moderation"),
                NavItem::new("clearing-requests", "Clearing Requests", "/requests#clearing"),
            ]),
            NavItem::new("admin", "Admin", "/admin")
                .with_visibility("ADMIN")
                .with_childs(vec![
                    NavItem::new("admin-users", "Users", "/admin/users"),
                    NavItem::new("admin-vendors", "Vendors", "/admin/vendors"),
                    NavItem::new("admin-licenses", "License Types", "/admin/licenseTypes"),
                ]),
        ];
        Self { items }
    }
}
