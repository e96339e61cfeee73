//! Navigation menu shape.

use serde::{Deserialize, Serialize};

/// One entry of the navigation menu. Entries nest through `childs`, forming a tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavItem {
    pub href: String,
    pub name: String,
    pub id: String,
    /// Access-control tag; absent means visible to everyone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub childs: Option<Vec<NavItem>>,
}

impl NavItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            name: name.into(),
            id: id.into(),
            visibility: None,
            childs: None,
        }
    }

    pub fn with_visibility(mut self, visibility: impl Into<String>) -> Self {
        self.visibility = Some(visibility.into());
        self
    }

    pub fn with_childs(mut self, childs: Vec<NavItem>) -> Self {
        self.childs = Some(childs);
        self
    }

    pub fn children(&self) -> &[NavItem] {
        self.childs.as_deref().unwrap_or(&[])
    }

    /// Depth-first, pre-order walk over this item and all descendants.
    pub fn iter(&self) -> NavIter<'_> {
        NavIter { stack: vec![self] }
    }

    pub fn find(&self, id: &str) -> Option<&NavItem> {
        self.iter().find(|item| item.id == id)
    }

    /// Number of levels in the subtree rooted here (a leaf is 1).
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(NavItem::depth).max().unwrap_or(0)
    }

    /// Whether a viewer holding `tag` may see this entry.
    pub fn is_visible_to(&self, tag: Option<&str>) -> bool {
        match (&self.visibility, tag) {
            (None, _) => true,
            (Some(v), Some(t)) => v == t,
            (Some(_), None) => false,
        }
    }

    /// Copy of the subtree without the entries hidden from `tag`.
    pub fn filter_visibility(&self, tag: Option<&str>) -> Option<NavItem> {
        if !self.is_visible_to(tag) {
            return None;
        }
        let childs = self.childs.as_ref().map(|childs| {
            childs
                .iter()
                .filter_map(|child| child.filter_visibility(tag))
                .collect()
        });
        Some(NavItem {
            href: self.href.clone(),
            name: self.name.clone(),
            id: self.id.clone(),
            visibility: self.visibility.clone(),
            childs,
        })
    }
}

/// Iterator returned by [`NavItem::iter`].
pub struct NavIter<'a> {
    stack: Vec<&'a NavItem>,
}

impl<'a> Iterator for NavIter<'a> {
    type Item = &'a NavItem;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.stack.pop()?;
        self.stack.extend(item.children().iter().rev());
        Some(item)
    }
}
