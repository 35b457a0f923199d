//! Declarative tree descriptions.
//!
//! A [`Blueprint`] is a nested, serializable description of items that a
//! host can keep in configuration and instantiate with [`Tree::build`].
//!
//! ```json
//! {
//!   "name": "root",
//!   "style": { "width": 100, "height": 40, "justify-content": "space-between" },
//!   "children": [
//!     { "name": "a", "style": { "width": 10 } },
//!     { "name": "b", "style": { "width": 10 } }
//!   ]
//! }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    ItemId, Tree,
    error::{Error, Result},
    style::Style,
};

/// A serializable description of an item and its descendants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Blueprint {
    /// Optional name, used to look the built item up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Item style.
    pub style: Style,
    /// Children in insertion order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Blueprint>,
}

impl Blueprint {
    /// A leaf with the given style.
    pub fn new(style: Style) -> Self {
        Self {
            name: None,
            style,
            children: Vec::new(),
        }
    }

    /// Set the name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append a child.
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Parse a blueprint from JSON.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Serialize the blueprint as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of items described, including this one.
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(Self::len).sum::<usize>()
    }

    /// Always false: a blueprint describes at least one item.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Items created by [`Tree::build`].
#[derive(Debug, Clone)]
pub struct Built {
    /// Root of the new subtree. It is detached.
    pub root: ItemId,
    /// Named items.
    pub names: HashMap<String, ItemId>,
}

impl Built {
    /// Look up a named item.
    pub fn get(&self, name: &str) -> Result<ItemId> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| Error::Blueprint(format!("no item named {name:?}")))
    }
}

/// Instantiate a blueprint as a new detached subtree of `tree`.
pub(crate) fn build(tree: &mut Tree, blueprint: &Blueprint) -> Result<Built> {
    let root = tree.new_item(blueprint.style)?;
    let mut names = HashMap::new();
    if let Err(e) = build_into(tree, root, blueprint, &mut names) {
        tree.remove_subtree(root)?;
        return Err(e);
    }
    Ok(Built { root, names })
}

/// Register `id` under the blueprint's name and build its children.
fn build_into(
    tree: &mut Tree,
    id: ItemId,
    blueprint: &Blueprint,
    names: &mut HashMap<String, ItemId>,
) -> Result<()> {
    if let Some(name) = &blueprint.name
        && names.insert(name.clone(), id).is_some()
    {
        return Err(Error::Blueprint(format!("duplicate name {name:?}")));
    }
    for child in &blueprint.children {
        let child_id = tree.new_item(child.style)?;
        tree.add(id, child_id)?;
        build_into(tree, child_id, child, names)?;
    }
    Ok(())
}

/// Describe the subtree at `root` as an unnamed blueprint.
pub(crate) fn describe(tree: &Tree, root: ItemId) -> Result<Blueprint> {
    let mut out = Blueprint::new(*tree.style(root)?);
    for &child in tree.children(root)? {
        out.children.push(describe(tree, child)?);
    }
    Ok(out)
}
