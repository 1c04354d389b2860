//! Widget registry
//!
//! Widgets are identified by generational [`WidgetId`]s. Removing a widget
//! invalidates its id, so a stale id resolves to `None` instead of dangling.
//! The registry also keeps parent/child membership, which is all the layout
//! the chrome needs: a child attached to a box fills the box's content area.

use crate::chrome::button::ButtonKind;
use crate::chrome::state::WindowState;
use crate::renderer::Color;
use crate::utils::error::{ChromeError, Result};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Weak handle to a widget
    pub struct WidgetId;
}

/// What a widget is
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    /// A top-level window
    Window { state: WindowState },
    /// A box that lays out its children
    Container,
    Label,
    Button(ButtonKind),
    /// Application content hosted by a window
    Content,
}

/// How a widget takes up space inside its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizePolicy {
    #[default]
    Fixed,
    Preferred,
    /// Grow to fill every pixel the parent offers
    Expanding,
}

#[derive(Debug, Clone)]
pub struct WidgetRecord {
    pub name: String,
    pub kind: WidgetKind,
    pub visible: bool,
    pub parent: Option<WidgetId>,
    pub children: Vec<WidgetId>,
    pub size_policy: SizePolicy,
    pub background: Option<Color>,
}

impl WidgetRecord {
    pub fn new(name: impl Into<String>, kind: WidgetKind) -> Self {
        Self {
            name: name.into(),
            kind,
            visible: true,
            parent: None,
            children: Vec::new(),
            size_policy: SizePolicy::default(),
            background: None,
        }
    }

    /// A content widget, optionally filled with a background color
    pub fn content(name: impl Into<String>, background: Option<Color>) -> Self {
        Self {
            background,
            ..Self::new(name, WidgetKind::Content)
        }
    }
}

/// Owner of every widget record
#[derive(Debug, Default)]
pub struct WidgetRegistry {
    widgets: SlotMap<WidgetId, WidgetRecord>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: WidgetRecord) -> WidgetId {
        self.widgets.insert(record)
    }

    /// Remove a widget and its descendants
    pub fn remove(&mut self, id: WidgetId) -> Option<WidgetRecord> {
        self.detach(id);
        let record = self.widgets.remove(id)?;
        for child in &record.children {
            self.remove_subtree(*child);
        }
        Some(record)
    }

    fn remove_subtree(&mut self, id: WidgetId) {
        if let Some(record) = self.widgets.remove(id) {
            for child in record.children {
                self.remove_subtree(child);
            }
        }
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(id)
    }

    pub fn get(&self, id: WidgetId) -> Option<&WidgetRecord> {
        self.widgets.get(id)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut WidgetRecord> {
        self.widgets.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Show or hide a widget; stale ids are ignored
    pub fn set_visible(&mut self, id: WidgetId, visible: bool) {
        if let Some(record) = self.widgets.get_mut(id) {
            record.visible = visible;
        }
    }

    pub fn is_visible(&self, id: WidgetId) -> bool {
        self.widgets.get(id).is_some_and(|record| record.visible)
    }

    pub fn set_size_policy(&mut self, id: WidgetId, policy: SizePolicy) {
        if let Some(record) = self.widgets.get_mut(id) {
            record.size_policy = policy;
        }
    }

    /// Append `child` to `parent`'s layout.
    ///
    /// A child already attached to `parent` is left where it is. A child
    /// attached elsewhere is moved.
    pub fn attach(&mut self, parent: WidgetId, child: WidgetId) -> Result<()> {
        if parent == child {
            return Err(ChromeError::InvalidInput("A widget cannot contain itself".to_string()));
        }
        if !self.contains(parent) || !self.contains(child) {
            return Err(ChromeError::InvalidInput("Stale widget id".to_string()));
        }
        if self.parent(child) == Some(parent) {
            return Ok(());
        }

        self.detach(child);
        if let Some(record) = self.widgets.get_mut(parent) {
            record.children.push(child);
        }
        if let Some(record) = self.widgets.get_mut(child) {
            record.parent = Some(parent);
        }
        Ok(())
    }

    /// Remove `child` from its parent's layout; returns whether it was attached
    pub fn detach(&mut self, child: WidgetId) -> bool {
        let Some(parent) = self.parent(child) else {
            return false;
        };
        if let Some(record) = self.widgets.get_mut(parent) {
            record.children.retain(|id| *id != child);
        }
        if let Some(record) = self.widgets.get_mut(child) {
            record.parent = None;
        }
        true
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.widgets.get(id).and_then(|record| record.parent)
    }

    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.widgets.get(id).map_or(&[], |record| record.children.as_slice())
    }

    /// State of a window widget; `None` for stale ids and non-windows
    pub fn window_state(&self, id: WidgetId) -> Option<WindowState> {
        match self.widgets.get(id)?.kind {
            WidgetKind::Window { state } => Some(state),
            _ => None,
        }
    }

    pub fn set_window_state(&mut self, id: WidgetId, new_state: WindowState) {
        if let Some(WidgetRecord {
            kind: WidgetKind::Window { state },
            ..
        }) = self.widgets.get_mut(id)
        {
            *state = new_state;
        }
    }
}
