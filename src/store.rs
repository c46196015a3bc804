// File: src/store.rs
use crate::context::SharedContext;
use crate::model::{ItemStatus, PlanItem};
use crate::storage::LocalStorage;
use anyhow::Result;
use std::collections::HashSet;

/// In-memory planning board. Every mutation persists the whole
/// collection through `LocalStorage` before returning; the on-disk file
/// is the source of truth across sessions.
pub struct PlannerStore {
    ctx: SharedContext,
    pub items: Vec<PlanItem>,
}

impl PlannerStore {
    /// Loads the board from disk. A missing file is an empty board; a
    /// failing load is an error the caller must surface (saves stay
    /// blocked until a load succeeds).
    pub fn open(ctx: SharedContext) -> Result<Self> {
        let items = LocalStorage::load(ctx.as_ref())?;
        Ok(Self { ctx, items })
    }

    pub fn persist(&self) -> Result<()> {
        LocalStorage::save(self.ctx.as_ref(), &self.items)
    }

    pub fn get(&self, id: &str) -> Option<&PlanItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn add(&mut self, item: PlanItem) -> Result<()> {
        self.items.push(item);
        self.persist()
    }

    /// Replaces the item with the same id, or appends it if missing.
    pub fn update(&mut self, mut item: PlanItem) -> Result<()> {
        item.touch();
        if let Some(idx) = self.items.iter().position(|i| i.id == item.id) {
            self.items[idx] = item;
        } else {
            self.items.push(item);
        }
        self.persist()
    }

    /// Removes an item. Its children are re-parented to the removed
    /// item's parent so nothing silently disappears from the board.
    pub fn remove(&mut self, id: &str) -> Result<Option<PlanItem>> {
        let Some(idx) = self.items.iter().position(|i| i.id == id) else {
            return Ok(None);
        };
        let removed = self.items.remove(idx);
        for child in self.items.iter_mut().filter(|i| i.parent_id.as_deref() == Some(id)) {
            child.parent_id = removed.parent_id.clone();
            child.touch();
        }
        self.persist()?;
        Ok(Some(removed))
    }

    pub fn set_status(&mut self, id: &str, status: ItemStatus) -> Result<Option<PlanItem>> {
        let updated = if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.status = status;
            item.touch();
            Some(item.clone())
        } else {
            None
        };
        if updated.is_some() {
            self.persist()?;
        }
        Ok(updated)
    }

    /// Advances an item to the next production stage, wrapping around.
    pub fn cycle_status(&mut self, id: &str) -> Result<Option<PlanItem>> {
        let next = self.get(id).map(|i| i.status.next());
        match next {
            Some(status) => self.set_status(id, status),
            None => Ok(None),
        }
    }

    /// Replaces the whole collection (import). Persists once.
    pub fn replace_all(&mut self, items: Vec<PlanItem>) -> Result<()> {
        self.items = items;
        self.persist()
    }

    // --- HIERARCHY ---

    pub fn roots(&self) -> Vec<&PlanItem> {
        self.items
            .iter()
            .filter(|i| match &i.parent_id {
                None => true,
                // An orphaned parent reference renders at the root rather
                // than vanishing.
                Some(pid) => self.get(pid).is_none(),
            })
            .collect()
    }

    pub fn children(&self, id: &str) -> Vec<&PlanItem> {
        self.items
            .iter()
            .filter(|i| i.parent_id.as_deref() == Some(id))
            .collect()
    }

    /// Depth-first flattening of the board for the collapsible list view.
    /// Children of ids in `collapsed` are skipped. Insertion order is
    /// preserved among siblings.
    pub fn tree(&self, collapsed: &HashSet<String>) -> Vec<(usize, &PlanItem)> {
        let mut out = Vec::new();
        let mut visited = HashSet::new();
        for root in self.roots() {
            self.descend(root, 0, collapsed, &mut visited, &mut out);
        }
        out
    }

    fn descend<'a>(
        &'a self,
        item: &'a PlanItem,
        depth: usize,
        collapsed: &HashSet<String>,
        visited: &mut HashSet<String>,
        out: &mut Vec<(usize, &'a PlanItem)>,
    ) {
        // Guards against parent cycles smuggled in via import.
        if !visited.insert(item.id.clone()) {
            return;
        }
        out.push((depth, item));
        if collapsed.contains(&item.id) {
            return;
        }
        for child in self.children(&item.id) {
            self.descend(child, depth + 1, collapsed, visited, out);
        }
    }
}
