//! The chamber hierarchy — a composite tree of spatial regions.
//!
//! Chambers live in an arena (`Vec`) and reference children by index,
//! keeping recursive queries simple tree walks with no owning pointers.
//! Topology is fixed once a level is built; content mutates through
//! collection and removal. A leaf chamber can never gain children —
//! attempting to is a level-construction bug and is signalled as
//! `ChamberError::LeafChild`.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use chroma_core::error::ChamberError;
use chroma_core::types::Rect;

use crate::objects::{Buff, Essence, Hazard};

/// Index-based chamber handle. Only valid for the tree that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChamberId(pub u32);

impl ChamberId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Leaf chambers hold content only; compound chambers additionally hold
/// an ordered list of child chambers.
#[derive(Debug, Clone, Serialize, Deserialize)]
enum ChamberKind {
    Leaf,
    Compound { children: Vec<ChamberId> },
}

/// A single chamber: a named rectangle owning essences, hazards, and
/// buff pickups directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chamber {
    pub id: ChamberId,
    pub parent: Option<ChamberId>,
    pub name: String,
    pub bounds: Rect,
    pub background: String,
    pub border: String,
    pub essences: Vec<Essence>,
    pub hazards: Vec<Hazard>,
    pub buffs: Vec<Buff>,
    kind: ChamberKind,
}

impl Chamber {
    pub fn is_compound(&self) -> bool {
        matches!(self.kind, ChamberKind::Compound { .. })
    }

    /// Direct children (empty for leaves).
    pub fn children(&self) -> &[ChamberId] {
        match &self.kind {
            ChamberKind::Leaf => &[],
            ChamberKind::Compound { children } => children,
        }
    }

    pub fn contains_point(&self, p: DVec2) -> bool {
        self.bounds.contains_point(p)
    }

    /// Advance the animation of all directly-owned content.
    fn update_content(&mut self, dt: f64) {
        for essence in &mut self.essences {
            if !essence.collected {
                essence.update(dt);
            }
        }
        for hazard in &mut self.hazards {
            hazard.update(dt);
        }
        for buff in &mut self.buffs {
            if !buff.collected {
                buff.update(dt);
            }
        }
    }
}

/// Arena-backed chamber tree with a single root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChamberTree {
    chambers: Vec<Chamber>,
    root: ChamberId,
    next_essence_id: u32,
    next_hazard_id: u32,
    next_buff_id: u32,
}

impl ChamberTree {
    /// Create a tree whose root is a leaf chamber.
    pub fn with_leaf_root(name: &str, bounds: Rect) -> Self {
        Self::with_root(name, bounds, false)
    }

    /// Create a tree whose root is a compound chamber.
    pub fn with_compound_root(name: &str, bounds: Rect) -> Self {
        Self::with_root(name, bounds, true)
    }

    fn with_root(name: &str, bounds: Rect, compound: bool) -> Self {
        let root = Chamber {
            id: ChamberId(0),
            parent: None,
            name: name.to_string(),
            bounds,
            background: if compound { "#0f0f1e" } else { "#1a1a2e" }.to_string(),
            border: if compound { "#6a6a9e" } else { "#4a4a6e" }.to_string(),
            essences: Vec::new(),
            hazards: Vec::new(),
            buffs: Vec::new(),
            kind: if compound {
                ChamberKind::Compound {
                    children: Vec::new(),
                }
            } else {
                ChamberKind::Leaf
            },
        };
        Self {
            chambers: vec![root],
            root: ChamberId(0),
            next_essence_id: 0,
            next_hazard_id: 0,
            next_buff_id: 0,
        }
    }

    pub fn root(&self) -> ChamberId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.chambers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chambers.is_empty()
    }

    pub fn get(&self, id: ChamberId) -> Option<&Chamber> {
        self.chambers.get(id.index())
    }

    /// Direct access by id. Ids are only issued by this tree, so a miss
    /// indicates a cross-tree mixup and panics.
    pub fn chamber(&self, id: ChamberId) -> &Chamber {
        &self.chambers[id.index()]
    }

    pub fn chamber_mut(&mut self, id: ChamberId) -> &mut Chamber {
        &mut self.chambers[id.index()]
    }

    /// Add a leaf chamber under `parent`.
    pub fn add_leaf(
        &mut self,
        parent: ChamberId,
        name: &str,
        bounds: Rect,
    ) -> Result<ChamberId, ChamberError> {
        self.add_child(parent, name, bounds, false)
    }

    /// Add a compound chamber under `parent`.
    pub fn add_compound(
        &mut self,
        parent: ChamberId,
        name: &str,
        bounds: Rect,
    ) -> Result<ChamberId, ChamberError> {
        self.add_child(parent, name, bounds, true)
    }

    fn add_child(
        &mut self,
        parent: ChamberId,
        name: &str,
        bounds: Rect,
        compound: bool,
    ) -> Result<ChamberId, ChamberError> {
        let parent_chamber = self
            .chambers
            .get(parent.index())
            .ok_or(ChamberError::UnknownChamber { id: parent.0 })?;
        if !parent_chamber.is_compound() {
            return Err(ChamberError::LeafChild { id: parent.0 });
        }

        let id = ChamberId(self.chambers.len() as u32);
        self.chambers.push(Chamber {
            id,
            parent: Some(parent),
            name: name.to_string(),
            bounds,
            background: if compound { "#0f0f1e" } else { "#1a1a2e" }.to_string(),
            border: if compound { "#6a6a9e" } else { "#4a4a6e" }.to_string(),
            essences: Vec::new(),
            hazards: Vec::new(),
            buffs: Vec::new(),
            kind: if compound {
                ChamberKind::Compound {
                    children: Vec::new(),
                }
            } else {
                ChamberKind::Leaf
            },
        });
        match &mut self.chambers[parent.index()].kind {
            ChamberKind::Compound { children } => children.push(id),
            ChamberKind::Leaf => unreachable!("parent checked compound above"),
        }
        Ok(id)
    }

    /// Add an essence to a chamber's direct content. Returns the
    /// tree-assigned essence id.
    pub fn add_essence(
        &mut self,
        chamber: ChamberId,
        mut essence: Essence,
    ) -> Result<u32, ChamberError> {
        let target = self
            .chambers
            .get_mut(chamber.index())
            .ok_or(ChamberError::UnknownChamber { id: chamber.0 })?;
        essence.id = self.next_essence_id;
        self.next_essence_id += 1;
        let id = essence.id;
        target.essences.push(essence);
        Ok(id)
    }

    pub fn add_hazard(
        &mut self,
        chamber: ChamberId,
        mut hazard: Hazard,
    ) -> Result<u32, ChamberError> {
        let target = self
            .chambers
            .get_mut(chamber.index())
            .ok_or(ChamberError::UnknownChamber { id: chamber.0 })?;
        hazard.id = self.next_hazard_id;
        self.next_hazard_id += 1;
        let id = hazard.id;
        target.hazards.push(hazard);
        Ok(id)
    }

    pub fn add_buff(&mut self, chamber: ChamberId, mut buff: Buff) -> Result<u32, ChamberError> {
        let target = self
            .chambers
            .get_mut(chamber.index())
            .ok_or(ChamberError::UnknownChamber { id: chamber.0 })?;
        buff.id = self.next_buff_id;
        self.next_buff_id += 1;
        let id = buff.id;
        target.buffs.push(buff);
        Ok(id)
    }

    /// Chamber ids in pre-order from the root (each chamber before its
    /// subtree). This is the canonical scan order for collision passes
    /// and rendering.
    pub fn pre_order(&self) -> Vec<ChamberId> {
        self.subtree(self.root)
    }

    /// Chamber ids in pre-order from an arbitrary chamber.
    pub fn subtree(&self, from: ChamberId) -> Vec<ChamberId> {
        let mut out = Vec::with_capacity(self.chambers.len());
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            out.push(id);
            // Push children reversed so the leftmost child is visited first.
            for &child in self.chamber(id).children().iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Advance all content animation, parents before children.
    pub fn update(&mut self, dt: f64) {
        for id in self.pre_order() {
            self.chambers[id.index()].update_content(dt);
        }
    }

    /// Total essences in the subtree rooted at `from`.
    pub fn total_essences(&self, from: ChamberId) -> u32 {
        self.subtree(from)
            .iter()
            .map(|id| self.chamber(*id).essences.len() as u32)
            .sum()
    }

    /// Uncollected essences in the subtree rooted at `from`.
    pub fn remaining_essences(&self, from: ChamberId) -> u32 {
        self.subtree(from)
            .iter()
            .map(|id| {
                self.chamber(*id)
                    .essences
                    .iter()
                    .filter(|e| !e.collected)
                    .count() as u32
            })
            .sum()
    }

    /// Collected essences in the subtree rooted at `from`.
    pub fn collected_essences(&self, from: ChamberId) -> u32 {
        self.total_essences(from) - self.remaining_essences(from)
    }

    /// A subtree is complete when no uncollected essence remains in it.
    pub fn is_complete(&self, from: ChamberId) -> bool {
        self.remaining_essences(from) == 0
    }

    /// Completion percentage for the subtree. A subtree with no essences
    /// at all counts as fully complete.
    pub fn completion_percent(&self, from: ChamberId) -> f64 {
        let total = self.total_essences(from);
        if total == 0 {
            return 100.0;
        }
        let collected = total - self.remaining_essences(from);
        collected as f64 * 100.0 / total as f64
    }

    /// All essences in the subtree, pre-order (direct content before
    /// child subtrees).
    pub fn all_essences(&self, from: ChamberId) -> Vec<&Essence> {
        self.subtree(from)
            .iter()
            .flat_map(|id| self.chamber(*id).essences.iter())
            .collect()
    }

    pub fn all_hazards(&self, from: ChamberId) -> Vec<&Hazard> {
        self.subtree(from)
            .iter()
            .flat_map(|id| self.chamber(*id).hazards.iter())
            .collect()
    }

    pub fn all_buffs(&self, from: ChamberId) -> Vec<&Buff> {
        self.subtree(from)
            .iter()
            .flat_map(|id| self.chamber(*id).buffs.iter())
            .collect()
    }

    /// Remove an essence by identity. A chamber does not know which
    /// descendant owns an item, so removal is attempted at every level
    /// of the subtree. Returns whether anything was removed.
    pub fn remove_essence(&mut self, from: ChamberId, essence_id: u32) -> bool {
        let mut removed = false;
        for id in self.subtree(from) {
            let chamber = &mut self.chambers[id.index()];
            let before = chamber.essences.len();
            chamber.essences.retain(|e| e.id != essence_id);
            removed |= chamber.essences.len() != before;
        }
        removed
    }

    /// Remove a buff pickup by identity, attempted at every level of the
    /// subtree.
    pub fn remove_buff(&mut self, from: ChamberId, buff_id: u32) -> bool {
        let mut removed = false;
        for id in self.subtree(from) {
            let chamber = &mut self.chambers[id.index()];
            let before = chamber.buffs.len();
            chamber.buffs.retain(|b| b.id != buff_id);
            removed |= chamber.buffs.len() != before;
        }
        removed
    }

    /// The deepest chamber whose rectangle contains the point, walking
    /// from the root. `None` when the point is outside the root.
    pub fn deepest_chamber_at(&self, p: DVec2) -> Option<ChamberId> {
        if !self.chamber(self.root).contains_point(p) {
            return None;
        }
        let mut current = self.root;
        'descend: loop {
            for &child in self.chamber(current).children() {
                if self.chamber(child).contains_point(p) {
                    current = child;
                    continue 'descend;
                }
            }
            return Some(current);
        }
    }
}
