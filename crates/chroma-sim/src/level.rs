//! A playable level: chamber tree, objectives, and spawn point.
//!
//! Levels are built externally (by hand through the tree API, or by the
//! generator crate) and handed to the engine — the core never lays out
//! content itself.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::chamber::ChamberTree;
use crate::objective::Objective;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub number: u32,
    pub name: String,
    pub tree: ChamberTree,
    pub objectives: Vec<Objective>,
    /// Where the orb appears when the level starts.
    pub spawn: DVec2,
}

impl Level {
    /// Wrap a finished tree. The spawn point defaults to the root
    /// chamber's center.
    pub fn new(number: u32, name: &str, tree: ChamberTree) -> Self {
        let spawn = tree.chamber(tree.root()).bounds.center();
        Self {
            number,
            name: name.to_string(),
            tree,
            objectives: Vec::new(),
            spawn,
        }
    }

    pub fn with_spawn(mut self, spawn: DVec2) -> Self {
        self.spawn = spawn;
        self
    }

    pub fn add_objective(&mut self, objective: Objective) {
        self.objectives.push(objective);
    }

    pub fn is_complete(&self) -> bool {
        self.tree.is_complete(self.tree.root())
    }

    pub fn completion_percent(&self) -> f64 {
        self.tree.completion_percent(self.tree.root())
    }
}
