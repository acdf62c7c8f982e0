//! Content scoring.
//!
//! Scores live outside the tree, keyed by `NodeId`, so serialized output can
//! never leak scoring state and a retry starts from a clean slate.

use std::collections::HashMap;

use crate::dom::{self, NodeId, NodeRef};
use crate::patterns;

/// Which relaxation stage the grab loop is in. All flags start on and are
/// dropped one at a time when an attempt comes back too short.
#[derive(Debug, Clone, Copy)]
pub struct Flags {
    /// Prune nodes whose class/id match the unlikely-candidates pattern.
    pub strip_unlikelys: bool,
    /// Apply the ±25 class/id weight during scoring and cleaning.
    pub weight_classes: bool,
    /// Run the "fishy element" conditional cleaning.
    pub clean_conditionally: bool,
}

impl Flags {
    /// All flags active, the starting state of every parse.
    #[must_use]
    pub fn all() -> Self {
        Self {
            strip_unlikelys: true,
            weight_classes: true,
            clean_conditionally: true,
        }
    }

    /// Drop the next flag in relaxation order. Returns `false` when nothing
    /// was left to drop.
    pub fn drop_next(&mut self) -> bool {
        if self.strip_unlikelys {
            self.strip_unlikelys = false;
        } else if self.weight_classes {
            self.weight_classes = false;
        } else if self.clean_conditionally {
            self.clean_conditionally = false;
        } else {
            return false;
        }
        true
    }
}

/// Per-node content scores for one grab attempt.
#[derive(Debug, Default)]
pub struct ScoreMap {
    scores: HashMap<NodeId, f64>,
}

impl ScoreMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the node has been initialized as a candidate.
    #[must_use]
    pub fn is_initialized(&self, id: NodeId) -> bool {
        self.scores.contains_key(&id)
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> f64 {
        self.scores.get(&id).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, id: NodeId, score: f64) {
        self.scores.insert(id, score);
    }

    pub fn add(&mut self, id: NodeId, delta: f64) {
        *self.scores.entry(id).or_insert(0.0) += delta;
    }

    /// Attach a starting score to a node based on its tag name, plus the
    /// class weight when class weighing is active.
    pub fn initialize_node(&mut self, node: &NodeRef, flags: Flags) {
        let mut score = match dom::tag_name(node).as_deref() {
            Some("div") => 5.0,
            Some("pre" | "td" | "blockquote") => 3.0,
            Some("address" | "ol" | "ul" | "dl" | "dd" | "dt" | "li" | "form") => -3.0,
            Some("h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "th") => -5.0,
            _ => 0.0,
        };
        score += get_class_weight(node, flags);
        self.scores.insert(node.id, score);
    }
}

/// An element's class/id weight: ±25 for each of `class` and `id` matching
/// the positive/negative patterns. Zero when class weighing is off.
#[must_use]
pub fn get_class_weight(node: &NodeRef, flags: Flags) -> f64 {
    if !flags.weight_classes {
        return 0.0;
    }

    let mut weight = 0.0;

    let class_name = dom::class_name(node);
    if !class_name.is_empty() {
        if patterns::NEGATIVE.is_match(&class_name) {
            weight -= 25.0;
        }
        if patterns::POSITIVE.is_match(&class_name) {
            weight += 25.0;
        }
    }

    let id = dom::id(node);
    if !id.is_empty() {
        if patterns::NEGATIVE.is_match(&id) {
            weight -= 25.0;
        }
        if patterns::POSITIVE.is_match(&id) {
            weight += 25.0;
        }
    }

    weight
}

/// Base score of a paragraph-like node: one point for existing, one per
/// comma-separated segment, one per 100 chars of text capped at three.
#[must_use]
pub fn paragraph_score(inner_text: &str) -> f64 {
    let mut score = 1.0;
    score += patterns::COMMAS.split(inner_text).count() as f64;
    score += (inner_text.chars().count() as f64 / 100.0).floor().min(3.0);
    score
}

/// Score divider per ancestor level: parent 1, grandparent 2, then level * 3.
#[must_use]
pub fn score_divider(level: usize) -> f64 {
    match level {
        0 => 1.0,
        1 => 2.0,
        level => (level * 3) as f64,
    }
}
