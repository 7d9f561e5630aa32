//! Diagnostic pass for rule lists.
//!
//! Evaluation never fails on ordering mistakes: a rule that reads an anchor
//! nobody has placed yet just sees the anchor's reset rect. This pass walks
//! the rule list in evaluation order and reports those spots without
//! changing any semantics.

use std::collections::{HashMap, HashSet};
use std::fmt;

use super::engine::{RuleLayout, CONTAINER_SLOT};
use super::host::LayoutHost;
use super::rule::{Handle, Slot};
use super::types::{Axis, Edge};

/// A lint warning about a rule list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintWarning {
    pub category: LintCategory,
    pub message: String,
}

/// Category of lint finding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    /// Anchor read on an axis no earlier rule wrote
    Unresolved,
    /// Anchor read before the later rule that places it
    Forward,
    /// Same target edge written by more than one rule
    Override,
    /// Child that no rule targets
    Unplaced,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::Unresolved => write!(f, "unresolved"),
            LintCategory::Forward => write!(f, "forward"),
            LintCategory::Override => write!(f, "override"),
            LintCategory::Unplaced => write!(f, "unplaced"),
        }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.message)
    }
}

/// Run all lint checks against the engine's rules and the host's current children.
pub fn check<C>(engine: &RuleLayout<C::Handle>, host: &C) -> Vec<LintWarning>
where
    C: LayoutHost + ?Sized,
{
    let children = host.children(engine.container());
    check_rules(engine, &children, &|handle| host.name(handle))
}

/// Component names come from `name`; the container is always `parent`.
pub(crate) fn check_rules<H: Handle>(
    engine: &RuleLayout<H>,
    children: &[H],
    name: &dyn Fn(H) -> String,
) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    check_anchors(engine, name, &mut warnings);
    check_overrides(engine, name, &mut warnings);
    check_unplaced(engine, children, name, &mut warnings);
    warnings
}

fn describe<H: Handle>(engine: &RuleLayout<H>, slot: Slot, name: &dyn Fn(H) -> String) -> String {
    match slot {
        Slot::Leaf(CONTAINER_SLOT) => "parent".to_string(),
        Slot::Leaf(index) => name(engine.handle_at(index)),
        Slot::Group(id) => format!("group #{}", id.index()),
    }
}

fn leaves<H: Handle>(engine: &RuleLayout<H>, slot: Slot) -> Vec<usize> {
    match slot {
        Slot::Leaf(index) => vec![index],
        Slot::Group(id) => engine.group_table().leaves(id),
    }
}

// ── Anchors read before they are placed ───────────────────────────

fn check_anchors<H: Handle>(
    engine: &RuleLayout<H>,
    name: &dyn Fn(H) -> String,
    warnings: &mut Vec<LintWarning>,
) {
    let rules = engine.resolved_rules();
    let mut written: HashSet<(usize, Axis)> = HashSet::new();

    for (index, rule) in rules.iter().enumerate() {
        let anchor_leaves = leaves(engine, rule.anchor);
        let axis = rule.anchor_edge.axis();
        let reads_position = !rule.anchor_edge.is_dimension();
        let settled = anchor_leaves.is_empty()
            || anchor_leaves.contains(&CONTAINER_SLOT)
            || anchor_leaves.iter().any(|leaf| written.contains(&(*leaf, axis)));

        if reads_position && !settled {
            let placed_later = rules[index + 1..].iter().position(|later| {
                later.target_edge.axis() == axis
                    && leaves(engine, later.target)
                        .iter()
                        .any(|leaf| anchor_leaves.contains(leaf))
            });
            let anchor = format!("{}.{}", describe(engine, rule.anchor, name), rule.anchor_edge);
            match placed_later {
                Some(offset) => warnings.push(LintWarning {
                    category: LintCategory::Forward,
                    message: format!(
                        "rule #{} reads {} before rule #{} places it",
                        index + 1,
                        anchor,
                        index + offset + 2
                    ),
                }),
                None => warnings.push(LintWarning {
                    category: LintCategory::Unresolved,
                    message: format!(
                        "rule #{} reads {} which no earlier rule places; it stays at its reset position",
                        index + 1,
                        anchor
                    ),
                }),
            }
        }

        let target_axis = rule.target_edge.axis();
        for leaf in leaves(engine, rule.target) {
            written.insert((leaf, target_axis));
        }
    }
}

// ── Target edges written more than once ───────────────────────────

fn check_overrides<H: Handle>(
    engine: &RuleLayout<H>,
    name: &dyn Fn(H) -> String,
    warnings: &mut Vec<LintWarning>,
) {
    let mut first_writer: HashMap<(Slot, Edge), usize> = HashMap::new();
    for (index, rule) in engine.resolved_rules().iter().enumerate() {
        let key = (rule.target, rule.target_edge);
        match first_writer.get(&key) {
            Some(first) => warnings.push(LintWarning {
                category: LintCategory::Override,
                message: format!(
                    "rule #{} overrides {}.{} already set by rule #{}",
                    index + 1,
                    describe(engine, rule.target, name),
                    rule.target_edge,
                    first + 1
                ),
            }),
            None => {
                first_writer.insert(key, index);
            }
        }
    }
}

// ── Children no rule places ───────────────────────────────────────

fn check_unplaced<H: Handle>(
    engine: &RuleLayout<H>,
    children: &[H],
    name: &dyn Fn(H) -> String,
    warnings: &mut Vec<LintWarning>,
) {
    let targeted: HashSet<usize> = engine
        .resolved_rules()
        .iter()
        .flat_map(|rule| leaves(engine, rule.target))
        .collect();

    for child in children {
        let placed = engine
            .slot_of(*child)
            .is_some_and(|slot| targeted.contains(&slot));
        if !placed {
            warnings.push(LintWarning {
                category: LintCategory::Unplaced,
                message: format!(
                    "{} is not targeted by any rule and stays at the origin",
                    name(*child)
                ),
            });
        }
    }
}
