//! Placement rules and the nodes they connect

use std::fmt::Debug;
use std::hash::Hash;

use super::types::Edge;

/// Identity of a host component.
///
/// The engine never owns components; it only keys geometry by handle.
pub trait Handle: Copy + Eq + Hash + Debug {}

impl<T: Copy + Eq + Hash + Debug> Handle for T {}

/// Identifier of a group created by [`RuleLayout::create_group`](super::RuleLayout::create_group)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub(crate) usize);

impl GroupId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Something a rule can read from or write to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Node<H> {
    Component(H),
    Group(GroupId),
}

impl<H> From<GroupId> for Node<H> {
    fn from(id: GroupId) -> Self {
        Node::Group(id)
    }
}

/// Places `target_edge` of `target` at `anchor_edge` of `anchor` plus `offset` pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule<H> {
    pub anchor_edge: Edge,
    pub anchor: Node<H>,
    pub offset: i32,
    pub target_edge: Edge,
    pub target: Node<H>,
}

impl<H: Handle> Rule<H> {
    pub fn new(
        anchor_edge: Edge,
        anchor: Node<H>,
        offset: i32,
        target_edge: Edge,
        target: Node<H>,
    ) -> Self {
        Self {
            anchor_edge,
            anchor,
            offset,
            target_edge,
            target,
        }
    }

    /// Rule between two components
    pub fn between(target: H, target_edge: Edge, anchor: H, anchor_edge: Edge, offset: i32) -> Self {
        Self::new(
            anchor_edge,
            Node::Component(anchor),
            offset,
            target_edge,
            Node::Component(target),
        )
    }
}

/// Resolved endpoint of a rule: an arena slot or a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Slot {
    Leaf(usize),
    Group(GroupId),
}

/// A rule whose endpoints have been resolved to slots at registration
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResolvedRule {
    pub anchor_edge: Edge,
    pub anchor: Slot,
    pub offset: i32,
    pub target_edge: Edge,
    pub target: Slot,
}
