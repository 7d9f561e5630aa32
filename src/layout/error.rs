//! Error types for the layout engine

use thiserror::Error;

use super::rule::GroupId;
use super::types::Edge;

/// Errors that can occur during rule evaluation
#[derive(Debug, Error)]
pub enum LayoutError {
    /// An engine was asked to lay out a container other than the one it was created for
    #[error("layout bound to container {bound} cannot be used for container {found}")]
    BindingViolation { bound: String, found: String },

    /// Edge that has no meaning for the node it is applied to
    #[error("edge '{edge}' is not supported on {context}")]
    UnsupportedEdge { edge: Edge, context: String },

    /// Group id that was not created by this engine
    #[error("unknown group #{}", .0.index())]
    UnknownGroup(GroupId),

    /// Adding the member would make a group contain itself
    #[error("group #{} cannot contain group #{}: groups would nest cyclically", .group.index(), .member.index())]
    GroupCycle { group: GroupId, member: GroupId },
}

impl LayoutError {
    /// Create a binding violation error from the two container handles
    pub fn binding_violation(bound: impl std::fmt::Debug, found: impl std::fmt::Debug) -> Self {
        Self::BindingViolation {
            bound: format!("{:?}", bound),
            found: format!("{:?}", found),
        }
    }

    /// Create an unsupported edge error
    pub fn unsupported_edge(edge: Edge, context: impl Into<String>) -> Self {
        Self::UnsupportedEdge {
            edge,
            context: context.into(),
        }
    }

    /// Create a group cycle error
    pub fn group_cycle(group: GroupId, member: GroupId) -> Self {
        Self::GroupCycle { group, member }
    }
}
