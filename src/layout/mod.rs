//! Rule-based layout engine
//!
//! Components keep their intrinsic size and are positioned by an ordered list
//! of edge-to-edge [`Rule`]s evaluated against a [`LayoutHost`]. Groups act as
//! a single movable box around their members.

pub mod config;
pub mod elastic;
pub mod engine;
pub mod error;
mod group;
pub mod host;
pub mod lint;
pub mod rule;
pub mod types;

pub use config::LayoutConfig;
pub use elastic::ElasticAnchor;
pub use engine::RuleLayout;
pub use error::LayoutError;
pub use host::{LayoutHost, SizeKind};
pub use lint::{LintCategory, LintWarning};
pub use rule::{GroupId, Handle, Node, Rule};
pub use types::*;
