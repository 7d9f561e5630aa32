//! Rule Layout - edge-to-edge rule layout for 2D components
//!
//! Components keep their intrinsic size and are placed by an ordered list of
//! rules, each binding one edge of a component or group to an edge of another
//! plus a pixel offset. The engine talks to the owning toolkit through the
//! [`LayoutHost`] trait; [`scene`] provides a headless host driven by TOML.
//!
//! # Example
//!
//! ```rust
//! use rule_layout::layout_scene;
//!
//! let scene = r#"
//! [container]
//! width = 300
//! height = 300
//!
//! [[component]]
//! id = "a"
//! size = [100, 100]
//!
//! [[component]]
//! id = "b"
//! size = [100, 100]
//!
//! [[rule]]
//! target = "b"
//! edge = "left"
//! anchor = "a"
//! anchor_edge = "right"
//! offset = 5
//! "#;
//!
//! let bounds = layout_scene(scene).unwrap();
//! assert_eq!(bounds, "a 0 0 100 100\nb 105 0 100 100");
//! ```

pub mod layout;
pub mod scene;

pub use layout::{
    Edge, ElasticAnchor, GroupId, LayoutConfig, LayoutError, LayoutHost, Node, Rect, Rule,
    RuleLayout, Size, SizeKind,
};
pub use scene::{Scene, SceneError, SceneHost};

/// Lay out a TOML scene once and return its component bounds, one
/// `id x y width height` line per component
pub fn layout_scene(source: &str) -> Result<String, SceneError> {
    let mut scene = Scene::from_str(source)?;
    scene.run_layout()?;
    Ok(scene.render_bounds())
}
