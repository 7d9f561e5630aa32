//! Headless scenes for running the engine without a GUI toolkit
//!
//! A scene file describes a container, its components and their intrinsic
//! sizes, groups, rules and elastic anchors in TOML:
//!
//! ```toml
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
//! ```
//!
//! `parent` names the container in rules.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::layout::{
    Edge, ElasticAnchor, Insets, LayoutConfig, LayoutError, LayoutHost, LintWarning, Node, Rect, Rule,
    RuleLayout, Size, SizeKind,
};

/// Reserved id for the container in scene files
pub const PARENT_ID: &str = "parent";

/// Errors that can occur when loading or running a scene
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to read scene file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse scene TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("id '{0}' is defined more than once")]
    DuplicateId(String),
    #[error("unknown id '{name}'{}", format_suggestions(.suggestions))]
    UnknownId {
        name: String,
        suggestions: Vec<String>,
    },
    #[error("'{0}' is a group and cannot have an elastic anchor")]
    ElasticGroup(String),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean {}?)", suggestions.join(", "))
    }
}

/// Handle of a node in a [`SceneHost`]: the container or one component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey(usize);

impl NodeKey {
    pub const CONTAINER: NodeKey = NodeKey(0);

    fn component(index: usize) -> Self {
        NodeKey(index + 1)
    }

    fn index(self) -> Option<usize> {
        self.0.checked_sub(1)
    }
}

/// A component of a headless scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneComponent {
    pub id: String,
    pub minimum: Size,
    pub preferred: Size,
    pub maximum: Size,
    /// Baseline distance from the top; -1 when the component has none
    pub baseline: i32,
    /// Bounds as last committed by the engine
    pub bounds: Rect,
}

/// In-memory host holding a container and its components
#[derive(Debug, Clone, Default)]
pub struct SceneHost {
    container: Size,
    components: Vec<SceneComponent>,
}

impl SceneHost {
    pub fn new(container: Size) -> Self {
        Self {
            container,
            components: Vec::new(),
        }
    }

    /// Add a component whose minimum, preferred and maximum sizes are all `size`
    pub fn add(&mut self, id: impl Into<String>, size: Size) -> NodeKey {
        self.push(SceneComponent {
            id: id.into(),
            minimum: size,
            preferred: size,
            maximum: size,
            baseline: -1,
            bounds: Rect::zero(),
        })
    }

    pub fn push(&mut self, component: SceneComponent) -> NodeKey {
        self.components.push(component);
        NodeKey::component(self.components.len() - 1)
    }

    pub fn container_size(&self) -> Size {
        self.container
    }

    pub fn resize(&mut self, size: Size) {
        self.container = size;
    }

    pub fn components(&self) -> &[SceneComponent] {
        &self.components
    }

    pub fn component(&self, key: NodeKey) -> Option<&SceneComponent> {
        key.index().and_then(|index| self.components.get(index))
    }

    fn component_mut(&mut self, key: NodeKey) -> Option<&mut SceneComponent> {
        key.index().and_then(move |index| self.components.get_mut(index))
    }

    /// Look up a component by id
    pub fn key(&self, id: &str) -> Option<NodeKey> {
        self.components
            .iter()
            .position(|c| c.id == id)
            .map(NodeKey::component)
    }

    /// Committed bounds of a component by id
    pub fn bounds(&self, id: &str) -> Option<Rect> {
        self.key(id)
            .and_then(|key| self.component(key))
            .map(|c| c.bounds)
    }
}

impl LayoutHost for SceneHost {
    type Handle = NodeKey;

    fn rect(&self, handle: NodeKey) -> Rect {
        if handle == NodeKey::CONTAINER {
            return Rect::from_size(self.container);
        }
        self.component(handle).map(|c| c.bounds).unwrap_or_default()
    }

    fn set_rect(&mut self, handle: NodeKey, rect: Rect) {
        if let Some(component) = self.component_mut(handle) {
            component.bounds = rect;
        }
    }

    fn baseline(&self, handle: NodeKey, _width: i32, _height: i32) -> i32 {
        self.component(handle).map(|c| c.baseline).unwrap_or(-1)
    }

    fn children(&self, container: NodeKey) -> Vec<NodeKey> {
        if container != NodeKey::CONTAINER {
            return Vec::new();
        }
        (0..self.components.len()).map(NodeKey::component).collect()
    }

    fn minimum_size(&self, handle: NodeKey) -> Size {
        self.component(handle).map(|c| c.minimum).unwrap_or_default()
    }

    fn preferred_size(&self, handle: NodeKey) -> Size {
        self.component(handle).map(|c| c.preferred).unwrap_or_default()
    }

    fn maximum_size(&self, handle: NodeKey) -> Size {
        self.component(handle).map(|c| c.maximum).unwrap_or_default()
    }

    fn name(&self, handle: NodeKey) -> String {
        match self.component(handle) {
            Some(component) => component.id.clone(),
            None => PARENT_ID.to_string(),
        }
    }

    fn set_preferred_size(&mut self, handle: NodeKey, size: Size) {
        if let Some(component) = self.component_mut(handle) {
            component.preferred = size;
        }
    }

    fn set_minimum_size(&mut self, handle: NodeKey, size: Size) {
        if let Some(component) = self.component_mut(handle) {
            component.minimum = size;
        }
    }
}

/// TOML structure for deserializing scenes
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlScene {
    container: TomlContainer,
    #[serde(default)]
    margin: TomlMargin,
    #[serde(default)]
    diagnostics: bool,
    #[serde(default, rename = "component")]
    components: Vec<TomlComponent>,
    #[serde(default, rename = "group")]
    groups: Vec<TomlGroup>,
    #[serde(default, rename = "rule")]
    rules: Vec<TomlRule>,
    #[serde(default, rename = "elastic")]
    elastic: Vec<TomlElastic>,
}

#[derive(Deserialize)]
struct TomlContainer {
    width: i32,
    height: i32,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct TomlMargin {
    top: i32,
    left: i32,
    bottom: i32,
    right: i32,
}

#[derive(Deserialize)]
struct TomlComponent {
    id: String,
    size: (i32, i32),
    minimum: Option<(i32, i32)>,
    maximum: Option<(i32, i32)>,
    baseline: Option<i32>,
}

#[derive(Deserialize)]
struct TomlGroup {
    id: String,
    #[serde(default)]
    members: Vec<String>,
}

#[derive(Deserialize)]
struct TomlRule {
    target: String,
    edge: Edge,
    anchor: String,
    anchor_edge: Option<Edge>,
    #[serde(default)]
    offset: i32,
}

#[derive(Deserialize)]
struct TomlElastic {
    component: String,
    left: Option<f32>,
    top: Option<f32>,
    right: Option<f32>,
    bottom: Option<f32>,
}

fn to_size((width, height): (i32, i32)) -> Size {
    Size::new(width, height)
}

/// A scene: host plus an engine configured from the same file
#[derive(Debug)]
pub struct Scene {
    pub host: SceneHost,
    pub layout: RuleLayout<NodeKey>,
    ids: HashMap<String, Node<NodeKey>>,
}

impl Scene {
    /// Load a scene from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a scene from a TOML string
    pub fn from_str(content: &str) -> Result<Self, SceneError> {
        let parsed: TomlScene = toml::from_str(content)?;

        let margin = Insets::new(
            parsed.margin.top,
            parsed.margin.left,
            parsed.margin.bottom,
            parsed.margin.right,
        );
        let config = LayoutConfig::new()
            .with_margin(margin)
            .with_diagnostics(parsed.diagnostics);

        let mut host = SceneHost::new(Size::new(parsed.container.width, parsed.container.height));
        let mut layout = RuleLayout::with_config(NodeKey::CONTAINER, config);
        let mut ids = HashMap::new();
        ids.insert(PARENT_ID.to_string(), Node::Component(NodeKey::CONTAINER));

        for component in parsed.components {
            if ids.contains_key(&component.id) {
                return Err(SceneError::DuplicateId(component.id));
            }
            let preferred = to_size(component.size);
            let key = host.push(SceneComponent {
                id: component.id.clone(),
                minimum: component.minimum.map(to_size).unwrap_or(preferred),
                preferred,
                maximum: component.maximum.map(to_size).unwrap_or(preferred),
                baseline: component.baseline.unwrap_or(-1),
                bounds: Rect::zero(),
            });
            ids.insert(component.id, Node::Component(key));
        }

        for group in &parsed.groups {
            if ids.contains_key(&group.id) {
                return Err(SceneError::DuplicateId(group.id.clone()));
            }
            let id = layout.create_group();
            ids.insert(group.id.clone(), Node::Group(id));
        }
        for group in &parsed.groups {
            let Some(Node::Group(id)) = ids.get(&group.id).copied() else {
                continue;
            };
            for member in &group.members {
                let node = lookup(&ids, member)?;
                layout.add_to_group(id, node)?;
            }
        }

        let mut rules = Vec::with_capacity(parsed.rules.len());
        for rule in &parsed.rules {
            rules.push(Rule::new(
                rule.anchor_edge.unwrap_or(rule.edge),
                lookup(&ids, &rule.anchor)?,
                rule.offset,
                rule.edge,
                lookup(&ids, &rule.target)?,
            ));
        }
        layout.add_rule(rules)?;

        for elastic in &parsed.elastic {
            let Node::Component(key) = lookup(&ids, &elastic.component)? else {
                return Err(SceneError::ElasticGroup(elastic.component.clone()));
            };
            let anchor = ElasticAnchor {
                left: elastic.left,
                top: elastic.top,
                right: elastic.right,
                bottom: elastic.bottom,
            };
            layout.set_elastic_anchor(key, anchor);
        }

        Ok(Scene { host, layout, ids })
    }

    /// Node registered under `id` (components, groups, or `parent`)
    pub fn node(&self, id: &str) -> Option<Node<NodeKey>> {
        self.ids.get(id).copied()
    }

    /// Lay out the container at its current size
    pub fn run_layout(&mut self) -> Result<(), SceneError> {
        self.layout.layout(&mut self.host, NodeKey::CONTAINER)?;
        Ok(())
    }

    /// Resize the container and lay it out again
    pub fn resize(&mut self, size: Size) -> Result<(), SceneError> {
        self.host.resize(size);
        self.run_layout()
    }

    pub fn measure(&mut self, kind: SizeKind) -> Result<Size, SceneError> {
        Ok(self.layout.measure(&self.host, NodeKey::CONTAINER, kind)?)
    }

    pub fn lint(&self) -> Vec<LintWarning> {
        self.layout.diagnose(&self.host)
    }

    /// One `id x y width height` line per component, in declaration order
    pub fn render_bounds(&self) -> String {
        self.host
            .components()
            .iter()
            .map(|c| format!("{} {}", c.id, c.bounds))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn lookup(ids: &HashMap<String, Node<NodeKey>>, name: &str) -> Result<Node<NodeKey>, SceneError> {
    ids.get(name).copied().ok_or_else(|| SceneError::UnknownId {
        name: name.to_string(),
        suggestions: find_similar(ids.keys().map(String::as_str), name, 2),
    })
}

/// Compute Levenshtein edit distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];
    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Find similar identifiers within a maximum edit distance
fn find_similar<'a>(
    defined: impl Iterator<Item = &'a str>,
    target: &str,
    max_distance: usize,
) -> Vec<String> {
    let mut candidates: Vec<(&str, usize)> = defined
        .filter_map(|name| {
            let dist = levenshtein_distance(name, target);
            (dist <= max_distance && dist > 0).then_some((name, dist))
        })
        .collect();

    candidates.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
    candidates
        .into_iter()
        .map(|(name, _)| name.to_string())
        .take(3)
        .collect()
}
