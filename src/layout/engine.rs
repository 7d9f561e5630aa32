//! Rule evaluation engine
//!
//! A [`RuleLayout`] is bound to one container. Every measurement or layout
//! call runs a full pass:
//!
//! 1. **Reset**: every child of the container gets a rect at the origin sized
//!    to the intrinsic size of the pass (minimum, preferred or maximum), and
//!    the container's own rect becomes its size minus margins
//! 2. **Evaluate**: rules run once each, in insertion order, reading the
//!    anchor edge and writing `anchor + offset` onto the target edge
//! 3. **Aggregate** (measurement): the furthest right/bottom child edge plus margins
//! 4. **Commit** (layout): elastic anchors are applied and each child rect is
//!    pushed to the host, shifted by the left/top margin
//!
//! There is no cycle detection or reordering. A rule whose anchor has not been
//! placed by an earlier rule reads the anchor's reset rect. The optional
//! diagnostic pass in [`lint`](super::lint) reports such rules.

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use super::config::LayoutConfig;
use super::elastic::{ElasticAnchor, ElasticBinder};
use super::error::LayoutError;
use super::group::GroupTable;
use super::host::{LayoutHost, SizeKind};
use super::lint::{self, LintWarning};
use super::rule::{GroupId, Handle, Node, ResolvedRule, Rule, Slot};
use super::types::{Axis, Edge, Insets, Rect, Size};

/// Arena slot of the bound container
pub(crate) const CONTAINER_SLOT: usize = 0;

#[derive(Debug, Clone, Copy)]
struct Measurement {
    container: Size,
    size: Size,
}

/// Rule-based layout for the children of one container
#[derive(Debug)]
pub struct RuleLayout<H: Handle> {
    container: H,
    config: LayoutConfig,
    /// Arena: handle and rect per slot, slot 0 is the container
    handles: Vec<H>,
    rects: Vec<Rect>,
    slots: HashMap<H, usize>,
    /// Slots of the container's children in the last pass, in host order
    children: Vec<usize>,
    rules: Vec<ResolvedRule>,
    groups: GroupTable,
    elastic: ElasticBinder,
    measured: HashMap<SizeKind, Measurement>,
    diagnosed: bool,
}

impl<H: Handle> RuleLayout<H> {
    /// Create an engine bound to `container`
    pub fn new(container: H) -> Self {
        Self::with_config(container, LayoutConfig::default())
    }

    pub fn with_config(container: H, config: LayoutConfig) -> Self {
        let mut slots = HashMap::new();
        slots.insert(container, CONTAINER_SLOT);
        Self {
            container,
            config,
            handles: vec![container],
            rects: vec![Rect::zero()],
            slots,
            children: Vec::new(),
            rules: Vec::new(),
            groups: GroupTable::default(),
            elastic: ElasticBinder::default(),
            measured: HashMap::new(),
            diagnosed: false,
        }
    }

    /// The container this engine is bound to
    pub fn container(&self) -> H {
        self.container
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn margin(&self) -> Insets {
        self.config.margin
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Register a new, empty group
    pub fn create_group(&mut self) -> GroupId {
        self.changed();
        self.groups.create()
    }

    /// Append a component or a nested group to `group`
    pub fn add_to_group(&mut self, group: GroupId, member: Node<H>) -> Result<(), LayoutError> {
        let slot = self.resolve(member)?;
        self.groups.add_member(group, slot)?;
        self.changed();
        Ok(())
    }

    /// Append rules to the end of the evaluation order.
    ///
    /// Either every rule is added or, if one names an unknown group, none is.
    pub fn add_rule(&mut self, rules: impl IntoIterator<Item = Rule<H>>) -> Result<(), LayoutError> {
        let mut resolved = Vec::new();
        for rule in rules {
            resolved.push(ResolvedRule {
                anchor_edge: rule.anchor_edge,
                anchor: self.resolve(rule.anchor)?,
                offset: rule.offset,
                target_edge: rule.target_edge,
                target: self.resolve(rule.target)?,
            });
        }
        self.rules.extend(resolved);
        self.changed();
        Ok(())
    }

    pub fn set_margin(&mut self, top: i32, left: i32, bottom: i32, right: i32) {
        self.config.margin = Insets::new(top, left, bottom, right);
        self.changed();
    }

    /// Make edges of `component` follow container resizes. An empty anchor
    /// removes the binding.
    pub fn set_elastic_anchor(&mut self, component: H, anchor: ElasticAnchor) {
        let slot = self.slot_for(component);
        self.elastic.bind(slot, anchor);
    }

    /// Forget the container size elastic anchors measure growth against.
    ///
    /// The next committed layout becomes the new reference.
    pub fn reset_elastic_reference(&mut self) {
        self.elastic.reset_reference();
    }

    /// Container size elastic anchors currently measure growth against
    pub fn elastic_reference(&self) -> Option<Size> {
        self.elastic.reference()
    }

    /// Drop cached measurements so the next call rebuilds from intrinsic sizes
    pub fn invalidate(&mut self) {
        self.measured.clear();
    }

    pub fn minimum_size<C>(&mut self, host: &C, container: H) -> Result<Size, LayoutError>
    where
        C: LayoutHost<Handle = H> + ?Sized,
    {
        self.measure(host, container, SizeKind::Minimum)
    }

    pub fn preferred_size<C>(&mut self, host: &C, container: H) -> Result<Size, LayoutError>
    where
        C: LayoutHost<Handle = H> + ?Sized,
    {
        self.measure(host, container, SizeKind::Preferred)
    }

    pub fn maximum_size<C>(&mut self, host: &C, container: H) -> Result<Size, LayoutError>
    where
        C: LayoutHost<Handle = H> + ?Sized,
    {
        self.measure(host, container, SizeKind::Maximum)
    }

    /// Run a measurement pass and return the size the children need.
    ///
    /// Results are cached per kind and container size until [`invalidate`](Self::invalidate)
    /// or a change to rules, groups or margins.
    #[tracing::instrument(level = "debug", skip_all, fields(kind = ?kind))]
    pub fn measure<C>(&mut self, host: &C, container: H, kind: SizeKind) -> Result<Size, LayoutError>
    where
        C: LayoutHost<Handle = H> + ?Sized,
    {
        self.check_container(container)?;
        let extent = host.rect(self.container).size();
        if let Some(cached) = self.measured.get(&kind) {
            if cached.container == extent {
                trace!(size = %cached.size, "cached measurement");
                return Ok(cached.size);
            }
        }

        self.run_pass(host, kind)?;
        let size = self.aggregate();
        self.measured.insert(
            kind,
            Measurement {
                container: extent,
                size,
            },
        );
        debug!(size = %size, "measured");
        Ok(size)
    }

    /// Run a preferred-size pass, apply elastic anchors and commit every child
    /// rect to the host.
    ///
    /// Rects already pushed are not rolled back if a later step fails.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn layout<C>(&mut self, host: &mut C, container: H) -> Result<(), LayoutError>
    where
        C: LayoutHost<Handle = H> + ?Sized,
    {
        self.check_container(container)?;
        self.run_pass(&*host, SizeKind::Preferred)?;

        let extent = host.rect(self.container).size();
        self.elastic.apply(&mut self.rects, extent);

        let margin = self.config.margin;
        for &slot in &self.children {
            let rect = self.rects[slot].translated(margin.left, margin.top);
            trace!(component = ?self.handles[slot], %rect, "commit");
            host.set_rect(self.handles[slot], rect);
        }
        self.elastic.record_reference(extent);
        debug!(children = self.children.len(), container = %extent, "layout committed");
        Ok(())
    }

    /// Rect of a component or group as of the last pass, in the coordinates
    /// of the area inside the margins
    pub fn resolved_rect(&self, node: Node<H>) -> Option<Rect> {
        match node {
            Node::Component(handle) => self.slots.get(&handle).map(|slot| self.rects[*slot]),
            Node::Group(id) => self
                .groups
                .check(id)
                .ok()
                .map(|_| self.groups.bounding_rect(id, &self.rects)),
        }
    }

    /// Report rule-ordering hazards for the host's current children
    pub fn diagnose<C>(&self, host: &C) -> Vec<LintWarning>
    where
        C: LayoutHost<Handle = H> + ?Sized,
    {
        lint::check(self, host)
    }

    pub(crate) fn resolved_rules(&self) -> &[ResolvedRule] {
        &self.rules
    }

    pub(crate) fn group_table(&self) -> &GroupTable {
        &self.groups
    }

    pub(crate) fn handle_at(&self, slot: usize) -> H {
        self.handles[slot]
    }

    pub(crate) fn slot_of(&self, handle: H) -> Option<usize> {
        self.slots.get(&handle).copied()
    }

    /// Human-readable name of a slot for messages
    pub(crate) fn describe(&self, slot: Slot) -> String {
        match slot {
            Slot::Leaf(CONTAINER_SLOT) => "parent".to_string(),
            Slot::Leaf(index) => format!("{:?}", self.handles[index]),
            Slot::Group(id) => format!("group #{}", id.index()),
        }
    }

    fn check_container(&self, container: H) -> Result<(), LayoutError> {
        if container != self.container {
            return Err(LayoutError::binding_violation(self.container, container));
        }
        Ok(())
    }

    fn changed(&mut self) {
        self.measured.clear();
        self.diagnosed = false;
    }

    fn slot_for(&mut self, handle: H) -> usize {
        if let Some(slot) = self.slots.get(&handle) {
            return *slot;
        }
        let slot = self.handles.len();
        self.handles.push(handle);
        self.rects.push(Rect::zero());
        self.slots.insert(handle, slot);
        slot
    }

    fn resolve(&mut self, node: Node<H>) -> Result<Slot, LayoutError> {
        match node {
            Node::Component(handle) => Ok(Slot::Leaf(self.slot_for(handle))),
            Node::Group(id) => {
                self.groups.check(id)?;
                Ok(Slot::Group(id))
            }
        }
    }

    fn run_pass<C>(&mut self, host: &C, kind: SizeKind) -> Result<(), LayoutError>
    where
        C: LayoutHost<Handle = H> + ?Sized,
    {
        if self.config.diagnostics && !self.diagnosed {
            self.diagnosed = true;
            for warning in self.diagnose(host) {
                warn!(category = %warning.category, "{}", warning.message);
            }
        }

        for rect in &mut self.rects {
            *rect = Rect::zero();
        }
        self.children.clear();
        for child in host.children(self.container) {
            let slot = self.slot_for(child);
            self.rects[slot] = Rect::from_size(kind.size_of(host, child));
            self.children.push(slot);
        }

        let outer = host.rect(self.container);
        let margin = self.config.margin;
        self.rects[CONTAINER_SLOT] = Rect::new(
            0,
            0,
            outer.width.saturating_sub(margin.horizontal()),
            outer.height.saturating_sub(margin.vertical()),
        );

        for index in 0..self.rules.len() {
            let rule = self.rules[index];
            self.apply_rule(host, rule)?;
        }
        debug!(
            ?kind,
            children = self.children.len(),
            rules = self.rules.len(),
            groups = self.groups.len(),
            "pass evaluated"
        );
        Ok(())
    }

    fn apply_rule<C>(&mut self, host: &C, rule: ResolvedRule) -> Result<(), LayoutError>
    where
        C: LayoutHost<Handle = H> + ?Sized,
    {
        let value = self
            .position(host, rule.anchor, rule.anchor_edge)?
            .saturating_add(rule.offset);
        trace!(
            node = %self.describe(rule.target),
            edge = %rule.target_edge,
            anchor = %self.describe(rule.anchor),
            anchor_edge = %rule.anchor_edge,
            value,
            "rule"
        );

        match rule.target {
            Slot::Leaf(index) => {
                if rule.target_edge == Edge::Baseline {
                    let rect = self.rects[index];
                    let offset = host.baseline(self.handles[index], rect.width, rect.height);
                    self.rects[index].align_baseline(value, offset);
                } else {
                    self.rects[index].set_position(rule.target_edge, value)?;
                }
            }
            Slot::Group(id) => {
                // Size edges move the group along their axis; groups never resize.
                let edge = rule.target_edge;
                if edge == Edge::Baseline {
                    return Err(LayoutError::unsupported_edge(edge, self.describe(rule.target)));
                }
                let bounds = self.groups.bounding_rect(id, &self.rects);
                let delta = value.saturating_sub(bounds.position(edge)?);
                let (dx, dy) = match edge.axis() {
                    Axis::Horizontal => (delta, 0),
                    Axis::Vertical => (0, delta),
                };
                self.groups.translate(id, dx, dy, &mut self.rects);
            }
        }
        Ok(())
    }

    fn position<C>(&self, host: &C, slot: Slot, edge: Edge) -> Result<i32, LayoutError>
    where
        C: LayoutHost<Handle = H> + ?Sized,
    {
        match slot {
            Slot::Leaf(index) => {
                let rect = self.rects[index];
                if edge == Edge::Baseline {
                    Ok(rect
                        .y
                        .saturating_add(host.baseline(self.handles[index], rect.width, rect.height)))
                } else {
                    rect.position(edge)
                }
            }
            Slot::Group(id) => {
                if edge == Edge::Baseline {
                    return Err(LayoutError::unsupported_edge(edge, self.describe(slot)));
                }
                self.groups.bounding_rect(id, &self.rects).position(edge)
            }
        }
    }

    fn aggregate(&self) -> Size {
        let (width, height) = self
            .children
            .iter()
            .map(|slot| self.rects[*slot])
            .fold((0, 0), |(w, h), rect| (w.max(rect.x2()), h.max(rect.y2())));
        let margin = self.config.margin;
        Size::new(
            width.saturating_add(margin.horizontal()),
            height.saturating_add(margin.vertical()),
        )
    }
}
