//! Elastic parent-edge anchoring
//!
//! Independently of the rule graph, a component can have some of its edges
//! follow the container's edges when the container is resized. The amount is
//! `multiplier * (current extent - reference extent)` on the edge's axis,
//! where the reference extent is the container size of the first committed
//! layout.

use super::types::{Rect, Size};

/// Which edges of a component follow the container, and by how much.
///
/// `None` leaves the edge where the rules put it. A multiplier of `1.0` moves
/// the edge by the full container growth, `0.5` by half of it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElasticAnchor {
    pub left: Option<f32>,
    pub top: Option<f32>,
    pub right: Option<f32>,
    pub bottom: Option<f32>,
}

impl ElasticAnchor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_left(mut self, multiplier: f32) -> Self {
        self.left = Some(multiplier);
        self
    }

    pub fn with_top(mut self, multiplier: f32) -> Self {
        self.top = Some(multiplier);
        self
    }

    pub fn with_right(mut self, multiplier: f32) -> Self {
        self.right = Some(multiplier);
        self
    }

    pub fn with_bottom(mut self, multiplier: f32) -> Self {
        self.bottom = Some(multiplier);
        self
    }

    /// Follow the bottom-right corner of the container at full rate
    pub fn bottom_right() -> Self {
        Self::new().with_right(1.0).with_bottom(1.0)
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.top.is_none() && self.right.is_none() && self.bottom.is_none()
    }

    /// Adjust `rect` for a container that grew by `delta` since the reference layout
    pub fn apply(&self, rect: &mut Rect, delta: Size) {
        let (x, width) = follow(rect.x, rect.width, self.left, self.right, delta.width);
        let (y, height) = follow(rect.y, rect.height, self.top, self.bottom, delta.height);
        *rect = Rect::new(x, y, width, height);
    }
}

/// One axis of [`ElasticAnchor::apply`].
///
/// With a single bound edge the whole span moves with it; with both edges
/// bound the span stretches.
fn follow(start: i32, len: i32, lead: Option<f32>, trail: Option<f32>, delta: i32) -> (i32, i32) {
    let shift = |multiplier: f32| (multiplier * delta as f32).round() as i32;
    match (lead, trail) {
        (None, None) => (start, len),
        (Some(m), None) | (None, Some(m)) => (start.saturating_add(shift(m)), len),
        (Some(lead), Some(trail)) => {
            let new_start = start.saturating_add(shift(lead));
            let new_end = start.saturating_add(len).saturating_add(shift(trail));
            (new_start, new_end.saturating_sub(new_start))
        }
    }
}

/// Elastic bindings of one engine, keyed by arena slot
#[derive(Debug, Clone, Default)]
pub(crate) struct ElasticBinder {
    bindings: Vec<(usize, ElasticAnchor)>,
    reference: Option<Size>,
}

impl ElasticBinder {
    /// Bind (or rebind) a slot; an empty anchor removes the binding
    pub fn bind(&mut self, slot: usize, anchor: ElasticAnchor) {
        self.bindings.retain(|(bound, _)| *bound != slot);
        if !anchor.is_empty() {
            self.bindings.push((slot, anchor));
        }
    }

    pub fn reference(&self) -> Option<Size> {
        self.reference
    }

    /// Remember the container size of a committed layout if none is known yet
    pub fn record_reference(&mut self, extent: Size) {
        if self.reference.is_none() {
            self.reference = Some(extent);
        }
    }

    pub fn reset_reference(&mut self) {
        self.reference = None;
    }

    /// Apply every binding for a container currently sized `extent`.
    ///
    /// Does nothing before a reference extent has been recorded.
    pub fn apply(&self, rects: &mut [Rect], extent: Size) {
        let Some(reference) = self.reference else {
            return;
        };
        let delta = Size::new(
            extent.width.saturating_sub(reference.width),
            extent.height.saturating_sub(reference.height),
        );
        if delta == Size::default() {
            return;
        }
        for (slot, anchor) in &self.bindings {
            anchor.apply(&mut rects[*slot], delta);
        }
    }
}
