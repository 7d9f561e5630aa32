//! Integration tests for rule evaluation against a hand-written host.

use std::collections::HashMap;

use pretty_assertions::assert_eq;
use rule_layout::{Edge, LayoutError, LayoutHost, Node, Rect, Rule, RuleLayout, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct WidgetId(u32);

const PANEL: WidgetId = WidgetId(0);

#[derive(Debug, Clone)]
struct Widget {
    minimum: Size,
    preferred: Size,
    baseline: i32,
    bounds: Rect,
}

/// A panel of widgets, standing in for a toolkit container
#[derive(Debug, Default)]
struct Panel {
    size: Size,
    order: Vec<WidgetId>,
    widgets: HashMap<WidgetId, Widget>,
    commits: usize,
}

impl Panel {
    fn new(width: i32, height: i32) -> Self {
        Self {
            size: Size::new(width, height),
            ..Default::default()
        }
    }

    fn widget(&mut self, width: i32, height: i32) -> WidgetId {
        self.widget_with_baseline(width, height, -1)
    }

    fn widget_with_baseline(&mut self, width: i32, height: i32, baseline: i32) -> WidgetId {
        let id = WidgetId(self.order.len() as u32 + 1);
        let size = Size::new(width, height);
        self.order.push(id);
        self.widgets.insert(
            id,
            Widget {
                minimum: size,
                preferred: size,
                baseline,
                bounds: Rect::zero(),
            },
        );
        id
    }

    fn bounds(&self, id: WidgetId) -> Rect {
        self.widgets[&id].bounds
    }
}

impl LayoutHost for Panel {
    type Handle = WidgetId;

    fn rect(&self, handle: WidgetId) -> Rect {
        if handle == PANEL {
            Rect::from_size(self.size)
        } else {
            self.widgets[&handle].bounds
        }
    }

    fn set_rect(&mut self, handle: WidgetId, rect: Rect) {
        self.commits += 1;
        if let Some(widget) = self.widgets.get_mut(&handle) {
            widget.bounds = rect;
        }
    }

    fn baseline(&self, handle: WidgetId, _width: i32, _height: i32) -> i32 {
        self.widgets.get(&handle).map(|w| w.baseline).unwrap_or(-1)
    }

    fn children(&self, container: WidgetId) -> Vec<WidgetId> {
        if container == PANEL {
            self.order.clone()
        } else {
            Vec::new()
        }
    }

    fn minimum_size(&self, handle: WidgetId) -> Size {
        self.widgets[&handle].minimum
    }

    fn preferred_size(&self, handle: WidgetId) -> Size {
        self.widgets[&handle].preferred
    }

    fn maximum_size(&self, _handle: WidgetId) -> Size {
        Size::new(i16::MAX as i32, i16::MAX as i32)
    }

    fn set_preferred_size(&mut self, handle: WidgetId, size: Size) {
        if let Some(widget) = self.widgets.get_mut(&handle) {
            widget.preferred = size;
        }
    }
}

fn pin_top_left(engine: &mut RuleLayout<WidgetId>, id: WidgetId, x: i32, y: i32) {
    engine
        .add_rule([
            Rule::between(id, Edge::Left, PANEL, Edge::Left, x),
            Rule::between(id, Edge::Top, PANEL, Edge::Top, y),
        ])
        .unwrap();
}

#[test]
fn test_end_to_end_side_by_side() {
    let mut panel = Panel::new(300, 300);
    let a = panel.widget(100, 100);
    let b = panel.widget(100, 100);

    let mut engine = RuleLayout::new(PANEL);
    pin_top_left(&mut engine, a, 0, 0);
    engine
        .add_rule([Rule::between(b, Edge::Left, a, Edge::Right, 5)])
        .unwrap();
    engine.layout(&mut panel, PANEL).unwrap();

    assert_eq!(panel.bounds(a), Rect::new(0, 0, 100, 100));
    assert_eq!(panel.bounds(b), Rect::new(105, 0, 100, 100));
    assert_eq!(panel.commits, 2);
}

#[test]
fn test_repeated_layout_has_no_drift() {
    let mut panel = Panel::new(320, 240);
    let title = panel.widget(120, 24);
    let body = panel.widget(200, 100);
    let footer = panel.widget(80, 20);

    let mut engine = RuleLayout::new(PANEL);
    engine
        .add_rule([
            Rule::between(title, Edge::HorCenter, PANEL, Edge::HorCenter, 0),
            Rule::between(title, Edge::Top, PANEL, Edge::Top, 8),
            Rule::between(body, Edge::Top, title, Edge::Bottom, 8),
            Rule::between(body, Edge::HorCenter, title, Edge::HorCenter, 0),
            Rule::between(footer, Edge::Bottom, PANEL, Edge::Bottom, 0),
            Rule::between(footer, Edge::Right, body, Edge::Right, 0),
        ])
        .unwrap();

    engine.layout(&mut panel, PANEL).unwrap();
    let first: Vec<Rect> = [title, body, footer].iter().map(|id| panel.bounds(*id)).collect();
    for _ in 0..5 {
        engine.layout(&mut panel, PANEL).unwrap();
    }
    let last: Vec<Rect> = [title, body, footer].iter().map(|id| panel.bounds(*id)).collect();

    assert_eq!(first, last);
    assert_eq!(first[0], Rect::new(100, 8, 120, 24));
    assert_eq!(first[1], Rect::new(60, 40, 200, 100));
}

#[test]
fn test_baseline_alignment() {
    let mut panel = Panel::new(300, 100);
    let label = panel.widget_with_baseline(50, 20, 8);
    let field = panel.widget_with_baseline(150, 30, 21);

    let mut engine = RuleLayout::new(PANEL);
    engine
        .add_rule([
            Rule::between(field, Edge::Left, label, Edge::Right, 4),
            Rule::between(field, Edge::Baseline, label, Edge::Baseline, 0),
        ])
        .unwrap();
    engine.layout(&mut panel, PANEL).unwrap();

    let field_rect = panel.bounds(field);
    let field_baseline = panel.baseline(field, field_rect.width, field_rect.height);
    assert_eq!(field_baseline + field_rect.y, 8);
    assert_eq!(field_rect, Rect::new(54, -13, 150, 30));
}

#[test]
fn test_group_bounding_box_and_translation() {
    let mut panel = Panel::new(200, 200);
    let a = panel.widget(10, 10);
    let b = panel.widget(5, 5);

    let mut engine = RuleLayout::new(PANEL);
    let group = engine.create_group();
    engine.add_to_group(group, Node::Component(a)).unwrap();
    engine.add_to_group(group, Node::Component(b)).unwrap();
    pin_top_left(&mut engine, b, 20, 20);

    engine.preferred_size(&panel, PANEL).unwrap();
    assert_eq!(
        engine.resolved_rect(Node::Group(group)),
        Some(Rect::new(0, 0, 25, 25))
    );

    engine
        .add_rule([
            Rule::new(Edge::Left, Node::Component(PANEL), 5, Edge::Left, Node::Group(group)),
            Rule::new(Edge::Top, Node::Component(PANEL), -3, Edge::Top, Node::Group(group)),
        ])
        .unwrap();
    engine.layout(&mut panel, PANEL).unwrap();

    assert_eq!(panel.bounds(a), Rect::new(5, -3, 10, 10));
    assert_eq!(panel.bounds(b), Rect::new(25, 17, 5, 5));
}

#[test]
fn test_nested_group_follows_outer_group() {
    let mut panel = Panel::new(400, 400);
    let a = panel.widget(20, 20);
    let b = panel.widget(20, 20);
    let c = panel.widget(40, 10);

    let mut engine = RuleLayout::new(PANEL);
    let inner = engine.create_group();
    let outer = engine.create_group();
    engine.add_to_group(inner, Node::Component(a)).unwrap();
    engine.add_to_group(inner, Node::Component(b)).unwrap();
    engine.add_to_group(outer, Node::Group(inner)).unwrap();
    engine.add_to_group(outer, Node::Component(c)).unwrap();
    engine
        .add_rule([
            Rule::between(b, Edge::Left, a, Edge::Right, 10),
            Rule::new(Edge::Bottom, Node::Group(inner), 2, Edge::Top, Node::Component(c)),
            Rule::new(Edge::HorCenter, Node::Component(PANEL), 0, Edge::HorCenter, Node::Group(outer)),
            Rule::new(Edge::VerCenter, Node::Component(PANEL), 0, Edge::VerCenter, Node::Group(outer)),
        ])
        .unwrap();
    engine.layout(&mut panel, PANEL).unwrap();

    // Outer bounds are 50x32 before centering.
    assert_eq!(panel.bounds(a), Rect::new(175, 184, 20, 20));
    assert_eq!(panel.bounds(b), Rect::new(205, 184, 20, 20));
    assert_eq!(panel.bounds(c), Rect::new(175, 206, 40, 10));
}

#[test]
fn test_empty_group_anchor_reads_zero_rect() {
    let mut panel = Panel::new(100, 100);
    let a = panel.widget(10, 10);

    let mut engine = RuleLayout::new(PANEL);
    let empty = engine.create_group();
    engine
        .add_rule([Rule::new(Edge::Right, Node::Group(empty), 7, Edge::Left, Node::Component(a))])
        .unwrap();
    engine.layout(&mut panel, PANEL).unwrap();

    assert_eq!(panel.bounds(a), Rect::new(7, 0, 10, 10));
}

#[test]
fn test_measurement_with_margins() {
    let mut panel = Panel::new(0, 0);
    let a = panel.widget(100, 40);
    let b = panel.widget(60, 60);

    let mut engine = RuleLayout::new(PANEL);
    engine.set_margin(4, 8, 4, 8);
    engine
        .add_rule([
            Rule::between(b, Edge::Left, a, Edge::Right, 10),
            Rule::between(b, Edge::Top, a, Edge::Top, 5),
        ])
        .unwrap();

    assert_eq!(engine.preferred_size(&panel, PANEL).unwrap(), Size::new(186, 73));
    assert_eq!(engine.minimum_size(&panel, PANEL).unwrap(), Size::new(186, 73));
}

#[test]
fn test_invalidate_picks_up_new_intrinsic_size() {
    let mut panel = Panel::new(0, 0);
    let a = panel.widget(100, 40);
    let mut engine = RuleLayout::new(PANEL);

    assert_eq!(engine.preferred_size(&panel, PANEL).unwrap(), Size::new(100, 40));
    panel.set_preferred_size(a, Size::new(150, 50));
    assert_eq!(engine.preferred_size(&panel, PANEL).unwrap(), Size::new(100, 40));

    engine.invalidate();
    assert_eq!(engine.preferred_size(&panel, PANEL).unwrap(), Size::new(150, 50));
}

#[test]
fn test_second_container_is_rejected() {
    let mut panel = Panel::new(100, 100);
    panel.widget(10, 10);
    let mut engine = RuleLayout::new(PANEL);

    let err = engine.layout(&mut panel, WidgetId(99)).unwrap_err();
    assert!(matches!(err, LayoutError::BindingViolation { .. }));
    assert_eq!(panel.commits, 0);
}

#[test]
fn test_group_baseline_anchor_fails_pass() {
    let mut panel = Panel::new(100, 100);
    let a = panel.widget_with_baseline(10, 10, 6);
    let b = panel.widget(10, 10);

    let mut engine = RuleLayout::new(PANEL);
    let group = engine.create_group();
    engine.add_to_group(group, Node::Component(a)).unwrap();
    engine
        .add_rule([Rule::new(Edge::Baseline, Node::Group(group), 0, Edge::Baseline, Node::Component(b))])
        .unwrap();

    let err = engine.layout(&mut panel, PANEL).unwrap_err();
    assert_eq!(err.to_string(), "edge 'baseline' is not supported on group #0");
}

#[test]
fn test_group_width_target_moves_without_resizing() {
    let mut panel = Panel::new(200, 100);
    let a = panel.widget(30, 10);
    let c = panel.widget(70, 20);

    let mut engine = RuleLayout::new(PANEL);
    let group = engine.create_group();
    engine.add_to_group(group, Node::Component(a)).unwrap();
    engine
        .add_rule([
            Rule::between(c, Edge::Top, PANEL, Edge::Top, 40),
            Rule::new(Edge::Width, Node::Component(c), 0, Edge::Width, Node::Group(group)),
        ])
        .unwrap();
    engine.layout(&mut panel, PANEL).unwrap();

    assert_eq!(panel.bounds(a), Rect::new(40, 0, 30, 10));
    assert_eq!(panel.bounds(c), Rect::new(0, 40, 70, 20));
    assert_eq!(panel.commits, 2);
}
