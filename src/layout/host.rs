//! The seam between the engine and the toolkit that owns the components

use super::rule::Handle;
use super::types::{Rect, Size};

/// Which intrinsic size a pass starts every component from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeKind {
    Minimum,
    Preferred,
    Maximum,
}

impl SizeKind {
    /// Ask the host for this kind of intrinsic size
    pub fn size_of<C: LayoutHost + ?Sized>(self, host: &C, handle: C::Handle) -> Size {
        match self {
            SizeKind::Minimum => host.minimum_size(handle),
            SizeKind::Preferred => host.preferred_size(handle),
            SizeKind::Maximum => host.maximum_size(handle),
        }
    }
}

/// Capabilities the engine needs from the host toolkit.
///
/// Handles are opaque to the engine. The container handle passed to
/// [`RuleLayout::new`](super::RuleLayout::new) must be understood by
/// [`children`](LayoutHost::children) and [`rect`](LayoutHost::rect).
pub trait LayoutHost {
    type Handle: Handle;

    /// Current bounds of a component or container
    fn rect(&self, handle: Self::Handle) -> Rect;

    /// Commit new bounds for a component
    fn set_rect(&mut self, handle: Self::Handle, rect: Rect);

    /// Distance from the top of the component to its text baseline when sized
    /// to `width` x `height`
    fn baseline(&self, handle: Self::Handle, width: i32, height: i32) -> i32;

    /// Direct children of a container, in host order
    fn children(&self, container: Self::Handle) -> Vec<Self::Handle>;

    fn minimum_size(&self, handle: Self::Handle) -> Size;

    fn preferred_size(&self, handle: Self::Handle) -> Size;

    fn maximum_size(&self, handle: Self::Handle) -> Size;

    /// Name used for the component in diagnostics
    fn name(&self, handle: Self::Handle) -> String {
        format!("{:?}", handle)
    }

    /// Programmatic preferred-size request. Hosts that cannot honour it ignore it.
    fn set_preferred_size(&mut self, _handle: Self::Handle, _size: Size) {}

    /// Programmatic minimum-size request. Hosts that cannot honour it ignore it.
    fn set_minimum_size(&mut self, _handle: Self::Handle, _size: Size) {}
}
