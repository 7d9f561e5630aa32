//! Group aggregation
//!
//! A group has no geometry of its own. Its rectangle is the bounding box of
//! its members, recomputed on every read, and a rule that targets a group
//! translates every member by the same delta instead of resizing anything.

use super::error::LayoutError;
use super::rule::{GroupId, Slot};
use super::types::Rect;

#[derive(Debug, Clone, Default)]
struct Group {
    members: Vec<Slot>,
}

/// All groups registered with one engine
#[derive(Debug, Clone, Default)]
pub(crate) struct GroupTable {
    groups: Vec<Group>,
}

impl GroupTable {
    pub fn create(&mut self) -> GroupId {
        self.groups.push(Group::default());
        GroupId(self.groups.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn check(&self, id: GroupId) -> Result<(), LayoutError> {
        if id.0 < self.groups.len() {
            Ok(())
        } else {
            Err(LayoutError::UnknownGroup(id))
        }
    }

    pub fn add_member(&mut self, id: GroupId, member: Slot) -> Result<(), LayoutError> {
        self.check(id)?;
        if let Slot::Group(nested) = member {
            self.check(nested)?;
            if nested == id || self.contains(nested, id) {
                return Err(LayoutError::group_cycle(id, nested));
            }
        }
        self.groups[id.0].members.push(member);
        Ok(())
    }

    /// True if `needle` is reachable from `haystack` through nested members
    fn contains(&self, haystack: GroupId, needle: GroupId) -> bool {
        self.groups[haystack.0].members.iter().any(|member| match member {
            Slot::Group(nested) => *nested == needle || self.contains(*nested, needle),
            Slot::Leaf(_) => false,
        })
    }

    /// Bounding box of every member rect, descending into nested groups.
    ///
    /// An empty group (or one whose nested groups are all empty) is a zero rect.
    pub fn bounding_rect(&self, id: GroupId, rects: &[Rect]) -> Rect {
        self.envelope(id, rects).unwrap_or_else(Rect::zero)
    }

    fn envelope(&self, id: GroupId, rects: &[Rect]) -> Option<Rect> {
        self.groups[id.0]
            .members
            .iter()
            .filter_map(|member| match member {
                Slot::Leaf(index) => Some(rects[*index]),
                Slot::Group(nested) => self.envelope(*nested, rects),
            })
            .reduce(|acc, rect| acc.union(&rect))
    }

    /// Move every member (recursively) by (dx, dy)
    pub fn translate(&self, id: GroupId, dx: i32, dy: i32, rects: &mut [Rect]) {
        for member in &self.groups[id.0].members {
            match member {
                Slot::Leaf(index) => rects[*index].translate(dx, dy),
                Slot::Group(nested) => self.translate(*nested, dx, dy, rects),
            }
        }
    }

    /// Arena indices of every component reachable from the group
    pub fn leaves(&self, id: GroupId) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect_leaves(id, &mut out);
        out
    }

    fn collect_leaves(&self, id: GroupId, out: &mut Vec<usize>) {
        for member in &self.groups[id.0].members {
            match member {
                Slot::Leaf(index) => {
                    if !out.contains(index) {
                        out.push(*index);
                    }
                }
                Slot::Group(nested) => self.collect_leaves(*nested, out),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_member_group() -> (GroupTable, GroupId, Vec<Rect>) {
        let mut table = GroupTable::default();
        let id = table.create();
        table.add_member(id, Slot::Leaf(0)).unwrap();
        table.add_member(id, Slot::Leaf(1)).unwrap();
        let rects = vec![Rect::new(0, 0, 10, 10), Rect::new(20, 20, 5, 5)];
        (table, id, rects)
    }

    #[test]
    fn test_bounding_rect() {
        let (table, id, rects) = two_member_group();
        assert_eq!(table.bounding_rect(id, &rects), Rect::new(0, 0, 25, 25));
    }

    #[test]
    fn test_translate_keeps_sizes() {
        let (table, id, mut rects) = two_member_group();
        table.translate(id, 5, -3, &mut rects);
        assert_eq!(rects[0], Rect::new(5, -3, 10, 10));
        assert_eq!(rects[1], Rect::new(25, 17, 5, 5));
    }

    #[test]
    fn test_empty_group_is_zero() {
        let mut table = GroupTable::default();
        let id = table.create();
        let outer = table.create();
        table.add_member(outer, Slot::Group(id)).unwrap();
        assert_eq!(table.bounding_rect(id, &[]), Rect::zero());
        assert_eq!(table.bounding_rect(outer, &[]), Rect::zero());
    }

    #[test]
    fn test_nested_group_bounds_and_translation() {
        let mut table = GroupTable::default();
        let inner = table.create();
        let outer = table.create();
        table.add_member(inner, Slot::Leaf(1)).unwrap();
        table.add_member(outer, Slot::Leaf(0)).unwrap();
        table.add_member(outer, Slot::Group(inner)).unwrap();

        let mut rects = vec![Rect::new(10, 10, 10, 10), Rect::new(40, 0, 10, 50)];
        assert_eq!(table.bounding_rect(outer, &rects), Rect::new(10, 0, 40, 50));

        table.translate(outer, 0, 7, &mut rects);
        assert_eq!(rects[0], Rect::new(10, 17, 10, 10));
        assert_eq!(rects[1], Rect::new(40, 7, 10, 50));
        assert_eq!(table.leaves(outer), vec![0, 1]);
    }

    #[test]
    fn test_rejects_cycles() {
        let mut table = GroupTable::default();
        let a = table.create();
        let b = table.create();
        table.add_member(a, Slot::Group(b)).unwrap();
        assert!(matches!(
            table.add_member(b, Slot::Group(a)),
            Err(LayoutError::GroupCycle { .. })
        ));
        assert!(matches!(
            table.add_member(a, Slot::Group(a)),
            Err(LayoutError::GroupCycle { .. })
        ));
    }

    #[test]
    fn test_rejects_unknown_group() {
        let mut table = GroupTable::default();
        assert!(matches!(
            table.add_member(GroupId(4), Slot::Leaf(0)),
            Err(LayoutError::UnknownGroup(_))
        ));
    }
}
