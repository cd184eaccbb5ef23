#![forbid(unsafe_code)]

//! Immutable snapshot of a partially known ordered collection.
//!
//! [`Items`] holds the known [`Item`]s, the [`HoleAnchor`]s marking the
//! edges of unknown runs, and the total logical `count`. Two sorted
//! sequences are kept apart and every lookup is a binary search over one
//! of them.
//!
//! # Tie-breaking
//!
//! - [`Items::closest_item`] / [`Items::closest_hole`]: when the query sits
//!   exactly between two neighbors the **upper** neighbor wins.
//! - [`Items::tag_at_or_below`]: when the nearest item and hole anchor at or
//!   below the query are equally far, the **hole anchor** wins.

use std::fmt;

use thiserror::Error;

/// Stable identity of an item across snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

impl From<u64> for ItemId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A known entry of the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Item {
    pub id: ItemId,
    /// Position in the full logical sequence.
    pub index: usize,
    /// Grouping key shown by the fast-scroll label (e.g. a date bucket).
    pub tag: i32,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, index: usize, tag: i32) -> Self {
        Self {
            id: id.into(),
            index,
            tag,
        }
    }
}

/// Boundary of a run of unknown indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HoleAnchor {
    pub id: ItemId,
    pub index: usize,
    pub tag: i32,
}

impl HoleAnchor {
    pub fn new(id: impl Into<ItemId>, index: usize, tag: i32) -> Self {
        Self {
            id: id.into(),
            index,
            tag,
        }
    }
}

/// Snapshot construction failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("item indices must be strictly increasing, found {next} after {previous}")]
    ItemsNotAscending { previous: usize, next: usize },
    #[error("hole anchor indices must be strictly increasing, found {next} after {previous}")]
    HoleAnchorsNotAscending { previous: usize, next: usize },
    #[error("item index {index} is outside the collection of {count}")]
    IndexOutOfBounds { index: usize, count: usize },
}

/// Outcome of a binary search over a sorted-by-index sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    Exact(usize),
    /// Positions of the neighbors below and above. At either end of the
    /// sequence only one side is present; both are `None` when it is empty.
    Between {
        lower: Option<usize>,
        upper: Option<usize>,
    },
}

fn probe<T>(sequence: &[T], index: usize, key: impl Fn(&T) -> usize) -> Probe {
    match sequence.binary_search_by_key(&index, key) {
        Ok(position) => Probe::Exact(position),
        Err(insert) => Probe::Between {
            lower: insert.checked_sub(1),
            upper: (insert < sequence.len()).then_some(insert),
        },
    }
}

fn at_or_below<T>(sequence: &[T], index: usize, key: impl Fn(&T) -> usize) -> Option<&T> {
    match probe(sequence, index, key) {
        Probe::Exact(position) => sequence.get(position),
        Probe::Between { lower, .. } => lower.and_then(|p| sequence.get(p)),
    }
}

fn closest<T>(sequence: &[T], index: usize, key: impl Fn(&T) -> usize) -> Option<&T> {
    match probe(sequence, index, &key) {
        Probe::Exact(position) => sequence.get(position),
        Probe::Between {
            lower: Some(lower),
            upper: Some(upper),
        } => {
            let below = &sequence[lower];
            let above = &sequence[upper];
            if index - key(below) < key(above) - index {
                Some(below)
            } else {
                Some(above)
            }
        }
        Probe::Between { lower, upper } => lower.or(upper).and_then(|p| sequence.get(p)),
    }
}

fn check_ascending<T>(sequence: &[T], key: impl Fn(&T) -> usize) -> Option<(usize, usize)> {
    sequence
        .windows(2)
        .map(|pair| (key(&pair[0]), key(&pair[1])))
        .find(|(previous, next)| previous >= next)
}

/// An immutable snapshot of the collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Items {
    items: Vec<Item>,
    hole_anchors: Vec<HoleAnchor>,
    count: usize,
}

impl Items {
    /// Validate and build a snapshot.
    ///
    /// Both sequences must be strictly ascending by index and every item
    /// index must be below `count`.
    pub fn new(
        items: Vec<Item>,
        hole_anchors: Vec<HoleAnchor>,
        count: usize,
    ) -> Result<Self, SnapshotError> {
        if let Some((previous, next)) = check_ascending(&items, |item| item.index) {
            return Err(SnapshotError::ItemsNotAscending { previous, next });
        }
        if let Some((previous, next)) = check_ascending(&hole_anchors, |anchor| anchor.index) {
            return Err(SnapshotError::HoleAnchorsNotAscending { previous, next });
        }
        if let Some(last) = items.last().filter(|item| item.index >= count) {
            return Err(SnapshotError::IndexOutOfBounds {
                index: last.index,
                count,
            });
        }
        Ok(Self {
            items,
            hole_anchors,
            count,
        })
    }

    /// A snapshot with nothing known and nothing to show.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn hole_anchors(&self) -> &[HoleAnchor] {
        &self.hole_anchors
    }

    /// Total logical length, known or not.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn item_at(&self, index: usize) -> Option<&Item> {
        match probe(&self.items, index, |item| item.index) {
            Probe::Exact(position) => self.items.get(position),
            Probe::Between { .. } => None,
        }
    }

    pub fn item_at_or_below(&self, index: usize) -> Option<&Item> {
        at_or_below(&self.items, index, |item| item.index)
    }

    pub fn closest_item(&self, index: usize) -> Option<&Item> {
        closest(&self.items, index, |item| item.index)
    }

    pub fn closest_hole(&self, index: usize) -> Option<&HoleAnchor> {
        closest(&self.hole_anchors, index, |anchor| anchor.index)
    }

    /// Tag of whichever of the nearest item or hole anchor at or below
    /// `index` is closer.
    pub fn tag_at_or_below(&self, index: usize) -> Option<i32> {
        let item = at_or_below(&self.items, index, |item| item.index);
        let anchor = at_or_below(&self.hole_anchors, index, |anchor| anchor.index);
        match (item, anchor) {
            (Some(item), Some(anchor)) => {
                if index - item.index < index - anchor.index {
                    Some(item.tag)
                } else {
                    Some(anchor.tag)
                }
            }
            (Some(item), None) => Some(item.tag),
            (None, Some(anchor)) => Some(anchor.tag),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(indices: &[usize]) -> Vec<Item> {
        indices
            .iter()
            .map(|&i| Item::new(i as u64, i, i as i32 / 10))
            .collect()
    }

    fn anchors(indices: &[usize]) -> Vec<HoleAnchor> {
        indices
            .iter()
            .map(|&i| HoleAnchor::new(10_000 + i as u64, i, -(i as i32)))
            .collect()
    }

    fn snapshot(item_indices: &[usize], anchor_indices: &[usize], count: usize) -> Items {
        Items::new(items(item_indices), anchors(anchor_indices), count).unwrap()
    }

    #[test]
    fn rejects_unsorted_and_duplicate_indices() {
        assert_eq!(
            Items::new(items(&[1, 3, 2]), vec![], 10),
            Err(SnapshotError::ItemsNotAscending {
                previous: 3,
                next: 2
            })
        );
        assert_eq!(
            Items::new(vec![], anchors(&[4, 4]), 10),
            Err(SnapshotError::HoleAnchorsNotAscending {
                previous: 4,
                next: 4
            })
        );
    }

    #[test]
    fn rejects_item_beyond_count() {
        assert_eq!(
            Items::new(items(&[0, 5]), vec![], 5),
            Err(SnapshotError::IndexOutOfBounds { index: 5, count: 5 })
        );
    }

    #[test]
    fn item_at_exact_only() {
        let s = snapshot(&[2, 4, 8], &[], 10);
        assert_eq!(s.item_at(4).map(|i| i.index), Some(4));
        assert!(s.item_at(5).is_none());
        assert!(s.item_at(0).is_none());
        assert!(s.item_at(9).is_none());
    }

    #[test]
    fn item_at_or_below() {
        let s = snapshot(&[2, 4, 8], &[], 10);
        assert_eq!(s.item_at_or_below(4).map(|i| i.index), Some(4));
        assert_eq!(s.item_at_or_below(7).map(|i| i.index), Some(4));
        assert_eq!(s.item_at_or_below(9).map(|i| i.index), Some(8));
        assert!(s.item_at_or_below(1).is_none());
    }

    #[test]
    fn closest_prefers_nearer_then_upper() {
        let s = snapshot(&[2, 6, 20], &[], 30);
        assert_eq!(s.closest_item(3).map(|i| i.index), Some(2));
        assert_eq!(s.closest_item(5).map(|i| i.index), Some(6));
        // Equidistant between 2 and 6.
        assert_eq!(s.closest_item(4).map(|i| i.index), Some(6));
    }

    #[test]
    fn closest_at_ends_returns_single_bound() {
        let s = snapshot(&[10, 20], &[], 30);
        assert_eq!(s.closest_item(0).map(|i| i.index), Some(10));
        assert_eq!(s.closest_item(29).map(|i| i.index), Some(20));
        assert!(Items::empty().closest_item(3).is_none());
    }

    #[test]
    fn closest_hole_uses_anchors() {
        let s = snapshot(&[], &[100, 400, 700], 1000);
        assert_eq!(s.closest_hole(105).map(|a| a.index), Some(100));
        assert_eq!(s.closest_hole(250).map(|a| a.index), Some(400));
        assert_eq!(s.closest_hole(999).map(|a| a.index), Some(700));
    }

    #[test]
    fn tag_at_or_below_picks_nearer_source() {
        // Items tag = index / 10, anchors tag = -index.
        let s = snapshot(&[10, 30], &[25], 50);
        assert_eq!(s.tag_at_or_below(12), Some(1));
        assert_eq!(s.tag_at_or_below(27), Some(-25));
        assert_eq!(s.tag_at_or_below(31), Some(3));
        assert_eq!(s.tag_at_or_below(5), None);
    }

    #[test]
    fn tag_tie_goes_to_hole_anchor() {
        let s = snapshot(&[10], &[10], 20);
        assert_eq!(s.tag_at_or_below(15), Some(-10));
    }

    #[test]
    fn tag_with_single_source() {
        assert_eq!(snapshot(&[3], &[], 10).tag_at_or_below(9), Some(0));
        assert_eq!(snapshot(&[], &[3], 10).tag_at_or_below(9), Some(-3));
    }

    #[test]
    fn empty_snapshot() {
        let s = Items::empty();
        assert!(s.is_empty());
        assert_eq!(s.count(), 0);
        assert!(s.item_at(0).is_none());
        assert!(s.tag_at_or_below(0).is_none());
    }
}
