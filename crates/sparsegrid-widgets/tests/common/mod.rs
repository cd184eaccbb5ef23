//! Recording collaborator shared by the scenario tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use sparsegrid_core::geometry::{Rect, Size};
use sparsegrid_layout::ContainerLayout;
use sparsegrid_widgets::{
    DisplaySurface, ElementOf, GridBinding, HapticFeedback, HoleAnchor, HoleLocation, HoleTicket,
    InsetTransition, Item, ItemId, Items,
};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Tile {
    pub frame: Rect,
    pub size: Size,
    pub bound_to: Option<ItemId>,
}

impl DisplaySurface for Tile {
    fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    fn update(&mut self, size: Size) {
        self.size = size;
    }
}

#[derive(Debug, Default)]
pub struct Recorder {
    pub created: usize,
    pub bind_calls: usize,
    pub bound: Vec<ItemId>,
    pub unbound: usize,
    pub holes: Vec<(HoleAnchor, HoleLocation, HoleTicket)>,
    pub taps: Vec<Item>,
    pub tag_area_taps: usize,
    pub fast_scroll_begins: usize,
    pub coverings: Vec<(f64, InsetTransition)>,
}

impl GridBinding for Recorder {
    type Surface = Tile;
    type View = Tile;

    fn create_surface(&mut self) -> Option<Tile> {
        self.created += 1;
        Some(Tile::default())
    }

    fn bind(&mut self, items: &[Item], elements: &mut [ElementOf<Self>]) {
        self.bind_calls += 1;
        for (item, element) in items.iter().zip(elements.iter_mut()) {
            self.bound.push(item.id);
            if let Some(tile) = element.as_surface_mut() {
                tile.bound_to = Some(item.id);
            }
        }
    }

    fn unbind(&mut self, _element: ElementOf<Self>) {
        self.unbound += 1;
    }

    fn load_hole(&mut self, anchor: &HoleAnchor, location: HoleLocation, ticket: HoleTicket) {
        self.holes.push((*anchor, location, ticket));
    }

    fn tag_label(&self, tag: i32) -> Option<String> {
        Some(format!("Week {tag}"))
    }

    fn on_tap(&mut self, item: &Item) {
        self.taps.push(*item);
    }

    fn on_tag_area_tap(&mut self) {
        self.tag_area_taps += 1;
    }

    fn on_begin_fast_scroll(&mut self) {
        self.fast_scroll_begins += 1;
    }

    fn covering_inset_offset_updated(&mut self, offset: f64, transition: InsetTransition) {
        self.coverings.push((offset, transition));
    }
}

/// Haptics whose counters survive being boxed into the engine.
#[derive(Debug, Clone, Default)]
pub struct CountingHaptics {
    pub taps: Rc<Cell<usize>>,
    pub impacts: Rc<Cell<usize>>,
}

impl HapticFeedback for CountingHaptics {
    fn tap(&mut self) {
        self.taps.set(self.taps.get() + 1);
    }

    fn impact(&mut self) {
        self.impacts.set(self.impacts.get() + 1);
    }
}

pub fn phone() -> ContainerLayout {
    ContainerLayout::new(Size::new(390.0, 800.0))
}

/// Every index known. Tags group 30 consecutive items.
pub fn full(count: usize) -> Items {
    let items = (0..count)
        .map(|i| Item::new(i as u64, i, (i / 30) as i32))
        .collect();
    Items::new(items, vec![], count).unwrap()
}

/// Known everywhere except the half-open `gaps`, each marked by a hole
/// anchor at `anchor(gap)`.
pub fn with_gaps(
    count: usize,
    gaps: &[(usize, usize)],
    anchor: impl Fn((usize, usize)) -> usize,
) -> Items {
    let missing = |i: usize| gaps.iter().any(|&(start, end)| (start..end).contains(&i));
    let items = (0..count)
        .filter(|&i| !missing(i))
        .map(|i| Item::new(i as u64, i, (i / 30) as i32))
        .collect();
    let anchors = gaps
        .iter()
        .enumerate()
        .map(|(n, &gap)| {
            let index = anchor(gap);
            HoleAnchor::new(1_000_000 + n as u64, index, (index / 30) as i32)
        })
        .collect();
    Items::new(items, anchors, count).unwrap()
}
