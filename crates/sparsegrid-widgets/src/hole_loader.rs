#![forbid(unsafe_code)]

//! Single-flight gate around the collaborator's hole loading.
//!
//! At most one [`GridBinding::load_hole`] call is outstanding. Requests that
//! arrive while one is in flight are dropped, not queued; the next visible
//! pass after completion re-discovers any gap that is still open.

use crate::binding::{GridBinding, HoleLocation, HoleTicket};
use crate::sparse_index::HoleAnchor;

/// A gap found in the visible range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoleRequest {
    pub anchor: HoleAnchor,
    pub location: HoleLocation,
    /// First unknown index that triggered the request.
    pub missing_index: usize,
}

impl HoleRequest {
    /// Direction rule: a gap below the anchor loads toward lower indices,
    /// anything else toward upper ones.
    pub fn for_gap(anchor: HoleAnchor, missing_index: usize) -> Self {
        let location = if missing_index < anchor.index {
            HoleLocation::TowardLower
        } else {
            HoleLocation::TowardUpper
        };
        Self {
            anchor,
            location,
            missing_index,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HoleLoader {
    in_flight: Option<HoleTicket>,
    next_ticket: u64,
    issued: u64,
}

impl HoleLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<HoleTicket> {
        self.in_flight
    }

    /// Number of loads started over the loader's lifetime.
    pub fn issued(&self) -> u64 {
        self.issued
    }

    /// Start a load unless one is already running.
    pub fn maybe_resolve<B: GridBinding>(
        &mut self,
        binding: &mut B,
        request: &HoleRequest,
    ) -> Option<HoleTicket> {
        if self.in_flight.is_some() {
            sparsegrid_core::trace!(
                ticket = ?self.in_flight,
                anchor = request.anchor.index,
                "hole load already in flight"
            );
            return None;
        }
        let ticket = HoleTicket(self.next_ticket);
        self.next_ticket += 1;
        self.issued += 1;
        self.in_flight = Some(ticket);
        sparsegrid_core::debug!(
            ticket = ticket.raw(),
            anchor = request.anchor.index,
            missing = request.missing_index,
            location = ?request.location,
            "requesting hole load"
        );
        binding.load_hole(&request.anchor, request.location, ticket);
        Some(ticket)
    }

    /// Clear the in-flight flag. Returns `false` for a ticket that is not
    /// the one in flight, which is then ignored.
    pub fn complete(&mut self, ticket: HoleTicket) -> bool {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
            sparsegrid_core::debug!(ticket = ticket.raw(), "hole load completed");
            true
        } else {
            sparsegrid_core::debug!(ticket = ticket.raw(), "ignoring stale hole completion");
            false
        }
    }
}
