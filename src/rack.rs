// Copyright (c) 2025 - Cowboy AI, Inc.
//! Rack Slot Allocator
//!
//! A rack is a 1-indexed linear sequence of `total_u` unit slots. Cases are
//! placed at a start unit and cover the closed interval
//! `[start_u, start_u + size_u - 1]`. Intervals never overlap and never leave
//! `[1, total_u]`.
//!
//! # Capacity vs Contiguity
//!
//! [`Rack::available_u`] is a capacity count (`total_u` minus the units in
//! use). It says nothing about contiguous space: a 4U rack with 1U cases at
//! units 1 and 3 reports 2U available but cannot hold a 2U case. There is no
//! compaction. Use [`Rack::largest_free_run`] or [`Rack::can_place`] when
//! contiguity matters.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::assembly::AssemblyId;
use crate::domain::Case;

/// Placement error. A failed placement leaves the rack unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RackError {
    #[error("A {size_u}U case at unit {start_u} does not fit in a {total_u}U rack")]
    OutOfBounds {
        start_u: u32,
        size_u: u32,
        total_u: u32,
    },

    #[error("Unit {unit} is already occupied")]
    SlotOccupied { unit: u32 },

    #[error("Case height must be at least 1U")]
    InvalidSize,
}

/// A case installed in the rack
#[derive(Debug, Clone, PartialEq)]
pub struct Occupant {
    pub case: Arc<Case>,
    pub start_u: u32,
    /// Installed server built in this case, if any
    pub assembly: Option<AssemblyId>,
}

impl Occupant {
    pub fn size_u(&self) -> u32 {
        self.case.size_u
    }

    /// Last unit covered (inclusive)
    pub fn end_u(&self) -> u32 {
        self.start_u + self.case.size_u - 1
    }

    pub fn covers(&self, unit: u32) -> bool {
        unit >= self.start_u && unit <= self.end_u()
    }
}

/// What a single unit shows, for per-unit rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnitView<'a> {
    Empty,
    /// First unit of an occupant
    Top(&'a Occupant),
    /// A unit covered by the occupant starting at `start_u`
    Continuation { start_u: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rack {
    total_u: u32,
    occupants: Vec<Occupant>,
}

impl Rack {
    pub fn new(total_u: u32) -> Self {
        Self {
            total_u,
            occupants: Vec::new(),
        }
    }

    pub fn total_u(&self) -> u32 {
        self.total_u
    }

    pub fn occupants(&self) -> &[Occupant] {
        &self.occupants
    }

    /// Dry run of the placement checks
    ///
    /// Bounds are checked before occupancy; an occupied interval reports the
    /// first covered unit that is taken.
    pub fn can_place(&self, size_u: u32, start_u: u32) -> Result<(), RackError> {
        if size_u == 0 {
            return Err(RackError::InvalidSize);
        }

        let out_of_bounds = RackError::OutOfBounds {
            start_u,
            size_u,
            total_u: self.total_u,
        };
        if start_u < 1 {
            return Err(out_of_bounds);
        }
        let end_u = match start_u.checked_add(size_u - 1) {
            Some(end_u) if end_u <= self.total_u => end_u,
            _ => return Err(out_of_bounds),
        };

        match (start_u..=end_u).find(|&unit| self.case_at(unit).is_some()) {
            Some(unit) => Err(RackError::SlotOccupied { unit }),
            None => Ok(()),
        }
    }

    /// Place a case starting at `start_u`
    pub fn add_case(
        &mut self,
        case: Arc<Case>,
        start_u: u32,
        assembly: Option<AssemblyId>,
    ) -> Result<(), RackError> {
        self.can_place(case.size_u, start_u)?;

        info!(
            case = %case.model,
            start_u,
            size_u = case.size_u,
            "Case placed in rack"
        );
        self.occupants.push(Occupant {
            case,
            start_u,
            assembly,
        });
        Ok(())
    }

    /// Occupant covering `unit`
    pub fn case_at(&self, unit: u32) -> Option<&Occupant> {
        self.occupants.iter().find(|occupant| occupant.covers(unit))
    }

    /// Remove the occupant covering `unit`
    pub fn remove_case(&mut self, unit: u32) -> Option<Occupant> {
        let index = self
            .occupants
            .iter()
            .position(|occupant| occupant.covers(unit))?;
        let removed = self.occupants.remove(index);
        info!(case = %removed.case.model, start_u = removed.start_u, "Case removed from rack");
        Some(removed)
    }

    /// Extend the rack; existing occupants keep their units
    pub fn upgrade(&mut self, additional_u: u32) -> u32 {
        self.total_u = self.total_u.saturating_add(additional_u);
        debug!(total_u = self.total_u, "Rack upgraded");
        self.total_u
    }

    /// Free capacity, not contiguous space
    pub fn available_u(&self) -> u32 {
        let used: u32 = self.occupants.iter().map(Occupant::size_u).sum();
        self.total_u.saturating_sub(used)
    }

    /// Longest run of consecutive empty units
    pub fn largest_free_run(&self) -> u32 {
        let mut longest = 0;
        let mut current = 0;
        for unit in 1..=self.total_u {
            if self.case_at(unit).is_some() {
                current = 0;
            } else {
                current += 1;
                longest = longest.max(current);
            }
        }
        longest
    }

    /// Lowest start unit where a case of `size_u` fits
    pub fn first_fit(&self, size_u: u32) -> Option<u32> {
        (1..=self.total_u).find(|&start_u| self.can_place(size_u, start_u).is_ok())
    }

    pub fn unit_view(&self, unit: u32) -> UnitView<'_> {
        match self.case_at(unit) {
            None => UnitView::Empty,
            Some(occupant) if occupant.start_u == unit => UnitView::Top(occupant),
            Some(occupant) => UnitView::Continuation {
                start_u: occupant.start_u,
            },
        }
    }
}
