//! Navigation state - building, expanded floor and status filter
//!
//! Holds only the user's navigation choices; everything shown per floor is
//! derived on demand from the catalog slice passed in.

use std::collections::BTreeSet;

use crate::models::{Building, Unit, UnitStatus};
use crate::selection::SelectionModel;

/// Which statuses are listed under an expanded floor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Available,
    Booked,
    Sold,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Available,
        StatusFilter::Booked,
        StatusFilter::Sold,
    ];

    pub fn matches(&self, status: UnitStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Available => status == UnitStatus::Available,
            StatusFilter::Booked => status == UnitStatus::Booked,
            StatusFilter::Sold => status == UnitStatus::Sold,
        }
    }

    pub fn next(&self) -> StatusFilter {
        match self {
            StatusFilter::All => StatusFilter::Available,
            StatusFilter::Available => StatusFilter::Booked,
            StatusFilter::Booked => StatusFilter::Sold,
            StatusFilter::Sold => StatusFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "Все",
            StatusFilter::Available => "Свободно",
            StatusFilter::Booked => "Бронь",
            StatusFilter::Sold => "Продано",
        }
    }
}

/// Header line of one floor; counts ignore the status filter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FloorSummary {
    pub floor: i32,
    pub available: usize,
    pub total: usize,
    /// Cheapest available unit, or cheapest unit if none is available
    pub min_price: Option<u64>,
}

/// Per-status counts for the selected building
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildingCounts {
    pub available: usize,
    pub booked: usize,
    pub sold: usize,
    pub total: usize,
}

impl BuildingCounts {
    pub fn count_for(&self, filter: StatusFilter) -> usize {
        match filter {
            StatusFilter::All => self.total,
            StatusFilter::Available => self.available,
            StatusFilter::Booked => self.booked,
            StatusFilter::Sold => self.sold,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub selected_building: Building,
    pub expanded_floor: Option<i32>,
    pub status_filter: StatusFilter,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch building. Always collapses the floor and drops the selection,
    /// even when `building` is already the current one.
    pub fn select_building(&mut self, building: Building, selection: &mut SelectionModel) {
        self.selected_building = building;
        self.expanded_floor = None;
        selection.deselect();
    }

    /// Accordion toggle: at most one floor is expanded
    pub fn toggle_floor(&mut self, floor: i32) {
        if self.expanded_floor == Some(floor) {
            self.expanded_floor = None;
        } else {
            self.expanded_floor = Some(floor);
        }
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.status_filter = filter;
    }

    pub fn units_of_building<'a>(&self, units: &'a [Unit]) -> impl Iterator<Item = &'a Unit> {
        let building = self.selected_building;
        units.iter().filter(move |unit| unit.building == building)
    }

    /// Distinct floors of the selected building, highest first
    pub fn floors_of_building(&self, units: &[Unit]) -> Vec<i32> {
        let floors: BTreeSet<i32> = self.units_of_building(units).map(|unit| unit.floor).collect();
        floors.into_iter().rev().collect()
    }

    pub fn units_on_floor<'a>(&self, units: &'a [Unit], floor: i32) -> Vec<&'a Unit> {
        self.units_of_building(units)
            .filter(|unit| unit.floor == floor)
            .collect()
    }

    pub fn visible_units_on_floor<'a>(&self, units: &'a [Unit], floor: i32) -> Vec<&'a Unit> {
        let filter = self.status_filter;
        self.units_of_building(units)
            .filter(|unit| unit.floor == floor && filter.matches(unit.status))
            .collect()
    }

    /// Floors to list: with a narrowing filter, floors without a match are hidden
    pub fn visible_floors(&self, units: &[Unit]) -> Vec<i32> {
        self.floors_of_building(units)
            .into_iter()
            .filter(|&floor| {
                self.status_filter == StatusFilter::All
                    || !self.visible_units_on_floor(units, floor).is_empty()
            })
            .collect()
    }

    pub fn floor_summary(&self, units: &[Unit], floor: i32) -> FloorSummary {
        let on_floor = self.units_on_floor(units, floor);
        let available: Vec<&Unit> = on_floor
            .iter()
            .copied()
            .filter(|unit| unit.status == UnitStatus::Available)
            .collect();
        let priced = if available.is_empty() { &on_floor } else { &available };

        FloorSummary {
            floor,
            available: available.len(),
            total: on_floor.len(),
            min_price: priced.iter().map(|unit| unit.price).min(),
        }
    }

    pub fn building_counts(&self, units: &[Unit]) -> BuildingCounts {
        self.units_of_building(units)
            .fold(BuildingCounts::default(), |mut counts, unit| {
                match unit.status {
                    UnitStatus::Available => counts.available += 1,
                    UnitStatus::Booked => counts.booked += 1,
                    UnitStatus::Sold => counts.sold += 1,
                }
                counts.total += 1;
                counts
            })
    }
}
