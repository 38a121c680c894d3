//! App state - pure data structure with no I/O logic

use crate::catalog::LoadState;
use crate::messages::render::{FloorRow, UnitTile, ViewPhase};
use crate::messages::RenderState;
use crate::models::Unit;
use crate::navigation::NavigationState;
use crate::selection::SelectionModel;
use crate::submission::SubmissionFlow;

/// Units of a loaded catalog, or nothing while loading/failed
pub(crate) fn catalog_units(load: &LoadState) -> &[Unit] {
    load.catalog().map(|catalog| catalog.units.as_slice()).unwrap_or(&[])
}

/// Main application state - pure data, no I/O
#[derive(Debug)]
pub struct AppState {
    // Catalog
    pub load: LoadState,
    /// Tags the current load; results of older loads are dropped
    pub generation: u64,

    // Reducers
    pub navigation: NavigationState,
    pub selection: SelectionModel,
    pub submission: SubmissionFlow,

    // Keyboard focus
    pub floor_cursor: usize,
    pub unit_cursor: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            load: LoadState::Loading,
            generation: 0,
            navigation: NavigationState::new(),
            selection: SelectionModel::new(),
            submission: SubmissionFlow::new(),
            floor_cursor: 0,
            unit_cursor: 0,
        }
    }

    pub fn units(&self) -> &[Unit] {
        catalog_units(&self.load)
    }

    pub fn phase(&self) -> ViewPhase {
        match self.load {
            LoadState::Loading => ViewPhase::Loading,
            LoadState::Failed { .. } => ViewPhase::Failed,
            LoadState::Ready(_) => ViewPhase::Ready,
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let units = self.units();
        let nav = &self.navigation;

        let floors = nav
            .visible_floors(units)
            .into_iter()
            .enumerate()
            .map(|(index, floor)| {
                let expanded = nav.expanded_floor == Some(floor);
                let tiles = if expanded {
                    nav.visible_units_on_floor(units, floor)
                        .into_iter()
                        .enumerate()
                        .map(|(i, unit)| UnitTile {
                            code: unit.code.clone(),
                            area: unit.area,
                            price: unit.price,
                            status: unit.status,
                            selected: self.selection.is_selected(&unit.code),
                            focused: i == self.unit_cursor,
                        })
                        .collect()
                } else {
                    Vec::new()
                };
                FloorRow {
                    summary: nav.floor_summary(units, floor),
                    expanded,
                    focused: index == self.floor_cursor,
                    tiles,
                }
            })
            .collect();

        RenderState {
            phase: self.phase(),
            error: match &self.load {
                LoadState::Failed { message } => Some(message.clone()),
                _ => None,
            },
            stats: self.load.catalog().map(|c| c.stats).unwrap_or_default(),
            building: nav.selected_building,
            filter: nav.status_filter,
            building_counts: nav.building_counts(units),
            floors,
            selected: self.selection.selected().cloned(),
            sending: self.submission.is_sending(),
        }
    }
}
