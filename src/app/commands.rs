//! Command handlers - business logic for processing UI events

use crate::app::state::catalog_units;
use crate::app::AppState;
use crate::catalog::LoadState;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::Building;

impl AppState {
    // ========================
    // Catalog loading
    // ========================

    /// Start a fresh load, discarding everything derived from the old one
    pub fn begin_load(&mut self) -> NetworkCommand {
        let generation = self.generation + 1;
        *self = AppState::new();
        self.generation = generation;
        NetworkCommand::LoadCatalog { generation }
    }

    /// Full reload, only offered once a load has failed
    pub fn reload(&mut self) -> Option<NetworkCommand> {
        if matches!(self.load, LoadState::Failed { .. }) {
            Some(self.begin_load())
        } else {
            None
        }
    }

    pub fn handle_response(&mut self, response: NetworkResponse) {
        if response.generation() != self.generation {
            tracing::debug!(
                got = response.generation(),
                current = self.generation,
                "Dropping result of superseded load"
            );
            return;
        }
        if self.load.is_terminal() {
            return;
        }

        match response {
            NetworkResponse::CatalogReady { catalog, .. } => {
                tracing::info!(units = catalog.units.len(), available = catalog.stats.available, "Catalog ready");
                self.load = LoadState::Ready(catalog);
            }
            NetworkResponse::CatalogFailed { message, .. } => {
                tracing::warn!(error = %message, "Catalog unavailable");
                self.load = LoadState::Failed { message };
            }
        }
    }

    // ========================
    // Navigation
    // ========================

    pub fn select_building(&mut self, building: Building) {
        self.navigation.select_building(building, &mut self.selection);
        self.floor_cursor = 0;
        self.unit_cursor = 0;
    }

    pub fn cycle_filter(&mut self) {
        let next = self.navigation.status_filter.next();
        self.navigation.set_filter(next);
        self.clamp_cursors();
    }

    pub fn floor_cursor_up(&mut self) {
        self.floor_cursor = self.floor_cursor.saturating_sub(1);
    }

    pub fn floor_cursor_down(&mut self) {
        let count = self.navigation.visible_floors(self.units()).len();
        if self.floor_cursor + 1 < count {
            self.floor_cursor += 1;
        }
    }

    /// Expand or collapse the floor under the cursor
    pub fn toggle_focused_floor(&mut self) {
        let floors = self.navigation.visible_floors(catalog_units(&self.load));
        if let Some(&floor) = floors.get(self.floor_cursor) {
            self.navigation.toggle_floor(floor);
            self.unit_cursor = 0;
        }
    }

    // ========================
    // Selection
    // ========================

    pub fn unit_cursor_left(&mut self) {
        self.unit_cursor = self.unit_cursor.saturating_sub(1);
    }

    pub fn unit_cursor_right(&mut self) {
        if self.unit_cursor + 1 < self.expanded_unit_count() {
            self.unit_cursor += 1;
        }
    }

    /// Select the unit under the cursor of the expanded floor
    pub fn select_focused(&mut self) -> bool {
        let Some(floor) = self.navigation.expanded_floor else {
            return false;
        };
        let units = catalog_units(&self.load);
        match self.navigation.visible_units_on_floor(units, floor).get(self.unit_cursor) {
            Some(unit) => self.selection.select(unit),
            None => false,
        }
    }

    /// Select a unit of the current building by code
    pub fn select_unit(&mut self, code: &str) -> bool {
        let units = catalog_units(&self.load);
        match self.navigation.units_of_building(units).find(|unit| unit.code == code) {
            Some(unit) => self.selection.select(unit),
            None => false,
        }
    }

    pub fn deselect(&mut self) {
        self.selection.deselect();
    }

    // ========================
    // Submission
    // ========================

    pub fn submit(&mut self, user_id: Option<i64>) -> Option<NetworkCommand> {
        self.submission
            .submit(&self.selection, user_id)
            .map(|payload| NetworkCommand::DispatchSubmission { payload })
    }

    pub fn finish_submission(&mut self) {
        self.submission.finish(&mut self.selection);
    }

    // ========================
    // Helpers
    // ========================

    fn expanded_unit_count(&self) -> usize {
        self.navigation
            .expanded_floor
            .map(|floor| self.navigation.visible_units_on_floor(self.units(), floor).len())
            .unwrap_or(0)
    }

    fn clamp_cursors(&mut self) {
        let floors = self.navigation.visible_floors(self.units()).len();
        self.floor_cursor = self.floor_cursor.min(floors.saturating_sub(1));
        self.unit_cursor = self.unit_cursor.min(self.expanded_unit_count().saturating_sub(1));
    }
}
