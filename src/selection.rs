//! Selection model - at most one chosen unit

use crate::models::{Unit, UnitStatus};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionModel {
    selected: Option<Unit>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with `unit`, unless it is sold.
    ///
    /// Returns whether the selection was taken. The caller guarantees the
    /// unit belongs to the building currently navigated.
    pub fn select(&mut self, unit: &Unit) -> bool {
        if unit.status == UnitStatus::Sold {
            return false;
        }
        self.selected = Some(unit.clone());
        true
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Unit> {
        self.selected.as_ref()
    }

    pub fn is_present(&self) -> bool {
        self.selected.is_some()
    }

    pub fn is_selected(&self, code: &str) -> bool {
        self.selected.as_ref().is_some_and(|unit| unit.code == code)
    }
}
