//! Render state - data structure sent from App layer to UI for rendering

use crate::models::{Building, CatalogStats, Unit, UnitStatus};
use crate::navigation::{BuildingCounts, FloorSummary, StatusFilter};

/// Coarse phase of the view, used for key mapping and layout choice
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewPhase {
    #[default]
    Loading,
    Failed,
    Ready,
}

/// One unit tile under an expanded floor
#[derive(Debug, Clone, PartialEq)]
pub struct UnitTile {
    pub code: String,
    pub area: f64,
    pub price: u64,
    pub status: UnitStatus,
    pub selected: bool,
    pub focused: bool,
}

/// One floor row of the accordion
#[derive(Debug, Clone, PartialEq)]
pub struct FloorRow {
    pub summary: FloorSummary,
    pub expanded: bool,
    pub focused: bool,
    /// Filtered tiles; empty unless expanded
    pub tiles: Vec<UnitTile>,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub phase: ViewPhase,
    pub error: Option<String>,

    // Header
    pub stats: CatalogStats,

    // Navigation
    pub building: Building,
    pub filter: StatusFilter,
    pub building_counts: BuildingCounts,
    pub floors: Vec<FloorRow>,

    // Selection card
    pub selected: Option<Unit>,

    pub sending: bool,
}
