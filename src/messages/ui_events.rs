//! UI events - messages from UI layer (and the host) to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::messages::render::ViewPhase;
use crate::models::Building;

/// Events generated from user input, the host, or the app's own timers
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Navigation
    SelectBuilding(Building),
    CycleFilter,
    FloorCursorUp,
    FloorCursorDown,
    ToggleFloor,

    // Selection
    UnitCursorLeft,
    UnitCursorRight,
    SelectFocused,
    Deselect,

    // Host main button was activated
    MainButtonPressed,
    // Host close was requested after a submission
    SubmissionFinished,

    // System
    Reload,
    Quit,
}

/// Convert a key event to a UiEvent based on the current view phase.
///
/// The main button key is not mapped here: pressing it goes through the
/// host, which decides whether the activation fires.
pub fn key_to_ui_event(key: KeyEvent, phase: ViewPhase) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    match phase {
        ViewPhase::Loading => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            _ => None,
        },
        ViewPhase::Failed => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('r') | KeyCode::Enter => Some(UiEvent::Reload),
            _ => None,
        },
        ViewPhase::Ready => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('1') => Some(UiEvent::SelectBuilding(Building::One)),
            KeyCode::Char('2') => Some(UiEvent::SelectBuilding(Building::Two)),
            KeyCode::Char('f') => Some(UiEvent::CycleFilter),
            KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::FloorCursorUp),
            KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::FloorCursorDown),
            KeyCode::Enter => Some(UiEvent::ToggleFloor),
            KeyCode::Left | KeyCode::Char('h') => Some(UiEvent::UnitCursorLeft),
            KeyCode::Right | KeyCode::Char('l') => Some(UiEvent::UnitCursorRight),
            KeyCode::Char(' ') => Some(UiEvent::SelectFocused),
            KeyCode::Char('x') | KeyCode::Esc => Some(UiEvent::Deselect),
            _ => None,
        },
    }
}
