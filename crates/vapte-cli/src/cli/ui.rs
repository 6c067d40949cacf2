//! Terminal rendering of UI events.

use vapte_core::ui::{UiEvent, UiSink};

/// Prints status text and navigation targets to stdout.
///
/// The busy/ready transitions have no terminal rendering; they carry
/// control state for embedders driving a real trigger element.
pub struct TerminalUi;

impl UiSink for TerminalUi {
    fn emit(&self, event: UiEvent) {
        match event {
            UiEvent::Status { text, .. } => println!("{text}"),
            UiEvent::Navigate { location } => println!("Navigating to {location}"),
            UiEvent::Busy { .. } | UiEvent::Ready { .. } => {}
        }
    }
}
