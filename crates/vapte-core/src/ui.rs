//! UI event model for the page flows.
//!
//! Every flow reports through one injected sink: a shared status line,
//! a trigger control that toggles between busy and ready, and a
//! navigation target. Rendering stays out of the flow logic.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Tone of a status message.
///
/// `Progress` and `Success` render in the success color, `Failure` in
/// the error color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Progress,
    Success,
    Failure,
}

impl StatusTone {
    /// CSS color a web embedder applies for this tone.
    pub fn color(self) -> &'static str {
        match self {
            StatusTone::Progress | StatusTone::Success => "green",
            StatusTone::Failure => "red",
        }
    }
}

/// Events emitted by the flows toward the embedding UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// Overwrite the shared status message (last write wins).
    Status { tone: StatusTone, text: String },
    /// Disable the trigger control and show the busy label.
    Busy { label: String },
    /// Re-enable the trigger control and restore the idle label.
    Ready { label: String },
    /// Navigate to a site-relative location.
    Navigate { location: String },
}

impl UiEvent {
    pub fn status(tone: StatusTone, text: impl Into<String>) -> Self {
        UiEvent::Status {
            tone,
            text: text.into(),
        }
    }

    pub fn busy(label: impl Into<String>) -> Self {
        UiEvent::Busy {
            label: label.into(),
        }
    }

    pub fn ready(label: impl Into<String>) -> Self {
        UiEvent::Ready {
            label: label.into(),
        }
    }

    pub fn navigate(location: impl Into<String>) -> Self {
        UiEvent::Navigate {
            location: location.into(),
        }
    }
}

/// Sink for flow UI events.
pub trait UiSink {
    fn emit(&self, event: UiEvent);
}

/// Sink that records events in order, for headless use and tests.
#[derive(Debug, Default)]
pub struct RecordingUi {
    events: Mutex<Vec<UiEvent>>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events emitted so far.
    pub fn events(&self) -> Vec<UiEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(_) => Vec::new(),
        }
    }

    /// Last emitted status message, if any.
    pub fn last_status(&self) -> Option<(StatusTone, String)> {
        self.events().into_iter().rev().find_map(|event| match event {
            UiEvent::Status { tone, text } => Some((tone, text)),
            _ => None,
        })
    }
}

impl UiSink for RecordingUi {
    fn emit(&self, event: UiEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Events serialize with the tagged snake_case layout.
    #[test]
    fn test_event_serialization_is_tagged() {
        let event = UiEvent::status(StatusTone::Failure, "Registration failed.");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"status""#));
        assert!(json.contains(r#""tone":"failure""#));

        let back: UiEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    /// Progress and success share a color; failure stands apart.
    #[test]
    fn test_tone_colors() {
        assert_eq!(StatusTone::Progress.color(), "green");
        assert_eq!(StatusTone::Success.color(), "green");
        assert_eq!(StatusTone::Failure.color(), "red");
    }

    /// A fresh recording sink has no status message.
    #[test]
    fn test_recording_ui_starts_empty() {
        let ui = RecordingUi::new();
        assert!(ui.events().is_empty());
        assert!(ui.last_status().is_none());
    }

    /// The recording sink preserves emission order and last-write-wins.
    #[test]
    fn test_recording_ui_order() {
        let ui = RecordingUi::new();
        ui.emit(UiEvent::status(StatusTone::Progress, "working"));
        ui.emit(UiEvent::busy("Processing"));
        ui.emit(UiEvent::status(StatusTone::Failure, "broke"));

        let events = ui.events();
        assert_eq!(events.len(), 3);
        assert_eq!(
            ui.last_status(),
            Some((StatusTone::Failure, "broke".to_string()))
        );
    }
}
