use super::mode::ToolMode;
use crate::core::models::ids::MeasurementId;
use crate::core::models::measurement::MeasurementKind;

/// Notifications a presentation layer can subscribe to instead of polling the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    ModeChanged { from: ToolMode, to: ToolMode },
    AtomSelected { label: String },
    PartialSelection { collected: usize, required: usize },
    MeasurementCompleted {
        id: MeasurementId,
        kind: MeasurementKind,
        value: f64,
        degenerate: bool,
    },
    MeasurementsCleared { removed: usize },
    HighlightChanged { id: MeasurementId, highlighted: bool },
}

pub type EventCallback<'a> = Box<dyn Fn(SessionEvent) + Send + Sync + 'a>;

#[derive(Default)]
pub struct EventReporter<'a> {
    callback: Option<EventCallback<'a>>,
}

impl<'a> EventReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: EventCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: SessionEvent) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn reporter_without_callback_is_silent() {
        let reporter = EventReporter::new();
        reporter.report(SessionEvent::MeasurementsCleared { removed: 3 });
    }

    #[test]
    fn reporter_forwards_events_to_callback() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let reporter = EventReporter::with_callback(Box::new(move |event| {
            sink.lock().unwrap().push(event);
        }));

        reporter.report(SessionEvent::ModeChanged {
            from: ToolMode::Select,
            to: ToolMode::MeasureAngle,
        });
        reporter.report(SessionEvent::PartialSelection {
            collected: 1,
            required: 3,
        });

        let events = seen.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[1],
            SessionEvent::PartialSelection {
                collected: 1,
                required: 3
            }
        );
    }
}
