use crate::backend::Actuator;
use crate::trace::trace_event;
use crate::util::VisautoResult;
use std::sync::Mutex;
use std::time::Duration;

/// A pointer action captured by [`RecordingActuator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerAction {
    Move { x: i32, y: i32, duration: Duration },
    Click,
}

/// Actuator that records actions instead of performing them.
#[derive(Debug, Default)]
pub struct RecordingActuator {
    actions: Mutex<Vec<PointerAction>>,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn actions(&self) -> Vec<PointerAction> {
        self.actions
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    pub fn clear(&self) {
        self.actions
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clear();
    }

    fn push(&self, action: PointerAction) {
        self.actions
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(action);
    }
}

impl Actuator for RecordingActuator {
    fn move_to(&self, x: i32, y: i32, duration: Duration) -> VisautoResult<()> {
        trace_event!("record_move", x = x, y = y);
        self.push(PointerAction::Move { x, y, duration });
        Ok(())
    }

    fn click(&self) -> VisautoResult<()> {
        trace_event!("record_click");
        self.push(PointerAction::Click);
        Ok(())
    }
}
