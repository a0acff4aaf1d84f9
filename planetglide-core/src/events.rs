//! Outbound notifications from the simulation.

use std::sync::mpsc;

use tracing::trace;

use crate::waypoint::WaypointId;

/// Something the outside world may want to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The plane just entered a waypoint's trigger zone.
    WaypointEntered { id: WaypointId },
    /// The pilot interacted while inside a waypoint; its project should open.
    ProjectOpened { id: WaypointId },
    /// The open project was closed and simulation time resumes.
    ProjectClosed,
    /// A cloud was struck and dispersed.
    CloudDispersed { cloud: usize },
}

/// Sender half handed to anything that emits [`GameEvent`]s.
pub type EventSender = mpsc::Sender<GameEvent>;

/// Fire-and-forget send; a dropped receiver just means nobody is listening.
pub fn emit(sender: &EventSender, event: GameEvent) {
    if sender.send(event).is_err() {
        trace!("no listener for {:?}", event);
    }
}
