use planetglide_core::ControlIntent;

/// Discrete input from whatever front end is driving the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    ThrustBegin,
    ThrustEnd,
    TurnLeftBegin,
    TurnLeftEnd,
    TurnRightBegin,
    TurnRightEnd,
    /// Open the project behind the current waypoint, if any.
    Interact,
    /// Close the open project and resume.
    CloseProject,
}

/// Held-key state folded into a [`ControlIntent`].
///
/// Left and right are tracked separately so releasing one while the other is
/// still held keeps turning in the held direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    thrust: bool,
    left: bool,
    right: bool,
}

impl ControlState {
    /// Apply a held-key event. Returns `false` for events that are not key
    /// holds (`Interact`, `CloseProject`).
    pub fn apply(&mut self, event: ControlEvent) -> bool {
        match event {
            ControlEvent::ThrustBegin => self.thrust = true,
            ControlEvent::ThrustEnd => self.thrust = false,
            ControlEvent::TurnLeftBegin => self.left = true,
            ControlEvent::TurnLeftEnd => self.left = false,
            ControlEvent::TurnRightBegin => self.right = true,
            ControlEvent::TurnRightEnd => self.right = false,
            ControlEvent::Interact | ControlEvent::CloseProject => return false,
        }
        true
    }

    pub fn intent(&self) -> ControlIntent {
        let turn = match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        ControlIntent {
            thrust: if self.thrust { 1.0 } else { 0.0 },
            turn,
        }
    }
}
