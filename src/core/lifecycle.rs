//! Window focus tracking for the foreground recalculation trigger.
use bevy::prelude::*;
use bevy::window::WindowFocused;

/// Emitted once whenever the window regains focus after having lost it.
#[derive(Event, Message, Debug, Clone, Copy)]
pub struct ForegroundTransition;

/// Remembers the last known focus state so only genuine background-to-
/// foreground edges produce a transition. Starts focused: the first frame
/// after launch is already covered by the startup recalculation.
#[derive(Resource, Debug)]
pub struct FocusTracker {
    focused: bool,
}

impl Default for FocusTracker {
    fn default() -> Self {
        Self { focused: true }
    }
}

pub fn detect_foreground_transitions(
    mut focus_events: MessageReader<WindowFocused>,
    mut tracker: ResMut<FocusTracker>,
    mut transitions: MessageWriter<ForegroundTransition>,
) {
    for event in focus_events.read() {
        let was_focused = tracker.focused;
        tracker.focused = event.focused;
        if event.focused && !was_focused {
            debug!("Window returned to foreground");
            transitions.write(ForegroundTransition);
        }
    }
}
