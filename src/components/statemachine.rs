//! Minimal single-slot state machine.
//!
//! Tracks a current state and the state active immediately before the last
//! transition. The machine is deliberately dumb about side effects: callers
//! run the exit hook for the outgoing state *before* [`StateMachine::advance`]
//! and the enter hook for the incoming state after it, which keeps hook
//! ordering (exit → swap → enter) in one place per owner. See
//! [`crate::systems::actor::change_state`] for the actor wiring.

use std::fmt::Debug;

#[derive(Debug, Clone, Copy)]
pub struct StateMachine<S> {
    current: Option<S>,
    previous: Option<S>,
}

impl<S: Copy + PartialEq + Debug> StateMachine<S> {
    pub fn new() -> Self {
        Self {
            current: None,
            previous: None,
        }
    }

    pub fn current(&self) -> Option<S> {
        self.current
    }

    /// The state active immediately before the last transition. Cleared by
    /// [`StateMachine::init`], never by `advance`.
    pub fn previous(&self) -> Option<S> {
        self.previous
    }

    /// Install the initial state. Resets the previous-state slot.
    pub fn init(&mut self, state: S) {
        self.current = Some(state);
        self.previous = None;
    }

    /// Swap in `state`, remembering the outgoing state as previous.
    pub fn advance(&mut self, state: S) {
        self.previous = self.current;
        self.current = Some(state);
    }

    pub fn is(&self, state: S) -> bool {
        self.current == Some(state)
    }

    pub fn previous_is(&self, state: S) -> bool {
        self.previous == Some(state)
    }
}

impl<S: Copy + PartialEq + Debug> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Phase {
        A,
        B,
        C,
    }

    #[test]
    fn test_new_has_no_state() {
        let sm: StateMachine<Phase> = StateMachine::new();
        assert_eq!(sm.current(), None);
        assert_eq!(sm.previous(), None);
    }

    #[test]
    fn test_init_sets_current_clears_previous() {
        let mut sm = StateMachine::new();
        sm.init(Phase::A);
        sm.advance(Phase::B);
        sm.init(Phase::C);
        assert_eq!(sm.current(), Some(Phase::C));
        assert_eq!(sm.previous(), None);
    }

    #[test]
    fn test_advance_tracks_previous() {
        let mut sm = StateMachine::new();
        sm.init(Phase::A);
        sm.advance(Phase::B);
        assert_eq!(sm.current(), Some(Phase::B));
        assert_eq!(sm.previous(), Some(Phase::A));
        sm.advance(Phase::C);
        assert_eq!(sm.current(), Some(Phase::C));
        assert_eq!(sm.previous(), Some(Phase::B));
    }

    #[test]
    fn test_previous_is_only_one_slot_deep() {
        let mut sm = StateMachine::new();
        sm.init(Phase::A);
        sm.advance(Phase::B);
        sm.advance(Phase::C);
        assert!(!sm.previous_is(Phase::A));
        assert!(sm.previous_is(Phase::B));
        assert!(sm.is(Phase::C));
    }
}
