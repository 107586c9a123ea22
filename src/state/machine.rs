use super::error::{StateError, StateResult};
use super::{event::StateTransition, AppEvent, AppState};

#[derive(Debug)]
pub struct StateMachine {
    state: AppState,
    transition_history: Vec<StateTransition>,
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            state: AppState::default(),
            transition_history: Vec::new(),
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn can_transition(&self, event: AppEvent) -> bool {
        self.next_state(event).is_some()
    }

    pub fn next_state(&self, event: AppEvent) -> Option<AppState> {
        use AppEvent::*;
        match (self.state, event) {
            (AppState::Uninitialized, LoadSettings) => Some(AppState::SettingsLoaded),
            (AppState::SettingsLoaded, PopulateShortcuts) => Some(AppState::ShortcutsPopulated),
            (AppState::ShortcutsPopulated, Present) => Some(AppState::Visible),
            (AppState::Visible, Restart) => Some(AppState::Restarting),
            _ => None,
        }
    }

    pub fn transition(&mut self, event: AppEvent) -> StateResult<AppState> {
        tracing::debug!(from = ?self.state, event = ?event, "request state transition");
        let next = self.next_state(event).ok_or_else(|| {
            let from = self.state;
            tracing::warn!(from = ?from, event = ?event, "invalid state transition requested");
            StateError::InvalidStateTransition { from, event }
        })?;

        let record = StateTransition::new(Some(self.state), event, next);
        self.state = next;
        self.transition_history.push(record);

        Ok(self.state)
    }

    pub fn history(&self) -> &[StateTransition] {
        &self.transition_history
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AppState::{:?}", self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_walks_through_every_stage_in_order() {
        let mut machine = StateMachine::new();
        assert!(machine.can_transition(AppEvent::LoadSettings));
        assert!(!machine.can_transition(AppEvent::Present));

        machine.transition(AppEvent::LoadSettings).unwrap();
        machine.transition(AppEvent::PopulateShortcuts).unwrap();
        machine.transition(AppEvent::Present).unwrap();

        assert_eq!(machine.state(), AppState::Visible);
        assert_eq!(
            machine.history(),
            &[
                StateTransition::new(
                    Some(AppState::Uninitialized),
                    AppEvent::LoadSettings,
                    AppState::SettingsLoaded
                ),
                StateTransition::new(
                    Some(AppState::SettingsLoaded),
                    AppEvent::PopulateShortcuts,
                    AppState::ShortcutsPopulated
                ),
                StateTransition::new(
                    Some(AppState::ShortcutsPopulated),
                    AppEvent::Present,
                    AppState::Visible
                ),
            ]
        );
    }

    #[test]
    fn restart_is_only_valid_once_visible_and_is_terminal() {
        let mut machine = StateMachine::new();
        assert!(!machine.can_transition(AppEvent::Restart));

        machine.transition(AppEvent::LoadSettings).unwrap();
        machine.transition(AppEvent::PopulateShortcuts).unwrap();
        machine.transition(AppEvent::Present).unwrap();
        machine.transition(AppEvent::Restart).unwrap();

        assert_eq!(machine.state(), AppState::Restarting);
        for event in [
            AppEvent::LoadSettings,
            AppEvent::PopulateShortcuts,
            AppEvent::Present,
            AppEvent::Restart,
        ] {
            assert!(!machine.can_transition(event));
        }
    }

    #[test]
    fn invalid_transition_returns_error_without_mutating_history() {
        let mut machine = StateMachine::new();

        let err = machine
            .transition(AppEvent::PopulateShortcuts)
            .expect_err("shortcuts cannot be populated before settings load");
        assert!(matches!(
            err,
            StateError::InvalidStateTransition {
                from: AppState::Uninitialized,
                event: AppEvent::PopulateShortcuts
            }
        ));
        assert_eq!(machine.state(), AppState::Uninitialized);
        assert!(machine.history().is_empty());
    }
}
