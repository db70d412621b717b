//! Authentication lifecycle state machine using rust-fsm.
//!
//! The machine guards the coarse lifecycle; the per-field observable state
//! lives in [`crate::SessionState`].
//!
//! ## State Diagram
//!
//! ```text
//! ┌─────────────────┐
//! │    Unchecked    │ (initial)
//! └────────┬────────┘
//!          │ CheckStarted / LoginStarted / RegisterStarted
//!          │                                  NoStoredCredential
//!          ▼                                        │
//! ┌─────────────────┐                               ▼
//! │    Verifying    │ ◄──────────────────┐  ┌─────────────────┐
//! └────────┬────────┘                    │  │ Unauthenticated │
//!          │ Confirmed / Retained        │  └────────┬────────┘
//!          │           Denied / LoggedOut│──────────►│
//!          ▼                             │           │ LoginStarted /
//! ┌─────────────────┐  LogoutStarted /   │           │ RegisterStarted /
//! │  Authenticated  │ ─UpdateStarted /───┘◄──────────┘ CheckStarted
//! └─────────────────┘  CheckStarted
//! ```

use rust_fsm::*;
use serde::{Deserialize, Serialize};

// Generates a module `session_machine` with State, Input, and StateMachine.
state_machine! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub session_machine(Unchecked)

    Unchecked => {
        CheckStarted => Verifying,
        NoStoredCredential => Unauthenticated,
        LoginStarted => Verifying,
        RegisterStarted => Verifying
    },
    Verifying => {
        // Operation succeeded with a live session
        Confirmed => Authenticated,
        // Operation failed in a way that ends the session
        Denied => Unauthenticated,
        // Operation failed but the session survives (profile update)
        Retained => Authenticated,
        // Logout completed
        LoggedOut => Unauthenticated
    },
    Authenticated => {
        CheckStarted => Verifying,
        LoginStarted => Verifying,
        UpdateStarted => Verifying,
        LogoutStarted => Verifying
    },
    Unauthenticated => {
        CheckStarted => Verifying,
        NoStoredCredential => Unauthenticated,
        LoginStarted => Verifying,
        RegisterStarted => Verifying
    }
}

// Re-export the generated types with clearer names
pub use session_machine::Input as SessionMachineInput;
pub use session_machine::State as SessionMachineState;
pub use session_machine::StateMachine as SessionMachine;

/// User-friendly lifecycle phase for external consumption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// The initial auth check has not started.
    Unchecked,
    /// An auth operation is in flight.
    Verifying,
    /// Logged in with a live session.
    Authenticated,
    /// Determined to be logged out.
    Unauthenticated,
}

impl SessionPhase {
    /// Returns true when the user has a live session.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionPhase::Authenticated)
    }

    /// Returns true once the lifecycle has reached a definitive answer.
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            SessionPhase::Authenticated | SessionPhase::Unauthenticated
        )
    }
}

impl From<&SessionMachineState> for SessionPhase {
    fn from(state: &SessionMachineState) -> Self {
        match state {
            SessionMachineState::Unchecked => SessionPhase::Unchecked,
            SessionMachineState::Verifying => SessionPhase::Verifying,
            SessionMachineState::Authenticated => SessionPhase::Authenticated,
            SessionMachineState::Unauthenticated => SessionPhase::Unauthenticated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_unchecked() {
        let machine = SessionMachine::new();
        assert_eq!(*machine.state(), SessionMachineState::Unchecked);
    }

    #[test]
    fn test_login_flow() {
        let mut machine = SessionMachine::new();

        machine.consume(&SessionMachineInput::LoginStarted).unwrap();
        assert_eq!(*machine.state(), SessionMachineState::Verifying);

        machine.consume(&SessionMachineInput::Confirmed).unwrap();
        assert_eq!(*machine.state(), SessionMachineState::Authenticated);
    }

    #[test]
    fn test_login_failure_returns_to_unauthenticated() {
        let mut machine = SessionMachine::new();

        machine.consume(&SessionMachineInput::LoginStarted).unwrap();
        machine.consume(&SessionMachineInput::Denied).unwrap();
        assert_eq!(*machine.state(), SessionMachineState::Unauthenticated);
    }

    #[test]
    fn test_check_with_no_credential_skips_verifying() {
        let mut machine = SessionMachine::new();

        machine
            .consume(&SessionMachineInput::NoStoredCredential)
            .unwrap();
        assert_eq!(*machine.state(), SessionMachineState::Unauthenticated);
    }

    #[test]
    fn test_check_flow_confirmed() {
        let mut machine = SessionMachine::new();

        machine.consume(&SessionMachineInput::CheckStarted).unwrap();
        assert_eq!(*machine.state(), SessionMachineState::Verifying);

        machine.consume(&SessionMachineInput::Confirmed).unwrap();
        assert_eq!(*machine.state(), SessionMachineState::Authenticated);
    }

    #[test]
    fn test_logout_flow() {
        let mut machine = SessionMachine::new();

        machine.consume(&SessionMachineInput::LoginStarted).unwrap();
        machine.consume(&SessionMachineInput::Confirmed).unwrap();

        machine.consume(&SessionMachineInput::LogoutStarted).unwrap();
        assert_eq!(*machine.state(), SessionMachineState::Verifying);

        machine.consume(&SessionMachineInput::LoggedOut).unwrap();
        assert_eq!(*machine.state(), SessionMachineState::Unauthenticated);
    }

    #[test]
    fn test_failed_update_retains_session() {
        let mut machine = SessionMachine::new();

        machine.consume(&SessionMachineInput::LoginStarted).unwrap();
        machine.consume(&SessionMachineInput::Confirmed).unwrap();

        machine.consume(&SessionMachineInput::UpdateStarted).unwrap();
        machine.consume(&SessionMachineInput::Retained).unwrap();
        assert_eq!(*machine.state(), SessionMachineState::Authenticated);
    }

    #[test]
    fn test_retry_login_after_failure() {
        let mut machine = SessionMachine::new();

        machine.consume(&SessionMachineInput::LoginStarted).unwrap();
        machine.consume(&SessionMachineInput::Denied).unwrap();

        machine.consume(&SessionMachineInput::LoginStarted).unwrap();
        machine.consume(&SessionMachineInput::Confirmed).unwrap();
        assert_eq!(*machine.state(), SessionMachineState::Authenticated);
    }

    #[test]
    fn test_invalid_transition_returns_error() {
        let mut machine = SessionMachine::new();

        // Can't logout before authenticating
        assert!(machine.consume(&SessionMachineInput::LogoutStarted).is_err());

        // Can't confirm without an operation in flight
        assert!(machine.consume(&SessionMachineInput::Confirmed).is_err());
    }

    #[test]
    fn test_phase_conversion() {
        assert_eq!(
            SessionPhase::from(&SessionMachineState::Unchecked),
            SessionPhase::Unchecked
        );
        assert_eq!(
            SessionPhase::from(&SessionMachineState::Verifying),
            SessionPhase::Verifying
        );
        assert_eq!(
            SessionPhase::from(&SessionMachineState::Authenticated),
            SessionPhase::Authenticated
        );
        assert_eq!(
            SessionPhase::from(&SessionMachineState::Unauthenticated),
            SessionPhase::Unauthenticated
        );
    }

    #[test]
    fn test_phase_helpers() {
        assert!(!SessionPhase::Unchecked.is_settled());
        assert!(!SessionPhase::Verifying.is_settled());
        assert!(SessionPhase::Authenticated.is_settled());
        assert!(SessionPhase::Unauthenticated.is_settled());

        assert!(SessionPhase::Authenticated.is_authenticated());
        assert!(!SessionPhase::Verifying.is_authenticated());
        assert!(!SessionPhase::Unauthenticated.is_authenticated());
    }
}
