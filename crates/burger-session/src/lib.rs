//! Authentication session engine for the Stellar Burgers client.
//!
//! This crate provides:
//! - an explicit lifecycle state machine (unchecked → verifying →
//!   authenticated / unauthenticated)
//! - the observable per-field session state with reducer-style appliers
//! - a session manager driving login, registration, logout, profile, and
//!   password-reset operations against the API

mod error;
mod machine;
mod manager;
mod state;

pub use error::{SessionError, SessionResult};
pub use machine::session_machine;
pub use machine::{SessionMachine, SessionMachineInput, SessionMachineState, SessionPhase};
pub use manager::SessionManager;
pub use state::{
    SessionState, LOGIN_FALLBACK, LOGOUT_FALLBACK, PROFILE_FETCH_FALLBACK, REGISTER_FALLBACK,
    UPDATE_FALLBACK,
};
