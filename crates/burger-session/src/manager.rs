//! Session manager: drives auth operations against the API and records their
//! outcome in the observable session state.
//!
//! The manager is the recovery boundary of the auth flow: every API failure
//! is converted into the state's error field (with the per-operation fallback
//! default) before the typed error is handed back to the caller.

use crate::machine::{SessionMachine, SessionMachineInput, SessionPhase};
use crate::state::SessionState;
use crate::{SessionError, SessionResult};
use burger_api::{ApiClient, LoginRequest, ProfilePatch, RegisterRequest};
use burger_storage::CredentialStore;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Manager for the authentication lifecycle.
pub struct SessionManager {
    api: Arc<ApiClient>,
    credentials: Arc<CredentialStore>,
    /// Lifecycle machine guarding transition legality.
    machine: Mutex<SessionMachine>,
    /// Observable per-field state.
    state: Mutex<SessionState>,
}

impl SessionManager {
    /// Create a session manager over an API client. The manager shares the
    /// client's credential store.
    pub fn new(api: Arc<ApiClient>) -> Self {
        let credentials = api.credentials().clone();
        Self {
            api,
            credentials,
            machine: Mutex::new(SessionMachine::new()),
            state: Mutex::new(SessionState::new()),
        }
    }

    /// Current observable state, cloned for UI collaborators.
    pub fn snapshot(&self) -> SessionState {
        self.state.lock().unwrap().clone()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        let machine = self.machine.lock().unwrap();
        SessionPhase::from(machine.state())
    }

    /// Drive the lifecycle machine, logging state changes.
    fn transition(&self, input: &SessionMachineInput) -> SessionResult<SessionPhase> {
        let mut machine = self.machine.lock().unwrap();
        let old_phase = SessionPhase::from(machine.state());

        machine.consume(input).map_err(|_| {
            SessionError::InvalidTransition(format!(
                "Cannot apply {:?} in state {:?}",
                input,
                machine.state()
            ))
        })?;

        let new_phase = SessionPhase::from(machine.state());
        drop(machine);

        if old_phase != new_phase {
            debug!(?old_phase, ?new_phase, "session phase transition");
        }

        Ok(new_phase)
    }

    /// Initial auth check.
    ///
    /// With no stored refresh credential the answer is immediate: mark
    /// unauthenticated and verified without touching the network. Otherwise
    /// fetch the profile and mark verified regardless of the outcome.
    pub async fn verify_session(&self) -> SessionResult<()> {
        if !self.credentials.has_refresh_token()? {
            info!("no stored credential, session unauthenticated");
            self.transition(&SessionMachineInput::NoStoredCredential)?;
            self.state.lock().unwrap().mark_verified();
            return Ok(());
        }

        self.transition(&SessionMachineInput::CheckStarted)?;
        let result = self.run_profile_fetch().await;
        self.state.lock().unwrap().mark_verified();
        result
    }

    /// Fetch the profile of the authenticated user.
    pub async fn fetch_profile(&self) -> SessionResult<()> {
        self.transition(&SessionMachineInput::CheckStarted)?;
        self.run_profile_fetch().await
    }

    async fn run_profile_fetch(&self) -> SessionResult<()> {
        self.state.lock().unwrap().profile_fetch_pending();

        match self.api.fetch_profile().await {
            Ok(user) => {
                info!(email = %user.email, "profile fetched");
                self.state.lock().unwrap().profile_fetch_fulfilled(user);
                self.transition(&SessionMachineInput::Confirmed)?;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "profile fetch failed");
                self.state
                    .lock()
                    .unwrap()
                    .profile_fetch_rejected(e.message());
                self.transition(&SessionMachineInput::Denied)?;
                Err(e.into())
            }
        }
    }

    /// Register a new account and start its session.
    pub async fn register(&self, email: &str, password: &str, name: &str) -> SessionResult<()> {
        self.transition(&SessionMachineInput::RegisterStarted)?;
        self.state.lock().unwrap().register_pending();

        let request = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        };

        match self.api.register(&request).await {
            Ok(payload) => {
                self.credentials
                    .store_pair(&payload.access_token, &payload.refresh_token)?;
                info!(email = %payload.user.email, "user registered");
                self.state.lock().unwrap().register_fulfilled(payload.user);
                self.transition(&SessionMachineInput::Confirmed)?;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "registration failed");
                self.state.lock().unwrap().register_rejected(e.message());
                self.transition(&SessionMachineInput::Denied)?;
                Err(e.into())
            }
        }
    }

    /// Log in and start a session.
    pub async fn login(&self, email: &str, password: &str) -> SessionResult<()> {
        self.transition(&SessionMachineInput::LoginStarted)?;
        self.state.lock().unwrap().login_pending();

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        match self.api.login(&request).await {
            Ok(payload) => {
                self.credentials
                    .store_pair(&payload.access_token, &payload.refresh_token)?;
                info!(email = %payload.user.email, "logged in");
                self.state.lock().unwrap().login_fulfilled(payload.user);
                self.transition(&SessionMachineInput::Confirmed)?;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "login failed");
                self.state.lock().unwrap().login_rejected(e.message());
                self.transition(&SessionMachineInput::Denied)?;
                Err(e.into())
            }
        }
    }

    /// End the session, clearing both credential halves.
    pub async fn logout(&self) -> SessionResult<()> {
        self.transition(&SessionMachineInput::LogoutStarted)?;
        self.state.lock().unwrap().logout_pending();

        match self.api.logout().await {
            Ok(()) => {
                self.credentials.clear_pair()?;
                info!("logged out");
                self.state.lock().unwrap().logout_fulfilled();
                self.transition(&SessionMachineInput::LoggedOut)?;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "logout failed");
                self.state.lock().unwrap().logout_rejected(e.message());
                self.transition(&SessionMachineInput::Denied)?;
                Err(e.into())
            }
        }
    }

    /// Update the authenticated user's profile. A failure keeps the session
    /// and the current user.
    pub async fn update_profile(&self, patch: ProfilePatch) -> SessionResult<()> {
        self.transition(&SessionMachineInput::UpdateStarted)?;
        self.state.lock().unwrap().update_pending();

        match self.api.update_profile(&patch).await {
            Ok(user) => {
                info!(email = %user.email, "profile updated");
                self.state.lock().unwrap().update_fulfilled(user);
                self.transition(&SessionMachineInput::Confirmed)?;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "profile update failed");
                self.state.lock().unwrap().update_rejected(e.message());
                self.transition(&SessionMachineInput::Retained)?;
                Err(e.into())
            }
        }
    }

    /// Request a password-reset email and set the transient reset flag.
    pub async fn request_password_reset(&self, email: &str) -> SessionResult<()> {
        self.api.request_password_reset(email).await?;
        self.credentials.mark_reset_in_progress()?;
        info!("password reset requested");
        Ok(())
    }

    /// Confirm a password reset and clear the transient reset flag.
    pub async fn confirm_password_reset(&self, password: &str, token: &str) -> SessionResult<()> {
        self.api.confirm_password_reset(password, token).await?;
        self.credentials.clear_reset_in_progress()?;
        info!("password reset confirmed");
        Ok(())
    }

    /// Whether a password reset is in progress (gates the confirm page).
    pub fn reset_in_progress(&self) -> SessionResult<bool> {
        Ok(self.credentials.reset_in_progress()?)
    }
}
