/// Which credential form is being presented while unauthenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

/// Authentication state. There is no logout: once authenticated the session
/// holds its token until the process exits.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Unauthenticated(AuthMode),
    Authenticated { token: String },
}

/// Owns authentication state and the notice line shown next to the
/// credential form. Transitions are pure; the caller performs the actual
/// register/login requests and reports their outcome here.
#[derive(Debug, Clone)]
pub struct SessionManager {
    state: SessionState,
    notice: Option<String>,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            state: SessionState::Unauthenticated(AuthMode::Login),
            notice: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    pub fn token(&self) -> Option<&str> {
        match &self.state {
            SessionState::Authenticated { token } => Some(token),
            SessionState::Unauthenticated(_) => None,
        }
    }

    pub fn auth_mode(&self) -> Option<AuthMode> {
        match self.state {
            SessionState::Unauthenticated(mode) => Some(mode),
            SessionState::Authenticated { .. } => None,
        }
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Flip between the login and registration forms. Clears any notice.
    /// No effect once authenticated.
    pub fn toggle_mode(&mut self) {
        if let SessionState::Unauthenticated(mode) = self.state {
            self.state = SessionState::Unauthenticated(match mode {
                AuthMode::Login => AuthMode::Register,
                AuthMode::Register => AuthMode::Login,
            });
            self.notice = None;
        }
    }

    /// Registration succeeded: switch back to the login form. The user is
    /// not authenticated automatically and must log in.
    pub fn register_succeeded(&mut self) {
        if let SessionState::Unauthenticated(_) = self.state {
            self.state = SessionState::Unauthenticated(AuthMode::Login);
            self.notice = Some("Registered. Please log in.".to_string());
        }
    }

    /// Any registration failure surfaces the same generic notice; duplicate
    /// usernames, network errors and server errors are not distinguished.
    pub fn register_failed(&mut self) {
        self.notice = Some("Registration failed".to_string());
    }

    pub fn login_succeeded(&mut self, token: String) {
        self.state = SessionState::Authenticated { token };
        self.notice = None;
    }

    pub fn login_failed(&mut self) {
        self.notice = Some("Login failed".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_login_form() {
        let session = SessionManager::new();
        assert_eq!(session.auth_mode(), Some(AuthMode::Login));
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
        assert!(session.notice().is_none());
    }

    #[test]
    fn toggle_flips_between_forms_and_clears_notice() {
        let mut session = SessionManager::new();
        session.login_failed();
        assert!(session.notice().is_some());

        session.toggle_mode();
        assert_eq!(session.auth_mode(), Some(AuthMode::Register));
        assert!(session.notice().is_none());

        session.toggle_mode();
        assert_eq!(session.auth_mode(), Some(AuthMode::Login));
    }

    #[test]
    fn registration_success_returns_to_login_without_authenticating() {
        let mut session = SessionManager::new();
        session.toggle_mode();
        assert_eq!(session.auth_mode(), Some(AuthMode::Register));

        session.register_succeeded();
        assert_eq!(session.auth_mode(), Some(AuthMode::Login));
        assert!(!session.is_authenticated());
        assert!(session.notice().is_some());
    }

    #[test]
    fn failed_login_keeps_login_form_and_no_token() {
        let mut session = SessionManager::new();
        session.login_failed();
        assert_eq!(session.auth_mode(), Some(AuthMode::Login));
        assert!(session.token().is_none());
        assert_eq!(session.notice(), Some("Login failed"));
    }

    #[test]
    fn successful_login_stores_token() {
        let mut session = SessionManager::new();
        session.login_succeeded("tok-123".to_string());
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("tok-123"));
        assert!(session.notice().is_none());
    }

    #[test]
    fn toggle_is_a_noop_once_authenticated() {
        let mut session = SessionManager::new();
        session.login_succeeded("tok".to_string());
        session.toggle_mode();
        assert!(session.is_authenticated());
    }
}
