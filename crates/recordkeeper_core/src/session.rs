//! Login gate in front of the dashboard.
//!
//! There is no credential store: any non-blank username and password pair
//! opens a session.

use crate::model::record::ValidationError;
use log::info;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// - `MissingCredentials` when either value is blank after trim.
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), ValidationError> {
        if username.trim().is_empty() || password.trim().is_empty() {
            info!("event=login module=session status=error");
            return Err(ValidationError::MissingCredentials);
        }
        self.user = Some(username.trim().to_string());
        info!("event=login module=session status=ok");
        Ok(())
    }

    pub fn logout(&mut self) {
        self.user = None;
        info!("event=logout module=session status=ok");
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::Session;
    use crate::model::record::ValidationError;

    #[test]
    fn blank_credentials_are_rejected() {
        let mut session = Session::new();
        assert_eq!(
            session.login("admin", "   "),
            Err(ValidationError::MissingCredentials)
        );
        assert!(!session.is_logged_in());
    }

    #[test]
    fn login_then_logout() {
        let mut session = Session::new();
        session.login(" admin ", "secret").unwrap();
        assert_eq!(session.user(), Some("admin"));
        session.logout();
        assert!(!session.is_logged_in());
    }
}
