//! Module `client`
//!
//! Defines the `Client` struct holding per-connection session state:
//! who is logged in and with which role.

use crate::auth::Role;
use crate::dashboard::DashboardView;

/// Represents the state of a connected client.
#[derive(Debug, Default)]
pub struct Client {
    username: Option<String>,
    role: Option<Role>,
}

impl Client {
    /// Records a successful login.
    pub fn login(&mut self, username: String, role: Role) {
        self.username = Some(username);
        self.role = Some(role);
    }

    /// Clears the logged-in user.
    pub fn logout(&mut self) {
        self.username = None;
        self.role = None;
    }

    pub fn is_logged_in(&self) -> bool {
        self.role.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Dashboard branch for the logged-in role, if any.
    pub fn view(&self) -> Option<DashboardView> {
        self.role.map(DashboardView::for_role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_and_logout() {
        let mut client = Client::default();
        assert!(!client.is_logged_in());
        assert!(client.view().is_none());

        client.login("alice".into(), Role::Analyst);
        assert!(client.is_logged_in());
        assert_eq!(client.username(), Some("alice"));
        assert_eq!(client.view(), Some(DashboardView::Analyst));

        client.logout();
        assert!(!client.is_logged_in());
        assert!(client.username().is_none());
        assert!(client.role().is_none());
    }
}
