//! Log in/out status, greeting and user account actions.

use cornerstore_core::User;
use serde::Serialize;

/// What the identity provider reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub is_loading: bool,
    pub is_authenticated: bool,
    pub user: Option<User>,
}

/// The header auth widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum AuthStatus {
    Loading,
    LoggedOut,
    LoggedIn { name: String },
}

impl AuthStatus {
    /// Authenticated states without a user fall back to `LoggedOut`.
    #[must_use]
    pub fn from_state(state: &AuthState) -> Self {
        if state.is_loading {
            return Self::Loading;
        }
        match (&state.user, state.is_authenticated) {
            (Some(user), true) => Self::LoggedIn {
                name: user.name.clone(),
            },
            _ => Self::LoggedOut,
        }
    }

    /// Label of the action button, `None` while loading.
    #[must_use]
    pub const fn action_label(&self) -> Option<&'static str> {
        match self {
            Self::Loading => None,
            Self::LoggedOut => Some("Log In"),
            Self::LoggedIn { .. } => Some("Log Out"),
        }
    }

    #[must_use]
    pub fn greeting(&self) -> Greeting {
        match self {
            Self::LoggedIn { name } => Greeting::new(Some(name)),
            Self::Loading | Self::LoggedOut => Greeting::new(None),
        }
    }
}

/// Header greeting: a heading for a known name, otherwise a login button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Greeting {
    Heading { text: String },
    Login { label: &'static str },
}

impl Greeting {
    /// A blank name counts as no name.
    #[must_use]
    pub fn new(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            Some(name) if !name.is_empty() => Self::Heading {
                text: format!("Hello {name}"),
            },
            _ => Self::Login { label: "Login" },
        }
    }
}

/// Account summary for a signed-in user.
#[derive(Debug, Clone, Copy)]
pub struct UserAccount<'a> {
    user: &'a User,
}

impl<'a> UserAccount<'a> {
    #[must_use]
    pub const fn new(user: &'a User) -> Self {
        Self { user }
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.user.name
    }

    /// Admins get an "Edit" action.
    #[must_use]
    pub const fn edit_action(&self) -> Option<&'static str> {
        if self.user.is_admin { Some("Edit") } else { None }
    }
}

#[cfg(test)]
mod tests {
    use cornerstore_core::UserId;

    use super::*;

    fn user(is_admin: bool) -> User {
        User {
            id: UserId::new(1),
            name: "Ada".to_string(),
            is_admin,
        }
    }

    #[test]
    fn test_loading() {
        let state = AuthState {
            is_loading: true,
            ..AuthState::default()
        };
        let status = AuthStatus::from_state(&state);
        assert_eq!(status, AuthStatus::Loading);
        assert_eq!(status.action_label(), None);
    }

    #[test]
    fn test_logged_out() {
        let status = AuthStatus::from_state(&AuthState::default());
        assert_eq!(status, AuthStatus::LoggedOut);
        assert_eq!(status.action_label(), Some("Log In"));
        assert_eq!(status.greeting(), Greeting::Login { label: "Login" });
    }

    #[test]
    fn test_logged_in_shows_name() {
        let state = AuthState {
            is_loading: false,
            is_authenticated: true,
            user: Some(user(false)),
        };
        let status = AuthStatus::from_state(&state);
        assert_eq!(
            status,
            AuthStatus::LoggedIn {
                name: "Ada".to_string()
            }
        );
        assert_eq!(status.action_label(), Some("Log Out"));
        assert_eq!(
            status.greeting(),
            Greeting::Heading {
                text: "Hello Ada".to_string()
            }
        );
    }

    #[test]
    fn test_authenticated_without_user_is_logged_out() {
        let state = AuthState {
            is_loading: false,
            is_authenticated: true,
            user: None,
        };
        assert_eq!(AuthStatus::from_state(&state), AuthStatus::LoggedOut);
    }

    #[test]
    fn test_greeting_with_name() {
        assert_eq!(
            Greeting::new(Some("Diego")),
            Greeting::Heading {
                text: "Hello Diego".to_string()
            }
        );
    }

    #[test]
    fn test_greeting_without_name_offers_login() {
        assert_eq!(Greeting::new(None), Greeting::Login { label: "Login" });
        assert_eq!(Greeting::new(Some("  ")), Greeting::Login { label: "Login" });
    }

    #[test]
    fn test_user_account_edit_for_admins() {
        let admin = user(true);
        let shopper = user(false);

        assert_eq!(UserAccount::new(&admin).edit_action(), Some("Edit"));
        assert_eq!(UserAccount::new(&shopper).edit_action(), None);
        assert_eq!(UserAccount::new(&shopper).name(), "Ada");
    }
}
