//! Process-wide session state.
//!
//! The session is the single source of truth for authentication. All
//! mutation funnels through the reducer actions below; the only other path
//! that can end a session is the API client's 401 safety net, which forces
//! a full navigation and therefore a fresh bootstrap.

use std::rc::Rc;

use gloo_storage::{LocalStorage, Storage};
use shared::User;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::components::toast::{ToastContext, toast_error, toast_success};

const AUTH_TOKEN_KEY: &str = "auth_token";

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub is_loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            user: None,
            is_loading: true,
        }
    }
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

pub enum SessionAction {
    /// Outcome of the one-time bootstrap, or an identity refresh.
    Resolved(Option<User>),
    LoggedIn(User),
    LoggedOut,
}

impl Reducible for Session {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            SessionAction::Resolved(user) => Session {
                user,
                is_loading: false,
            },
            SessionAction::LoggedIn(user) => Session {
                user: Some(user),
                is_loading: false,
            },
            SessionAction::LoggedOut => Session {
                user: None,
                is_loading: false,
            },
        }
        .into()
    }
}

pub type SessionContext = UseReducerHandle<Session>;

#[hook]
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionProvider should be an ancestor")
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    #[prop_or_default]
    pub children: Html,
}

/// Owns the session and performs the single "who am I" bootstrap on mount.
/// A failed bootstrap resolves to an anonymous session so the app always
/// renders in a logged-out state rather than failing.
#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let session = use_reducer(Session::default);

    {
        let session = session.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api::current_user().await {
                    Ok(user) => {
                        log::info!("session restored for {}", user.email);
                        session.dispatch(SessionAction::Resolved(Some(user)));
                    }
                    Err(err) => {
                        log::info!("no active session: {err}");
                        end_session(&session).await;
                    }
                }
            });
        });
    }

    html! {
        <ContextProvider<SessionContext> context={session}>
            { props.children.clone() }
        </ContextProvider<SessionContext>>
    }
}

pub async fn login(
    session: &SessionContext,
    toasts: &ToastContext,
    email: &str,
    password: &str,
) -> Result<(), String> {
    match api::login(email, password).await {
        Ok(response) => {
            remember_token(response.token);
            session.dispatch(SessionAction::LoggedIn(response.data.user));
            toast_success(toasts, "Logged in successfully!");
            Ok(())
        }
        Err(err) => {
            let message = err.to_string();
            toast_error(toasts, &message);
            Err(message)
        }
    }
}

pub async fn signup(
    session: &SessionContext,
    toasts: &ToastContext,
    name: &str,
    email: &str,
    password: &str,
    password_confirm: &str,
) -> Result<(), String> {
    match api::signup(name, email, password, password_confirm).await {
        Ok(response) => {
            remember_token(response.token);
            session.dispatch(SessionAction::LoggedIn(response.data.user));
            toast_success(toasts, "Account created successfully!");
            Ok(())
        }
        Err(err) => {
            let message = err.to_string();
            toast_error(toasts, &message);
            Err(message)
        }
    }
}

/// Notifies the auth service best-effort, then unconditionally clears local
/// session state. A remote failure is logged, never surfaced.
pub async fn logout(session: &SessionContext) {
    end_session(session).await;
}

async fn end_session(session: &SessionContext) {
    if let Err(err) = api::logout().await {
        log::warn!("logout request failed: {err}");
    }
    LocalStorage::delete(AUTH_TOKEN_KEY);
    session.dispatch(SessionAction::LoggedOut);
}

fn remember_token(token: Option<String>) {
    if let Some(token) = token {
        if let Err(err) = LocalStorage::set(AUTH_TOKEN_KEY, token) {
            log::warn!("failed to cache auth token: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, name: &str) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{id}@example.com"),
            picture_url: None,
        }
    }

    #[test]
    fn starts_loading_and_anonymous() {
        let session = Session::default();

        assert!(session.is_loading);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn login_resolves_identity() {
        let session = Rc::new(Session::default());
        let session = session.reduce(SessionAction::LoggedIn(user("1", "A")));

        assert!(!session.is_loading);
        assert!(session.is_authenticated());
        let identity = session.user.as_ref().unwrap();
        assert_eq!(identity.id, "1");
        assert_eq!(identity.name, "A");
    }

    #[test]
    fn bootstrap_failure_resolves_anonymous_not_fatal() {
        let session = Rc::new(Session::default());
        let session = session.reduce(SessionAction::Resolved(None));

        assert!(!session.is_loading);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn logout_always_clears_identity() {
        let session = Rc::new(Session::default());
        let session = session.reduce(SessionAction::LoggedIn(user("1", "A")));
        // The remote call's outcome is irrelevant to local state.
        let session = session.reduce(SessionAction::LoggedOut);

        assert!(session.user.is_none());
        assert!(!session.is_loading);
    }
}
