//! Route guards.
//!
//! The render/redirect choice is a pure function of session state so the
//! router stays dumb: while the session is still loading neither variant
//! renders the destination or redirects, which keeps protected content from
//! flashing at anonymous users.

use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::auth::{Session, use_session};

/// The location a user tried to reach before being sent to login. Carried as
/// history state across the redirect and consumed once after authentication.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationIntent {
    pub from: Route,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GuardDecision {
    Placeholder,
    Grant,
    RedirectToLogin,
    RedirectTo(Route),
}

pub fn decide_authenticated(session: &Session) -> GuardDecision {
    if session.is_loading {
        GuardDecision::Placeholder
    } else if session.is_authenticated() {
        GuardDecision::Grant
    } else {
        GuardDecision::RedirectToLogin
    }
}

pub fn decide_anonymous(session: &Session, intent: Option<&NavigationIntent>) -> GuardDecision {
    if session.is_loading {
        GuardDecision::Placeholder
    } else if session.is_authenticated() {
        let target = intent.map_or(Route::Dashboard, |intent| intent.from.clone());
        GuardDecision::RedirectTo(target)
    } else {
        GuardDecision::Grant
    }
}

#[derive(Properties, PartialEq)]
pub struct GuardProps {
    #[prop_or_default]
    pub children: Html,
}

/// Renders its children only for an authenticated session; anonymous users
/// are redirected to login with the attempted location attached, replacing
/// history so Back does not loop into the guarded page.
#[function_component(RequireAuthenticated)]
pub fn require_authenticated(props: &GuardProps) -> Html {
    let session = use_session();
    let navigator = use_navigator().expect("router should be an ancestor");
    let attempted = use_route::<Route>().unwrap_or(Route::NotFound);

    let decision = decide_authenticated(&session);

    use_effect_with((decision.clone(), attempted), move |(decision, attempted)| {
        if *decision == GuardDecision::RedirectToLogin {
            navigator.replace_with_state(
                &Route::Login,
                NavigationIntent {
                    from: attempted.clone(),
                },
            );
        }
    });

    match decision {
        GuardDecision::Grant => props.children.clone(),
        _ => render_loading_placeholder(),
    }
}

/// Renders its children only for an anonymous session; authenticated users
/// are sent back to the location they originally tried to reach, or to the
/// dashboard when no intent was captured.
#[function_component(RequireAnonymous)]
pub fn require_anonymous(props: &GuardProps) -> Html {
    let session = use_session();
    let navigator = use_navigator().expect("router should be an ancestor");
    let intent = use_location().and_then(|location| location.state::<NavigationIntent>());

    let decision = decide_anonymous(&session, intent.as_deref());

    use_effect_with(decision.clone(), move |decision| {
        if let GuardDecision::RedirectTo(target) = decision {
            navigator.replace(target);
        }
    });

    match decision {
        GuardDecision::Grant => props.children.clone(),
        _ => render_loading_placeholder(),
    }
}

pub fn render_loading_placeholder() -> Html {
    html! {
        <div class="loading-screen">
            <i class="fa-solid fa-spinner fa-spin fa-2x"></i>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(is_loading: bool, authenticated: bool) -> Session {
        Session {
            user: authenticated.then(|| shared::User {
                id: "1".to_string(),
                name: "A".to_string(),
                email: "a@b.com".to_string(),
                picture_url: None,
            }),
            is_loading,
        }
    }

    #[test]
    fn loading_renders_placeholder_only() {
        let loading = session(true, false);

        assert_eq!(decide_authenticated(&loading), GuardDecision::Placeholder);
        assert_eq!(
            decide_anonymous(&loading, None),
            GuardDecision::Placeholder
        );
    }

    #[test]
    fn anonymous_user_is_sent_to_login() {
        let anonymous = session(false, false);

        assert_eq!(
            decide_authenticated(&anonymous),
            GuardDecision::RedirectToLogin
        );
    }

    #[test]
    fn captured_intent_wins_over_default_landing() {
        // Redirected away from the dashboard, then authenticated: the
        // anonymous guard must return to the exact captured location.
        let anonymous = session(false, false);
        assert_eq!(
            decide_authenticated(&anonymous),
            GuardDecision::RedirectToLogin
        );

        let authenticated = session(false, true);
        let intent = NavigationIntent {
            from: Route::Profile,
        };
        assert_eq!(
            decide_anonymous(&authenticated, Some(&intent)),
            GuardDecision::RedirectTo(Route::Profile)
        );
    }

    #[test]
    fn missing_intent_falls_back_to_dashboard() {
        let authenticated = session(false, true);

        assert_eq!(
            decide_anonymous(&authenticated, None),
            GuardDecision::RedirectTo(Route::Dashboard)
        );
    }

    #[test]
    fn resolved_sessions_grant_their_own_variant() {
        assert_eq!(
            decide_authenticated(&session(false, true)),
            GuardDecision::Grant
        );
        assert_eq!(
            decide_anonymous(&session(false, false), None),
            GuardDecision::Grant
        );
    }
}
