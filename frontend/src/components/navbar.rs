use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::auth::{logout, use_session};
use crate::config::APP_NAME;

/// Session-aware navigation bar. Logging out clears the session; the route
/// guards take care of moving the user off any protected page.
#[function_component(Navbar)]
pub fn navbar() -> Html {
    let session = use_session();

    let on_logout = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| {
            let session = session.clone();
            spawn_local(async move {
                logout(&session).await;
            });
        })
    };

    let links = if session.is_loading {
        html! {}
    } else if let Some(user) = &session.user {
        html! {
            <>
                <Link<Route> classes="nav-link" to={Route::Dashboard}>{"Dashboard"}</Link<Route>>
                <Link<Route> classes="nav-link" to={Route::Profile}>{"Profile"}</Link<Route>>
                <span class="nav-user">{ &user.name }</span>
                <button class="nav-link logout-button" onclick={on_logout}>
                    <i class="fa-solid fa-sign-out-alt"></i>{" Logout"}
                </button>
            </>
        }
    } else {
        html! {
            <>
                <Link<Route> classes="nav-link" to={Route::Login}>{"Login"}</Link<Route>>
                <Link<Route> classes="nav-link" to={Route::Signup}>{"Sign Up"}</Link<Route>>
            </>
        }
    };

    html! {
        <nav class="navbar">
            <Link<Route> classes="nav-brand" to={Route::Home}>{ APP_NAME }</Link<Route>>
            <div class="nav-links">
                { links }
            </div>
        </nav>
    }
}
