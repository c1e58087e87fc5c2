use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::auth::use_session;
use crate::config::APP_NAME;

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let session = use_session();

    let cta = if session.is_authenticated() {
        html! { <Link<Route> classes="analyze-btn" to={Route::Dashboard}>{"Go to Dashboard"}</Link<Route>> }
    } else {
        html! { <Link<Route> classes="analyze-btn" to={Route::Login}>{"Get Started"}</Link<Route>> }
    };

    html! {
        <div class="home-page">
            <header class="hero">
                <h1>{ APP_NAME }</h1>
                <p class="subtitle">
                    {"Upload kidney CT scans or clinical measurements and get a model-backed diagnosis in seconds."}
                </p>
                { cta }
            </header>
        </div>
    }
}
