use yew::prelude::*;
use yew_router::prelude::*;

mod api;
mod auth;
mod config;
mod guard;
mod workflow;

mod components {
    pub mod history;
    pub mod navbar;
    pub mod predict;
    pub mod results;
    pub mod toast;
    pub mod upload;
    pub mod utils;
}

mod pages {
    pub mod dashboard;
    pub mod home;
    pub mod login;
    pub mod profile;
    pub mod reset_password;
    pub mod signup;
}

use auth::SessionProvider;
use components::navbar::Navbar;
use components::toast::ToastProvider;
use guard::{RequireAnonymous, RequireAuthenticated};
use pages::dashboard::DashboardPage;
use pages::home::HomePage;
use pages::login::LoginPage;
use pages::profile::ProfilePage;
use pages::reset_password::ResetPasswordPage;
use pages::signup::SignupPage;

#[derive(Debug, Clone, PartialEq, Routable)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/signup")]
    Signup,
    #[at("/dashboard")]
    Dashboard,
    #[at("/profile")]
    Profile,
    #[at("/reset-password/:token")]
    ResetPassword { token: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html!(<HomePage />),

        // Only reachable while anonymous; the guard returns authenticated
        // users to their captured destination.
        Route::Login => html!(
            <RequireAnonymous>
                <LoginPage />
            </RequireAnonymous>
        ),
        Route::Signup => html!(
            <RequireAnonymous>
                <SignupPage />
            </RequireAnonymous>
        ),

        Route::Dashboard => html!(
            <RequireAuthenticated>
                <DashboardPage />
            </RequireAuthenticated>
        ),
        Route::Profile => html!(
            <RequireAuthenticated>
                <ProfilePage />
            </RequireAuthenticated>
        ),

        Route::ResetPassword { token } => html!(<ResetPasswordPage {token} />),

        Route::NotFound => html!(
            <div class="not-found">
                <h1>{"404"}</h1>
                <p>{"Page not found"}</p>
            </div>
        ),
    }
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <BrowserRouter>
            <ToastProvider>
                <SessionProvider>
                    <Navbar />
                    <main class="main-content">
                        <Switch<Route> render={switch} />
                    </main>
                </SessionProvider>
            </ToastProvider>
        </BrowserRouter>
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<App>::new().render();
}
