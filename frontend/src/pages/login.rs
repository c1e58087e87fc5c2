use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::auth::{login, use_session};
use crate::components::toast::use_toasts;
use crate::components::utils::render_error_message;

/// Credential form. On success the session updates and the anonymous route
/// guard takes the user back to wherever they were headed.
#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let session = use_session();
    let toasts = use_toasts();

    let email = use_state(String::new);
    let password = use_state(String::new);
    let submitting = use_state(|| false);
    let error = use_state(|| None::<String>);

    let onsubmit = {
        let session = session.clone();
        let toasts = toasts.clone();
        let email = email.clone();
        let password = password.clone();
        let submitting = submitting.clone();
        let error = error.clone();

        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *submitting {
                return;
            }
            if email.is_empty() || password.is_empty() {
                error.set(Some("Please fill in all fields.".to_string()));
                return;
            }

            submitting.set(true);
            error.set(None);

            let session = session.clone();
            let toasts = toasts.clone();
            let email_value = (*email).clone();
            let password_value = (*password).clone();
            let submitting = submitting.clone();
            let error = error.clone();
            spawn_local(async move {
                if let Err(message) = login(&session, &toasts, &email_value, &password_value).await {
                    error.set(Some(message));
                }
                submitting.set(false);
            });
        })
    };

    let on_email = {
        let email = email.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            email.set(input.value());
        })
    };
    let on_password = {
        let password = password.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            password.set(input.value());
        })
    };

    html! {
        <div class="auth-page">
            <h2>{"Sign in to your account"}</h2>
            <form class="auth-form" {onsubmit}>
                { render_error_message((*error).as_deref()) }
                <div class="field">
                    <label for="email">{"Email address"}</label>
                    <input id="email" type="email" value={(*email).clone()} oninput={on_email} required=true />
                </div>
                <div class="field">
                    <label for="password">{"Password"}</label>
                    <input id="password" type="password" value={(*password).clone()} oninput={on_password} required=true />
                </div>
                <button type="submit" class="analyze-btn" disabled={*submitting}>
                    {
                        if *submitting {
                            html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Signing in..."}</> }
                        } else {
                            html! { "Sign in" }
                        }
                    }
                </button>
            </form>
        </div>
    }
}
