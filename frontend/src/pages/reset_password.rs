use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::api;
use crate::components::toast::{toast_error, toast_success, use_toasts};

#[derive(Properties, PartialEq)]
pub struct ResetPasswordProps {
    /// One-time token from the emailed reset link.
    pub token: String,
}

#[function_component(ResetPasswordPage)]
pub fn reset_password_page(props: &ResetPasswordProps) -> Html {
    let toasts = use_toasts();
    let navigator = use_navigator().expect("router should be an ancestor");

    let password = use_state(String::new);
    let password_confirm = use_state(String::new);
    let submitting = use_state(|| false);
    // Flips once the server rejects the token; the backend is the authority.
    let valid_token = use_state(|| true);

    if !*valid_token {
        return html! {
            <div class="auth-page">
                <h2>{"Invalid or Expired Link"}</h2>
                <p>{"The password reset link is invalid or has expired. Please request a new one."}</p>
                <Link<Route> classes="nav-link" to={Route::Login}>{"Back to login"}</Link<Route>>
            </div>
        };
    }

    let onsubmit = {
        let toasts = toasts.clone();
        let navigator = navigator.clone();
        let token = props.token.clone();
        let password = password.clone();
        let password_confirm = password_confirm.clone();
        let submitting = submitting.clone();
        let valid_token = valid_token.clone();

        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *submitting {
                return;
            }
            if *password != *password_confirm {
                toast_error(&toasts, "Passwords do not match");
                return;
            }

            submitting.set(true);

            let toasts = toasts.clone();
            let navigator = navigator.clone();
            let token = token.clone();
            let password_value = (*password).clone();
            let confirm_value = (*password_confirm).clone();
            let submitting = submitting.clone();
            let valid_token = valid_token.clone();
            spawn_local(async move {
                match api::reset_password(&token, &password_value, &confirm_value).await {
                    Ok(()) => {
                        toast_success(&toasts, "Password reset successfully!");
                        navigator.push(&Route::Login);
                    }
                    Err(err) => {
                        toast_error(&toasts, err.to_string());
                        valid_token.set(false);
                    }
                }
                submitting.set(false);
            });
        })
    };

    let text_input = |handle: &UseStateHandle<String>| {
        let handle = handle.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            handle.set(input.value());
        })
    };

    html! {
        <div class="auth-page">
            <h2>{"Reset Your Password"}</h2>
            <p>{"Enter your new password below"}</p>
            <form class="auth-form" {onsubmit}>
                <div class="field">
                    <label for="new-password">{"New Password"}</label>
                    <input id="new-password" type="password" minlength="8" value={(*password).clone()} oninput={text_input(&password)} required=true />
                </div>
                <div class="field">
                    <label for="new-password-confirm">{"Confirm New Password"}</label>
                    <input id="new-password-confirm" type="password" minlength="8" value={(*password_confirm).clone()} oninput={text_input(&password_confirm)} required=true />
                </div>
                <button type="submit" class="analyze-btn" disabled={*submitting}>
                    { if *submitting { "Resetting..." } else { "Reset Password" } }
                </button>
            </form>
        </div>
    }
}
