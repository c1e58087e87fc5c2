use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::auth::{signup, use_session};
use crate::components::toast::use_toasts;
use crate::components::utils::render_error_message;

#[function_component(SignupPage)]
pub fn signup_page() -> Html {
    let session = use_session();
    let toasts = use_toasts();

    let name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let password_confirm = use_state(String::new);
    let submitting = use_state(|| false);
    let error = use_state(|| None::<String>);

    let onsubmit = {
        let session = session.clone();
        let toasts = toasts.clone();
        let name = name.clone();
        let email = email.clone();
        let password = password.clone();
        let password_confirm = password_confirm.clone();
        let submitting = submitting.clone();
        let error = error.clone();

        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *submitting {
                return;
            }
            if name.is_empty() || email.is_empty() || password.is_empty() {
                error.set(Some("Please fill in all fields.".to_string()));
                return;
            }
            if *password != *password_confirm {
                error.set(Some("Passwords do not match.".to_string()));
                return;
            }

            submitting.set(true);
            error.set(None);

            let session = session.clone();
            let toasts = toasts.clone();
            let name_value = (*name).clone();
            let email_value = (*email).clone();
            let password_value = (*password).clone();
            let confirm_value = (*password_confirm).clone();
            let submitting = submitting.clone();
            let error = error.clone();
            spawn_local(async move {
                let outcome = signup(
                    &session,
                    &toasts,
                    &name_value,
                    &email_value,
                    &password_value,
                    &confirm_value,
                )
                .await;
                if let Err(message) = outcome {
                    error.set(Some(message));
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
            <h2>{"Create your account"}</h2>
            <form class="auth-form" {onsubmit}>
                { render_error_message((*error).as_deref()) }
                <div class="field">
                    <label for="name">{"Full name"}</label>
                    <input id="name" type="text" value={(*name).clone()} oninput={text_input(&name)} required=true />
                </div>
                <div class="field">
                    <label for="email">{"Email address"}</label>
                    <input id="email" type="email" value={(*email).clone()} oninput={text_input(&email)} required=true />
                </div>
                <div class="field">
                    <label for="password">{"Password"}</label>
                    <input id="password" type="password" minlength="8" value={(*password).clone()} oninput={text_input(&password)} required=true />
                </div>
                <div class="field">
                    <label for="password-confirm">{"Confirm password"}</label>
                    <input id="password-confirm" type="password" minlength="8" value={(*password_confirm).clone()} oninput={text_input(&password_confirm)} required=true />
                </div>
                <button type="submit" class="analyze-btn" disabled={*submitting}>
                    {
                        if *submitting {
                            html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Creating account..."}</> }
                        } else {
                            html! { "Sign up" }
                        }
                    }
                </button>
            </form>
        </div>
    }
}
