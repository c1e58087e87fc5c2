use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api;
use crate::auth::{SessionAction, use_session};
use crate::components::toast::{toast_error, toast_success, use_toasts};

/// Profile settings: identity details and credential rotation. A successful
/// profile update re-resolves the session with the server's view of the user.
#[function_component(ProfilePage)]
pub fn profile_page() -> Html {
    let session = use_session();
    let toasts = use_toasts();

    let current_user = session.user.clone();
    let name = use_state(|| {
        current_user
            .as_ref()
            .map(|user| user.name.clone())
            .unwrap_or_default()
    });
    let email = use_state(|| {
        current_user
            .as_ref()
            .map(|user| user.email.clone())
            .unwrap_or_default()
    });
    let saving_profile = use_state(|| false);

    let password_current = use_state(String::new);
    let password = use_state(String::new);
    let password_confirm = use_state(String::new);
    let saving_password = use_state(|| false);

    let on_profile_submit = {
        let session = session.clone();
        let toasts = toasts.clone();
        let name = name.clone();
        let email = email.clone();
        let saving = saving_profile.clone();

        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *saving {
                return;
            }
            saving.set(true);

            let session = session.clone();
            let toasts = toasts.clone();
            let name_value = (*name).clone();
            let email_value = (*email).clone();
            let saving = saving.clone();
            spawn_local(async move {
                match api::update_profile(&name_value, &email_value).await {
                    Ok(user) => {
                        session.dispatch(SessionAction::Resolved(Some(user)));
                        toast_success(&toasts, "Profile updated!");
                    }
                    Err(err) => toast_error(&toasts, err.to_string()),
                }
                saving.set(false);
            });
        })
    };

    let on_password_submit = {
        let toasts = toasts.clone();
        let password_current = password_current.clone();
        let password = password.clone();
        let password_confirm = password_confirm.clone();
        let saving = saving_password.clone();

        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *saving {
                return;
            }
            if *password != *password_confirm {
                toast_error(&toasts, "Passwords do not match");
                return;
            }
            saving.set(true);

            let toasts = toasts.clone();
            let current_value = (*password_current).clone();
            let password_value = (*password).clone();
            let confirm_value = (*password_confirm).clone();
            let password_current = password_current.clone();
            let password = password.clone();
            let password_confirm = password_confirm.clone();
            let saving = saving.clone();
            spawn_local(async move {
                match api::update_password(&current_value, &password_value, &confirm_value).await {
                    Ok(()) => {
                        toast_success(&toasts, "Password updated!");
                        password_current.set(String::new());
                        password.set(String::new());
                        password_confirm.set(String::new());
                    }
                    Err(err) => toast_error(&toasts, err.to_string()),
                }
                saving.set(false);
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
        <div class="profile-page">
            <h2>{"Profile"}</h2>

            <form class="profile-form" onsubmit={on_profile_submit}>
                <h3>{"Account details"}</h3>
                <div class="field">
                    <label for="profile-name">{"Name"}</label>
                    <input id="profile-name" type="text" value={(*name).clone()} oninput={text_input(&name)} required=true />
                </div>
                <div class="field">
                    <label for="profile-email">{"Email"}</label>
                    <input id="profile-email" type="email" value={(*email).clone()} oninput={text_input(&email)} required=true />
                </div>
                <button type="submit" class="analyze-btn" disabled={*saving_profile}>
                    { if *saving_profile { "Saving..." } else { "Save changes" } }
                </button>
            </form>

            <form class="profile-form" onsubmit={on_password_submit}>
                <h3>{"Change password"}</h3>
                <div class="field">
                    <label for="password-current">{"Current password"}</label>
                    <input id="password-current" type="password" value={(*password_current).clone()} oninput={text_input(&password_current)} required=true />
                </div>
                <div class="field">
                    <label for="password-new">{"New password"}</label>
                    <input id="password-new" type="password" minlength="8" value={(*password).clone()} oninput={text_input(&password)} required=true />
                </div>
                <div class="field">
                    <label for="password-new-confirm">{"Confirm new password"}</label>
                    <input id="password-new-confirm" type="password" minlength="8" value={(*password_confirm).clone()} oninput={text_input(&password_confirm)} required=true />
                </div>
                <button type="submit" class="analyze-btn" disabled={*saving_password}>
                    { if *saving_password { "Updating..." } else { "Update password" } }
                </button>
            </form>
        </div>
    }
}
