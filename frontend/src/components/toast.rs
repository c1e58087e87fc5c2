//! Dismissible notification stack.
//!
//! Transient failures and confirmations surface here instead of propagating
//! into rendering code. Each toast auto-expires; clicking dismisses early.

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

const TOAST_TTL_MS: u32 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

impl ToastLevel {
    fn class(self) -> &'static str {
        match self {
            ToastLevel::Success => "toast toast-success",
            ToastLevel::Error => "toast toast-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub level: ToastLevel,
    pub message: String,
}

pub enum ToastAction {
    Push(ToastLevel, String),
    Dismiss(u32),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Toasts {
    items: Vec<Toast>,
    next_id: u32,
}

impl Reducible for Toasts {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push(level, message) => {
                next.items.push(Toast {
                    id: next.next_id,
                    level,
                    message,
                });
                next.next_id = next.next_id.wrapping_add(1);
            }
            ToastAction::Dismiss(id) => {
                next.items.retain(|toast| toast.id != id);
            }
        }
        next.into()
    }
}

pub type ToastContext = UseReducerHandle<Toasts>;

#[hook]
pub fn use_toasts() -> ToastContext {
    use_context::<ToastContext>().expect("ToastProvider should be an ancestor")
}

pub fn toast_success(toasts: &ToastContext, message: impl Into<String>) {
    toasts.dispatch(ToastAction::Push(ToastLevel::Success, message.into()));
}

pub fn toast_error(toasts: &ToastContext, message: impl Into<String>) {
    toasts.dispatch(ToastAction::Push(ToastLevel::Error, message.into()));
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    #[prop_or_default]
    pub children: Html,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let toasts = use_reducer(Toasts::default);

    let on_dismiss = {
        let toasts = toasts.clone();
        Callback::from(move |id: u32| toasts.dispatch(ToastAction::Dismiss(id)))
    };

    html! {
        <ContextProvider<ToastContext> context={toasts.clone()}>
            { props.children.clone() }
            <div class="toast-container">
                { for toasts.items.iter().map(|toast| html! {
                    <ToastItem key={toast.id} toast={toast.clone()} on_dismiss={on_dismiss.clone()} />
                })}
            </div>
        </ContextProvider<ToastContext>>
    }
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
    on_dismiss: Callback<u32>,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    let id = props.toast.id;

    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with(id, move |_| {
            let timeout = Timeout::new(TOAST_TTL_MS, move || on_dismiss.emit(id));
            move || drop(timeout)
        });
    }

    let onclick = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_| on_dismiss.emit(id))
    };

    html! {
        <div class={props.toast.level.class()} {onclick}>
            <p>{ &props.toast.message }</p>
        </div>
    }
}
