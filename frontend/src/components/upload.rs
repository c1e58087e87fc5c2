//! Upload-and-analyze tab: drives one `UploadTask` at a time.

use gloo_file::File as GlooFile;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api::{self, ApiError};
use crate::components::results::render_prediction_result;
use crate::components::toast::{ToastContext, toast_error, toast_success};
use crate::components::utils::{debounce, render_error_message};
use crate::workflow::UploadTask;
use shared::Prediction;

pub enum Msg {
    FileSelected(GlooFile),
    Submit,
    Completed(Result<Prediction, ApiError>),
}

#[derive(Properties, PartialEq)]
pub struct UploadTabProps {
    /// Fired once per successfully saved analysis so the dashboard can pull
    /// the new record into the history view.
    pub on_saved: Callback<()>,
}

pub struct UploadTab {
    task: UploadTask<GlooFile>,
    error: Option<String>,
}

impl Component for UploadTab {
    type Message = Msg;
    type Properties = UploadTabProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            task: UploadTask::default(),
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FileSelected(file) => {
                self.error = None;
                self.task.select_file(file);
                true
            }
            Msg::Submit => {
                let Some(file) = self.task.begin_submit() else {
                    return false;
                };
                self.error = None;

                let link = ctx.link().clone();
                spawn_local(async move {
                    let outcome = api::upload_detection(&file).await;
                    link.send_message(Msg::Completed(outcome));
                });
                true
            }
            Msg::Completed(outcome) => {
                let toasts = self.toasts(ctx);
                match outcome {
                    Ok(prediction) => {
                        let refresh = self.task.complete(Ok(prediction));
                        toast_success(&toasts, "Scan analyzed successfully!");
                        if refresh {
                            ctx.props().on_saved.emit(());
                        }
                    }
                    Err(err) => {
                        let message = err.to_string();
                        self.task.complete(Err(message.clone()));
                        self.error = Some(message.clone());
                        toast_error(&toasts, message);
                    }
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        let onchange = link.batch_callback(|event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let file = input
                .files()
                .and_then(|files| files.item(0))
                .map(GlooFile::from);
            // Allow re-selecting the same file to count as a fresh choice.
            input.set_value("");
            file.map(Msg::FileSelected)
        });

        let trigger_file_input = Callback::from(|_| {
            if let Some(input) = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.get_element_by_id("scan-file-input"))
            {
                if let Ok(html_input) = input.dyn_into::<web_sys::HtmlElement>() {
                    html_input.click();
                }
            }
        });

        let can_submit = self.task.file().is_some() && !self.task.is_uploading();

        html! {
            <div class="upload-tab">
                <h2>{"Upload New Scan"}</h2>

                <input
                    type="file"
                    id="scan-file-input"
                    accept="image/*,.dcm,application/dicom"
                    style="display: none;"
                    {onchange}
                />

                <div
                    class="upload-area"
                    onclick={debounce(300, {
                        let trigger_file_input = trigger_file_input.clone();
                        move || trigger_file_input.emit(())
                    })}
                >
                    <div class="upload-placeholder">
                        <i class="fa-solid fa-cloud-arrow-up"></i>
                        <p>{"Select a CT scan image"}</p>
                        <p class="file-types">{"PNG, JPG, DICOM up to 10MB"}</p>
                    </div>
                </div>

                {
                    self.task.file().map(|file| html! {
                        <div class="selected-file">
                            <p>{"Selected file: "}{ file.name() }</p>
                        </div>
                    }).unwrap_or_default()
                }

                <button
                    class="analyze-btn"
                    disabled={!can_submit}
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::Submit)
                    })}
                >
                    { self.render_submit_button_content() }
                </button>

                { render_error_message(self.error.as_deref()) }

                {
                    self.task.result()
                        .map(render_prediction_result)
                        .unwrap_or_default()
                }
            </div>
        }
    }
}

impl UploadTab {
    fn toasts(&self, ctx: &Context<Self>) -> ToastContext {
        let (toasts, _) = ctx
            .link()
            .context::<ToastContext>(Callback::noop())
            .expect("ToastProvider should be an ancestor");
        toasts
    }

    fn render_submit_button_content(&self) -> Html {
        if self.task.is_uploading() {
            html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Uploading..."}</> }
        } else {
            html! { <><i class="fa-solid fa-magnifying-glass"></i>{" Upload and Analyze"}</> }
        }
    }
}
