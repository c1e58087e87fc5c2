//! Clinical-measurements prediction tab.
//!
//! The measurements are posted to the tabular model; a successful prediction
//! is persisted before the history refresh fires, so the refreshed view is
//! guaranteed to contain the new record.

use std::collections::BTreeMap;

use web_sys::HtmlInputElement;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::components::results::render_tabular_result;
use crate::components::toast::{ToastContext, toast_error, toast_success};
use crate::components::utils::render_error_message;
use shared::Prediction;

const FIELDS: [(&str, &str); 24] = [
    ("age", "Age (years)"),
    ("bp", "Blood Pressure (mm/Hg)"),
    ("sg", "Specific Gravity (e.g. 1.005)"),
    ("al", "Albumin (0-5)"),
    ("su", "Sugar (0-5)"),
    ("rbc", "Red Blood Cells (normal/abnormal)"),
    ("pc", "Pus Cell (normal/abnormal)"),
    ("pcc", "Pus Cell Clumps (present/notpresent)"),
    ("ba", "Bacteria (present/notpresent)"),
    ("bgr", "Blood Glucose Random (mgs/dl)"),
    ("bu", "Blood Urea (mgs/dl)"),
    ("sc", "Serum Creatinine (mgs/dl)"),
    ("sod", "Sodium (mEq/L)"),
    ("pot", "Potassium (mEq/L)"),
    ("hemo", "Hemoglobin (gms)"),
    ("pcv", "Packed Cell Volume"),
    ("wc", "White Blood Cell Count (cells/cumm)"),
    ("rc", "Red Blood Cell Count (millions/cmm)"),
    ("htn", "Hypertension (yes/no)"),
    ("dm", "Diabetes Mellitus (yes/no)"),
    ("cad", "Coronary Artery Disease (yes/no)"),
    ("appet", "Appetite (good/poor)"),
    ("pe", "Pedal Edema (yes/no)"),
    ("ane", "Anemia (yes/no)"),
];

pub enum Msg {
    SetField(usize, String),
    Submit,
    Predicted {
        prediction: Box<Prediction>,
        saved: Result<(), String>,
    },
    Failed(String),
}

#[derive(Properties, PartialEq)]
pub struct PredictTabProps {
    pub on_saved: Callback<()>,
}

pub struct PredictTab {
    values: Vec<String>,
    loading: bool,
    result: Option<Prediction>,
    error: Option<String>,
}

impl Component for PredictTab {
    type Message = Msg;
    type Properties = PredictTabProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            values: vec![String::new(); FIELDS.len()],
            loading: false,
            result: None,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetField(index, value) => {
                self.values[index] = value;
                true
            }
            Msg::Submit => {
                if self.loading {
                    return false;
                }
                if self.values.iter().any(String::is_empty) {
                    self.error = Some("Please fill in all fields.".to_string());
                    return true;
                }

                self.loading = true;
                self.error = None;
                self.result = None;

                let form: BTreeMap<String, String> = FIELDS
                    .iter()
                    .zip(&self.values)
                    .map(|((key, _), value)| (key.to_string(), value.clone()))
                    .collect();

                let link = ctx.link().clone();
                spawn_local(async move {
                    match api::predict_tabular(&form).await {
                        Ok(prediction) => {
                            let saved = api::save_prediction(&form, &prediction)
                                .await
                                .map_err(|err| err.to_string());
                            link.send_message(Msg::Predicted {
                                prediction: Box::new(prediction),
                                saved,
                            });
                        }
                        Err(err) => link.send_message(Msg::Failed(err.to_string())),
                    }
                });
                true
            }
            Msg::Predicted { prediction, saved } => {
                self.loading = false;
                self.result = Some(*prediction);

                let toasts = self.toasts(ctx);
                match saved {
                    Ok(()) => {
                        toast_success(&toasts, "Prediction saved!");
                        ctx.props().on_saved.emit(());
                    }
                    Err(message) => {
                        log::warn!("prediction could not be saved: {message}");
                        toast_error(&toasts, message);
                    }
                }
                true
            }
            Msg::Failed(message) => {
                self.loading = false;
                self.error = Some(message.clone());
                toast_error(&self.toasts(ctx), message);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        let onsubmit = link.callback(|event: SubmitEvent| {
            event.prevent_default();
            Msg::Submit
        });

        html! {
            <div class="predict-tab">
                <h2>{"Clinical Measurements"}</h2>

                <form class="predict-form" {onsubmit}>
                    <div class="field-grid">
                        { for FIELDS.iter().enumerate().map(|(index, (key, label))| {
                            let oninput = link.callback(move |event: InputEvent| {
                                let input: HtmlInputElement = event.target_unchecked_into();
                                Msg::SetField(index, input.value())
                            });
                            html! {
                                <div class="field" key={*key}>
                                    <label for={*key}>{ *label }</label>
                                    <input
                                        type="text"
                                        id={*key}
                                        name={*key}
                                        value={self.values[index].clone()}
                                        {oninput}
                                    />
                                </div>
                            }
                        })}
                    </div>

                    <button type="submit" class="analyze-btn" disabled={self.loading}>
                        {
                            if self.loading {
                                html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Predicting..."}</> }
                            } else {
                                html! { "Predict" }
                            }
                        }
                    </button>
                </form>

                { render_error_message(self.error.as_deref()) }

                {
                    self.result.as_ref()
                        .map(render_tabular_result)
                        .unwrap_or_default()
                }
            </div>
        }
    }
}

impl PredictTab {
    fn toasts(&self, ctx: &Context<Self>) -> ToastContext {
        let (toasts, _) = ctx
            .link()
            .context::<ToastContext>(Callback::noop())
            .expect("ToastProvider should be an ancestor");
        toasts
    }
}
