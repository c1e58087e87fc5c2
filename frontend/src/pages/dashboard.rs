//! Authenticated dashboard: overview, scan upload, clinical prediction and
//! detection history behind one tab bar. Owns the fetched history list;
//! the upload and predict tabs signal it to refresh after a saved result.

use shared::{DetectionRecord, Prediction};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::{self, ApiError};
use crate::auth::SessionContext;
use crate::components::history::render_history;
use crate::components::predict::PredictTab;
use crate::components::toast::{ToastContext, toast_error};
use crate::components::upload::UploadTab;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Upload,
    Predict,
    History,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Overview, Tab::Upload, Tab::Predict, Tab::History];

    fn label(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Upload => "Upload Scan",
            Tab::Predict => "Clinical Data",
            Tab::History => "History",
        }
    }
}

pub enum Msg {
    SetTab(Tab),
    Refresh,
    Loaded(Result<Vec<DetectionRecord>, ApiError>),
}

pub struct DashboardPage {
    tab: Tab,
    records: Vec<DetectionRecord>,
    loading: bool,
}

impl Component for DashboardPage {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message(Msg::Refresh);
        Self {
            tab: Tab::Overview,
            records: Vec::new(),
            loading: true,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetTab(tab) => {
                if self.tab == tab {
                    return false;
                }
                self.tab = tab;
                true
            }
            Msg::Refresh => {
                self.loading = true;
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::Loaded(api::list_detections().await));
                });
                true
            }
            Msg::Loaded(Ok(records)) => {
                self.records = records;
                self.loading = false;
                true
            }
            Msg::Loaded(Err(err)) => {
                log::error!("failed to fetch detections: {err}");
                self.loading = false;
                if let Some((toasts, _)) = ctx.link().context::<ToastContext>(Callback::noop()) {
                    toast_error(&toasts, "Failed to load scan history");
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        html! {
            <div class="dashboard">
                <h1>{"Kidney Cancer Detection"}</h1>

                <nav class="tab-bar">
                    { for Tab::ALL.iter().map(|tab| {
                        let tab = *tab;
                        let is_active = self.tab == tab;
                        html! {
                            <button
                                class={classes!("tab-button", is_active.then_some("active"))}
                                onclick={link.callback(move |_| Msg::SetTab(tab))}
                            >
                                { tab.label() }
                            </button>
                        }
                    })}
                </nav>

                <div class="tab-content">
                    { self.render_tab(ctx) }
                </div>
            </div>
        }
    }
}

impl DashboardPage {
    fn render_tab(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        match self.tab {
            Tab::Overview => self.render_overview(ctx),
            Tab::Upload => html! {
                <UploadTab on_saved={link.callback(|_| Msg::Refresh)} />
            },
            Tab::Predict => html! {
                <PredictTab on_saved={link.callback(|_| Msg::Refresh)} />
            },
            Tab::History => render_history(&self.records, self.loading),
        }
    }

    fn render_overview(&self, ctx: &Context<Self>) -> Html {
        let greeting = ctx
            .link()
            .context::<SessionContext>(Callback::noop())
            .and_then(|(session, _)| session.user.as_ref().map(|user| user.name.clone()))
            .unwrap_or_else(|| "User".to_string());

        let total = self.records.len();
        let normal = self
            .records
            .iter()
            .filter(|record| record.prediction.as_ref().is_some_and(is_normal))
            .count();
        let abnormal = self
            .records
            .iter()
            .filter(|record| {
                record
                    .prediction
                    .as_ref()
                    .is_some_and(|prediction| !is_normal(prediction))
            })
            .count();

        html! {
            <div class="overview">
                <h2>{ format!("Welcome back, {greeting}") }</h2>

                <div class="stat-cards">
                    <div class="stat-card">
                        <h3>{"Total Records"}</h3>
                        <p class="stat-value">{ total }</p>
                    </div>
                    <div class="stat-card stat-ok">
                        <h3>{"Normal Results"}</h3>
                        <p class="stat-value">{ normal }</p>
                    </div>
                    <div class="stat-card stat-danger">
                        <h3>{"Abnormal Results"}</h3>
                        <p class="stat-value">{ abnormal }</p>
                    </div>
                </div>

                <div class="recent-activity">
                    <h3>{"Recent Activity"}</h3>
                    {
                        if self.loading {
                            html! { <i class="fa-solid fa-spinner fa-spin"></i> }
                        } else if self.records.is_empty() {
                            html! { <p>{"No activity yet."}</p> }
                        } else {
                            html! { for self.records.iter().take(3).map(render_activity_row) }
                        }
                    }
                </div>
            </div>
        }
    }
}

fn is_normal(prediction: &Prediction) -> bool {
    matches!(prediction.prediction.as_str(), "Normal" | "notckd")
}

fn render_activity_row(record: &DetectionRecord) -> Html {
    let label = record
        .prediction
        .as_ref()
        .map_or("Pending", |prediction| prediction.prediction.as_str());

    html! {
        <div class="activity-row" key={record.id.clone()}>
            <div>
                <p class="activity-kind">{ record.kind().to_string() }</p>
                <p class="activity-date">{ record.created_at.format("%Y-%m-%d").to_string() }</p>
            </div>
            <span class="entry-badge">{ label }</span>
        </div>
    }
}
