//! History view: a pure function of the fetched detection list.
//!
//! Records are split into scan and clinical groups by the image-payload
//! rule alone; every prediction sub-field is optional and an absent field
//! omits its fragment instead of failing.

use shared::{DetectionRecord, RecordKind, partition_by_kind};
use yew::prelude::*;

use crate::components::results::render_confidence_meter;

/// Converts a record's stored image payload into something an `<img>` tag
/// can display. Pure; returns `None` for tabular records.
pub fn image_data_url(record: &DetectionRecord) -> Option<String> {
    record
        .image
        .as_ref()
        .map(|payload| format!("data:image/jpeg;base64,{payload}"))
}

pub fn render_history(records: &[DetectionRecord], loading: bool) -> Html {
    if loading {
        return html! {
            <div class="history-loading">
                <i class="fa-solid fa-spinner fa-spin fa-2x"></i>
            </div>
        };
    }

    if records.is_empty() {
        return html! {
            <p class="empty-history">{"No detections yet. Upload a scan to get started."}</p>
        };
    }

    let (scans, tabular) = partition_by_kind(records);

    html! {
        <div class="history-view">
            <section class="history-group">
                <h3>{ RecordKind::Image.to_string() }</h3>
                {
                    if scans.is_empty() {
                        html! { <p class="empty-group">{"No scan records."}</p> }
                    } else {
                        html! { for scans.into_iter().map(render_scan_entry) }
                    }
                }
            </section>
            <section class="history-group">
                <h3>{ RecordKind::Tabular.to_string() }</h3>
                {
                    if tabular.is_empty() {
                        html! { <p class="empty-group">{"No clinical data records."}</p> }
                    } else {
                        html! { for tabular.into_iter().map(render_tabular_entry) }
                    }
                }
            </section>
        </div>
    }
}

fn render_scan_entry(record: &DetectionRecord) -> Html {
    html! {
        <div class="history-entry" key={record.id.clone()}>
            {
                image_data_url(record).map(|url| html! {
                    <img class="history-thumbnail" src={url} alt="Scan thumbnail" />
                }).unwrap_or_default()
            }
            <div class="entry-details">
                <p class="entry-date">{ record.created_at.format("%Y-%m-%d %H:%M").to_string() }</p>
                { render_label(record) }
                {
                    record.prediction.as_ref()
                        .and_then(|prediction| prediction.confidence)
                        .map(render_confidence_meter)
                        .unwrap_or_default()
                }
            </div>
        </div>
    }
}

fn render_tabular_entry(record: &DetectionRecord) -> Html {
    let prediction = record.prediction.as_ref();

    html! {
        <div class="history-entry" key={record.id.clone()}>
            <div class="entry-details">
                <p class="entry-date">{ record.created_at.format("%Y-%m-%d %H:%M").to_string() }</p>
                { render_label(record) }
                {
                    prediction.and_then(|p| p.probability).map(|probability| html! {
                        <p class="entry-metric">{ format!("Probability: {:.1}%", probability * 100.0) }</p>
                    }).unwrap_or_default()
                }
                {
                    prediction.and_then(|p| p.precision.zip(p.recall)).map(|(precision, recall)| html! {
                        <p class="entry-metric">{ format!("Precision {precision:.2} / Recall {recall:.2}") }</p>
                    }).unwrap_or_default()
                }
            </div>
        </div>
    }
}

fn render_label(record: &DetectionRecord) -> Html {
    match &record.prediction {
        Some(prediction) => {
            let is_tumor = prediction.prediction == "Tumor" || prediction.prediction == "ckd";
            html! {
                <span class={classes!("entry-badge", if is_tumor { "badge-danger" } else { "badge-ok" })}>
                    { &prediction.prediction }
                </span>
            }
        }
        None => html! { <span class="entry-badge badge-unknown">{"Unavailable"}</span> },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_only_for_image_records() {
        let mut record = DetectionRecord {
            id: "a".to_string(),
            created_at: "2024-03-01T10:30:00Z".parse().unwrap(),
            image: Some("aGVsbG8=".to_string()),
            prediction: None,
        };

        assert_eq!(
            image_data_url(&record).as_deref(),
            Some("data:image/jpeg;base64,aGVsbG8=")
        );

        record.image = None;
        assert_eq!(image_data_url(&record), None);
    }
}
