use std::collections::BTreeMap;

use shared::Prediction;
use yew::prelude::*;

/// Result panel for an analyzed scan. Absent sub-fields simply omit their
/// fragment; the label alone is always renderable.
pub fn render_prediction_result(prediction: &Prediction) -> Html {
    let is_tumor = prediction.prediction == "Tumor";

    html! {
        <div class={classes!("results-container", if is_tumor { "tumor-detected" } else { "not-tumor" })}>
            <div class="result-header">
                <h3>{"Prediction Results"}</h3>
                <div class="diagnosis-row">
                    <span class="diagnosis-label">{"Diagnosis:"}</span>
                    <span class={classes!("diagnosis-badge", if is_tumor { "badge-danger" } else { "badge-ok" })}>
                        { &prediction.prediction }
                    </span>
                </div>
                { prediction.confidence.map(render_confidence_meter).unwrap_or_default() }
            </div>
            {
                prediction.probabilities.as_ref()
                    .map(|probabilities| render_probability_bars(probabilities))
                    .unwrap_or_default()
            }
        </div>
    }
}

/// Result panel for a tabular prediction: headline probability plus whatever
/// evaluation metrics the model reported.
pub fn render_tabular_result(prediction: &Prediction) -> Html {
    html! {
        <div class="results-container tabular-results">
            <p class="headline">
                <strong>{"Prediction: "}</strong>
                { prediction.prediction.to_uppercase() }
            </p>
            {
                prediction.probability.map(|probability| html! {
                    <p><strong>{"Probability: "}</strong>{ format!("{:.2}%", probability * 100.0) }</p>
                }).unwrap_or_default()
            }
            {
                prediction.confusion_matrix.as_ref()
                    .map(render_confusion_matrix)
                    .unwrap_or_default()
            }
            {
                prediction.precision.map(|precision| html! {
                    <p><strong>{"Precision: "}</strong>{ format!("{precision:.3}") }</p>
                }).unwrap_or_default()
            }
            {
                prediction.recall.map(|recall| html! {
                    <p><strong>{"Recall: "}</strong>{ format!("{recall:.3}") }</p>
                }).unwrap_or_default()
            }
        </div>
    }
}

pub fn render_confidence_meter(confidence: f64) -> Html {
    let percentage = confidence * 100.0;
    html! {
        <div class="confidence-meter">
            <div class="meter-label">{"Confidence:"}</div>
            <div class="meter">
                <div class="meter-fill" style={format!("width: {percentage}%")}></div>
            </div>
            <div class="meter-value">{ format!("{percentage:.1}%") }</div>
        </div>
    }
}

fn render_probability_bars(probabilities: &BTreeMap<String, f64>) -> Html {
    html! {
        <div class="detailed-results">
            <h4>{"Probabilities"}</h4>
            <div class="result-bars">
                { for probabilities.iter().map(|(label, value)| {
                    let percentage = value * 100.0;
                    html! {
                        <div class="result-item">
                            <div class="result-label">{ label }</div>
                            <div class="result-bar-container">
                                <div class="result-bar" style={format!("width: {percentage}%")}></div>
                            </div>
                            <div class="result-value">{ format!("{percentage:.1}%") }</div>
                        </div>
                    }
                })}
            </div>
        </div>
    }
}

fn render_confusion_matrix(matrix: &[[u32; 2]; 2]) -> Html {
    html! {
        <div class="confusion-matrix">
            <p><strong>{"Confusion Matrix:"}</strong></p>
            <table>
                <thead>
                    <tr>
                        <th></th>
                        <th>{"Predicted: Not CKD"}</th>
                        <th>{"Predicted: CKD"}</th>
                    </tr>
                </thead>
                <tbody>
                    <tr>
                        <td class="row-label">{"Actual: Not CKD"}</td>
                        <td>{ matrix[0][0] }</td>
                        <td>{ matrix[0][1] }</td>
                    </tr>
                    <tr>
                        <td class="row-label">{"Actual: CKD"}</td>
                        <td>{ matrix[1][0] }</td>
                        <td>{ matrix[1][1] }</td>
                    </tr>
                </tbody>
            </table>
        </div>
    }
}
