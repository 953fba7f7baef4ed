//! 診断結果コンポーネント

use leptos::prelude::*;

use crate::app::FormSignal;
use leaf_doctor_common::{Advisory, AdvisoryTable, LayoutMode, Prediction};

#[component]
pub fn ResultPanel(
    form: FormSignal,
    advisory: &'static AdvisoryTable,
    layout: LayoutMode,
) -> impl IntoView {
    view! {
        <div class="result-panel">
            {move || {
                match form.with(|f| f.result().cloned().map(|p| (p, f.advisory(advisory).cloned()))) {
                    Some((prediction, entry)) => view! {
                        <PredictionCard prediction=prediction entry=entry />
                    }
                    .into_any(),
                    // 1カラム表示では結果が出るまで何も出さない
                    None if layout == LayoutMode::Single => ().into_any(),
                    None => view! {
                        <div class="result-placeholder">
                            "Upload an image to see diagnosis results"
                        </div>
                    }
                    .into_any(),
                }
            }}
        </div>
    }
}

#[component]
fn PredictionCard(prediction: Prediction, entry: Option<Advisory>) -> impl IntoView {
    // 表にないラベルは症状・対処法を省く
    let heatmap_src = prediction.heatmap.as_ref().map(|h| h.to_data_url());

    view! {
        <div class="prediction-card">
            <h3>"Diagnosis Results"</h3>
            <p>
                <span class="field-label">"Predicted Disease:"</span>
                <span class="badge">{prediction.label.clone()}</span>
            </p>
            <p>
                <span class="field-label">"Confidence:"</span>
                <span>{prediction.confidence_percent()}</span>
            </p>
            {entry.map(|entry| view! {
                <div class="advisory">
                    <h4>"Common Symptoms:"</h4>
                    <p>{entry.symptoms}</p>
                </div>
                <div class="advisory">
                    <h4>"Recommended Treatment:"</h4>
                    <p>{entry.treatment}</p>
                </div>
            })}
            {heatmap_src.map(|src| view! {
                <div class="heatmap">
                    <h4>"Heatmap"</h4>
                    <img src=src alt="Grad-CAM Result" />
                </div>
            })}
        </div>
    }
}
