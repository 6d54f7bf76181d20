//! プログレスバーコンポーネント

use leptos::prelude::*;

#[component]
pub fn ProgressBar(progress: ReadSignal<f32>, status_text: ReadSignal<String>) -> impl IntoView {
    view! {
        <div id="uploadProgress" class="progress-container">
            <p id="uploadStatusText" class="progress-text">{move || status_text.get()}</p>
            <div class="progress-bar">
                <div
                    id="uploadBar"
                    class="progress-fill"
                    style=move || format!("width: {}%", progress.get() * 100.0)
                />
            </div>
        </div>
    }
}
