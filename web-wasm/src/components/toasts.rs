//! トースト通知

use leptos::prelude::*;

use crate::app::use_app_state;

#[component]
pub fn ToastContainer() -> impl IntoView {
    let state = use_app_state();

    view! {
        <div id="toastContainer" class="toast-container">
            <For
                each=move || state.toasts.get()
                key=|toast| (toast.id, toast.exiting)
                children=move |toast| {
                    let class = format!(
                        "toast {} px-5 py-3 rounded-xl text-sm font-medium shadow-2xl max-w-sm{}",
                        toast.notice.kind.class(),
                        if toast.exiting { " toast-exit" } else { "" },
                    );
                    view! { <div class=class>{toast.notice.message.clone()}</div> }
                }
            />
        </div>
    }
}
