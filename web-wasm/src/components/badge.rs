//! バッジ表示

use leptos::prelude::*;

/// `badge <class>` のラベル。クラスが空（未知の値）でも文言は表示する
#[component]
pub fn Badge(class: &'static str, text: String) -> impl IntoView {
    view! { <span class=format!("badge {}", class)>{text}</span> }
}
