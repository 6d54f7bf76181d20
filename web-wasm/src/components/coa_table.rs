use autoledger_common::view::CoaRow;
use leptos::prelude::*;

use crate::app::use_app_state;
use crate::components::badge::Badge;

/// 勘定科目表
#[component]
pub fn CoaTable() -> impl IntoView {
    let state = use_app_state();

    let rows = move || {
        state.coa.with(|s| {
            s.data
                .as_ref()
                .map(|items| items.iter().map(CoaRow::from_entry).collect::<Vec<_>>())
                .unwrap_or_default()
        })
    };

    view! {
        <div class="panel">
            <h3>"Chart of Accounts"</h3>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"GL Code"</th>
                        <th>"Name"</th>
                        <th>"Category"</th>
                        <th>"Sub-Category"</th>
                    </tr>
                </thead>
                <tbody id="coaBody">
                    {move || {
                        rows()
                            .into_iter()
                            .map(|row| view! {
                                <tr>
                                    <td class="font-mono">{row.gl_code}</td>
                                    <td>{row.gl_name}</td>
                                    <td><Badge class=row.badge text=row.category /></td>
                                    <td class="text-muted">{row.sub_category}</td>
                                </tr>
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
        </div>
    }
}
