//! 監査ログ

use autoledger_common::format_status;
use autoledger_common::view::AuditRow;
use autoledger_common::AuditAction;
use leptos::prelude::*;

use crate::app::use_app_state;
use crate::components::badge::Badge;

#[component]
pub fn AuditLog() -> impl IntoView {
    let state = use_app_state();

    let on_filter = move |ev: leptos::ev::Event| {
        state.audit_filter.set(AuditAction::parse(&event_target_value(&ev)));
        state.load_audit_logs();
    };

    let rows = move || {
        state.audit.with(|s| {
            s.data
                .as_ref()
                .map(|items| items.iter().map(AuditRow::from_entry).collect::<Vec<_>>())
        })
    };

    view! {
        <div class="panel">
            <div class="flex justify-between">
                <h3>"Audit Log"</h3>
                <select id="auditFilter" on:change=on_filter>
                    <option value="">"All Actions"</option>
                    {AuditAction::ALL
                        .iter()
                        .map(|a| view! { <option value=a.as_str()>{format_status(a.as_str())}</option> })
                        .collect_view()}
                </select>
            </div>

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Time"</th>
                        <th>"Action"</th>
                        <th>"Actor"</th>
                        <th>"Txn"</th>
                        <th>"Details"</th>
                    </tr>
                </thead>
                <tbody id="auditBody">
                    {move || match rows() {
                        None => ().into_any(),
                        Some(rows) if rows.is_empty() => view! {
                            <tr>
                                <td colspan="5" class="empty-state">"No audit entries"</td>
                            </tr>
                        }
                        .into_any(),
                        Some(rows) => rows
                            .into_iter()
                            .map(|row| view! {
                                <tr>
                                    <td class="text-muted font-mono">{row.timestamp}</td>
                                    <td><Badge class=row.badge text=row.action_text /></td>
                                    <td>{row.actor}</td>
                                    <td class="text-muted">{row.transaction_ref}</td>
                                    <td class="truncate" title=row.details.clone()>{row.details.clone()}</td>
                                </tr>
                            })
                            .collect_view()
                            .into_any(),
                    }}
                </tbody>
            </table>
        </div>
    }
}
