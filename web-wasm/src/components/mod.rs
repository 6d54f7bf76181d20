//! UIコンポーネント

pub mod header;
pub mod toasts;
pub mod progress_bar;
pub mod dashboard;
pub mod upload_area;
pub mod quick_entry;
pub mod predictions_table;
pub mod review_queue;
pub mod audit_log;
pub mod coa_table;
pub mod badge;
