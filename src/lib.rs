//! AutoLedger CLI
//!
//! Web版と同じ共通ライブラリを使って、ターミナルからバックエンドを操作する。

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod quick;
pub mod render;
pub mod review;
