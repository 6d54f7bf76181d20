use autoledger_common::actions::{self, BatchContext, ClassifyScope};
use autoledger_common::loaders;
use autoledger_common::{Backend, Notice, UserAction};
use autoledger_rust::{cli, client, config, error, quick, render, review};
use clap::Parser;
use cli::{Cli, Commands};
use client::{HttpBackend, UploadFile};
use config::Config;
use error::{AutoLedgerError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    if let Err(e) = run(cli).await {
        eprintln!("{}", render::notice_line(&Notice::error(e.to_string())));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let api_base = config.resolve_api_base();
    log::debug!("API base: {}", api_base);
    let backend = HttpBackend::new(api_base);

    match cli.command {
        Commands::Dashboard => {
            let snapshot = loaders::load_dashboard(&backend).await?;
            println!("📊 AutoLedger - ダッシュボード\n");
            println!("{}\n", render::status_line(&snapshot));
            println!("{}", render::kpi_table(&snapshot));
            if let Some(table) = render::breakdown_table(&snapshot) {
                println!("\nClassification Breakdown\n{}", table);
            }
        }

        Commands::Upload { file, classify } => {
            println!("📤 AutoLedger - アップロード\n");
            let upload = UploadFile::from_path(&file)?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message(format!("Uploading {}...", upload.file_name));
            spinner.enable_steady_tick(Duration::from_millis(100));

            let result = actions::upload_file(&backend, upload).await;
            spinner.finish_and_clear();
            let resp = result.map_err(|e| AutoLedgerError::action(UserAction::Upload, &e))?;

            let mut batch = BatchContext::new();
            batch.record_upload(&resp);
            println!(
                "{}",
                render::notice_line(&Notice::success(format!("{} transactions uploaded", resp.total_transactions)))
            );
            println!("  {}", resp.message);
            println!("  Batch ID: {}", resp.batch_id);

            if classify {
                println!("\n- 分類中...");
                classify_scope(&backend, &batch.scope()).await?;
            }
        }

        Commands::Classify { batch } => {
            let scope = match batch {
                Some(id) => ClassifyScope::Batch(id),
                None => ClassifyScope::Unscoped,
            };
            println!("{}", render::notice_line(&Notice::info("Classifying transactions...")));
            classify_scope(&backend, &scope).await?;
        }

        Commands::Quick { text } => {
            quick::run_quick_entry(&backend, &text).await?;
        }

        Commands::Predictions { status, limit } => {
            let limit = limit.unwrap_or(config.prediction_limit);
            let predictions = loaders::load_predictions(&backend, status, limit).await?;
            if predictions.is_empty() {
                println!("No predictions yet");
            } else {
                println!("{}", render::predictions_table(&predictions));
            }
        }

        Commands::Review { limit } => {
            let limit = limit.unwrap_or(config.review_limit);
            review::run_interactive_review(&backend, &config, limit).await?;
        }

        Commands::Queue { limit } => {
            let limit = limit.unwrap_or(config.review_limit);
            let queue = loaders::load_review_queue(&backend, limit).await?;
            if queue.is_empty() {
                println!("All caught up! No items need review.");
            } else {
                println!("{} items awaiting review\n", queue.len());
                println!("{}", render::predictions_table(&queue));
            }
        }

        Commands::Approve { id } => {
            let result = actions::approve(&backend, id)
                .await
                .map_err(|e| AutoLedgerError::action(UserAction::Approve, &e))?;
            println!("{}", render::notice_line(&Notice::success("Prediction approved & posted to ERP")));
            log::debug!("{}", result.message);
        }

        Commands::Reject { id, gl_code, reason } => {
            let notice = review::reject(&backend, &config, id, &gl_code, reason.as_deref().unwrap_or(""))
                .await
                .map_err(|n| AutoLedgerError::Action(n.message))?;
            println!("{}", render::notice_line(&notice));
        }

        Commands::Audit { action, limit } => {
            let limit = limit.unwrap_or(config.audit_limit);
            let entries = loaders::load_audit_logs(&backend, action, limit).await?;
            if entries.is_empty() {
                println!("No audit entries");
            } else {
                println!("{}", render::audit_table(&entries));
            }
        }

        Commands::Coa => {
            let entries = loaders::load_chart_of_accounts(&backend).await?;
            println!("Chart of Accounts\n{}", render::coa_table(&entries));
        }

        Commands::Retrain => {
            println!("{}", render::notice_line(&Notice::info("Starting retraining...")));
            let resp = actions::retrain(&backend)
                .await
                .map_err(|e| AutoLedgerError::action(UserAction::Retrain, &e))?;
            println!("{}", render::notice_line(&Notice::success(resp.message)));
            println!(
                "  Corrections used: {}  New vectors: {}",
                resp.corrections_used, resp.new_vectors_added
            );
        }

        Commands::Health => {
            let health = backend.health().await?;
            println!("{}: {}", backend.api_base(), health.status);
        }

        Commands::Config { set_api_base, clear_api_base, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(url) = set_api_base {
                config.set_api_base(url)?;
                changed = true;
            }
            if clear_api_base {
                config.clear_api_base();
                changed = true;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  APIベースURL: {}", config.api_base.as_deref().unwrap_or("(未設定)"));
                println!("  使用中のURL: {}", config.resolve_api_base());
                println!("  担当者: {}", config.actor);
                println!(
                    "  表示件数: predictions={} review={} audit={}",
                    config.prediction_limit, config.review_limit, config.audit_limit
                );
            }
        }
    }

    Ok(())
}

async fn classify_scope(backend: &HttpBackend, scope: &ClassifyScope) -> Result<()> {
    let resp = actions::classify(backend, scope)
        .await
        .map_err(|e| AutoLedgerError::action(UserAction::ClassifyAll, &e))?;
    println!(
        "{}",
        render::notice_line(&Notice::success(format!("Classified {} transactions", resp.total_classified)))
    );
    println!("{}", render::classify_table(&resp));
    Ok(())
}
