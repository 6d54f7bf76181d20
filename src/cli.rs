use autoledger_common::{AuditAction, PredictionStatus};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "autoledger")]
#[command(about = "AutoLedger GL分類バックエンドのCLIクライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// KPI・分類内訳・ML状態を表示
    Dashboard,

    /// CSV/Excelファイルをアップロード
    Upload {
        /// アップロードするファイル
        #[arg(required = true)]
        file: PathBuf,

        /// アップロード後にそのバッチを分類
        #[arg(long)]
        classify: bool,
    },

    /// 未分類の取引を分類
    Classify {
        /// 対象バッチID（省略時は未分類すべて）
        #[arg(short, long)]
        batch: Option<String>,
    },

    /// 1件を作成して即分類（例: "$50 office supplies"）
    Quick {
        #[arg(required = true)]
        text: String,
    },

    /// 分類結果の一覧
    Predictions {
        /// ステータスで絞り込み (auto_posted/pending_review/manual_required/approved/rejected)
        #[arg(short, long)]
        status: Option<PredictionStatus>,

        /// 表示件数（省略時は設定値）
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// レビューキューを対話的に処理
    Review {
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// レビューキューを表示
    Queue {
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// 予測を承認してERPへ転記
    Approve {
        #[arg(required = true)]
        id: i64,
    },

    /// 予測を却下して修正GLコードで転記
    Reject {
        #[arg(required = true)]
        id: i64,

        /// 修正GLコード
        #[arg(short, long)]
        gl_code: String,

        /// 理由
        #[arg(short, long)]
        reason: Option<String>,
    },

    /// 監査ログ
    Audit {
        /// アクションで絞り込み
        #[arg(short, long)]
        action: Option<AuditAction>,

        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// 勘定科目表
    Coa,

    /// 修正データで再学習
    Retrain,

    /// バックエンドのヘルスチェック
    Health,

    /// 設定を表示/編集
    Config {
        /// APIベースURLを設定
        #[arg(long)]
        set_api_base: Option<String>,

        /// APIベースURLの設定を削除
        #[arg(long)]
        clear_api_base: bool,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
