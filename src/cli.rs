use clap::{Parser, Subcommand};
use leaf_doctor_common::Crop;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "leaf-doctor")]
#[command(about = "葉の写真から病害を診断する", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像（またはフォルダ内の画像）を予測サービスに送って診断
    Predict {
        /// 画像ファイルまたはフォルダ
        #[arg(required = true)]
        target: PathBuf,

        /// 予測サービスのURL（デフォルト: 設定ファイル）
        #[arg(short, long)]
        endpoint: Option<String>,

        /// アドバイス表のプリセット (tomato/apple)
        #[arg(short, long)]
        crop: Option<Crop>,

        /// 独自のアドバイス表（JSON）
        #[arg(short, long)]
        advisory: Option<PathBuf>,

        /// ヒートマップ画像の保存先
        #[arg(long)]
        heatmap: Option<PathBuf>,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 予測サービスの死活確認
    Ping {
        /// 予測サービスのURL
        #[arg(short, long)]
        endpoint: Option<String>,
    },

    /// アドバイス表を表示
    Advisory {
        /// 病害名（省略時は一覧）
        label: Option<String>,

        /// プリセット (tomato/apple)
        #[arg(short, long)]
        crop: Option<Crop>,

        /// 独自のアドバイス表（JSON）
        #[arg(short, long)]
        advisory: Option<PathBuf>,
    },

    /// 設定
    Config {
        /// 予測サービスのURLを設定
        #[arg(long)]
        set_endpoint: Option<String>,

        /// アドバイス表のプリセットを設定
        #[arg(long)]
        set_crop: Option<Crop>,

        /// 独自のアドバイス表（JSON）を設定
        #[arg(long)]
        set_advisory: Option<PathBuf>,

        /// 送信のタイムアウト秒数を設定（0で既定値に戻す）
        #[arg(long, value_name = "SECONDS")]
        set_timeout: Option<u64>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}
