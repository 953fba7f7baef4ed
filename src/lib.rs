//! Leaf Doctor CLI
//!
//! 予測サービスに葉の画像を送り、病害名・信頼度・アドバイスを表示する

pub mod cli;
pub mod client;
pub mod config;
pub mod diagnose;
pub mod error;
pub mod report;
pub mod scanner;
