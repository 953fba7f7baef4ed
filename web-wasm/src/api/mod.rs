//! 予測サービス連携

pub mod predict;
