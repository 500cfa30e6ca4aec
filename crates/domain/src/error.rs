//! # ドメイン層エラー定義
//!
//! タスクの不変条件違反を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | フィールド単位の入力検証失敗 |
//! | `InvalidId` | 400 Bad Request | ID として解釈できない文字列 |
//!
//! 「存在しない」は ID の形式としては正しいため、ドメインエラーではなく
//! ユースケース層で `Option` の `None` から判定する。

use thiserror::Error;

use crate::validation::ValidationErrors;

/// ドメイン層で発生するエラー
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 失敗したすべてのフィールドとメッセージを保持する。
    #[error("バリデーションエラー: {0}")]
    Validation(#[from] ValidationErrors),

    /// ID の形式が不正
    #[error("不正な ID です: {0}")]
    InvalidId(String),
}
