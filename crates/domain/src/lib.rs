//! # Task Manager ドメイン層
//!
//! タスク管理のビジネスルールを表現する。HTTP やデータベースには依存しない。
//!
//! ## モジュール構成
//!
//! - [`task`]: タスクエンティティ、値オブジェクト、入力検証
//! - [`validation`]: フィールド単位の検証エラー
//! - [`clock`]: 時刻プロバイダ
//! - [`error`]: ドメインエラー
//!
//! ## 設計方針
//!
//! - 値オブジェクトは生成時に検証する（不正な状態を型で表現できなくする）
//! - エンティティのフィールドは非公開、ゲッター経由で参照する
//! - 時刻は [`clock::Clock`] から注入する

#[macro_use]
mod macros;

pub mod clock;
pub mod error;
pub mod task;
pub mod validation;

pub use error::DomainError;
