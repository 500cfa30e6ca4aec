//! # Task Service ライブラリ
//!
//! ハンドラ・ユースケース・ルーター構築を公開する。
//! `main.rs` と統合テスト、OpenAPI 生成ツールから利用する。

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod openapi;
pub mod usecase;
