//! # フィールドバリデーション
//!
//! 書き込み系 API の入力検証結果を表現する。
//!
//! 1 フィールドずつ早期リターンするのではなく、失敗したフィールドを
//! すべて集めてからまとめて返す。クライアントは 1 回のリクエストで
//! 修正すべき項目を全部知ることができる。
//!
//! ```rust
//! use task_manager_domain::validation::{FieldError, ValidationErrors};
//!
//! let mut errors = ValidationErrors::new();
//! errors.push(FieldError::new("title", "Title is required"));
//!
//! assert_eq!(errors.len(), 1);
//! assert!(errors.into_result(()).is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// 1 フィールド分の検証エラー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// リクエストボディ上のフィールド名
    pub field:   String,
    /// 人間可読なメッセージ
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field:   field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// 検証前のフィールド値
///
/// JSON など外部表現の値を、型の不一致も含めてそのまま渡すための型。
/// フィールド自体の有無は外側の `Option` で表す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput<T> {
    /// 明示的な `null`
    Null,
    /// 期待どおりの型の値
    Value(T),
    /// 期待と異なる型の値
    WrongType,
}

impl<T> From<T> for FieldInput<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

/// 検証エラーの一覧
///
/// 追加順（= 検証したフィールドの順）を保持する。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    /// `Result` の `Err` 側を取り込む
    ///
    /// 成功値は `Some` で返し、失敗時はエラーを蓄積して `None` を返す。
    pub fn collect<T>(&mut self, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.push(error);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.0
    }

    /// エラーがなければ `value` を、あれば自身を返す
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
