//! CodeGenerator port - ワンタイム確認コードの生成
//!
//! 配送チャネルはありません。生成したコードは同じセッションに表示されるだけです。
//! 本番で使うなら SMS などの外部チャネルに差し替える必要があります。

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// 4 桁の確認コード
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerificationCode(String);

impl VerificationCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 入力値との比較（前後の空白は無視しない）
    pub fn matches(&self, entered: &str) -> bool {
        self.0 == entered
    }
}

// ログにコードが出ないようにする
impl fmt::Debug for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VerificationCode(****)")
    }
}

impl fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// CodeGenerator は確認コードを生成
pub trait CodeGenerator {
    fn generate(&self) -> VerificationCode;
}

/// 1000..=9999 の一様乱数
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> VerificationCode {
        let code: u16 = rand::thread_rng().gen_range(1000..=9999);
        VerificationCode(code.to_string())
    }
}

/// 常に同じコードを返す（テスト・デモ用）
#[derive(Debug, Clone)]
pub struct FixedCodeGenerator {
    code: VerificationCode,
}

impl FixedCodeGenerator {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: VerificationCode::new(code),
        }
    }
}

impl CodeGenerator for FixedCodeGenerator {
    fn generate(&self) -> VerificationCode {
        self.code.clone()
    }
}

impl<G: CodeGenerator + ?Sized> CodeGenerator for Box<G> {
    fn generate(&self) -> VerificationCode {
        (**self).generate()
    }
}
