//! Identity - ログイン済み actor の記録
//!
//! ログイン成功時に作られ、ログアウトで破棄されます（永続化なし）。

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::errors::ValidationError;
use super::ids::UserId;
use super::role::Role;

static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        Regex::new(r"^[789][0-9]{9}$")
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

/// 10 桁で 7, 8, 9 のいずれかから始まる電話番号
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let raw = raw.as_ref();
        if !phone_regex().is_match(raw) {
            return Err(ValidationError::InvalidPhone);
        }
        Ok(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

/// ログインフォームの入力値（未検証）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginDetails {
    pub name: String,
    pub phone: String,
    pub role: Role,
}

impl LoginDetails {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            role,
        }
    }

    /// 名前 → 電話番号の順に検証する
    ///
    /// 確認コードの生成より前に呼ばれる前提です。
    pub fn validate(&self) -> Result<ValidatedDetails, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let phone = PhoneNumber::parse(&self.phone)?;
        Ok(ValidatedDetails {
            name: name.to_owned(),
            phone,
            role: self.role,
        })
    }
}

/// 検証済みのログイン入力
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDetails {
    name: String,
    phone: PhoneNumber,
    role: Role,
}

impl ValidatedDetails {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// 新しい id を割り当てて Identity にする
    pub fn into_identity(self, id: UserId) -> Identity {
        Identity {
            id,
            name: self.name,
            phone: self.phone,
            role: self.role,
            location: None,
        }
    }
}

/// Identity describes a logged-in actor.
///
/// Role has no setter: it is fixed for the lifetime of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    id: UserId,
    name: String,
    phone: PhoneNumber,
    role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<String>,
}

impl Identity {
    /// ログインを経由せずに作る（seed データとテスト用）
    pub fn new(id: UserId, name: impl Into<String>, phone: PhoneNumber, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            phone,
            role,
            location: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}
