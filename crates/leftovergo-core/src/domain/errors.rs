//! Errors - エラー型と分類
//!
//! すべてのエラーは呼び出し元に同期的に返され、自動リトライはしません。
//! 失敗した操作は store を一切変更しません。

use thiserror::Error;

use super::ids::ListingId;
use super::lifecycle::ActionKind;
use super::listing::ListingStatus;
use super::role::Role;

/// ErrorKind はビュー側でメッセージを出し分けるための分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 入力が不正（フォームを開いたまま再入力）
    Validation,
    /// 確認コード不一致（再入力または詳細入力からやり直し）
    Auth,
    /// 状態またはロールが前提を満たさない
    InvalidTransition,
    /// 指定された listing が存在しない
    NotFound,
    /// store 側の不整合
    Store,
}

/// Malformed or missing required input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is required")]
    EmptyName,

    #[error("Please enter a valid 10-digit number starting with 7, 8, or 9")]
    InvalidPhone,

    #[error("{0} is required")]
    EmptyField(&'static str),
}

/// Verification code problems.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Incorrect OTP. Try again.")]
    CodeMismatch,

    #[error("no verification code has been requested")]
    NoPendingChallenge,

    #[error("already logged in; log out first")]
    AlreadyLoggedIn,
}

/// An action that the listing's current state or the actor's role does not allow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("{role} cannot {action}")]
    RoleNotPermitted { action: ActionKind, role: Role },

    #[error("cannot {action}: listing is {actual}, expected {expected}")]
    WrongStatus {
        action: ActionKind,
        expected: ListingStatus,
        actual: ListingStatus,
    },

    #[error("listing {listing_id} was accepted by another delivery partner")]
    NotAssignedPartner { listing_id: ListingId },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Errors raised by a listing store when a write cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("listing not found: {0}")]
    NotFound(ListingId),

    #[error("listing already exists: {0}")]
    Duplicate(ListingId),
}

/// LeftoverError は公開 API が返すエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeftoverError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    InvalidTransition(TransitionError),

    #[error("listing not found: {0}")]
    ListingNotFound(ListingId),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for LeftoverError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => LeftoverError::ListingNotFound(id),
            other => LeftoverError::Store(other),
        }
    }
}

impl From<TransitionError> for LeftoverError {
    // 入力エラーは遷移エラーに包まず、そのまま validation として扱う
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::Validation(inner) => LeftoverError::Validation(inner),
            other => LeftoverError::InvalidTransition(other),
        }
    }
}

impl LeftoverError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LeftoverError::Validation(_) => ErrorKind::Validation,
            LeftoverError::Auth(_) => ErrorKind::Auth,
            LeftoverError::InvalidTransition(_) => ErrorKind::InvalidTransition,
            LeftoverError::ListingNotFound(_) => ErrorKind::NotFound,
            LeftoverError::Store(_) => ErrorKind::Store,
        }
    }
}
