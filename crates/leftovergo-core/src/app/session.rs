//! Session - ログイン状態
//!
//! # 状態遷移
//! ```text
//! LoggedOut --request_code--> AwaitingCode --verify(一致)--> LoggedIn
//!                              |  verify(不一致) -> AwaitingCode のまま + AuthError
//!                              |  change_details -> LoggedOut
//! any --logout--> LoggedOut
//! ```
//!
//! 入力の検証はコード生成より前に行い、失敗しても状態は変わりません。

use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::domain::{
    AuthError, DomainEvent, Identity, LeftoverError, LoginDetails, ValidatedDetails,
};
use crate::ports::{CodeGenerator, EventSink, IdGenerator, VerificationCode};

/// Stateless login check: validate details, compare codes, mint an identity.
///
/// Validation runs first, so a malformed phone never reaches the code comparison.
pub fn login(
    details: &LoginDetails,
    entered_code: &str,
    expected_code: &VerificationCode,
    ids: &dyn IdGenerator,
) -> Result<Identity, LeftoverError> {
    let validated = details.validate()?;
    complete_login(validated, entered_code, expected_code, ids)
}

fn complete_login(
    details: ValidatedDetails,
    entered_code: &str,
    expected_code: &VerificationCode,
    ids: &dyn IdGenerator,
) -> Result<Identity, LeftoverError> {
    if !expected_code.matches(entered_code) {
        return Err(AuthError::CodeMismatch.into());
    }
    Ok(details.into_identity(ids.generate_user_id()))
}

/// SessionState はログインフローの現在地
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    AwaitingCode {
        details: ValidatedDetails,
        code: VerificationCode,
    },
    LoggedIn(Identity),
}

/// Session は 1 人分のログイン状態を持つ
pub struct Session {
    state: SessionState,
    codes: Box<dyn CodeGenerator>,
    ids: Rc<dyn IdGenerator>,
    events: Rc<dyn EventSink>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(
        codes: Box<dyn CodeGenerator>,
        ids: Rc<dyn IdGenerator>,
        events: Rc<dyn EventSink>,
    ) -> Self {
        Self {
            state: SessionState::LoggedOut,
            codes,
            ids,
            events,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// ログイン中の identity
    pub fn current(&self) -> Option<&Identity> {
        match &self.state {
            SessionState::LoggedIn(identity) => Some(identity),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    /// 表示用：発行済みで未確認のコード
    pub fn pending_code(&self) -> Option<&VerificationCode> {
        match &self.state {
            SessionState::AwaitingCode { code, .. } => Some(code),
            _ => None,
        }
    }

    /// 入力を検証し、確認コードを発行する
    ///
    /// 送信チャネルがないので、コードはそのまま呼び出し元に返して表示させます。
    /// コード待ちの状態で呼ぶと、新しい入力とコードで置き換えます。
    pub fn request_code(&mut self, details: LoginDetails) -> Result<VerificationCode, LeftoverError> {
        if self.is_authenticated() {
            return Err(AuthError::AlreadyLoggedIn.into());
        }
        let details = details.validate().inspect_err(|err| {
            warn!(error = %err, "login details rejected");
        })?;

        let code = self.codes.generate();
        debug!(role = %details.role(), "verification code issued");
        self.state = SessionState::AwaitingCode {
            details,
            code: code.clone(),
        };
        Ok(code)
    }

    /// 入力されたコードを確認する
    ///
    /// 不一致の場合はコード待ちのまま（再入力できる）。
    pub fn verify(&mut self, entered_code: &str) -> Result<Identity, LeftoverError> {
        let SessionState::AwaitingCode { details, code } = &self.state else {
            return Err(AuthError::NoPendingChallenge.into());
        };

        let identity = complete_login(details.clone(), entered_code, code, self.ids.as_ref())
            .inspect_err(|_| warn!("verification code mismatch"))?;

        info!(user_id = %identity.id(), role = %identity.role(), "logged in");
        self.events.emit(&DomainEvent::LoggedIn {
            user_id: identity.id(),
            role: identity.role(),
        });
        self.state = SessionState::LoggedIn(identity.clone());
        Ok(identity)
    }

    /// コード待ちをやめて詳細入力に戻る
    pub fn change_details(&mut self) {
        if matches!(self.state, SessionState::AwaitingCode { .. }) {
            self.state = SessionState::LoggedOut;
        }
    }

    /// 無条件でログアウト
    pub fn logout(&mut self) {
        let previous = std::mem::replace(&mut self.state, SessionState::LoggedOut);
        if let SessionState::LoggedIn(identity) = previous {
            info!(user_id = %identity.id(), "logged out");
            self.events.emit(&DomainEvent::LoggedOut {
                user_id: identity.id(),
            });
        }
    }
}
