//! IdGenerator port - ID 生成の抽象化
//!
//! テスト容易性のために trait として抽象化しています。
//!
//! # 実装
//! - **UlidGenerator**: Clock の時刻 + ランダム部分で ULID を生成

use crate::domain::ids::{ListingId, UserId};
use crate::ports::Clock;
use ulid::Ulid;

/// IdGenerator は一意な ID を生成
pub trait IdGenerator {
    /// ログイン成功時の User ID を生成
    fn generate_user_id(&self) -> UserId;

    /// 新しい listing の ID を生成
    fn generate_listing_id(&self) -> ListingId;
}

/// UlidGenerator は ULID ベースの ID 生成器
///
/// Clock を使って ULID の timestamp 部分を決めるので、
/// FixedClock を使えば timestamp 部分が決定的になります。
#[derive(Debug, Clone)]
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    /// 新しい UlidGenerator を作成
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    fn next_ulid(&self) -> Ulid {
        let timestamp_ms = u64::try_from(self.clock.now().timestamp_millis()).unwrap_or(0);
        Ulid::from_parts(timestamp_ms, rand::random())
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_user_id(&self) -> UserId {
        UserId::from(self.next_ulid())
    }

    fn generate_listing_id(&self) -> ListingId {
        ListingId::from(self.next_ulid())
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn generate_user_id(&self) -> UserId {
        (**self).generate_user_id()
    }

    fn generate_listing_id(&self) -> ListingId {
        (**self).generate_listing_id()
    }
}
