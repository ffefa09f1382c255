//! Config - Marketplace の設定

use serde::{Deserialize, Serialize};

pub use crate::domain::DeliveryPolicy;

/// Completed trips shown on the delivery dashboard by default.
pub const DEFAULT_RECENT_COMPLETED_LIMIT: usize = 3;

/// MarketplaceConfig は挙動の切り替え
///
/// JSON などからも読み込めるよう、全フィールドに既定値があります。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketplaceConfig {
    /// 誰が配達完了にできるか
    pub delivery_policy: DeliveryPolicy,

    /// 起動時にサンプル listing を 1 件入れる
    pub seed_sample_listing: bool,

    /// 完了済み配達の表示件数
    pub recent_completed_limit: usize,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            delivery_policy: DeliveryPolicy::default(),
            seed_sample_listing: true,
            recent_completed_limit: DEFAULT_RECENT_COMPLETED_LIMIT,
        }
    }
}
