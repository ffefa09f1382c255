//! Events - ドメインイベント
//!
//! 成功した変更のあとにだけ発行されます。失敗した操作はイベントを出しません。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ListingId, UserId};
use super::role::Role;

/// DomainEvent はドメインで発生したイベント
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    LoggedIn {
        user_id: UserId,
        role: Role,
    },
    LoggedOut {
        user_id: UserId,
    },
    ListingCreated {
        listing_id: ListingId,
        donor_id: UserId,
        at: DateTime<Utc>,
    },
    ListingClaimed {
        listing_id: ListingId,
        receiver_id: UserId,
    },
    PickupAccepted {
        listing_id: ListingId,
        delivery_partner_id: UserId,
    },
    ListingDelivered {
        listing_id: ListingId,
        delivered_by: UserId,
    },
}

impl DomainEvent {
    pub fn name(&self) -> &'static str {
        match self {
            DomainEvent::LoggedIn { .. } => "logged_in",
            DomainEvent::LoggedOut { .. } => "logged_out",
            DomainEvent::ListingCreated { .. } => "listing_created",
            DomainEvent::ListingClaimed { .. } => "listing_claimed",
            DomainEvent::PickupAccepted { .. } => "pickup_accepted",
            DomainEvent::ListingDelivered { .. } => "listing_delivered",
        }
    }

    /// 対象 listing（ログイン系イベントは None）
    pub fn listing_id(&self) -> Option<ListingId> {
        match self {
            DomainEvent::LoggedIn { .. } | DomainEvent::LoggedOut { .. } => None,
            DomainEvent::ListingCreated { listing_id, .. }
            | DomainEvent::ListingClaimed { listing_id, .. }
            | DomainEvent::PickupAccepted { listing_id, .. }
            | DomainEvent::ListingDelivered { listing_id, .. } => Some(*listing_id),
        }
    }
}
