//! Lifecycle - listing の状態遷移エンジン
//!
//! 純粋関数のみ。入力の listing は変更せず、成功時は新しい listing を返します。
//! store への反映は呼び出し側（Marketplace）の責務です。
//!
//! # 検査順序
//! 1. actor のロール
//! 2. listing の status
//! 3. 担当 delivery partner（MarkDelivered のみ）
//! 4. フォーム入力（Claim のみ）

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::{TransitionError, ValidationError};
use super::identity::Identity;
use super::ids::ListingId;
use super::listing::{DonorRef, Listing, ListingDraft, ListingState, ListingStatus, ReceiverRef};
use super::role::Role;

/// ActionKind はエラーやイベントで使う操作名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Create,
    Claim,
    AcceptPickup,
    MarkDelivered,
}

impl ActionKind {
    /// Role allowed to perform this action.
    pub fn required_role(self) -> Role {
        match self {
            ActionKind::Create => Role::Donor,
            ActionKind::Claim => Role::Receiver,
            ActionKind::AcceptPickup | ActionKind::MarkDelivered => Role::Delivery,
        }
    }

    /// Status the listing must be in. `None` for creation.
    pub fn required_status(self) -> Option<ListingStatus> {
        match self {
            ActionKind::Create => None,
            ActionKind::Claim => Some(ListingStatus::Available),
            ActionKind::AcceptPickup => Some(ListingStatus::Claimed),
            ActionKind::MarkDelivered => Some(ListingStatus::PickedUp),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionKind::Create => "create listing",
            ActionKind::Claim => "claim",
            ActionKind::AcceptPickup => "accept pickup",
            ActionKind::MarkDelivered => "mark delivered",
        };
        f.write_str(s)
    }
}

/// Transition requested against an existing listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingAction {
    Claim {
        organization: String,
        delivery_address: String,
    },
    AcceptPickup,
    MarkDelivered,
}

impl ListingAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            ListingAction::Claim { .. } => ActionKind::Claim,
            ListingAction::AcceptPickup => ActionKind::AcceptPickup,
            ListingAction::MarkDelivered => ActionKind::MarkDelivered,
        }
    }
}

/// Who may complete a delivery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryPolicy {
    /// Only the partner that accepted the pickup.
    #[default]
    AssignedPartnerOnly,

    /// Any actor with the DELIVERY role.
    AnyDeliveryPartner,
}

fn ensure_role(action: ActionKind, actor: &Identity) -> Result<(), TransitionError> {
    let role = actor.role();
    if role != action.required_role() {
        return Err(TransitionError::RoleNotPermitted { action, role });
    }
    Ok(())
}

fn ensure_status(action: ActionKind, listing: &Listing) -> Result<(), TransitionError> {
    let actual = listing.status();
    match action.required_status() {
        Some(expected) if expected != actual => Err(TransitionError::WrongStatus {
            action,
            expected,
            actual,
        }),
        _ => Ok(()),
    }
}

fn required_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(value.to_owned())
}

/// Build a new AVAILABLE listing for `donor`.
///
/// `id` and `now` come from the caller's ports so this stays deterministic.
pub fn create(
    draft: ListingDraft,
    donor: &Identity,
    id: ListingId,
    now: DateTime<Utc>,
) -> Result<Listing, TransitionError> {
    ensure_role(ActionKind::Create, donor)?;
    draft.validate()?;
    Ok(Listing::from_draft(id, draft, DonorRef::from(donor), now))
}

/// Compute the next listing for `action` performed by `actor`.
///
/// On error nothing is produced and `listing` is untouched.
pub fn apply(
    listing: &Listing,
    action: &ListingAction,
    actor: &Identity,
    policy: DeliveryPolicy,
) -> Result<Listing, TransitionError> {
    let kind = action.kind();
    ensure_role(kind, actor)?;
    ensure_status(kind, listing)?;

    let next = match (listing.state(), action) {
        (
            ListingState::Available,
            ListingAction::Claim {
                organization,
                delivery_address,
            },
        ) => ListingState::Claimed {
            receiver: ReceiverRef {
                id: actor.id(),
                name: required_text("organization name", organization)?,
                location: required_text("delivery address", delivery_address)?,
            },
        },
        (ListingState::Claimed { receiver }, ListingAction::AcceptPickup) => {
            ListingState::PickedUp {
                receiver: receiver.clone(),
                delivery_partner_id: actor.id(),
            }
        }
        (
            ListingState::PickedUp {
                receiver,
                delivery_partner_id,
            },
            ListingAction::MarkDelivered,
        ) => {
            if policy == DeliveryPolicy::AssignedPartnerOnly && *delivery_partner_id != actor.id()
            {
                return Err(TransitionError::NotAssignedPartner {
                    listing_id: listing.id(),
                });
            }
            ListingState::Delivered {
                receiver: receiver.clone(),
                delivery_partner_id: *delivery_partner_id,
            }
        }
        // ensure_status で弾かれているはずの組み合わせ
        (state, _) => {
            return Err(TransitionError::WrongStatus {
                action: kind,
                expected: kind.required_status().unwrap_or(ListingStatus::Available),
                actual: state.status(),
            });
        }
    };

    Ok(listing.with_state(next))
}
