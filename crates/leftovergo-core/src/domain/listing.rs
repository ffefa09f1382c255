//! Listing record and status.
//!
//! Status-dependent fields live inside [`ListingState`], so a listing cannot
//! carry a receiver before it is claimed or a delivery partner before pickup.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::ValidationError;
use super::identity::{Identity, PhoneNumber};
use super::ids::{ListingId, UserId};

/// Listing status tag (no attached data).
///
/// State transitions:
/// - Available -> Claimed -> PickedUp -> Delivered
///
/// No skips, no reversals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingStatus {
    Available,
    Claimed,
    PickedUp,
    Delivered,
}

impl ListingStatus {
    /// The only status this one may move to.
    pub fn next(self) -> Option<ListingStatus> {
        match self {
            ListingStatus::Available => Some(ListingStatus::Claimed),
            ListingStatus::Claimed => Some(ListingStatus::PickedUp),
            ListingStatus::PickedUp => Some(ListingStatus::Delivered),
            ListingStatus::Delivered => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ListingStatus::Available => "AVAILABLE",
            ListingStatus::Claimed => "CLAIMED",
            ListingStatus::PickedUp => "PICKED_UP",
            ListingStatus::Delivered => "DELIVERED",
        }
    }

    /// バッジ表示用（"PICKED UP"）
    pub fn label(self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Donor fields copied at creation time. Never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorRef {
    pub id: UserId,
    pub name: String,
    pub phone: PhoneNumber,
}

impl From<&Identity> for DonorRef {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id(),
            name: identity.name().to_owned(),
            phone: identity.phone().clone(),
        }
    }
}

/// Receiving organization recorded on claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiverRef {
    pub id: UserId,
    /// Organization name entered on the claim form.
    pub name: String,
    /// Where the food should be delivered.
    pub location: String,
}

/// ListingState は status とその status でのみ存在するフィールドをまとめたもの
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "status",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum ListingState {
    Available,
    Claimed {
        receiver: ReceiverRef,
    },
    PickedUp {
        receiver: ReceiverRef,
        delivery_partner_id: UserId,
    },
    Delivered {
        receiver: ReceiverRef,
        delivery_partner_id: UserId,
    },
}

impl ListingState {
    pub fn status(&self) -> ListingStatus {
        match self {
            ListingState::Available => ListingStatus::Available,
            ListingState::Claimed { .. } => ListingStatus::Claimed,
            ListingState::PickedUp { .. } => ListingStatus::PickedUp,
            ListingState::Delivered { .. } => ListingStatus::Delivered,
        }
    }

    pub fn receiver(&self) -> Option<&ReceiverRef> {
        match self {
            ListingState::Available => None,
            ListingState::Claimed { receiver }
            | ListingState::PickedUp { receiver, .. }
            | ListingState::Delivered { receiver, .. } => Some(receiver),
        }
    }

    pub fn delivery_partner_id(&self) -> Option<UserId> {
        match self {
            ListingState::Available | ListingState::Claimed { .. } => None,
            ListingState::PickedUp {
                delivery_partner_id,
                ..
            }
            | ListingState::Delivered {
                delivery_partner_id,
                ..
            } => Some(*delivery_partner_id),
        }
    }
}

/// Donor form input. id, status and timestamp are assigned on creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub quantity: String,
    pub expiry_time: String,
    pub pickup_location: String,
}

impl ListingDraft {
    pub fn new(
        title: impl Into<String>,
        quantity: impl Into<String>,
        expiry_time: impl Into<String>,
        pickup_location: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            quantity: quantity.into(),
            expiry_time: expiry_time.into(),
            pickup_location: pickup_location.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Required fields must not be blank. Description is optional.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("title", &self.title),
            ("quantity", &self.quantity),
            ("expiry time", &self.expiry_time),
            ("pickup location", &self.pickup_location),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::EmptyField(field));
            }
        }
        Ok(())
    }
}

/// A single posted unit of surplus food.
///
/// Fields are private; the only way to change a listing is
/// [`crate::domain::lifecycle::apply`], which returns a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    id: ListingId,
    title: String,
    description: String,
    quantity: String,
    expiry_time: String,
    pickup_location: String,
    donor: DonorRef,
    #[serde(flatten)]
    state: ListingState,
    created_at: DateTime<Utc>,
}

impl Listing {
    pub(crate) fn from_draft(
        id: ListingId,
        draft: ListingDraft,
        donor: DonorRef,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            quantity: draft.quantity,
            expiry_time: draft.expiry_time,
            pickup_location: draft.pickup_location,
            donor,
            state: ListingState::Available,
            created_at,
        }
    }

    /// 同じ listing で state だけ差し替えたものを返す
    pub(crate) fn with_state(&self, state: ListingState) -> Self {
        Self {
            state,
            ..self.clone()
        }
    }

    pub fn id(&self) -> ListingId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn quantity(&self) -> &str {
        &self.quantity
    }

    pub fn expiry_time(&self) -> &str {
        &self.expiry_time
    }

    pub fn pickup_location(&self) -> &str {
        &self.pickup_location
    }

    pub fn donor(&self) -> &DonorRef {
        &self.donor
    }

    pub fn state(&self) -> &ListingState {
        &self.state
    }

    pub fn status(&self) -> ListingStatus {
        self.state.status()
    }

    pub fn receiver(&self) -> Option<&ReceiverRef> {
        self.state.receiver()
    }

    pub fn delivery_partner_id(&self) -> Option<UserId> {
        self.state.delivery_partner_id()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
