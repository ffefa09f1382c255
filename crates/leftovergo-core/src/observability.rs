//! Listing counts by status, for dashboards and logs.

use serde::{Deserialize, Serialize};

use crate::domain::{Listing, ListingStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingCounts {
    pub available: usize,
    pub claimed: usize,
    pub picked_up: usize,
    pub delivered: usize,
}

impl ListingCounts {
    pub fn from_listings<'a>(listings: impl IntoIterator<Item = &'a Listing>) -> Self {
        let mut counts = Self::default();
        for listing in listings {
            match listing.status() {
                ListingStatus::Available => counts.available += 1,
                ListingStatus::Claimed => counts.claimed += 1,
                ListingStatus::PickedUp => counts.picked_up += 1,
                ListingStatus::Delivered => counts.delivered += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.available + self.claimed + self.picked_up + self.delivered
    }
}
