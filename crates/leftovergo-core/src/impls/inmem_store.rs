//! InMemoryListingStore - プロセス内の listing 保管
//!
//! # 実装詳細
//! - `Vec<Listing>` を先頭が最新になるように保持
//! - 所有者は 1 つ（`&mut self` で変更）なのでロックは不要

use crate::domain::{Listing, ListingId};
use crate::ports::{ListingStore, StoreError};

/// InMemoryListingStore は再起動で消える保管場所
#[derive(Debug, Clone, Default)]
pub struct InMemoryListingStore {
    listings: Vec<Listing>,
}

impl InMemoryListingStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: ListingId) -> Option<usize> {
        self.listings.iter().position(|listing| listing.id() == id)
    }
}

impl ListingStore for InMemoryListingStore {
    fn insert_front(&mut self, listing: Listing) -> Result<(), StoreError> {
        if self.position(listing.id()).is_some() {
            return Err(StoreError::Duplicate(listing.id()));
        }
        self.listings.insert(0, listing);
        Ok(())
    }

    fn get(&self, id: ListingId) -> Option<&Listing> {
        self.listings.iter().find(|listing| listing.id() == id)
    }

    fn replace(&mut self, listing: Listing) -> Result<(), StoreError> {
        let id = listing.id();
        let slot = self
            .listings
            .iter_mut()
            .find(|existing| existing.id() == id)
            .ok_or(StoreError::NotFound(id))?;
        *slot = listing;
        Ok(())
    }

    fn all(&self) -> &[Listing] {
        &self.listings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lifecycle::{self, DeliveryPolicy, ListingAction};
    use crate::domain::{Identity, ListingDraft, ListingStatus, PhoneNumber, Role, UserId};
    use chrono::Utc;
    use ulid::Ulid;

    fn person(role: Role) -> Identity {
        Identity::new(
            UserId::from_ulid(Ulid::new()),
            "Tester",
            PhoneNumber::parse("8000000000").unwrap(),
            role,
        )
    }

    fn listing(donor: &Identity, title: &str) -> Listing {
        lifecycle::create(
            ListingDraft::new(title, "1 box", "tonight", "Gate 2"),
            donor,
            ListingId::from_ulid(Ulid::new()),
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn newest_listing_comes_first() {
        let donor = person(Role::Donor);
        let mut store = InMemoryListingStore::new();
        store.insert_front(listing(&donor, "first")).unwrap();
        store.insert_front(listing(&donor, "second")).unwrap();

        let titles: Vec<&str> = store.all().iter().map(Listing::title).collect();
        assert_eq!(titles, vec!["second", "first"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn replace_keeps_position() {
        let donor = person(Role::Donor);
        let receiver = person(Role::Receiver);
        let mut store = InMemoryListingStore::new();
        let older = listing(&donor, "older");
        let older_id = older.id();
        store.insert_front(older).unwrap();
        store.insert_front(listing(&donor, "newer")).unwrap();

        let claimed = lifecycle::apply(
            store.get(older_id).unwrap(),
            &ListingAction::Claim {
                organization: "Home A".to_string(),
                delivery_address: "Y".to_string(),
            },
            &receiver,
            DeliveryPolicy::default(),
        )
        .unwrap();
        store.replace(claimed).unwrap();

        assert_eq!(store.all()[1].id(), older_id);
        assert_eq!(store.all()[1].status(), ListingStatus::Claimed);
    }

    #[test]
    fn replace_unknown_listing_fails() {
        let donor = person(Role::Donor);
        let mut store = InMemoryListingStore::new();
        let stray = listing(&donor, "stray");
        let id = stray.id();
        assert_eq!(store.replace(stray), Err(StoreError::NotFound(id)));
        assert!(store.is_empty());
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let donor = person(Role::Donor);
        let mut store = InMemoryListingStore::new();
        let item = listing(&donor, "once");
        store.insert_front(item.clone()).unwrap();
        assert_eq!(
            store.insert_front(item.clone()),
            Err(StoreError::Duplicate(item.id()))
        );
        assert_eq!(store.len(), 1);
    }
}
