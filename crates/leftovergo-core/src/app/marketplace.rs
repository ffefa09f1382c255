//! Marketplace - listing の操作窓口
//!
//! ListingStore・Clock・IdGenerator・EventSink を束ね、
//! lifecycle の純粋関数の結果を store に反映します。
//!
//! # 1 操作の流れ
//! 1. store から対象 listing を借りる（なければ `ListingNotFound`）
//! 2. `lifecycle::apply` で次の listing を計算（失敗なら store はそのまま）
//! 3. store の同じ位置に置き換え
//! 4. DomainEvent を発行

use std::rc::Rc;

use chrono::Duration;
use tracing::{info, warn};

use super::config::MarketplaceConfig;
use super::views::{self, RoleView};
use crate::domain::lifecycle::{self, ListingAction};
use crate::domain::{
    DomainEvent, Identity, LeftoverError, Listing, ListingDraft, ListingId, PhoneNumber, Role,
};
use crate::observability::ListingCounts;
use crate::ports::{Clock, EventSink, IdGenerator, ListingStore};

/// Marketplace は全 listing を所有するアプリケーションサービス
pub struct Marketplace {
    store: Box<dyn ListingStore>,
    clock: Rc<dyn Clock>,
    ids: Rc<dyn IdGenerator>,
    events: Rc<dyn EventSink>,
    config: MarketplaceConfig,
}

impl std::fmt::Debug for Marketplace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Marketplace")
            .field("listings", &self.store.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Marketplace {
    pub fn new(
        store: Box<dyn ListingStore>,
        clock: Rc<dyn Clock>,
        ids: Rc<dyn IdGenerator>,
        events: Rc<dyn EventSink>,
        config: MarketplaceConfig,
    ) -> Self {
        Self {
            store,
            clock,
            ids,
            events,
            config,
        }
    }

    pub fn config(&self) -> &MarketplaceConfig {
        &self.config
    }

    /// 全 listing（新しい順）
    pub fn listings(&self) -> &[Listing] {
        self.store.all()
    }

    pub fn get(&self, id: ListingId) -> Option<&Listing> {
        self.store.get(id)
    }

    pub fn counts(&self) -> ListingCounts {
        ListingCounts::from_listings(self.store.all())
    }

    /// identity のロールに応じたビュー
    pub fn listings_for_role(&self, identity: &Identity) -> RoleView<'_> {
        views::listings_for_role(identity, self.store.all())
    }

    /// Post a new AVAILABLE listing at the head of the collection.
    pub fn create_listing(
        &mut self,
        donor: &Identity,
        draft: ListingDraft,
    ) -> Result<Listing, LeftoverError> {
        let listing = lifecycle::create(
            draft,
            donor,
            self.ids.generate_listing_id(),
            self.clock.now(),
        )
        .inspect_err(|err| {
            warn!(donor_id = %donor.id(), error = %err, "listing rejected");
        })?;

        self.store.insert_front(listing.clone())?;
        info!(listing_id = %listing.id(), donor_id = %donor.id(), title = listing.title(), "listing created");
        self.events.emit(&DomainEvent::ListingCreated {
            listing_id: listing.id(),
            donor_id: donor.id(),
            at: listing.created_at(),
        });
        Ok(listing)
    }

    /// Reserve an AVAILABLE listing for a receiving organization.
    pub fn claim_listing(
        &mut self,
        listing_id: ListingId,
        receiver: &Identity,
        organization: &str,
        delivery_address: &str,
    ) -> Result<Listing, LeftoverError> {
        let action = ListingAction::Claim {
            organization: organization.to_owned(),
            delivery_address: delivery_address.to_owned(),
        };
        let listing = self.transition(listing_id, &action, receiver)?;
        self.events.emit(&DomainEvent::ListingClaimed {
            listing_id,
            receiver_id: receiver.id(),
        });
        Ok(listing)
    }

    /// Delivery partner takes a CLAIMED listing.
    pub fn accept_pickup(
        &mut self,
        listing_id: ListingId,
        partner: &Identity,
    ) -> Result<Listing, LeftoverError> {
        let listing = self.transition(listing_id, &ListingAction::AcceptPickup, partner)?;
        self.events.emit(&DomainEvent::PickupAccepted {
            listing_id,
            delivery_partner_id: partner.id(),
        });
        Ok(listing)
    }

    /// Complete a PICKED_UP listing.
    ///
    /// Who may do this depends on [`MarketplaceConfig::delivery_policy`].
    pub fn mark_delivered(
        &mut self,
        listing_id: ListingId,
        actor: &Identity,
    ) -> Result<Listing, LeftoverError> {
        let listing = self.transition(listing_id, &ListingAction::MarkDelivered, actor)?;
        self.events.emit(&DomainEvent::ListingDelivered {
            listing_id,
            delivered_by: actor.id(),
        });
        Ok(listing)
    }

    fn transition(
        &mut self,
        listing_id: ListingId,
        action: &ListingAction,
        actor: &Identity,
    ) -> Result<Listing, LeftoverError> {
        let current = self
            .store
            .get(listing_id)
            .ok_or(LeftoverError::ListingNotFound(listing_id))?;

        let next = lifecycle::apply(current, action, actor, self.config.delivery_policy)
            .inspect_err(|err| {
                warn!(
                    %listing_id,
                    actor_id = %actor.id(),
                    action = %action.kind(),
                    error = %err,
                    "transition rejected"
                );
            })?;

        self.store.replace(next.clone())?;
        info!(
            %listing_id,
            actor_id = %actor.id(),
            status = %next.status(),
            "listing updated"
        );
        Ok(next)
    }

    /// サンプルの listing を 1 件入れる（作成時刻は 30 分前）
    pub fn seed_sample_listing(&mut self) -> Result<Listing, LeftoverError> {
        let donor = Identity::new(
            self.ids.generate_user_id(),
            "Grand Hyatt Events",
            PhoneNumber::parse("9876543210")?,
            Role::Donor,
        );
        let draft = ListingDraft::new(
            "Buffet Feast Surplus",
            "Approx. 40 plates",
            "Within 3 hours",
            "Banjara Hills, Block A",
        )
        .with_description(
            "Vegetarian feast leftovers: Basmati Rice, Paneer Tikka, and Mixed Veg Curry.",
        );
        let created_at = self.clock.now() - Duration::minutes(30);
        let listing = lifecycle::create(draft, &donor, self.ids.generate_listing_id(), created_at)?;
        self.store.insert_front(listing.clone())?;
        info!(listing_id = %listing.id(), "sample listing seeded");
        Ok(listing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::DeliveryPolicy;
    use crate::domain::{ActionKind, ErrorKind, ListingStatus, TransitionError, UserId};
    use crate::impls::{InMemoryListingStore, RecordingEventSink};
    use crate::ports::{FixedClock, UlidGenerator};
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};
    use ulid::Ulid;

    struct Harness {
        market: Marketplace,
        sink: Rc<RecordingEventSink>,
        clock: Rc<FixedClock>,
        donor: Identity,
        receiver: Identity,
        partner: Identity,
    }

    fn person(name: &str, role: Role) -> Identity {
        Identity::new(
            UserId::from_ulid(Ulid::new()),
            name,
            PhoneNumber::parse("9000000000").unwrap(),
            role,
        )
    }

    fn harness_with(policy: DeliveryPolicy) -> Harness {
        let clock = Rc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 18, 0, 0).unwrap(),
        ));
        let sink = Rc::new(RecordingEventSink::new());
        let config = MarketplaceConfig {
            delivery_policy: policy,
            seed_sample_listing: false,
            ..MarketplaceConfig::default()
        };
        let market = Marketplace::new(
            Box::new(InMemoryListingStore::new()),
            clock.clone(),
            Rc::new(UlidGenerator::new(clock.clone())),
            sink.clone(),
            config,
        );
        Harness {
            market,
            sink,
            clock,
            donor: person("Donor", Role::Donor),
            receiver: person("Asha", Role::Receiver),
            partner: person("Ravi", Role::Delivery),
        }
    }

    #[fixture]
    fn h() -> Harness {
        harness_with(DeliveryPolicy::AssignedPartnerOnly)
    }

    fn rice() -> ListingDraft {
        ListingDraft::new("Rice", "10 plates", "2 hours", "X")
    }

    #[rstest]
    fn create_uses_clock_and_inserts_first(mut h: Harness) {
        let first = h.market.create_listing(&h.donor, rice()).unwrap();
        h.clock.advance(Duration::minutes(5));
        let second = h
            .market
            .create_listing(&h.donor, ListingDraft::new("Dal", "5 bowls", "1 hour", "X"))
            .unwrap();

        assert_eq!(h.market.listings()[0].id(), second.id());
        assert_eq!(h.market.listings()[1].id(), first.id());
        assert_eq!(second.created_at() - first.created_at(), Duration::minutes(5));
        assert_eq!(h.sink.names(), vec!["listing_created", "listing_created"]);
    }

    #[rstest]
    fn rejected_create_leaves_store_empty(mut h: Harness) {
        let err = h
            .market
            .create_listing(&h.receiver, rice())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTransition);

        let err = h
            .market
            .create_listing(&h.donor, ListingDraft::new("Rice", "", "2 hours", "X"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        assert!(h.market.listings().is_empty());
        assert!(h.sink.events().is_empty());
    }

    #[rstest]
    fn unknown_listing_is_not_found(mut h: Harness) {
        let missing = ListingId::from_ulid(Ulid::new());
        let err = h.market.accept_pickup(missing, &h.partner).unwrap_err();
        assert_eq!(err, LeftoverError::ListingNotFound(missing));
    }

    #[rstest]
    fn failed_claim_leaves_store_unchanged(mut h: Harness) {
        let listing = h.market.create_listing(&h.donor, rice()).unwrap();
        h.market
            .claim_listing(listing.id(), &h.receiver, "Home A", "Y")
            .unwrap();
        let snapshot = h.market.listings().to_vec();
        let events_before = h.sink.events().len();

        let other_receiver = person("Home B", Role::Receiver);
        let err = h
            .market
            .claim_listing(listing.id(), &other_receiver, "Home B", "Z")
            .unwrap_err();

        assert_eq!(
            err,
            LeftoverError::InvalidTransition(TransitionError::WrongStatus {
                action: ActionKind::Claim,
                expected: ListingStatus::Available,
                actual: ListingStatus::Claimed,
            })
        );
        assert_eq!(h.market.listings(), snapshot.as_slice());
        assert_eq!(h.sink.events().len(), events_before);
    }

    #[rstest]
    fn strict_policy_blocks_other_partner(mut h: Harness) {
        let listing = h.market.create_listing(&h.donor, rice()).unwrap();
        h.market
            .claim_listing(listing.id(), &h.receiver, "Home A", "Y")
            .unwrap();
        h.market.accept_pickup(listing.id(), &h.partner).unwrap();

        let stranger = person("Meena", Role::Delivery);
        let err = h.market.mark_delivered(listing.id(), &stranger).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTransition);
        assert_eq!(
            h.market.get(listing.id()).unwrap().status(),
            ListingStatus::PickedUp
        );

        let done = h.market.mark_delivered(listing.id(), &h.partner).unwrap();
        assert_eq!(done.status(), ListingStatus::Delivered);
    }

    #[test]
    fn lenient_policy_allows_other_partner() {
        let mut h = harness_with(DeliveryPolicy::AnyDeliveryPartner);
        let listing = h.market.create_listing(&h.donor, rice()).unwrap();
        h.market
            .claim_listing(listing.id(), &h.receiver, "Home A", "Y")
            .unwrap();
        h.market.accept_pickup(listing.id(), &h.partner).unwrap();

        let stranger = person("Meena", Role::Delivery);
        let done = h.market.mark_delivered(listing.id(), &stranger).unwrap();
        assert_eq!(done.status(), ListingStatus::Delivered);
        assert_eq!(done.delivery_partner_id(), Some(h.partner.id()));
    }

    #[rstest]
    fn seed_listing_is_thirty_minutes_old(mut h: Harness) {
        let seeded = h.market.seed_sample_listing().unwrap();
        assert_eq!(seeded.title(), "Buffet Feast Surplus");
        assert_eq!(seeded.donor().name, "Grand Hyatt Events");
        assert_eq!(seeded.status(), ListingStatus::Available);
        assert_eq!(
            h.clock.now() - seeded.created_at(),
            Duration::minutes(30)
        );
        // seed はイベントを出さない
        assert!(h.sink.events().is_empty());
    }

    #[rstest]
    fn counts_follow_transitions(mut h: Harness) {
        let a = h.market.create_listing(&h.donor, rice()).unwrap();
        h.market.create_listing(&h.donor, rice()).unwrap();
        h.market
            .claim_listing(a.id(), &h.receiver, "Home A", "Y")
            .unwrap();

        let counts = h.market.counts();
        assert_eq!(counts.available, 1);
        assert_eq!(counts.claimed, 1);
        assert_eq!(counts.total(), 2);
    }

    #[rstest]
    fn transitions_emit_events_in_order(mut h: Harness) {
        let listing = h.market.create_listing(&h.donor, rice()).unwrap();
        h.market
            .claim_listing(listing.id(), &h.receiver, "Home A", "Y")
            .unwrap();
        h.market.accept_pickup(listing.id(), &h.partner).unwrap();
        h.market.mark_delivered(listing.id(), &h.partner).unwrap();

        assert_eq!(
            h.sink.names(),
            vec![
                "listing_created",
                "listing_claimed",
                "pickup_accepted",
                "listing_delivered",
            ]
        );
        assert!(
            h.sink
                .events()
                .iter()
                .all(|event| event.listing_id() == Some(listing.id()))
        );
    }
}
