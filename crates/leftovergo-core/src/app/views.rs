//! Views - ロールごとの listing 射影
//!
//! 毎回 store 全体から再計算する借用ビューです（キャッシュやインデックスはなし）。
//! 同じ listing が複数のロールのビューに現れることはありますが、どのフィルタも元の
//! コレクションを変更しません。

use serde::Serialize;

use crate::domain::{Identity, Listing, ListingStatus, Role, UserId};

/// Listings posted by `donor_id`, in store order.
pub fn donor_listings(all: &[Listing], donor_id: UserId) -> Vec<&Listing> {
    all.iter()
        .filter(|listing| listing.donor().id == donor_id)
        .collect()
}

/// Listings open for claiming.
pub fn available_listings(all: &[Listing]) -> Vec<&Listing> {
    with_status(all, ListingStatus::Available)
}

/// Listings claimed by `receiver_id`, whatever their current status.
pub fn receiver_claims(all: &[Listing], receiver_id: UserId) -> Vec<&Listing> {
    all.iter()
        .filter(|listing| listing.receiver().is_some_and(|r| r.id == receiver_id))
        .collect()
}

/// Claimed listings waiting for a delivery partner.
pub fn available_pickups(all: &[Listing]) -> Vec<&Listing> {
    with_status(all, ListingStatus::Claimed)
}

/// Listings accepted by `partner_id`.
pub fn partner_deliveries(all: &[Listing], partner_id: UserId) -> Vec<&Listing> {
    all.iter()
        .filter(|listing| listing.delivery_partner_id() == Some(partner_id))
        .collect()
}

fn with_status(all: &[Listing], status: ListingStatus) -> Vec<&Listing> {
    all.iter()
        .filter(|listing| listing.status() == status)
        .collect()
}

/// RoleView はログイン中の identity が見る作業セット
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(
    tag = "role",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum RoleView<'a> {
    Donor {
        my_listings: Vec<&'a Listing>,
    },
    Receiver {
        available: Vec<&'a Listing>,
        my_claims: Vec<&'a Listing>,
    },
    Delivery {
        available_pickups: Vec<&'a Listing>,
        active: Vec<&'a Listing>,
        completed: Vec<&'a Listing>,
    },
}

impl<'a> RoleView<'a> {
    pub fn role(&self) -> Role {
        match self {
            RoleView::Donor { .. } => Role::Donor,
            RoleView::Receiver { .. } => Role::Receiver,
            RoleView::Delivery { .. } => Role::Delivery,
        }
    }

    /// 画面に出す完了済み配達（先頭から `limit` 件）
    pub fn recent_completed(&self, limit: usize) -> &[&'a Listing] {
        match self {
            RoleView::Delivery { completed, .. } => &completed[..completed.len().min(limit)],
            RoleView::Donor { .. } | RoleView::Receiver { .. } => &[],
        }
    }

    /// このビューのどこかに `listing_id` の listing が含まれるか
    pub fn contains(&self, listing_id: crate::domain::ListingId) -> bool {
        self.sections()
            .iter()
            .any(|(_, items)| items.iter().any(|listing| listing.id() == listing_id))
    }

    /// セクション名と中身の組
    pub fn sections(&self) -> Vec<(&'static str, &[&'a Listing])> {
        match self {
            RoleView::Donor { my_listings } => vec![("my_listings", my_listings.as_slice())],
            RoleView::Receiver {
                available,
                my_claims,
            } => vec![
                ("available", available.as_slice()),
                ("my_claims", my_claims.as_slice()),
            ],
            RoleView::Delivery {
                available_pickups,
                active,
                completed,
            } => vec![
                ("available_pickups", available_pickups.as_slice()),
                ("active", active.as_slice()),
                ("completed", completed.as_slice()),
            ],
        }
    }
}

/// Route the full collection to the working set of `identity`'s role.
pub fn listings_for_role<'a>(identity: &Identity, all: &'a [Listing]) -> RoleView<'a> {
    let id = identity.id();
    match identity.role() {
        Role::Donor => RoleView::Donor {
            my_listings: donor_listings(all, id),
        },
        Role::Receiver => RoleView::Receiver {
            available: available_listings(all),
            my_claims: receiver_claims(all, id),
        },
        Role::Delivery => {
            let (active, completed): (Vec<&Listing>, Vec<&Listing>) = partner_deliveries(all, id)
                .into_iter()
                .filter(|listing| {
                    matches!(
                        listing.status(),
                        ListingStatus::PickedUp | ListingStatus::Delivered
                    )
                })
                .partition(|listing| listing.status() == ListingStatus::PickedUp);
            RoleView::Delivery {
                available_pickups: available_pickups(all),
                active,
                completed,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lifecycle::{self, DeliveryPolicy, ListingAction};
    use crate::domain::{ListingDraft, ListingId, PhoneNumber};
    use chrono::Utc;
    use ulid::Ulid;

    fn person(name: &str, role: Role) -> Identity {
        Identity::new(
            UserId::from_ulid(Ulid::new()),
            name,
            PhoneNumber::parse("7000000001").unwrap(),
            role,
        )
    }

    struct World {
        donor: Identity,
        other_donor: Identity,
        receiver: Identity,
        partner: Identity,
        listings: Vec<Listing>,
    }

    fn step(listing: &Listing, action: ListingAction, actor: &Identity) -> Listing {
        lifecycle::apply(listing, &action, actor, DeliveryPolicy::default()).unwrap()
    }

    /// 新しい順に: delivered, picked_up, claimed, available, other donor's available
    fn world() -> World {
        let donor = person("Donor", Role::Donor);
        let other_donor = person("Other", Role::Donor);
        let receiver = person("Home A", Role::Receiver);
        let partner = person("Ravi", Role::Delivery);

        let new = |who: &Identity, title: &str| {
            lifecycle::create(
                ListingDraft::new(title, "5 plates", "1 hour", "X"),
                who,
                ListingId::from_ulid(Ulid::new()),
                Utc::now(),
            )
            .unwrap()
        };
        let claim = || ListingAction::Claim {
            organization: "Home A".to_string(),
            delivery_address: "Y".to_string(),
        };

        let other = new(&other_donor, "other");
        let available = new(&donor, "available");
        let claimed = step(&new(&donor, "claimed"), claim(), &receiver);
        let picked = step(
            &step(&new(&donor, "picked"), claim(), &receiver),
            ListingAction::AcceptPickup,
            &partner,
        );
        let delivered = step(
            &step(
                &step(&new(&donor, "delivered"), claim(), &receiver),
                ListingAction::AcceptPickup,
                &partner,
            ),
            ListingAction::MarkDelivered,
            &partner,
        );

        World {
            donor,
            other_donor,
            receiver,
            partner,
            listings: vec![delivered, picked, claimed, available, other],
        }
    }

    fn titles(items: &[&Listing]) -> Vec<String> {
        items.iter().map(|l| l.title().to_string()).collect()
    }

    #[test]
    fn donor_sees_own_listings_in_store_order() {
        let w = world();
        let RoleView::Donor { my_listings } = listings_for_role(&w.donor, &w.listings) else {
            panic!("expected donor view");
        };
        assert_eq!(
            titles(&my_listings),
            vec!["delivered", "picked", "claimed", "available"]
        );

        let RoleView::Donor { my_listings } = listings_for_role(&w.other_donor, &w.listings)
        else {
            panic!("expected donor view");
        };
        assert_eq!(titles(&my_listings), vec!["other"]);
    }

    #[test]
    fn receiver_sees_available_and_own_claims() {
        let w = world();
        let RoleView::Receiver {
            available,
            my_claims,
        } = listings_for_role(&w.receiver, &w.listings)
        else {
            panic!("expected receiver view");
        };
        assert_eq!(titles(&available), vec!["available", "other"]);
        assert_eq!(titles(&my_claims), vec!["delivered", "picked", "claimed"]);
    }

    #[test]
    fn delivery_sees_pickups_active_and_completed() {
        let w = world();
        let view = listings_for_role(&w.partner, &w.listings);
        let RoleView::Delivery {
            available_pickups,
            active,
            completed,
        } = &view
        else {
            panic!("expected delivery view");
        };
        assert_eq!(titles(available_pickups), vec!["claimed"]);
        assert_eq!(titles(active), vec!["picked"]);
        assert_eq!(titles(completed), vec!["delivered"]);
        assert_eq!(view.recent_completed(3).len(), 1);
        assert_eq!(view.recent_completed(0).len(), 0);
    }

    #[test]
    fn other_partner_has_no_deliveries() {
        let w = world();
        let stranger = person("Meena", Role::Delivery);
        let view = listings_for_role(&stranger, &w.listings);
        assert_eq!(view.role(), Role::Delivery);
        let RoleView::Delivery {
            active, completed, ..
        } = view
        else {
            panic!("expected delivery view");
        };
        assert!(active.is_empty());
        assert!(completed.is_empty());
    }

    #[test]
    fn filters_do_not_touch_source() {
        let w = world();
        let before = w.listings.clone();
        for who in [&w.donor, &w.receiver, &w.partner] {
            let _ = listings_for_role(who, &w.listings);
        }
        assert_eq!(w.listings, before);
    }

    #[test]
    fn recent_completed_is_empty_for_other_roles() {
        let w = world();
        assert!(listings_for_role(&w.donor, &w.listings)
            .recent_completed(3)
            .is_empty());
    }

    #[test]
    fn view_serializes_with_role_tag() {
        let w = world();
        let value = serde_json::to_value(listings_for_role(&w.receiver, &w.listings)).unwrap();
        assert_eq!(value["role"], "RECEIVER");
        assert_eq!(value["available"].as_array().unwrap().len(), 2);
    }
}
