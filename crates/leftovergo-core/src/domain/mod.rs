//! Domain model (IDs, roles, identities, listings, lifecycle, errors, events).
//!
//! このモジュールは I/O を持たない純粋なモデルです。
//! 時刻や ID は ports 経由で外から渡します。

pub mod errors;
pub mod events;
pub mod identity;
pub mod ids;
pub mod lifecycle;
pub mod listing;
pub mod role;

pub use self::errors::{
    AuthError, ErrorKind, LeftoverError, StoreError, TransitionError, ValidationError,
};
pub use self::events::DomainEvent;
pub use self::identity::{Identity, LoginDetails, PhoneNumber, ValidatedDetails};
pub use self::ids::{ListingId, UserId};
pub use self::lifecycle::{ActionKind, DeliveryPolicy, ListingAction};
pub use self::listing::{
    DonorRef, Listing, ListingDraft, ListingState, ListingStatus, ReceiverRef,
};
pub use self::role::Role;
