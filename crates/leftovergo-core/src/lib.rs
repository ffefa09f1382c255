//! leftovergo-core
//!
//! Core building blocks for LeftOverGo, a surplus-food marketplace connecting
//! donors, receiving organizations and delivery partners.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, role, identity, listing, lifecycle, errors, events）
//! - **ports**: 抽象化レイヤー（Clock, IdGenerator, CodeGenerator, ListingStore, EventSink）
//! - **impls**: 実装（InMemoryListingStore, TracingEventSink など）
//! - **app**: アプリケーションロジック（builder, session, marketplace, views, config）
//! - **observability**: status ごとの件数集計
//!
//! Listing の状態は AVAILABLE → CLAIMED → PICKED_UP → DELIVERED の順にしか進みません。
//! 遷移の判定は `domain::lifecycle` の純粋関数で行い、`app::Marketplace` が結果を
//! store に反映します。

pub mod app;
pub mod domain;
pub mod impls;
pub mod observability;
pub mod ports;

pub use crate::app::{App, AppBuilder, Marketplace, MarketplaceConfig, RoleView, Session};
pub use crate::domain::{ErrorKind, Identity, LeftoverError, Listing, ListingStatus, Role};
