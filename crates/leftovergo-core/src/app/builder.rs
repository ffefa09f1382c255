//! AppBuilder - アプリケーションの構築とワイヤリング
//!
//! ports の実装と MarketplaceConfig を受け取り、Session と Marketplace を
//! 同じ Clock / IdGenerator / EventSink で組み立てます。
//! 指定しなかった port には本番用の既定実装を使います。

use std::rc::Rc;

use super::config::MarketplaceConfig;
use super::marketplace::Marketplace;
use super::session::Session;
use super::views::RoleView;
use crate::domain::{Identity, LeftoverError};
use crate::impls::{InMemoryListingStore, TracingEventSink};
use crate::ports::{
    Clock, CodeGenerator, EventSink, IdGenerator, ListingStore, RandomCodeGenerator,
    SystemClock, UlidGenerator,
};

/// AppBuilder はアプリケーションを構築
///
/// # 使用例
/// ```
/// use leftovergo_core::app::{AppBuilder, MarketplaceConfig};
///
/// let app = AppBuilder::new()
///     .with_config(MarketplaceConfig {
///         seed_sample_listing: false,
///         ..MarketplaceConfig::default()
///     })
///     .build()?;
/// assert!(app.marketplace().listings().is_empty());
/// # Ok::<(), leftovergo_core::app::BuildError>(())
/// ```
#[derive(Default)]
pub struct AppBuilder {
    clock: Option<Rc<dyn Clock>>,
    ids: Option<Rc<dyn IdGenerator>>,
    codes: Option<Box<dyn CodeGenerator>>,
    events: Option<Rc<dyn EventSink>>,
    store: Option<Box<dyn ListingStore>>,
    config: MarketplaceConfig,
}

/// BuildError はアプリケーション構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("failed to seed the sample listing: {0}")]
    Seed(#[source] LeftoverError),
}

impl AppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// 省略時は Clock を使う UlidGenerator
    pub fn with_id_generator(mut self, ids: Rc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn with_code_generator(mut self, codes: Box<dyn CodeGenerator>) -> Self {
        self.codes = Some(codes);
        self
    }

    pub fn with_event_sink(mut self, events: Rc<dyn EventSink>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn with_store(mut self, store: Box<dyn ListingStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_config(mut self, config: MarketplaceConfig) -> Self {
        self.config = config;
        self
    }

    /// App を生成する
    ///
    /// `seed_sample_listing` が有効ならサンプル listing を 1 件入れてから返します。
    pub fn build(self) -> Result<App, BuildError> {
        let clock = self.clock.unwrap_or_else(|| Rc::new(SystemClock));
        let ids = self
            .ids
            .unwrap_or_else(|| Rc::new(UlidGenerator::new(clock.clone())));
        let codes = self
            .codes
            .unwrap_or_else(|| Box::new(RandomCodeGenerator));
        let events = self
            .events
            .unwrap_or_else(|| Rc::new(TracingEventSink));
        let store = self
            .store
            .unwrap_or_else(|| Box::new(InMemoryListingStore::new()));

        let seed = self.config.seed_sample_listing;
        let session = Session::new(codes, ids.clone(), events.clone());
        let mut marketplace = Marketplace::new(store, clock, ids, events, self.config);
        if seed {
            marketplace.seed_sample_listing().map_err(BuildError::Seed)?;
        }

        Ok(App {
            session,
            marketplace,
        })
    }
}

/// App は 1 人分の Session と共有の Marketplace
#[derive(Debug)]
pub struct App {
    session: Session,
    marketplace: Marketplace,
}

impl App {
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn marketplace(&self) -> &Marketplace {
        &self.marketplace
    }

    pub fn marketplace_mut(&mut self) -> &mut Marketplace {
        &mut self.marketplace
    }

    /// ログイン中の identity
    pub fn current_identity(&self) -> Option<&Identity> {
        self.session.current()
    }

    /// ログイン中の identity から見たビュー（未ログインなら None）
    pub fn current_view(&self) -> Option<RoleView<'_>> {
        self.session
            .current()
            .map(|identity| self.marketplace.listings_for_role(identity))
    }
}
