//! App - アプリケーション層
//!
//! このモジュールは、ports を組み合わせてアプリケーションロジックを実装します。
//!
//! # 主要コンポーネント
//! - **AppBuilder**: アプリケーションの構築とワイヤリング
//! - **Session**: モック OTP によるログインフロー
//! - **Marketplace**: listing の作成と状態遷移
//! - **views**: ロールごとの listing フィルタ

pub mod builder;
pub mod config;
pub mod marketplace;
pub mod session;
pub mod views;

// 主要な型を再エクスポート
pub use self::builder::{App, AppBuilder, BuildError};
pub use self::config::{DeliveryPolicy, MarketplaceConfig, DEFAULT_RECENT_COMPLETED_LIMIT};
pub use self::marketplace::Marketplace;
pub use self::session::{login, Session, SessionState};
pub use self::views::{listings_for_role, RoleView};
