//! Ports - 抽象化レイヤー
//!
//! Hexagonal Architecture の「ポート」を定義します。
//! 時刻・ID・確認コード・保管・イベント出力をすべて trait で差し替えられるようにし、
//! ライフサイクルを UI なしで単体テストできるようにしています。

pub mod clock;
pub mod code_generator;
pub mod event_sink;
pub mod id_generator;
pub mod listing_store;

// 主要な trait を再エクスポート
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::code_generator::{
    CodeGenerator, FixedCodeGenerator, RandomCodeGenerator, VerificationCode,
};
pub use self::event_sink::EventSink;
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::listing_store::{ListingStore, StoreError};
