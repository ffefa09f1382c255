//! Impls - ports の実装（プロセス内）
//!
//! # 含まれる実装
//! - **InMemoryListingStore**: 唯一の listing 保管場所
//! - **TracingEventSink**: イベントを tracing に出す
//! - **RecordingEventSink**: テスト用にイベントを溜める

pub mod event_sinks;
pub mod inmem_store;

pub use self::event_sinks::{RecordingEventSink, TracingEventSink};
pub use self::inmem_store::InMemoryListingStore;
