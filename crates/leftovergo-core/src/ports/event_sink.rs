//! EventSink port - イベント記録の抽象化
//!
//! - **TracingEventSink**: tracing に構造化ログとして出す（デフォルト）
//! - **RecordingEventSink**: メモリに溜める（テスト用）

use crate::domain::DomainEvent;

/// EventSink はドメインイベントを記録
///
/// 失敗しても本体の操作は取り消さないので、戻り値はありません。
pub trait EventSink {
    fn emit(&self, event: &DomainEvent);
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&self, event: &DomainEvent) {
        (**self).emit(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for std::rc::Rc<S> {
    fn emit(&self, event: &DomainEvent) {
        (**self).emit(event);
    }
}
