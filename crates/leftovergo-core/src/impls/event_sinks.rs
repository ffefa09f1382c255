//! EventSink の実装

use std::cell::RefCell;

use tracing::info;

use crate::domain::DomainEvent;
use crate::ports::EventSink;

/// tracing の `info` イベントとして出力する
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: &DomainEvent) {
        let listing_id = event.listing_id().map(tracing::field::display);
        info!(
            event = event.name(),
            listing_id,
            payload = %serde_json::to_string(event).unwrap_or_default(),
            "domain event"
        );
    }
}

/// 受け取ったイベントをメモリに溜める
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: RefCell<Vec<DomainEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// これまでに受け取ったイベントのコピー
    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.borrow().clone()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events.borrow().iter().map(DomainEvent::name).collect()
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: &DomainEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use ulid::Ulid;

    #[test]
    fn recording_sink_keeps_order() {
        let sink = RecordingEventSink::new();
        let user_id = UserId::from_ulid(Ulid::new());
        sink.emit(&DomainEvent::LoggedIn {
            user_id,
            role: crate::domain::Role::Donor,
        });
        sink.emit(&DomainEvent::LoggedOut { user_id });
        assert_eq!(sink.names(), vec!["logged_in", "logged_out"]);
    }

    #[test]
    fn tracing_sink_does_not_need_a_subscriber() {
        TracingEventSink.emit(&DomainEvent::LoggedOut {
            user_id: UserId::from_ulid(Ulid::new()),
        });
    }
}
