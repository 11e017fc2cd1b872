// Server-sent event streaming of dashboard snapshots
use crate::domain::dashboard::DashboardSnapshot;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use std::sync::Arc;
use tokio::sync::watch;

/// Stream the current snapshot immediately, then one event per published tick.
///
/// Slow clients skip intermediate snapshots rather than queueing them.
pub fn snapshot_events(
    mut rx: watch::Receiver<Arc<DashboardSnapshot>>,
) -> impl Stream<Item = Result<Event, axum::Error>> {
    async_stream::stream! {
        let current = rx.borrow_and_update().clone();
        yield snapshot_event(&current);

        while rx.changed().await.is_ok() {
            let snapshot = rx.borrow_and_update().clone();
            yield snapshot_event(&snapshot);
        }
    }
}

fn snapshot_event(snapshot: &DashboardSnapshot) -> Result<Event, axum::Error> {
    Event::default()
        .event("snapshot")
        .id(snapshot.tick.to_string())
        .json_data(snapshot)
}

/// Helper to create an SSE response from a snapshot receiver
pub fn stream_from_receiver(
    rx: watch::Receiver<Arc<DashboardSnapshot>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    Sse::new(snapshot_events(rx)).keep_alive(KeepAlive::default())
}
