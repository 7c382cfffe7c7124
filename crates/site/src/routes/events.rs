//! Live update stream.
//!
//! One SSE connection per open page. Each event names the collection
//! that changed; the page refetches the matching fragment. A lagged
//! subscriber is told to refresh everything rather than miss a change.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use tokio::sync::broadcast;
use tracing::instrument;

use crate::state::AppState;

/// Event name used for every change notice.
const CHANGE_EVENT: &str = "change";

/// Payload telling the page to refetch all fragments.
const REFRESH_ALL: &str = "all";

/// Stream content change notices to the browser.
///
/// GET /events
#[instrument(skip(state))]
pub async fn events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut changes = state.feed().subscribe();

    let stream = async_stream::stream! {
        loop {
            match changes.recv().await {
                Ok(collection) => {
                    yield Ok(Event::default().event(CHANGE_EVENT).data(collection.as_str()));
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "SSE subscriber lagged");
                    yield Ok(Event::default().event(CHANGE_EVENT).data(REFRESH_ALL));
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}
