/**
 * Item Stream Handler
 *
 * This module implements the Server-Sent Events endpoint
 * `GET /api/v1/items/stream`. Each connection owns one publisher
 * subscription and receives every item created while it is open.
 *
 * # Event Format
 *
 * ```text
 * event: item
 * data: {"id":"...","name":"Widget","count":3,"subItems":[]}
 * ```
 *
 * # Connection Management
 *
 * - Idle connections receive keep-alive comments
 * - When the client goes away axum drops the stream, which drops the
 *   subscription and detaches it from the publisher
 * - Items missed while disconnected are not replayed
 * - Items dropped because the client fell behind are logged; the
 *   connection stays open
 */

use crate::backend::realtime::broadcast::{ItemUpdatesPublisher, Subscription};
use crate::backend::server::state::StreamSettings;
use crate::shared::Item;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::stream;
use std::convert::Infallible;
use tokio_stream::Stream;

/// SSE event name used for item-creation events
pub const ITEM_EVENT: &str = "item";

/// Build the SSE frame for one item
pub fn item_event(item: &Item) -> Result<Event, serde_json::Error> {
    let data = serde_json::to_string(item)?;
    Ok(Event::default().event(ITEM_EVENT).data(data))
}

/// Drain a subscription into SSE events until the publisher closes
pub fn subscription_events(
    subscription: Subscription<Item>,
) -> impl Stream<Item = Result<Event, Infallible>> + Send + 'static {
    stream::unfold(subscription, |mut subscription| async move {
        loop {
            let item = subscription.recv().await?;

            let skipped = subscription.take_lagged();
            if skipped > 0 {
                tracing::warn!(
                    subscriber = subscription.id(),
                    "[Realtime] Subscriber lagged, skipped {} items",
                    skipped
                );
            }

            match item_event(&item) {
                Ok(event) => {
                    tracing::debug!(
                        subscriber = subscription.id(),
                        id = %item.id,
                        "[Realtime] Sending item to subscriber"
                    );
                    return Some((Ok(event), subscription));
                }
                Err(e) => {
                    tracing::error!("[Realtime] Failed to serialize item {}: {:?}", item.id, e);
                    continue;
                }
            }
        }
    })
}

/// Handle item stream subscription (GET /api/v1/items/stream)
///
/// # Returns
///
/// A `text/event-stream` response that stays open until the client
/// disconnects or the server shuts down.
pub async fn handle_item_stream(
    State(publisher): State<ItemUpdatesPublisher>,
    State(settings): State<StreamSettings>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let subscription = publisher.subscribe();
    tracing::info!(
        subscriber = subscription.id(),
        "[Realtime] Item stream opened, waiting for items..."
    );

    Sse::new(subscription_events(subscription))
        .keep_alive(KeepAlive::new().interval(settings.keep_alive))
}
