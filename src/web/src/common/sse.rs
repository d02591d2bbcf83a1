use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{self, Stream};
use log::debug;
use serde::Serialize;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::broadcast::Receiver;

/// Forwards a broadcast channel as server-sent events until the channel
/// closes. Lagging clients skip what they missed.
pub fn broadcast_stream<T>(
    receiver: Receiver<T>,
    event_name: &'static str,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>>
where
    T: Clone + Serialize + Send + 'static,
{
    let events = stream::unfold(receiver, move |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(item) => {
                    let event = Event::default().event(event_name).json_data(&item);
                    return Some((event, receiver));
                }
                Err(RecvError::Lagged(skipped)) => {
                    debug!("sse client lagged, {} {} events skipped", skipped, event_name);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
