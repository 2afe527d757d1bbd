//! One-shot feed downloads running on background IO threads.
//!
//! Same shape as the tile download machinery: the GUI never blocks, results
//! come back over a channel and the egui context gets poked to repaint.

use egui::Context;
use futures::channel::oneshot;
use reqwest::header::USER_AGENT;

/// Everything that can go wrong between the HTTP GET and the typed records.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),
}

enum FeedState<T> {
    Loading,
    Ready(T),
    Failed,
}

/// Handle to a single asynchronous feed download.
///
/// Constructing it starts the download; [`Feed::poll`] must be called every
/// frame so a finished download can land. There is no retry and no timeout:
/// a failed feed just stays empty.
pub struct Feed<T> {
    name: &'static str,
    state: FeedState<T>,
    result_rx: Option<oneshot::Receiver<Result<T, FeedError>>>,
}

impl<T: Send + 'static> Feed<T> {
    pub fn new<P>(name: &'static str, url: &str, parse: P, egui_ctx: Context) -> Self
    where
        P: FnOnce(&str) -> Result<T, FeedError> + Send + 'static,
    {
        let (result_tx, result_rx) = oneshot::channel();
        let url = url.to_owned();

        // One short-lived IO thread per feed; a current-thread runtime is
        // enough for a single request.
        let spawned = std::thread::Builder::new()
            .name(format!("feed-{name}"))
            .spawn(move || {
                let runtime = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(runtime) => runtime,
                    Err(e) => {
                        log::error!("Could not create the Tokio runtime: {e}");
                        return;
                    }
                };

                let result = runtime.block_on(async {
                    let document = download(&url).await?;
                    parse(&document)
                });

                // The receiver being gone just means the app shut down first.
                let _ = result_tx.send(result);
                egui_ctx.request_repaint();
            });

        if let Err(e) = spawned {
            log::error!("Could not spawn the {name} feed thread: {e}");
        }

        Self {
            name,
            state: FeedState::Loading,
            result_rx: Some(result_rx),
        }
    }
}

impl<T> Feed<T> {
    /// Pick up the download result if it has arrived. Called every frame.
    pub fn poll(&mut self) {
        let Some(result_rx) = self.result_rx.as_mut() else {
            return;
        };

        match result_rx.try_recv() {
            Ok(Some(Ok(records))) => {
                self.state = FeedState::Ready(records);
                self.result_rx = None;
            }
            Ok(Some(Err(e))) => {
                // The overlay silently stays empty.
                log::warn!("Could not load the {} feed: {e}", self.name);
                self.state = FeedState::Failed;
                self.result_rx = None;
            }
            Ok(None) => {
                // Still in flight.
            }
            Err(oneshot::Canceled) => {
                log::warn!("The {} feed download died.", self.name);
                self.state = FeedState::Failed;
                self.result_rx = None;
            }
        }
    }

    /// Parsed records, once the feed has arrived.
    pub fn ready(&self) -> Option<&T> {
        match &self.state {
            FeedState::Ready(records) => Some(records),
            _ => None,
        }
    }
}

async fn download(url: &str) -> Result<String, FeedError> {
    let response = reqwest::Client::new()
        .get(url)
        .header(
            USER_AGENT,
            concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")),
        )
        .send()
        .await?;

    log::debug!("Downloaded {:?}.", response.status());

    Ok(response.error_for_status()?.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedmock::{Bytes, StatusCode};
    use std::time::Duration;

    async fn poll_until_settled<T>(feed: &mut Feed<T>) {
        loop {
            feed.poll();
            if matches!(feed.state, FeedState::Loading) {
                // Need to yield to the runtime for things to move.
                tokio::time::sleep(Duration::from_millis(10)).await;
            } else {
                break;
            }
        }
    }

    #[tokio::test]
    async fn feed_becomes_ready_once_the_document_arrives() {
        let _ = env_logger::try_init();

        let server = feedmock::Server::bind().await;
        let url = format!("http://localhost:{}/all_week.geojson", server.port());
        let anticipated = server.anticipate("/all_week.geojson").await;

        let mut feed = Feed::new(
            "test",
            &url,
            crate::data::parse_earthquakes,
            Context::default(),
        );

        // Nothing there until the server responds.
        feed.poll();
        assert!(feed.ready().is_none());

        anticipated
            .respond(Bytes::from_static(
                br#"{ "type": "FeatureCollection", "features": [] }"#,
            ))
            .await;

        poll_until_settled(&mut feed).await;
        assert_eq!(feed.ready().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn feed_fails_quietly_on_http_error() {
        let _ = env_logger::try_init();

        let server = feedmock::Server::bind().await;
        let url = format!("http://localhost:{}/missing.geojson", server.port());
        server
            .anticipate("/missing.geojson")
            .await
            .respond_with_status(StatusCode::NOT_FOUND)
            .await;

        let mut feed = Feed::new(
            "test",
            &url,
            crate::data::parse_earthquakes,
            Context::default(),
        );

        poll_until_settled(&mut feed).await;
        assert!(feed.ready().is_none());
        assert!(matches!(feed.state, FeedState::Failed));
    }

    #[tokio::test]
    async fn feed_fails_quietly_on_garbage() {
        let _ = env_logger::try_init();

        let server = feedmock::Server::bind().await;
        let url = format!("http://localhost:{}/feed.geojson", server.port());
        server
            .anticipate("/feed.geojson")
            .await
            .respond(Bytes::from_static(b"definitely not geojson"))
            .await;

        let mut feed = Feed::new(
            "test",
            &url,
            crate::data::parse_earthquakes,
            Context::default(),
        );

        poll_until_settled(&mut feed).await;
        assert!(feed.ready().is_none());
        assert!(matches!(feed.state, FeedState::Failed));
    }
}
