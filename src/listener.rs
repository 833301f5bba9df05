use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::client::QueueClient;
use crate::errors::ListenerError;
use crate::handler::MessageHandler;
use crate::message::Message;

pub mod config;
mod dispatch;

pub use config::Config;

/// Polls a queue and drives a [`MessageHandler`] over every received batch.
///
/// The listener runs one sequential poll loop: receive a batch, fan the
/// batch out to concurrent handler tasks, wait for all of them, then poll
/// again. A message is deleted from the queue if and only if its handler
/// call succeeded; everything else is left for the queue's own redelivery.
/// No error the listener observes is fatal to the loop; failures surface
/// through logging, not return values.
///
/// The listener keeps no per-message state across iterations, so redelivered
/// messages are simply processed again (at-least-once delivery).
pub struct Listener<C>
where
    C: QueueClient + 'static,
{
    client: Arc<C>,
    config: Config,
}

impl<C> Listener<C>
where
    C: QueueClient + 'static,
{
    /// Creates a listener over the given queue client and configuration.
    pub fn new(client: C, config: Config) -> Self {
        Listener {
            client: Arc::new(client),
            config,
        }
    }

    /// Starts the poll loop and runs it for `max_polls` iterations.
    ///
    /// Fire and forget: the future resolves only when the iteration bound is
    /// reached. Receive errors skip the iteration and polling continues; an
    /// empty batch is a no-op iteration. A non-empty batch is fully
    /// dispatched before the next receive is issued.
    pub async fn start<H>(&self, handler: H)
    where
        H: MessageHandler + 'static,
    {
        let handler = Arc::new(handler);
        info!(queue_url = %self.config.queue_url, "polling for messages");

        for _ in 0..self.config.max_polls {
            match self.receive_batch().await {
                Ok(batch) => self.dispatch(&handler, batch).await,
                Err(receive_error) => {
                    warn!(error = %receive_error, "receive failed, skipping iteration");
                }
            }
        }
    }

    /// Like [`start`](Listener::start), but also stops when the shutdown
    /// signal fires (or its sender is dropped).
    ///
    /// The signal is only observed between dispatches, at the receive call:
    /// a batch in flight is always processed and acknowledged to completion
    /// before the listener returns.
    pub async fn start_with_shutdown<H>(&self, handler: H, mut shutdown: oneshot::Receiver<()>)
    where
        H: MessageHandler + 'static,
    {
        let handler = Arc::new(handler);
        info!(queue_url = %self.config.queue_url, "polling for messages");

        for _ in 0..self.config.max_polls {
            let received = tokio::select! {
                _ = &mut shutdown => {
                    info!("shutdown signal received, stopping listener");
                    return;
                }
                received = self.receive_batch() => received,
            };

            match received {
                Ok(batch) => self.dispatch(&handler, batch).await,
                Err(receive_error) => {
                    warn!(error = %receive_error, "receive failed, skipping iteration");
                }
            }
        }
    }

    async fn receive_batch(&self) -> Result<Vec<Message>, ListenerError> {
        debug!(queue_url = %self.config.queue_url, "reading messages from queue");
        self.client
            .receive(
                &self.config.queue_url,
                self.config.clamped_max_messages(),
                self.config.clamped_wait_time_seconds(),
            )
            .await
            .map_err(|source| ListenerError::Receive {
                queue_url: self.config.queue_url.clone(),
                source,
            })
    }

    async fn dispatch<H>(&self, handler: &Arc<H>, batch: Vec<Message>)
    where
        H: MessageHandler + 'static,
    {
        if batch.is_empty() {
            debug!("no messages received");
            return;
        }

        dispatch::dispatch_batch(
            Arc::clone(&self.client),
            self.config.queue_url.clone(),
            batch,
            Arc::clone(handler),
        )
        .await;
    }
}
