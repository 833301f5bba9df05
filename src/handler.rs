use std::future::Future;

use async_trait::async_trait;

use crate::errors::HandlerError;
use crate::message::Message;

/// Trait for processing a single queue message.
///
/// The listener invokes `handle_message` once per received message and only
/// deletes the message from the queue when the call returns `Ok`. On `Err`
/// the message is left in place for the queue's own redelivery.
///
/// Handlers in one batch run concurrently, so implementations must be safe
/// to call from multiple tasks at once; the listener imposes no mutual
/// exclusion between calls. What a handler does internally is its own
/// business; decoding the payload and forwarding bytes to a device is one
/// valid implementation, entirely outside the listener. Because delivery is
/// at-least-once, handlers must tolerate seeing the same message twice.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// Processes one message, reporting success or failure.
    async fn handle_message(&self, message: &Message) -> Result<(), HandlerError>;
}

/// Adapter that lets a plain async function act as a [`MessageHandler`].
///
/// Built with [`handler_fn`]; the function receives its own clone of the
/// message, so concurrent invocations never share state through the adapter.
pub struct HandlerFunc<F> {
    f: F,
}

/// Wraps an async function or closure into a [`MessageHandler`].
///
/// # Example
///
/// ```rust
/// use sqs_queue_listener::handler_fn;
///
/// let handler = handler_fn(|message| async move {
///     println!("received: {}", message.body);
///     Ok(())
/// });
/// # let _ = handler;
/// ```
pub fn handler_fn<F, Fut>(f: F) -> HandlerFunc<F>
where
    F: Fn(Message) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    HandlerFunc { f }
}

#[async_trait]
impl<F, Fut> MessageHandler for HandlerFunc<F>
where
    F: Fn(Message) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    async fn handle_message(&self, message: &Message) -> Result<(), HandlerError> {
        (self.f)(message.clone()).await
    }
}
