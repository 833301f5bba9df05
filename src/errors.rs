use thiserror::Error;

/// Error raised by a queue transport operation.
///
/// Produced by [`QueueClient`](crate::client::QueueClient) implementations
/// when a receive, delete, or send call against the queue service fails.
/// Carries the failed operation name and the rendered error chain so the
/// listener can log it without holding onto provider-specific error types.
#[derive(Debug, Error)]
#[error("sqs {operation} call failed: {message}")]
pub struct TransportError {
    operation: &'static str,
    message: String,
}

impl TransportError {
    /// Creates a new `TransportError` for the given queue operation.
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        TransportError {
            operation,
            message: message.into(),
        }
    }

    /// The queue operation that failed (e.g. `"ReceiveMessage"`).
    pub fn operation(&self) -> &str {
        self.operation
    }
}

/// Failure signal returned by a message handler.
///
/// The listener treats handler failures as opaque: the message is left in the
/// queue for redelivery and the error is logged. Handlers can build one from
/// a plain message or wrap an underlying error as the source.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl HandlerError {
    /// Creates a new `HandlerError` with the provided message.
    pub fn new(message: impl Into<String>) -> Self {
        HandlerError {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new `HandlerError` wrapping an underlying error.
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        HandlerError {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        HandlerError::new(message)
    }
}

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        HandlerError::new(message)
    }
}

/// Error types for listener dispatch operations.
///
/// Each variant is one of the three failure categories the listener can
/// observe while draining a queue. None of them is fatal to the poll loop:
///
/// - [`Receive`](ListenerError::Receive) skips the iteration,
/// - [`Handler`](ListenerError::Handler) leaves the message in the queue for
///   redelivery,
/// - [`Delete`](ListenerError::Delete) is accepted as the at-least-once
///   tradeoff; the delete is not retried.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Receiving a batch from the queue failed. Treated as transient.
    #[error("failed to receive messages from {queue_url}: {source}")]
    Receive {
        queue_url: String,
        source: TransportError,
    },

    /// The message handler reported a failure; the message was not deleted.
    #[error("handler failed for message {message_id}: {source}")]
    Handler {
        message_id: String,
        source: HandlerError,
    },

    /// Deleting an acknowledged message failed; it may be redelivered.
    #[error("failed to delete message {receipt_handle}: {source}")]
    Delete {
        receipt_handle: String,
        source: TransportError,
    },
}
