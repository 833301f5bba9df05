use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, error, info};

use crate::client::QueueClient;
use crate::errors::ListenerError;
use crate::handler::MessageHandler;
use crate::message::Message;

/// Dispatches one batch: every message gets its own task, all tasks run
/// concurrently, and the call does not return until the whole batch has
/// completed. One slow message never stalls its siblings; the barrier bounds
/// batch latency to the slowest single handler.
pub(crate) async fn dispatch_batch<C, H>(
    client: Arc<C>,
    queue_url: String,
    batch: Vec<Message>,
    handler: Arc<H>,
) where
    C: QueueClient + 'static,
    H: MessageHandler + 'static,
{
    info!(count = batch.len(), "received messages");

    let mut tasks = Vec::with_capacity(batch.len());
    for message in batch {
        let client = Arc::clone(&client);
        let handler = Arc::clone(&handler);
        let queue_url = queue_url.clone();
        tasks.push(tokio::spawn(async move {
            if let Err(dispatch_error) =
                process_message(client.as_ref(), &queue_url, handler.as_ref(), &message).await
            {
                error!(error = %dispatch_error, "message dispatch failed");
            }
        }));
    }

    for joined in join_all(tasks).await {
        // A panicking handler is isolated to its own task.
        if let Err(join_error) = joined {
            error!(error = %join_error, "dispatch task aborted");
        }
    }
}

/// Runs the handler for one message and, only on success, deletes it from
/// the queue. A handler failure leaves the message for redelivery; a delete
/// failure is reported but never retried.
async fn process_message<C, H>(
    client: &C,
    queue_url: &str,
    handler: &H,
    message: &Message,
) -> Result<(), ListenerError>
where
    C: QueueClient,
    H: MessageHandler,
{
    debug!(message_id = %message.message_id, "running handler for message");

    handler
        .handle_message(message)
        .await
        .map_err(|source| ListenerError::Handler {
            message_id: message.message_id.clone(),
            source,
        })?;

    client
        .delete(queue_url, &message.receipt_handle)
        .await
        .map_err(|source| ListenerError::Delete {
            receipt_handle: message.receipt_handle.clone(),
            source,
        })?;

    debug!(receipt_handle = %message.receipt_handle, "deleted message from queue");

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::errors::{HandlerError, TransportError};

    struct StubQueue {
        deleted: Mutex<Vec<String>>,
        fail_deletes: bool,
    }

    impl StubQueue {
        fn new(fail_deletes: bool) -> Self {
            StubQueue {
                deleted: Mutex::new(Vec::new()),
                fail_deletes,
            }
        }
    }

    #[async_trait]
    impl QueueClient for StubQueue {
        async fn receive(
            &self,
            _queue_url: &str,
            _max_messages: i32,
            _wait_time_seconds: i32,
        ) -> Result<Vec<Message>, TransportError> {
            Ok(Vec::new())
        }

        async fn delete(
            &self,
            _queue_url: &str,
            receipt_handle: &str,
        ) -> Result<(), TransportError> {
            if self.fail_deletes {
                return Err(TransportError::new("DeleteMessage", "receipt expired"));
            }
            self.deleted.lock().unwrap().push(receipt_handle.to_string());
            Ok(())
        }

        async fn send(&self, _queue_url: &str, _body: &str) -> Result<(), TransportError> {
            Ok(())
        }
    }

    fn message(id: &str) -> Message {
        Message {
            message_id: id.to_string(),
            receipt_handle: format!("{id}-receipt"),
            body: "payload".to_string(),
            attributes: HashMap::new(),
        }
    }

    #[tokio::test]
    async fn successful_handler_deletes_the_message() {
        let client = StubQueue::new(false);
        let handler = crate::handler_fn(|_message| async move { Ok(()) });

        let result = process_message(&client, "queue-url", &handler, &message("m1")).await;

        assert!(result.is_ok());
        assert_eq!(*client.deleted.lock().unwrap(), vec!["m1-receipt"]);
    }

    #[tokio::test]
    async fn handler_failure_is_tagged_and_skips_delete() {
        let client = StubQueue::new(false);
        let handler = crate::handler_fn(|_message| async move {
            Err(HandlerError::new("payload rejected"))
        });

        let result = process_message(&client, "queue-url", &handler, &message("m1")).await;

        match result {
            Err(ListenerError::Handler { message_id, .. }) => assert_eq!(message_id, "m1"),
            other => panic!("expected Handler error, got: {other:?}"),
        }
        assert!(client.deleted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_failure_is_tagged_with_the_receipt_handle() {
        let client = StubQueue::new(true);
        let handler = crate::handler_fn(|_message| async move { Ok(()) });

        let result = process_message(&client, "queue-url", &handler, &message("m1")).await;

        match result {
            Err(ListenerError::Delete {
                receipt_handle,
                source,
            }) => {
                assert_eq!(receipt_handle, "m1-receipt");
                assert_eq!(source.operation(), "DeleteMessage");
            }
            other => panic!("expected Delete error, got: {other:?}"),
        }
    }
}
