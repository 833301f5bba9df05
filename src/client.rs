use std::sync::Arc;

use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_sqs::config::SharedCredentialsProvider;
use aws_sdk_sqs::error::DisplayErrorContext;
use aws_sdk_sqs::types::MessageSystemAttributeName;

use crate::errors::TransportError;
use crate::message::Message;

/// The queue transport as seen by the listener.
///
/// The listener never talks to the queue service directly; it goes through
/// this trait so the transport stays an opaque collaborator. The production
/// implementation is provided for [`aws_sdk_sqs::Client`]; tests substitute
/// an in-memory queue.
///
/// `receive` and `delete` are independent operations and safe to issue
/// concurrently from dispatch tasks sharing one client.
#[async_trait]
pub trait QueueClient: Send + Sync {
    /// Receives up to `max_messages` messages from the queue, long-polling
    /// for at most `wait_time_seconds`.
    ///
    /// Returns zero or more messages; fewer than requested is normal.
    async fn receive(
        &self,
        queue_url: &str,
        max_messages: i32,
        wait_time_seconds: i32,
    ) -> Result<Vec<Message>, TransportError>;

    /// Deletes a delivered message, identified by its receipt handle.
    async fn delete(&self, queue_url: &str, receipt_handle: &str) -> Result<(), TransportError>;

    /// Sends a message body to the queue.
    ///
    /// The listener core never sends; this is here because producers and
    /// tests drive the same transport.
    async fn send(&self, queue_url: &str, body: &str) -> Result<(), TransportError>;
}

#[async_trait]
impl QueueClient for aws_sdk_sqs::Client {
    async fn receive(
        &self,
        queue_url: &str,
        max_messages: i32,
        wait_time_seconds: i32,
    ) -> Result<Vec<Message>, TransportError> {
        let output = self
            .receive_message()
            .queue_url(queue_url)
            .max_number_of_messages(max_messages)
            .wait_time_seconds(wait_time_seconds)
            .message_system_attribute_names(MessageSystemAttributeName::All)
            .send()
            .await
            .map_err(|err| {
                TransportError::new("ReceiveMessage", DisplayErrorContext(&err).to_string())
            })?;

        Ok(output
            .messages
            .unwrap_or_default()
            .into_iter()
            .map(Message::from)
            .collect())
    }

    async fn delete(&self, queue_url: &str, receipt_handle: &str) -> Result<(), TransportError> {
        self.delete_message()
            .queue_url(queue_url)
            .receipt_handle(receipt_handle)
            .send()
            .await
            .map_err(|err| {
                TransportError::new("DeleteMessage", DisplayErrorContext(&err).to_string())
            })?;

        Ok(())
    }

    async fn send(&self, queue_url: &str, body: &str) -> Result<(), TransportError> {
        self.send_message()
            .queue_url(queue_url)
            .message_body(body)
            .send()
            .await
            .map_err(|err| {
                TransportError::new("SendMessage", DisplayErrorContext(&err).to_string())
            })?;

        Ok(())
    }
}

#[async_trait]
impl<C> QueueClient for Arc<C>
where
    C: QueueClient + ?Sized,
{
    async fn receive(
        &self,
        queue_url: &str,
        max_messages: i32,
        wait_time_seconds: i32,
    ) -> Result<Vec<Message>, TransportError> {
        (**self)
            .receive(queue_url, max_messages, wait_time_seconds)
            .await
    }

    async fn delete(&self, queue_url: &str, receipt_handle: &str) -> Result<(), TransportError> {
        (**self).delete(queue_url, receipt_handle).await
    }

    async fn send(&self, queue_url: &str, body: &str) -> Result<(), TransportError> {
        (**self).send(queue_url, body).await
    }
}

/// Creates an AWS SQS client using credentials and configuration from the environment.
///
/// This function loads AWS configuration from environment variables such as:
/// - `AWS_ACCESS_KEY_ID`
/// - `AWS_SECRET_ACCESS_KEY`
/// - `AWS_REGION`
/// - `AWS_PROFILE`
///
/// # Returns
///
/// Returns a configured `aws_sdk_sqs::Client` ready for use.
///
/// # Example
///
/// ```rust,no_run
/// use sqs_queue_listener::client::create_sqs_client_from_env;
///
/// #[tokio::main]
/// async fn main() {
///     let client = create_sqs_client_from_env().await;
///     // Use the client...
/// }
/// ```
pub async fn create_sqs_client_from_env() -> aws_sdk_sqs::Client {
    let config = aws_config::load_from_env().await;
    aws_sdk_sqs::Client::new(&config)
}

/// Creates an AWS SQS client with explicitly provided credentials and region.
///
/// Useful for applications that manage credentials dynamically or need to use
/// different credentials than those in the environment.
///
/// # Arguments
///
/// * `access_key_id` - The AWS access key ID
/// * `secret_access_key` - The AWS secret access key
/// * `region` - The AWS region (e.g., "us-east-1", "eu-west-1")
pub fn create_sqs_client_with_credentials(
    access_key_id: &str,
    secret_access_key: &str,
    region: &str,
) -> aws_sdk_sqs::Client {
    let credentials =
        aws_sdk_sqs::config::Credentials::new(access_key_id, secret_access_key, None, None, "aws");

    let shared_credentials = SharedCredentialsProvider::new(credentials);

    let config = aws_sdk_sqs::config::Builder::new()
        .region(Region::new(region.to_string()))
        .credentials_provider(shared_credentials)
        .build();

    aws_sdk_sqs::Client::from_conf(config)
}
