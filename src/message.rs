use std::collections::HashMap;

use aws_sdk_sqs::types::Message as SqsMessage;

/// A message delivered by the queue.
///
/// The body is the opaque payload handed to the message handler; the receipt
/// handle is the acknowledgement token required to delete this specific
/// delivery from the queue. Both are immutable once the message is received.
#[derive(Debug, Clone)]
pub struct Message {
    /// The queue-assigned message ID.
    pub message_id: String,

    /// The acknowledgement token for this delivery. Each redelivery of the
    /// same message carries a fresh handle.
    pub receipt_handle: String,

    /// The opaque message payload.
    pub body: String,

    /// Message system attributes returned by the queue service.
    pub attributes: HashMap<String, String>,
}

impl From<SqsMessage> for Message {
    fn from(msg: SqsMessage) -> Self {
        let mut attributes = HashMap::new();

        if let Some(attrs) = msg.attributes() {
            for (key, value) in attrs {
                attributes.insert(key.as_str().to_string(), value.to_string());
            }
        }

        Self {
            message_id: msg.message_id().unwrap_or_default().to_string(),
            receipt_handle: msg.receipt_handle().unwrap_or_default().to_string(),
            body: msg.body().unwrap_or_default().to_string(),
            attributes,
        }
    }
}
