//! # AWS SQS Queue Listener
//!
//! An asynchronous AWS SQS queue listener that continuously drains a queue,
//! fans each received batch out to concurrent handler tasks, and deletes a
//! message only when its handler succeeds.
//!
//! ## Features
//!
//! - Long-polling receive loop with a configurable iteration bound
//! - One concurrent task per message in a batch, joined before the next poll
//! - At-least-once delivery: failed messages stay queued for redelivery
//! - Trait-based handlers, with an adapter for plain async functions
//! - Transport behind a trait, so tests run against an in-memory queue
//! - Continue-on-error semantics: receive, handler, and delete failures are
//!   logged and never stop the loop
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sqs_queue_listener::client::create_sqs_client_from_env;
//! use sqs_queue_listener::{handler_fn, Config, Listener};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = create_sqs_client_from_env().await;
//!     let config = Config::new("https://sqs.region.amazonaws.com/account/queue-name");
//!
//!     let listener = Listener::new(client, config);
//!     listener
//!         .start(handler_fn(|message| async move {
//!             println!("processing message: {}", message.body);
//!             Ok(())
//!         }))
//!         .await;
//! }
//! ```

pub mod client;
pub mod errors;
pub mod handler;
pub mod listener;
pub mod message;

pub use client::QueueClient;
pub use handler::{HandlerFunc, MessageHandler, handler_fn};
pub use listener::{Config, Listener};
pub use message::Message;
