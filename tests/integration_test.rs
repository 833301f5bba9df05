//! Live integration test against a real SQS queue.
//!
//! Requires AWS credentials in the environment (or a `.env` file) and
//! `TEST_SQS_QUEUE_URL` pointing at a disposable queue, so it is `#[ignore]`d
//! by default. Run with `cargo test -- --ignored`.

use std::env;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use sqs_queue_listener::client::create_sqs_client_from_env;
use sqs_queue_listener::{Config, Listener, QueueClient, handler_fn};
use tokio::time::timeout;

#[tokio::test]
#[ignore = "requires live AWS credentials and TEST_SQS_QUEUE_URL"]
async fn drains_a_live_queue() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .ok();

    let queue_url = env::var("TEST_SQS_QUEUE_URL").expect("TEST_SQS_QUEUE_URL must be set");
    let sqs_client = create_sqs_client_from_env().await;

    sqs_client
        .send(&queue_url, "live integration test message")
        .await
        .expect("failed to send test message");

    let received = Arc::new(Mutex::new(Vec::new()));

    let mut config = Config::new(&queue_url);
    config.wait_time_seconds = 5;
    config.max_polls = 4;

    let listener = Listener::new(sqs_client, config);
    let seen = Arc::clone(&received);
    let run = listener.start(handler_fn(move |message| {
        let seen = Arc::clone(&seen);
        async move {
            seen.lock().unwrap().push(message.body);
            Ok(())
        }
    }));

    timeout(Duration::from_secs(60), run)
        .await
        .expect("listener did not finish its bounded run");

    let bodies = received.lock().unwrap();
    assert!(
        !bodies.is_empty(),
        "expected to process at least the message we sent"
    );
}
