//! In-memory reference transport for local dry runs.
//!
//! Keeps the channel topic in memory and logs outbound traffic to stdout so
//! the full runtime can be exercised without a live chat network.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::monitor_contract::{ChatTransport, CommandOrigin, TransportError};

/// Transport that holds the topic in memory and prints outbound messages.
pub struct DryRunTransport {
    topic: Mutex<String>,
}

impl DryRunTransport {
    pub fn new(initial_topic: &str) -> Self {
        Self {
            topic: Mutex::new(initial_topic.to_string()),
        }
    }

    /// Current in-memory topic.
    pub async fn topic(&self) -> String {
        self.topic.lock().await.clone()
    }
}

#[async_trait]
impl ChatTransport for DryRunTransport {
    async fn broadcast(&self, message: &str) -> Result<(), TransportError> {
        println!("dry-run broadcast: {message}");
        Ok(())
    }

    async fn say(&self, channel: &str, message: &str) -> Result<(), TransportError> {
        println!("dry-run say: channel={channel} message={message}");
        Ok(())
    }

    async fn reply(&self, origin: &CommandOrigin, message: &str) -> Result<(), TransportError> {
        println!(
            "dry-run reply: channel={} sender={} message={message}",
            origin.channel, origin.sender
        );
        Ok(())
    }

    async fn publish_topic(&self, channel: &str, topic: &str) -> Result<(), TransportError> {
        let mut guard = self.topic.lock().await;
        *guard = topic.to_string();
        println!("dry-run topic: channel={channel} topic={topic}");
        Ok(())
    }

    async fn channel_topic(&self, _channel: &str) -> Result<String, TransportError> {
        Ok(self.topic.lock().await.clone())
    }
}
