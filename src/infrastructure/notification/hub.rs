use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::{RwLock, broadcast};
use tracing::debug;

use crate::application::usecases::payments::NotificationPublisher;

const GROUP_CHANNEL_CAPACITY: usize = 64;

/// In-process fan-out of notification messages to websocket subscribers,
/// one broadcast channel per group name.
#[derive(Default)]
pub struct NotificationHub {
    groups: RwLock<HashMap<String, broadcast::Sender<String>>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn subscribe(&self, group: &str) -> broadcast::Receiver<String> {
        let mut groups = self.groups.write().await;
        groups
            .entry(group.to_string())
            .or_insert_with(|| broadcast::channel(GROUP_CHANNEL_CAPACITY).0)
            .subscribe()
    }

    pub async fn send(&self, group: &str, message: &str) {
        let groups = self.groups.read().await;
        if let Some(sender) = groups.get(group) {
            // Zero receivers is fine; nobody is watching right now.
            let delivered = sender.send(message.to_string()).unwrap_or(0);
            debug!(group = %group, receivers = delivered, "notification: message fanned out");
        } else {
            debug!(group = %group, "notification: no subscribers for group");
        }
    }
}

#[async_trait]
impl NotificationPublisher for NotificationHub {
    async fn publish(&self, group: &str, message: &str) -> Result<()> {
        self.send(group, message).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_published_messages() {
        let hub = NotificationHub::new();
        let mut receiver = hub.subscribe("payments").await;

        hub.publish("payments", "New transaction made successfully!")
            .await
            .unwrap();

        let message = receiver.recv().await.unwrap();
        assert_eq!(message, "New transaction made successfully!");
    }

    #[tokio::test]
    async fn groups_are_isolated() {
        let hub = NotificationHub::new();
        let mut payments = hub.subscribe("payments").await;
        let _reminders = hub.subscribe("reminders").await;

        hub.publish("reminders", "Tuition due Friday").await.unwrap();
        hub.publish("payments", "New transaction made successfully!")
            .await
            .unwrap();

        // The payments subscriber only ever sees its own group.
        let message = payments.recv().await.unwrap();
        assert_eq!(message, "New transaction made successfully!");
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_a_no_op() {
        let hub = NotificationHub::new();
        hub.publish("payments", "nobody listening").await.unwrap();
    }
}
