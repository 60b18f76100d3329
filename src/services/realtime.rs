//! Realtime notifications over Redis pub/sub

use redis::{AsyncCommands, Client};
use serde::Serialize;
use serde_json::json;

use crate::error::{AppError, AppResult};

const EVENTS_CHANNEL: &str = "opticare:events";

#[derive(Clone)]
pub struct RealtimeService {
    client: Client,
}

impl RealtimeService {
    /// Create a new realtime service and verify connectivity
    pub async fn new(url: &str) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;

        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to connect to Redis: {}", e)))?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Redis connection test failed: {}", e)))?;

        Ok(Self { client })
    }

    /// Publish an event on the shared events channel. Delivery is best
    /// effort; failures are logged and never fail the request.
    pub async fn publish<T: Serialize>(&self, event: &str, payload: &T) {
        if let Err(e) = self.try_publish(EVENTS_CHANNEL, event, payload).await {
            tracing::warn!("Failed to publish realtime event {}: {}", event, e);
        }
    }

    /// Publish an event on a single user's channel
    pub async fn publish_to_user<T: Serialize>(&self, user_id: i32, event: &str, payload: &T) {
        let channel = format!("opticare:user:{}", user_id);
        if let Err(e) = self.try_publish(&channel, event, payload).await {
            tracing::warn!(
                "Failed to publish realtime event {} to user {}: {}",
                event,
                user_id,
                e
            );
        }
    }

    async fn try_publish<T: Serialize>(
        &self,
        channel: &str,
        event: &str,
        payload: &T,
    ) -> AppResult<()> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))?;

        let message = json!({ "event": event, "payload": payload }).to_string();
        conn.publish::<_, _, ()>(channel, message)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to publish to Redis: {}", e)))?;
        Ok(())
    }
}
