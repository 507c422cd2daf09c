use std::sync::Arc;

use axum::Router;

use crate::infrastructure::notification::{hub::NotificationHub, ws};

pub fn routes(notification_hub: Arc<NotificationHub>) -> Router {
    ws::routes(notification_hub)
}
