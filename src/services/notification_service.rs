use serde::Deserialize;

use crate::models::{Notification, NotificationPreferences};
use crate::services::api_client::{ApiClient, RequestOptions};
use crate::services::error::ApiError;

#[derive(Deserialize)]
#[serde(untagged)]
enum NotificationsResponse {
    List(Vec<Notification>),
    Wrapped { notifications: Vec<Notification> },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PreferencesResponse {
    Wrapped { preferences: NotificationPreferences },
    Bare(NotificationPreferences),
}

fn notification_path(id: &str, action: &str) -> String {
    let id = urlencoding::encode(id);
    if action.is_empty() {
        format!("/notifications/{}", id)
    } else {
        format!("/notifications/{}/{}", id, action)
    }
}

pub async fn list_notifications(api: &ApiClient) -> Result<Vec<Notification>, ApiError> {
    let response: NotificationsResponse = api.get_json("/notifications", RequestOptions::default()).await?;
    Ok(match response {
        NotificationsResponse::List(items) | NotificationsResponse::Wrapped { notifications: items } => items,
    })
}

pub async fn mark_read(api: &ApiClient, id: &str) -> Result<(), ApiError> {
    api.put_empty(&notification_path(id, "read"), RequestOptions::default()).await
}

pub async fn mark_unread(api: &ApiClient, id: &str) -> Result<(), ApiError> {
    api.put_empty(&notification_path(id, "unread"), RequestOptions::default()).await
}

pub async fn mark_all_read(api: &ApiClient) -> Result<(), ApiError> {
    api.put_empty("/notifications/read-all", RequestOptions::default()).await
}

pub async fn delete_notification(api: &ApiClient, id: &str) -> Result<(), ApiError> {
    api.delete(&notification_path(id, ""), RequestOptions::default()).await
}

/// Las preferencias son del usuario, no del workspace
pub async fn fetch_preferences(api: &ApiClient) -> Result<NotificationPreferences, ApiError> {
    let response: PreferencesResponse = api
        .get_json("/notifications/preferences", RequestOptions::default().without_workspace())
        .await?;
    Ok(match response {
        PreferencesResponse::Wrapped { preferences } | PreferencesResponse::Bare(preferences) => preferences,
    })
}

pub async fn update_preferences(api: &ApiClient, preferences: &NotificationPreferences) -> Result<(), ApiError> {
    api.send(
        crate::services::transport::Method::Put,
        "/notifications/preferences",
        Some(serde_json::to_string(preferences).map_err(|e| ApiError::Parse(e.to_string()))?),
        RequestOptions::default().without_workspace(),
    )
    .await
    .map(|_| ())
}
