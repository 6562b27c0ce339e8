use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Debug)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    TaskAssigned,
    TaskUpdated,
    ProjectUpdated,
    Mention,
    DueSoon,
    System,
}

impl NotificationCategory {
    pub const ALL: [NotificationCategory; 6] = [
        NotificationCategory::TaskAssigned,
        NotificationCategory::TaskUpdated,
        NotificationCategory::ProjectUpdated,
        NotificationCategory::Mention,
        NotificationCategory::DueSoon,
        NotificationCategory::System,
    ];

    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "task_assigned" => NotificationCategory::TaskAssigned,
            "task_updated" => NotificationCategory::TaskUpdated,
            "project_updated" => NotificationCategory::ProjectUpdated,
            "mention" => NotificationCategory::Mention,
            "due_soon" | "deadline" => NotificationCategory::DueSoon,
            _ => NotificationCategory::System,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NotificationCategory::TaskAssigned => "Task assigned",
            NotificationCategory::TaskUpdated => "Task updated",
            NotificationCategory::ProjectUpdated => "Project updated",
            NotificationCategory::Mention => "Mentions",
            NotificationCategory::DueSoon => "Due soon",
            NotificationCategory::System => "System",
        }
    }
}

// Categorías desconocidas caen en System en vez de romper el frame entero
impl<'de> Deserialize<'de> for NotificationCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(NotificationCategory::parse(&raw))
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(alias = "type", default = "default_category")]
    pub category: NotificationCategory,
    #[serde(default, alias = "isRead")]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

fn default_category() -> NotificationCategory {
    NotificationCategory::System
}

/// Preferencias de entrega para una categoría
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChannelPreference {
    #[serde(default = "enabled")]
    pub in_app: bool,
    #[serde(default = "enabled")]
    pub desktop: bool,
    #[serde(default)]
    pub sound: bool,
}

fn enabled() -> bool {
    true
}

impl Default for ChannelPreference {
    fn default() -> Self {
        Self {
            in_app: true,
            desktop: true,
            sound: false,
        }
    }
}

/// Preferencias por categoría; las categorías ausentes usan el default
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(transparent)]
pub struct NotificationPreferences {
    pub categories: BTreeMap<NotificationCategory, ChannelPreference>,
}

impl NotificationPreferences {
    pub fn for_category(&self, category: NotificationCategory) -> ChannelPreference {
        self.categories.get(&category).copied().unwrap_or_default()
    }

    pub fn set(&mut self, category: NotificationCategory, preference: ChannelPreference) {
        self.categories.insert(category, preference);
    }
}

/// Evento recibido por el socket de notificaciones
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationEvent {
    #[serde(alias = "new")]
    Created { notification: Notification },
    Updated { notification: Notification },
    Read { id: String },
    Unread { id: String },
    Deleted { id: String },
    AllRead,
}

impl NotificationEvent {
    pub fn decode(frame: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_category_falls_back_to_system() {
        let n: Notification =
            serde_json::from_str(r#"{"_id":"n1","title":"Hi","type":"birthday"}"#).unwrap();
        assert_eq!(n.category, NotificationCategory::System);
        assert!(!n.read);
    }

    #[test]
    fn preferences_default_missing_categories() {
        let prefs: NotificationPreferences = serde_json::from_str(
            r#"{"mention":{"inApp":true,"desktop":false,"sound":true}}"#,
        )
        .unwrap();
        let mention = prefs.for_category(NotificationCategory::Mention);
        assert!(!mention.desktop);
        assert!(mention.sound);
        assert_eq!(prefs.for_category(NotificationCategory::DueSoon), ChannelPreference::default());
    }

    #[test]
    fn decodes_socket_frames() {
        let created = NotificationEvent::decode(
            r#"{"type":"new","notification":{"id":"n1","title":"Assigned","category":"task_assigned"}}"#,
        )
        .unwrap();
        assert!(matches!(created, NotificationEvent::Created { ref notification } if notification.id == "n1"));

        assert_eq!(
            NotificationEvent::decode(r#"{"type":"deleted","id":"n9"}"#).unwrap(),
            NotificationEvent::Deleted { id: "n9".into() }
        );
        assert_eq!(
            NotificationEvent::decode(r#"{"type":"all_read"}"#).unwrap(),
            NotificationEvent::AllRead
        );
        assert!(NotificationEvent::decode(r#"{"type":"exploded"}"#).is_err());
    }
}
