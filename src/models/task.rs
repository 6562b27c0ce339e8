use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Review,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Review,
        TaskStatus::Done,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Todo => "To do",
            TaskStatus::InProgress => "In progress",
            TaskStatus::Review => "Review",
            TaskStatus::Done => "Done",
        }
    }

    /// Valor de wire, usado también en los `<select>`
    pub fn key(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Review => "review",
            TaskStatus::Done => "done",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 4] = [
        TaskPriority::Low,
        TaskPriority::Medium,
        TaskPriority::High,
        TaskPriority::Urgent,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
            TaskPriority::Urgent => "Urgent",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Urgent => "urgent",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default, alias = "project")]
    pub project_id: Option<String>,
    #[serde(default, alias = "assignee")]
    pub assignee_id: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Task {
    /// Solo la parte de fecha (`2024-05-01T00:00:00Z` → `2024-05-01`)
    pub fn due_day(&self) -> Option<NaiveDate> {
        let raw = self.due_date.as_deref()?;
        let day = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != TaskStatus::Done && self.due_day().is_some_and(|d| d < today)
    }
}

/// Formulario de creación/edición de tarea
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(rename = "project", skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(rename = "assignee", skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl TaskDraft {
    pub fn validate(&self) -> Result<(), String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Title is required".to_string());
        }
        if title.chars().count() > 200 {
            return Err("Title must be at most 200 characters".to_string());
        }
        if let Some(due) = self.due_date.as_deref().filter(|d| !d.is_empty()) {
            if NaiveDate::parse_from_str(due, "%Y-%m-%d").is_err() {
                return Err("Due date must be YYYY-MM-DD".to_string());
            }
        }
        Ok(())
    }
}

impl From<&Task> for TaskDraft {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            priority: task.priority,
            project_id: task.project_id.clone(),
            assignee_id: task.assignee_id.clone(),
            due_date: task.due_day().map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_parses_server_shape() {
        let task: Task = serde_json::from_str(
            r#"{"_id":"t1","title":"Ship it","status":"in-progress","priority":"urgent","project":"p1","dueDate":"2024-05-01T00:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, TaskPriority::Urgent);
        assert_eq!(task.project_id.as_deref(), Some("p1"));
        assert_eq!(task.due_day(), NaiveDate::from_ymd_opt(2024, 5, 1));
    }

    #[test]
    fn select_keys_match_wire_values() {
        for status in TaskStatus::ALL {
            assert_eq!(serde_json::to_string(&status).unwrap(), format!("\"{}\"", status.key()));
        }
        for priority in TaskPriority::ALL {
            assert_eq!(serde_json::to_string(&priority).unwrap(), format!("\"{}\"", priority.key()));
        }
        assert_eq!(TaskStatus::from_key("review"), Some(TaskStatus::Review));
        assert_eq!(TaskStatus::from_key("nope"), None);
    }

    #[test]
    fn overdue_ignores_done_tasks() {
        let mut task: Task = serde_json::from_str(
            r#"{"id":"t1","title":"Old","dueDate":"2024-01-01"}"#,
        )
        .unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert!(task.is_overdue(today));
        task.status = TaskStatus::Done;
        assert!(!task.is_overdue(today));
    }

    #[test]
    fn draft_validation() {
        let mut draft = TaskDraft::default();
        assert_eq!(draft.validate().unwrap_err(), "Title is required");

        draft.title = "Write release notes".into();
        draft.due_date = Some("01/02/2024".into());
        assert!(draft.validate().is_err());

        draft.due_date = Some("2024-02-01".into());
        assert!(draft.validate().is_ok());
    }
}
