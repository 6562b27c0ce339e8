use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceKind {
    Personal,
    Team,
}

impl WorkspaceKind {
    fn from_raw(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "personal" => WorkspaceKind::Personal,
            _ => WorkspaceKind::Team,
        }
    }

    fn rank(self) -> u8 {
        match self {
            WorkspaceKind::Personal => 0,
            WorkspaceKind::Team => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WorkspaceKind::Personal => "Personal",
            WorkspaceKind::Team => "Team",
        }
    }
}

/// Workspace normalizado (proyección del registro del servidor)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Workspace {
    pub id: String,
    pub name: String,
    pub kind: WorkspaceKind,
    pub role: String,
    pub created_at: String,
}

/// Registro tal como lo entrega `GET /workspaces`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RawWorkspace {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
}

/// El backend responde con un array o con `{ "workspaces": [...] }`
#[derive(Clone, Deserialize, Debug)]
#[serde(untagged)]
pub enum WorkspacesResponse {
    List(Vec<RawWorkspace>),
    Wrapped { workspaces: Vec<RawWorkspace> },
}

impl WorkspacesResponse {
    pub fn into_raw(self) -> Vec<RawWorkspace> {
        match self {
            WorkspacesResponse::List(list) => list,
            WorkspacesResponse::Wrapped { workspaces } => workspaces,
        }
    }
}

impl From<RawWorkspace> for Workspace {
    fn from(raw: RawWorkspace) -> Self {
        let kind = WorkspaceKind::from_raw(raw.kind.as_deref());
        let name = raw
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| match kind {
                WorkspaceKind::Personal => "Personal".to_string(),
                WorkspaceKind::Team => "Untitled workspace".to_string(),
            });
        Self {
            id: raw.id,
            name,
            kind,
            role: raw.role.unwrap_or_else(|| "member".to_string()),
            created_at: raw.created_at.unwrap_or_default(),
        }
    }
}

impl Workspace {
    /// Fecha de creación parseada; acepta RFC 3339 o `YYYY-MM-DD`
    pub fn created_at_timestamp(&self) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.created_at) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(&self.created_at, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }
}

/// Normaliza y ordena: personal antes que team, luego por fecha de creación
/// ascendente. Fechas ilegibles van al final de su grupo. Orden estable.
pub fn normalize_workspaces(raw: Vec<RawWorkspace>) -> Vec<Workspace> {
    let mut workspaces: Vec<Workspace> = raw.into_iter().map(Workspace::from).collect();
    sort_workspaces(&mut workspaces);
    workspaces
}

pub fn sort_workspaces(workspaces: &mut [Workspace]) {
    workspaces.sort_by(|a, b| {
        a.kind.rank().cmp(&b.kind.rank()).then_with(|| {
            match (a.created_at_timestamp(), b.created_at_timestamp()) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
        })
    });
}
