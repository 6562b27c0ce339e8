use serde::{Deserialize, Serialize};

/// Dónde viaja el identificador del workspace activo en cada request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceScope {
    /// `?workspaceId=<id>`
    Query,
    /// `X-Workspace-Id: <id>`
    Header,
}

impl WorkspaceScope {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "header" => WorkspaceScope::Header,
            _ => WorkspaceScope::Query,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url: String,
    pub socket_url: String,
    pub workspace_scope: WorkspaceScope,
    pub workspace_query_param: String,
    pub workspace_header: String,
    pub enable_logging: bool,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:5000/api".to_string(),
            socket_url: "ws://localhost:5000/ws".to_string(),
            workspace_scope: WorkspaceScope::Query,
            workspace_query_param: "workspaceId".to_string(),
            workspace_header: "X-Workspace-Id".to_string(),
            enable_logging: true,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url: option_env!("BACKEND_URL")
                .map(str::to_string)
                .unwrap_or(defaults.backend_url),
            socket_url: option_env!("SOCKET_URL")
                .map(str::to_string)
                .unwrap_or(defaults.socket_url),
            workspace_scope: option_env!("WORKSPACE_SCOPE")
                .map(WorkspaceScope::parse)
                .unwrap_or(defaults.workspace_scope),
            workspace_query_param: defaults.workspace_query_param,
            workspace_header: defaults.workspace_header,
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true")
                .parse()
                .unwrap_or(true),
            log_level: option_env!("LOG_LEVEL")
                .unwrap_or("info")
                .to_string(),
        }
    }

    /// URL base sin barra final
    pub fn backend_url(&self) -> &str {
        self.backend_url.trim_end_matches('/')
    }

    /// Nivel de log efectivo (solo errores si el logging está deshabilitado)
    pub fn log_level(&self) -> log::Level {
        if !self.enable_logging {
            return log::Level::Error;
        }
        match self.log_level.to_ascii_lowercase().as_str() {
            "trace" => log::Level::Trace,
            "debug" => log::Level::Debug,
            "warn" => log::Level::Warn,
            "error" => log::Level::Error,
            _ => log::Level::Info,
        }
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workspace_scope_parses_header_and_defaults_to_query() {
        assert_eq!(WorkspaceScope::parse("HEADER"), WorkspaceScope::Header);
        assert_eq!(WorkspaceScope::parse("query"), WorkspaceScope::Query);
        assert_eq!(WorkspaceScope::parse("whatever"), WorkspaceScope::Query);
    }

    #[test]
    fn backend_url_strips_trailing_slash() {
        let config = AppConfig {
            backend_url: "https://api.taskflux.dev/".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.backend_url(), "https://api.taskflux.dev");
    }

    #[test]
    fn disabled_logging_only_reports_errors() {
        let config = AppConfig {
            enable_logging: false,
            log_level: "debug".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.log_level(), log::Level::Error);
    }
}
