/// Rutas visibles del cliente
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Tasks,
    Projects,
    Calendar,
    Team,
    Settings,
}

/// Allow-list estática de rutas que requieren sesión
const PROTECTED_PATHS: [&str; 6] = [
    "/dashboard",
    "/dashboard/tasks",
    "/dashboard/projects",
    "/dashboard/calendar",
    "/dashboard/team",
    "/dashboard/settings",
];

impl Route {
    pub const DASHBOARD_NAV: [Route; 6] = [
        Route::Dashboard,
        Route::Tasks,
        Route::Projects,
        Route::Calendar,
        Route::Team,
        Route::Settings,
    ];

    /// Resuelve un path del navegador. Paths desconocidos van al dashboard.
    pub fn from_path(path: &str) -> Self {
        match normalize_path(path).as_str() {
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/dashboard/tasks" => Route::Tasks,
            "/dashboard/projects" => Route::Projects,
            "/dashboard/calendar" => Route::Calendar,
            "/dashboard/team" => Route::Team,
            "/dashboard/settings" => Route::Settings,
            _ => Route::Dashboard,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::Tasks => "/dashboard/tasks",
            Route::Projects => "/dashboard/projects",
            Route::Calendar => "/dashboard/calendar",
            Route::Team => "/dashboard/team",
            Route::Settings => "/dashboard/settings",
        }
    }

    pub fn is_protected(self) -> bool {
        is_protected_path(self.path())
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Login => "Sign in",
            Route::Register => "Create account",
            Route::Dashboard => "Overview",
            Route::Tasks => "Tasks",
            Route::Projects => "Projects",
            Route::Calendar => "Calendar",
            Route::Team => "Team",
            Route::Settings => "Settings",
        }
    }
}

pub fn is_protected_path(path: &str) -> bool {
    let path = normalize_path(path);
    PROTECTED_PATHS.contains(&path.as_str())
}

/// Quita query string, fragmento y barra final
fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_paths_are_protected_and_auth_paths_are_not() {
        for route in Route::DASHBOARD_NAV {
            assert!(route.is_protected(), "{:?}", route);
        }
        assert!(!Route::Login.is_protected());
        assert!(!Route::Register.is_protected());
    }

    #[test]
    fn path_normalization() {
        assert_eq!(Route::from_path("/dashboard/tasks/"), Route::Tasks);
        assert_eq!(Route::from_path("/login?next=/dashboard"), Route::Login);
        assert!(is_protected_path("/dashboard/calendar#today"));
        assert!(!is_protected_path("/"));
        assert!(!is_protected_path("/dashboard/unknown"));
    }
}
