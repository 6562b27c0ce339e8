use serde::{Deserialize, Serialize};

/// Identidad del usuario autenticado
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Identity {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, alias = "avatarUrl", skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Respuesta de `/auth/login` y `/auth/register`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub token: String,
    pub user: Identity,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

fn validate_email(email: &str) -> Result<(), String> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err("Please enter a valid email address".to_string()),
    }
}

fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < 6 {
        return Err("Password must be at least 6 characters".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_validation_rejects_bad_email_and_short_password() {
        let bad_email = LoginRequest { email: "nobody".into(), password: "secret1".into() };
        assert!(bad_email.validate().is_err());

        let short = LoginRequest { email: "a@b.io".into(), password: "123".into() };
        assert_eq!(
            short.validate().unwrap_err(),
            "Password must be at least 6 characters"
        );

        let ok = LoginRequest { email: "a@b.io".into(), password: "123456".into() };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn register_requires_a_name() {
        let request = RegisterRequest {
            name: "   ".into(),
            email: "ana@taskflux.dev".into(),
            password: "hunter22".into(),
        };
        assert_eq!(request.validate().unwrap_err(), "Name is required");
    }

    #[test]
    fn identity_accepts_mongo_style_id() {
        let user: Identity = serde_json::from_str(
            r#"{"_id":"u1","name":"Ana","email":"ana@taskflux.dev","avatarUrl":"/a.png"}"#,
        )
        .unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.avatar_url.as_deref(), Some("/a.png"));
    }
}
