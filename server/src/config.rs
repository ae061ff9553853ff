use crate::logging::RequestsLoggingLevel;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    /// If true, every entity route requires a session cookie obtained from
    /// `GET /auth/{username}/{password}`.
    pub require_auth: bool,
    pub username: String,
    pub password: String,
    pub requests_logging_level: RequestsLoggingLevel,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: 3000,
            require_auth: false,
            username: "admin".to_string(),
            password: "admin".to_string(),
            requests_logging_level: RequestsLoggingLevel::Path,
        }
    }
}
