//! Cookie session handshake and the middleware that enforces it.

use std::{collections::HashSet, sync::Arc};

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "cd_session";

#[derive(Clone)]
pub struct AuthState {
    username: Arc<str>,
    password: Arc<str>,
    sessions: Arc<RwLock<HashSet<String>>>,
}

impl AuthState {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            sessions: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    fn accepts(&self, username: &str, password: &str) -> bool {
        *self.username == *username && *self.password == *password
    }

    async fn open_session(&self) -> String {
        let token = Uuid::new_v4().to_string();
        self.sessions.write().await.insert(token.clone());
        token
    }

    async fn is_valid(&self, token: &str) -> bool {
        self.sessions.read().await.contains(token)
    }
}

pub fn auth_router(state: AuthState) -> Router {
    Router::new()
        .route("/auth/{username}/{password}", get(login))
        .with_state(state)
}

async fn login(
    State(auth): State<AuthState>,
    Path((username, password)): Path<(String, String)>,
    jar: CookieJar,
) -> Result<CookieJar, StatusCode> {
    if !auth.accepts(&username, &password) {
        warn!("Rejected login for user {}", username);
        return Err(StatusCode::UNAUTHORIZED);
    }
    let token = auth.open_session().await;
    debug!("Opened session for user {}", username);
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true);
    Ok(jar.add(cookie))
}

pub async fn require_session(
    State(auth): State<AuthState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let authorized = match jar.get(SESSION_COOKIE) {
        Some(cookie) => auth.is_valid(cookie.value()).await,
        None => false,
    };
    if !authorized {
        debug!("Missing or unknown session for {}", request.uri());
        return StatusCode::UNAUTHORIZED.into_response();
    }
    next.run(request).await
}
