//! HTTP handlers and the route guard for the admin area

use axum::{
    extract::{Request, State},
    http::header,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Json, Redirect, Response},
    Extension,
};
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::CookieJar;

use crate::admin::models::{AdminState, ApiResponse, LoginRequest, LoginResponse, UserInfo};
use crate::admin::session::{create_auth_cookie, SessionClaims, AUTH_COOKIE_NAME};
use crate::audit::ClientInfo;
use crate::core::principal::is_admin;

fn client_info(headers: &HeaderMap) -> ClientInfo {
    ClientInfo {
        // Best-effort only; typically not derivable here, matching the
        // original client which rarely had an address to report.
        ip: None,
        user_agent: headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    }
}

/// Login handler
///
/// Drives the full gate sequence; on success mints the session token and
/// returns it in both the JSON body and a Set-Cookie header. All failures
/// collapse to their single user-visible message.
pub async fn login_handler(
    State(state): State<AdminState>,
    headers: HeaderMap,
    Json(login_req): Json<LoginRequest>,
) -> Response {
    let client = client_info(&headers);

    // Holding the lock for the whole attempt keeps submissions serial.
    let outcome = {
        let mut gate = state.gate.lock().await;
        gate.attempt(&login_req.email, &login_req.password, &client)
            .await
    };

    match outcome {
        Ok(session) => match state.sessions.issue(&session.principal) {
            Ok((token, expires_at)) => {
                let user = UserInfo {
                    id: session.principal.id.clone(),
                    email: session.principal.email.clone(),
                    role: session.principal.role().unwrap_or_default().to_string(),
                };
                let cookie = create_auth_cookie(&token, state.sessions.expiration());
                let response = LoginResponse {
                    token,
                    expires_at,
                    user,
                };
                (
                    [(header::SET_COOKIE, cookie)],
                    Json(ApiResponse::success(response)),
                )
                    .into_response()
            }
            Err(err) => {
                tracing::error!("session token issue failed: {err}");
                Json(ApiResponse::<LoginResponse>::error(
                    "Failed to login".to_string(),
                ))
                .into_response()
            }
        },
        Err(err) => {
            Json(ApiResponse::<LoginResponse>::error(
                err.user_message().to_string(),
            ))
            .into_response()
        }
    }
}

/// Logout handler: clears the session cookie
pub async fn logout_handler(jar: CookieJar) -> impl IntoResponse {
    let jar = jar.remove(Cookie::new(AUTH_COOKIE_NAME, ""));
    (
        jar,
        Json(ApiResponse::success("Logged out successfully".to_string())),
    )
}

/// Route guard for the admin area
///
/// Admits a request only if the session cookie validates and the role claim
/// equals `admin`; otherwise redirects to the login path with the originally
/// requested path preserved for post-login return.
pub async fn admin_guard(
    State(state): State<AdminState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let requested = req.uri().path().to_string();

    let token = match jar.get(AUTH_COOKIE_NAME).map(|c| c.value().to_string()) {
        Some(token) if !token.is_empty() => token,
        _ => return Err(login_redirect(&state.login_path, &requested)),
    };

    let claims = match state.sessions.validate(&token) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::debug!("session validation failed: {err}");
            return Err(login_redirect(&state.login_path, &requested));
        }
    };

    let principal = claims.principal();
    if !is_admin(Some(&principal)) {
        return Err(login_redirect(&state.login_path, &requested));
    }

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

fn login_redirect(login_path: &str, requested: &str) -> Response {
    // The requested path goes through a query parameter, so it has to be
    // encoded or metacharacters in it would corrupt the redirect URL.
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("from", requested)
        .finish();
    Redirect::to(&format!("{login_path}?{query}")).into_response()
}

/// Guarded dashboard: echoes the admitted identity
pub async fn dashboard_handler(
    Extension(claims): Extension<SessionClaims>,
) -> Json<ApiResponse<UserInfo>> {
    Json(ApiResponse::success(UserInfo {
        id: claims.sub.clone(),
        email: claims.email.clone(),
        role: claims.role.clone(),
    }))
}

/// Guarded status endpoint: identifies the running service
pub async fn status_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    })))
}
