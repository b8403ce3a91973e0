//! Authentication route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::db::carts;
use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::{AuthError, AuthService};
use crate::services::cart as cart_service;
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Register form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Display the login page.
pub async fn login_page() -> impl IntoResponse {
    LoginTemplate { error: None }
}

/// Display the registration page.
pub async fn register_page() -> impl IntoResponse {
    RegisterTemplate { error: None }
}

/// Handle a login attempt.
///
/// On success the session gains the user, the anonymous cart (if any) is
/// claimed for them, and the browser is sent home. Credential failures
/// re-render the form instead of erroring.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let auth = AuthService::new(state.pool());

    let user = match auth.login_with_password(&form.email, &form.password).await {
        Ok(user) => user,
        Err(AuthError::InvalidCredentials | AuthError::InvalidEmail(_)) => {
            return Ok(LoginTemplate {
                error: Some("Invalid email or password".to_string()),
            }
            .into_response());
        }
        Err(e) => return Err(e.into()),
    };

    establish_session(&state, &session, &user).await?;

    Ok(Redirect::to("/").into_response())
}

/// Handle a registration attempt.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    let auth = AuthService::new(state.pool());

    let user = match auth
        .register_with_password(&form.name, &form.email, &form.password)
        .await
    {
        Ok(user) => user,
        Err(
            e @ (AuthError::InvalidEmail(_)
            | AuthError::WeakPassword(_)
            | AuthError::UserAlreadyExists),
        ) => {
            let message = match e {
                AuthError::UserAlreadyExists => {
                    "An account with this email already exists".to_string()
                }
                AuthError::WeakPassword(msg) => msg,
                _ => "Please enter a valid email address".to_string(),
            };
            return Ok(RegisterTemplate {
                error: Some(message),
            }
            .into_response());
        }
        Err(e) => return Err(e.into()),
    };

    establish_session(&state, &session, &user).await?;

    Ok(Redirect::to("/").into_response())
}

/// Handle logout.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Response> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
    clear_sentry_user();

    Ok(Redirect::to("/").into_response())
}

/// Store the user in the session and claim any anonymous cart.
async fn establish_session(
    state: &AppState,
    session: &Session,
    user: &crate::models::user::User,
) -> Result<()> {
    let current = CurrentUser::from(user);
    set_current_user(session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
    set_sentry_user(&user.id, Some(user.email.as_str()));

    // A cart built before login belongs to the user now.
    if let Some(cart) = cart_service::resolve(state.pool(), session).await? {
        carts::claim_for_user(state.pool(), cart.id, user.id).await?;
    }

    Ok(())
}
