//! Sign-in and sign-out for the back-office.

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

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::services::auth::{self, AuthError};
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Display the login page.
#[instrument]
pub async fn login_page() -> LoginTemplate {
    LoginTemplate { error: None }
}

/// Sign in. Non-admin accounts get the same generic rejection as bad
/// credentials, so the form does not reveal which accounts exist.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    match auth::login(state.pool(), &form.email, &form.password).await {
        Ok(user) => {
            let admin = CurrentAdmin::from(&user);
            set_current_admin(&session, &admin)
                .await
                .map_err(|e| crate::error::AppError::Internal(e.to_string()))?;
            set_sentry_user(&admin.id, Some(admin.email.as_str()));

            tracing::info!(user_id = %admin.id, "Admin signed in");
            Ok(Redirect::to("/").into_response())
        }
        Err(
            AuthError::InvalidCredentials | AuthError::NotAdmin | AuthError::InvalidEmail(_),
        ) => Ok(LoginTemplate {
            error: Some("Invalid email or password".to_string()),
        }
        .into_response()),
        Err(e) => Err(e.into()),
    }
}

/// Sign out.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Response> {
    clear_current_admin(&session)
        .await
        .map_err(|e| crate::error::AppError::Internal(e.to_string()))?;
    clear_sentry_user();

    Ok(Redirect::to("/login").into_response())
}
