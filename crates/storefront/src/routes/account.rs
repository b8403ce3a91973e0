//! Account route handlers (address book).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::db::addresses::{self, NewAddress};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::routes::checkout::AddressView;
use crate::state::AppState;

/// Address book template.
#[derive(Template, WebTemplate)]
#[template(path = "account/addresses.html")]
pub struct AddressesTemplate {
    pub addresses: Vec<AddressView>,
}

/// New address form data.
#[derive(Debug, Deserialize)]
pub struct AddressForm {
    pub label: Option<String>,
    pub name: String,
    pub mobile: String,
    pub alt_phone: Option<String>,
    pub street: String,
    pub landmark: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

/// Turn empty form fields into `None`.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Display the address book.
#[instrument(skip(state, user))]
pub async fn addresses(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let addresses = addresses::list_for_user(state.pool(), user.id).await?;

    Ok(AddressesTemplate {
        addresses: addresses.iter().map(AddressView::from).collect(),
    })
}

/// Create a new address. The first address a user saves becomes their
/// selected delivery address automatically.
#[instrument(skip(state, user, form))]
pub async fn create_address(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<AddressForm>,
) -> Result<Response> {
    let new = NewAddress {
        label: non_empty(form.label).unwrap_or_else(|| "Home".to_string()),
        name: form.name,
        mobile: form.mobile,
        alt_phone: non_empty(form.alt_phone),
        street: form.street,
        landmark: non_empty(form.landmark),
        city: form.city,
        state: form.state,
        pincode: form.pincode,
    };

    addresses::insert(state.pool(), user.id, &new).await?;

    Ok(Redirect::to("/account/addresses").into_response())
}

/// Select an address as the delivery address.
#[instrument(skip(state, user))]
pub async fn select_address(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i32>,
) -> Result<Response> {
    addresses::select(state.pool(), user.id, id.into()).await?;

    Ok(Redirect::to("/account/addresses").into_response())
}

/// Delete an address.
#[instrument(skip(state, user))]
pub async fn delete_address(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i32>,
) -> Result<Response> {
    addresses::delete(state.pool(), user.id, id.into()).await?;

    Ok(Redirect::to("/account/addresses").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_normalization() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("   ".to_string())), None);
        assert_eq!(
            non_empty(Some("Near the park".to_string())),
            Some("Near the park".to_string())
        );
    }
}
