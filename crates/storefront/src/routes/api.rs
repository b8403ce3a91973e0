//! JSON API route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use crate::error::Result;
use crate::services::pincode::{self, PincodeDetails};
use crate::state::AppState;

/// Look up city and state for a pincode.
///
/// Used by the address form to pre-fill fields as the user types.
#[instrument(skip(state))]
pub async fn pincode_lookup(
    State(state): State<AppState>,
    Path(pincode): Path<String>,
) -> Result<Json<PincodeDetails>> {
    let details = pincode::lookup(
        state.http(),
        &state.config().pincode_api_base,
        &pincode,
    )
    .await?;

    Ok(Json(details))
}
