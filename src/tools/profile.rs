/// Tool for setting the profile used by risk assessment
///
/// This module implements the profile_set MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{Gender, UserId, UserProfile};
use crate::storage::ProfileStore;
use crate::tools::{parse_date, ToolError};

/// Parameters for setting a user profile
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SetProfileParams {
    /// User the profile belongs to
    pub user_id: String,
    /// Date of birth (YYYY-MM-DD)
    pub date_of_birth: String,
    /// male, female or other (optional)
    pub gender: Option<String>,
}

/// Response from setting a profile
#[derive(Debug, Serialize)]
pub struct SetProfileResponse {
    pub success: bool,
    pub profile: UserProfile,
    pub message: String,
}

/// Create or replace a user's profile
pub fn set_profile<S: ProfileStore + ?Sized>(
    store: &S,
    params: SetProfileParams,
) -> Result<SetProfileResponse, ToolError> {
    let user_id = UserId::parse(&params.user_id)?;
    let date_of_birth = parse_date("date_of_birth", &params.date_of_birth)?;
    let gender = params
        .gender
        .as_deref()
        .map(str::parse::<Gender>)
        .transpose()?;

    let profile = UserProfile::new(user_id, date_of_birth, gender)?;
    store.upsert_profile(&profile)?;

    Ok(SetProfileResponse {
        success: true,
        message: format!("👤 Saved profile for {} (born {})", profile.user_id, profile.date_of_birth),
        profile,
    })
}
