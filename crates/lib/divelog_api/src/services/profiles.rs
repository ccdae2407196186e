//! User profile service.

use sqlx::PgPool;

use divelog_core::models::profile::UserProfile;
use divelog_core::profiles;

use crate::error::{AppError, AppResult};
use crate::models::{ProfileResponse, UpdateProfileRequest};

const GENDERS: [&str; 3] = ["MALE", "FEMALE", "OTHER"];

fn to_response(profile: UserProfile) -> ProfileResponse {
    ProfileResponse {
        id: profile.id,
        user_id: profile.user_id,
        gender: profile.gender,
        birthdate: profile.birthdate,
        first_name: profile.first_name,
        last_name: profile.last_name,
        weight: profile.weight,
        height: profile.height,
    }
}

fn validate(req: &UpdateProfileRequest) -> AppResult<()> {
    if let Some(gender) = req.gender.as_deref() {
        if !GENDERS.contains(&gender) {
            return Err(AppError::Validation(
                "The 'gender' field must be 'MALE', 'FEMALE' or 'OTHER'.".into(),
            ));
        }
    }
    for (field, value) in [("firstName", &req.first_name), ("lastName", &req.last_name)] {
        if let Some(name) = value.as_deref() {
            if name.chars().count() > 50 {
                return Err(AppError::Validation(format!(
                    "The '{field}' field must not exceed 50 characters."
                )));
            }
        }
    }
    for (field, value) in [("weight", req.weight), ("height", req.height)] {
        if let Some(v) = value {
            if v < 0.0 {
                return Err(AppError::Validation(format!(
                    "The '{field}' field must be at least 0."
                )));
            }
        }
    }
    Ok(())
}

/// Fetch the calling user's profile.
pub async fn retrieve_self(pool: &PgPool, user_id: &str) -> AppResult<ProfileResponse> {
    let profile = profiles::find_profile_by_user(pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".into()))?;
    Ok(to_response(profile))
}

/// Create or update the calling user's profile. Absent fields keep
/// their stored value.
pub async fn update_self(
    pool: &PgPool,
    user_id: &str,
    req: UpdateProfileRequest,
) -> AppResult<ProfileResponse> {
    validate(&req)?;
    let profile = profiles::upsert_profile(
        pool,
        user_id,
        req.gender.as_deref(),
        req.birthdate,
        req.first_name.as_deref(),
        req.last_name.as_deref(),
        req.weight,
        req.height,
    )
    .await?;
    Ok(to_response(profile))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_request() -> UpdateProfileRequest {
        UpdateProfileRequest {
            gender: None,
            birthdate: None,
            first_name: None,
            last_name: None,
            weight: None,
            height: None,
        }
    }

    #[test]
    fn unknown_gender_is_rejected() {
        let req = UpdateProfileRequest {
            gender: Some("UNKNOWN".into()),
            ..empty_request()
        };
        assert!(validate(&req).is_err());
    }

    #[test]
    fn negative_measurements_are_rejected() {
        let req = UpdateProfileRequest {
            weight: Some(-1.0),
            ..empty_request()
        };
        assert!(validate(&req).is_err());
    }

    #[test]
    fn empty_update_is_valid() {
        assert!(validate(&empty_request()).is_ok());
    }
}
