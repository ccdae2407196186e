//! Dive session service.

use sqlx::PgPool;

use divelog_core::dives;
use divelog_core::models::dive::{DiveSession, DiveSessionFields};

use crate::error::{AppError, AppResult};
use crate::models::{DiveSessionRequest, DiveSessionResponse, GpsCoordinates};

const WATER_TYPES: [&str; 2] = ["SEA", "LAKE"];

fn to_response(session: DiveSession) -> DiveSessionResponse {
    let gps_coordinates = match (session.gps_lat, session.gps_lng) {
        (None, None) => None,
        (lat, lng) => Some(GpsCoordinates { lat, lng }),
    };
    DiveSessionResponse {
        id: session.id,
        user: session.user_id,
        date: session.date,
        location: session.location,
        gps_coordinates,
        water_type: session.water_type,
        temperature: session.temperature,
        dive_count: session.dive_count,
        max_depth: session.max_depth,
        max_dive_time: session.max_dive_time,
        notes: session.notes,
    }
}

fn to_fields(req: DiveSessionRequest) -> AppResult<DiveSessionFields> {
    if !WATER_TYPES.contains(&req.water_type.as_str()) {
        return Err(AppError::Validation(
            "The 'waterType' field must be either 'SEA' or 'LAKE'.".into(),
        ));
    }
    if req.dive_count < 1 {
        return Err(AppError::Validation(
            "The 'diveCount' field must be at least 1.".into(),
        ));
    }
    if req.max_depth < 0.0 {
        return Err(AppError::Validation(
            "The 'maxDepth' field must be at least 0.".into(),
        ));
    }
    if req.max_dive_time < 0 {
        return Err(AppError::Validation(
            "The 'maxDiveTime' field must be at least 0.".into(),
        ));
    }
    if let Some(location) = req.location.as_deref() {
        if location.chars().count() > 100 {
            return Err(AppError::Validation(
                "The 'location' field must not exceed 100 characters.".into(),
            ));
        }
    }
    if let Some(notes) = req.notes.as_deref() {
        if notes.chars().count() > 1000 {
            return Err(AppError::Validation(
                "The 'notes' field must not exceed 1000 characters.".into(),
            ));
        }
    }
    let (gps_lat, gps_lng) = match req.gps_coordinates {
        Some(gps) => (gps.lat, gps.lng),
        None => (None, None),
    };
    Ok(DiveSessionFields {
        date: req.date,
        location: req.location,
        gps_lat,
        gps_lng,
        water_type: req.water_type,
        temperature: req.temperature,
        dive_count: req.dive_count,
        max_depth: req.max_depth,
        max_dive_time: req.max_dive_time,
        notes: req.notes,
    })
}

/// Log a new dive session for the calling user.
pub async fn create_my_session(
    pool: &PgPool,
    user_id: &str,
    req: DiveSessionRequest,
) -> AppResult<DiveSessionResponse> {
    let fields = to_fields(req)?;
    let session = dives::create_dive_session(pool, user_id, &fields).await?;
    Ok(to_response(session))
}

/// Fetch the calling user's dive sessions.
pub async fn retrieve_my_sessions(
    pool: &PgPool,
    user_id: &str,
) -> AppResult<Vec<DiveSessionResponse>> {
    let sessions = dives::list_dive_sessions_owned(pool, user_id).await?;
    Ok(sessions.into_iter().map(to_response).collect())
}

/// Fetch one of the calling user's dive sessions.
pub async fn retrieve_my_session(
    pool: &PgPool,
    user_id: &str,
    id: &str,
) -> AppResult<DiveSessionResponse> {
    let session = dives::find_dive_session_owned(pool, id, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No dive session found.".into()))?;
    Ok(to_response(session))
}

/// Replace one of the calling user's dive sessions.
pub async fn update_my_session(
    pool: &PgPool,
    user_id: &str,
    id: &str,
    req: DiveSessionRequest,
) -> AppResult<DiveSessionResponse> {
    let fields = to_fields(req)?;
    let session = dives::update_dive_session_owned(pool, id, user_id, &fields)
        .await?
        .ok_or_else(|| AppError::NotFound("Dive session not found.".into()))?;
    Ok(to_response(session))
}

/// Delete one of the calling user's dive sessions.
pub async fn delete_my_session(pool: &PgPool, user_id: &str, id: &str) -> AppResult<()> {
    if !dives::delete_dive_session_owned(pool, id, user_id).await? {
        return Err(AppError::NotFound("Dive session not found.".into()));
    }
    Ok(())
}

/// Fetch all dive sessions across users (admin).
pub async fn retrieve_sessions(pool: &PgPool) -> AppResult<Vec<DiveSessionResponse>> {
    let sessions = dives::list_dive_sessions(pool).await?;
    Ok(sessions.into_iter().map(to_response).collect())
}

/// Fetch any dive session by ID (admin).
pub async fn retrieve_session(pool: &PgPool, id: &str) -> AppResult<DiveSessionResponse> {
    let session = dives::find_dive_session(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Dive session not found.".into()))?;
    Ok(to_response(session))
}

/// Delete any dive session by ID (admin).
pub async fn delete_session(pool: &PgPool, id: &str) -> AppResult<()> {
    if !dives::delete_dive_session(pool, id).await? {
        return Err(AppError::NotFound("Dive session not found.".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> DiveSessionRequest {
        DiveSessionRequest {
            date: None,
            location: Some("Capo Vaticano".into()),
            gps_coordinates: Some(GpsCoordinates {
                lat: Some(38.66),
                lng: Some(15.87),
            }),
            water_type: "SEA".into(),
            temperature: Some(24.5),
            dive_count: 12,
            max_depth: 28.0,
            max_dive_time: 95,
            notes: None,
        }
    }

    #[test]
    fn valid_request_maps_to_fields() {
        let fields = to_fields(request()).expect("fields");
        assert_eq!(fields.water_type, "SEA");
        assert_eq!(fields.gps_lat, Some(38.66));
        assert_eq!(fields.dive_count, 12);
    }

    #[test]
    fn unknown_water_type_is_rejected() {
        let req = DiveSessionRequest {
            water_type: "RIVER".into(),
            ..request()
        };
        assert!(to_fields(req).is_err());
    }

    #[test]
    fn zero_dive_count_is_rejected() {
        let req = DiveSessionRequest {
            dive_count: 0,
            ..request()
        };
        assert!(to_fields(req).is_err());
    }

    #[test]
    fn negative_depth_is_rejected() {
        let req = DiveSessionRequest {
            max_depth: -1.0,
            ..request()
        };
        assert!(to_fields(req).is_err());
    }

    #[test]
    fn oversized_notes_are_rejected() {
        let req = DiveSessionRequest {
            notes: Some("x".repeat(1001)),
            ..request()
        };
        assert!(to_fields(req).is_err());
    }

    #[test]
    fn absent_gps_maps_to_none() {
        let req = DiveSessionRequest {
            gps_coordinates: None,
            ..request()
        };
        let fields = to_fields(req).expect("fields");
        assert_eq!(fields.gps_lat, None);
        assert_eq!(fields.gps_lng, None);
    }
}
