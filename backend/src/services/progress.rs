//! Progress measurement service

use crate::error::ApiError;
use crate::repositories::progress::ProgressRecord;
use crate::repositories::{CreateProgress, ProgressRepository};
use crate::services::decimal_to_f64;
use fittrack_shared::types::{AddProgressRequest, ProgressMeasurementResponse};
use fittrack_shared::validation::{validate_measurement_value, validate_not_blank};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Progress service for dated measurements
pub struct ProgressService;

impl ProgressService {
    /// Record a measurement
    ///
    /// Measurement types are stored lowercase so filters and the overview
    /// treat "Weight" and "weight" alike.
    pub async fn add(
        pool: &PgPool,
        user_id: Uuid,
        req: AddProgressRequest,
    ) -> Result<ProgressMeasurementResponse, ApiError> {
        req.validate()?;
        validate_not_blank("measurement type", &req.measurement_type)
            .map_err(ApiError::InvalidArgument)?;
        validate_not_blank("unit", &req.unit).map_err(ApiError::InvalidArgument)?;
        validate_measurement_value(req.value)?;

        let record = ProgressRepository::create(
            pool,
            CreateProgress {
                user_id,
                date_measured: req.date_measured,
                measurement_type: normalize_type(&req.measurement_type),
                value: req.value,
                unit: req.unit.trim().to_string(),
                notes: req.notes,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        Ok(measurement_response(record))
    }

    /// List measurements, optionally of one type
    pub async fn list(
        pool: &PgPool,
        user_id: Uuid,
        measurement_type: Option<&str>,
    ) -> Result<Vec<ProgressMeasurementResponse>, ApiError> {
        let measurement_type = measurement_type
            .map(normalize_type)
            .filter(|t| !t.is_empty());

        let records = ProgressRepository::list(pool, user_id, measurement_type.as_deref())
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.into_iter().map(measurement_response).collect())
    }
}

fn normalize_type(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn measurement_response(record: ProgressRecord) -> ProgressMeasurementResponse {
    ProgressMeasurementResponse {
        id: record.id,
        user_id: record.user_id,
        date_measured: record.date_measured,
        measurement_type: record.measurement_type,
        value: decimal_to_f64(&record.value),
        unit: record.unit,
        notes: record.notes,
        created_at: record.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_type() {
        assert_eq!(normalize_type("  Body Fat "), "body fat");
        assert_eq!(normalize_type("weight"), "weight");
    }
}
