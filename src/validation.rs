use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid amount: {0}. Must be a finite, non-negative number")]
    InvalidAmount(f64),

    #[error("Invalid is_fraud flag: {0}. Must be 0 or 1")]
    InvalidFraudFlag(i64),
}

pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.trim().is_empty() {
        return Err(ValidationError::MissingParameter("description".to_string()));
    }
    Ok(())
}

pub fn validate_amount(amount: f64) -> Result<(), ValidationError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(ValidationError::InvalidAmount(amount));
    }
    Ok(())
}

pub fn validate_fraud_flag(is_fraud: i64) -> Result<u8, ValidationError> {
    match is_fraud {
        0 => Ok(0),
        1 => Ok(1),
        other => Err(ValidationError::InvalidFraudFlag(other)),
    }
}

/// Checks every field of an ingest request, returning the normalised fraud flag.
pub fn validate_ingest(
    description: &str,
    amount: f64,
    bank: &str,
    user_id: &str,
    is_fraud: i64,
) -> Result<u8, ValidationError> {
    validate_description(description)?;
    validate_amount(amount)?;

    if bank.trim().is_empty() {
        return Err(ValidationError::MissingParameter("bank".to_string()));
    }

    if user_id.trim().is_empty() {
        return Err(ValidationError::MissingParameter("user_id".to_string()));
    }

    validate_fraud_flag(is_fraud)
}
