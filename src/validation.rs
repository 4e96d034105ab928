use crate::error::{BetfairError, Result};
use crate::operation::Operation;
use serde_json::Value;

pub const PARAMS_NOT_AN_OBJECT: &str = "Parameters must be a hash ref or anonymous hash";

/// Checks the top-level shape of `params` for `operation` without touching
/// the network. Required keys are checked in table order and a `null` value
/// counts as absent. Nested values are left for the exchange to judge.
pub fn validate(operation: Operation, params: &Value) -> Result<()> {
    let fields = params
        .as_object()
        .ok_or_else(|| BetfairError::Validation(PARAMS_NOT_AN_OBJECT.to_string()))?;

    match operation
        .spec()
        .required
        .iter()
        .find(|req| fields.get(req.field).map_or(true, Value::is_null))
    {
        Some(missing) => Err(BetfairError::Validation(missing.message.to_string())),
        None => Ok(()),
    }
}
