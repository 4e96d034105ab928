//! Turns a raw HTTP response into a decoded body or a classified error.

use crate::error::BetfairError;
use crate::transport::HttpResponse;
use serde_json::Value;

const SUCCESS: &str = "SUCCESS";

/// Outcome of one response. `body` is whatever could be decoded and should
/// become the client's last response, even when `outcome` is an error.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    pub body: Option<Value>,
    pub outcome: Result<Value, BetfairError>,
}

impl Classified {
    fn failed(body: Option<Value>, err: BetfairError) -> Self {
        Self {
            body,
            outcome: Err(err),
        }
    }
}

pub fn classify(response: &HttpResponse, checks_status: bool) -> Classified {
    match response.status {
        200 => match decode(response) {
            Ok(body) => match checks_status.then(|| status_failure(&body)).flatten() {
                Some(err) => Classified::failed(Some(body), err),
                None => Classified {
                    body: Some(body.clone()),
                    outcome: Ok(body),
                },
            },
            Err(err) => Classified::failed(None, err),
        },
        400 => {
            let body = decode(response).ok();
            let err = match body.as_ref().and_then(exception_code) {
                Some(code) => BetfairError::Api(code.to_string()),
                None => http_error(response),
            };
            Classified::failed(body, err)
        }
        _ => Classified::failed(None, http_error(response)),
    }
}

pub fn decode(response: &HttpResponse) -> Result<Value, BetfairError> {
    serde_json::from_str(&response.body)
        .map_err(|err| BetfairError::Decode(format!("Invalid JSON in response: {err}")))
}

pub fn http_error(response: &HttpResponse) -> BetfairError {
    BetfairError::Http {
        status: response.status,
        status_line: response.status_line(),
    }
}

/// Finds the error code in a fault body such as
/// `{"detail": {"APINGException": {"errorCode": "INVALID_SESSION_INFORMATION"}}}`.
/// Account faults use `AccountAPINGException` under the same `detail` key.
pub fn exception_code(body: &Value) -> Option<&str> {
    body.get("detail")?
        .as_object()?
        .iter()
        .filter(|(name, _)| name.ends_with("Exception"))
        .find_map(|(_, exception)| exception.get("errorCode")?.as_str())
}

/// A business failure reported inside an HTTP 200 body: any top-level
/// `status` other than `SUCCESS`, qualified by `errorCode` when present.
pub fn status_failure(body: &Value) -> Option<BetfairError> {
    let status = body.get("status").and_then(Value::as_str);
    if status == Some(SUCCESS) {
        return None;
    }
    let code = body.get("errorCode").and_then(Value::as_str);
    Some(BetfairError::api_status(status.unwrap_or("UNKNOWN"), code))
}
