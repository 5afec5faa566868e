use crate::error::RemindrError;
use actix_web::HttpRequest;

pub const OWNER_HEADER: &str = "remindr-owner";

/// Identifies the user the request is made on behalf of. Every command only
/// sees and touches the `Reminder`s of that user.
pub fn protect_route(http_req: &HttpRequest) -> Result<String, RemindrError> {
    let owner_id = http_req
        .headers()
        .get(OWNER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim())
        .filter(|value| !value.is_empty());

    match owner_id {
        Some(owner_id) => Ok(owner_id.to_string()),
        None => Err(RemindrError::UnidentifiableClient(format!(
            "Missing or invalid `{}` header",
            OWNER_HEADER
        ))),
    }
}
