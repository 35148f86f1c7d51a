//! Producer endpoint: validates a plug state change and publishes it.

use axum::Router;
use axum::body::Bytes;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, header};
use axum::routing::get;

use crate::api::dto::InputParams;
use crate::app_state::AppState;
use crate::domain::validate;
use crate::error::ValidationError;

/// Body returned once the event has been handed to the bus.
pub const SENT: &str = "Sent";

/// `GET|POST /input` — Publish a plug state change.
///
/// Parameters come from the query string on any method, and additionally
/// from the body when it is sent as `application/x-www-form-urlencoded`.
/// For a repeated key the first value wins, query before body. The
/// response is sent as soon as the event is on the bus; it does not wait
/// for any subscriber.
///
/// # Errors
///
/// Returns [`ValidationError`] if a parameter is missing, malformed, or
/// out of range.
#[utoipa::path(
    method(get, post),
    path = "/input",
    tag = "Producer",
    summary = "Publish a plug state change",
    description = "Validates `plug` and `state` and broadcasts the event to every connected `/output` subscriber.",
    params(InputParams),
    request_body(
        content = InputParams,
        content_type = "application/x-www-form-urlencoded",
        description = "Optional form body, read when the query string lacks a parameter"
    ),
    responses(
        (status = 200, description = "Event published", body = String),
        (status = 400, description = "Plug out of range or invalid state", body = String),
        (status = 500, description = "Missing or non-integer parameter", body = String),
    )
)]
pub async fn input_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, ValidationError> {
    let form = is_form_body(&headers).then_some(body.as_ref());
    let params = InputParams::from_urlencoded(query.as_deref(), form);
    let event = validate(params.plug.as_deref(), params.state.as_deref()).inspect_err(|err| {
        tracing::debug!(error = %err, "rejected plug event");
    })?;

    let delivered = state.event_bus.publish(event);
    tracing::info!(
        plug = event.plug(),
        state = event.state(),
        subscribers = delivered,
        "plug event published"
    );

    Ok(SENT)
}

fn is_form_body(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| {
            mime.trim()
                .eq_ignore_ascii_case("application/x-www-form-urlencoded")
        })
}

/// Producer routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/input", get(input_handler).post(input_handler))
}
