//! Raw producer parameters.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::domain::validator::{PLUG_PARAM, STATE_PARAM};

/// Unvalidated `/input` parameters, read from the query string and, on
/// POST, from an urlencoded form body.
///
/// Both fields stay strings so that missing and malformed values reach
/// [`crate::domain::validate`] and get its error messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct InputParams {
    /// Plug index, `0` to `4`.
    pub plug: Option<String>,
    /// Desired state, `0` (off) or `1` (on).
    pub state: Option<String>,
}

impl InputParams {
    /// Collects parameters from a query string and an optional form body.
    ///
    /// The first value seen for a key wins; query parameters are read
    /// before body parameters. Undecodable input contributes nothing.
    #[must_use]
    pub fn from_urlencoded(query: Option<&str>, form: Option<&[u8]>) -> Self {
        let query_pairs = query
            .and_then(|q| serde_urlencoded::from_str::<Vec<(String, String)>>(q).ok())
            .unwrap_or_default();
        let form_pairs = form
            .and_then(|body| serde_urlencoded::from_bytes::<Vec<(String, String)>>(body).ok())
            .unwrap_or_default();

        let mut params = Self::default();
        for (key, value) in query_pairs.into_iter().chain(form_pairs) {
            let slot = match key.as_str() {
                PLUG_PARAM => &mut params.plug,
                STATE_PARAM => &mut params.state,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}
