//! Converts raw producer parameters into a [`PlugEvent`].

use super::plug_event::{MAX_PLUG_INDEX, PlugEvent};
use crate::error::ValidationError;

/// Name of the plug index parameter.
pub const PLUG_PARAM: &str = "plug";

/// Name of the plug state parameter.
pub const STATE_PARAM: &str = "state";

/// Validates raw `plug` and `state` parameters and builds the event.
///
/// Checks run in a fixed order and the first failure is returned:
/// `plug` presence and format, `state` presence and format, plug range,
/// then state value. An empty string counts as missing.
///
/// # Errors
///
/// - [`ValidationError::MissingParam`] if a parameter is absent or empty.
/// - [`ValidationError::BadFormat`] if a parameter is not an integer.
/// - [`ValidationError::OutOfRange`] if the plug index is not in `0..=4`.
/// - [`ValidationError::InvalidState`] if the state is neither `0` nor `1`.
pub fn validate(
    raw_plug: Option<&str>,
    raw_state: Option<&str>,
) -> Result<PlugEvent, ValidationError> {
    let plug = parse_int_param(PLUG_PARAM, raw_plug)?;
    let state = parse_int_param(STATE_PARAM, raw_state)?;

    if !(0..=i64::from(MAX_PLUG_INDEX)).contains(&plug) {
        return Err(ValidationError::OutOfRange(plug));
    }

    let state = match state {
        0 => false,
        1 => true,
        other => return Err(ValidationError::InvalidState(other)),
    };

    PlugEvent::new(plug, state)
}

fn parse_int_param(name: &'static str, raw: Option<&str>) -> Result<i64, ValidationError> {
    let raw = raw
        .filter(|value| !value.is_empty())
        .ok_or(ValidationError::MissingParam(name))?;
    raw.parse().map_err(|_| ValidationError::BadFormat(name))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::error::ValidationErrorKind;

    #[test]
    fn well_formed_input_round_trips() {
        for plug in 0..=MAX_PLUG_INDEX {
            for (raw_state, state) in [("0", false), ("1", true)] {
                let raw_plug = plug.to_string();
                let Ok(event) = validate(Some(raw_plug.as_str()), Some(raw_state)) else {
                    panic!("plug={raw_plug} state={raw_state} should validate");
                };
                assert_eq!(event.plug(), plug);
                assert_eq!(event.state(), state);
            }
        }
    }

    #[test]
    fn out_of_range_plug_is_rejected() {
        for raw in ["-1", "5", "7", "100"] {
            let Err(err) = validate(Some(raw), Some("1")) else {
                panic!("plug {raw} should be rejected");
            };
            assert_eq!(err.kind(), ValidationErrorKind::OutOfRange);
            assert!(err.to_string().contains(raw));
        }
    }

    #[test]
    fn invalid_state_is_rejected() {
        assert_eq!(
            validate(Some("1"), Some("2")),
            Err(ValidationError::InvalidState(2))
        );
        assert_eq!(
            validate(Some("1"), Some("-1")),
            Err(ValidationError::InvalidState(-1))
        );
    }

    #[test]
    fn non_numeric_state_is_bad_format() {
        assert_eq!(
            validate(Some("1"), Some("true")),
            Err(ValidationError::BadFormat(STATE_PARAM))
        );
    }

    #[test]
    fn missing_params_are_named() {
        assert_eq!(
            validate(None, Some("1")),
            Err(ValidationError::MissingParam(PLUG_PARAM))
        );
        assert_eq!(
            validate(Some("1"), None),
            Err(ValidationError::MissingParam(STATE_PARAM))
        );
        assert_eq!(
            validate(Some(""), Some("1")),
            Err(ValidationError::MissingParam(PLUG_PARAM))
        );
    }

    #[test]
    fn bad_format_names_the_parameter() {
        let Err(err) = validate(Some("three"), Some("1")) else {
            panic!("non-integer plug should fail");
        };
        assert_eq!(err, ValidationError::BadFormat(PLUG_PARAM));
        assert!(err.to_string().contains("plug"));

        // Too large for i64.
        assert_eq!(
            validate(Some("99999999999999999999"), Some("1")),
            Err(ValidationError::BadFormat(PLUG_PARAM))
        );
    }

    #[test]
    fn plug_checks_run_before_state_checks() {
        assert_eq!(
            validate(None, None),
            Err(ValidationError::MissingParam(PLUG_PARAM))
        );
        assert_eq!(
            validate(Some("9"), Some("2")),
            Err(ValidationError::OutOfRange(9))
        );
    }

    #[test]
    fn explicit_plus_sign_is_accepted() {
        let Ok(event) = validate(Some("+3"), Some("1")) else {
            panic!("+3 should parse");
        };
        assert_eq!(event.plug(), 3);
    }
}
