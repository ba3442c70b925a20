//! Content decoding.
//!
//! Per-file dispatch: structured-data extensions parse as JSON, everything
//! else is opaque script text used verbatim. Provider envelopes (base64 or
//! plain) are unwrapped first.

use base64::{engine::general_purpose::STANDARD, Engine};
use tenantsync_core::types::{ConfigContent, ContentEncoding, FileContent};

use crate::error::EngineError;

/// Decode raw provider content for the file at `path`.
///
/// A parse failure on a `.json` file is a hard error naming the path; the
/// caller aborts the whole materialization pass.
pub fn decode(path: &str, raw: &FileContent) -> Result<ConfigContent, EngineError> {
    let text = unwrap_envelope(path, raw)?;

    if is_structured(path) {
        let value = serde_json::from_str(&text).map_err(|e| EngineError::Decode {
            path: path.to_owned(),
            source: e,
        })?;
        return Ok(ConfigContent::Structured(value));
    }

    Ok(ConfigContent::Script(text))
}

fn unwrap_envelope(path: &str, raw: &FileContent) -> Result<String, EngineError> {
    match raw.encoding {
        ContentEncoding::Utf8 => Ok(raw.content.clone()),
        ContentEncoding::Base64 => {
            let bytes = STANDARD.decode(raw.content.trim().as_bytes()).map_err(|e| {
                EngineError::Envelope {
                    path: path.to_owned(),
                    message: format!("invalid base64: {e}"),
                }
            })?;
            String::from_utf8(bytes).map_err(|e| EngineError::Envelope {
                path: path.to_owned(),
                message: format!("content is not UTF-8: {e}"),
            })
        }
    }
}

fn is_structured(path: &str) -> bool {
    path.rsplit('/')
        .next()
        .is_some_and(|name| name.to_ascii_lowercase().ends_with(".json"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_file_parses_to_structured_value() {
        let raw = FileContent::plain(r#"{ "enabled": true, "order": 10 }"#);
        let decoded = decode("tenant/rules/rule1.json", &raw).expect("decode");
        assert_eq!(
            decoded,
            ConfigContent::Structured(json!({ "enabled": true, "order": 10 }))
        );
    }

    #[test]
    fn script_file_is_verbatim_text() {
        let body = "function rule1(user, context, callback) {\n  callback(null);\n}\n";
        let decoded = decode("tenant/rules/rule1.js", &FileContent::plain(body)).expect("decode");
        assert_eq!(decoded, ConfigContent::Script(body.to_owned()));
    }

    #[test]
    fn invalid_json_is_a_hard_error_naming_the_path() {
        let raw = FileContent::plain("{ broken");
        let err = decode("tenant/guardian/factors.json", &raw).unwrap_err();
        match err {
            EngineError::Decode { path, .. } => {
                assert_eq!(path, "tenant/guardian/factors.json");
            }
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[test]
    fn base64_envelope_is_unwrapped_before_parsing() {
        // {"friendly_name":"t"}
        let raw = FileContent::base64("eyJmcmllbmRseV9uYW1lIjoidCJ9");
        let decoded = decode("tenant/tenant.json", &raw).expect("decode");
        assert_eq!(
            decoded,
            ConfigContent::Structured(json!({ "friendly_name": "t" }))
        );
    }

    #[test]
    fn base64_envelope_around_script_text() {
        // "module.exports = 1;\n"
        let raw = FileContent::base64("bW9kdWxlLmV4cG9ydHMgPSAxOwo=");
        let decoded = decode("tenant/rules/r.js", &raw).expect("decode");
        assert_eq!(decoded, ConfigContent::Script("module.exports = 1;\n".into()));
    }

    #[test]
    fn bad_base64_is_an_envelope_error() {
        let raw = FileContent::base64("!!! not base64 !!!");
        let err = decode("tenant/rules/r.js", &raw).unwrap_err();
        assert!(matches!(err, EngineError::Envelope { .. }));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let raw = FileContent::plain("{}");
        let decoded = decode("tenant/guardian/FACTORS.JSON", &raw).expect("decode");
        assert!(matches!(decoded, ConfigContent::Structured(_)));
    }
}
