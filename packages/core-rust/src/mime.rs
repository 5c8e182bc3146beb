//! Content-type parsing for the dispatch protocol.
//!
//! The content-type header is the only dispatch signal the worker looks at --
//! payloads are never inspected before routing. Decoding therefore has to be
//! total: any input, however malformed, produces a descriptor, and inputs
//! that do not parse degrade to the unknown descriptor instead of failing.

use std::collections::HashMap;

use mediatype::MediaType;

/// A parsed content-type value.
///
/// `ty` and `subtype` are lower-cased and trimmed. The unknown descriptor
/// (empty `ty`/`subtype`) is the degraded form of unparseable input and is
/// never routable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MimeDescriptor {
    pub ty: String,
    pub subtype: String,
    pub parameters: HashMap<String, String>,
}

impl MimeDescriptor {
    /// Parses a raw content-type header value.
    ///
    /// Never fails: malformed input returns [`MimeDescriptor::unknown`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match MediaType::parse(raw.trim()) {
            Ok(media_type) => {
                let subtype = match media_type.suffix {
                    Some(suffix) => format!(
                        "{}+{}",
                        media_type.subty.as_str().to_ascii_lowercase(),
                        suffix.as_str().to_ascii_lowercase()
                    ),
                    None => media_type.subty.as_str().to_ascii_lowercase(),
                };
                let parameters = media_type
                    .params
                    .iter()
                    .map(|(name, value)| {
                        (
                            name.as_str().to_ascii_lowercase(),
                            value.unquoted_str().to_string(),
                        )
                    })
                    .collect();
                Self {
                    ty: media_type.ty.as_str().to_ascii_lowercase(),
                    subtype,
                    parameters,
                }
            }
            Err(_) => {
                tracing::trace!(raw, "content type did not parse, degrading to unknown");
                Self::unknown()
            }
        }
    }

    /// The degraded descriptor produced for unparseable input.
    #[must_use]
    pub fn unknown() -> Self {
        Self::default()
    }

    /// True if this descriptor is the degraded unknown form.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.ty.is_empty() || self.subtype.is_empty()
    }

    /// The `type/subtype` pair without parameters. Message-kind matching
    /// operates on this alone.
    #[must_use]
    pub fn essence(&self) -> String {
        format!("{}/{}", self.ty, self.subtype)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn parse_plain_type() {
        let descriptor = MimeDescriptor::parse("application/x-field-resolve-request");
        assert_eq!(descriptor.ty, "application");
        assert_eq!(descriptor.subtype, "x-field-resolve-request");
        assert!(descriptor.parameters.is_empty());
        assert!(!descriptor.is_unknown());
    }

    #[test]
    fn parse_lowercases_and_trims() {
        let descriptor = MimeDescriptor::parse("  Application/X-Field-Resolve-Request ");
        assert_eq!(descriptor.ty, "application");
        assert_eq!(descriptor.subtype, "x-field-resolve-request");
    }

    #[test]
    fn parse_collects_parameters() {
        let descriptor = MimeDescriptor::parse("text/plain; charset=UTF-8; boundary=\"xyz\"");
        assert_eq!(descriptor.ty, "text");
        assert_eq!(descriptor.subtype, "plain");
        assert_eq!(descriptor.parameters.get("charset").map(String::as_str), Some("UTF-8"));
        assert_eq!(descriptor.parameters.get("boundary").map(String::as_str), Some("xyz"));
    }

    #[test]
    fn parse_keeps_structured_suffix() {
        let descriptor = MimeDescriptor::parse("application/graphql-response+json");
        assert_eq!(descriptor.subtype, "graphql-response+json");
    }

    #[test]
    fn malformed_input_degrades_to_unknown() {
        for raw in ["", "application", "application/", "/x-thing", "not a mime", ";;;"] {
            let descriptor = MimeDescriptor::parse(raw);
            assert!(descriptor.is_unknown(), "expected unknown for {raw:?}");
        }
    }

    #[test]
    fn essence_drops_parameters() {
        let descriptor = MimeDescriptor::parse("application/x-scalar-parse-request; charset=utf-8");
        assert_eq!(descriptor.essence(), "application/x-scalar-parse-request");
    }

    proptest! {
        #[test]
        fn parse_is_total(raw in ".*") {
            // Decoding must never panic, whatever the host sends.
            let _ = MimeDescriptor::parse(&raw);
        }

        #[test]
        fn parsed_output_is_lowercase(ty in "[A-Za-z]{1,10}", sub in "[A-Za-z]{1,10}") {
            let descriptor = MimeDescriptor::parse(&format!("{ty}/{sub}"));
            prop_assert_eq!(descriptor.ty, ty.to_ascii_lowercase());
            prop_assert_eq!(descriptor.subtype, sub.to_ascii_lowercase());
        }
    }
}
