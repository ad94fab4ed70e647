//! Field validation shared by hotel and room details.

use serde_json::{Value, json};
use url::Url;

use super::Error;

/// Validation failures for user-supplied hotel and room details.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DetailsValidationError {
    /// A required text field was empty once trimmed.
    #[error("{field} must not be empty")]
    Blank { field: &'static str },
    /// A count field could not be parsed as an integer.
    #[error("{field} must be numeric, got `{value}`")]
    NotNumeric { field: &'static str, value: String },
    /// A count field was below its minimum.
    #[error("{field} must be at least {min}")]
    TooSmall { field: &'static str, min: u32 },
    /// A link was not an absolute http(s) URL.
    #[error("{field} must be an http(s) URL, got `{value}`")]
    InvalidUrl { field: &'static str, value: String },
}

impl DetailsValidationError {
    /// Name of the offending field, as exposed on the wire.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Blank { field }
            | Self::NotNumeric { field, .. }
            | Self::TooSmall { field, .. }
            | Self::InvalidUrl { field, .. } => field,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Blank { .. } => "blank_field",
            Self::NotNumeric { .. } => "not_numeric",
            Self::TooSmall { .. } => "too_small",
            Self::InvalidUrl { .. } => "invalid_url",
        }
    }

    fn details(&self) -> Value {
        json!({
            "field": self.field(),
            "code": self.code(),
        })
    }
}

impl From<DetailsValidationError> for Error {
    fn from(value: DetailsValidationError) -> Self {
        Self::invalid_request(value.to_string()).with_details(value.details())
    }
}

pub(crate) fn required_text(
    field: &'static str,
    value: String,
) -> Result<String, DetailsValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DetailsValidationError::Blank { field });
    }
    Ok(trimmed.to_owned())
}

pub(crate) fn positive_count(field: &'static str, raw: &str) -> Result<u32, DetailsValidationError> {
    let count = raw
        .trim()
        .parse::<u32>()
        .map_err(|_| DetailsValidationError::NotNumeric {
            field,
            value: raw.to_owned(),
        })?;
    if count == 0 {
        return Err(DetailsValidationError::TooSmall { field, min: 1 });
    }
    Ok(count)
}

pub(crate) fn http_url(field: &'static str, value: String) -> Result<String, DetailsValidationError> {
    match Url::parse(value.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url.to_string()),
        _ => Err(DetailsValidationError::InvalidUrl { field, value }),
    }
}

pub(crate) fn optional_http_url(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<String>, DetailsValidationError> {
    value
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| http_url(field, raw))
        .transpose()
}

pub(crate) fn photo_urls(
    field: &'static str,
    photos: Vec<String>,
) -> Result<Vec<String>, DetailsValidationError> {
    photos.into_iter().map(|photo| http_url(field, photo)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("3", Ok(3))]
    #[case(" 12 ", Ok(12))]
    #[case("0", Err(DetailsValidationError::TooSmall { field: "roomsNumber", min: 1 }))]
    #[case("three", Err(DetailsValidationError::NotNumeric { field: "roomsNumber", value: "three".to_owned() }))]
    #[case("-1", Err(DetailsValidationError::NotNumeric { field: "roomsNumber", value: "-1".to_owned() }))]
    fn counts_must_be_positive_integers(
        #[case] raw: &str,
        #[case] expected: Result<u32, DetailsValidationError>,
    ) {
        assert_eq!(positive_count("roomsNumber", raw), expected);
    }

    #[rstest]
    fn photos_must_be_http_urls() {
        let err = photo_urls(
            "photos",
            vec!["https://cdn.example.com/a.jpg".to_owned(), "ftp://x/y".to_owned()],
        )
        .expect_err("ftp rejected");
        assert_eq!(err.field(), "photos");
    }

    #[rstest]
    fn blank_optional_urls_become_none() {
        assert_eq!(optional_http_url("telegram", Some("  ".to_owned())), Ok(None));
    }

    #[rstest]
    fn converts_into_invalid_request() {
        let error = Error::from(DetailsValidationError::Blank { field: "number" });
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            error.details(),
            Some(&json!({"field": "number", "code": "blank_field"}))
        );
    }
}
