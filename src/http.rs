//! Transport-agnostic handler for avatar HTTP requests.
//!
//! A server decodes the `username` and `gender` form fields of a
//! `POST /api/v1/avatar` request into an [`AvatarRequest`] and writes the
//! returned [`AvatarResponse`] back with its content type. Socket handling,
//! timeouts and routing belong to the server.

use serde::Deserialize;

use crate::encode::{OutputFormat, encode_to_vec};
use crate::error::Result;
use crate::gender::Gender;
use crate::generator::AvatarGenerator;

/// Path the avatar endpoint is conventionally mounted at.
pub const AVATAR_ENDPOINT: &str = "/api/v1/avatar";

/// Form fields of an avatar request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AvatarRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

impl AvatarRequest {
    /// `"female"` selects the female assets; any other value, or none, is male.
    pub fn gender(&self) -> Gender {
        match self.gender.as_deref() {
            Some("female") => Gender::Female,
            _ => Gender::Male,
        }
    }

    /// The username, if present and non-empty.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref().filter(|name| !name.is_empty())
    }
}

/// An encoded avatar ready to be written to the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarResponse {
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

/// Generates the avatar for a request, encoded as JPEG.
///
/// Requests with a username get that identity's avatar; anonymous requests
/// get a random one. Errors should be mapped to a server error status.
pub fn handle_avatar_request(
    generator: &AvatarGenerator,
    request: &AvatarRequest,
) -> Result<AvatarResponse> {
    let gender = request.gender();
    let avatar = match request.username() {
        Some(name) => generator.generate_for_identity(gender, name)?,
        None => generator.generate(gender)?,
    };

    let format = OutputFormat::jpeg();
    let body = encode_to_vec(&avatar, format)?;
    tracing::debug!(
        %gender,
        identified = request.username().is_some(),
        bytes = body.len(),
        "avatar request served"
    );
    Ok(AvatarResponse {
        content_type: format.content_type(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::sniff_content_type;
    use crate::testing::fixture_catalog;

    fn generator() -> AvatarGenerator {
        AvatarGenerator::new(fixture_catalog())
    }

    #[test]
    fn gender_field_defaults_to_male() {
        let request = AvatarRequest::default();
        assert_eq!(request.gender(), Gender::Male);

        let request = AvatarRequest {
            gender: Some("female".into()),
            ..Default::default()
        };
        assert_eq!(request.gender(), Gender::Female);

        let request = AvatarRequest {
            gender: Some("other".into()),
            ..Default::default()
        };
        assert_eq!(request.gender(), Gender::Male);
    }

    #[test]
    fn deserializes_form_fields() {
        let request: AvatarRequest =
            serde_json::from_str(r#"{"username":"bob","gender":"female"}"#).unwrap();
        assert_eq!(request.username(), Some("bob"));
        assert_eq!(request.gender(), Gender::Female);

        let request: AvatarRequest = serde_json::from_str(r#"{"username":""}"#).unwrap();
        assert_eq!(request.username(), None);
    }

    #[test]
    fn responds_with_jpeg() {
        let response = handle_avatar_request(&generator(), &AvatarRequest::default()).unwrap();
        assert_eq!(response.content_type, "image/jpeg");
        assert_eq!(sniff_content_type(&response.body), Some("image/jpeg"));
    }

    #[test]
    fn identified_requests_are_stable() {
        let generator = generator();
        let request = AvatarRequest {
            username: Some("username@site.com".into()),
            gender: Some("female".into()),
        };
        let a = handle_avatar_request(&generator, &request).unwrap();
        let b = handle_avatar_request(&generator, &request).unwrap();
        assert_eq!(a, b);
    }
}
