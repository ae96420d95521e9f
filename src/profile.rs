//! Serializable avatar profile for storing or transmitting a layer selection.
//!
//! An [`AvatarProfile`] captures the gender and the catalog index of every
//! layer. Fed back through
//! [`AvatarGenerator::generate_from_profile`](crate::AvatarGenerator::generate_from_profile)
//! against the same assets, it reproduces the image exactly.
//!
//! ```json
//! {
//!   "gender": "female",
//!   "background": 2,
//!   "face": 0,
//!   "clothes": 5,
//!   "mouth": 1,
//!   "hair": 11,
//!   "eye": 3
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::gender::Gender;
use crate::layer::{Category, LayerSelection};

/// Gender plus one catalog index per layer category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarProfile {
    pub gender: Gender,
    pub background: i64,
    pub face: i64,
    pub clothes: i64,
    pub mouth: i64,
    pub hair: i64,
    pub eye: i64,
}

impl AvatarProfile {
    /// Indices in painter's order, as accepted by explicit selection.
    pub fn indices(&self) -> [i64; Category::COUNT] {
        [
            self.background,
            self.face,
            self.clothes,
            self.mouth,
            self.hair,
            self.eye,
        ]
    }

    /// Serializes the profile to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the profile to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<&LayerSelection> for AvatarProfile {
    fn from(selection: &LayerSelection) -> Self {
        let index = |category| selection.get(category).index as i64;
        Self {
            gender: selection.gender(),
            background: index(Category::Background),
            face: index(Category::Face),
            clothes: index(Category::Clothes),
            mouth: index(Category::Mouth),
            hair: index(Category::Hair),
            eye: index(Category::Eye),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AvatarError;
    use crate::testing::fixture_catalog;
    use crate::AvatarGenerator;

    #[test]
    fn profile_json_format() {
        let profile = AvatarProfile {
            gender: Gender::Female,
            background: 2,
            face: 0,
            clothes: 1,
            mouth: 1,
            hair: 3,
            eye: 0,
        };
        let json = profile.to_json_pretty().unwrap();
        assert!(json.contains("\"gender\": \"female\""));
        assert!(json.contains("\"hair\": 3"));

        let restored = AvatarProfile::from_json(&json).unwrap();
        assert_eq!(restored, profile);
        assert_eq!(restored.indices(), [2, 0, 1, 1, 3, 0]);
    }

    #[test]
    fn profile_rejects_unknown_gender() {
        let json = r#"{"gender":"robot","background":0,"face":0,"clothes":0,"mouth":0,"hair":0,"eye":0}"#;
        assert!(AvatarProfile::from_json(json).is_err());
    }

    #[test]
    fn profile_reproduces_selection() {
        let generator = AvatarGenerator::new(fixture_catalog());
        let selection = generator.select_for_identity(Gender::Male, "username@site.com");
        let profile = AvatarProfile::from(&selection);
        assert_eq!(profile.indices(), selection.indices().map(|i| i as i64));

        let json = profile.to_json().unwrap();
        let restored = AvatarProfile::from_json(&json).unwrap();
        assert_eq!(
            generator.generate_from_profile(&restored).unwrap(),
            generator.render(&selection).unwrap()
        );
    }

    #[test]
    fn out_of_range_profile_fails() {
        let generator = AvatarGenerator::new(fixture_catalog());
        let profile = AvatarProfile {
            gender: Gender::Male,
            background: 0,
            face: 0,
            clothes: 0,
            mouth: 0,
            hair: 99,
            eye: 0,
        };
        let err = generator.generate_from_profile(&profile).unwrap_err();
        assert!(matches!(err, AvatarError::InvalidAssetIndex { index: 99, .. }));
    }
}
