use serde::Deserialize;
use serde_json::Value;

/// Top-level upstream response body. A missing or null `results` field is
/// a successful response with zero records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RandomUserResponse {
    #[serde(default)]
    pub results: Option<Vec<RawUser>>,
}

/// One raw upstream record. Every field is optional; presence is never
/// assumed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawUser {
    #[serde(default)]
    pub name: Option<RawName>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub picture: Option<RawPicture>,
    #[serde(default)]
    pub location: Option<RawLocation>,
    #[serde(default)]
    pub phone: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawName {
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPicture {
    #[serde(default)]
    pub large: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLocation {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Normalized user projection. Construction is total: missing upstream
/// fields degrade to empty or absent values, never to an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct User {
    pub full_name: String,
    pub email: String,
    pub photo_url: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
}

impl From<RawUser> for User {
    fn from(raw: RawUser) -> Self {
        let name = raw.name.unwrap_or_default();
        let first = name.first.as_deref().unwrap_or("").trim();
        let last = name.last.as_deref().unwrap_or("").trim();
        let full_name = format!("{first} {last}").trim().to_string();

        let location = raw.location.unwrap_or_default();

        Self {
            full_name,
            email: raw.email.unwrap_or_default(),
            photo_url: raw.picture.and_then(|x| x.large).unwrap_or_default(),
            city: location.city,
            state: location.state,
            country: location.country,
            phone: raw.phone.as_ref().and_then(value_to_string),
        }
    }
}

/// String-casts a loose JSON value. Non-string scalars keep their JSON
/// rendering; null maps to absent.
fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(x) => Some(x.clone()),
        other => Some(other.to_string()),
    }
}
