use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a scheme on the NAV API.
///
/// The search endpoint returns codes as JSON numbers while other payloads
/// carry them as strings; both deserialize into the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SchemeCode(pub String);

impl SchemeCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SchemeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SchemeCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => SchemeCode(n.to_string()),
            Raw::Text(s) => SchemeCode(s.trim().to_string()),
        })
    }
}

/// One hit from the scheme search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeRecord {
    pub scheme_code: SchemeCode,
    pub scheme_name: String,
}

/// Descriptive metadata attached to a scheme's NAV history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeMeta {
    #[serde(default)]
    pub fund_house: Option<String>,

    #[serde(default)]
    pub scheme_type: Option<String>,

    #[serde(default)]
    pub scheme_category: Option<String>,
}
