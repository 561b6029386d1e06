//! Raw row records.
//!
//! A row is what the ingestion side hands over for one facility: every field
//! is optional and loosely typed. Nothing here validates; the builder decides
//! what survives.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A scalar cell that may arrive as a number or as text.
///
/// Any other shape (boolean, array, object) is kept as `Other` so one odd
/// cell never fails the whole row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
    Other(Value),
}

impl Scalar {
    /// Render the cell as trimmed text. Non-scalar shapes render empty.
    pub fn to_text(&self) -> String {
        match self {
            Scalar::Number(v) => v.to_string(),
            Scalar::Text(s) => s.trim().to_string(),
            Scalar::Other(_) => String::new(),
        }
    }

    /// Interpret the cell as a finite number.
    pub fn to_finite(&self) -> Option<f64> {
        match self {
            Scalar::Number(v) => rn_core::finite(*v),
            Scalar::Text(s) => rn_core::parse_finite(s),
            Scalar::Other(_) => None,
        }
    }

    /// True when the cell carries nothing: blank text or null.
    pub fn is_blank(&self) -> bool {
        match self {
            Scalar::Number(_) => false,
            Scalar::Text(s) => s.trim().is_empty(),
            Scalar::Other(v) => v.is_null(),
        }
    }

    /// The cell as it arrived, for diagnostics.
    pub fn raw(&self) -> String {
        match self {
            Scalar::Number(v) => v.to_string(),
            Scalar::Text(s) => s.clone(),
            Scalar::Other(v) => v.to_string(),
        }
    }
}

impl From<&Value> for Scalar {
    fn from(value: &Value) -> Self {
        match value {
            Value::Number(n) => n
                .as_f64()
                .map_or_else(|| Scalar::Other(value.clone()), Scalar::Number),
            Value::String(s) => Scalar::Text(s.clone()),
            other => Scalar::Other(other.clone()),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Number(v)
    }
}

/// A list cell: either already structured, or text that still needs decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListField {
    Items(Vec<Value>),
    Text(String),
    /// Any other shape; decodes as `NotAList`.
    Other(Value),
}

/// Why a list cell could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ListDecodeError {
    /// The text isn't valid JSON after normalisation.
    Malformed { text: String },
    /// The text is valid JSON but not an array.
    NotAList,
}

impl ListField {
    /// Decode into a list of JSON values.
    ///
    /// Text is normalised the way spreadsheet exports embed JSON: one pair of
    /// wrapping double quotes is removed and doubled quotes collapse to one.
    /// Blank text is an empty list.
    pub(crate) fn decode(&self) -> Result<Vec<Value>, ListDecodeError> {
        match self {
            ListField::Items(items) => Ok(items.clone()),
            ListField::Other(Value::Null) => Ok(Vec::new()),
            ListField::Other(_) => Err(ListDecodeError::NotAList),
            ListField::Text(raw) => {
                let text = normalize_embedded_json(raw);
                if text.is_empty() {
                    return Ok(Vec::new());
                }
                match serde_json::from_str::<Value>(&text) {
                    Ok(Value::Array(items)) => Ok(items),
                    Ok(_) => Err(ListDecodeError::NotAList),
                    Err(_) => Err(ListDecodeError::Malformed { text }),
                }
            }
        }
    }
}

fn normalize_embedded_json(raw: &str) -> String {
    let mut s = raw.trim();
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        s = &s[1..s.len() - 1];
    }
    s.replace("\"\"", "\"").trim().to_string()
}

/// One facility row as delivered by ingestion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(default)]
    pub id: Option<Scalar>,
    #[serde(default)]
    pub name: Option<Scalar>,
    #[serde(default)]
    pub region: Option<Scalar>,
    #[serde(default)]
    pub level: Option<Scalar>,
    #[serde(default, rename = "type")]
    pub facility_type: Option<Scalar>,
    #[serde(default, alias = "lat")]
    pub latitude: Option<Scalar>,
    #[serde(default, alias = "lon")]
    pub longitude: Option<Scalar>,
    #[serde(default)]
    pub relations: Option<ListField>,
    #[serde(default)]
    pub services: Option<ListField>,
}

impl RawRow {
    /// Row with just an id and a level; the name defaults to the id.
    pub fn facility(id: &str, level: &str) -> Self {
        Self {
            id: Some(Scalar::from(id)),
            name: Some(Scalar::from(id)),
            level: Some(Scalar::from(level)),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(Scalar::from(name));
        self
    }

    pub fn with_region(mut self, region: &str) -> Self {
        self.region = Some(Scalar::from(region));
        self
    }

    pub fn with_position(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(Scalar::Number(latitude));
        self.longitude = Some(Scalar::Number(longitude));
        self
    }

    /// Append a structured relation. Replaces a textual relations cell.
    pub fn with_relation(mut self, target_id: &str, weight_km: f64) -> Self {
        let entry = serde_json::json!({ "target_id": target_id, "weight_km": weight_km });
        match &mut self.relations {
            Some(ListField::Items(items)) => items.push(entry),
            _ => self.relations = Some(ListField::Items(vec![entry])),
        }
        self
    }

    pub fn with_relations_text(mut self, text: &str) -> Self {
        self.relations = Some(ListField::Text(text.to_string()));
        self
    }

    pub fn with_services(mut self, services: &[&str]) -> Self {
        let items = services
            .iter()
            .map(|s| Value::String((*s).to_string()))
            .collect();
        self.services = Some(ListField::Items(items));
        self
    }

    pub fn with_services_text(mut self, text: &str) -> Self {
        self.services = Some(ListField::Text(text.to_string()));
        self
    }
}
