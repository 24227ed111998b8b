use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rôle d'un membre : un siège par rôle dans chaque case du planning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Intern,
    Senior,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Intern => "intern",
            Role::Senior => "senior",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "intern" => Ok(Role::Intern),
            "senior" => Ok(Role::Senior),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Référence de créneau `(jour, période)` telle que soumise.
///
/// L'égalité est l'égalité des libellés ; la validité ne se juge que contre
/// la grille configurée.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotRef {
    pub day: String,
    #[serde(alias = "time")]
    pub period: String,
}

impl SlotRef {
    pub fn new<D: Into<String>, P: Into<String>>(day: D, period: P) -> Self {
        Self {
            day: day.into(),
            period: period.into(),
        }
    }
}

/// Couple d'affichage inscrit dans un siège.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRef {
    pub name: String,
    pub phone: String,
}

/// Une disponibilité soumise, immuable une fois décodée.
///
/// `name` sert de clé d'identité et de déduplication ; `phone` n'est là que
/// pour l'affichage. Les doublons internes à `availability` sont tolérés,
/// l'ordre est une préférence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub role: Role,
    pub availability: Vec<SlotRef>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_id: Option<String>,
}

/// Enregistrement brut du dépôt : un corps opaque à décoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSubmission {
    pub origin_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    pub body: String,
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("no JSON payload found in body")]
    NoPayload,
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("invalid timestamp (expected RFC3339)")]
    BadTimestamp,
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Corps décodé champ à champ pour distinguer « absent » de « invalide ».
#[derive(Debug, Deserialize)]
struct Payload {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    role: Option<Role>,
    #[serde(default)]
    availability: Option<Vec<SlotRef>>,
    #[serde(default)]
    timestamp: Option<String>,
}

impl RawSubmission {
    /// Décode le corps vers une [`Submission`].
    ///
    /// Le corps peut être du JSON nu, un bloc ```json clôturé, ou un segment
    /// délimité par `<!-- JSON_DATA -->` / `<!-- END_JSON_DATA -->`. Un rôle
    /// absent vaut `intern` ; `name`, `phone`, `availability` et `timestamp`
    /// sont requis.
    pub fn decode(&self) -> Result<Submission, DecodeError> {
        let payload = extract_payload(&self.body).ok_or(DecodeError::NoPayload)?;
        let parsed: Payload = serde_json::from_str(payload)?;

        let name = non_empty(parsed.name).ok_or(DecodeError::MissingField("name"))?;
        let phone = non_empty(parsed.phone).ok_or(DecodeError::MissingField("phone"))?;
        let availability = parsed
            .availability
            .ok_or(DecodeError::MissingField("availability"))?;
        let timestamp = parsed
            .timestamp
            .ok_or(DecodeError::MissingField("timestamp"))?
            .parse::<DateTime<Utc>>()
            .map_err(|_| DecodeError::BadTimestamp)?;

        Ok(Submission {
            name,
            phone,
            role: parsed.role.unwrap_or_default(),
            availability,
            timestamp,
            origin_id: Some(self.origin_id.clone()),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn extract_payload(body: &str) -> Option<&str> {
    if let Some(chunk) = between(body, "<!-- JSON_DATA -->", "<!-- END_JSON_DATA -->") {
        return Some(chunk.trim());
    }
    if let Some(chunk) = fenced_json(body) {
        return Some(chunk);
    }
    let trimmed = body.trim();
    trimmed.starts_with('{').then_some(trimmed)
}

fn between<'a>(s: &'a str, open: &str, close: &str) -> Option<&'a str> {
    let start = s.find(open)? + open.len();
    let end = s[start..].find(close)? + start;
    Some(&s[start..end])
}

fn fenced_json(s: &str) -> Option<&str> {
    let start = s.find("```json")? + "```json".len();
    let end = s[start..].find("```")? + start;
    Some(s[start..end].trim())
}
