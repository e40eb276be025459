//! Modelos de dominio (registros tal y como los devuelve el backend totruth).
//!
//! Esta capa nunca modifica los registros: se leen, se cruzan y se
//! transforman en los modelos de vista de `views`.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Identificador de un registro del backend.
///
/// El backend mezcla ids numéricos y de texto según el recurso, así que se
/// normalizan siempre a texto al deserializar (`1`, `1.0` y `"1"` son el mismo id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(raw: impl AsRef<str>) -> Self {
        RecordId(normalize_id(raw.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(RecordId::new(s)),
            Value::Number(n) => Ok(RecordId::new(n.to_string())),
            other => Err(de::Error::custom(format!("id no válido: {other}"))),
        }
    }
}

/// Convierte un id a su forma canónica de texto.
///
/// Los números enteros escritos como flotante (`"7.0"`) se reducen a `"7"`.
pub fn normalize_id(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<f64>() {
        if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 && trimmed.contains('.') {
            return format!("{}", n as i64);
        }
    }
    trimmed.to_string()
}

/// Trata un `null` explícito del backend igual que un campo ausente.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Prioridad de producto: puntuación numérica o etiqueta ya resuelta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPriority {
    Score(f64),
    Label(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub priority: Option<RawPriority>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub self_ad: Map<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub other_ad: Map<String, Value>,
}

/// Cuerpo de alta de producto.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<RawPriority>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub self_ad: Map<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub other_ad: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Topic {
    pub id: RecordId,
    #[serde(default)]
    pub product_id: Option<RecordId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub alarm_score: f64,
    #[serde(default)]
    pub priority: Option<RawPriority>,
    #[serde(default)]
    pub created_time: Option<String>,
    /// Tendencia prevista.
    #[serde(default)]
    pub predict: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub analyses: Vec<Analysis>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Analysis {
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keyword: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub emotion: String,
    /// Punto de inflexión; vacío significa que no hay.
    #[serde(default)]
    pub snap: Option<String>,
}

impl Analysis {
    pub fn turning_point(&self) -> Option<&str> {
        self.snap.as_deref().filter(|s| !s.is_empty())
    }
}

/// Vector de emociones (cada valor entre 0 y 1).
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Emotions {
    #[serde(deserialize_with = "null_as_default")]
    pub sadness: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub joy: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub love: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub anger: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub fear: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub surprise: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CommentScore {
    /// -1..1
    #[serde(deserialize_with = "null_as_default")]
    pub polarity: f64,
    /// 0..1
    #[serde(deserialize_with = "null_as_default")]
    pub subjectivity: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub topic_id: Option<RecordId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub emotion: Emotions,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: CommentScore,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScoreSummary {
    #[serde(deserialize_with = "null_as_default")]
    pub polarity: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub subjectivity: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub emotions: Emotions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalSuggestion {
    #[serde(default, deserialize_with = "null_as_default")]
    pub reasoning: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestion: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LegalAssessment {
    pub topic_id: Option<RecordId>,
    /// "success" cuando el dictamen está listo.
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub legal_risks: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub legal_suggestions: Vec<LegalSuggestion>,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
}

impl LegalAssessment {
    pub fn is_ready(&self) -> bool {
        self.message == "success"
    }
}

// --- Envoltorios de las respuestas de colección ---

#[derive(Debug, Deserialize)]
pub struct ProductsEnvelope {
    pub products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
pub struct TopicsEnvelope {
    pub topics: Vec<Topic>,
}

#[derive(Debug, Deserialize)]
pub struct CommentsEnvelope {
    pub comments: Vec<Comment>,
}
