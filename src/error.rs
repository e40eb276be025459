use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdapterError>;

/// Tipo de registro que se busca al cruzar colecciones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Product,
    Topic,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Product => write!(f, "Producto"),
            ResourceKind::Topic => write!(f, "Tema"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("{kind} con id {id} no encontrado")]
    NotFound { kind: ResourceKind, id: String },

    #[error("Error de red: {0}")]
    Network(String),

    #[error("Error de la API (estado {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Respuesta del backend no decodificable: {0}")]
    Decode(String),

    #[error("Identificador de alerta no válido: {0}")]
    InvalidWarningId(String),
}

impl AdapterError {
    pub fn not_found(kind: ResourceKind, id: impl Into<String>) -> Self {
        AdapterError::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Fallos del transporte: red, estado HTTP o cuerpo ilegible.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AdapterError::Network(_) | AdapterError::Api { .. } | AdapterError::Decode(_)
        )
    }
}

impl From<reqwest::Error> for AdapterError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AdapterError::Decode(err.to_string())
        } else {
            AdapterError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AdapterError {
    fn from(err: serde_json::Error) -> Self {
        AdapterError::Decode(err.to_string())
    }
}
