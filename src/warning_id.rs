//! Identificador compuesto de alerta: `Pro_<productId>_<topicId>`.
//!
//! Es el único identificador que viaja entre la lista y las vistas de detalle.

use std::{fmt, str::FromStr};

use crate::error::AdapterError;

const PREFIX: &str = "Pro";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WarningId {
    product_id: String,
    topic_id: String,
}

impl WarningId {
    /// Falla si alguno de los ids está vacío o contiene `_`, porque el
    /// resultado no se podría volver a separar en el mismo par.
    pub fn new(product_id: impl Into<String>, topic_id: impl Into<String>) -> Result<Self, AdapterError> {
        let product_id = product_id.into();
        let topic_id = topic_id.into();
        for part in [&product_id, &topic_id] {
            if part.is_empty() || part.contains('_') {
                return Err(AdapterError::InvalidWarningId(format!(
                    "{PREFIX}_{product_id}_{topic_id}"
                )));
            }
        }
        Ok(Self {
            product_id,
            topic_id,
        })
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn topic_id(&self) -> &str {
        &self.topic_id
    }
}

impl fmt::Display for WarningId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}_{}_{}", self.product_id, self.topic_id)
    }
}

impl FromStr for WarningId {
    type Err = AdapterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AdapterError::InvalidWarningId(s.to_string());
        let parts: Vec<&str> = s.split('_').collect();
        match parts.as_slice() {
            [PREFIX, product_id, topic_id] => {
                WarningId::new(*product_id, *topic_id).map_err(|_| invalid())
            }
            _ => Err(invalid()),
        }
    }
}
