//! Cruce de colecciones por id.
//!
//! El backend no expone búsqueda por id: cada operación descarga la
//! colección completa y la recorre aquí. Ambos lados se normalizan a texto
//! antes de comparar, porque las colecciones llegan con tipos distintos.

use crate::{
    error::{AdapterError, ResourceKind, Result},
    models::{normalize_id, Product, RecordId, Topic},
};

fn same_id(record: &RecordId, target: &str) -> bool {
    record.as_str() == normalize_id(target)
}

pub fn find_product<'a>(products: &'a [Product], product_id: &str) -> Result<&'a Product> {
    products
        .iter()
        .find(|p| same_id(&p.id, product_id))
        .ok_or_else(|| AdapterError::not_found(ResourceKind::Product, product_id))
}

pub fn find_topic<'a>(topics: &'a [Topic], topic_id: &str) -> Result<&'a Topic> {
    topics
        .iter()
        .find(|t| same_id(&t.id, topic_id))
        .ok_or_else(|| AdapterError::not_found(ResourceKind::Topic, topic_id))
}

/// Resuelve el par producto/tema de una alerta. El tema se comprueba primero.
pub fn resolve_pair<'a>(
    products: &'a [Product],
    topics: &'a [Topic],
    product_id: &str,
    topic_id: &str,
) -> Result<(&'a Product, &'a Topic)> {
    let topic = find_topic(topics, topic_id)?;
    let product = find_product(products, product_id)?;
    Ok((product, topic))
}
