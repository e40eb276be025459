//! Métricas derivadas sobre los comentarios de un tema.

use std::collections::HashSet;

use crate::{
    format::{dotted, parse_timestamp},
    models::Comment,
};

pub const UNKNOWN: &str = "Unknown";

/// Rango de fechas de los comentarios: `YYYY.M.D\n-\nYYYY.M.D`.
///
/// Las marcas ilegibles se descartan; sin ninguna válida devuelve `Unknown`.
pub fn hotspot_time_range(comments: &[Comment]) -> String {
    let mut stamps = comments
        .iter()
        .filter_map(|c| c.created_time.as_deref().and_then(parse_timestamp));

    let Some(first) = stamps.next() else {
        return UNKNOWN.to_string();
    };
    let (min, max) = stamps.fold((first, first), |(min, max), ts| {
        (if ts < min { ts } else { min }, if ts > max { ts } else { max })
    });

    format!("{}\n-\n{}", dotted(&min), dotted(&max))
}

/// Recuento de comentarios por plataforma, en orden de primera aparición.
///
/// Los comentarios sin plataforma no cuentan.
pub fn source_counts(comments: &[Comment]) -> Vec<(&str, usize)> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for source in comments.iter().map(|c| c.source.as_str()).filter(|s| !s.is_empty()) {
        match counts.iter_mut().find(|(name, _)| *name == source) {
            Some((_, n)) => *n += 1,
            None => counts.push((source, 1)),
        }
    }
    counts
}

/// Plataforma con más comentarios; en caso de empate, la que apareció antes.
pub fn dominant_source(comments: &[Comment]) -> String {
    let mut best: Option<(&str, usize)> = None;
    for (source, count) in source_counts(comments) {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((source, count));
        }
    }
    best.map(|(source, _)| source.to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

pub fn platform_count(comments: &[Comment]) -> usize {
    comments
        .iter()
        .map(|c| c.source.as_str())
        .collect::<HashSet<_>>()
        .len()
}

pub fn single_platform_most_comments_count(comments: &[Comment], source: &str) -> usize {
    comments.iter().filter(|c| c.source == source).count()
}
