//! Funciones puras de formato: prioridades y fechas para el panel.
//!
//! Hay dos escalas de prioridad y tres formatos de fecha porque cada
//! superficie del panel espera el suyo; no deben mezclarse.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::models::RawPriority;

pub const UNKNOWN_DATE: &str = "Unknown date";
pub const UNKNOWN_DATE_ZH: &str = "未知日期";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityLevel {
    High,
    Medium,
    Low,
}

impl PriorityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityLevel::High => "High",
            PriorityLevel::Medium => "Medium",
            PriorityLevel::Low => "Low",
        }
    }
}

/// Prioridad de producto: puntuación 0-100 o etiqueta que se respeta tal cual.
pub fn priority_of(value: Option<&RawPriority>) -> String {
    match value {
        Some(RawPriority::Score(score)) => {
            let level = if *score >= 80.0 {
                PriorityLevel::High
            } else if *score >= 50.0 {
                PriorityLevel::Medium
            } else {
                PriorityLevel::Low
            };
            level.as_str().to_string()
        }
        Some(RawPriority::Label(label)) if !label.is_empty() => label.clone(),
        _ => PriorityLevel::Medium.as_str().to_string(),
    }
}

/// Prioridad de un tema a partir de su nivel de alarma discreto (0, 1, 2).
pub fn priority_from_alarm_score(score: f64) -> PriorityLevel {
    if score == 2.0 {
        PriorityLevel::High
    } else if score == 1.0 {
        PriorityLevel::Medium
    } else {
        PriorityLevel::Low
    }
}

/// Interpreta las marcas de tiempo del backend.
///
/// Acepta RFC 3339 y las variantes sin zona (`2024-01-01T10:00:00`,
/// `2024-01-01 10:00:00`, `2024-01-01`); sin zona se asume UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    let utc = FixedOffset::east_opt(0)?;
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(naive.and_utc().with_timezone(&utc));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().with_timezone(&utc))
}

fn parse_opt(raw: Option<&str>) -> Option<DateTime<FixedOffset>> {
    raw.and_then(parse_timestamp)
}

/// `Mon.D YYYY`, p. ej. `Jan.5 2024`.
pub fn format_date(raw: Option<&str>) -> String {
    match parse_opt(raw) {
        Some(dt) => format!("{}.{} {}", dt.format("%b"), dt.day(), dt.year()),
        None => UNKNOWN_DATE.to_string(),
    }
}

/// `YYYY.M.D`, p. ej. `2024.1.5`.
pub fn format_date_dotted(raw: Option<&str>) -> String {
    match parse_opt(raw) {
        Some(dt) => dotted(&dt),
        None => UNKNOWN_DATE_ZH.to_string(),
    }
}

pub(crate) fn dotted(dt: &DateTime<FixedOffset>) -> String {
    format!("{}.{}.{}", dt.year(), dt.month(), dt.day())
}

/// `YYYY年M月D日`, sólo para la narrativa de puntos de inflexión.
pub fn format_date_long_zh(raw: Option<&str>) -> String {
    match parse_opt(raw) {
        Some(dt) => format!("{}年{}月{}日", dt.year(), dt.month(), dt.day()),
        None => UNKNOWN_DATE_ZH.to_string(),
    }
}

/// Líneas `clave. valor` de un mapa de anuncios, en el orden recibido.
pub fn format_ad_map(ads: &serde_json::Map<String, Value>) -> String {
    ads.iter()
        .map(|(key, value)| match value {
            Value::String(s) => format!("{key}. {s}"),
            other => format!("{key}. {other}"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escala 0-1 a porcentaje entero redondeado.
pub fn percent(value: f64) -> i64 {
    (value * 100.0).round() as i64
}
