//! Modelos de vista que consume el panel. Los nombres de campo son los que
//! espera el frontend, por eso se renombran a camelCase.

use serde::Serialize;

use crate::models::{LegalSuggestion, RecordId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub id: RecordId,
    pub name: String,
    pub priority: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductList {
    pub products: Vec<ProductSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarningSummary {
    pub id: String,
    pub topic: String,
    pub product: String,
    pub priority: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WarningList {
    pub warnings: Vec<WarningSummary>,
}

/// Punto de la línea temporal de flujo de información.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoFlowPoint {
    pub time: String,
    pub keyword: String,
}

// --- Detalle de alerta ---

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarningInfo {
    pub message: String,
    pub product: String,
    pub priority: String,
    pub alert_value: i64,
    pub file_name: String,
    pub alert_time: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentPanel {
    pub file_name: String,
    pub image: String,
    pub comments: Vec<String>,
    pub cognitive_bias: String,
    pub emotional_tendency: String,
    /// tristeza, alegría, amor, ira, miedo, sorpresa (0-100)
    pub dominant_emotion: [i64; 6],
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotTracking {
    pub file_name: String,
    pub info_flow_chart: Vec<InfoFlowPoint>,
    pub info_flow_interpretation: String,
    pub hotspot_time_range: String,
    pub word_cloud: String,
    pub turning_point_analysis: String,
    pub related_comments_count: String,
    pub platform_count: String,
    pub most_comments_source: String,
    pub single_platform_most_comments: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarningDetail {
    pub warning_info: WarningInfo,
    pub sentiment_analysis: SentimentPanel,
    pub hotspot_tracking: HotspotTracking,
}

// --- Análisis avanzado ---

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationInfo {
    pub message: String,
    pub product: String,
    pub priority: String,
    pub alert_duration: String,
    pub file_name: String,
    pub alert_time: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepForesight {
    pub info_flow_chart: Vec<InfoFlowPoint>,
    pub trend: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LawChain {
    #[serde(rename = "detailresult")]
    pub detail_result: String,
    #[serde(rename = "legalsuggestions")]
    pub legal_suggestions: Vec<LegalSuggestion>,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TasteComparison {
    pub company_product: String,
    pub other_product: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedAnalysis {
    pub warning_info: DurationInfo,
    pub deep_foresight: DeepForesight,
    pub law_chain: LawChain,
    pub taste_comparison: TasteComparison,
}

// --- Análisis de sentimiento ---

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentAnalysis {
    pub emotion: Vec<[f64; 6]>,
    pub polarity: Vec<[f64; 3]>,
    pub subjectivity: Vec<[f64; 3]>,
}
