//! Construcción de los modelos de vista del panel de alertas.
//!
//! Flujo de cada operación:
//!   1. Peticiones independientes al backend en paralelo (falla en cuanto falla una).
//!   2. Cruce de producto y tema por id (`catalog`).
//!   3. Métricas derivadas sobre los comentarios (`metrics`).
//!   4. Formato de prioridades y fechas (`format`) y ensamblado de la vista.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::try_join;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::{
    catalog::{find_product, resolve_pair},
    client::Backend,
    error::Result,
    format::{
        format_ad_map, format_date, format_date_dotted, format_date_long_zh, parse_timestamp,
        percent, priority_from_alarm_score, priority_of,
    },
    metrics::{
        dominant_source, hotspot_time_range, platform_count, single_platform_most_comments_count,
    },
    models::{Analysis, Comment, LegalAssessment, NewProduct, Product, ScoreSummary, Topic},
    sentiment::{emotion_vector, polarity_triple, subjectivity_triple},
    views::{
        AdvancedAnalysis, DeepForesight, DurationInfo, HotspotTracking, InfoFlowPoint, LawChain,
        ProductList, ProductSummary, SentimentAnalysis, SentimentPanel, TasteComparison,
        WarningDetail, WarningInfo, WarningList, WarningSummary,
    },
    warning_id::WarningId,
};

pub const NO_LEGAL_ADVICE: &str = "此问题暂时没有法律建议。";
pub const UNKNOWN_DURATION: &str = "Unknown";

const MS_PER_DAY: f64 = 86_400_000.0;

/// Servicio sin estado mutable: cada llamada descarga y transforma de nuevo.
#[derive(Clone)]
pub struct WarningService {
    backend: Arc<dyn Backend>,
}

impl WarningService {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    pub async fn list_products(&self) -> Result<ProductList> {
        let products = self.backend.products().await?;
        let products = products
            .into_iter()
            .map(|p| ProductSummary {
                priority: priority_of(p.priority.as_ref()),
                id: p.id,
                name: p.name,
            })
            .collect();
        Ok(ProductList { products })
    }

    pub async fn list_warnings(&self, product_id: &str) -> Result<WarningList> {
        let (topics, products) = try_join!(
            self.backend.topics(product_id),
            self.backend.products()
        )?;
        let product = find_product(&products, product_id)?;

        // Un tema cuyo id no cabe en un WarningId se omite; no invalida la lista.
        let warnings: Vec<WarningSummary> = topics
            .iter()
            .filter_map(|topic| match WarningId::new(product.id.as_str(), topic.id.as_str()) {
                Ok(id) => Some(WarningSummary {
                    id: id.to_string(),
                    topic: topic.content.clone(),
                    product: product.name.clone(),
                    priority: priority_from_alarm_score(topic.alarm_score).as_str().to_string(),
                    date: format_date_dotted(topic.created_time.as_deref()),
                }),
                Err(e) => {
                    warn!(product_id, topic_id = %topic.id, error = %e, "Tema omitido de la lista de alertas");
                    None
                }
            })
            .collect();

        info!(product_id, count = warnings.len(), "Lista de alertas construida");
        Ok(WarningList { warnings })
    }

    pub async fn warning_detail(&self, warning_id: &str) -> Result<WarningDetail> {
        let id: WarningId = warning_id.parse()?;
        let (products, topics, comments, scores) = try_join!(
            self.backend.products(),
            self.backend.topics(id.product_id()),
            self.backend.comments(id.topic_id()),
            self.backend.score_summary(id.topic_id())
        )?;
        let (product, topic) = resolve_pair(&products, &topics, id.product_id(), id.topic_id())?;

        let detail = build_detail(warning_id, product, topic, &comments, &scores);
        info!(warning_id, comments = comments.len(), "Detalle de alerta construido");
        Ok(detail)
    }

    pub async fn advanced_analysis(&self, warning_id: &str) -> Result<AdvancedAnalysis> {
        self.advanced_analysis_at(warning_id, Utc::now()).await
    }

    /// Igual que `advanced_analysis`, con el instante de referencia explícito.
    pub async fn advanced_analysis_at(
        &self,
        warning_id: &str,
        now: DateTime<Utc>,
    ) -> Result<AdvancedAnalysis> {
        let id: WarningId = warning_id.parse()?;
        let (topics, products, law) = try_join!(
            self.backend.topics(id.product_id()),
            self.backend.products(),
            self.backend.legal_assessment(id.topic_id())
        )?;
        let (product, topic) = resolve_pair(&products, &topics, id.product_id(), id.topic_id())?;

        let legal_ready = law.is_ready();
        let analysis = build_advanced(warning_id, product, topic, law, now);
        info!(warning_id, legal_ready, "Análisis avanzado construido");
        Ok(analysis)
    }

    pub async fn sentiment_analysis(&self, warning_id: &str) -> Result<SentimentAnalysis> {
        let id: WarningId = warning_id.parse()?;
        let comments = self.backend.comments(id.topic_id()).await?;

        Ok(SentimentAnalysis {
            emotion: comments.iter().map(|c| emotion_vector(&c.emotion)).collect(),
            polarity: comments.iter().map(|c| polarity_triple(c.score.polarity)).collect(),
            subjectivity: comments
                .iter()
                .map(|c| subjectivity_triple(c.score.subjectivity))
                .collect(),
        })
    }

    pub async fn create_product(&self, product: &NewProduct) -> Result<Product> {
        let created = self.backend.create_product(product).await?;
        info!(product_id = %created.id, name = %created.name, "Producto creado");
        Ok(created)
    }

    /// Pide al backend que genere el dictamen legal y no espera el resultado.
    ///
    /// Los fallos sólo se registran. El `JoinHandle` se puede ignorar.
    pub fn request_legal_advice(&self, topic_id: &str) -> JoinHandle<()> {
        let backend = Arc::clone(&self.backend);
        let topic_id = topic_id.to_string();
        tokio::spawn(async move {
            match backend.request_legal_advice(&topic_id).await {
                Ok(()) => info!(topic_id = %topic_id, "Solicitud de dictamen legal enviada"),
                Err(e) => warn!(topic_id = %topic_id, error = %e, "Error solicitando dictamen legal"),
            }
        })
    }
}

fn info_flow_chart(analyses: &[Analysis]) -> Vec<InfoFlowPoint> {
    analyses
        .iter()
        .map(|a| InfoFlowPoint {
            time: format_date_dotted(a.created_time.as_deref()),
            keyword: a.keyword.clone(),
        })
        .collect()
}

fn info_flow_interpretation(analyses: &[Analysis]) -> String {
    analyses
        .iter()
        .map(|a| format!("{}\n关键词：{}\n情感倾向：{}", a.summary, a.keyword, a.emotion))
        .collect::<Vec<_>>()
        .join("\n")
}

fn turning_points(analyses: &[Analysis]) -> String {
    analyses
        .iter()
        .filter_map(|a| {
            a.turning_point().map(|snap| {
                format!("{}： \n {}\n", format_date_long_zh(a.created_time.as_deref()), snap)
            })
        })
        .collect()
}

fn build_detail(
    warning_id: &str,
    product: &Product,
    topic: &Topic,
    comments: &[Comment],
    scores: &ScoreSummary,
) -> WarningDetail {
    let most_source = dominant_source(comments);
    let emotions = &scores.emotions;

    WarningDetail {
        warning_info: WarningInfo {
            message: topic.content.clone(),
            product: product.name.clone(),
            priority: priority_of(topic.priority.as_ref()),
            alert_value: percent(topic.alarm_score),
            file_name: warning_id.to_string(),
            alert_time: format_date(topic.created_time.as_deref()),
        },
        sentiment_analysis: SentimentPanel {
            file_name: warning_id.to_string(),
            image: String::new(),
            comments: comments.iter().map(|c| c.content.clone()).collect(),
            cognitive_bias: percent(scores.subjectivity).to_string(),
            emotional_tendency: percent(scores.polarity).to_string(),
            dominant_emotion: [
                percent(emotions.sadness),
                percent(emotions.joy),
                percent(emotions.love),
                percent(emotions.anger),
                percent(emotions.fear),
                percent(emotions.surprise),
            ],
        },
        hotspot_tracking: HotspotTracking {
            file_name: warning_id.to_string(),
            info_flow_chart: info_flow_chart(&topic.analyses),
            info_flow_interpretation: info_flow_interpretation(&topic.analyses),
            hotspot_time_range: hotspot_time_range(comments),
            word_cloud: comments
                .iter()
                .map(|c| c.content.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            turning_point_analysis: turning_points(&topic.analyses),
            related_comments_count: comments.len().to_string(),
            platform_count: platform_count(comments).to_string(),
            single_platform_most_comments: single_platform_most_comments_count(comments, &most_source)
                .to_string(),
            most_comments_source: most_source,
        },
    }
}

/// Días completos (redondeando hacia arriba) entre la creación y `now`.
pub fn alert_duration(created_time: Option<&str>, now: DateTime<Utc>) -> String {
    match created_time.and_then(parse_timestamp) {
        Some(created) => {
            let elapsed_ms = (now - created.with_timezone(&Utc)).num_milliseconds().abs();
            let days = (elapsed_ms as f64 / MS_PER_DAY).ceil() as i64;
            format!("{days} Days")
        }
        None => UNKNOWN_DURATION.to_string(),
    }
}

fn legal_text(law: &LegalAssessment) -> String {
    if !law.is_ready() {
        return NO_LEGAL_ADVICE.to_string();
    }
    let risks = law.legal_risks.join("\n");
    let suggestions = law
        .legal_suggestions
        .iter()
        .map(|s| format!("{}\n{}", s.reasoning, s.suggestion))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "法律风险：\n {risks} \n\n法律建议：\n {suggestions} \n\n总结：\n{}",
        law.summary
    )
}

fn build_advanced(
    warning_id: &str,
    product: &Product,
    topic: &Topic,
    law: LegalAssessment,
    now: DateTime<Utc>,
) -> AdvancedAnalysis {
    AdvancedAnalysis {
        warning_info: DurationInfo {
            message: topic.content.clone(),
            product: product.name.clone(),
            priority: priority_of(product.priority.as_ref()),
            alert_duration: alert_duration(topic.created_time.as_deref(), now),
            file_name: warning_id.to_string(),
            alert_time: format_date(topic.created_time.as_deref()),
        },
        deep_foresight: DeepForesight {
            info_flow_chart: info_flow_chart(&topic.analyses),
            trend: topic.predict.clone(),
        },
        law_chain: LawChain {
            detail_result: legal_text(&law),
            legal_suggestions: law.legal_suggestions,
            summary: law.summary,
        },
        taste_comparison: TasteComparison {
            company_product: format_ad_map(&product.self_ad),
            other_product: format_ad_map(&product.other_ad),
        },
    }
}
