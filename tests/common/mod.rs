//! Backend en memoria para las pruebas de integración.

#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use serde_json::{json, Value};
use totruth_dashboard::{
    aggregator::WarningService,
    client::Backend,
    error::{AdapterError, Result},
    models::{Comment, LegalAssessment, NewProduct, Product, RecordId, ScoreSummary, Topic},
};

#[derive(Default)]
pub struct FixtureBackend {
    pub products: Vec<Product>,
    pub topics: Vec<Topic>,
    pub comments: Vec<Comment>,
    pub score: ScoreSummary,
    pub law: LegalAssessment,
    /// Recurso que debe fallar con error de red ("products", "topics", ...).
    pub failing: Option<&'static str>,
    pub calls: AtomicUsize,
    pub legal_requests: Mutex<Vec<String>>,
}

impl FixtureBackend {
    fn hit(&self, resource: &'static str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing == Some(resource) {
            return Err(AdapterError::Network(format!("{resource}: conexión rechazada")));
        }
        Ok(())
    }
}

#[async_trait]
impl Backend for FixtureBackend {
    async fn products(&self) -> Result<Vec<Product>> {
        self.hit("products")?;
        Ok(self.products.clone())
    }

    async fn topics(&self, product_id: &str) -> Result<Vec<Topic>> {
        self.hit("topics")?;
        let wanted = RecordId::new(product_id);
        Ok(self
            .topics
            .iter()
            .filter(|t| t.product_id.as_ref().map_or(true, |p| *p == wanted))
            .cloned()
            .collect())
    }

    async fn comments(&self, _topic_id: &str) -> Result<Vec<Comment>> {
        self.hit("comments")?;
        Ok(self.comments.clone())
    }

    async fn score_summary(&self, _topic_id: &str) -> Result<ScoreSummary> {
        self.hit("score")?;
        Ok(self.score.clone())
    }

    async fn legal_assessment(&self, _topic_id: &str) -> Result<LegalAssessment> {
        self.hit("law")?;
        Ok(self.law.clone())
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product> {
        self.hit("create")?;
        let mut body = serde_json::to_value(product)?;
        body["id"] = json!(self.products.len() + 1);
        Ok(serde_json::from_value(body)?)
    }

    async fn request_legal_advice(&self, topic_id: &str) -> Result<()> {
        self.hit("legal_request")?;
        self.legal_requests
            .lock()
            .unwrap()
            .push(topic_id.to_string());
        Ok(())
    }
}

pub fn from_json<T: serde::de::DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).expect("fixture inválida")
}

/// Producto 1 con dos temas; el tema 7 tiene historial de análisis.
pub fn fixture() -> FixtureBackend {
    FixtureBackend {
        products: from_json(json!([
            {
                "id": 1,
                "name": "Auriculares X",
                "priority": 85,
                "self_ad": {"1": "Cancelación de ruido", "2": "30h de batería"},
                "other_ad": {"1": "Más barato"}
            },
            {"id": 2, "name": "Reloj Y", "priority": "Low"}
        ])),
        topics: from_json(json!([
            {
                "id": 7,
                "product_id": 1,
                "content": "Quejas por sobrecalentamiento",
                "alarm_score": 2,
                "created_time": "2024-03-07T00:00:00",
                "predict": "Al alza",
                "analyses": [
                    {
                        "created_time": "2024-03-07T10:00:00",
                        "keyword": "calor",
                        "summary": "Primeras quejas",
                        "emotion": "fear",
                        "snap": ""
                    },
                    {
                        "created_time": "2024-03-08T10:00:00",
                        "keyword": "quemadura",
                        "summary": "Se viraliza un vídeo",
                        "emotion": "anger",
                        "snap": "Un influencer publica el vídeo"
                    }
                ]
            },
            {
                "id": "8",
                "product_id": "1",
                "content": "Dudas sobre la garantía",
                "alarm_score": 1,
                "created_time": "fecha rota",
                "analyses": []
            }
        ])),
        comments: from_json(json!([
            {
                "topic_id": 7, "source": "weibo", "content": "se calienta mucho",
                "created_time": "2024-03-08T09:00:00",
                "emotion": {"sadness": 0.5, "joy": 0.0, "love": 0.25, "anger": 0.75, "fear": 0.5, "surprise": 0.0},
                "score": {"polarity": 0.0, "subjectivity": 0.5}
            },
            {
                "topic_id": 7, "source": "douyin", "content": "me quemé",
                "created_time": "2024-03-07T20:00:00",
                "emotion": {"sadness": 0.0, "joy": 0.0, "love": 0.0, "anger": 1.0, "fear": 1.0, "surprise": 0.0},
                "score": {"polarity": -1.0, "subjectivity": 1.0}
            },
            {
                "topic_id": 7, "source": "weibo", "content": "a mí no me pasa",
                "created_time": "ilegible",
                "emotion": {"sadness": 0.0, "joy": 0.5, "love": 0.5, "anger": 0.0, "fear": 0.0, "surprise": 0.25},
                "score": {"polarity": 1.0, "subjectivity": 0.0}
            }
        ])),
        score: from_json(json!({
            "polarity": -0.456,
            "subjectivity": 0.614,
            "emotions": {"sadness": 0.12, "joy": 0.05, "love": 0.08, "anger": 0.55, "fear": 0.17, "surprise": 0.03}
        })),
        law: from_json(json!({
            "topic_id": 7,
            "message": "success",
            "legal_risks": ["Responsabilidad por producto defectuoso"],
            "legal_suggestions": [{"reasoning": "Riesgo de lesiones", "suggestion": "Emitir un aviso de seguridad"}],
            "summary": "Riesgo alto"
        })),
        ..FixtureBackend::default()
    }
}

pub fn service(backend: FixtureBackend) -> (WarningService, Arc<FixtureBackend>) {
    let backend = Arc::new(backend);
    (WarningService::new(backend.clone()), backend)
}
