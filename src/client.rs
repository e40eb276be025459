//! Acceso HTTP al backend totruth.
//!
//! `Backend` es la frontera con el servicio remoto; `HttpBackend` la
//! implementa con reqwest. Las pruebas usan implementaciones en memoria.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use tracing::{debug, warn};
use url::Url;

use crate::{
    config::AppConfig,
    error::{AdapterError, Result},
    models::{
        Comment, CommentsEnvelope, LegalAssessment, NewProduct, Product, ProductsEnvelope,
        ScoreSummary, Topic, TopicsEnvelope,
    },
};

#[async_trait]
pub trait Backend: Send + Sync {
    async fn products(&self) -> Result<Vec<Product>>;
    async fn topics(&self, product_id: &str) -> Result<Vec<Topic>>;
    async fn comments(&self, topic_id: &str) -> Result<Vec<Comment>>;
    async fn score_summary(&self, topic_id: &str) -> Result<ScoreSummary>;
    async fn legal_assessment(&self, topic_id: &str) -> Result<LegalAssessment>;
    async fn create_product(&self, product: &NewProduct) -> Result<Product>;
    /// Lanza la generación del dictamen legal; la respuesta no se lee.
    async fn request_legal_advice(&self, topic_id: &str) -> Result<()>;
}

pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// El plazo por petición se fija aquí; no hay reintentos.
    pub fn from_config(cfg: &AppConfig) -> Result<Self> {
        let client = Client::builder().timeout(cfg.backend_timeout).build()?;
        Ok(Self::with_client(client, &cfg.backend_base_url))
    }

    pub fn with_client(client: Client, base_url: &Url) -> Self {
        Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let start = Instant::now();
        let result: Result<T> = async {
            let resp = self.client.get(self.url(path)).query(query).send().await?;
            read_json(resp).await
        }
        .await;
        let elapsed_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => debug!(path, ?query, elapsed_ms, "GET backend"),
            Err(e) => warn!(path, ?query, elapsed_ms, error = %e, "GET backend fallido"),
        }
        result
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<reqwest::Response> {
        let start = Instant::now();
        let result: Result<reqwest::Response> = async {
            let resp = self.client.post(self.url(path)).json(body).send().await?;
            check_status(resp).await
        }
        .await;
        let elapsed_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => debug!(path, elapsed_ms, "POST backend"),
            Err(e) => warn!(path, elapsed_ms, error = %e, "POST backend fallido"),
        }
        result
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(AdapterError::Api {
            status: status.as_u16(),
            message: body,
        });
    }
    Ok(resp)
}

async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let resp = check_status(resp).await?;
    let bytes = resp.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl Backend for HttpBackend {
    async fn products(&self) -> Result<Vec<Product>> {
        let env: ProductsEnvelope = self.get_json("/product/", &[]).await?;
        Ok(env.products)
    }

    async fn topics(&self, product_id: &str) -> Result<Vec<Topic>> {
        let env: TopicsEnvelope = self
            .get_json("/topic/", &[("product_id", product_id)])
            .await?;
        Ok(env.topics)
    }

    async fn comments(&self, topic_id: &str) -> Result<Vec<Comment>> {
        let env: CommentsEnvelope = self
            .get_json("/comment/", &[("topic_id", topic_id)])
            .await?;
        Ok(env.comments)
    }

    async fn score_summary(&self, topic_id: &str) -> Result<ScoreSummary> {
        self.get_json("/score/", &[("topic_id", topic_id)]).await
    }

    async fn legal_assessment(&self, topic_id: &str) -> Result<LegalAssessment> {
        self.get_json("/law/", &[("topic_id", topic_id)]).await
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product> {
        let resp = self.post_json("/product/", product).await?;
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn request_legal_advice(&self, topic_id: &str) -> Result<()> {
        self.post_json("/law/", &json!({ "topic_id": topic_id })).await?;
        Ok(())
    }
}
