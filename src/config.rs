//! Carga y gestión de configuración de la aplicación (backend totruth + servidor).

use std::{env, time::Duration};
use anyhow::{anyhow, Result};
use url::Url;

const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Configuración completa de la aplicación.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub backend_base_url: Url,
    pub backend_timeout: Duration,
    pub server_addr: String,
    pub frontend_dir: String,
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno (usando .env si existe).
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("BACKEND_BASE_URL")
            .map_err(|_| anyhow!("Falta BACKEND_BASE_URL en el entorno"))?;
        let backend_base_url = parse_base_url(&base_url)?;

        let backend_timeout = match env::var("BACKEND_TIMEOUT_MS") {
            Ok(raw) => parse_timeout(&raw)?,
            Err(_) => Duration::from_millis(DEFAULT_TIMEOUT_MS),
        };

        let server_addr =
            env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:3322".to_string());
        let frontend_dir =
            env::var("FRONTEND_DIR").unwrap_or_else(|_| "frontend".to_string());

        Ok(Self {
            backend_base_url,
            backend_timeout,
            server_addr,
            frontend_dir,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| anyhow!("BACKEND_BASE_URL no es una URL válida ({raw}): {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(anyhow!("Esquema no soportado en BACKEND_BASE_URL: {other}")),
    }
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    let ms: u64 = raw
        .trim()
        .parse()
        .map_err(|_| anyhow!("BACKEND_TIMEOUT_MS debe ser un entero en milisegundos: {raw}"))?;
    if ms == 0 {
        return Err(anyhow!("BACKEND_TIMEOUT_MS debe ser mayor que cero"));
    }
    Ok(Duration::from_millis(ms))
}
