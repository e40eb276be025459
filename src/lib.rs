//! Adaptador entre el backend totruth y el panel de alertas: descarga
//! productos, temas, comentarios, puntuaciones y dictámenes legales y los
//! transforma en los modelos de vista del panel.

pub mod aggregator;
pub mod api;
pub mod app_state;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod metrics;
pub mod models;
pub mod sentiment;
pub mod views;
pub mod warning_id;
