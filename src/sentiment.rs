//! Ponderaciones de visualización por comentario para los gráficos de sentimiento.
//!
//! Las fórmulas deben reproducirse exactamente: el panel compara los valores
//! con los que ya muestra.

use crate::models::Emotions;

/// `[1+tristeza, 1-tristeza, 1+amor, 1-amor, 1+miedo, 1-miedo]`
pub fn emotion_vector(emotion: &Emotions) -> [f64; 6] {
    [
        1.0 + emotion.sadness,
        1.0 - emotion.sadness,
        1.0 + emotion.love,
        1.0 - emotion.love,
        1.0 + emotion.fear,
        1.0 - emotion.fear,
    ]
}

/// (negativo, neutro, positivo) para una polaridad en [-1, 1].
pub fn polarity_triple(x: f64) -> [f64; 3] {
    [
        0.05 + 0.85 * (1.0 - x).powi(2) / 4.0,
        0.05 + 0.85 * (1.0 - x.powi(2)) / 2.0,
        0.05 + 0.85 * (1.0 + x).powi(2) / 4.0,
    ]
}

/// (objetivo, neutro, subjetivo) para una subjetividad en [0, 1].
pub fn subjectivity_triple(x: f64) -> [f64; 3] {
    [
        0.1 + 0.8 * (1.0 - x),
        0.1 + 0.8 * (1.0 - (2.0 * x - 1.0).abs()),
        0.1 + 0.8 * x,
    ]
}
