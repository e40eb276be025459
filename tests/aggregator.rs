mod common;

use std::sync::atomic::Ordering;

use chrono::{TimeZone, Utc};
use common::{fixture, from_json, service};
use tokio_test::{assert_err, assert_ok};
use totruth_dashboard::{
    aggregator::NO_LEGAL_ADVICE,
    error::{AdapterError, ResourceKind},
    models::{NewProduct, Topic},
    views::{InfoFlowPoint, WarningSummary},
};

#[tokio::test]
async fn list_products_maps_priorities() {
    let (svc, _) = service(fixture());
    let list = assert_ok!(svc.list_products().await);
    let rendered: Vec<_> = list
        .products
        .iter()
        .map(|p| (p.id.as_str(), p.name.as_str(), p.priority.as_str()))
        .collect();
    assert_eq!(rendered, vec![("1", "Auriculares X", "High"), ("2", "Reloj Y", "Low")]);
}

#[tokio::test]
async fn list_warnings_builds_one_row_per_topic() {
    let (svc, _) = service(fixture());
    let list = assert_ok!(svc.list_warnings("1").await);
    assert_eq!(
        list.warnings,
        vec![
            WarningSummary {
                id: "Pro_1_7".into(),
                topic: "Quejas por sobrecalentamiento".into(),
                product: "Auriculares X".into(),
                priority: "High".into(),
                date: "2024.3.7".into(),
            },
            WarningSummary {
                id: "Pro_1_8".into(),
                topic: "Dudas sobre la garantía".into(),
                product: "Auriculares X".into(),
                priority: "Medium".into(),
                date: "未知日期".into(),
            },
        ]
    );
}

#[tokio::test]
async fn list_warnings_skips_topics_that_cannot_form_an_id() {
    let mut backend = fixture();
    let odd: Topic = from_json(serde_json::json!({
        "id": "t_9", "product_id": 1, "content": "Id con guion bajo", "alarm_score": 1
    }));
    backend.topics.insert(1, odd);
    let (svc, _) = service(backend);

    let list = assert_ok!(svc.list_warnings("1").await);
    let ids: Vec<_> = list.warnings.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, vec!["Pro_1_7", "Pro_1_8"]);
}

#[tokio::test]
async fn list_warnings_ids_use_the_normalized_product_id() {
    let (svc, _) = service(fixture());
    for requested in [" 1 ", "1.0"] {
        let list = assert_ok!(svc.list_warnings(requested).await);
        assert_eq!(list.warnings[0].id, "Pro_1_7", "{requested:?}");
        assert_eq!(list.warnings[1].id, "Pro_1_8");
    }
}

#[tokio::test]
async fn list_warnings_fails_for_unknown_product() {
    let (svc, _) = service(fixture());
    let err = assert_err!(svc.list_warnings("3").await);
    assert!(matches!(err, AdapterError::NotFound { kind: ResourceKind::Product, ref id } if id == "3"));
}

#[tokio::test]
async fn warning_detail_assembles_all_panels() {
    let (svc, backend) = service(fixture());
    let detail = assert_ok!(svc.warning_detail("Pro_1_7").await);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 4);

    let info = &detail.warning_info;
    assert_eq!(info.message, "Quejas por sobrecalentamiento");
    assert_eq!(info.product, "Auriculares X");
    assert_eq!(info.priority, "Medium");
    assert_eq!(info.alert_value, 200);
    assert_eq!(info.file_name, "Pro_1_7");
    assert_eq!(info.alert_time, "Mar.7 2024");

    let sentiment = &detail.sentiment_analysis;
    assert_eq!(sentiment.comments.len(), 3);
    assert_eq!(sentiment.image, "");
    assert_eq!(sentiment.cognitive_bias, "61");
    assert_eq!(sentiment.emotional_tendency, "-46");
    assert_eq!(sentiment.dominant_emotion, [12, 5, 8, 55, 17, 3]);

    let hotspot = &detail.hotspot_tracking;
    assert_eq!(
        hotspot.info_flow_chart,
        vec![
            InfoFlowPoint { time: "2024.3.7".into(), keyword: "calor".into() },
            InfoFlowPoint { time: "2024.3.8".into(), keyword: "quemadura".into() },
        ]
    );
    assert_eq!(
        hotspot.info_flow_interpretation,
        "Primeras quejas\n关键词：calor\n情感倾向：fear\nSe viraliza un vídeo\n关键词：quemadura\n情感倾向：anger"
    );
    assert_eq!(hotspot.hotspot_time_range, "2024.3.7\n-\n2024.3.8");
    assert_eq!(hotspot.word_cloud, "se calienta mucho me quemé a mí no me pasa");
    assert_eq!(
        hotspot.turning_point_analysis,
        "2024年3月8日： \n Un influencer publica el vídeo\n"
    );
    assert_eq!(hotspot.related_comments_count, "3");
    assert_eq!(hotspot.platform_count, "2");
    assert_eq!(hotspot.most_comments_source, "weibo");
    assert_eq!(hotspot.single_platform_most_comments, "2");
}

#[tokio::test]
async fn warning_detail_fails_when_topic_is_missing() {
    let (svc, _) = service(fixture());
    let err = assert_err!(svc.warning_detail("Pro_1_99").await);
    assert!(matches!(err, AdapterError::NotFound { kind: ResourceKind::Topic, ref id } if id == "99"));
}

#[tokio::test]
async fn malformed_warning_id_never_reaches_backend() {
    let (svc, backend) = service(fixture());
    for bad in ["Pro_1", "Pro_1_7_9", "1_7", ""] {
        let err = assert_err!(svc.warning_detail(bad).await);
        assert!(matches!(err, AdapterError::InvalidWarningId(_)));
        assert_err!(svc.advanced_analysis(bad).await);
        assert_err!(svc.sentiment_analysis(bad).await);
    }
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn any_failed_fetch_fails_the_whole_operation() {
    for resource in ["products", "topics", "comments", "score"] {
        let mut backend = fixture();
        backend.failing = Some(resource);
        let (svc, _) = service(backend);
        let err = assert_err!(svc.warning_detail("Pro_1_7").await);
        assert!(err.is_transport(), "{resource}: {err}");
    }

    let mut backend = fixture();
    backend.failing = Some("law");
    let (svc, _) = service(backend);
    let err = assert_err!(svc.advanced_analysis("Pro_1_7").await);
    assert!(matches!(err, AdapterError::Network(_)));
}

#[tokio::test]
async fn advanced_analysis_rounds_duration_up() {
    let (svc, _) = service(fixture());
    // 3,5 días después de la creación del tema
    let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
    let analysis = assert_ok!(svc.advanced_analysis_at("Pro_1_7", now).await);

    let info = &analysis.warning_info;
    assert_eq!(info.alert_duration, "4 Days");
    assert_eq!(info.priority, "High");
    assert_eq!(info.alert_time, "Mar.7 2024");
    assert_eq!(info.file_name, "Pro_1_7");

    assert_eq!(analysis.deep_foresight.trend.as_deref(), Some("Al alza"));
    assert_eq!(analysis.deep_foresight.info_flow_chart.len(), 2);
    assert_eq!(
        analysis.law_chain.detail_result,
        "法律风险：\n Responsabilidad por producto defectuoso \n\n法律建议：\n Riesgo de lesiones\nEmitir un aviso de seguridad \n\n总结：\nRiesgo alto"
    );
    assert_eq!(analysis.law_chain.summary, "Riesgo alto");
    assert_eq!(analysis.law_chain.legal_suggestions.len(), 1);
    assert_eq!(
        analysis.taste_comparison.company_product,
        "1. Cancelación de ruido\n2. 30h de batería"
    );
    assert_eq!(analysis.taste_comparison.other_product, "1. Más barato");
}

#[tokio::test]
async fn advanced_analysis_without_legal_result_uses_placeholder() {
    let mut backend = fixture();
    backend.law.message = "pending".into();
    let (svc, _) = service(backend);
    let analysis = assert_ok!(svc.advanced_analysis("Pro_1_7").await);
    assert_eq!(analysis.law_chain.detail_result, NO_LEGAL_ADVICE);
}

#[tokio::test]
async fn sentiment_analysis_weights_each_comment() {
    let (svc, _) = service(fixture());
    let series = assert_ok!(svc.sentiment_analysis("Pro_1_7").await);
    assert_eq!(series.emotion.len(), 3);
    assert_eq!(series.emotion[0], [1.5, 0.5, 1.25, 0.75, 1.5, 0.5]);

    let close = |a: [f64; 3], b: [f64; 3]| a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-12);
    assert!(close(series.polarity[0], [0.2625, 0.475, 0.2625]));
    assert!(close(series.polarity[1], [0.9, 0.05, 0.05]));
    assert!(close(series.polarity[2], [0.05, 0.05, 0.9]));
    assert!(close(series.subjectivity[0], [0.5, 0.9, 0.5]));
    assert!(close(series.subjectivity[1], [0.1, 0.1, 0.9]));
    assert!(close(series.subjectivity[2], [0.9, 0.1, 0.1]));
}

#[tokio::test]
async fn create_product_returns_backend_record() {
    let (svc, _) = service(fixture());
    let new_product: NewProduct = serde_json::from_value(serde_json::json!({
        "name": "Altavoz Z",
        "priority": 40,
        "self_ad": {"1": "Resistente al agua"}
    }))
    .unwrap();
    let created = assert_ok!(svc.create_product(&new_product).await);
    assert_eq!(created.id.as_str(), "3");
    assert_eq!(created.name, "Altavoz Z");
}

#[tokio::test]
async fn legal_advice_is_fire_and_forget() {
    let (svc, backend) = service(fixture());
    let handle = svc.request_legal_advice("7");
    assert_ok!(handle.await);
    assert_eq!(*backend.legal_requests.lock().unwrap(), vec!["7".to_string()]);

    let mut failing = fixture();
    failing.failing = Some("legal_request");
    let (svc, backend) = service(failing);
    // el fallo se registra pero no se propaga
    assert_ok!(svc.request_legal_advice("7").await);
    assert!(backend.legal_requests.lock().unwrap().is_empty());
}
