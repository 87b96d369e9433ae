//! HTTP 接口集成测试

mod common;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use common::*;
use compair_engine::engine::observer::{ComparisonObserver, TracingObserver};
use compair_engine::models::AppStartTime;
use compair_engine::routes;
use compair_engine::storage::Storage;
use compair_engine::utils::{json_error_handler, path_error_handler};

macro_rules! init_app {
    ($storage:expr) => {{
        let storage: Arc<dyn Storage> = $storage;
        let observer: Arc<dyn ComparisonObserver> = Arc::new(TracingObserver);
        test::init_service(
            App::new()
                .app_data(web::PathConfig::default().error_handler(path_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::Data::new(storage))
                .app_data(web::Data::new(observer))
                .app_data(web::Data::new(AppStartTime {
                    start_datetime: chrono::Utc::now(),
                }))
                .configure(routes::configure_api_routes),
        )
        .await
    }};
}

const USER_HEADER: &str = "X-User-Id";

#[actix_web::test]
async fn test_requests_without_identity_are_rejected() {
    let app = init_app!(setup().await);

    let req = test::TestRequest::get()
        .uri("/api/v1/assignments/1/comparisons")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/v1/assignments/1/comparisons")
        .insert_header((USER_HEADER, "not-a-number"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1001);
}

#[actix_web::test]
async fn test_next_pair_and_submit_over_http() {
    let app = init_app!(setup().await);

    let req = test::TestRequest::get()
        .uri("/api/v1/assignments/1/comparisons")
        .insert_header((USER_HEADER, "1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);

    let data = &body["data"];
    let comparison_id = data["comparison"]["id"].as_i64().expect("缺少比较 ID");
    let answer1_id = data["answer1"]["id"].as_i64().expect("缺少答案 ID");
    assert_eq!(data["is_resume"], false);
    assert_eq!(data["current"], 1);
    assert_eq!(data["comparisons_required"], 3);
    assert_eq!(data["criteria"].as_array().map(Vec::len), Some(2));
    // 学生视角不返回作者
    assert!(data["answer1"].get("user_id").is_none());

    let uri = format!("/api/v1/assignments/1/comparisons/{comparison_id}");
    let submission = json!({
        "comparison_criteria": [
            {"criterion_id": 1, "winner": "answer1", "content": "stronger thesis"},
            {"criterion_id": 2, "winner": answer1_id}
        ]
    });

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header((USER_HEADER, "1"))
        .set_json(&submission)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["comparison"]["completed"], true);
    assert_eq!(body["data"]["comparison"]["winner"], "answer1");

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header((USER_HEADER, "1"))
        .set_json(&submission)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3006);
}

#[actix_web::test]
async fn test_malformed_input_returns_bad_request() {
    let app = init_app!(setup().await);

    let req = test::TestRequest::post()
        .uri("/api/v1/assignments/1/comparisons/1")
        .insert_header((USER_HEADER, "1"))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"comparison_criteria\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1000);

    let req = test::TestRequest::get()
        .uri("/api/v1/assignments/abc/comparisons")
        .insert_header((USER_HEADER, "1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_error_statuses_follow_error_kind() {
    let app = init_app!(setup().await);

    // 非课程成员
    let req = test::TestRequest::get()
        .uri("/api/v1/assignments/1/comparisons")
        .insert_header((USER_HEADER, OUTSIDER.to_string()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3001);

    // 作业不存在
    let req = test::TestRequest::get()
        .uri("/api/v1/assignments/77/comparisons")
        .insert_header((USER_HEADER, "1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // 学生无权查看得分
    let req = test::TestRequest::get()
        .uri("/api/v1/assignments/1/scores")
        .insert_header((USER_HEADER, "2"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_comparison_examples_and_scores_over_http() {
    let app = init_app!(setup().await);
    let instructor = INSTRUCTOR.to_string();

    let req = test::TestRequest::post()
        .uri("/api/v1/assignments/1/comparison-examples")
        .insert_header((USER_HEADER, instructor.as_str()))
        .set_json(json!({"answer1_id": answer_of(1), "answer2_id": answer_of(2)}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let example_id = body["data"]["id"].as_i64().expect("缺少示例 ID");

    let req = test::TestRequest::get()
        .uri("/api/v1/assignments/1/comparison-examples")
        .insert_header((USER_HEADER, "3"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/assignments/1/comparison-examples/{example_id}"))
        .insert_header((USER_HEADER, instructor.as_str()))
        .set_json(json!({"answer1_id": answer_of(3), "answer2_id": answer_of(4)}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["answer1_id"], answer_of(3));
    assert_eq!(body["data"]["answer2_id"], answer_of(4));

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/assignments/1/comparison-examples/{example_id}"))
        .insert_header((USER_HEADER, "3"))
        .set_json(json!({"answer1_id": answer_of(1), "answer2_id": answer_of(2)}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/assignments/1/comparison-examples/{example_id}"))
        .insert_header((USER_HEADER, instructor.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/v1/assignments/1/scores/recompute")
        .insert_header((USER_HEADER, instructor.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["comparisons_counted"], 0);

    let req = test::TestRequest::get()
        .uri("/api/v1/assignments/1/scores")
        .insert_header((USER_HEADER, instructor.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(6));
}

#[actix_web::test]
async fn test_system_settings_are_public() {
    let app = init_app!(setup().await);

    let req = test::TestRequest::get()
        .uri("/api/v1/system/settings")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let algorithms = body["data"]["pairing_algorithms"]
        .as_array()
        .expect("缺少配对算法列表");
    assert!(algorithms.contains(&json!("random")));
    assert!(algorithms.contains(&json!("adaptive")));
}
