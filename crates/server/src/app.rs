use crate::{
    doc::ApiDoc,
    routes::{course, health, lesson, rating, root},
    state::AppState,
};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, put},
};
use log::warn;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Builds the HTTP router with every endpoint, the API docs and middleware
pub fn router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health))
        .route("/courses", get(course::get_courses))
        .route("/courses/{course}", get(course::get_course_by_slug))
        .route("/classes/{class_id}", get(lesson::get_class_by_id))
        .route(
            "/courses/{course}/ratings",
            get(rating::list_ratings).post(rating::create_rating),
        )
        .route(
            "/courses/{course}/ratings/stats",
            get(rating::get_rating_stats),
        )
        .route(
            "/courses/{course}/ratings/user/{user_id}",
            get(rating::get_user_rating),
        )
        .route(
            "/courses/{course}/ratings/{user_id}",
            put(rating::update_rating).delete(rating::delete_rating),
        )
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(CompressionLayer::new())
                .layer(cors_layer(cors_origins)),
        )
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin '{origin}'");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use database::test_utils::{insert_course, insert_lesson, insert_teacher, setup_db};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn test_app() -> (Router, AppState) {
        let state = AppState::new(setup_db().await);
        let app = router(state.clone(), &["http://localhost:3000".to_owned()]);
        (app, state)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|e| panic!("{uri} returned a non-JSON body: {e}"))
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_root_and_health() {
        let (app, state) = test_app().await;
        insert_course(&state.db, "health").await;

        let (status, body) = send(&app, "GET", "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Bienvenido a Platziflix API");

        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], true);
        assert_eq!(body["courses_count"], 1);
    }

    #[tokio::test]
    async fn test_rating_lifecycle() {
        let (app, state) = test_app().await;
        let course = insert_course(&state.db, "lifecycle").await;
        let base = format!("/courses/{}/ratings", course.id);

        let (status, body) = send(
            &app,
            "POST",
            &base,
            Some(json!({"user_id": 1, "rating": 5})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["rating"], 5);
        assert_eq!(body["user_id"], 1);

        let (status, body) = send(&app, "GET", &format!("{base}/stats"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["average_rating"], 5.0);
        assert_eq!(body["total_ratings"], 1);
        assert_eq!(body["rating_distribution"]["5"], 1);

        let (status, body) = send(&app, "PUT", &format!("{base}/1"), Some(json!({"rating": 3}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rating"], 3);

        let (_, body) = send(&app, "GET", &format!("{base}/stats"), None).await;
        assert_eq!(body["average_rating"], 3.0);
        assert_eq!(body["total_ratings"], 1);

        let (status, _) = send(&app, "DELETE", &format!("{base}/1"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, body) = send(&app, "GET", &format!("{base}/stats"), None).await;
        assert_eq!(body["average_rating"], 0.0);
        assert_eq!(body["total_ratings"], 0);

        let (status, _) = send(&app, "GET", &format!("{base}/user/1"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_rerating_updates_existing() {
        let (app, state) = test_app().await;
        let course = insert_course(&state.db, "rerate").await;
        let base = format!("/courses/{}/ratings", course.id);

        let (status, _) = send(&app, "POST", &base, Some(json!({"user_id": 4, "rating": 2}))).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, "POST", &base, Some(json!({"user_id": 4, "rating": 4}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rating"], 4);

        let (status, body) = send(&app, "GET", &base, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));

        let (status, body) = send(&app, "GET", &format!("{base}/user/4"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rating"], 4);
    }

    #[tokio::test]
    async fn test_rating_validation() {
        let (app, state) = test_app().await;
        let course = insert_course(&state.db, "validation").await;
        let base = format!("/courses/{}/ratings", course.id);

        for rating in [0, 6, -1] {
            let (status, body) = send(
                &app,
                "POST",
                &base,
                Some(json!({"user_id": 1, "rating": rating})),
            )
            .await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "rating {rating}");
            assert_eq!(body["status"], 422);
        }

        let (status, body) = send(&app, "POST", &base, Some(json!({"user_id": 0, "rating": 3}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["status"], 422);

        // Bodies that don't fit the request type still get the JSON error shape
        for payload in [
            json!({"user_id": "u1", "rating": 3}),
            json!({"user_id": 1, "rating": 4.5}),
            json!({"user_id": 1, "rating": 70000}),
            json!({"user_id": 1}),
        ] {
            let (status, body) = send(&app, "POST", &base, Some(payload.clone())).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{payload}");
            assert_eq!(body["status"], 422, "{payload}");
            assert!(body["error"].is_string(), "{payload}");
        }

        let (status, body) = send(&app, "PUT", &format!("{base}/1"), Some(json!({"rating": "five"}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["status"], 422);

        for uri in [
            "/courses/abc/ratings".to_owned(),
            "/courses/abc/ratings/stats".to_owned(),
            format!("{base}/user/u1"),
            "/classes/first".to_owned(),
        ] {
            let (status, body) = send(&app, "GET", &uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["status"], 400, "{uri}");
        }

        let request = Request::builder()
            .method("POST")
            .uri(&base)
            .header("content-type", "application/json")
            .body(Body::from("{\"user_id\": 1,"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], 400);

        let (_, body) = send(&app, "GET", &format!("{base}/stats"), None).await;
        assert_eq!(body["total_ratings"], 0);
    }

    #[tokio::test]
    async fn test_missing_resources() {
        let (app, state) = test_app().await;
        let course = insert_course(&state.db, "present").await;

        let (status, body) = send(
            &app,
            "POST",
            "/courses/999/ratings",
            Some(json!({"user_id": 1, "rating": 3})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], 404);

        let (status, _) = send(&app, "GET", "/courses/999/ratings/stats", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            "PUT",
            &format!("/courses/{}/ratings/8", course.id),
            Some(json!({"rating": 3})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "DELETE", &format!("/courses/{}/ratings/8", course.id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "GET", "/courses/no-such-course", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "GET", "/classes/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_course_catalog() {
        let (app, state) = test_app().await;
        let course = insert_course(&state.db, "catalog").await;
        insert_teacher(&state.db, course.id, "Ada Lovelace").await;
        let lesson = insert_lesson(&state.db, course.id, "welcome").await;

        send(
            &app,
            "POST",
            &format!("/courses/{}/ratings", course.id),
            Some(json!({"user_id": 1, "rating": 4})),
        )
        .await;

        let (status, body) = send(&app, "GET", "/courses", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["slug"], "catalog");
        assert_eq!(body[0]["average_rating"], 4.0);
        assert_eq!(body[0]["total_ratings"], 1);

        let (status, body) = send(&app, "GET", "/courses/catalog", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], course.id);
        assert_eq!(body["teachers"][0]["name"], "Ada Lovelace");
        assert_eq!(body["classes"][0]["slug"], "welcome");
        assert_eq!(body["rating_distribution"]["4"], 1);

        let (status, body) = send(&app, "GET", &format!("/classes/{}", lesson.id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["course_id"], course.id);
        assert_eq!(body["video_url"], "https://example.com/videos/welcome.mp4");
    }

    #[tokio::test]
    async fn test_openapi_document() {
        let (app, _) = test_app().await;

        let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/courses/{course}/ratings/stats"].is_object());
    }
}
