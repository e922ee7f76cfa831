//! End-to-end itinerary generation against mocked provider endpoints.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use chrono::NaiveDate;
use serde_json::json;
use wayfarer::itinerary::{sample_itinerary, AccommodationKind, ActivityCategory};
use wayfarer::{
    FailurePolicy, ItineraryError, ItineraryRequest, ItineraryService, Provider, ProviderConfig,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn itinerary_json() -> String {
    json!({
        "activities": [
            {
                "name": "Alhambra tour",
                "description": "Guided visit of the Nasrid palaces.",
                "time": "09:00",
                "duration": "3 hours",
                "category": "cultural",
                "cost": "€19",
                "location": "Alhambra",
                "aiGenerated": false
            },
            {"name": "Tapas crawl", "time": "20:00", "category": "dining"}
        ],
        "accommodations": [
            {"name": "Casa Morisca", "type": "guesthouse", "priceRange": "€120/night", "rating": 4.7}
        ],
        "overview": "Three days among Moorish palaces and tapas bars."
    })
    .to_string()
}

fn openai_reply(content: &str) -> serde_json::Value {
    json!({"choices": [{"message": {"role": "assistant", "content": content}}]})
}

fn openai_config(server: &MockServer) -> ProviderConfig {
    ProviderConfig::new(Provider::OpenAi, "sk-test")
        .with_base_url(format!("{}/v1/chat/completions", server.uri()))
}

fn granada() -> ItineraryRequest {
    ItineraryRequest::new("Granada, Spain")
        .with_dates(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 4).unwrap(),
        )
        .with_budget("mid-range")
        .with_travelers(2)
        .with_interests(["history", "food"])
}

#[tokio::test]
async fn fenced_openai_reply_becomes_stamped_itinerary() {
    let server = MockServer::start().await;
    let fenced = format!("```json\n{}\n```", itinerary_json());

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_reply(&fenced)))
        .expect(1)
        .mount(&server)
        .await;

    let service = ItineraryService::from_config(&openai_config(&server)).unwrap();
    let result = service.generate_itinerary(&granada()).await.unwrap();

    assert_eq!(result.activities.len(), 2);
    assert_eq!(result.activities[0].category, ActivityCategory::Cultural);
    assert_eq!(result.accommodations[0].kind, AccommodationKind::Guesthouse);
    assert_eq!(result.accommodations[0].rating, Some(4.7));
    assert!(result.is_fully_stamped());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = requests[0].body_json().unwrap();
    let user_prompt = body["messages"][1]["content"].as_str().unwrap();
    assert!(user_prompt.contains("Granada, Spain covering 3 days"));
    assert!(user_prompt.contains("history, food"));
    assert!(user_prompt.contains("Include 6 activities"));
}

#[tokio::test]
async fn custom_provider_end_to_end() {
    let server = MockServer::start().await;
    let reply = itinerary_json();

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(move |req: &Request| {
            let body: serde_json::Value = req.body_json().unwrap();
            assert!(body["prompt"].as_str().unwrap().contains("Granada"));
            ResponseTemplate::new(200).set_body_json(json!({"response": reply}))
        })
        .expect(1)
        .mount(&server)
        .await;

    let config = ProviderConfig::new(Provider::Custom, "local")
        .with_model("llama3")
        .with_base_url(format!("{}/api/generate", server.uri()));
    let service = ItineraryService::from_config(&config).unwrap();

    let result = service.generate_itinerary(&granada()).await.unwrap();
    assert_eq!(
        result.overview,
        "Three days among Moorish palaces and tapas bars."
    );
}

#[tokio::test]
async fn http_error_strict_surfaces_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .expect(1)
        .mount(&server)
        .await;

    let service = ItineraryService::from_config(&openai_config(&server)).unwrap();
    let err = service.generate_itinerary(&granada()).await.unwrap_err();

    assert_eq!(
        err,
        ItineraryError::TransportFailure {
            status: Some(429),
            body: "slow down".to_string()
        }
    );
}

#[tokio::test]
async fn http_error_fallback_returns_sample() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let config = openai_config(&server).with_failure_policy(FailurePolicy::Fallback);
    let service = ItineraryService::from_config(&config).unwrap();

    let result = service.generate_itinerary(&granada()).await.unwrap();
    assert_eq!(result, sample_itinerary());
}

#[tokio::test]
async fn non_json_reply_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(openai_reply("Sure! Here is your itinerary: day one...")),
        )
        .mount(&server)
        .await;

    let service = ItineraryService::from_config(&openai_config(&server)).unwrap();
    let err = service.generate_itinerary(&granada()).await.unwrap_err();
    assert!(matches!(err, ItineraryError::MalformedResponse(_)));
}

#[tokio::test]
async fn unknown_category_is_invalid_shape_naming_path() {
    let server = MockServer::start().await;
    let reply = json!({
        "activities": [{"name": "Skydiving", "category": "extreme"}],
        "accommodations": [{"name": "Inn", "type": "hotel", "priceRange": "$"}],
        "overview": "Thrills."
    })
    .to_string();

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_reply(&reply)))
        .mount(&server)
        .await;

    let service = ItineraryService::from_config(&openai_config(&server)).unwrap();
    let err = service.generate_itinerary(&granada()).await.unwrap_err();

    match err {
        ItineraryError::InvalidResponseShape(detail) => {
            assert!(detail.contains("activities[0].category"), "{detail}");
        }
        other => panic!("expected invalid shape, got {other:?}"),
    }
}

#[tokio::test]
async fn unsupported_provider_never_reaches_network() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let uri = server.uri();
    let err = ProviderConfig::from_lookup(|key: &str| match key {
        "AI_PROVIDER" => Some("unknown".to_string()),
        "AI_API_KEY" => Some("key".to_string()),
        "AI_BASE_URL" => Some(uri.clone()),
        _ => None,
    })
    .unwrap_err();

    assert_eq!(err, ItineraryError::UnsupportedProvider("unknown".to_string()));
}

#[tokio::test]
async fn custom_without_base_url_is_configuration_error() {
    let err = ProviderConfig::from_lookup(|key: &str| match key {
        "AI_PROVIDER" => Some("custom".to_string()),
        "AI_API_KEY" => Some("key".to_string()),
        _ => None,
    })
    .unwrap_err();

    assert!(matches!(err, ItineraryError::Configuration(_)));
}

#[tokio::test]
async fn missing_key_strict_and_fallback() {
    let strict = ItineraryService::from_config(&ProviderConfig::new(Provider::Google, "")).unwrap();
    let err = strict.generate_itinerary(&granada()).await.unwrap_err();
    assert!(matches!(err, ItineraryError::MissingCredentials { .. }));

    let fallback = ItineraryService::from_config(
        &ProviderConfig::new(Provider::Google, "").with_failure_policy(FailurePolicy::Fallback),
    )
    .unwrap();
    let first = fallback.generate_itinerary(&granada()).await.unwrap();
    let second = fallback.generate_itinerary(&granada()).await.unwrap();
    assert_eq!(first, second);
    assert!(first.is_fully_stamped());
}

#[tokio::test]
async fn unreachable_endpoint_is_transport_failure_without_status() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = ProviderConfig::new(Provider::OpenAi, "sk-test")
        .with_base_url(format!("http://127.0.0.1:{port}/v1/chat/completions"));

    let service = ItineraryService::from_config(&config).unwrap();
    let err = service.generate_itinerary(&granada()).await.unwrap_err();

    assert!(matches!(
        err,
        ItineraryError::TransportFailure { status: None, .. }
    ));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn request_timeout_is_transport_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(openai_reply(&itinerary_json()))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = openai_config(&server).with_request_timeout(Duration::from_secs(1));
    let service = ItineraryService::from_config(&config).unwrap();
    let err = service.generate_itinerary(&granada()).await.unwrap_err();

    assert!(matches!(
        err,
        ItineraryError::TransportFailure { status: None, .. }
    ));
}

#[tokio::test]
async fn service_is_shareable_across_tasks() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_reply(&itinerary_json())))
        .expect(4)
        .mount(&server)
        .await;

    let service =
        std::sync::Arc::new(ItineraryService::from_config(&openai_config(&server)).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.generate_itinerary(&granada()).await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().unwrap().is_fully_stamped());
    }
}
