use rocket::{
    error::ErrorKind,
    http::{ContentType, Header, Status},
    local::asynchronous::{Client, LocalResponse},
    serde::json::{json, serde_json::Value},
};

use crate::{
    config::ServerConfig,
    error::ErrorBody,
    health::Pong,
    play::{judge, AnswerResponse},
    stats::AnswerCount,
};

async fn spawn_client() -> Client {
    let config = ServerConfig::from_vars(None, None);
    Client::tracked(super::build(config))
        .await
        .expect("valid rocket instance")
}

async fn deserialize_response<'a, T: rocket::serde::DeserializeOwned>(
    response: LocalResponse<'a>,
) -> rocket::serde::json::serde_json::Result<T> {
    let string = response.into_string().await.unwrap();
    rocket::serde::json::serde_json::from_str(&string)
}

/// Posts `body` as a guess and returns the decoded answer
async fn post_answer(client: &Client, body: Value) -> AnswerResponse {
    let response = client.post("/play/answer").json(&body).dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    deserialize_response(response).await.unwrap()
}

/// Fetches the top answers for the query string `query`
async fn get_top(client: &Client, query: &str) -> Value {
    let uri = format!("/stats/top{}", query);
    let response = client.get(uri).dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    deserialize_response(response).await.unwrap()
}

fn fixed_top() -> Vec<AnswerCount> {
    vec![
        AnswerCount::new("آتش", 42),
        AnswerCount::new("آب", 17),
        AnswerCount::new("قیچی", 9),
    ]
}

#[rocket::async_test]
async fn ping_pongs() {
    let client = spawn_client().await;

    let response = client.get("/ping").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.content_type(), Some(ContentType::JSON));

    let pong = deserialize_response::<Pong>(response).await.unwrap();
    assert_eq!(pong, Pong { pong: true });
}

#[rocket::async_test]
async fn empty_answer_is_rejected() {
    let client = spawn_client().await;

    let body = json!({ "targetId": "آب", "target": "آب", "text": "", "timeSec": 3.5 });
    let response = client.post("/play/answer").json(&body).dispatch().await;
    assert_eq!(response.status(), Status::Ok);

    // Nothing but `valid` and `reason` is sent back
    let value = deserialize_response::<Value>(response).await.unwrap();
    assert_eq!(value, json!({ "valid": false, "reason": "empty" }));
}

#[rocket::async_test]
async fn missing_text_is_rejected() {
    let client = spawn_client().await;

    let answer = post_answer(&client, json!({ "targetId": "آب" })).await;
    assert!(!answer.valid);
    assert_eq!(answer.reason.as_deref(), Some(judge::EMPTY_REASON));
}

#[rocket::async_test]
async fn answer_is_accepted_and_scored() {
    let client = spawn_client().await;

    for _ in 0..20 {
        let body = json!({ "targetId": "آب", "target": "آب", "text": "آتش", "timeSec": 2 });
        let answer = post_answer(&client, body).await;

        assert!(answer.valid);
        assert_eq!(answer.canonical.as_deref(), Some("آتش"));
        assert_eq!(answer.reason.as_deref(), Some(judge::TEST_RULE_REASON));
        assert_eq!(answer.next_target_id.as_deref(), Some(judge::NEXT_TARGET_ID));

        let step_score = answer.step_score.unwrap();
        assert!((100..200).contains(&step_score));
        let rarity_pct = answer.rarity_pct.unwrap();
        assert!((0.0..5.0).contains(&rarity_pct));
    }
}

/// Fields other than `text` are only logged, so their json type does not matter
#[rocket::async_test]
async fn answer_accepts_loosely_typed_fields() {
    let client = spawn_client().await;

    let body = json!({ "targetId": 7, "target": "آب", "text": "آتش", "timeSec": 2 });
    let answer = post_answer(&client, body).await;
    assert!(answer.valid);
    assert_eq!(answer.canonical.as_deref(), Some("آتش"));

    let body = json!({ "targetId": "a", "text": "آتش", "timeSec": "2.5" });
    let answer = post_answer(&client, body).await;
    assert!(answer.valid);
    assert_eq!(answer.canonical.as_deref(), Some("آتش"));
}

#[rocket::async_test]
async fn non_string_text_is_empty() {
    let client = spawn_client().await;

    let response = client
        .post("/play/answer")
        .json(&json!({ "text": 123 }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let value = deserialize_response::<Value>(response).await.unwrap();
    assert_eq!(value, json!({ "valid": false, "reason": "empty" }));
}

#[rocket::async_test]
async fn answer_uses_camel_case_keys() {
    let client = spawn_client().await;

    let body = json!({ "text": "قیچی" });
    let response = client.post("/play/answer").json(&body).dispatch().await;
    let value = deserialize_response::<Value>(response).await.unwrap();

    assert!(value["stepScore"].is_u64());
    assert!(value["rarityPct"].is_f64());
    assert_eq!(value["nextTargetId"], "آتش");
}

#[rocket::async_test]
async fn malformed_answer_body_gets_json_error() {
    let client = spawn_client().await;

    let response = client
        .post("/play/answer")
        .header(ContentType::JSON)
        .body("{ not json")
        .dispatch()
        .await;
    let status = response.status();
    assert!(status.class().is_client_error());

    let error = deserialize_response::<ErrorBody>(response).await.unwrap();
    assert_eq!(error.status_code, status.code);
}

#[rocket::async_test]
async fn top_echoes_target() {
    let client = spawn_client().await;

    // target=آب
    let top = get_top(&client, "?target=%D8%A2%D8%A8").await;
    assert_eq!(top["target"], "آب");
    assert_eq!(top["top5"], rocket::serde::json::to_value(fixed_top()).unwrap());
}

#[rocket::async_test]
async fn top_falls_back_to_target_id() {
    let client = spawn_client().await;

    let top = get_top(&client, "?targetId=fire").await;
    assert_eq!(top["target"], "fire");

    let top = get_top(&client, "?target=&targetId=fire").await;
    assert_eq!(top["target"], "fire");
}

#[rocket::async_test]
async fn top_without_target_is_unknown() {
    let client = spawn_client().await;

    let top = get_top(&client, "").await;
    assert_eq!(top["target"], "?");
    assert_eq!(top["top5"].as_array().map(Vec::len), Some(3));
}

#[rocket::async_test]
async fn unknown_route_gets_json_404() {
    let client = spawn_client().await;

    let response = client.get("/nope").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);

    let error = deserialize_response::<ErrorBody>(response).await.unwrap();
    assert_eq!(error.status_code, 404);
    assert_eq!(error.error, "Not Found");
    assert_eq!(error.message, "Route GET:/nope not found");
}

#[rocket::async_test]
async fn cors_reflects_origin() {
    let client = spawn_client().await;
    let origin = "http://localhost:5173";

    let response = client
        .get("/ping")
        .header(Header::new("Origin", origin))
        .dispatch()
        .await;
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Origin"),
        Some(origin)
    );

    let response = client.get("/ping").dispatch().await;
    assert_eq!(response.headers().get_one("Access-Control-Allow-Origin"), None);
}

#[rocket::async_test]
async fn preflight_is_answered() {
    let client = spawn_client().await;

    let response = client
        .options("/play/answer")
        .header(Header::new("Origin", "http://localhost:5173"))
        .header(Header::new("Access-Control-Request-Method", "POST"))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::NoContent);
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Methods"),
        Some("GET, POST, OPTIONS")
    );
}

/// A database that cannot be reached stops the server from starting
#[rocket::async_test]
async fn unreachable_database_fails_ignition() {
    let config = ServerConfig::from_vars(None, Some("invalid://nowhere".to_owned()));

    match Client::tracked(super::build(config)).await {
        Ok(_) => panic!("ignition should fail"),
        Err(error) => assert!(matches!(error.kind(), ErrorKind::FailedFairings(_))),
    }
}

#[test]
fn binds_to_3000_without_port() {
    let rocket = super::build(ServerConfig::from_vars(None, None));
    let figment = rocket.figment();

    assert_eq!(figment.extract_inner::<u16>("port").unwrap(), 3000);
    assert_eq!(
        figment.extract_inner::<String>("address").unwrap(),
        "0.0.0.0"
    );
}
