use std::env;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;
use uuid::Uuid;

use marketplace_backend::routes;

fn marketplace_app(state: marketplace_backend::AppState) -> Router {
    let authed = Router::new()
        .route(
            "/api/tenders",
            get(routes::tender_routes::list_tenders).post(routes::tender_routes::create_tender),
        )
        .route("/api/tenders/:id", get(routes::tender_routes::get_tender))
        .route("/api/tags", get(routes::tender_routes::list_tags))
        .route(
            "/api/tenders/:id/place_bid",
            post(routes::tender_routes::place_bid),
        )
        .route(
            "/api/tenders/:id/accept_bid",
            post(routes::tender_routes::accept_bid),
        )
        .route("/api/bids", get(routes::tender_routes::list_bids))
        .route("/api/projects", get(routes::project_routes::list_projects))
        .route("/api/projects/:id", get(routes::project_routes::get_project))
        .route(
            "/api/projects/:id/deliver",
            post(routes::project_routes::deliver),
        )
        .route(
            "/api/projects/:id/request_revision",
            post(routes::project_routes::request_revision),
        )
        .route(
            "/api/projects/:id/complete",
            post(routes::project_routes::complete),
        )
        .route(
            "/api/projects/:id/update_price",
            post(routes::project_routes::update_price),
        )
        .route(
            "/api/projects/:id/update_deadline",
            post(routes::project_routes::update_deadline),
        )
        .route(
            "/api/projects/:id/activities",
            get(routes::project_routes::list_activities)
                .post(routes::project_routes::create_activity),
        )
        .route("/api/reviews", post(routes::review_routes::create_review))
        .route_layer(axum::middleware::from_fn(
            marketplace_backend::middleware::auth::require_bearer_auth,
        ));

    Router::new()
        .route("/api/auth/register", post(routes::auth_routes::register))
        .route("/api/auth/login", post(routes::auth_routes::login))
        .merge(authed)
        .with_state(state)
}

async fn post_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: JsonValue,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let req = builder.body(Body::from(body.to_string())).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let parsed = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, parsed)
}

async fn get_json(app: &Router, uri: &str, token: &str) -> (StatusCode, JsonValue) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let parsed = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, parsed)
}

async fn register_and_login(
    app: &Router,
    username: &str,
    user_type: &str,
) -> (Uuid, String) {
    let (status, created) = post_json(
        app,
        "/api/auth/register",
        None,
        json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": "password123",
            "password_confirmation": "password123",
            "user_type": user_type,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", created);
    let user_id = Uuid::parse_str(created["id"].as_str().unwrap()).unwrap();

    let (status, auth) = post_json(
        app,
        "/api/auth/login",
        None,
        json!({"username": username, "password": "password123"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", auth);
    let token = auth["token"].as_str().unwrap().to_string();
    assert_eq!(auth["user"]["id"].as_str(), Some(user_id.to_string().as_str()));

    (user_id, token)
}

#[tokio::test]
async fn marketplace_end_to_end() {
    dotenvy::dotenv().ok();
    if env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL is not set; skipping marketplace flow test");
        return;
    }
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("JWT_SECRET", "test_secret_key");
    let _ = marketplace_backend::config::init_config();

    let pool = marketplace_backend::database::pool::create_pool()
        .await
        .expect("pool");
    sqlx::migrate!("./migrations").run(&pool).await.expect("migrations");

    let category_id: Uuid = sqlx::query_scalar(
        "INSERT INTO categories (name) VALUES ($1) \
         ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name RETURNING id",
    )
    .bind("Web Development")
    .fetch_one(&pool)
    .await
    .expect("seed category");

    let state = marketplace_backend::AppState::new(pool.clone());
    let app = marketplace_app(state);

    let run = Uuid::new_v4().simple().to_string();
    let (client_id, client_token) =
        register_and_login(&app, &format!("client_{}", &run[..10]), "client").await;
    let (vendor_id, vendor_token) =
        register_and_login(&app, &format!("vendor_{}", &run[..10]), "vendor").await;

    let deadline = (chrono::Utc::now().date_naive() + chrono::Duration::days(45)).to_string();
    let tender_payload = json!({
        "title": "Landing page redesign",
        "description": "Rebuild the marketing site landing page",
        "min_budget": "250.00",
        "max_budget": "800.00",
        "max_duration": 30,
        "deadline": deadline,
        "category_id": category_id,
        "tags": ["design", "frontend"],
    });

    // a client capability is required to open tenders
    let (status, body) = post_json(&app, "/api/tenders", Some(&vendor_token), tender_payload.clone()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["kind"].as_str(), Some("forbidden"));

    let (status, tender) = post_json(&app, "/api/tenders", Some(&client_token), tender_payload).await;
    assert_eq!(status, StatusCode::CREATED, "create tender failed: {}", tender);
    let tender_id = tender["id"].as_str().unwrap().to_string();
    assert_eq!(tender["status"].as_str(), Some("open"));

    // tags created with the tender show up in the catalog
    let (status, tags) = get_json(&app, "/api/tags", &vendor_token).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = tags
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"design"), "missing tag in {:?}", names);
    assert!(names.contains(&"frontend"), "missing tag in {:?}", names);

    // a vendor capability is required to bid
    let (status, body) = post_json(
        &app,
        &format!("/api/tenders/{}/place_bid", tender_id),
        Some(&client_token),
        json!({"amount": "400.00", "delivery_time": 10, "proposal": "I can do it"}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["kind"].as_str(), Some("forbidden"));

    let (status, bid) = post_json(
        &app,
        &format!("/api/tenders/{}/place_bid", tender_id),
        Some(&vendor_token),
        json!({"amount": "420.00", "delivery_time": 14, "proposal": "Two week rebuild"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "place bid failed: {}", bid);
    let bid_id = bid["id"].as_str().unwrap().to_string();
    assert_eq!(bid["status"].as_str(), Some("pending"));

    // one bid per vendor per tender
    let (status, body) = post_json(
        &app,
        &format!("/api/tenders/{}/place_bid", tender_id),
        Some(&vendor_token),
        json!({"amount": "350.00", "delivery_time": 7, "proposal": "Cheaper offer"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["kind"].as_str(), Some("conflict"));

    // only the tender owner may accept
    let (status, body) = post_json(
        &app,
        &format!("/api/tenders/{}/accept_bid", tender_id),
        Some(&vendor_token),
        json!({"bid_id": bid_id}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN, "unexpected: {}", body);

    let (status, project) = post_json(
        &app,
        &format!("/api/tenders/{}/accept_bid", tender_id),
        Some(&client_token),
        json!({"bid_id": bid_id}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "accept bid failed: {}", project);
    let project_id = project["id"].as_str().unwrap().to_string();
    assert_eq!(project["client_id"].as_str(), Some(client_id.to_string().as_str()));
    assert_eq!(project["vendor_id"].as_str(), Some(vendor_id.to_string().as_str()));
    assert_eq!(project["agreed_amount"].as_str(), Some("420.00"));
    assert_eq!(project["status"].as_str(), Some("in_progress"));

    // acceptance closed the tender
    let (status, body) = post_json(
        &app,
        &format!("/api/tenders/{}/accept_bid", tender_id),
        Some(&client_token),
        json!({"bid_id": bid_id}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["kind"].as_str(), Some("invalid_state"));

    let (status, detail) = get_json(&app, &format!("/api/tenders/{}", tender_id), &client_token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["status"].as_str(), Some("in_progress"));

    // no new bids once the tender left open, so none can linger as pending
    let (_, late_vendor_token) =
        register_and_login(&app, &format!("late_{}", &run[..10]), "vendor").await;
    let (status, body) = post_json(
        &app,
        &format!("/api/tenders/{}/place_bid", tender_id),
        Some(&late_vendor_token),
        json!({"amount": "380.00", "delivery_time": 9, "proposal": "Late offer"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "unexpected: {}", body);
    assert_eq!(body["error"]["kind"].as_str(), Some("invalid_state"));

    let (status, bids) = get_json(&app, "/api/bids", &vendor_token).await;
    assert_eq!(status, StatusCode::OK);
    let accepted = bids
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["id"].as_str() == Some(bid_id.as_str()))
        .expect("accepted bid listed for its vendor");
    assert_eq!(accepted["status"].as_str(), Some("accepted"));

    // lifecycle: deliver, revision, redeliver, price change
    let (status, body) = post_json(
        &app,
        &format!("/api/projects/{}/deliver", project_id),
        Some(&client_token),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN, "unexpected: {}", body);

    let (status, activity) = post_json(
        &app,
        &format!("/api/projects/{}/deliver", project_id),
        Some(&vendor_token),
        json!({"description": "First cut", "attachment": "https://files.example.com/v1.zip"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "deliver failed: {}", activity);
    assert_eq!(activity["kind"].as_str(), Some("delivery"));
    assert_eq!(activity["description"].as_str(), Some("First cut"));

    let (status, activity) = post_json(
        &app,
        &format!("/api/projects/{}/request_revision", project_id),
        Some(&client_token),
        json!({"description": "Please adjust the hero section"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "request revision failed: {}", activity);
    assert_eq!(activity["kind"].as_str(), Some("revision_request"));

    let (status, project) = get_json(&app, &format!("/api/projects/{}", project_id), &vendor_token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(project["status"].as_str(), Some("revision_requested"));

    // a revision cannot be requested twice in a row
    let (status, body) = post_json(
        &app,
        &format!("/api/projects/{}/request_revision", project_id),
        Some(&client_token),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["kind"].as_str(), Some("invalid_state"));

    let (status, activity) = post_json(
        &app,
        &format!("/api/projects/{}/deliver", project_id),
        Some(&vendor_token),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(activity["description"].as_str(), Some("Project delivered"));

    let (status, project) = post_json(
        &app,
        &format!("/api/projects/{}/update_price", project_id),
        Some(&client_token),
        json!({"new_price": "500.00"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "update price failed: {}", project);
    assert_eq!(project["agreed_amount"].as_str(), Some("500.00"));
    assert_eq!(project["status"].as_str(), Some("in_progress"));

    // deadline changes need a new_deadline
    let (status, body) = post_json(
        &app,
        &format!("/api/projects/{}/update_deadline", project_id),
        Some(&vendor_token),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["kind"].as_str(), Some("validation"));

    let new_deadline = (chrono::Utc::now().date_naive() + chrono::Duration::days(60)).to_string();
    let (status, project) = post_json(
        &app,
        &format!("/api/projects/{}/update_deadline", project_id),
        Some(&vendor_token),
        json!({"new_deadline": new_deadline}),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "update deadline failed: {}", project);
    assert_eq!(project["deadline"].as_str(), Some(new_deadline.as_str()));
    assert_eq!(project["status"].as_str(), Some("in_progress"));

    // lifecycle kinds cannot be posted by hand
    let (status, body) = post_json(
        &app,
        &format!("/api/projects/{}/activities", project_id),
        Some(&client_token),
        json!({"kind": "delivery", "description": "Fake delivery"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["kind"].as_str(), Some("validation"));

    let (status, activity) = post_json(
        &app,
        &format!("/api/projects/{}/activities", project_id),
        Some(&client_token),
        json!({"kind": "comment", "description": "Looks good so far"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(activity["kind"].as_str(), Some("comment"));

    // log is ordered oldest first, with both deltas recorded
    let (status, log) = get_json(
        &app,
        &format!("/api/projects/{}/activities", project_id),
        &vendor_token,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let kinds: Vec<&str> = log
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["kind"].as_str().unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec![
            "delivery",
            "revision_request",
            "delivery",
            "price_change",
            "deadline_change",
            "comment"
        ]
    );
    let price_change = &log.as_array().unwrap()[3];
    assert_eq!(price_change["old_price"].as_str(), Some("420.00"));
    assert_eq!(price_change["new_price"].as_str(), Some("500.00"));
    let deadline_change = &log.as_array().unwrap()[4];
    assert_eq!(deadline_change["old_deadline"].as_str(), Some(deadline.as_str()));
    assert_eq!(
        deadline_change["new_deadline"].as_str(),
        Some(new_deadline.as_str())
    );

    // completion is client-only and terminal
    let (status, body) = post_json(
        &app,
        &format!("/api/projects/{}/complete", project_id),
        Some(&vendor_token),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN, "unexpected: {}", body);

    let (status, project) = post_json(
        &app,
        &format!("/api/projects/{}/complete", project_id),
        Some(&client_token),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "complete failed: {}", project);
    assert_eq!(project["status"].as_str(), Some("completed"));

    let (status, detail) = get_json(&app, &format!("/api/tenders/{}", tender_id), &client_token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["status"].as_str(), Some("completed"));

    let (status, log) = get_json(
        &app,
        &format!("/api/projects/{}/activities?order=desc", project_id),
        &client_token,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let newest = &log.as_array().unwrap()[0];
    assert_eq!(newest["kind"].as_str(), Some("project_completion"));

    let (status, body) = post_json(
        &app,
        &format!("/api/projects/{}/update_price", project_id),
        Some(&client_token),
        json!({"new_price": "600.00"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["kind"].as_str(), Some("invalid_state"));

    // reviews only on completed projects, one per reviewer
    let (status, review) = post_json(
        &app,
        "/api/reviews",
        Some(&vendor_token),
        json!({"project_id": project_id, "rating": 5, "comment": "Great client"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create review failed: {}", review);
    assert_eq!(review["reviewee_id"].as_str(), Some(client_id.to_string().as_str()));

    let (status, body) = post_json(
        &app,
        "/api/reviews",
        Some(&vendor_token),
        json!({"project_id": project_id, "rating": 4, "comment": "Second thoughts"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT, "unexpected: {}", body);

    let (status, body) = post_json(
        &app,
        "/api/reviews",
        Some(&client_token),
        json!({"project_id": project_id, "rating": 6, "comment": "Too good"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "unexpected: {}", body);

    // outsiders cannot see the project at all
    let (_, outsider_token) =
        register_and_login(&app, &format!("other_{}", &run[..10]), "vendor").await;
    let (status, body) = get_json(&app, &format!("/api/projects/{}", project_id), &outsider_token).await;
    assert_eq!(status, StatusCode::NOT_FOUND, "unexpected: {}", body);
    assert_eq!(body["error"]["kind"].as_str(), Some("not_found"));
}
