//! Lot management: provisioning, capacity growth, guarded delete

mod common;

use common::*;
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn create_lot_provisions_labelled_spots() {
    let (app, _dir) = test_app().await;
    let admin = admin_token(&app).await;

    let lot = create_lot(&app, &admin, "Lakeview", 3).await;
    let lot_id = lot["id"].as_i64().unwrap();
    assert_eq!(lot["total_spots"], 3);
    assert_eq!(lot["available_spots"], 3);

    let (status, detail) = request(
        &app,
        "GET",
        &format!("/api/admin/lots/{lot_id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let labels: Vec<&str> = detail["spots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["spot_number"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["LAK-001", "LAK-002", "LAK-003"]);
}

#[tokio::test]
async fn create_lot_validates_input() {
    let (app, _dir) = test_app().await;
    let admin = admin_token(&app).await;

    for bad in [
        json!({ "name": "", "location": "Downtown", "total_spots": 5 }),
        json!({ "name": "Central", "location": "Downtown", "total_spots": 0 }),
        json!({ "name": "Central", "location": "Downtown", "total_spots": 1001 }),
    ] {
        let (status, body) =
            request(&app, "POST", "/api/admin/lots", Some(&admin), Some(bad)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(body["code"], 2);
    }
}

#[tokio::test]
async fn capacity_can_grow_but_not_shrink() {
    let (app, _dir) = test_app().await;
    let admin = admin_token(&app).await;
    let lot = create_lot(&app, &admin, "Central", 2).await;
    let lot_id = lot["id"].as_i64().unwrap();

    // Shrink is rejected
    let (status, body) = request(
        &app,
        "PUT",
        &format!("/api/admin/lots/{lot_id}"),
        Some(&admin),
        Some(json!({ "total_spots": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);

    // Growth appends spots, numbering continues
    let (status, updated) = request(
        &app,
        "PUT",
        &format!("/api/admin/lots/{lot_id}"),
        Some(&admin),
        Some(json!({ "total_spots": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["total_spots"], 4);
    assert_eq!(updated["available_spots"], 4);

    let (_, detail) = request(
        &app,
        "GET",
        &format!("/api/admin/lots/{lot_id}"),
        Some(&admin),
        None,
    )
    .await;
    let labels: Vec<&str> = detail["spots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["spot_number"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["CEN-001", "CEN-002", "CEN-003", "CEN-004"]);
}

#[tokio::test]
async fn update_renames_lot() {
    let (app, _dir) = test_app().await;
    let admin = admin_token(&app).await;
    let lot = create_lot(&app, &admin, "Central", 1).await;
    let lot_id = lot["id"].as_i64().unwrap();

    let (status, updated) = request(
        &app,
        "PUT",
        &format!("/api/admin/lots/{lot_id}"),
        Some(&admin),
        Some(json!({ "name": "Central Renamed", "location": "Uptown" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Central Renamed");
    assert_eq!(updated["location"], "Uptown");
    assert_eq!(updated["total_spots"], 1);
}

#[tokio::test]
async fn delete_refused_while_occupied() {
    let (app, _dir) = test_app().await;
    let admin = admin_token(&app).await;
    let lot = create_lot(&app, &admin, "Central", 1).await;
    let lot_id = lot["id"].as_i64().unwrap();

    let token = user_token(&app, "John Doe", "john@example.com").await;
    let spot_id = first_available_spot(&app, &token, lot_id).await;
    let (_, reservation) = request(
        &app,
        "POST",
        "/api/reservations",
        Some(&token),
        Some(json!({ "spot_id": spot_id, "vehicle_number": "AAA-111" })),
    )
    .await;
    let reservation_id = reservation["id"].as_i64().unwrap();

    let (status, body) = request(
        &app,
        "DELETE",
        &format!("/api/admin/lots/{lot_id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 7003);

    // The refused delete leaves the lot and its spot untouched
    let (status, detail) = request(
        &app,
        "GET",
        &format!("/api/admin/lots/{lot_id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["spots"].as_array().unwrap().len(), 1);

    // After checkout the delete goes through and cascades
    request(
        &app,
        "POST",
        &format!("/api/reservations/{reservation_id}/checkout"),
        Some(&token),
        None,
    )
    .await;

    let (status, body) = request(
        &app,
        "DELETE",
        &format!("/api/admin/lots/{lot_id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (_, lots) = request(&app, "GET", "/api/lots", Some(&token), None).await;
    assert_eq!(lots.as_array().unwrap().len(), 0);

    // Cascade removed the history rows too
    let (_, history) =
        request(&app, "GET", "/api/reservations/history", Some(&token), None).await;
    assert_eq!(history.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn unknown_lot_returns_404() {
    let (app, _dir) = test_app().await;
    let admin = admin_token(&app).await;

    let (status, body) =
        request(&app, "GET", "/api/admin/lots/9999", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 7001);

    let token = user_token(&app, "John Doe", "john@example.com").await;
    let (status, body) = request(&app, "GET", "/api/lots/9999/spots", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 7001);
}
