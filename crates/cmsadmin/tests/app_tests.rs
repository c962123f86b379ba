//! Integration tests for the coordinator.

mod common;

use common::*;
use secrecy::SecretString;
use serde_json::json;

use cmsadmin::models::JobField;
use cmsadmin::workflow::SaveStatus;
use cmsadmin::{AdminError, RecordKind};

#[tokio::test]
async fn test_saving_requires_login() {
    let harness = TestHarness::new();
    let mut app = harness.app();
    app.jobs.replace_all(vec![job("Engineer", "1")]);

    assert!(matches!(app.save_jobs().await, Err(AdminError::NotLoggedIn)));
    assert!(harness.transport.requests().is_empty());
}

#[tokio::test]
async fn test_refresh_all_fills_editors_and_dashboard() {
    let harness = TestHarness::new();
    harness.transport.respond(data(json!({
        "jobs": [
            { "title": "Engineer", "quota": "3", "salary": "5000 - 8000", "requirements": "A" },
            { "title": "Sales", "quota": "2人", "salary": "面议", "requirements": "" }
        ],
        "products": [],
        "cases": [ { "title": "Plant upgrade", "description": "x", "imageUrls": [] } ]
    })));

    let mut app = harness.app();
    app.refresh_all().await.unwrap();

    assert_eq!(app.jobs.titles(), vec!["Engineer", "Sales"]);
    assert_eq!(app.jobs.selected(), Some(0));
    assert!(app.products.is_empty());
    assert_eq!(app.products.selected(), None);
    assert_eq!(app.cases.len(), 1);

    // No stats in the response: derived from the lists.
    let stats = app.dashboard.stats().unwrap();
    assert_eq!(stats.jobs_count, 2);
    assert_eq!(stats.cases_count, 1);
    assert_eq!(stats.total_quota, 5);
}

#[tokio::test]
async fn test_login_edit_save_logout() {
    let harness = TestHarness::new();
    harness
        .transport
        .respond(login_ok("k-1", "admin"))
        .respond(success("Jobs saved"))
        .respond(success("bye"));

    let mut app = harness.app();
    app.login(&SecretString::from("pw")).await.unwrap();
    assert!(app.is_logged_in());

    let mut rx = app.subscribe_progress();
    app.jobs.add();
    app.jobs.set_field(JobField::Title, "Technician");
    let message = app.save_jobs().await.unwrap();
    assert_eq!(message, "Jobs saved");

    let event = rx.try_recv().unwrap();
    assert_eq!(event.kind, RecordKind::Jobs);
    assert_eq!(event.status, SaveStatus::Completed);

    let requests = harness.transport.requests();
    assert_eq!(requests[1].field_value("key"), Some("k-1"));
    assert!(requests[1].field_value("data").unwrap().contains("Technician"));

    app.logout().await.unwrap();
    assert!(!app.is_logged_in());
    assert_eq!(harness.transport.actions(), vec!["login", "save_jobs", "logout"]);
}

#[tokio::test]
async fn test_add_product_uses_configured_category() {
    let harness = TestHarness::new();
    let mut app = harness.app();
    let index = app.add_product();

    assert_eq!(app.products.records()[index].category, "环保设备");
    assert_eq!(app.products.records()[index].name, "新产品 - 请修改");
}

#[tokio::test]
async fn test_save_selected_product_through_app() {
    let harness = TestHarness::new();
    harness
        .transport
        .respond(login_ok("k-2", "admin"))
        .respond(upload_ok("https://cdn.example.com/p.png"))
        .respond(success("Products saved"));

    let mut app = harness.app();
    app.login(&SecretString::from("pw")).await.unwrap();
    app.products.replace_all(vec![product("Pump")]);
    app.image_slots_mut().set(1, harness.image("p.png")).unwrap();

    app.save_selected_product().await.unwrap();

    assert_eq!(
        harness.transport.actions(),
        vec!["login", "upload_image", "save_products"]
    );
    assert_eq!(
        app.products.records()[0].image_urls,
        vec!["https://cdn.example.com/p.png"]
    );
}
