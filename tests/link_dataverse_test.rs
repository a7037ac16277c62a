//! Contract tests for the Dataverse link adapter, driven against a mock
//! upstream.

use std::collections::HashMap;
use std::time::Duration;

use addon_kit::imps::link::DataverseLinkAddon;
use addon_kit::{AddonConfig, AddonError, HttpRequestor, ItemType, LinkAddon, SupportedResourceType};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn dataverse(server: &MockServer) -> DataverseLinkAddon {
    let requestor = HttpRequestor::new(reqwest::Client::new(), &server.uri()).unwrap();
    DataverseLinkAddon::new(requestor, AddonConfig::new(server.uri()))
}

fn dataset_body(persistent_id: &str, title: &str) -> serde_json::Value {
    json!({
        "data": {
            "latestVersion": {
                "datasetPersistentId": persistent_id,
                "metadataBlocks": {
                    "citation": {
                        "fields": [
                            {"typeName": "author", "value": "Someone"},
                            {"typeName": "title", "value": title},
                        ]
                    }
                }
            }
        }
    })
}

#[tokio::test]
async fn root_item_info_needs_no_network_call() {
    let server = MockServer::start().await;
    let addon = dataverse(&server);

    let root = addon.get_item_info("").await.unwrap();
    assert_eq!(root.item_id, "");
    assert_eq!(root.item_name, "");
    assert_eq!(root.item_type, ItemType::Folder);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn container_listing_assembles_titles_from_per_child_fetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dataverses/42/contents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": 7, "type": "dataverse", "title": "Sub"},
                {"id": 99, "type": "dataset"},
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/datasets/99"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dataset_body("doi:10.5/X", "Paper X")))
        .mount(&server)
        .await;

    let sample = dataverse(&server)
        .list_child_items("dataverse/42", "", None)
        .await
        .unwrap();
    assert_eq!(sample.total_count, Some(2));
    assert_eq!(sample.items[0].item_id, "dataverse/7");
    assert_eq!(sample.items[0].item_name, "Sub");
    assert_eq!(sample.items[0].item_type, ItemType::Folder);
    assert_eq!(sample.items[1].item_id, "dataset/doi:10.5/X");
    assert_eq!(sample.items[1].item_name, "Paper X");
    assert_eq!(sample.items[1].item_type, ItemType::Folder);
    assert_eq!(
        sample.items[1].resource_type,
        Some(SupportedResourceType::Dataset)
    );
}

#[tokio::test]
async fn fan_out_preserves_the_upstream_listing_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dataverses/42/contents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": 1, "type": "dataset"},
                {"id": 2, "type": "dataset"},
                {"id": 3, "type": "dataset"},
            ]
        })))
        .mount(&server)
        .await;
    // the first entry completes last; ordering must not follow completion
    for (entity_id, delay_ms, pid) in [(1, 90, "doi:10.5/A"), (2, 50, "doi:10.5/B"), (3, 10, "doi:10.5/C")] {
        Mock::given(method("GET"))
            .and(path(format!("/api/datasets/{entity_id}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(dataset_body(pid, "Title"))
                    .set_delay(Duration::from_millis(delay_ms)),
            )
            .mount(&server)
            .await;
    }

    let sample = dataverse(&server)
        .list_child_items("dataverse/42", "", None)
        .await
        .unwrap();
    let ids: Vec<&str> = sample.items.iter().map(|item| item.item_id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["dataset/doi:10.5/A", "dataset/doi:10.5/B", "dataset/doi:10.5/C"]
    );
}

#[tokio::test]
async fn one_failing_child_fetch_fails_the_whole_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dataverses/42/contents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": 7, "type": "dataverse", "title": "Sub"},
                {"id": 99, "type": "dataset"},
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/datasets/99"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = dataverse(&server)
        .list_child_items("dataverse/42", "", None)
        .await
        .unwrap_err();
    assert!(matches!(err, AddonError::Upstream { status: 500, .. }));
}

#[tokio::test]
async fn root_listing_uses_page_number_cursors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/mydata/retrieve"))
        .and(query_param("selected_page", "2"))
        .and(query_param("dvobject_types", "Dataverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "items": [{"entity_id": 5, "name": "My Dataverse"}],
                "pagination": {"hasNextPageNumber": true, "nextPageNumber": 3},
            }
        })))
        .mount(&server)
        .await;

    let sample = dataverse(&server).list_root_items("2").await.unwrap();
    assert_eq!(sample.items.len(), 1);
    assert_eq!(sample.items[0].item_id, "dataverse/5");
    assert_eq!(sample.this_sample_cursor, "2");
    assert_eq!(sample.next_sample_cursor.as_deref(), Some("3"));
    assert_eq!(sample.prev_sample_cursor.as_deref(), Some("1"));
    assert_eq!(sample.first_sample_cursor, "1");
}

#[tokio::test]
async fn terminal_page_omits_the_next_cursor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/mydata/retrieve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "items": [{"entity_id": 5, "name": "My Dataverse"}],
                "pagination": {"hasNextPageNumber": false},
            }
        })))
        .mount(&server)
        .await;

    let sample = dataverse(&server).list_root_items("1").await.unwrap();
    assert_eq!(sample.next_sample_cursor, None);
}

#[tokio::test]
async fn malformed_page_cursors_normalize_to_the_first_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/mydata/retrieve"))
        .and(query_param("selected_page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "items": [],
                "pagination": {"hasNextPageNumber": false},
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    dataverse(&server).list_root_items("bogus").await.unwrap();
    server.verify().await;
}

#[tokio::test]
async fn empty_item_id_delegates_to_root_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/mydata/retrieve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "items": [{"entity_id": 5, "name": "My Dataverse"}],
                "pagination": {"hasNextPageNumber": false},
            }
        })))
        .mount(&server)
        .await;

    let addon = dataverse(&server);
    let children = addon.list_child_items("", "1", None).await.unwrap();
    let root = addon.list_root_items("1").await.unwrap();
    assert_eq!(children, root);
}

#[tokio::test]
async fn datasets_and_files_are_not_containers() {
    let server = MockServer::start().await;
    let addon = dataverse(&server);

    let sample = addon
        .list_child_items("dataset/doi:10.5/X", "", None)
        .await
        .unwrap();
    assert!(sample.items.is_empty());
    let sample = addon.list_child_items("file/7", "", None).await.unwrap();
    assert!(sample.items.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn dataset_item_ids_round_trip_through_item_info() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/datasets/:persistentId"))
        .and(query_param("persistentId", "doi:10.5/X"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dataset_body("doi:10.5/X", "Paper X")))
        .mount(&server)
        .await;

    let item = dataverse(&server)
        .get_item_info("dataset/doi:10.5/X")
        .await
        .unwrap();
    assert_eq!(item.item_id, "dataset/doi:10.5/X");
    assert_eq!(item.item_name, "Paper X");
}

#[tokio::test]
async fn missing_title_is_a_parse_failure_not_an_empty_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/datasets/:persistentId"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "latestVersion": {
                    "datasetPersistentId": "doi:10.5/X",
                    "metadataBlocks": {"citation": {"fields": []}},
                }
            }
        })))
        .mount(&server)
        .await;

    let err = dataverse(&server)
        .get_item_info("dataset/doi:10.5/X")
        .await
        .unwrap_err();
    assert!(matches!(err, AddonError::Parse { .. }));
}

#[tokio::test]
async fn unknown_id_tags_are_rejected() {
    let server = MockServer::start().await;
    let addon = dataverse(&server);

    for op in ["get_item_info", "build_url_for_id"] {
        let err = match op {
            "get_item_info" => addon.get_item_info("invalid/123").await.unwrap_err(),
            _ => addon.build_url_for_id("invalid/123").await.unwrap_err(),
        };
        assert!(matches!(err, AddonError::InvalidId(_)), "{op} must reject");
    }
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn browse_urls_are_composed_without_network_calls() {
    let server = MockServer::start().await;
    let addon = dataverse(&server);
    let base = server.uri();

    let url = addon.build_url_for_id("dataset/doi:10.5/X").await.unwrap();
    assert_eq!(url, format!("{base}/dataset.xhtml?persistentId=doi%3A10.5%2FX"));

    let url = addon.build_url_for_id("dataverse/42").await.unwrap();
    assert_eq!(url, format!("{base}/dataverse.xhtml?id=42"));

    let url = addon.build_url_for_id("file/7").await.unwrap();
    assert_eq!(url, format!("{base}/file.xhtml?fileId=7"));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn account_id_comes_from_the_me_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/:me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": 7}})))
        .mount(&server)
        .await;

    let account_id = dataverse(&server)
        .get_external_account_id(&HashMap::new())
        .await
        .unwrap();
    assert_eq!(account_id, "7");
}

#[tokio::test]
async fn missing_records_map_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dataverses/42"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = dataverse(&server).get_item_info("dataverse/42").await.unwrap_err();
    assert!(matches!(err, AddonError::NotFound { status: 404 }));
}

#[tokio::test]
async fn file_items_resolve_as_resources() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/files/7"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"label": "data.csv"}})),
        )
        .mount(&server)
        .await;

    let item = dataverse(&server).get_item_info("file/7").await.unwrap();
    assert_eq!(item.item_id, "file/7");
    assert_eq!(item.item_name, "data.csv");
    assert_eq!(item.item_type, ItemType::Resource);
    assert!(!item.can_be_root);
}
