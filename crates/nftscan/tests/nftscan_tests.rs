// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the NFTScan binding against a mock server

use std::sync::Arc;

use api_client::{ApiError, Arguments, ValidationError};
use nftscan::{ACCESS_TOKEN_HEADER, NftScanError, Page, ResponseEnvelope};
use serde_json::json;
use shared_types::ErcStandard;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param},
};

use fixtures::*;

async fn mount_ok(server: &MockServer, endpoint: &str, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(format!("/api/v1/{endpoint}")))
        .and(body_json(body))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({"total": 0}))))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn get_all_nft_by_user_address_sends_wallet_type_and_page() {
    init_tracing();
    let server = MockServer::start().await;
    mount_token_grant(&server).await;
    mount_ok(
        &server,
        "getAllNftByUserAddress",
        json!({
            "erc": "erc721",
            "user_address": USER,
            "page_index": 0,
            "page_size": 20,
            "walletType": 3
        }),
    )
    .await;

    let response = client(&server.uri())
        .get_all_nft_by_user_address(ErcStandard::Erc721, USER, Page::default(), None)
        .await
        .unwrap();

    assert_eq!(response.value()["data"]["total"], 0);
}

#[tokio::test]
async fn every_typed_method_posts_its_body() {
    init_tracing();
    let server = MockServer::start().await;
    mount_token_grant(&server).await;
    let page = Page::new(1, 50);

    mount_ok(
        &server,
        "getGroupByNftContract",
        json!({"erc": "erc1155", "user_address": USER}),
    )
    .await;
    mount_ok(
        &server,
        "getMintByUserAddress",
        json!({"user_address": USER, "page_index": 1, "page_size": 50}),
    )
    .await;
    mount_ok(
        &server,
        "getMintByUserAddressAndNftAddress",
        json!({"nft_address": CONTRACT, "user_address": USER, "page_index": 1, "page_size": 50}),
    )
    .await;
    mount_ok(
        &server,
        "getNFTRecordByContract",
        json!({"nft_address": CONTRACT, "page_index": 1, "page_size": 50}),
    )
    .await;
    mount_ok(
        &server,
        "getNftByContractAndUserAddress",
        json!({"nft_address": CONTRACT, "user_address": USER, "page_index": 1, "page_size": 50}),
    )
    .await;
    mount_ok(
        &server,
        "getRecordByUserAddressAndTokenId",
        json!({
            "nft_address": CONTRACT,
            "token_id": "7",
            "user_address": USER,
            "page_index": 1,
            "page_size": 50
        }),
    )
    .await;
    mount_ok(
        &server,
        "getSingleNft",
        json!({"nft_address": CONTRACT, "token_id": "7"}),
    )
    .await;
    mount_ok(
        &server,
        "getSingleNftRecord",
        json!({"nft_address": CONTRACT, "token_id": "7", "page_index": 1, "page_size": 50}),
    )
    .await;
    mount_ok(
        &server,
        "getStates",
        json!({"nft_address": [CONTRACT, OTHER_CONTRACT]}),
    )
    .await;
    mount_ok(
        &server,
        "getUserRecordByContract",
        json!({"nft_address": CONTRACT, "user_address": USER, "page_index": 1, "page_size": 50}),
    )
    .await;
    mount_ok(
        &server,
        "getUserRecordByUserAddress",
        json!({"user_address": USER, "page_index": 1, "page_size": 50}),
    )
    .await;

    let client = client(&server.uri());
    client
        .get_group_by_nft_contract(ErcStandard::Erc1155, USER, None)
        .await
        .unwrap();
    client
        .get_mint_by_user_address(USER, page, None)
        .await
        .unwrap();
    client
        .get_mint_by_user_address_and_nft_address(CONTRACT, USER, page, None)
        .await
        .unwrap();
    client
        .get_nft_record_by_contract(CONTRACT, page, None)
        .await
        .unwrap();
    client
        .get_nft_by_contract_and_user_address(CONTRACT, USER, page, None)
        .await
        .unwrap();
    client
        .get_record_by_user_address_and_token_id(CONTRACT, "7", USER, page, None)
        .await
        .unwrap();
    client.get_single_nft(CONTRACT, "7", None).await.unwrap();
    client
        .get_single_nft_record(CONTRACT, "7", page, None)
        .await
        .unwrap();
    client
        .get_states(&[CONTRACT, OTHER_CONTRACT], None)
        .await
        .unwrap();
    client
        .get_user_record_by_contract(CONTRACT, USER, page, None)
        .await
        .unwrap();
    client
        .get_user_record_by_user_address(USER, page, None)
        .await
        .unwrap();
}

#[tokio::test]
async fn default_client_authenticates_with_access_token() {
    init_tracing();
    let server = MockServer::start().await;
    mount_token_grant(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/getSingleNft"))
        .and(header(ACCESS_TOKEN_HEADER, TEST_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
        .expect(1)
        .mount(&server)
        .await;

    client(&server.uri())
        .get_single_nft(CONTRACT, "1", None)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let call = requests
        .iter()
        .find(|request| request.url.path() == "/api/v1/getSingleNft")
        .unwrap();
    assert!(!call.headers.contains_key("X-API-KEY"));
    assert!(!call.headers.contains_key("X-SIGNATURE"));
    assert!(!String::from_utf8_lossy(&call.body).contains(TEST_API_SECRET));
    assert!(
        call.headers
            .values()
            .all(|value| value.to_str().unwrap_or_default() != TEST_API_SECRET)
    );
    assert!(call.url.query().is_none());
}

#[tokio::test]
async fn access_token_is_exchanged_once_and_reused() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gw/token"))
        .and(query_param("apiKey", TEST_API_KEY))
        .and(query_param("apiSecret", TEST_API_SECRET))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_grant(TEST_TOKEN, 3600)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/getSingleNft"))
        .and(header(ACCESS_TOKEN_HEADER, TEST_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({"name": "Ape"}))))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server.uri());
    client.get_single_nft(CONTRACT, "1", None).await.unwrap();
    let response = client.get_single_nft(CONTRACT, "2", None).await.unwrap();

    assert_eq!(response.value()["data"]["name"], "Ape");
}

#[tokio::test]
async fn concurrent_callers_share_one_exchange() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gw/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_grant(TEST_TOKEN, 3600)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/getSingleNft"))
        .and(header(ACCESS_TOKEN_HEADER, TEST_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
        .expect(4)
        .mount(&server)
        .await;

    let client = Arc::new(client(&server.uri()));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let client = Arc::clone(&client);
            tokio::spawn(async move {
                client
                    .get_single_nft(CONTRACT, &i.to_string(), None)
                    .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }
}

#[tokio::test]
async fn expired_token_is_refreshed() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gw/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_grant(TEST_TOKEN, 0)))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/getSingleNft"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server.uri());
    client.get_single_nft(CONTRACT, "1", None).await.unwrap();
    client.get_single_nft(CONTRACT, "1", None).await.unwrap();
}

#[tokio::test]
async fn invalidated_token_is_exchanged_again() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gw/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_grant(TEST_TOKEN, 3600)))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/getSingleNft"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server.uri());
    client.get_single_nft(CONTRACT, "1", None).await.unwrap();
    client.inner().authenticator().invalidate().await;
    client.get_single_nft(CONTRACT, "1", None).await.unwrap();
}

#[tokio::test]
async fn rejected_token_exchange_sends_nothing() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gw/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server.uri())
        .get_single_nft(CONTRACT, "1", None)
        .await
        .unwrap_err();

    match err {
        ApiError::Authentication { message } => {
            assert!(message.contains("401"));
            assert!(!message.contains(TEST_API_SECRET));
        }
        other => panic!("Expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn envelope_failure_is_returned_unchanged_and_decodable() {
    init_tracing();
    let server = MockServer::start().await;
    mount_token_grant(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/getSingleNft"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"code": 404, "msg": "NFT not found", "data": null}),
        ))
        .mount(&server)
        .await;

    let response = client(&server.uri())
        .get_single_nft(CONTRACT, "999", None)
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let envelope = ResponseEnvelope::from_response(&response).unwrap();
    assert!(!envelope.is_success());
    assert_eq!(
        envelope.into_data().unwrap_err(),
        NftScanError::Api {
            code: 404,
            message: "NFT not found".to_string()
        }
    );
}

#[tokio::test]
async fn call_by_name_dispatches_to_the_endpoint() {
    init_tracing();
    let server = MockServer::start().await;
    mount_token_grant(&server).await;
    mount_ok(
        &server,
        "getMintByUserAddress",
        json!({"user_address": USER, "page_index": 0, "page_size": 20}),
    )
    .await;

    let arguments = Arguments::new().with("user_address", USER);
    client(&server.uri())
        .call("getMintByUserAddress", &arguments, None)
        .await
        .unwrap();
}

#[tokio::test]
async fn unknown_endpoint_name_is_rejected() {
    let server = MockServer::start().await;
    mount_token_grant(&server).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server.uri())
        .call("getEverything", &Arguments::new(), None)
        .await
        .unwrap_err();

    match err {
        ApiError::Validation(ValidationError::UnknownEndpoint(name)) => {
            assert_eq!(name, "getEverything");
        }
        other => panic!("Expected UnknownEndpoint error, got: {other:?}"),
    }
}

#[tokio::test]
async fn oversized_page_is_rejected_before_sending() {
    let server = MockServer::start().await;
    mount_token_grant(&server).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server.uri())
        .get_user_record_by_user_address(USER, Page::new(0, 101), None)
        .await
        .unwrap_err();

    assert!(err.is_validation());
}

#[tokio::test]
async fn malformed_address_is_rejected_before_sending() {
    let server = MockServer::start().await;
    mount_token_grant(&server).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server.uri());

    let err = client
        .get_single_nft("not-an-address", "1", None)
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = client
        .get_states(&[CONTRACT, "0x12"], None)
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn typed_method_exports_raw_body() {
    init_tracing();
    let server = MockServer::start().await;
    mount_token_grant(&server).await;
    let raw = r#"{"code":200,"msg":null,"data":{"total":2}}"#;

    Mock::given(method("POST"))
        .and(path("/api/v1/getNFTRecordByContract"))
        .respond_with(ResponseTemplate::new(200).set_body_string(raw))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let export = dir.path().join("records.json");

    let response = client(&server.uri())
        .get_nft_record_by_contract(CONTRACT, Page::default(), Some(export.as_path()))
        .await
        .unwrap();

    assert_eq!(response.body(), raw.as_bytes());
    assert_eq!(std::fs::read_to_string(&export).unwrap(), raw);
}

#[tokio::test]
async fn http_error_does_not_export() {
    init_tracing();
    let server = MockServer::start().await;
    mount_token_grant(&server).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let export = dir.path().join("never.json");

    let err = client(&server.uri())
        .get_states(&[CONTRACT], Some(export.as_path()))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(!export.exists());
}
