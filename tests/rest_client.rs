//! Aptos REST client against a mock fullnode and faucet

use mockito::{Matcher, Server};
use serde_json::json;
use std::time::Duration;
use yield_prophet_agent::{
    network::{AptosRestClient, ChainClient, EntryFunctionPayload, PollConfig},
    wallet::LocalAccount,
};

const TEST_KEY: &str = "0x1111111111111111111111111111111111111111111111111111111111111111";

fn fast_confirmation() -> PollConfig {
    PollConfig {
        timeout: Duration::from_millis(300),
        initial_delay_ms: 5,
        max_delay_ms: 20,
        exponential_base: 2.0,
    }
}

fn client_for(server: &Server) -> AptosRestClient {
    AptosRestClient::with_urls(&server.url(), &server.url())
        .unwrap()
        .with_confirmation(fast_confirmation())
}

#[tokio::test]
async fn reads_account_resources() {
    let mut server = Server::new_async().await;
    let account = LocalAccount::from_private_key_hex(TEST_KEY).unwrap();
    let address = account.address();

    let mock = server
        .mock("GET", format!("/accounts/{}/resources", address).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                { "type": "0x1::account::Account", "data": { "sequence_number": "3" } },
                { "type": "0x1::coin::CoinStore<0x1::aptos_coin::AptosCoin>", "data": { "coin": { "value": "100" } } }
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let resources = client_for(&server).get_account_resources(&address).await.unwrap();

    mock.assert_async().await;
    assert_eq!(resources.len(), 2);
    assert_eq!(resources[0].resource_type, "0x1::account::Account");
    assert_eq!(resources[1].data["coin"]["value"], "100");
}

#[tokio::test]
async fn submits_signed_transaction_and_waits_for_commit() {
    let mut server = Server::new_async().await;
    let account = LocalAccount::from_private_key_hex(TEST_KEY).unwrap();
    let address = account.address();

    let account_mock = server
        .mock("GET", format!("/accounts/{}", address).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "sequence_number": "7", "authentication_key": address.to_hex() }).to_string())
        .create_async()
        .await;

    let encode_mock = server
        .mock("POST", "/transactions/encode_submission")
        .match_body(Matcher::PartialJson(json!({
            "sender": address.to_hex(),
            "sequence_number": "7",
            "gas_unit_price": "100",
            "payload": { "type": "entry_function_payload", "function": "0x1::yield_prophet::rebalance_portfolio" }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("\"0xdeadbeef\"")
        .create_async()
        .await;

    let submit_mock = server
        .mock("POST", "/transactions")
        .match_body(Matcher::PartialJson(json!({
            "sequence_number": "7",
            "signature": { "type": "ed25519_signature", "public_key": account.public_key_hex() }
        })))
        .with_status(202)
        .with_header("content-type", "application/json")
        .with_body(json!({ "hash": "0xabc123" }).to_string())
        .create_async()
        .await;

    let lookup_mock = server
        .mock("GET", "/transactions/by_hash/0xabc123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "type": "user_transaction",
                "hash": "0xabc123",
                "success": true,
                "gas_used": "42",
                "timestamp": "1700000000000000",
                "vm_status": "Executed successfully"
            })
            .to_string(),
        )
        .expect_at_least(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let payload = EntryFunctionPayload::new(
        "0x1::yield_prophet::rebalance_portfolio",
        vec![json!(["Thala Finance"]), json!(["10000"]), json!(["100000000"])],
    );

    let hash = client.submit_transaction(&account, &payload).await.unwrap();
    assert_eq!(hash, "0xabc123");

    let committed = client.wait_for_transaction(&hash).await.unwrap();
    assert_eq!(committed.success, Some(true));
    assert_eq!(committed.gas_used, Some(42));

    account_mock.assert_async().await;
    encode_mock.assert_async().await;
    submit_mock.assert_async().await;
    lookup_mock.assert_async().await;
}

#[tokio::test]
async fn failed_vm_status_is_an_error() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/transactions/by_hash/0xbad")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "type": "user_transaction",
                "hash": "0xbad",
                "success": false,
                "gas_used": "10",
                "vm_status": "Move abort in 0x1::coin: EINSUFFICIENT_BALANCE"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let err = client_for(&server).wait_for_transaction("0xbad").await.unwrap_err();
    assert!(err.to_string().contains("EINSUFFICIENT_BALANCE"), "{}", err);
}

#[tokio::test]
async fn unknown_hash_times_out_while_waiting() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/transactions/by_hash/0xmissing")
        .with_status(404)
        .with_body(json!({ "message": "Transaction not found", "error_code": "transaction_not_found" }).to_string())
        .expect_at_least(1)
        .create_async()
        .await;

    let client = client_for(&server);
    assert!(client.wait_for_transaction("0xmissing").await.is_err());

    let err = client.get_transaction_by_hash("0xmissing").await.unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[tokio::test]
async fn faucet_mints_to_address() {
    let mut server = Server::new_async().await;
    let address = LocalAccount::from_private_key_hex(TEST_KEY).unwrap().address();

    let mock = server
        .mock("POST", "/mint")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("address".into(), address.to_hex()),
            Matcher::UrlEncoded("amount".into(), "100000000".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!(["0xfaucet"]).to_string())
        .create_async()
        .await;

    client_for(&server).fund_account(&address, 100_000_000).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn faucet_outage_surfaces_status() {
    let mut server = Server::new_async().await;
    let address = LocalAccount::generate().address();

    server
        .mock("POST", "/mint")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("faucet overloaded")
        .create_async()
        .await;

    let err = client_for(&server).fund_account(&address, 1).await.unwrap_err();
    assert!(err.to_string().contains("503"), "{}", err);
}
