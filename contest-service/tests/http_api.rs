mod common;
use common::{spawn_app, OPERATOR_TOKEN};

use reqwest::{Client, StatusCode};
use serde_json::json;

async fn register(client: &Client, base: &str, video_id: &str, title: &str) -> StatusCode {
    client
        .post(format!("{}/videos", base))
        .json(&json!({
            "video_id": video_id,
            "title": title,
            "creator": "creator",
            "archive_reference": "ar://tx",
        }))
        .send()
        .await
        .expect("register request")
        .status()
}

async fn vote(client: &Client, base: &str, voter: &str, video_id: &str) -> StatusCode {
    client
        .post(format!("{}/vote", base))
        .json(&json!({ "voter": voter, "video_id": video_id }))
        .send()
        .await
        .expect("vote request")
        .status()
}

#[tokio::test]
#[serial_test::serial]
async fn full_contest_flow_over_http() -> anyhow::Result<()> {
    let base = spawn_app().await?;
    let client = Client::new();

    // Registration: first insert wins, duplicates are soft no-ops.
    assert_eq!(register(&client, &base, "vid-a", "A").await, StatusCode::CREATED);
    assert_eq!(register(&client, &base, "vid-a", "A2").await, StatusCode::OK);
    assert_eq!(register(&client, &base, "vid-b", "B").await, StatusCode::CREATED);
    assert_eq!(register(&client, &base, "vid-c", "C").await, StatusCode::CREATED);
    assert_eq!(
        register(&client, &base, "", "empty").await,
        StatusCode::BAD_REQUEST
    );

    // Vote intake per the pinned contest scenario.
    for _ in 0..3 {
        assert_eq!(vote(&client, &base, "voter1", "vid-a").await, StatusCode::OK);
    }
    assert_eq!(
        vote(&client, &base, "voter1", "vid-a").await,
        StatusCode::TOO_MANY_REQUESTS
    );
    assert_eq!(vote(&client, &base, "voter2", "vid-a").await, StatusCode::OK);
    assert_eq!(vote(&client, &base, "voter2", "vid-b").await, StatusCode::OK);
    assert_eq!(vote(&client, &base, "voter3", "vid-c").await, StatusCode::OK);
    assert_eq!(
        vote(&client, &base, "voter3", "missing").await,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        vote(&client, &base, "", "vid-a").await,
        StatusCode::BAD_REQUEST
    );

    // A successful vote returns a receipt with the exact cost charged.
    let receipt: serde_json::Value = client
        .post(format!("{}/vote", base))
        .json(&json!({ "voter": "voter4", "video_id": "vid-b" }))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    assert_eq!(receipt["receipt"]["cost_lamports"], 900_000);
    assert_eq!(receipt["receipt"]["video_id"], "vid-b");
    assert!(receipt["receipt"]["reference"].as_str().unwrap().len() > 0);

    // Standings: vid-a leads, vid-b and vid-c tie broken by
    // registration order.
    let standings: serde_json::Value = client
        .get(format!("{}/standings", base))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    assert_eq!(standings["total_votes"], 7);
    assert_eq!(standings["pool_lamports"], 6_300_000);
    assert_eq!(standings["vote_cost_lamports"], 900_000);
    let entries = standings["entries"].as_array().unwrap();
    assert_eq!(entries[0]["video_id"], "vid-a");
    assert_eq!(entries[0]["votes"], 4);
    assert_eq!(entries[0]["voter_count"], 2);
    assert_eq!(entries[1]["video_id"], "vid-b");
    assert_eq!(entries[1]["votes"], 2);
    assert_eq!(entries[2]["video_id"], "vid-c");
    assert!(entries[0].get("voter_ledger").is_none());

    // Settlement is operator-only.
    let unauthorized = client
        .post(format!("{}/contest/execute", base))
        .send()
        .await?;
    assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);
    let wrong_token = client
        .post(format!("{}/contest/execute", base))
        .bearer_auth("not-the-token")
        .send()
        .await?;
    assert_eq!(wrong_token.status(), StatusCode::UNAUTHORIZED);

    let result: serde_json::Value = client
        .post(format!("{}/contest/execute", base))
        .bearer_auth(OPERATOR_TOKEN)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    assert_eq!(result["pool_lamports"], 6_300_000);
    let winners = result["winners"].as_array().unwrap();
    assert_eq!(winners[0]["video_id"], "vid-a");
    assert_eq!(winners[0]["prize_lamports"], 6_300_000 * 40 / 100);
    assert_eq!(winners[1]["video_id"], "vid-b");
    assert_eq!(winners[1]["prize_lamports"], 6_300_000 * 6 / 100);
    assert_eq!(
        result["breakdown"]["creator_fund_lamports"],
        6_300_000 * 20 / 100
    );

    // Settlement left the ledger untouched.
    let standings: serde_json::Value = client
        .get(format!("{}/standings", base))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(standings["total_votes"], 7);

    // Metrics reflect the traffic above.
    let metrics: serde_json::Value = client
        .get(format!("{}/metrics", base))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    assert!(metrics["settlements_total"].as_u64().unwrap() >= 1);
    let votes_total = metrics["votes_total"].as_array().unwrap();
    let accepted = votes_total
        .iter()
        .find(|v| v["outcome"] == "accepted")
        .expect("accepted counter");
    assert!(accepted["count"].as_u64().unwrap() >= 6);

    // Epoch reset clears entries and pool.
    client
        .post(format!("{}/contest/reset", base))
        .bearer_auth(OPERATOR_TOKEN)
        .send()
        .await?
        .error_for_status()?;
    let standings: serde_json::Value = client
        .get(format!("{}/standings", base))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(standings["total_votes"], 0);
    assert!(standings["entries"].as_array().unwrap().is_empty());

    Ok(())
}

#[tokio::test]
#[serial_test::serial]
async fn execute_without_votes_is_a_conflict() -> anyhow::Result<()> {
    let base = spawn_app().await?;
    let client = Client::new();

    // No videos at all.
    let resp = client
        .post(format!("{}/contest/execute", base))
        .bearer_auth(OPERATOR_TOKEN)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Registered videos without votes still cannot settle.
    assert_eq!(register(&client, &base, "vid-a", "A").await, StatusCode::CREATED);
    let resp = client
        .post(format!("{}/contest/execute", base))
        .bearer_auth(OPERATOR_TOKEN)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    Ok(())
}
