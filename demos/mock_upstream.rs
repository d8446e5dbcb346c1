//! Stand-in for the prompt API the chat client talks to.
//!
//! Run with `cargo run --example mock_upstream`, then start the relay with
//! its defaults and point `relay-probe` at it.

use axum::{routing::post, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;

#[derive(Deserialize)]
struct Prompt {
    prompt: String,
}

async fn answer(Json(input): Json<Prompt>) -> Json<Value> {
    Json(json!({ "resposta": format!("You said: {}", input.prompt) }))
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let app = Router::new().route("/api/prompt", post(answer));

    let addr = SocketAddr::from(([127, 0, 0, 1], 1234));
    println!("Mock prompt API listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}
