#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;
use reqwest::Client;
use server::hub::{EternalGame, Hub, SharedHub};

/// Build a reqwest client for tests.
pub fn client() -> Client {
    Client::new()
}

/// A hub with a fixed seed. Nothing plays until the test calls `tick()`.
pub fn seeded_hub(seed: u64) -> SharedHub {
    seeded_hub_with_buffer(seed, 64)
}

/// Large enough buffers let a subscriber collect a whole game without lagging.
pub fn seeded_hub_with_buffer(seed: u64, buffer: usize) -> SharedHub {
    Hub::new(EternalGame::with_rng(StdRng::seed_from_u64(seed)), buffer)
}

/// Serve the router on an ephemeral port and return its base URL.
pub async fn spawn_server(hub: SharedHub) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, server::routes::router(hub))
            .await
            .expect("test server");
    });
    format!("http://{addr}")
}

/// Tick until the current game has been finished and announced.
pub async fn finish_game(hub: &SharedHub) {
    while !hub.tick().await {}
}
