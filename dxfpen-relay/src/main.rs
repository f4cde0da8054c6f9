//! # dxfpen-relay
//!
//! Serves DXF exports of recorded plotter jobs over HTTP.

use dxfpen_relay::{listen_addr, router};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let addr = listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("Listening on {addr}");
    axum::serve(listener, router()).await
}
