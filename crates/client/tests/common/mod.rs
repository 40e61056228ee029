//! Shared HTTP stub support for client integration tests.

use axum::Router;
use tokio::net::TcpListener;

/// Serve `router` on an ephemeral local port and return the base URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub listener addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub server");
    });

    format!("http://{addr}")
}
