pub mod error;
pub mod grpc;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use storefront_core::orchestrator::OrderBook;
use storefront_core::user::UserDirectory;

/// Build the user-directory router (HTTP transport).
/// Used by the CLI and available for integration testing.
pub fn build_user_router(directory: Arc<UserDirectory>) -> Router {
    let state = state::UserState { directory };

    Router::new()
        .route("/user", get(routes::users::get_user))
        .route("/users", get(routes::users::list_users))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the order-ledger router. Methods other than GET/POST on `/orders`
/// get a 405 from the method router.
pub fn build_order_router(book: Arc<OrderBook>) -> Router {
    let state = state::OrderState { book };

    Router::new()
        .route(
            "/orders",
            get(routes::orders::list_orders).post(routes::orders::create_order),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve an HTTP router on a pre-bound listener.
///
/// Accepting a `TcpListener` lets the caller read the actual port before
/// starting (useful when the port is 0 and the OS picks a free one).
pub async fn serve_http_on(
    router: Router,
    listener: tokio::net::TcpListener,
) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!("http server listening on http://{addr}");
    axum::serve(listener, router).await?;
    Ok(())
}

/// Serve the user directory over gRPC on a pre-bound listener.
pub async fn serve_grpc_on(
    directory: Arc<UserDirectory>,
    listener: tokio::net::TcpListener,
) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!("user directory gRPC server listening on {addr}");
    tonic::transport::Server::builder()
        .add_service(grpc::GrpcUserDirectory::new(directory).into_service())
        .serve_with_incoming(tokio_stream::wrappers::TcpListenerStream::new(listener))
        .await?;
    Ok(())
}
