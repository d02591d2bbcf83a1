mod common;
mod error;
mod live;
mod r#match;
mod round;
mod routes;
mod season;
mod user;

pub use error::{ApiError, ApiResult};

use crate::routes::ServerRoutes;
use axum::response::IntoResponse;
use core::MatchdaySimulator;
use log::{error, info};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;

pub struct MatchdayServer {
    data: GameAppData,
    port: u16,
}

impl MatchdayServer {
    pub fn new(data: GameAppData, port: u16) -> Self {
        MatchdayServer { data, port }
    }

    pub async fn run(&self) {
        let app = ServerRoutes::create()
            .layer(
                ServiceBuilder::new()
                    // Panicking handlers become 500s instead of dropped connections
                    .layer(CatchPanicLayer::custom(|_err| {
                        ApiError::InternalError("handler panicked".to_string()).into_response()
                    })),
            )
            .with_state(self.data.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));

        let listener = match TcpListener::bind(addr).await {
            Ok(listener) => listener,
            Err(e) => {
                error!("Failed to bind to address {}: {}", addr, e);
                return;
            }
        };

        info!("listen at: http://localhost:{}", self.port);

        if let Err(e) = axum::serve(listener, app).await {
            error!("Server error: {}", e);
        }
    }
}

#[derive(Clone)]
pub struct GameAppData {
    pub simulator: Arc<MatchdaySimulator>,
}
