//! HTTP surface: one route that triggers a notebook chain and holds the
//! response open until the chain ends.

use actix_web::dev::Server;
use actix_web::http::StatusCode;
use actix_web::middleware::Logger;
use actix_web::{App, HttpResponse, HttpServer, ResponseError, web};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::TcpListener;
use std::sync::Arc;

use crate::consts::{RUN_ROUTE, SUCCESS_MESSAGE};
use crate::engine::Engine;
use crate::error::RunError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessBody {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
}

impl ResponseError for RunError {
    fn status_code(&self) -> StatusCode {
        match self {
            RunError::JobFailed { .. } | RunError::Resolve(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RunError::Busy => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
            details: self.details(),
        })
    }
}

async fn run_notebooks(engine: web::Data<dyn Engine>) -> Result<HttpResponse, RunError> {
    engine.run().await?;
    Ok(HttpResponse::Ok().json(SuccessBody {
        message: SUCCESS_MESSAGE.to_string(),
    }))
}

/// A bound, not yet running, HTTP server.
pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    /// Bind the route to an already-open listener. Pass a listener on port 0
    /// to get an ephemeral port; [`Application::port`] reports the real one.
    pub fn build(listener: TcpListener, engine: Arc<dyn Engine>) -> Result<Self> {
        let port = listener
            .local_addr()
            .context("failed to read listener address")?
            .port();
        let engine = web::Data::from(engine);

        let server = HttpServer::new(move || {
            App::new()
                .wrap(Logger::default())
                .app_data(engine.clone())
                .route(RUN_ROUTE, web::post().to(run_notebooks))
        })
        .listen(listener)
        .context("failed to listen on socket")?
        .run();

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_of(err: RunError) -> (StatusCode, ErrorBody) {
        let response = err.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn job_failure_maps_to_500_with_details() {
        let (status, body) = body_of(RunError::JobFailed {
            job: "a.ipynb".to_string(),
            details: "kernel error".to_string(),
        })
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            ErrorBody {
                error: "Failed to execute a.ipynb".to_string(),
                details: "kernel error".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn busy_maps_to_409() {
        let (status, body) = body_of(RunError::Busy).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.error, crate::consts::BUSY_MESSAGE);
        assert!(body.details.is_empty());
    }

    #[test]
    fn resolve_failure_is_internal() {
        let err = RunError::Resolve(std::io::Error::other("boom"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
