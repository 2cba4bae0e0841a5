use std::{future::Future, net::IpAddr};

use axum::{http::HeaderValue, Router};
use eventsite_core_contact_contracts::ContactService;
use eventsite_core_health_contracts::HealthService;
use tokio::net::TcpListener;

mod errors;
mod middlewares;
mod models;
mod routes;

pub use routes::contact::CONTACT_ROUTE;

#[derive(Debug, Clone)]
pub struct RestServer<Health, Contact> {
    health: Health,
    contact: Contact,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    /// Values of the `Origin` header that may call the api from a browser.
    pub allowed_origins: Vec<HeaderValue>,
}

impl<Health, Contact> RestServer<Health, Contact>
where
    Health: HealthService,
    Contact: ContactService,
{
    pub fn new(health: Health, contact: Contact, config: RestServerConfig) -> Self {
        Self {
            health,
            contact,
            config,
        }
    }

    /// Serve the api until `shutdown` resolves.
    pub async fn serve(
        self,
        host: IpAddr,
        port: u16,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let router = self.router();
        let listener = TcpListener::bind((host, port)).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(Into::into)
    }

    pub fn router(self) -> Router<()> {
        let router = Router::new()
            .merge(routes::health::router(self.health.into()))
            .merge(routes::contact::router(self.contact.into()));

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::cors::add(router, self.config.allowed_origins);
        let router = middlewares::trace::add(router);
        middlewares::request_id::add(router)
    }
}
