use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use eventsite_api_rest::RestServerConfig;
use eventsite_config::Config;
use eventsite_core_contact_impl::ContactServiceConfig;
use eventsite_core_health_impl::HealthServiceConfig;
use types::{Contact, Email, Health, RestServer};

pub mod types;

/// Wire up the rest server and all services it depends on.
pub fn rest_server(config: &Config, email: Email) -> anyhow::Result<RestServer> {
    // Core
    let health = Health::new(
        email.clone(),
        HealthServiceConfig {
            cache_ttl: config.health.cache_ttl.into(),
        },
    );

    let contact = Contact::new(
        email,
        ContactServiceConfig {
            recipient: Arc::new(config.contact.recipient.clone()),
            dispatch_timeout: config.email.timeout.into(),
        },
    );

    // API
    let allowed_origins = config
        .http
        .origins()
        .into_iter()
        .map(|origin| {
            HeaderValue::try_from(origin.as_str())
                .with_context(|| format!("Invalid allowed origin: {origin}"))
        })
        .collect::<anyhow::Result<_>>()?;

    Ok(RestServer::new(
        health,
        contact,
        RestServerConfig { allowed_origins },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn provide_rest_server() {
        let config = eventsite_config::load_dev_config().unwrap();
        let email = crate::email::connect(&config.email).unwrap();

        let _: RestServer = rest_server(&config, email).unwrap();
    }
}
