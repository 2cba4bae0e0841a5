use std::{sync::Arc, time::Duration};

use eventsite_core_health_contracts::{HealthService, HealthStatus};
use eventsite_email_contracts::EmailService;
use tokio::{sync::RwLock, time::Instant};
use tracing::error;

#[derive(Debug, Clone)]
pub struct HealthServiceImpl<Email> {
    email: Email,
    config: HealthServiceConfig,
    state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct HealthServiceConfig {
    pub cache_ttl: Duration,
}

#[derive(Debug, Default)]
struct State {
    cache: RwLock<Option<CachedStatus>>,
}

#[derive(Debug)]
struct CachedStatus {
    status: HealthStatus,
    timestamp: Instant,
}

impl<Email> HealthServiceImpl<Email> {
    pub fn new(email: Email, config: HealthServiceConfig) -> Self {
        Self {
            email,
            config,
            state: Default::default(),
        }
    }
}

impl<Email> HealthService for HealthServiceImpl<Email>
where
    Email: EmailService,
{
    async fn get_status(&self) -> HealthStatus {
        let now = Instant::now();
        let cache_guard = self.state.cache.read().await;
        if let Some(cached) = cache_guard
            .as_ref()
            .filter(|c| now < c.timestamp + self.config.cache_ttl)
        {
            return cached.status;
        }
        drop(cache_guard);

        let mut cache_guard = self.state.cache.write().await;
        if let Some(cached) = cache_guard
            .as_ref()
            .filter(|c| now < c.timestamp + self.config.cache_ttl)
        {
            return cached.status;
        }

        let email = self
            .email
            .ping()
            .await
            .inspect_err(|err| error!("Failed to ping smtp server: {err}"))
            .is_ok();

        let status = HealthStatus { email };

        cache_guard
            .insert(CachedStatus {
                status,
                timestamp: now,
            })
            .status
    }
}

#[cfg(test)]
mod tests {
    use eventsite_email_contracts::MockEmailService;

    use super::*;

    fn make_sut(email: MockEmailService) -> HealthServiceImpl<MockEmailService> {
        HealthServiceImpl::new(
            email,
            HealthServiceConfig {
                cache_ttl: Duration::from_secs(2),
            },
        )
    }

    #[tokio::test(start_paused = true)]
    async fn status_is_cached() {
        // Arrange
        let sut = make_sut(MockEmailService::new().with_ping(true));

        // Act
        let first = sut.get_status().await;
        tokio::time::advance(Duration::from_secs(1)).await;
        let second = sut.get_status().await;

        // Assert
        assert_eq!(first, HealthStatus { email: true });
        assert_eq!(second, first);
    }

    #[tokio::test(start_paused = true)]
    async fn status_is_refreshed_after_ttl() {
        // Arrange
        let mut email = MockEmailService::new();
        let mut results = vec![Err(anyhow::anyhow!("connection refused")), Ok(())];
        email.expect_ping().times(2).returning(move || {
            let result = results.pop().unwrap();
            Box::pin(std::future::ready(result))
        });
        let sut = make_sut(email);

        // Act
        let first = sut.get_status().await;
        tokio::time::advance(Duration::from_secs(3)).await;
        let second = sut.get_status().await;

        // Assert
        assert_eq!(first, HealthStatus { email: true });
        assert_eq!(second, HealthStatus { email: false });
    }
}
