use anyhow::Context;
use eventsite_config::EmailConfig;
use eventsite_email_impl::EmailServiceImpl;

/// Set up the SMTP transport. No connection is made until the first use.
pub fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    EmailServiceImpl::new(&config.smtp_url, config.from.clone(), *config.timeout)
        .context("Failed to configure SMTP transport")
}
