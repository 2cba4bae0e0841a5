use std::time::Duration;

use anyhow::bail;
use clap::Subcommand;
use eventsite_client::{ContactForm, HttpRelayClient, Notification, SubmitOutcome};
use url::Url;

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Fill in the contact form and submit it once
    Send {
        /// Base url of the relay, e.g. `https://event.example.com`
        #[arg(long, env = "EVENTSITE_RELAY_URL")]
        relay_url: Url,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
        /// Request timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout: u64,
    },
}

impl ContactCommand {
    pub async fn invoke(self) -> anyhow::Result<()> {
        match self {
            ContactCommand::Send {
                relay_url,
                name,
                email,
                message,
                timeout,
            } => {
                let relay = HttpRelayClient::new(&relay_url, Duration::from_secs(timeout))?;
                let form = ContactForm::with_values(name, email, message);
                send(relay, form).await
            }
        }
    }
}

async fn send(relay: HttpRelayClient, mut form: ContactForm) -> anyhow::Result<()> {
    let outcome = form.submit(&relay).await?;

    match (outcome, form.notification()) {
        (SubmitOutcome::Sent, Some(Notification::Success(message))) => {
            println!("{message}");
            Ok(())
        }
        (_, Some(Notification::Error(error))) => bail!("{error}"),
        _ => bail!("Unexpected form state after submission"),
    }
}
