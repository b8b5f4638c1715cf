use serde::Serialize;

use crate::domain::user::User;

#[derive(Debug, Clone, Serialize)]
pub struct EmailAddress {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailRequest<'a> {
    sender: &'a EmailAddress,
    to: Vec<EmailAddress>,
    subject: &'a str,
    html_content: &'a str,
    text_content: &'a str,
}

/// Transactional email client for a Brevo-compatible HTTP API.
///
/// Sending is fire-and-forget from the caller's perspective: failures are
/// errors, retries are the caller's business.
pub struct EmailClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    sender: EmailAddress,
}

impl EmailClient {
    pub fn new(base_url: String, api_key: String, sender_name: String, sender_email: String) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("failed to create reqwest client");

        tracing::info!(%base_url, sender = %sender_email, "EmailClient created");

        Self {
            http_client,
            base_url,
            api_key,
            sender: EmailAddress {
                name: sender_name,
                email: sender_email,
            },
        }
    }

    pub async fn send(
        &self,
        to: EmailAddress,
        subject: &str,
        html: &str,
        text: &str,
    ) -> anyhow::Result<()> {
        let url = format!("{}/v3/smtp/email", self.base_url);
        tracing::debug!(%url, to = %to.email, %subject, "sending transactional email");

        let request = SendEmailRequest {
            sender: &self.sender,
            to: vec![to],
            subject,
            html_content: html,
            text_content: text,
        };

        let response = self
            .http_client
            .post(&url)
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "failed to send request to mail API");
                anyhow::anyhow!("mail API request failed: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, %body, "mail API returned error");
            return Err(anyhow::anyhow!("mail API error ({}): {}", status, body));
        }

        tracing::info!(%subject, "email accepted by mail API");
        Ok(())
    }

    pub async fn send_welcome(&self, user: &User, url: &str) -> anyhow::Result<()> {
        let first_name = user.first_name();
        let subject = format!("Welcome to the Tourbook family, {first_name}!");
        let html = format!(
            "<p>Hi {first_name},</p>\
             <p>Welcome to Tourbook, we're glad to have you!</p>\
             <p><a href=\"{url}\">Upload your user photo and complete your profile</a></p>"
        );
        let text = format!(
            "Hi {first_name},\n\nWelcome to Tourbook, we're glad to have you!\n\
             Complete your profile here: {url}\n"
        );

        self.send(
            EmailAddress {
                name: user.name.clone(),
                email: user.email.clone(),
            },
            &subject,
            &html,
            &text,
        )
        .await
    }
}
