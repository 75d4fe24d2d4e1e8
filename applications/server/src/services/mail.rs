/// Outbound mail for verification codes
use crate::{
    config::MailSettings,
    error::{Result, ServerError},
};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

const OTP_SUBJECT: &str = "Your Kudo verification code";

/// Delivers verification codes to users
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_otp(&self, to: &str, name: Option<&str>, code: &str, ttl_minutes: i64) -> Result<()>;
}

/// Mailer backed by the Resend HTTP API
#[derive(Debug, Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

#[derive(Debug, Serialize)]
struct SendEmail<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: String,
}

impl ResendMailer {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>, from: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ServerError::Mail(e.to_string()))?;

        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            from: from.into(),
        })
    }

    /// Build a mailer from settings; `None` without an API key
    pub fn from_settings(settings: &MailSettings) -> Result<Option<Self>> {
        match settings.resend_api_key.as_deref().filter(|key| !key.is_empty()) {
            Some(key) => Self::new(&settings.api_url, key, &settings.from).map(Some),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send_otp(&self, to: &str, name: Option<&str>, code: &str, ttl_minutes: i64) -> Result<()> {
        let body = SendEmail {
            from: &self.from,
            to: [to],
            subject: OTP_SUBJECT,
            html: otp_email_html(name, code, ttl_minutes),
        };

        let response = self
            .client
            .post(format!("{}/emails", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ServerError::Mail(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ServerError::Mail(format!("Resend returned {}: {}", status, detail)));
        }

        tracing::info!(to = %to, "Sent verification email");
        Ok(())
    }
}

/// HTML body of the verification email
pub fn otp_email_html(name: Option<&str>, code: &str, ttl_minutes: i64) -> String {
    let name = name.map(str::trim).filter(|n| !n.is_empty()).unwrap_or("there");
    format!(
        r#"<div style="font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 500px; margin: 0 auto; padding: 40px 20px;">
  <div style="text-align: center; margin-bottom: 30px;">
    <h1 style="color: #1a1a1a; font-size: 24px; margin: 0;">Welcome to Kudo!</h1>
  </div>
  <p style="color: #666; font-size: 16px; line-height: 1.6; margin-bottom: 24px;">
    Hi {name},<br><br>
    Your verification code is:
  </p>
  <div style="background: linear-gradient(135deg, #7B2CBF, #E040FB); color: white; font-size: 32px; font-weight: bold; letter-spacing: 8px; text-align: center; padding: 20px; border-radius: 12px; margin-bottom: 24px;">
    {code}
  </div>
  <p style="color: #999; font-size: 14px; text-align: center;">
    This code expires in {ttl_minutes} minutes.
  </p>
</div>"#
    )
}
