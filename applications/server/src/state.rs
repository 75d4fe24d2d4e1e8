/// Shared application state
use crate::services::{AuthService, Mailer, OtpService};
use kudo_catalog::Catalog;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub auth_service: Arc<AuthService>,
    pub otp_service: Arc<OtpService>,
    pub mailer: Option<Arc<dyn Mailer>>,
    pub catalog: Arc<Catalog>,
    /// Echo issued codes in the send-otp response
    pub return_otp_in_response: bool,
}

impl AppState {
    pub fn new(
        pool: SqlitePool,
        auth_service: Arc<AuthService>,
        otp_service: Arc<OtpService>,
        catalog: Arc<Catalog>,
    ) -> Self {
        Self {
            pool,
            auth_service,
            otp_service,
            mailer: None,
            catalog,
            return_otp_in_response: true,
        }
    }

    pub fn with_mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    pub fn with_otp_in_response(mut self, enabled: bool) -> Self {
        self.return_otp_in_response = enabled;
        self
    }
}
