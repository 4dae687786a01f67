//! HTTP client for the ClarityExpense backend.
//!
//! All network calls go through [`ApiClient`], which composes two explicit
//! middleware stages around the transport so individual views never handle
//! token plumbing:
//!
//! 1. attach-credential: read the bearer token from the session store and
//!    add `Authorization: Bearer <token>` when present; requests go out
//!    unauthenticated otherwise (login and register are public endpoints).
//! 2. observe-401: when a credentialed request is rejected, clear the
//!    session store and emit [`SessionEvent::Expired`] before the caller
//!    observes the error, so no view ever races a stale authenticated
//!    state. A 401 on an uncredentialed request is not an expiry - it is a
//!    normal backend rejection (bad login credentials) and passes through
//!    with its body so the calling form can show it inline.

use std::sync::Arc;

use reqwest::{RequestBuilder, Response, StatusCode};
use tokio::sync::mpsc;

use super::error::ApiError;
use super::types::{
    AuthResponse, Balance, Category, CategoryExpense, LoginRequest, NewCategory, NewTransaction,
    Page, RegisterRequest, Transaction,
};
use crate::session::SessionStore;

/// Session lifecycle notifications emitted by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A request was rejected with 401 and the session has been cleared.
    /// Emitted at most once per live session, even when several in-flight
    /// requests fail simultaneously.
    Expired,
}

/// Single outbound gateway to the backend.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
    events: mpsc::UnboundedSender<SessionEvent>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        session: Arc<SessionStore>,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            session,
            events,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Transport + both middleware stages. Every endpoint call funnels
    /// through here so the authorization contract is enforced uniformly.
    ///
    /// The token is read once so the attach and observe stages agree on
    /// whether this request carried a credential.
    async fn dispatch(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let token = self.session.token();
        let credentialed = token.is_some();
        let builder = match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder.send().await?;

        if credentialed && response.status() == StatusCode::UNAUTHORIZED {
            // The first 401 wins: logout() reports whether this call
            // actually cleared a session, so concurrent failures emit a
            // single Expired event.
            if self.session.logout() {
                tracing::info!("session rejected by backend, logging out");
                let _ = self.events.send(SessionEvent::Expired);
            }
            return Err(ApiError::Unauthorized);
        }

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Backend { status, message });
        }

        Ok(response)
    }

    /// POST /api/auth/login — exchange credentials for token + identity.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let response = self
            .dispatch(self.http.post(self.url("/api/auth/login")).json(request))
            .await?;
        Ok(response.json().await?)
    }

    /// POST /api/auth/register — create an account.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        self.dispatch(self.http.post(self.url("/api/auth/register")).json(request))
            .await?;
        Ok(())
    }

    /// GET /api/dashboard/balance
    pub async fn balance(&self) -> Result<Balance, ApiError> {
        let response = self
            .dispatch(self.http.get(self.url("/api/dashboard/balance")))
            .await?;
        Ok(response.json().await?)
    }

    /// GET /api/dashboard/expenses-by-category
    pub async fn expenses_by_category(&self) -> Result<Vec<CategoryExpense>, ApiError> {
        let response = self
            .dispatch(self.http.get(self.url("/api/dashboard/expenses-by-category")))
            .await?;
        Ok(response.json().await?)
    }

    /// GET /api/categories
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        let response = self
            .dispatch(self.http.get(self.url("/api/categories")))
            .await?;
        Ok(response.json().await?)
    }

    /// POST /api/categories
    pub async fn create_category(&self, new: &NewCategory) -> Result<Category, ApiError> {
        let response = self
            .dispatch(self.http.post(self.url("/api/categories")).json(new))
            .await?;
        Ok(response.json().await?)
    }

    /// GET /api/transactions?page=&size=
    pub async fn transactions(&self, page: u32, size: u32) -> Result<Page<Transaction>, ApiError> {
        let response = self
            .dispatch(
                self.http
                    .get(self.url("/api/transactions"))
                    .query(&[("page", page), ("size", size)]),
            )
            .await?;
        Ok(response.json().await?)
    }

    /// POST /api/transactions
    pub async fn create_transaction(
        &self,
        new: &NewTransaction,
    ) -> Result<Transaction, ApiError> {
        let response = self
            .dispatch(self.http.post(self.url("/api/transactions")).json(new))
            .await?;
        Ok(response.json().await?)
    }
}
