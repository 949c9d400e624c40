//! Account and token routes.

use reqwest::Method;
use tracing::info;

use notesgpt_core::error::AppError;
use notesgpt_core::result::AppResult;
use notesgpt_entity::session::{Session, SocialCredential};
use notesgpt_entity::user::{RegisterUser, User};

use crate::body::RequestBody;
use crate::client::ApiClient;
use crate::dto::{ActivateRequest, AuthenticationResponse, LoginRequest, UserEnvelope};

impl ApiClient {
    /// `POST /v1/tokens/authentication`: exchange credentials for a token.
    ///
    /// The token is stored only when the response actually carries one.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Session> {
        let body = RequestBody::json(&LoginRequest { email, password })?;
        let response: AuthenticationResponse = self
            .request_as(Method::POST, "/v1/tokens/authentication", &[], body)
            .await?;
        self.establish(response, "Login successful but no token received.")
            .await
    }

    /// `POST /v1/tokens/social`: exchange a platform sign-in credential.
    pub async fn social_login(&self, credential: &SocialCredential) -> AppResult<Session> {
        if !credential.has_subject() {
            return Err(AppError::validation(
                "either id_token or provider_user_id is required",
            ));
        }
        let body = RequestBody::json(credential)?;
        let response: AuthenticationResponse = self
            .request_as(Method::POST, "/v1/tokens/social", &[], body)
            .await?;
        self.establish(response, "Social login successful but no token received.")
            .await
    }

    /// `POST /v1/users`: create an account. Does not log in.
    pub async fn register(&self, user: &RegisterUser) -> AppResult<User> {
        let body = RequestBody::json(user)?;
        let envelope: UserEnvelope = self
            .request_as(Method::POST, "/v1/users", &[], body)
            .await?;
        info!(user_id = %envelope.user.id, "Account registered");
        Ok(envelope.user)
    }

    /// `PUT /v1/users/activated`: confirm an account with its activation token.
    pub async fn activate(&self, token: &str) -> AppResult<User> {
        let body = RequestBody::json(&ActivateRequest { token })?;
        let envelope: UserEnvelope = self
            .request_as(Method::PUT, "/v1/users/activated", &[], body)
            .await?;
        info!(user_id = %envelope.user.id, "Account activated");
        Ok(envelope.user)
    }

    async fn establish(
        &self,
        response: AuthenticationResponse,
        missing_token: &str,
    ) -> AppResult<Session> {
        let token = response
            .authentication_token
            .map(|t| t.token)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::request_failed(200, missing_token))?;

        self.store_token(&token).await?;

        match response.user {
            Some(user) => {
                info!(user_id = %user.id, "Session established");
                Ok(Session::established(token, user))
            }
            None => Ok(Session::restored(token)),
        }
    }
}
