//! Login, logout and keep-alive.
//!
//! The session is the client's token: empty means logged out. Each transition
//! makes one call to an identity endpoint inside a [`RouteGuard`], so the
//! client is back on the betting route with its standing headers whatever the
//! outcome.

use crate::classify;
use crate::client::BetfairClient;
use crate::dto::identity::{CertLoginResponse, SessionResponse};
use crate::endpoint::{RouteGuard, Service, X_APPLICATION};
use crate::error::{BetfairError, Result};
use crate::transport::{ClientCertificate, HttpRequest, RequestBody, Transport};
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use tracing::{debug, info};

const SUCCESS: &str = "SUCCESS";

/// Stand-in `X-Application` value for an interactive login made before an
/// application key is configured. It only satisfies the login endpoint's
/// header check and is never kept.
fn placeholder_app_key() -> String {
    format!("app_{}", rand::random::<u128>())
}

fn credentials_form(username: &str, password: &str) -> Result<RequestBody> {
    if username.is_empty() || password.is_empty() {
        return Err(BetfairError::Validation(
            "Username and Password Required".to_string(),
        ));
    }
    Ok(RequestBody::Form(vec![
        ("username".to_string(), username.to_string()),
        ("password".to_string(), password.to_string()),
    ]))
}

impl<T: Transport> BetfairClient<T> {
    /// Certificate (non-interactive) login. Needs the certificate and key
    /// paths configured; the token is stored on success.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        match self.certificate_login(username, password).await {
            Ok(token) => {
                self.set_session_token(token);
                info!("Certificate login succeeded");
                Ok(())
            }
            Err(err) => self.fail(err),
        }
    }

    /// Username/password login without a client certificate.
    pub async fn interactive_login(&mut self, username: &str, password: &str) -> Result<()> {
        let outcome = match credentials_form(username, password) {
            Ok(form) => self
                .identity_call::<SessionResponse>(Service::InteractiveLogin, form, None)
                .await
                .and_then(SessionResponse::into_token),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(token) => {
                self.set_session_token(token);
                info!("Interactive login succeeded");
                Ok(())
            }
            Err(err) => self.fail(err),
        }
    }

    /// Ends the session and clears the token.
    pub async fn logout(&mut self) -> Result<()> {
        if !self.is_logged_in() {
            return self.fail(BetfairError::NotLoggedIn);
        }

        let outcome = self
            .identity_call::<SessionResponse>(Service::Logout, RequestBody::Empty, None)
            .await
            .and_then(SessionResponse::into_token);

        match outcome {
            Ok(_) => {
                self.set_session_token("");
                info!("Logged out");
                Ok(())
            }
            Err(err) => self.fail(err),
        }
    }

    /// Extends the session and stores the token the exchange hands back.
    pub async fn keep_alive(&mut self) -> Result<()> {
        if !self.is_logged_in() {
            return self.fail(BetfairError::NotLoggedIn);
        }
        if self.application_key().is_empty() {
            return self.fail(BetfairError::NoApplicationKey);
        }

        let outcome = self
            .identity_call::<SessionResponse>(Service::KeepAlive, RequestBody::Empty, None)
            .await
            .and_then(SessionResponse::into_token);

        match outcome {
            Ok(token) => {
                if !token.is_empty() {
                    self.set_session_token(token);
                }
                debug!("Session kept alive");
                Ok(())
            }
            Err(err) => self.fail(err),
        }
    }

    async fn certificate_login(&mut self, username: &str, password: &str) -> Result<String> {
        let form = credentials_form(username, password)?;
        if self.certificate_path().is_empty() {
            return Err(BetfairError::Precondition(
                "SSL Client Cert Required".to_string(),
            ));
        }
        if self.key_path().is_empty() {
            return Err(BetfairError::Precondition(
                "SSL Client Key Required".to_string(),
            ));
        }

        let certificate = ClientCertificate {
            certificate_path: PathBuf::from(self.certificate_path()),
            key_path: PathBuf::from(self.key_path()),
        };
        let response: CertLoginResponse = self
            .identity_call(Service::CertLogin, form, Some(certificate))
            .await?;

        if response.login_status == SUCCESS {
            Ok(response.session_token)
        } else {
            Err(BetfairError::Api(response.login_status))
        }
    }

    /// One round trip to an identity endpoint under a scoped route.
    async fn identity_call<R: DeserializeOwned>(
        &mut self,
        service: Service,
        body: RequestBody,
        client_certificate: Option<ClientCertificate>,
    ) -> Result<R> {
        let descriptor = self.router.descriptor(service);

        let mut route = RouteGuard::enter(&mut self.route, &descriptor);
        if service == Service::InteractiveLogin && self.settings.application_key.is_empty() {
            route.set_header(X_APPLICATION, &placeholder_app_key());
        }
        let request = HttpRequest {
            method: descriptor.method,
            url: descriptor.url.clone(),
            headers: route.header_pairs(),
            body,
            timeout: descriptor.timeout,
            client_certificate: client_certificate.filter(|_| descriptor.requires_client_cert),
        };
        let response = self
            .transport
            .execute(request)
            .await
            .map_err(|err| BetfairError::Transport(err.0))?;
        drop(route);

        debug!("Identity response {}: {}", response.status, response.body);
        if response.status != 200 {
            return Err(classify::http_error(&response));
        }
        let body = classify::decode(&response)?;
        self.last_response = Some(body.clone());
        serde_json::from_value(body)
            .map_err(|err| BetfairError::Decode(format!("Unexpected identity response: {err}")))
    }
}

impl SessionResponse {
    /// The token of a `SUCCESS` response, or the failure as an error.
    fn into_token(self) -> Result<String> {
        if self.status == SUCCESS {
            Ok(self.token)
        } else {
            Err(BetfairError::api_status(&self.status, Some(&self.error)))
        }
    }
}
