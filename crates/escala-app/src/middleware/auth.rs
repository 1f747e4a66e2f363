use salvo::Depot;
use salvo::basic_auth::{BasicAuth, BasicAuthValidator};
use salvo::http::StatusCode;
use tracing::error;

use crate::config::{AuthMethod, get_config_from_depot};
use escala_service::auth::verify_basic_credentials;
use escala_service::error::ServiceError;

/// Checks basic-auth pairs against `auth.basic` from the injected settings.
pub struct SettingsValidator;

impl BasicAuthValidator for SettingsValidator {
    async fn validate(&self, username: &str, password: &str, depot: &mut Depot) -> bool {
        let config = match get_config_from_depot(depot) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!(error = ?e, "Failed to get config from depot");
                return false;
            }
        };

        match verify_basic_credentials(&config.auth, username, password) {
            Ok(()) => {
                tracing::debug!(username = %username, "Request authenticated");
                true
            }
            Err(ServiceError::NotAuthenticated) => {
                tracing::warn!(username = %username, "Rejected basic auth credentials");
                false
            }
            Err(e) => {
                error!(error = %e, "Basic auth is misconfigured");
                false
            }
        }
    }
}

/// ## Summary
/// Guards the board API with HTTP basic auth when `auth.method = basic`.
///
/// ## Side Effects
/// salvo's `BasicAuth` stores the accepted username in the depot, readable
/// through `BasicAuthDepotExt::basic_auth_username`.
///
/// ## Errors
/// Responds 401 with a `WWW-Authenticate` challenge for missing or wrong
/// credentials, and 500 if the settings are missing from the depot.
pub struct AuthMiddleware {
    basic: BasicAuth<SettingsValidator>,
}

impl AuthMiddleware {
    #[must_use]
    pub fn new() -> Self {
        Self {
            basic: BasicAuth::new(SettingsValidator),
        }
    }
}

impl Default for AuthMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

#[salvo::async_trait]
impl salvo::Handler for AuthMiddleware {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        let method = match get_config_from_depot(depot) {
            Ok(cfg) => cfg.auth.method,
            Err(e) => {
                error!(error = ?e, "Failed to get config from depot");
                res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
                ctrl.skip_rest();
                return;
            }
        };

        if method == AuthMethod::None {
            return;
        }

        self.basic.handle(req, depot, res, ctrl).await;
    }
}
