use escala_core::config::{AuthConfig, AuthMethod};

use crate::auth::password::verify_password;
use crate::error::{ServiceError, ServiceResult};

/// ## Summary
/// Checks a basic-auth username/password pair against the configured user.
///
/// With `auth.method = none` every pair is accepted.
///
/// ## Errors
/// Returns `ServiceError::NotAuthenticated` for a wrong username or password,
/// and `ServiceError::InvalidConfiguration` if basic auth is enabled without
/// credentials or with an unparsable hash.
#[tracing::instrument(skip(config, password))]
pub fn verify_basic_credentials(
    config: &AuthConfig,
    username: &str,
    password: &str,
) -> ServiceResult<()> {
    match config.method {
        AuthMethod::None => Ok(()),
        AuthMethod::Basic => {
            let basic = config.basic.as_ref().ok_or_else(|| {
                ServiceError::InvalidConfiguration("Basic auth config is missing".to_string())
            })?;

            if basic.username != username {
                tracing::debug!("Unknown basic auth user");
                return Err(ServiceError::NotAuthenticated);
            }

            verify_password(password, &basic.password_hash)
        }
    }
}
