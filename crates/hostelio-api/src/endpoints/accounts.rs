// Account endpoints
//
// Signup, login, and profile. Login returns a JWT pair. The access token
// is not stored here; callers hand it back through `ApiClient::set_token`
// once they have a session.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::auth::Role;
use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{
    LoginRequest, LoginResponse, NewAccount, ProfileUpdateRequest, SignupRequest, SignupResponse,
    UserRecord,
};

impl ApiClient {
    /// Exchange email + password for a token pair.
    ///
    /// `POST login/` for seekers and owners, `POST login-admin/` for admins.
    pub async fn login(
        &self,
        role: Role,
        email: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, Error> {
        let url = self.base_url().join(role.login_path())?;
        debug!(%role, email, "logging in");
        let body = LoginRequest {
            email,
            password_hash: password.expose_secret(),
        };
        match self.post(url, &body).await {
            Ok(resp) => Ok(resp),
            Err(Error::SessionExpired | Error::NotFound { .. }) => Err(Error::Authentication {
                message: "invalid email or password".into(),
            }),
            Err(Error::Validation { message, .. }) => Err(Error::Authentication { message }),
            Err(e) => Err(e),
        }
    }

    /// Register a seeker or owner account.
    ///
    /// `POST signup/`. The backend answers 400 with `{"error": ...}` when
    /// the email or phone is already taken.
    pub async fn signup(
        &self,
        account: &NewAccount,
        password: &SecretString,
    ) -> Result<SignupResponse, Error> {
        let url = self.endpoint(&["signup"], true)?;
        debug!(role = %account.role, email = %account.email, "registering account");
        let body = SignupRequest {
            email: &account.email,
            phone: &account.phone,
            password_hash: password.expose_secret(),
            name: &account.name,
            user_type: account.role,
        };
        self.post(url, &body).await
    }

    /// Change bio, date of birth, or UPI id of the authenticated user.
    ///
    /// `PUT update-profile/`, answering with the updated profile.
    pub async fn update_profile(&self, update: &ProfileUpdateRequest) -> Result<UserRecord, Error> {
        let url = self.endpoint(&["update-profile"], true)?;
        self.put(url, update).await
    }

    /// The profile of the authenticated user.
    ///
    /// `GET user/profile/`
    pub async fn profile(&self) -> Result<UserRecord, Error> {
        let url = self.endpoint(&["user", "profile"], true)?;
        self.get(url).await
    }
}
