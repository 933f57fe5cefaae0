use serde::Deserialize;
use validator::Validate;

#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct LoginForm {
    /// Email of the employee picked from the roster.
    #[validate(length(min = 1))]
    pub email: String,
    /// Checked locally only; must match `auth::MIN_PASSWORD_LEN`.
    #[validate(length(min = 6))]
    pub password: String,
}
