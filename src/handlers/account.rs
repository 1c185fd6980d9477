//! Account operations every role exposes in the same shape: login, password
//! change and profile view. Role handlers pass their own field names.

use serde_json::{json, Value};

use crate::auth::Authenticator;
use crate::database::accounts::{self, Account};
use crate::handlers::Context;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::{self, ValidationReport};

/// Body field names of one role's login form.
pub struct LoginFields {
    pub email: &'static str,
    pub password: &'static str,
}

pub async fn login<A: Account>(
    state: &AppState,
    authenticator: &Authenticator,
    fields: LoginFields,
    email: Option<&str>,
    password: Option<&str>,
) -> ApiResult<Value> {
    ValidationReport::new()
        .check(fields.email, validation::email(email))
        .check(
            fields.password,
            validation::present(password.filter(|p| !p.is_empty()), "Password is required"),
        )
        .finish()?;

    let email = email.unwrap_or_default().trim();
    let password = password.unwrap_or_default();

    let account = accounts::authenticate::<A>(&state.db, &state.hasher, email, password)
        .await
        .context("Login failed")?;
    let token = authenticator.issue(account.id(), account.email())?;

    tracing::info!(role = A::ROLE.as_str(), id = account.id(), "login succeeded");

    let key = A::ROLE.as_str().to_lowercase();
    Ok(ApiResponse::success(
        "Login successful",
        json!({ "token": token, key: account }),
    ))
}

pub async fn change_password<A: Account>(
    state: &AppState,
    id: i64,
    old_password: Option<&str>,
    new_password: Option<&str>,
) -> ApiResult<()> {
    ValidationReport::new()
        .check(
            "oldPassword",
            validation::present(old_password.filter(|p| !p.is_empty()), "Old password is required"),
        )
        .check("newPassword", validation::password(new_password))
        .finish()?;

    accounts::change_password::<A>(
        &state.db,
        &state.hasher,
        id,
        old_password.unwrap_or_default(),
        new_password.unwrap_or_default(),
    )
    .await
    .context("Password change failed")?;

    Ok(ApiResponse::message("Password changed successfully"))
}

pub async fn view_profile<A: Account>(state: &AppState, id: i64) -> ApiResult<A> {
    let account = accounts::find_eligible::<A>(&state.db, id)
        .await
        .context("Profile not available")?;
    Ok(ApiResponse::success(
        format!("{} profile retrieved successfully", A::ROLE),
        account,
    ))
}
