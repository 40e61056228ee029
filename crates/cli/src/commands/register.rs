//! Account-creation command.

use clap::Args;
use secrecy::SecretString;

use smartskills_client::api::{ApiClient, Registration};
use smartskills_client::auth::{Authenticator, RegistrationOutcome};
use smartskills_core::Email;

use super::auth::{CommandError, open_session};

/// Arguments for account creation.
#[derive(Args)]
pub struct RegisterArgs {
    /// Account email address
    #[arg(short, long)]
    pub email: String,

    /// Account password
    #[arg(short, long)]
    pub password: String,

    /// Given name
    #[arg(short, long)]
    pub first_name: String,

    /// Family name
    #[arg(short, long)]
    pub last_name: String,

    /// Sex, as the backend expects it
    #[arg(short, long)]
    pub sex: String,

    /// Job title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Location
    #[arg(long)]
    pub location: Option<String>,
}

/// Create an account, signing the new user in on success.
pub async fn register(args: RegisterArgs) -> Result<(), CommandError> {
    let email = Email::parse(&args.email)?;
    if args.password.is_empty() {
        return Err(CommandError::EmptyPassword);
    }

    let (config, session) = open_session()?;
    let auth = Authenticator::new(ApiClient::new(&config), session);

    let registration = Registration {
        email: email.into_inner(),
        password: SecretString::from(args.password),
        first_name: args.first_name,
        last_name: args.last_name,
        sex: args.sex,
        title: args.title,
        location: args.location,
    };

    let outcome = auth
        .register(&registration)
        .await
        .map_err(|e| CommandError::Api(e.user_message()))?;

    match outcome {
        RegistrationOutcome::SignedIn(identity) => {
            tracing::info!("Account created; signed in as {}", identity.email);
        }
        RegistrationOutcome::Created => {
            tracing::info!("Account created; sign in with `ss-cli login`");
        }
    }
    Ok(())
}
