//! Interactive password-recovery command.

use std::io::{self, Write};

use secrecy::SecretString;

use smartskills_client::api::ApiClient;
use smartskills_client::reset::{ResetFlow, ResetStage};

use super::auth::{CommandError, open_session};

/// Drive the three-stage reset flow over stdin.
///
/// Typing `back` at the code prompt abandons the attempt and starts over.
#[allow(clippy::print_stdout)]
pub async fn run() -> Result<(), CommandError> {
    let (config, _) = open_session()?;

    let mut flow = ResetFlow::new(ApiClient::new(&config))
        .with_completion(|| println!("You can now sign in with your new password."));

    while !flow.is_complete() {
        match flow.stage() {
            ResetStage::Request => {
                let email = prompt("Email: ")?;
                flow.set_email(email.trim());
                flow.submit_email().await;
            }
            ResetStage::Verify => {
                let code = prompt("Verification code (or 'back'): ")?;
                if code.trim() == "back" {
                    flow.back();
                    continue;
                }
                flow.set_code(code.trim());
                flow.submit_code().await;
            }
            ResetStage::Reset => {
                let password = prompt("New password: ")?;
                flow.submit_password(&SecretString::from(password.trim().to_owned()))
                    .await;
            }
        }

        if let Some(message) = flow.success_message() {
            println!("{message}");
        }
        if let Some(error) = flow.error() {
            println!("{error}");
        }
    }

    Ok(())
}

#[allow(clippy::print_stdout)]
fn prompt(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}
