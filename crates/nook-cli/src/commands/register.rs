use anyhow::Result;
use colored::Colorize;
use rustyline::DefaultEditor;

use nook_application::{ChatSessionClient, RegistrationOutcome};

use super::prompts;

/// Prompts for the registration form until it is accepted or the user gives up.
///
/// Local validation failures ask again; a server rejection ends the command.
pub async fn run(client: &ChatSessionClient) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    println!("{}", "=== Create a Nook account ===".bright_magenta().bold());

    loop {
        let Some(form) = prompts::read_registration_form(&mut rl)? else {
            return Ok(());
        };

        match client.register(&form).await {
            RegistrationOutcome::Invalid(_) => continue,
            RegistrationOutcome::Registered => {
                println!("{}", "Run `nook` and /login to start chatting.".bright_black());
                return Ok(());
            }
            RegistrationOutcome::Failed => return Ok(()),
        }
    }
}
