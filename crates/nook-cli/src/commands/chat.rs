use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::{DefaultHistory, History};

use nook_application::{ChatSessionClient, SubmitOutcome};

use super::prompts;
use crate::helper::{CliHelper, SlashCommand};

/// Runs the interactive chat REPL until `quit`, `exit`, or Ctrl-D.
pub async fn run(client: &ChatSessionClient) -> Result<()> {
    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Nook ===".bright_magenta().bold());
    println!(
        "{}",
        "Type a message to chat, '/help' for commands, or 'quit' to exit.".bright_black()
    );
    println!();

    client.initialize().await;

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(trimmed);

                match SlashCommand::parse(trimmed) {
                    Some(command) => run_command(client, &mut rl, command).await?,
                    None => {
                        let outcome = client.submit(trimmed).await;
                        tracing::debug!("Submit finished: {:?}", outcome);
                        if outcome == SubmitOutcome::Ignored {
                            println!("{}", "Still waiting for the last reply.".bright_black());
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

async fn run_command<I: History>(
    client: &ChatSessionClient,
    rl: &mut Editor<CliHelper, I>,
    command: SlashCommand,
) -> Result<()> {
    match command {
        SlashCommand::Login => {
            if let Some((username, password)) = prompts::read_credentials(rl)? {
                client.login(&username, &password).await;
            }
        }
        SlashCommand::Register => {
            if let Some(form) = prompts::read_registration_form(rl)? {
                client.register(&form).await;
            }
        }
        SlashCommand::History => {
            client.load_history(true).await;
        }
        SlashCommand::Clear => {
            client.clear_history().await;
        }
        SlashCommand::Logout => {
            client.logout().await;
        }
        SlashCommand::Help => print_help(),
    }

    Ok(())
}

fn print_help() {
    for command in SlashCommand::ALL {
        println!(
            "  {:<10} {}",
            command.name().bright_cyan(),
            command.description().bright_black()
        );
    }
    println!("  {:<10} {}", "quit".bright_cyan(), "leave Nook".bright_black());
}
