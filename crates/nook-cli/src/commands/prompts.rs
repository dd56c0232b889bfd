//! Line prompts shared by the REPL and the one-shot subcommands.
//!
//! Every prompt returns `Ok(None)` when the user cancels with Ctrl-C or Ctrl-D.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::history::{DefaultHistory, History};
use rustyline::{Editor, Helper};

use nook_core::registration::RegistrationForm;

use crate::helper::PasswordHelper;

pub fn read_field<H: Helper, I: History>(
    rl: &mut Editor<H, I>,
    label: &str,
) -> Result<Option<String>> {
    match rl.readline(&format!("{}: ", label)) {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Reads a secret without echoing it or keeping it in any history.
pub fn read_password(label: &str) -> Result<Option<String>> {
    let mut rl: Editor<PasswordHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(PasswordHelper));
    read_field(&mut rl, label)
}

pub fn read_credentials<H: Helper, I: History>(
    rl: &mut Editor<H, I>,
) -> Result<Option<(String, String)>> {
    let Some(username) = read_field(rl, "Username")? else {
        return Ok(None);
    };
    let Some(password) = read_password("Password")? else {
        return Ok(None);
    };
    Ok(Some((username, password)))
}

pub fn read_registration_form<H: Helper, I: History>(
    rl: &mut Editor<H, I>,
) -> Result<Option<RegistrationForm>> {
    let Some(username) = read_field(rl, "Username")? else {
        return Ok(None);
    };
    let Some(email) = read_field(rl, "Email")? else {
        return Ok(None);
    };
    let Some(password) = read_password("Password")? else {
        return Ok(None);
    };
    let Some(confirm_password) = read_password("Confirm password")? else {
        return Ok(None);
    };

    Ok(Some(RegistrationForm {
        username,
        email,
        password,
        confirm_password,
    }))
}
