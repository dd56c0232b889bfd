use anyhow::Result;
use rustyline::DefaultEditor;

use nook_application::ChatSessionClient;

use super::prompts;

/// Prints the stored conversation once, logging in first if needed.
pub async fn run(client: &ChatSessionClient) -> Result<()> {
    client.initialize().await;

    if !client.session().await.is_authenticated {
        let mut rl = DefaultEditor::new()?;
        let Some((username, password)) = prompts::read_credentials(&mut rl)? else {
            return Ok(());
        };
        if !client.login(&username, &password).await {
            return Ok(());
        }
    }

    // Fresh log: append after the greeting instead of clearing it
    client.load_history(false).await;
    Ok(())
}
