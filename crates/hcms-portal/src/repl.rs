//! The interactive loop: render the mounted page, read a command, dispatch.

use anyhow::{Result, anyhow};
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;

use hcms_application::UiEvent;
use hcms_application::view::render_document;
use hcms_core::route::Location;

use crate::app::AppState;
use crate::command::{self, Command, HELP};
use crate::helper::PortalHelper;

pub async fn run(mut state: AppState, start: Location) -> Result<()> {
    let mut rl = Editor::new()?;
    rl.set_helper(Some(PortalHelper::new()));

    println!("{}", "=== Hospital CMS ===".bright_magenta().bold());
    println!(
        "{}",
        format!("Backend: {}. Type 'help' for commands, 'quit' to exit.", state.config().base_url)
            .bright_black()
    );
    println!();

    if let Err(e) = state.open(start).await {
        eprintln!("{}", format!("Error: {}", e).red());
    }
    if let Err(e) = render(&mut state).await {
        eprintln!("{}", format!("Error: {}", e).red());
    }

    loop {
        let prompt = format!("hcms {}> ", state.page());
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match command::parse(trimmed) {
                    Ok(Command::Quit) => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Ok(command) => {
                        if let Err(e) = execute(&mut state, command).await {
                            tracing::error!(error = %e, "Command failed");
                            eprintln!("{}", format!("Error: {}", e).red());
                        }
                    }
                    Err(e) => eprintln!("{}", e.to_string().red()),
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

async fn execute(state: &mut AppState, command: Command) -> Result<()> {
    match command {
        Command::Help => {
            println!("{}", HELP.bright_black());
            return Ok(());
        }
        Command::Quit | Command::Show => {}
        Command::Click(index) => {
            let action = state
                .action(index)
                .await?
                .ok_or_else(|| anyhow!("No action [{}] on this page", index))?;
            state.dispatch(UiEvent::Click(action)).await?;
        }
        Command::Go(location) => state.open(location).await?,
        Command::Event(event) => {
            if !state.dispatch(event).await? {
                println!("{}", "Filter queued; type 'show' to see the result.".bright_black());
                return Ok(());
            }
        }
        Command::Export(path) => {
            let view = state.view().await?;
            let html = render_document(&view.title, &view.root())?;
            std::fs::write(&path, html)?;
            println!("{}", format!("Wrote {}", path.display()).green());
            return Ok(());
        }
    }
    render(state).await
}

async fn render(state: &mut AppState) -> Result<()> {
    let view = state.view().await?;
    println!();
    println!("{}", format!("== {} ==", view.title).bright_magenta().bold());
    print!("{}", view.root().to_text());
    Ok(())
}
