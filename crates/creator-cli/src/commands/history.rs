use anyhow::{Result, bail};
use colored::Colorize;

use super::{App, ensure, heading};

pub async fn run(app: &App, expand: Option<String>) -> Result<()> {
    let workflow = &app.workflow;
    ensure(workflow.open_history().await)?;

    let history = workflow.history();
    if history.is_empty().await {
        println!("{}", "No content yet. Run `creator draft` to create some.".yellow());
        return Ok(());
    }

    if let Some(id) = &expand {
        history.toggle_expanded(id).await;
    }
    let expanded = history.expanded_id().await;
    let entries = history.labelled_entries().await;
    if let Some(id) = &expand {
        if !entries.iter().any(|(_, entry)| &entry.id == id) {
            bail!("No history entry with id '{}'", id);
        }
    }

    heading("Content history");
    for (label, entry) in &entries {
        let first_hook = entry.hooks.first().map(String::as_str).unwrap_or("");
        println!(
            "{} {} {} {}",
            format!("{:<12}", label).bright_black(),
            format!("[{} {}]", entry.platform, entry.content_type).cyan(),
            first_hook,
            entry.id.bright_black()
        );

        if expanded.as_deref() == Some(entry.id.as_str()) {
            for hook in &entry.hooks {
                println!("    - {}", hook);
            }
            if !entry.script.is_empty() {
                println!();
                for line in entry.script.lines() {
                    println!("    {}", line);
                }
            }
            println!();
            println!("    {}", entry.caption.italic());
            if entry.posted {
                println!("    {}", "posted".bright_green());
            }
        }
    }
    Ok(())
}
