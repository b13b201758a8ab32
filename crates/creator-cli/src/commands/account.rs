use anyhow::Result;
use colored::Colorize;

use creator_core::backend::CreatorBackend;
use creator_infrastructure::HttpCreatorBackend;

use super::{App, ensure, heading};

pub async fn profile(app: &App) -> Result<()> {
    ensure(app.workflow.open_profile().await)?;
    let Some(profile) = app.workflow.profile().await else {
        return Ok(());
    };

    heading(&profile.name);
    println!("{:<10} {}", "Niche:".bold(), profile.niche);
    println!("{:<10} {}", "Tone:".bold(), profile.tone);
    println!("{:<10} {}", "Audience:".bold(), profile.target_audience);
    let platforms: Vec<String> = profile.platforms.iter().map(|p| p.to_string()).collect();
    println!("{:<10} {}", "Platforms:".bold(), platforms.join(", "));
    Ok(())
}

pub async fn status(app: &App) -> Result<()> {
    match app.workflow.session().await {
        Some(session) => println!(
            "Signed in as {} {}",
            session.greeting_name().bold(),
            format!("({})", session.user_id).bright_black()
        ),
        None => println!("{}", "Not signed in.".yellow()),
    }

    if let Ok(path) = app.paths.session_file() {
        println!("Session file: {}", path.display());
    }

    // Short timeout for the probe.
    let probe = HttpCreatorBackend::new(&app.backend_url, std::time::Duration::from_secs(3))?;
    match probe.health().await {
        Ok(message) => println!("Backend {}: {}", app.backend_url, message.bright_green()),
        Err(e) => println!("Backend {}: {}", app.backend_url, e.to_string().red()),
    }
    Ok(())
}

pub async fn logout(app: &App) -> Result<()> {
    app.workflow.logout().await?;
    println!("{}", "Signed out.".bright_green());
    Ok(())
}
