use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;

use creator_core::catalog::{Platform, Tone};
use creator_core::profile::OnboardingForm;

use super::{App, ensure, parse_choice};

#[derive(Args)]
pub struct OnboardArgs {
    /// Your name or creator handle
    #[arg(long)]
    name: String,
    /// What you make content about
    #[arg(long)]
    niche: String,
    /// Who you make content for
    #[arg(long)]
    audience: String,
    /// Voice of the generated content
    #[arg(long, value_parser = parse_choice::<Tone>, default_value = "Casual")]
    tone: Tone,
    /// Platform you publish on (repeatable)
    #[arg(long = "platform", value_parser = parse_choice::<Platform>, required = true)]
    platforms: Vec<Platform>,
}

pub async fn run(app: &App, args: OnboardArgs) -> Result<()> {
    if let Some(session) = app.workflow.session().await {
        bail!(
            "Already signed in as {}. Run `creator logout` first.",
            session.greeting_name()
        );
    }

    let mut form = OnboardingForm::new();
    form.set_name(args.name);
    form.set_niche(args.niche);
    form.set_target_audience(args.audience);
    form.next()?;
    form.set_tone(args.tone);
    form.next()?;
    for platform in args.platforms {
        if !form.platforms().contains(&platform) {
            form.toggle_platform(platform);
        }
    }

    ensure(app.workflow.submit_onboarding(&form).await)?;

    if let Some(session) = app.workflow.session().await {
        println!(
            "{}",
            format!("Welcome, {}! Your profile is ready.", session.greeting_name()).bright_green()
        );
        println!("{}", "Run `creator plan --generate` for today's ideas.".bright_black());
    }
    Ok(())
}
