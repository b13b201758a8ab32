use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};
use colored::Colorize;

use creator_application::PlanView;
use creator_core::catalog::{ContentType, Platform};
use creator_core::content::GeneratedContent;

use super::{App, ensure, heading, parse_choice};

#[derive(Clone, Copy, ValueEnum)]
pub enum CopyTarget {
    Hook,
    Script,
    Caption,
}

#[derive(Args)]
pub struct DraftArgs {
    /// Platform to write for (default Instagram)
    #[arg(long, value_parser = parse_choice::<Platform>, conflicts_with = "from_plan")]
    platform: Option<Platform>,
    /// Content type (default: the platform's first)
    #[arg(long, value_parser = parse_choice::<ContentType>, conflicts_with = "from_plan")]
    content_type: Option<ContentType>,
    /// Extra direction for the generator
    #[arg(long, conflicts_with = "from_plan")]
    context: Option<String>,
    /// Start from item N of today's plan
    #[arg(long, value_name = "N")]
    from_plan: Option<usize>,
    /// Highlight hook N of the result
    #[arg(long, value_name = "N")]
    hook: Option<usize>,
    /// Copy part of the result to the clipboard
    #[arg(long, value_enum)]
    copy: Option<CopyTarget>,
}

pub async fn run(app: &App, args: DraftArgs) -> Result<()> {
    let workflow = &app.workflow;

    match args.from_plan {
        Some(number) => {
            ensure(workflow.open_dashboard().await)?;
            let PlanView::HasPlan(plan) = workflow.plan().view().await else {
                bail!("No plan for today yet. Run `creator plan --generate` first.");
            };
            let item = number
                .checked_sub(1)
                .and_then(|index| plan.items.get(index))
                .with_context(|| format!("Today's plan has {} items", plan.items.len()))?;
            ensure(workflow.open_generate(Some(item)).await)?;
        }
        None => {
            ensure(workflow.open_generate(None).await)?;
            let drafts = workflow.drafts();
            if let Some(platform) = args.platform {
                drafts.select_platform(platform).await;
            }
            if let Some(content_type) = args.content_type {
                drafts.select_content_type(content_type).await?;
            }
            if let Some(context) = args.context {
                drafts.set_context(context).await;
            }
        }
    }

    let form = workflow.drafts().form().await;
    println!(
        "{}",
        format!("Writing a {} {}...", form.platform, form.content_type).bright_black()
    );
    ensure(workflow.generate_draft().await)?;

    if let Some(number) = args.hook {
        workflow
            .drafts()
            .select_hook(number.saturating_sub(1))
            .await?;
    }

    let Some(content) = workflow.drafts().content().await else {
        bail!("The generator returned nothing. Please try again.");
    };
    print_content(&content, workflow.drafts().selected_hook().await);

    if let Some(target) = args.copy {
        let copied = match target {
            CopyTarget::Hook => workflow.drafts().copy_hook().await,
            CopyTarget::Script => workflow.drafts().copy_script().await,
            CopyTarget::Caption => workflow.drafts().copy_caption().await,
        };
        if copied {
            println!("{}", "Copied to clipboard.".bright_green());
        } else {
            println!("{}", "Nothing to copy.".yellow());
        }
    }
    Ok(())
}

fn print_content(content: &GeneratedContent, selected: usize) {
    heading("Hooks");
    for (index, hook) in content.hooks.iter().enumerate() {
        let line = format!("{:>2}. {}", index + 1, hook);
        if index == selected {
            println!("{}", line.bright_green().bold());
        } else {
            println!("{}", line);
        }
    }

    if content.has_script() {
        println!();
        heading("Script");
        println!("{}", content.script);
    }

    println!();
    heading("Caption");
    println!("{}", content.caption);
}
