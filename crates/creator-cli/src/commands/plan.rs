use anyhow::Result;
use colored::Colorize;

use creator_application::PlanView;
use creator_core::plan::DailyPlan;

use super::{App, ensure, heading};

pub async fn run(app: &App, generate: bool) -> Result<()> {
    ensure(app.workflow.open_dashboard().await)?;
    if generate {
        println!("{}", "Generating today's plan...".bright_black());
        ensure(app.workflow.generate_plan().await)?;
    }

    match app.workflow.plan().view().await {
        PlanView::HasPlan(plan) => print_plan(&plan),
        PlanView::NoPlan | PlanView::Loading => {
            println!("{}", "No plan for today yet.".yellow());
            println!("{}", "Run `creator plan --generate` to create one.".bright_black());
        }
    }
    Ok(())
}

fn print_plan(plan: &DailyPlan) {
    heading(&format!("Today's plan ({})", plan.date));
    for (index, item) in plan.items.iter().enumerate() {
        println!(
            "{} {} {}",
            format!("{:>2}.", index + 1).bold(),
            format!("[{} {}]", item.platform, item.content_type).cyan(),
            item.topic
        );
        if !item.reasoning.is_empty() {
            println!("    {}", item.reasoning.bright_black());
        }
    }
    println!();
    println!(
        "{}",
        "Run `creator draft --from-plan N` to write one of these.".bright_black()
    );
}
