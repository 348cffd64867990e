use crate::commands::{print_json, Context};
use crate::util::today_utc;
use anyhow::Result;
use clap::Args;
use leadline_core::dto::{WorklistDto, WorklistItemDto};
use leadline_core::rules::{compute_follow_up_state, validate_soon_days};

#[derive(Debug, Args)]
pub struct WorklistArgs {
    #[arg(long)]
    pub soon_days: Option<i64>,
}

pub fn worklist(ctx: &Context<'_>, args: WorklistArgs) -> Result<()> {
    let soon_days = validate_soon_days(args.soon_days.unwrap_or(ctx.config.worklist_soon_days))?;
    let today = today_utc();

    let leads = ctx.store.leads().worklist(today, soon_days)?;
    let items: Vec<WorklistItemDto> = leads
        .into_iter()
        .map(|lead| WorklistItemDto {
            follow_up_state: compute_follow_up_state(today, lead.next_action_date, soon_days),
            id: lead.id,
            name: lead.name,
            phone: lead.phone,
            status: lead.status,
            temperature: lead.temperature,
            next_action_date: lead.next_action_date,
        })
        .collect();

    let output = WorklistDto::from_items(items);

    if ctx.json {
        return print_json(&output);
    }

    if output.is_empty() {
        println!("no follow-ups due");
        return Ok(());
    }
    print_bucket("overdue", &output.overdue);
    print_bucket("today", &output.today);
    print_bucket("soon", &output.soon);
    Ok(())
}

fn print_bucket(label: &str, items: &[WorklistItemDto]) {
    if items.is_empty() {
        return;
    }
    println!("{label}:");
    for item in items {
        let date = item
            .next_action_date
            .map(|date| date.to_string())
            .unwrap_or_default();
        println!(
            "  {}  {}  {}  {}",
            date,
            item.phone,
            item.name,
            item.status.label()
        );
    }
}
