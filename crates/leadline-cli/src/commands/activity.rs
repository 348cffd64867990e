use crate::commands::leads::interaction_dto;
use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::{now_utc, parse_activity_kind, parse_date};
use anyhow::Result;
use clap::Args;
use leadline_store::repo::ActivityNew;
use std::io::{self, Read};

#[derive(Debug, Args)]
pub struct LogArgs {
    /// Username of the staff member logging the activity.
    #[arg(long)]
    pub staff: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long, default_value = "call")]
    pub kind: String,
    /// Notes text; read from stdin when omitted.
    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long)]
    pub next_action: Option<String>,
    #[arg(long)]
    pub follow_up: Option<String>,
    #[arg(long)]
    pub site_visit_status: Option<String>,
}

pub fn log(ctx: &Context<'_>, args: LogArgs) -> Result<()> {
    let staff = ctx.store.staff().authenticate(&args.staff)?;
    let kind = parse_activity_kind(&args.kind)?;
    let follow_up = match args.follow_up.as_deref() {
        Some(raw) => Some(parse_date(raw)?),
        None => None,
    };
    let notes = match args.notes {
        Some(value) => value,
        None => read_notes_from_stdin()?,
    };

    let interaction = ctx.store.activity().log(
        now_utc(),
        staff.id,
        ActivityNew {
            phone: args.phone,
            kind,
            notes,
            next_action: args.next_action,
            next_follow_up_date: follow_up,
            site_visit_status: args.site_visit_status,
        },
    )?;

    if ctx.json {
        print_json(&interaction_dto(&interaction))?;
    } else {
        println!("logged {} interaction {}", staff.username, interaction.id);
    }
    Ok(())
}

fn read_notes_from_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    if buffer.trim().is_empty() {
        return Err(invalid_input("notes are empty (provide --notes or stdin)"));
    }
    Ok(buffer.trim_end().to_string())
}
