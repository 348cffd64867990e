use crate::commands::{print_json, Context};
use crate::util::{now_utc, parse_listing_id};
use anyhow::Result;
use clap::Args;
use leadline_core::dto::IntakeReceiptDto;
use leadline_store::repo::{BrochureRequestNew, IntakeOutcome, QueryNew};

#[derive(Debug, Args)]
pub struct BrochureArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub listing: String,
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub email: Option<String>,
    /// First-touch channel; defaults to the configured lead source.
    #[arg(long)]
    pub source: Option<String>,
    #[arg(long)]
    pub listing: Option<String>,
    #[arg(long)]
    pub message: Option<String>,
}

pub fn brochure(ctx: &Context<'_>, args: BrochureArgs) -> Result<()> {
    let listing_id = parse_listing_id(&args.listing)?;
    let outcome = ctx.store.intake().brochure_request(
        now_utc(),
        BrochureRequestNew {
            name: args.name,
            phone: args.phone,
            email: args.email,
            listing_id,
        },
    )?;

    emit_receipt(ctx, &outcome, "Brochure sent successfully.")
}

pub fn query(ctx: &Context<'_>, args: QueryArgs) -> Result<()> {
    let listing_id = match args.listing.as_deref() {
        Some(raw) => Some(parse_listing_id(raw)?),
        None => None,
    };
    let source = args
        .source
        .unwrap_or_else(|| ctx.config.default_lead_source.clone());

    let outcome = ctx.store.intake().submit_query(
        now_utc(),
        QueryNew {
            name: args.name,
            phone: args.phone,
            email: args.email,
            source,
            listing_id,
            message: args.message,
        },
    )?;

    emit_receipt(ctx, &outcome, "Thank you! We will contact you soon.")
}

fn emit_receipt(ctx: &Context<'_>, outcome: &IntakeOutcome, message: &str) -> Result<()> {
    if ctx.json {
        let receipt = IntakeReceiptDto {
            success: true,
            message: message.to_string(),
            lead_id: outcome.lead.id,
            brochure_url: outcome.brochure_url.clone(),
        };
        return print_json(&receipt);
    }

    println!("{message}");
    println!(
        "lead {} ({} / {})",
        outcome.lead.id,
        outcome.lead.status.label(),
        outcome.lead.temperature.as_str()
    );
    if let Some(url) = outcome.brochure_url.as_deref() {
        println!("brochure: {url}");
    }
    Ok(())
}
