use crate::commands::{print_json, Context, DEFAULT_HISTORY_LIMIT};
use crate::error::not_found;
use crate::util::{
    format_interaction_kind, format_timestamp_datetime, now_utc, parse_lead_id, parse_lead_status,
};
use anyhow::Result;
use clap::Args;
use leadline_core::domain::{normalize_phone, Lead};
use leadline_core::dto::{InteractionDto, LeadDetailDto, LeadListItemDto};
use leadline_store::Store;

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub limit: Option<i64>,
    #[arg(long, default_value_t = 0)]
    pub offset: i64,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Lead id or phone number.
    pub lead: String,
}

#[derive(Debug, Args)]
pub struct SetStatusArgs {
    pub lead: String,
    pub status: String,
}

#[derive(Debug, Args)]
pub struct NoteArgs {
    pub lead: String,
    #[arg(long)]
    pub note: String,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub lead: String,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    pub lead: String,
    #[arg(long)]
    pub limit: Option<i64>,
    #[arg(long, default_value_t = 0)]
    pub offset: i64,
}

pub fn list(ctx: &Context<'_>, args: ListArgs) -> Result<()> {
    let status = match args.status.as_deref() {
        Some(raw) => Some(parse_lead_status(raw)?),
        None => None,
    };
    let limit = args.limit.unwrap_or(ctx.config.default_page_size);

    let leads = ctx.store.leads().list(status, limit, args.offset)?;
    let items: Vec<LeadListItemDto> = leads.iter().map(list_item).collect();

    if ctx.json {
        return print_json(&items);
    }

    if items.is_empty() {
        println!("no leads");
        return Ok(());
    }
    for item in &items {
        let next = item
            .next_action_date
            .map(|date| date.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}  {}  {}  {}  next: {}",
            item.id,
            item.phone,
            item.status.label(),
            item.temperature.as_str(),
            next
        );
    }
    Ok(())
}

pub fn show(ctx: &Context<'_>, args: ShowArgs) -> Result<()> {
    let lead = resolve_lead(ctx.store, &args.lead)?;
    let interactions = ctx
        .store
        .interactions()
        .list_for_lead(lead.id, DEFAULT_HISTORY_LIMIT, 0)?;
    let recent: Vec<InteractionDto> = interactions.iter().map(interaction_dto).collect();

    let detail = LeadDetailDto {
        id: lead.id,
        name: lead.name.clone(),
        phone: lead.phone.clone(),
        email: lead.email.clone(),
        lead_source: lead.lead_source.clone(),
        status: lead.status,
        temperature: lead.temperature,
        last_contact_date: lead.last_contact_date,
        next_action_date: lead.next_action_date,
        notes: lead.notes.clone(),
        created_at: lead.created_at,
        updated_at: lead.updated_at,
        recent_interactions: recent,
    };

    if ctx.json {
        return print_json(&detail);
    }

    println!("id: {}", detail.id);
    println!("name: {}", detail.name);
    println!("phone: {}", detail.phone);
    if let Some(email) = detail.email.as_deref() {
        println!("email: {}", email);
    }
    println!("source: {}", detail.lead_source);
    println!("status: {}", detail.status.label());
    println!("temperature: {}", detail.temperature.as_str());
    if let Some(date) = detail.last_contact_date {
        println!("last_contact_date: {}", date);
    }
    if let Some(date) = detail.next_action_date {
        println!("next_action_date: {}", date);
    }
    if let Some(notes) = detail.notes.as_deref() {
        println!("notes: {}", notes);
    }
    println!("created_at: {}", format_timestamp_datetime(detail.created_at));
    println!("updated_at: {}", format_timestamp_datetime(detail.updated_at));
    if !detail.recent_interactions.is_empty() {
        println!("recent interactions:");
        for interaction in &detail.recent_interactions {
            println!(
                "  {}  {}  {}",
                format_timestamp_datetime(interaction.created_at),
                interaction.kind,
                interaction.property_name
            );
        }
    }
    Ok(())
}

pub fn set_status(ctx: &Context<'_>, args: SetStatusArgs) -> Result<()> {
    let lead = resolve_lead(ctx.store, &args.lead)?;
    let status = parse_lead_status(&args.status)?;
    let updated = ctx.store.leads().set_status(now_utc(), lead.id, status)?;

    if ctx.json {
        print_json(&updated)?;
    } else {
        println!("updated {} to {}", updated.id, updated.status.label());
    }
    Ok(())
}

pub fn note(ctx: &Context<'_>, args: NoteArgs) -> Result<()> {
    let lead = resolve_lead(ctx.store, &args.lead)?;
    let updated = ctx.store.leads().set_notes(now_utc(), lead.id, &args.note)?;

    if ctx.json {
        print_json(&updated)?;
    } else {
        println!("updated notes for {}", updated.id);
    }
    Ok(())
}

pub fn delete(ctx: &Context<'_>, args: DeleteArgs) -> Result<()> {
    let lead = resolve_lead(ctx.store, &args.lead)?;
    ctx.store.leads().delete(lead.id)?;

    if ctx.json {
        print_json(&serde_json::json!({ "deleted": lead.id }))?;
    } else {
        println!("deleted {}", lead.id);
    }
    Ok(())
}

pub fn history(ctx: &Context<'_>, args: HistoryArgs) -> Result<()> {
    let lead = resolve_lead(ctx.store, &args.lead)?;
    let limit = args.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let interactions = ctx
        .store
        .interactions()
        .list_for_lead(lead.id, limit, args.offset)?;
    let items: Vec<InteractionDto> = interactions.iter().map(interaction_dto).collect();

    if ctx.json {
        return print_json(&items);
    }

    if items.is_empty() {
        println!("no interactions");
        return Ok(());
    }
    for item in &items {
        let caller = item
            .caller_id
            .map(|id| format!(" staff:{}", id))
            .unwrap_or_default();
        println!(
            "{}  {}  {}{}",
            format_timestamp_datetime(item.created_at),
            item.kind,
            item.property_name,
            caller
        );
        if let Some(message) = item.message.as_deref() {
            println!("    {}", message);
        }
    }
    Ok(())
}

/// Accepts either a lead id or a raw phone number.
pub fn resolve_lead(store: &Store, raw: &str) -> Result<Lead> {
    if let Ok(id) = parse_lead_id(raw) {
        if let Some(lead) = store.leads().get(id)? {
            return Ok(lead);
        }
        return Err(not_found("lead not found"));
    }

    let phone = normalize_phone(raw)?;
    store
        .leads()
        .find_by_phone(&phone)?
        .ok_or_else(|| not_found("lead not found"))
}

fn list_item(lead: &Lead) -> LeadListItemDto {
    LeadListItemDto {
        id: lead.id,
        name: lead.name.clone(),
        phone: lead.phone.clone(),
        status: lead.status,
        temperature: lead.temperature,
        last_contact_date: lead.last_contact_date,
        next_action_date: lead.next_action_date,
    }
}

pub(crate) fn interaction_dto(
    interaction: &leadline_core::domain::Interaction,
) -> InteractionDto {
    InteractionDto {
        id: interaction.id,
        kind: format_interaction_kind(&interaction.kind),
        source: interaction.source.clone(),
        message: interaction.message.clone(),
        property_name: interaction.property_name.clone(),
        listing_id: interaction.listing_id,
        caller_id: interaction.caller_id,
        next_follow_up_date: interaction.next_follow_up_date,
        site_visit_status: interaction.site_visit_status.clone(),
        created_at: interaction.created_at,
    }
}
