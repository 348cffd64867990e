use crate::commands::{print_json, Context};
use crate::error::not_found;
use crate::util::{now_utc, parse_listing_id, parse_property_type};
use anyhow::Result;
use clap::{Args, Subcommand};
use leadline_core::domain::ListingStatus;
use leadline_store::repo::ListingNew;

#[derive(Debug, Subcommand)]
pub enum ListingCommand {
    Add(AddListingArgs),
    Ls(ListListingsArgs),
    Show(ShowListingArgs),
    Retire(RetireListingArgs),
    Rm(RemoveListingArgs),
}

#[derive(Debug, Args)]
pub struct AddListingArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub property_type: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub price: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub size: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub brochure_url: Option<String>,
}

#[derive(Debug, Args)]
pub struct ListListingsArgs {
    #[arg(long)]
    pub property_type: Option<String>,
}

#[derive(Debug, Args)]
pub struct ShowListingArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct RemoveListingArgs {
    pub id: String,
}

pub fn add(ctx: &Context<'_>, args: AddListingArgs) -> Result<()> {
    let property_type = parse_property_type(&args.property_type)?;
    let listing = ctx.store.listings().create(
        now_utc(),
        ListingNew {
            title: args.title,
            description: args.description,
            price: args.price,
            location: args.location,
            size: args.size,
            property_type,
            listing_category: args.category,
            brochure_url: args.brochure_url,
        },
    )?;

    if ctx.json {
        print_json(&listing)?;
    } else {
        println!("created {} {}", listing.id, listing.title);
    }
    Ok(())
}

pub fn list(ctx: &Context<'_>, args: ListListingsArgs) -> Result<()> {
    let property_type = match args.property_type.as_deref() {
        Some(raw) => Some(parse_property_type(raw)?),
        None => None,
    };
    let listings = ctx.store.listings().list(property_type)?;

    if ctx.json {
        return print_json(&listings);
    }

    if listings.is_empty() {
        println!("no active listings");
        return Ok(());
    }
    for listing in &listings {
        let brochure = if listing.brochure_url.is_some() {
            " [brochure]"
        } else {
            ""
        };
        println!(
            "{}  {}  {}{}",
            listing.id,
            listing.property_type.as_str(),
            listing.title,
            brochure
        );
    }
    Ok(())
}

pub fn show(ctx: &Context<'_>, args: ShowListingArgs) -> Result<()> {
    let id = parse_listing_id(&args.id)?;
    let listing = ctx
        .store
        .listings()
        .get(id)?
        .ok_or_else(|| not_found("listing not found"))?;

    if ctx.json {
        return print_json(&listing);
    }

    println!("id: {}", listing.id);
    println!("title: {}", listing.title);
    println!("type: {}", listing.property_type.as_str());
    println!("category: {}", listing.listing_category);
    println!("status: {}", listing.status.as_str());
    if let Some(price) = listing.price.as_deref() {
        println!("price: {}", price);
    }
    if let Some(location) = listing.location.as_deref() {
        println!("location: {}", location);
    }
    if let Some(size) = listing.size.as_deref() {
        println!("size: {}", size);
    }
    if let Some(url) = listing.brochure_url.as_deref() {
        println!("brochure: {}", url);
    }
    if let Some(description) = listing.description.as_deref() {
        println!("description: {}", description);
    }
    Ok(())
}

pub fn remove(ctx: &Context<'_>, args: RemoveListingArgs) -> Result<()> {
    let id = parse_listing_id(&args.id)?;
    // Interaction snapshots keep their recorded titles; only the catalog
    // entry goes away.
    ctx.store.listings().delete(id)?;

    if ctx.json {
        print_json(&serde_json::json!({ "deleted": id }))?;
    } else {
        println!("deleted {}", id);
    }
    Ok(())
}

#[derive(Debug, Args)]
pub struct RetireListingArgs {
    pub id: String,
}

pub fn retire(ctx: &Context<'_>, args: RetireListingArgs) -> Result<()> {
    let id = parse_listing_id(&args.id)?;
    let listing = ctx
        .store
        .listings()
        .set_status(now_utc(), id, ListingStatus::Inactive)?;

    if ctx.json {
        print_json(&listing)?;
    } else {
        println!("retired {} {}", listing.id, listing.title);
    }
    Ok(())
}
