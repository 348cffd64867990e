use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::now_utc;
use anyhow::Result;
use clap::{Args, Subcommand};
use leadline_core::domain::{StaffId, StaffRole};
use leadline_store::repo::StaffNew;
use std::str::FromStr;

#[derive(Debug, Subcommand)]
pub enum StaffCommand {
    Add(AddStaffArgs),
    Ls(ListStaffArgs),
    Deactivate(DeactivateStaffArgs),
}

#[derive(Debug, Args)]
pub struct AddStaffArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "team")]
    pub role: String,
    #[arg(long)]
    pub phone: Option<String>,
}

#[derive(Debug, Args)]
pub struct ListStaffArgs {}

#[derive(Debug, Args)]
pub struct DeactivateStaffArgs {
    pub id: String,
}

pub fn add(ctx: &Context<'_>, args: AddStaffArgs) -> Result<()> {
    let role = StaffRole::parse(&args.role.trim().to_ascii_lowercase())
        .ok_or_else(|| invalid_input("invalid staff role: expected admin|team"))?;
    let staff = ctx.store.staff().create(
        now_utc(),
        StaffNew {
            username: args.username,
            full_name: args.name,
            phone: args.phone,
            role,
        },
    )?;

    if ctx.json {
        print_json(&staff)?;
    } else {
        println!("created {} {}", staff.id, staff.username);
    }
    Ok(())
}

pub fn list(ctx: &Context<'_>, _args: ListStaffArgs) -> Result<()> {
    let staff = ctx.store.staff().list()?;

    if ctx.json {
        return print_json(&staff);
    }

    if staff.is_empty() {
        println!("no staff");
        return Ok(());
    }
    for member in &staff {
        let state = if member.is_active { "active" } else { "inactive" };
        println!(
            "{}  {}  {}  {}  {}",
            member.id,
            member.username,
            member.full_name,
            member.role.as_str(),
            state
        );
    }
    Ok(())
}

pub fn deactivate(ctx: &Context<'_>, args: DeactivateStaffArgs) -> Result<()> {
    let id = StaffId::from_str(args.id.trim())
        .map_err(|_| invalid_input("invalid staff id"))?;
    let staff = ctx.store.staff().deactivate(id)?;

    if ctx.json {
        print_json(&staff)?;
    } else {
        println!("deactivated {}", staff.username);
    }
    Ok(())
}
