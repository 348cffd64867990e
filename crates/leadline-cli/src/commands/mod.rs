use anyhow::Result;
use leadline_config::AppConfig;
use leadline_store::Store;
use serde::Serialize;
use std::io::{self, Write};

pub mod activity;
pub mod backup;
pub mod completions;
pub mod intake;
pub mod leads;
pub mod listings;
pub mod staff;
pub mod worklist;

pub const DEFAULT_HISTORY_LIMIT: i64 = 20;

pub struct Context<'a> {
    pub store: &'a Store,
    pub json: bool,
    pub config: &'a AppConfig,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
