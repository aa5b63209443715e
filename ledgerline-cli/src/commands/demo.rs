//! Demo command - manage demo mode

use anyhow::Result;
use clap::Subcommand;

use super::get_ledgerline_dir;
use crate::output;
use ledgerline_core::services::DemoService;

#[derive(Subcommand)]
pub enum DemoCommands {
    /// Enable demo mode with a freshly seeded dataset
    On,
    /// Disable demo mode
    Off {
        /// Also delete the demo database
        #[arg(long)]
        clean: bool,
    },
}

pub fn run(command: Option<DemoCommands>) -> Result<()> {
    let dir = get_ledgerline_dir();
    std::fs::create_dir_all(&dir)?;
    let service = DemoService::new(&dir);

    match command {
        Some(DemoCommands::On) => {
            service.enable()?;
            output::success("Demo mode enabled");
            output::info("Seeded demo data: try `lgr summary` or `lgr totals`");
        }
        Some(DemoCommands::Off { clean }) => {
            service.disable(clean)?;
            output::success("Demo mode disabled");
        }
        None => {
            if service.is_enabled()? {
                println!("Demo mode is on");
            } else {
                println!("Demo mode is off");
            }
        }
    }

    Ok(())
}
