//! `cardvault`: line-oriented shell over the card inventory.

mod args;
mod command;
mod shell;

use std::io::{self, BufRead, Write};

use cardvault_inventory::InventoryConfig;

use crate::args::CommandLine;
use crate::shell::{Shell, Step};

fn main() -> anyhow::Result<()> {
    let cli = CommandLine::parse_args();
    cardvault_observability::init();

    let mut shell = Shell::new(cli.apply(InventoryConfig::from_env()));
    let config = shell.system().config();
    tracing::info!(
        binder_capacity = config.binder_capacity,
        deck_capacity = config.deck_capacity,
        trade_confirm_threshold = %config.trade_confirm_threshold,
        "cardvault starting"
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "cardvault ready; type 'help' for commands")?;

    for line in stdin.lock().lines() {
        match shell.handle_line(&line?) {
            Step::Continue(text) if text.is_empty() => {}
            Step::Continue(text) => writeln!(stdout, "{text}")?,
            Step::Quit => break,
        }
        stdout.flush()?;
    }

    tracing::info!(
        earnings = %shell.system().earnings(),
        "cardvault shutting down"
    );
    Ok(())
}
