use std::fs::File;

use clap::Parser;

use split_ledger::domain::ParticipantId;
use split_ledger::engine::AllocationEngine;
use split_ledger::output;
use split_ledger::parsing;

fn main() -> anyhow::Result<()> {
    let args = Arguments::parse();
    if let Some(log_level) = args.log_level {
        tracing_subscriber::fmt().with_max_level(log_level).init();
    }

    let file = File::open(&args.draft_file)?;

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let commands = parsing::deserialize_csv(&mut rdr);
    let (draft, directory) = parsing::assemble(commands, ParticipantId::from(args.user));

    let engine = AllocationEngine::new(directory);
    let ledger = engine.finalize(&draft)?;
    output::write_ledger(&ledger, engine.directory(), std::io::stdout())
}

#[derive(Parser)]
struct Arguments {
    draft_file: String,
    /// Whoever is composing the draft - they become the implicit payer when
    /// no payer rows are present.
    #[arg(long, default_value_t = 0)]
    user: u32,
    #[arg(long)]
    log_level: Option<tracing::Level>,
}
