use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Tail the log database and print events until interrupted
    Run {
        #[arg(long, help = "Config file path (TOML)")]
        config: Option<String>,
    },
    /// Run a single fetch cycle and print its events
    Fetch {
        #[arg(long, help = "Config file path (TOML)")]
        config: Option<String>,

        #[arg(long, help = "Override the configured batch size")]
        batch_size: Option<u32>,
    },
    /// Inspect or move the persisted cursor
    Cursor {
        #[command(subcommand)]
        command: CursorCommand,
    },
}

#[derive(Subcommand)]
pub enum CursorCommand {
    Show {
        #[arg(long, help = "Config file path (TOML)")]
        config: Option<String>,

        #[arg(long, help = "Print the cursor as JSON")]
        json: bool,
    },
    Set {
        #[arg(long, help = "Config file path (TOML)")]
        config: Option<String>,

        #[arg(
            long,
            allow_hyphen_values = true,
            help = "Last consumed row id; -1 replays the whole table"
        )]
        last_id: i64,
    },
}
