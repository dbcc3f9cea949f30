//! CLI frontend for the Make Magic enchantment engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mm",
    about = "Make Magic: enchant weapons, armor, shields and jewelry, and turn powers into scrolls",
    version,
    propagate_version = true
)]
struct Cli {
    /// State file holding actors, items and compendium packs
    #[arg(short, long, global = true, default_value = "magic.json")]
    state: PathBuf,

    /// Log more (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a sample state file with a character, an NPC and their gear
    Init {
        /// Overwrite an existing state file
        #[arg(short, long)]
        force: bool,
    },

    /// List items
    List {
        /// Only items owned by this actor
        #[arg(short, long)]
        actor: Option<String>,
    },

    /// Show detailed information about an item
    Show {
        /// Item name (case-insensitive)
        item: String,

        /// Owner of the item
        #[arg(short, long)]
        actor: Option<String>,
    },

    /// Show an actor's power-point ledger
    Ledger {
        /// Actor name (case-insensitive)
        actor: String,
    },

    /// Make an item magic (without --option or --form, list the choices)
    Enchant {
        /// Item name (case-insensitive)
        item: String,

        /// Owner of the item
        #[arg(short, long)]
        actor: Option<String>,

        /// Enchantment option ID or label (weapons, armor, shields)
        #[arg(short, long)]
        option: Option<String>,

        /// Jewelry form (bracelet, brooch, earring, hairpin, necklace, ring)
        #[arg(short, long, conflicts_with = "option")]
        form: Option<String>,

        /// Trait raised by jewelry
        #[arg(short, long = "trait")]
        trait_name: Option<String>,

        /// JSON file overriding enchantment costs
        #[arg(long)]
        settings: Option<PathBuf>,
    },

    /// Turn a power into a single-use scroll
    Scroll {
        /// Power name (case-insensitive)
        power: String,

        /// Owner of the power
        #[arg(short, long)]
        actor: Option<String>,
    },

    /// Inscribe a power onto a blank scroll the actor carries
    Attach {
        /// Blank scroll name (case-insensitive)
        scroll: String,

        /// Power name (case-insensitive)
        power: String,

        /// Owner of both
        #[arg(short, long)]
        actor: String,
    },

    /// Give an actor a blank scroll, optionally inscribing a power at once
    AddScroll {
        /// Receiving actor
        actor: String,

        /// Power to inscribe
        #[arg(short, long)]
        power: Option<String>,

        /// Scroll name
        #[arg(short, long, default_value = "Scroll")]
        name: String,

        /// Scroll price
        #[arg(long, default_value = "0")]
        price: u32,
    },

    /// Give an actor an arcane device with its own power points
    AddDevice {
        /// Receiving actor
        actor: String,

        /// Device name
        name: String,

        /// Arcane background the device's powers use
        #[arg(long)]
        arcane: String,

        /// Power points stored in the device
        #[arg(long)]
        pp: u32,

        /// Power granted by the device
        #[arg(long, default_value = "Bolt")]
        power: String,
    },

    /// List the traits magic jewelry can raise
    Traits,

    /// Show enchantment costs
    Settings {
        /// JSON file overriding enchantment costs
        #[arg(long)]
        settings: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let state = cli.state;

    let result = match cli.command {
        Commands::Init { force } => commands::init::run(&state, force),
        Commands::List { actor } => commands::list::run(&state, actor.as_deref()),
        Commands::Show { item, actor } => commands::show::run(&state, &item, actor.as_deref()),
        Commands::Ledger { actor } => commands::ledger::run(&state, &actor),
        Commands::Enchant {
            item,
            actor,
            option,
            form,
            trait_name,
            settings,
        } => commands::enchant::run(
            &state,
            commands::enchant::Request {
                item: &item,
                actor: actor.as_deref(),
                choice: option.or(form),
                trait_name,
                settings: settings.as_deref(),
            },
        ),
        Commands::Scroll { power, actor } => {
            commands::scroll::run(&state, &power, actor.as_deref())
        }
        Commands::Attach {
            scroll,
            power,
            actor,
        } => commands::scroll::attach(&state, &scroll, &power, &actor),
        Commands::AddScroll {
            actor,
            power,
            name,
            price,
        } => commands::add::scroll(&state, &actor, &name, price, power.as_deref()),
        Commands::AddDevice {
            actor,
            name,
            arcane,
            pp,
            power,
        } => commands::add::device(&state, &actor, &name, &arcane, pp, &power),
        Commands::Traits => commands::traits::run(&state),
        Commands::Settings { settings } => commands::settings::run(settings.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
