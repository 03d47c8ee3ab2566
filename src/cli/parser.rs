use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for shelfmap
/// CLI application to track warehouse products on a floor grid with SQLite
#[derive(Parser)]
#[command(
    name = "shelfmap",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track warehouse products on a 7x10 floor grid: placement, picking, undo and statistics",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Add an unplaced product
    Add {
        #[arg(long, default_value = "", help = "Product description")]
        name: String,

        #[arg(long, default_value = "", help = "Lot code (e.g. 123/25)")]
        lot: String,

        #[arg(long, default_value = "", help = "Expiry label (e.g. MAR 26)")]
        expiry: String,
    },

    /// Edit name, lot or expiry of a product
    Edit {
        /// Product id or unique id prefix
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        lot: Option<String>,

        #[arg(long)]
        expiry: Option<String>,
    },

    /// Write into a grid cell: create a product there, or edit the one it holds
    Cell {
        /// Row (1-7)
        row: i64,

        /// Column (1-10)
        col: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        lot: Option<String>,

        #[arg(long)]
        expiry: Option<String>,
    },

    /// Put an unplaced product into the first free row of a column
    Place {
        id: String,

        #[arg(long, help = "Target column (1-10); asked interactively when omitted")]
        col: Option<i64>,
    },

    /// Take a product off the grid
    Unplace { id: String },

    /// Move a product to another column
    Move {
        id: String,

        #[arg(long, help = "Target column (1-10); asked interactively when omitted")]
        col: Option<i64>,
    },

    /// Pull a product out for picking
    Pick { id: String },

    /// Picking complete: return the product to its cell
    Done { id: String },

    /// Close row gaps in a column
    Compact {
        /// Column (1-10)
        col: i64,
    },

    /// Delete a product
    Del {
        id: String,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List products
    List {
        #[arg(long, short, help = "all | shelf | floor | picking")]
        filter: Option<String>,

        #[arg(long, short, help = "Case-insensitive search in name, lot and expiry")]
        search: Option<String>,
    },

    /// Show the floor grid
    Map,

    /// Show warehouse statistics
    Stats,

    /// Revert the last change
    Undo,

    /// Export the product list
    Export {
        #[arg(long, value_enum, default_value = "json")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Default: warehouse-YYYY-MM-DD.<ext>")]
        file: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Replace the product list with the contents of a JSON file
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}
