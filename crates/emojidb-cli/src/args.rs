use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "emojidb", version, about = "EmojiDB CLI")]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Asset directory (default: assets/img)
    #[arg(long, global = true, default_value = "assets/img", env = "EMOJIDB_ASSET_DIR")]
    pub asset_dir: String,

    /// Digest algorithm used for duplicate detection: sha256|blake3
    #[arg(long, global = true, default_value = "sha256")]
    pub hash_alg: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List every emoji identifier.
    List,

    /// Show the stored extensions of one emoji.
    Describe { id: String },

    /// Read an emoji's bytes, canonical or with a specific extension.
    Fetch {
        id: String,
        /// Extension to fetch instead of the canonical one.
        #[arg(long)]
        ext: Option<String>,
        /// Write the bytes to this path.
        #[arg(long)]
        to: Option<String>,
    },

    /// Store new emoji content unless identical content already exists.
    #[command(visible_aliases = ["upload", "up"])]
    Ingest {
        /// Local file, http(s) URL, or chat emoji reference like `<a:name:id>`.
        input: String,
        /// Identifier to store under (sanitized). Defaults to the input's name.
        #[arg(long)]
        name: Option<String>,
        /// Extension to store with. Defaults to the detected format.
        #[arg(long)]
        ext: Option<String>,
    },

    /// Report misconfigured emoji and files with identical content.
    Audit,
}
