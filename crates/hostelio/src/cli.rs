//! Clap derive structures for the `hostelio` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Values that need domain parsing (dates, amounts, ids) stay as strings
//! here so the build script can compile this file with clap alone.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// hostelio -- find, book, and pay for hostel and PG stays
#[derive(Debug, Parser)]
#[command(
    name = "hostelio",
    version,
    about = "Book hostel and PG stays from the command line",
    long_about = "A command-line client for the Hostelio rental marketplace.\n\n\
        Browse approved listings, quote and book stays, follow payments to\n\
        completion, chat with owners, and run the admin approval queue.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "HOSTELIO_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Marketplace API base URL (overrides profile)
    #[arg(long, env = "HOSTELIO_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Access token (skips the stored session)
    #[arg(long, env = "HOSTELIO_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Account id that goes with --token
    #[arg(long, env = "HOSTELIO_USER_ID", global = true, hide_env = true)]
    pub user_id: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "HOSTELIO_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "HOSTELIO_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "HOSTELIO_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Shared Value Enums ───────────────────────────────────────────────

/// Account role used at sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    /// Looking for a place to stay
    #[value(alias = "user")]
    Seeker,
    /// Lists properties
    Owner,
    Admin,
}

/// Stay length preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DurationArg {
    /// One week
    ShortTerm,
    /// One month
    LongTerm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SharingArg {
    Private,
    Shared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HostelTypeArg {
    Boys,
    Girls,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BhkArg {
    #[value(name = "1bhk")]
    One,
    #[value(name = "2bhk")]
    Two,
    #[value(name = "3bhk")]
    Three,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a seeker or owner account
    Signup(SignupArgs),

    /// Sign in and store the session
    Login(LoginArgs),

    /// Forget the stored session
    Logout,

    /// Show the signed-in account
    Whoami,

    /// Edit your profile
    Profile(ProfileArgs),

    /// Browse rental listings
    #[command(alias = "apt", alias = "a")]
    Apartments(ApartmentsArgs),

    /// Price a stay without booking it
    Quote(StayArgs),

    /// Book a stay and follow its payment
    Book(BookArgs),

    /// Check or follow payment orders
    #[command(alias = "pay")]
    Payments(PaymentsArgs),

    /// Booking history and receipts
    #[command(alias = "b")]
    Bookings(BookingsArgs),

    /// Chat with owners and guests
    #[command(alias = "msg", alias = "m")]
    Messages(MessagesArgs),

    /// Saved listings
    #[command(alias = "wl")]
    Wishlist(WishlistArgs),

    /// Owner dashboard: your listings, bookings, and tenants
    Owner(OwnerArgs),

    /// Listing approval and user administration
    Admin(AdminArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SESSION
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email (defaults to the profile's email)
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Account role (defaults to the profile's role)
    #[arg(long, short = 'r')]
    pub role: Option<RoleArg>,

    /// Read the password from stdin instead of prompting
    #[arg(long)]
    pub password_stdin: bool,
}

#[derive(Debug, Args)]
pub struct SignupArgs {
    /// Account email
    #[arg(long, short = 'e')]
    pub email: String,

    /// Display name
    #[arg(long, short = 'n')]
    pub name: String,

    /// Phone number; spaces are ignored
    #[arg(long)]
    pub phone: String,

    /// Account role
    #[arg(long, short = 'r', default_value = "seeker")]
    pub role: RoleArg,

    /// Read the password from stdin instead of prompting twice
    #[arg(long)]
    pub password_stdin: bool,
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Change bio, date of birth, or UPI id
    Update {
        /// Short bio
        #[arg(long)]
        bio: Option<String>,

        /// Date of birth (YYYY-MM-DD); you must be 16 or older
        #[arg(long)]
        dob: Option<String>,

        /// UPI id for receiving rent, e.g. name@okhdfc ("" clears it)
        #[arg(long)]
        upi: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  APARTMENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ApartmentsArgs {
    #[command(subcommand)]
    pub command: ApartmentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ApartmentsCommand {
    /// List approved listings
    #[command(alias = "ls")]
    List(SearchArgs),

    /// Show one listing
    Get {
        /// Listing id
        id: String,
    },

    /// List listings owned by an account (defaults to yourself)
    Mine {
        /// Owner account id
        #[arg(long)]
        owner: Option<String>,
    },
}

/// Listing search filters. All given filters must match.
#[derive(Debug, Default, Args)]
pub struct SearchArgs {
    /// Include listings that are not approved yet
    #[arg(long)]
    pub all: bool,

    /// Free text matched against title or location
    #[arg(long, short = 't')]
    pub text: Option<String>,

    /// Minimum nightly rent
    #[arg(long)]
    pub rent_min: Option<String>,

    /// Maximum nightly rent
    #[arg(long)]
    pub rent_max: Option<String>,

    /// Stay length the listing is offered for
    #[arg(long)]
    pub duration: Option<DurationArg>,

    /// Room sharing
    #[arg(long)]
    pub sharing: Option<SharingArg>,

    /// Require parking
    #[arg(long)]
    pub parking: bool,

    /// Hostel type
    #[arg(long)]
    pub hostel_type: Option<HostelTypeArg>,

    /// Flat size
    #[arg(long)]
    pub bhk: Option<BhkArg>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  QUOTE / BOOK
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Stay selection shared by `quote` and `book`.
#[derive(Debug, Args)]
pub struct StayArgs {
    /// Listing id
    pub apartment: String,

    /// Check-in date (YYYY-MM-DD)
    #[arg(long, short = 's')]
    pub start: Option<String>,

    /// Check-out date (YYYY-MM-DD)
    #[arg(long, short = 'e')]
    pub end: Option<String>,

    /// Fill the check-out date from a preset length
    #[arg(long, short = 'd')]
    pub duration: Option<DurationArg>,
}

#[derive(Debug, Args)]
pub struct BookArgs {
    #[command(flatten)]
    pub stay: StayArgs,

    /// Print the payment link and return without waiting
    #[arg(long)]
    pub no_wait: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PAYMENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PaymentsArgs {
    #[command(subcommand)]
    pub command: PaymentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PaymentsCommand {
    /// Check the status of a payment order once
    Status {
        /// Payment order id
        order_id: String,
    },

    /// Poll a payment order until it is paid or times out
    Watch {
        /// Payment order id
        order_id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BOOKINGS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BookingsArgs {
    #[command(subcommand)]
    pub command: BookingsCommand,
}

#[derive(Debug, Subcommand)]
pub enum BookingsCommand {
    /// List your bookings with payment details
    #[command(alias = "ls")]
    List,

    /// List bookings made against a listing you own
    ForApartment {
        /// Listing id
        apartment: String,
    },

    /// Show one booking
    Show {
        /// Booking id
        id: String,
    },

    /// Write a booking confirmation file
    Receipt {
        /// Booking id
        id: String,

        /// Directory to write into (defaults to the current directory)
        #[arg(long)]
        dir: Option<std::path::PathBuf>,

        /// Print the confirmation instead of writing a file
        #[arg(long)]
        stdout: bool,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  MESSAGES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct MessagesArgs {
    #[command(subcommand)]
    pub command: MessagesCommand,
}

#[derive(Debug, Subcommand)]
pub enum MessagesCommand {
    /// Show the conversation with another account
    #[command(alias = "ls")]
    List {
        /// Other account id
        with: String,
    },

    /// Send a message
    Send {
        /// Receiving account id
        to: String,

        /// Message text
        message: String,
    },

    /// Follow a conversation, printing new messages as they arrive
    Watch {
        /// Other account id
        with: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  WISHLIST
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct WishlistArgs {
    #[command(subcommand)]
    pub command: WishlistCommand,
}

#[derive(Debug, Subcommand)]
pub enum WishlistCommand {
    /// List saved listings
    #[command(alias = "ls")]
    List,

    /// Save a listing
    Add {
        /// Listing id
        apartment: String,
    },

    /// Remove a saved listing
    #[command(alias = "rm")]
    Remove {
        /// Listing id
        apartment: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  OWNER
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct OwnerArgs {
    #[command(subcommand)]
    pub command: OwnerCommand,
}

#[derive(Debug, Subcommand)]
pub enum OwnerCommand {
    /// Summary of listings, pending approvals, and recent bookings
    #[command(alias = "dash")]
    Dashboard,

    /// Bookings received on your listings
    Bookings,

    /// Your listings still waiting for approval
    Pending,

    /// Accounts that have booked with you
    Tenants,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ADMIN
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// List listings waiting for approval
    Pending,

    /// Approve a listing
    Approve {
        /// Listing id
        apartment: String,
    },

    /// List registered users
    Users,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// Profile key (api_url, role, email, user_id, ca_cert, insecure,
        /// timeout, payment_poll_interval_secs, payment_timeout_secs,
        /// chat_poll_interval_secs)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
