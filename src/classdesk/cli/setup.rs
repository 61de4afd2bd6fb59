use classdesk::preferences::Theme;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "classdesk",
    bin_name = "classdesk",
    version,
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "Classroom dashboard for the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Print help
    #[arg(short, long, global = true)]
    pub help: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Students,
    Account,
    Display,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Students => "Student Commands:",
            CommandGroup::Account => "Account Commands:",
            CommandGroup::Display => "Display Commands:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "list" | "search" | "add" | "edit" | "delete" => Some(CommandGroup::Students),
            "login" | "signup" | "logout" | "whoami" | "strength" => Some(CommandGroup::Account),
            "compact" | "theme" | "prefs" => Some(CommandGroup::Display),
            "config" | "help" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[
            CommandGroup::Students,
            CommandGroup::Account,
            CommandGroup::Display,
            CommandGroup::Misc,
        ]
    }
}

/// Returns the custom grouped help output as a string
pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("classdesk {version}\n"));
    output.push_str("Classroom dashboard for the command line\n");
    output.push('\n');
    output.push_str("Usage: classdesk [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("  -v, --verbose    Verbose output\n");
    output.push_str("  -h, --help       Print help\n");
    output.push_str("  -V, --version    Print version\n");
    output.push('\n');
    output.push_str("Environment:\n");
    output.push_str("  CLASSDESK_HOME   Data directory (defaults to the OS data dir)\n");
    output.push_str("  CLASSDESK_LOG    Log filter, e.g. debug or classdesk=trace\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

/// Prints help for a command by name, falling back to the grouped help
pub fn print_help_for_command(name: &str) {
    let mut cmd = Cli::command();

    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name {
            let help = subcmd.render_help();
            print!("{}", help);
            return;
        }
    }

    eprintln!("Unknown command: {}", name);
    eprintln!();
    print_grouped_help();
}

pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Students(c) => match c {
            StudentCommands::List { .. } => "list",
            StudentCommands::Search { .. } => "search",
            StudentCommands::Add { .. } => "add",
            StudentCommands::Edit { .. } => "edit",
            StudentCommands::Delete { .. } => "delete",
        },
        Commands::Account(c) => match c {
            AccountCommands::Login { .. } => "login",
            AccountCommands::Signup { .. } => "signup",
            AccountCommands::Logout => "logout",
            AccountCommands::Whoami => "whoami",
            AccountCommands::Strength { .. } => "strength",
        },
        Commands::Display(c) => match c {
            DisplayCommands::Compact => "compact",
            DisplayCommands::Theme { .. } => "theme",
            DisplayCommands::Prefs => "prefs",
        },
        Commands::Misc(c) => match c {
            MiscCommands::Config { .. } => "config",
            MiscCommands::Help { .. } => "help",
        },
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Students(StudentCommands),

    #[command(flatten)]
    Account(AccountCommands),

    #[command(flatten)]
    Display(DisplayCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Subcommand, Debug)]
pub enum StudentCommands {
    /// List students
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Only show students whose id, name or email contains this
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Search students by id, name or email
    #[command(display_order = 2)]
    Search { term: String },

    /// Add a student
    #[command(display_order = 3)]
    Add {
        name: String,
        email: String,
        /// Attendance percentage (whole number)
        #[arg(allow_hyphen_values = true)]
        attendance: String,
    },

    /// Edit a student's name, email and attendance
    #[command(alias = "e", display_order = 4)]
    Edit {
        /// Student id (e.g. 002)
        id: String,
        name: String,
        email: String,
        /// Attendance percentage (whole number)
        #[arg(allow_hyphen_values = true)]
        attendance: String,
    },

    /// Delete a student
    #[command(alias = "rm", display_order = 5)]
    Delete {
        /// Student id (e.g. 002)
        id: String,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum AccountCommands {
    /// Log in
    #[command(display_order = 10)]
    Login {
        #[arg(short, long)]
        email: Option<String>,

        /// Read from stdin when omitted
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Create an account and log in
    #[command(display_order = 11)]
    Signup {
        /// Full name
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        password: Option<String>,

        /// Password again
        #[arg(short, long)]
        confirm: Option<String>,

        /// Accept the terms of service
        #[arg(long)]
        accept_terms: bool,
    },

    /// Log out
    #[command(display_order = 12)]
    Logout,

    /// Show the logged-in user
    #[command(display_order = 13)]
    Whoami,

    /// Score a password
    #[command(display_order = 14)]
    Strength { password: String },
}

#[derive(Subcommand, Debug)]
pub enum DisplayCommands {
    /// Toggle the compact student list
    #[command(display_order = 20)]
    Compact,

    /// Set the color theme, or switch to the other one
    #[command(display_order = 21)]
    Theme {
        #[arg(value_enum)]
        theme: Option<ThemeArg>,
    },

    /// Show display preferences
    #[command(display_order = 22)]
    Prefs,
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Get or set configuration
    #[command(display_order = 30)]
    Config {
        /// Configuration key (e.g., line-width)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Print help for classdesk or a subcommand
    #[command(display_order = 31)]
    Help {
        /// Subcommand to get help for
        command: Option<String>,
    },
}
