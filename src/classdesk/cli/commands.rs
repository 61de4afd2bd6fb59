//! Argument dispatch and per-command handlers.
//!
//! Each `handle_*()` calls the API, prints what came back and returns the `CmdResult` so
//! `run()` can pick the exit code.

use super::init_tracing;
use super::render::Renderer;
use super::setup::{
    command_name, print_grouped_help, print_help_for_command, AccountCommands, Cli, Commands,
    DisplayCommands, MiscCommands, StudentCommands,
};
use clap::Parser;
use classdesk::api::{self, ClassdeskApi, CmdMessage, CmdResult, ConfigAction};
use classdesk::config::{self, ClassdeskConfig};
use classdesk::error::Result;
use classdesk::init::initialize;
use classdesk::model::{StudentInput, StudentRecord};
use classdesk::preferences::{Preferences, Theme};
use classdesk::session::Page;
use classdesk::store::fs::FileStore;
use classdesk::validate::SignupForm;
use colored::Colorize;
use std::io::{self, Write};
use std::process::ExitCode;

struct AppContext {
    api: ClassdeskApi<FileStore>,
    config: ClassdeskConfig,
    renderer: Renderer,
}

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.help {
        match &cli.command {
            Some(command) => print_help_for_command(command_name(command)),
            None => print_grouped_help(),
        }
        return Ok(ExitCode::SUCCESS);
    }

    let command = cli
        .command
        .unwrap_or(Commands::Students(StudentCommands::List { search: None }));
    tracing::debug!(command = command_name(&command), "dispatch");

    // help and strength never touch stored state
    let command = match command {
        Commands::Misc(MiscCommands::Help { command }) => {
            return Ok(exit_code(&handle_help(command.as_deref())));
        }
        Commands::Account(AccountCommands::Strength { password }) => {
            return Ok(exit_code(&handle_strength(&password)));
        }
        other => other,
    };

    let mut ctx = init_context()?;

    let result = match command {
        Commands::Students(cmd) => match cmd {
            StudentCommands::List { search } => handle_list(&mut ctx, search),
            StudentCommands::Search { term } => handle_list(&mut ctx, Some(term)),
            StudentCommands::Add {
                name,
                email,
                attendance,
            } => handle_add(&mut ctx, StudentInput::new(name, email, attendance)),
            StudentCommands::Edit {
                id,
                name,
                email,
                attendance,
            } => handle_edit(&mut ctx, &id, StudentInput::new(name, email, attendance)),
            StudentCommands::Delete { id, yes } => handle_delete(&mut ctx, &id, yes),
        },
        Commands::Account(cmd) => match cmd {
            AccountCommands::Login { email, password } => handle_login(&mut ctx, email, password),
            AccountCommands::Signup {
                name,
                email,
                password,
                confirm,
                accept_terms,
            } => handle_signup(
                &mut ctx,
                SignupForm {
                    fullname: name.unwrap_or_default(),
                    email: email.unwrap_or_default(),
                    password: password.unwrap_or_default(),
                    confirm_password: confirm.unwrap_or_default(),
                    accepted_terms: accept_terms,
                },
            ),
            AccountCommands::Logout => handle_logout(&mut ctx),
            AccountCommands::Whoami => handle_whoami(&ctx),
            AccountCommands::Strength { password } => Ok(handle_strength(&password)),
        },
        Commands::Display(cmd) => match cmd {
            DisplayCommands::Compact => handle_compact(&mut ctx),
            DisplayCommands::Theme { theme } => handle_theme(&mut ctx, theme.map(Theme::from)),
            DisplayCommands::Prefs => handle_prefs(&ctx),
        },
        Commands::Misc(cmd) => match cmd {
            MiscCommands::Config { key, value } => handle_config(&mut ctx, key, value),
            MiscCommands::Help { command } => Ok(handle_help(command.as_deref())),
        },
    }?;

    Ok(exit_code(&result))
}

fn exit_code(result: &CmdResult) -> ExitCode {
    if result.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn init_context() -> Result<AppContext> {
    let ctx = initialize()?;
    let renderer = Renderer::new(ctx.preferences, ctx.config.line_width);

    Ok(AppContext {
        api: ctx.api,
        config: ctx.config,
        renderer,
    })
}

fn print_messages(ctx: &AppContext, messages: &[CmdMessage]) {
    let output = ctx.renderer.messages(messages);
    if !output.is_empty() {
        print!("{}", output);
    }
}

/// Messages, plus a pointer to `login` when the session gate refused.
fn print_outcome(ctx: &AppContext, result: &CmdResult) {
    print_messages(ctx, &result.messages);
    if result.redirect == Some(Page::Login) {
        print_messages(
            ctx,
            &[CmdMessage::info(
                "Run `classdesk login --email <EMAIL>` first",
            )],
        );
    }
}

fn handle_list(ctx: &mut AppContext, search: Option<String>) -> Result<CmdResult> {
    let result = match &search {
        Some(term) => ctx.api.search_students(term)?,
        None => ctx.api.list_students()?,
    };

    let filtered = search.as_deref().is_some_and(|t| !t.is_empty());
    // an empty search already explains itself in the messages
    if result.redirect.is_none() && (!result.listed_students.is_empty() || !filtered) {
        print!(
            "{}",
            ctx.renderer
                .students(&result.listed_students, "No students yet.")
        );
    }
    print_outcome(ctx, &result);
    Ok(result)
}

fn handle_add(ctx: &mut AppContext, input: StudentInput) -> Result<CmdResult> {
    let result = ctx.api.create_student(&input)?;
    print_outcome(ctx, &result);
    Ok(result)
}

fn handle_edit(ctx: &mut AppContext, id: &str, input: StudentInput) -> Result<CmdResult> {
    let result = ctx.api.update_student(id, &input)?;
    print_outcome(ctx, &result);
    Ok(result)
}

fn handle_delete(ctx: &mut AppContext, id: &str, yes: bool) -> Result<CmdResult> {
    let result = if yes || !ctx.config.confirm_delete {
        ctx.api.delete_student(id, |_| true)?
    } else {
        ctx.api.delete_student(id, confirm_delete)?
    };
    print_outcome(ctx, &result);
    Ok(result)
}

/// Asks on the terminal; anything but `Y` (or a read failure) keeps the student.
fn confirm_delete(record: &StudentRecord) -> bool {
    println!("This will remove the following student:");
    println!("  {} {} <{}>", record.id, record.name, record.email);
    print!("{} ", "[Y] To delete:".yellow());
    if let Err(e) = io::stdout().flush() {
        tracing::warn!(error = %e, "could not flush prompt");
        return false;
    }

    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(_) => input.trim() == "Y",
        Err(e) => {
            tracing::warn!(error = %e, "could not read confirmation");
            false
        }
    }
}

fn handle_login(
    ctx: &mut AppContext,
    email: Option<String>,
    password: Option<String>,
) -> Result<CmdResult> {
    let password = match password {
        Some(password) => password,
        None => read_password()?,
    };
    let result = ctx.api.login(&email.unwrap_or_default(), &password)?;
    print_outcome(ctx, &result);
    Ok(result)
}

/// One line from stdin, so the password stays out of shell history.
fn read_password() -> Result<String> {
    eprint!("Password: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn handle_signup(ctx: &mut AppContext, form: SignupForm) -> Result<CmdResult> {
    let result = ctx.api.signup(&form)?;
    print_outcome(ctx, &result);
    Ok(result)
}

fn handle_logout(ctx: &mut AppContext) -> Result<CmdResult> {
    let result = ctx.api.logout()?;
    print_outcome(ctx, &result);
    Ok(result)
}

fn handle_whoami(ctx: &AppContext) -> Result<CmdResult> {
    let result = ctx.api.whoami()?;
    if let Some(user) = &result.user {
        print!("{}", ctx.renderer.user(user));
    }
    print_outcome(ctx, &result);
    Ok(result)
}

/// Rendered with default preferences since the store is never opened.
fn handle_strength(password: &str) -> CmdResult {
    let renderer = Renderer::new(Preferences::default(), ClassdeskConfig::default().line_width);
    let result = api::password_strength(password);
    if let Some(strength) = &result.strength {
        print!("{}", renderer.strength(strength));
    }
    let messages = renderer.messages(&result.messages);
    if !messages.is_empty() {
        print!("{}", messages);
    }
    result
}

fn handle_compact(ctx: &mut AppContext) -> Result<CmdResult> {
    let result = ctx.api.toggle_compact()?;
    apply_preferences(ctx, &result);
    print_outcome(ctx, &result);
    Ok(result)
}

fn handle_theme(ctx: &mut AppContext, theme: Option<Theme>) -> Result<CmdResult> {
    let result = ctx.api.theme(theme)?;
    apply_preferences(ctx, &result);
    print_outcome(ctx, &result);
    Ok(result)
}

/// Switches the renderer over so the confirmation already uses the new look.
fn apply_preferences(ctx: &mut AppContext, result: &CmdResult) {
    if let Some(preferences) = result.preferences {
        ctx.renderer = Renderer::new(preferences, ctx.config.line_width);
    }
}

fn handle_prefs(ctx: &AppContext) -> Result<CmdResult> {
    let result = ctx.api.preferences()?;
    let lines = result
        .preferences
        .map(|p| {
            vec![
                format!("compact = {}", p.compact),
                format!("theme = {}", p.theme),
            ]
        })
        .unwrap_or_default();
    print!("{}", ctx.renderer.text_list(&lines, "No preferences."));
    print_outcome(ctx, &result);
    Ok(result)
}

fn handle_config(
    ctx: &mut AppContext,
    key: Option<String>,
    value: Option<String>,
) -> Result<CmdResult> {
    let show_all = key.is_none();
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if let Some(config) = &result.config {
        if show_all {
            let lines: Vec<String> = config::KEYS
                .iter()
                .filter_map(|k| config.get(k).map(|v| format!("{} = {}", k, v)))
                .collect();
            print!(
                "{}",
                ctx.renderer.text_list(&lines, "No configuration values.")
            );
        }
        ctx.config = config.clone();
    }
    print_outcome(ctx, &result);
    Ok(result)
}

fn handle_help(command: Option<&str>) -> CmdResult {
    match command {
        Some(cmd) => print_help_for_command(cmd),
        None => print_grouped_help(),
    }
    CmdResult::default()
}
