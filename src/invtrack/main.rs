use clap::Parser;
use colored::*;
use invtrack::api::{CmdMessage, InventoryApi, LoginOutcome, MessageLevel};
use invtrack::config::InvConfig;
use invtrack::error::Result;
use invtrack::index::{DisplayRecord, Position};
use invtrack::model::{AuditEntry, AuditStatus};
use invtrack::store::fs::CsvFileBackend;
use invtrack::validation::RecordForm;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        if e.is_unsaved() {
            eprintln!("The change was applied in memory but could not be written to disk.");
        }
        std::process::exit(1);
    }
}

struct AppContext {
    api: InventoryApi<CsvFileBackend>,
    config: InvConfig,
    data_dir: PathBuf,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List) | None => handle_list(&mut ctx),
        Some(Commands::Search { keyword }) => handle_search(&ctx, &keyword),
        Some(Commands::Add { form }) => handle_add(&mut ctx, form.into_form(RecordForm::default())),
        Some(Commands::Update { position, form }) => handle_update(&mut ctx, position, form),
        Some(Commands::Delete { position }) => handle_delete(&mut ctx, position),
        Some(Commands::Audit { refresh }) => handle_audit(&ctx, refresh),
        Some(Commands::Login { failed }) => handle_login(&ctx, failed),
        Some(Commands::Logout) => {
            print_messages(&ctx.api.logout().messages);
            Ok(())
        }
        Some(Commands::Init) => handle_init(&ctx),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "invtrack=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    let config = InvConfig::load(&data_dir)?;
    let user = cli
        .user
        .clone()
        .unwrap_or_else(|| config.default_user.clone());
    let api = InventoryApi::open(&data_dir, &config, user)?;

    Ok(AppContext {
        api,
        config,
        data_dir,
    })
}

fn handle_list(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.load()?;
    print_records(&result.listed_records);
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &AppContext, keyword: &str) -> Result<()> {
    let result = ctx.api.search(keyword)?;
    print_records(&result.listed_records);
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(ctx: &mut AppContext, form: RecordForm) -> Result<()> {
    let result = ctx.api.add_item(&form)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_update(ctx: &mut AppContext, position: Position, form: args::FormArgs) -> Result<()> {
    let base = ctx
        .api
        .records()
        .get(position.to_index())
        .map(RecordForm::from)
        .unwrap_or_default();
    let result = ctx.api.update_item(position, &form.into_form(base))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, position: Position) -> Result<()> {
    let result = ctx.api.delete_item(position)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_audit(ctx: &AppContext, refresh: bool) -> Result<()> {
    let result = ctx.api.audit_log(refresh)?;
    print_audit(&result.audit_entries);
    print_messages(&result.messages);
    Ok(())
}

fn handle_login(ctx: &AppContext, failed: Option<String>) -> Result<()> {
    let outcome = match failed {
        Some(reason) => LoginOutcome::Failed(reason),
        None => LoginOutcome::Success,
    };
    print_messages(&ctx.api.login(&outcome).messages);
    Ok(())
}

fn handle_init(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.init(&ctx.data_dir, &ctx.config)?;
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const COLUMNS: [(&str, usize); 9] = [
    ("#", 4),
    ("ID", 7),
    ("Name", 22),
    ("Category", 12),
    ("Qty", 6),
    ("Unit", 6),
    ("Location", 16),
    ("Condition", 10),
    ("Acquired", 8),
];

fn print_records(records: &[DisplayRecord]) {
    if records.is_empty() {
        println!("No items found.");
        return;
    }

    let header: Vec<String> = COLUMNS
        .iter()
        .map(|(title, width)| pad_to_width(title, *width))
        .collect();
    println!("{}", header.join(" ").bold());

    for dr in records {
        let fields = dr.record.fields();
        let mut cells = vec![pad_to_width(&dr.position.to_string(), COLUMNS[0].1)
            .yellow()
            .to_string()];
        for (value, (_, width)) in fields.iter().zip(COLUMNS.iter().skip(1)) {
            cells.push(pad_to_width(value, *width));
        }
        println!("{}", cells.join(" "));
    }
}

fn print_audit(entries: &[AuditEntry]) {
    for entry in entries {
        let when = match entry.timestamp {
            Some(ts) => format!(
                "{} {}",
                ts.format(invtrack::codec::TIMESTAMP_FORMAT),
                format_time_ago(ts).dimmed()
            ),
            None => entry.raw_timestamp.red().to_string(),
        };
        let action = entry.action.to_string();
        let action = match entry.status {
            AuditStatus::Success => action.green(),
            AuditStatus::Failed => action.red(),
            AuditStatus::Warning => action.yellow(),
            AuditStatus::Info | AuditStatus::Unknown(_) => action.normal(),
        };
        println!(
            "{}  {}  {}  {}  {}",
            when,
            pad_to_width(&entry.username, 12),
            action,
            entry.ip_address.dimmed(),
            entry.details
        );
    }
}

fn pad_to_width(s: &str, width: usize) -> String {
    let truncated = truncate_to_width(s, width);
    let padding = width.saturating_sub(truncated.width());
    format!("{}{}", truncated, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: chrono::NaiveDateTime) -> String {
    let now = chrono::Local::now().naive_local();
    let duration = now.signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    format!(
        "({})",
        formatter.convert(duration.to_std().unwrap_or_default())
    )
}
