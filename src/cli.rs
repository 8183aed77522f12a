//! Command-line interface for codesniff.

use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::detect::Analyzer;
use crate::report::{self, ExportKind, FileReport};
use crate::rewrite::Rewriter;
use crate::store::{HistoryEntry, Role, Store};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Path argument that reads from standard input.
pub const STDIN_PATH: &str = "-";

/// Template written by `codesniff init`.
pub const DEFAULT_TEMPLATE: &str = include_str!("templates/default.yaml");

/// Heuristic AI-generated code detector.
///
/// codesniff scores source code from 0 to 100 for how likely it is to have
/// been produced by an AI code generator, explains the score per module,
/// and can rewrite code so its score goes down.
#[derive(Parser)]
#[command(name = "codesniff")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score files for AI likelihood
    #[command(visible_alias = "scan")]
    Analyze(AnalyzeArgs),
    /// Rewrite a file to lower its AI likelihood
    Rewrite(RewriteArgs),
    /// Write a downloadable report document
    Export(ExportArgs),
    /// List recorded submissions
    History(HistoryArgs),
    /// Manage users
    #[command(subcommand)]
    Users(UsersCommand),
    /// Create a codesniff config from the default template
    Init(InitArgs),
}

/// Attribution for `--record`.
#[derive(Args)]
pub struct RecordArgs {
    /// Append the result to the history store
    #[arg(long, requires = "email", requires = "password")]
    pub record: bool,

    /// Email the record is attributed to
    #[arg(long)]
    pub email: Option<String>,

    /// Password of the recording user
    #[arg(long)]
    pub password: Option<String>,
}

/// Arguments for the analyze command.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// File or directory to analyze, or - for stdin
    pub path: PathBuf,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Exit non-zero when any likelihood reaches this value
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub threshold: Option<u32>,

    #[command(flatten)]
    pub record: RecordArgs,
}

/// Arguments for the rewrite command.
#[derive(Args)]
pub struct RewriteArgs {
    /// File to rewrite, or - for stdin
    pub path: PathBuf,

    /// Write the rewritten code here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    #[command(flatten)]
    pub record: RecordArgs,
}

/// Arguments for the export command.
#[derive(Args)]
pub struct ExportArgs {
    /// File to analyze and rewrite, or - for stdin
    pub path: PathBuf,

    /// Report file to write
    #[arg(long)]
    pub to: PathBuf,

    /// Document kind: txt, html or doc (default: from --to extension)
    #[arg(short, long)]
    pub kind: Option<String>,
}

/// Arguments for the history command.
#[derive(Args)]
pub struct HistoryArgs {
    /// Only show records for this email
    #[arg(long)]
    pub email: Option<String>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

#[derive(Subcommand)]
pub enum UsersCommand {
    /// Register a user
    Add {
        email: String,
        #[arg(long)]
        password: String,
        /// Grant the admin role
        #[arg(long)]
        admin: bool,
    },
    /// Ban a user from recording submissions
    Ban { email: String },
    /// Lift a ban
    Unban { email: String },
    /// Show a user record
    Show { email: String },
    /// Check a user's password
    Verify {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Replace a user's password
    ResetPassword {
        email: String,
        #[arg(long)]
        password: String,
    },
}

/// Arguments for the init command.
#[derive(Args)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "codesniff.yaml")]
    pub output: PathBuf,
}

/// Load config and dispatch a parsed command line.
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    if let Commands::Init(args) = &cli.command {
        return run_init(args);
    }

    let config = Config::load(cli.config.as_deref())?;
    if cli.no_color || !config.use_color() {
        colored::control::set_override(false);
    }

    match &cli.command {
        Commands::Analyze(args) => run_analyze(args, &config),
        Commands::Rewrite(args) => run_rewrite(args, &config),
        Commands::Export(args) => run_export(args, &config),
        Commands::History(args) => run_history(args, &config),
        Commands::Users(cmd) => run_users(cmd, &config),
        Commands::Init(args) => run_init(args),
    }
}

fn check_format(format: &str) -> bool {
    if format != "pretty" && format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            format
        );
        return false;
    }
    true
}

/// Open the configured store, or the one in the platform data directory.
pub fn open_store(config: &Config) -> anyhow::Result<Store> {
    let path = match config.store_path() {
        Some(p) => p.to_path_buf(),
        None => Store::default_path()
            .ok_or_else(|| anyhow::anyhow!("cannot determine a data directory for the store"))?,
    };
    Ok(Store::open(path))
}

/// Outcome of resolving `--record`.
enum Recording {
    Off,
    Denied(String),
    Banned(String),
    On { store: Store, email: String },
}

impl Recording {
    /// Authenticate the recording user. Unknown emails are an error.
    fn resolve(args: &RecordArgs, config: &Config) -> anyhow::Result<Self> {
        if !args.record {
            return Ok(Recording::Off);
        }
        let (email, password) = match (&args.email, &args.password) {
            (Some(e), Some(p)) => (e.clone(), p),
            _ => anyhow::bail!("--record requires --email and --password"),
        };
        let store = open_store(config)?;
        if !store.verify_password(&email, password)? {
            return Ok(Recording::Denied(email));
        }
        if store.is_banned(&email)? {
            return Ok(Recording::Banned(email));
        }
        Ok(Recording::On { store, email })
    }

    /// Exit code when recording was refused.
    fn refusal(&self) -> Option<i32> {
        match self {
            Recording::Denied(email) => {
                eprintln!("Error: invalid password for {}", email);
                Some(EXIT_FAILED)
            }
            Recording::Banned(email) => {
                eprintln!("Error: user {} is banned", email);
                Some(EXIT_FAILED)
            }
            _ => None,
        }
    }
}

/// Read a source file, or stdin for `-`. Invalid UTF-8 is replaced.
pub fn read_source(path: &Path) -> anyhow::Result<String> {
    if path == Path::new(STDIN_PATH) {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .map_err(|e| anyhow::anyhow!("reading stdin: {}", e))?;
        return Ok(String::from_utf8_lossy(&buf).into_owned());
    }
    let bytes =
        std::fs::read(path).map_err(|e| anyhow::anyhow!("reading {}: {}", path.display(), e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn display_path(path: &Path) -> String {
    if path == Path::new(STDIN_PATH) {
        "<stdin>".to_string()
    } else {
        path.to_string_lossy().to_string()
    }
}

/// Collect files to scan under a directory, sorted by path.
pub fn collect_files(root: &Path, config: &Config) -> anyhow::Result<Vec<PathBuf>> {
    let extensions = config.scan_extensions();
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            // Skip hidden directories, but not the root itself
            if e.depth() > 0 && e.file_type().is_dir() && name.starts_with('.') {
                return false;
            }
            !(e.file_type().is_dir() && (name == "node_modules" || name == "target"))
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !extensions.iter().any(|e| e == ext) {
            continue;
        }
        let relative = path.strip_prefix(root).unwrap_or(path);
        if config.is_path_excluded(relative) || config.is_path_excluded(path) {
            continue;
        }
        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

struct Scanned {
    code: String,
    report: FileReport,
}

fn scan_files(files: &[PathBuf], analyzer: &Analyzer) -> Vec<Scanned> {
    let mut scanned: Vec<Scanned> = files
        .par_iter()
        .filter_map(|path| match read_source(path) {
            Ok(code) => {
                let result = analyzer.analyze(&code);
                Some(Scanned {
                    report: FileReport {
                        path: display_path(path),
                        result,
                    },
                    code,
                })
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable file");
                None
            }
        })
        .collect();
    scanned.sort_by(|a, b| a.report.path.cmp(&b.report.path));
    scanned
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs, config: &Config) -> anyhow::Result<i32> {
    if !check_format(&args.format) {
        return Ok(EXIT_ERROR);
    }

    let recording = Recording::resolve(&args.record, config)?;
    if let Some(code) = recording.refusal() {
        return Ok(code);
    }

    let analyzer = config.analyzer();
    let threshold = args.threshold.or(config.threshold);

    let scanned = if args.path == Path::new(STDIN_PATH) {
        let code = read_source(&args.path)?;
        let result = analyzer.analyze(&code);
        vec![Scanned {
            report: FileReport {
                path: display_path(&args.path),
                result,
            },
            code,
        }]
    } else {
        let metadata = match std::fs::metadata(&args.path) {
            Ok(m) => m,
            Err(e) => {
                eprintln!("Error: cannot access path {:?}: {}", args.path, e);
                return Ok(EXIT_ERROR);
            }
        };
        let files = if metadata.is_dir() {
            collect_files(&args.path, config)?
        } else {
            vec![args.path.clone()]
        };
        if files.is_empty() {
            eprintln!("Warning: no files to scan");
            return Ok(EXIT_SUCCESS);
        }
        info!(files = files.len(), "analyzing");
        scan_files(&files, &analyzer)
    };

    if let Recording::On { store, email } = &recording {
        for s in &scanned {
            store.append_history(HistoryEntry::from_analysis(email, &s.code, &s.report.result))?;
        }
        info!(email = %email, records = scanned.len(), "recorded history");
    }

    let reports: Vec<FileReport> = scanned.into_iter().map(|s| s.report).collect();
    match args.format.as_str() {
        "json" => report::write_json(&reports, threshold, &analyzer)?,
        _ => report::write_pretty(&reports, threshold, &analyzer),
    }

    if report::passes(&reports, threshold) {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_FAILED)
    }
}

/// Run the rewrite command.
pub fn run_rewrite(args: &RewriteArgs, config: &Config) -> anyhow::Result<i32> {
    if !check_format(&args.format) {
        return Ok(EXIT_ERROR);
    }

    let recording = Recording::resolve(&args.record, config)?;
    if let Some(code) = recording.refusal() {
        return Ok(code);
    }

    let code = read_source(&args.path)?;
    let analyzer = config.analyzer();
    let result = Rewriter::new(analyzer.clone()).rewrite(&code);
    let path = display_path(&args.path);

    if let Recording::On { store, email } = &recording {
        store.append_history(HistoryEntry::from_rewrite(email, &result))?;
        info!(email = %email, "recorded history");
    }

    if let Some(output) = &args.output {
        std::fs::write(output, &result.rewritten)
            .map_err(|e| anyhow::anyhow!("writing {}: {}", output.display(), e))?;
        info!(path = %output.display(), "wrote rewritten code");
    }

    match args.format.as_str() {
        "json" => report::write_json_rewrite(&path, &result, &analyzer)?,
        _ => {
            report::write_pretty_rewrite(&path, &result);
            if args.output.is_none() {
                println!("{}", result.rewritten);
            }
        }
    }

    Ok(EXIT_SUCCESS)
}

/// Run the export command.
pub fn run_export(args: &ExportArgs, config: &Config) -> anyhow::Result<i32> {
    let kind = match &args.kind {
        Some(k) => ExportKind::parse(k),
        None => ExportKind::from_path(&args.to),
    };
    let kind = match kind {
        Some(k) => k,
        None => {
            eprintln!("Error: cannot determine document kind, use --kind txt|html|doc");
            return Ok(EXIT_ERROR);
        }
    };

    let code = read_source(&args.path)?;
    let result = Rewriter::new(config.analyzer()).rewrite(&code);
    report::export_document(kind, &display_path(&args.path), &result, &args.to)?;

    println!("Wrote {}", args.to.display());
    Ok(EXIT_SUCCESS)
}

/// Run the history command.
pub fn run_history(args: &HistoryArgs, config: &Config) -> anyhow::Result<i32> {
    if !check_format(&args.format) {
        return Ok(EXIT_ERROR);
    }

    let store = open_store(config)?;
    let entries = match &args.email {
        Some(email) => store.history_for(email)?,
        None => store.history()?,
    };

    match args.format.as_str() {
        "json" => report::write_json_history(&entries)?,
        _ => report::write_pretty_history(&entries),
    }
    Ok(EXIT_SUCCESS)
}

/// Run a users subcommand.
pub fn run_users(cmd: &UsersCommand, config: &Config) -> anyhow::Result<i32> {
    let store = open_store(config)?;

    match cmd {
        UsersCommand::Add {
            email,
            password,
            admin,
        } => {
            let role = if *admin { Role::Admin } else { Role::User };
            store.register_user(email, password, role)?;
            info!(email = %email, role = %role, "registered user");
            println!("Registered {} ({})", email, role);
        }
        UsersCommand::Ban { email } => {
            store.ban(email)?;
            info!(email = %email, "banned user");
            println!("Banned {}", email);
        }
        UsersCommand::Unban { email } => {
            store.unban(email)?;
            info!(email = %email, "unbanned user");
            println!("Unbanned {}", email);
        }
        UsersCommand::Show { email } => match store.find_user(email)? {
            Some(user) => {
                println!("Email:  {}", user.email);
                println!("Role:   {}", user.role);
                println!("Banned: {}", if user.banned { "yes" } else { "no" });
            }
            None => {
                eprintln!("Error: user not found: {}", email);
                return Ok(EXIT_FAILED);
            }
        },
        UsersCommand::Verify { email, password } => {
            if !store.verify_password(email, password)? {
                eprintln!("Error: invalid password for {}", email);
                return Ok(EXIT_FAILED);
            }
            println!("Password OK for {}", email);
        }
        UsersCommand::ResetPassword { email, password } => {
            store.reset_password(email, password)?;
            info!(email = %email, "reset password");
            println!("Password reset for {}", email);
        }
    }

    Ok(EXIT_SUCCESS)
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    // Check if output already exists
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    // Create output directory if needed
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, DEFAULT_TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to customize for your project", args.output.display());
    println!(
        "  2. Run: codesniff analyze . --config {}",
        args.output.display()
    );

    Ok(EXIT_SUCCESS)
}
