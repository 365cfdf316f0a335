use anyhow::{Context, Result};
use bimtext::checker::dictionary::DictionarySource;
use bimtext::cli::output::{self, OutputFormat};
use bimtext::config::Overrides;
use bimtext::finder::scope::{field_texts, scan_scopes, ScopeKind, SearchQuery};
use bimtext::project::{apply_all_with, apply_selected, Project, RowOutcome};
use bimtext::{cli, Config, SpellChecker};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::*;
use env_logger::{Builder, Env, Target};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bimtext")]
#[command(version, about = "Find/replace and spell-check for keynotes, sheet names and view titles", long_about = None)]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Verbose logging (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Base wordlist (one word per line)
    #[arg(long, global = true, value_name = "FILE")]
    wordlist: Option<PathBuf>,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Project snapshot (JSON)
    project: PathBuf,

    /// Text to find
    #[arg(short, long)]
    find: String,

    /// Replacement text (empty deletes)
    #[arg(short, long, default_value = "")]
    replace: String,

    /// Match case exactly
    #[arg(short = 'c', long)]
    case_sensitive: bool,

    /// Scopes to search: keynotes, sheet-names, view-titles
    #[arg(short, long = "scope", value_name = "SCOPE")]
    scopes: Vec<ScopeKind>,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show what a find/replace would change
    Preview(SearchArgs),
    /// Apply a find/replace to the project
    Apply {
        #[command(flatten)]
        search: SearchArgs,

        /// Apply only these preview rows
        #[arg(long = "row", value_name = "N")]
        rows: Vec<usize>,

        /// Pick rows interactively
        #[arg(short, long, conflicts_with = "rows")]
        interactive: bool,
    },
    /// List spelling issues
    Spell {
        /// Project snapshot (JSON)
        #[arg(required_unless_present = "text")]
        project: Option<PathBuf>,

        /// Check this text instead of a project
        #[arg(short, long)]
        text: Option<String>,

        /// Scopes to check
        #[arg(short, long = "scope", value_name = "SCOPE")]
        scopes: Vec<ScopeKind>,

        /// Output format (text, json)
        #[arg(short = 'o', long, default_value = "text")]
        format: OutputFormat,

        /// Exit with code 0 even if issues are found
        #[arg(long)]
        no_fail: bool,
    },
    /// Custom dictionary management
    Dict {
        #[command(subcommand)]
        action: DictCommands,
    },
}

#[derive(Subcommand, Debug)]
enum DictCommands {
    /// Add words to the project's custom dictionary
    Add {
        project: PathBuf,
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// List the project's custom dictionary
    List { project: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    Builder::from_env(Env::default().default_filter_or(default_level))
        .target(Target::Stderr)
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }
    let colored_output = !cli.no_color;

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "bimtext", &mut io::stdout());
        return Ok(());
    }

    let Some(command) = cli.command else {
        anyhow::bail!("No command given. Use --help for usage information.");
    };

    match command {
        Commands::Preview(search) => run_preview(search, cli.wordlist, colored_output),
        Commands::Apply {
            search,
            rows,
            interactive,
        } => run_apply(search, rows, interactive, cli.wordlist, colored_output),
        Commands::Spell {
            project,
            text,
            scopes,
            format,
            no_fail,
        } => {
            let overrides = Overrides {
                scopes,
                wordlist: cli.wordlist,
                ..Default::default()
            };
            let issues = run_spell(project, text, overrides, &format, colored_output)?;
            if issues > 0 && !no_fail {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Dict { action } => handle_dict(action, colored_output),
    }
}

fn load_config(search: &SearchArgs, wordlist: Option<PathBuf>) -> Result<Config> {
    Config::load(Overrides {
        case_sensitive: search.case_sensitive.then_some(true),
        scopes: search.scopes.clone(),
        wordlist,
    })
}

fn run_preview(search: SearchArgs, wordlist: Option<PathBuf>, colored_output: bool) -> Result<()> {
    let config = load_config(&search, wordlist)?;
    let project = Project::open(&search.project)?;
    let query = SearchQuery::new(&search.find, &search.replace, config.case_sensitive);

    if query.is_blank() {
        anyhow::bail!("Enter text to find.");
    }

    let rows = scan_scopes(&project, &config.scopes, &query);
    output::print_preview(&rows, &query.find, &query.replace, colored_output, &search.format);
    if search.format == OutputFormat::Text {
        output::print_preview_summary(&rows, &config.scopes, colored_output);
    }
    Ok(())
}

fn run_apply(
    search: SearchArgs,
    selected: Vec<usize>,
    interactive: bool,
    wordlist: Option<PathBuf>,
    colored_output: bool,
) -> Result<()> {
    let config = load_config(&search, wordlist)?;
    let mut project = Project::open(&search.project)?;
    let query = SearchQuery::new(&search.find, &search.replace, config.case_sensitive);

    if query.is_blank() {
        anyhow::bail!("Enter text to find.");
    }

    let mut rows = scan_scopes(&project, &config.scopes, &query);
    if rows.is_empty() {
        if search.format == OutputFormat::Text {
            output::print_preview_summary(&rows, &config.scopes, colored_output);
        }
        return Ok(());
    }

    let selected = if interactive {
        output::print_preview(&rows, &query.find, &query.replace, colored_output, &OutputFormat::Text);
        let picked = cli::select_rows(&rows)?;
        if picked.is_empty() {
            println!("Nothing selected.");
            return Ok(());
        }
        picked
    } else {
        selected
    };

    let summary = if selected.is_empty() {
        let pb = if search.format == OutputFormat::Text {
            ProgressBar::new(rows.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .context("Invalid progress template")?
                .progress_chars("=> "),
        );

        let summary = apply_all_with(&mut project, &mut rows, |row, outcome| {
            if let RowOutcome::Failed(reason) = outcome {
                pb.println(format!(
                    "{} {}: {}",
                    "✗".red(),
                    output::target_label(&row.target),
                    reason
                ));
            }
            pb.inc(1);
        })?;
        pb.finish_and_clear();
        summary
    } else {
        debug!("Applying rows {:?}", selected);
        apply_selected(&mut project, &mut rows, &selected)?
    };

    output::print_apply_summary(&summary, colored_output, &search.format);
    Ok(())
}

fn run_spell(
    project: Option<PathBuf>,
    text: Option<String>,
    overrides: Overrides,
    format: &OutputFormat,
    colored_output: bool,
) -> Result<usize> {
    let config = Config::load(overrides)?;
    let project = project.map(|p| Project::open(&p)).transpose()?;
    let custom = project.as_ref().map(|p| p.custom_words()).unwrap_or_default();

    let checker = SpellChecker::new(&config, custom)?;
    info!("{}", checker.source().status_message());
    if *checker.source() == DictionarySource::BuiltIn && *format == OutputFormat::Text {
        eprintln!("{}", checker.source().status_message().dimmed());
    }

    let fields: Vec<(String, String)> = match (&text, &project) {
        (Some(text), _) => vec![("text".to_string(), text.clone())],
        (None, Some(project)) => config
            .scopes
            .iter()
            .flat_map(|&scope| field_texts(project, scope))
            .map(|(target, text)| (output::target_label(&target), text))
            .collect(),
        (None, None) => Vec::new(),
    };

    let mut total_issues = 0;
    let mut fields_with_issues = 0;
    for (label, text) in &fields {
        let issues = checker.find_issues(text);
        if issues.is_empty() && *format == OutputFormat::Json {
            continue;
        }
        if !issues.is_empty() {
            fields_with_issues += 1;
            total_issues += issues.len();
        }
        output::print_issues(label, text, &issues, colored_output, format);
    }

    if *format == OutputFormat::Text {
        output::print_spell_summary(total_issues, fields_with_issues, colored_output);
    }
    Ok(total_issues)
}

fn handle_dict(action: DictCommands, colored_output: bool) -> Result<()> {
    match action {
        DictCommands::Add { project, words } => {
            let mut project = Project::open(&project)?;
            let mut custom = project.custom_words();
            let added = words.iter().filter(|w| custom.add(w)).count();
            project.set_custom_words(&custom);
            project.save().context("Failed to save project")?;

            if colored_output {
                println!(
                    "{} Added {} word(s); custom dictionary has {}",
                    "✓".green().bold(),
                    added.to_string().green(),
                    custom.len()
                );
            } else {
                println!("✓ Added {} word(s); custom dictionary has {}", added, custom.len());
            }
        }
        DictCommands::List { project } => {
            let project = Project::open(&project)?;
            let custom = project.custom_words();
            if custom.is_empty() {
                println!("Custom dictionary is empty.");
            }
            for word in custom.iter() {
                println!("{}", word);
            }
        }
    }
    Ok(())
}
