//! sharplint CLI
//!
//! Command-line interface for linting C# sources

mod output;

use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use sharplint_core::autofix::{FixConfig, FixEngine};
use sharplint_core::config::{ConfigLoader, SharplintConfig};
use sharplint_core::diagnostics::{Diagnostic, Severity};
use sharplint_core::semantic::{FileModel, FileSymbolIndex};
use sharplint_core::{SharplintError, init_tracing};
use std::path::{Path, PathBuf};
use tracing::{debug, error};
use walkdir::WalkDir;

use output::{LintSummary, OutputFormatter};

#[derive(Parser)]
#[command(name = "sharplint")]
#[command(about = "Lint C# sources: diagnostics plus trivia-preserving autofixes")]
#[command(version = sharplint_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file (.sharplintrc.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint files or directories
    Lint {
        /// Files or directories to lint (default: current directory)
        paths: Vec<PathBuf>,

        /// Apply safe fixes
        #[arg(long)]
        fix: bool,

        /// Also apply fixes that change semantics
        #[arg(long, requires = "fix")]
        unsafe_fixes: bool,

        /// Show what would change without writing files
        #[arg(long)]
        dry_run: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List built-in rules
    Rules,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    let exit = match run(cli) {
        Ok(had_errors) => {
            if had_errors {
                1
            } else {
                0
            }
        }
        Err(err) => {
            error!("{err}");
            eprintln!("error: {err}");
            2
        }
    };
    std::process::exit(exit);
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    match cli.command {
        Commands::Lint {
            paths,
            fix,
            unsafe_fixes,
            dry_run,
            format,
        } => {
            let paths = if paths.is_empty() {
                vec![PathBuf::from(".")]
            } else {
                paths
            };
            let config = load_config(cli.config.as_deref(), &paths)?;
            run_lint(&paths, &config, fix, unsafe_fixes, dry_run, format)
        }
        Commands::Rules => {
            run_rules();
            Ok(false)
        }
    }
}

fn load_config(custom: Option<&Path>, paths: &[PathBuf]) -> anyhow::Result<SharplintConfig> {
    let start = paths
        .first()
        .map(|p| {
            if p.is_dir() {
                p.clone()
            } else {
                p.parent()
                    .filter(|parent| !parent.as_os_str().is_empty())
                    .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
            }
        });
    Ok(ConfigLoader::load(custom, start.as_deref())?)
}

fn run_rules() {
    println!("{:<32} {:<8} {:<4} description", "id", "severity", "fix");
    for rule in sharplint_rules::all_rules() {
        println!(
            "{:<32} {:<8} {:<4} {}",
            rule.id,
            rule.default_severity.to_string(),
            if rule.has_fix { "yes" } else { "no" },
            rule.description
        );
    }
}

fn run_lint(
    paths: &[PathBuf],
    config: &SharplintConfig,
    fix: bool,
    unsafe_fixes: bool,
    dry_run: bool,
    format: OutputFormat,
) -> anyhow::Result<bool> {
    let files = discover_files(paths);
    debug!(count = files.len(), "discovered C# files");

    // Pass 1: build the cross-file symbol index. Syntax trees are not Send,
    // so each worker parses its file and contributes a plain-data partial
    // index, merged here.
    let partials: Vec<FileSymbolIndex> = files
        .par_iter()
        .filter_map(|path| {
            let source = std::fs::read_to_string(path).ok()?;
            let (model, _) = FileModel::parse(path.clone(), source).ok()?;
            let mut partial = FileSymbolIndex::new();
            partial.add_file(&model.root);
            Some(partial)
        })
        .collect();
    let mut index = FileSymbolIndex::new();
    for partial in partials {
        index.merge(partial);
    }

    // Pass 2: lint each file against the merged index.
    let mut diagnostics: Vec<Diagnostic> = files
        .par_iter()
        .flat_map_iter(|path| lint_file(path, &index, config))
        .collect();
    diagnostics.sort_by(|a, b| {
        a.location
            .file
            .cmp(&b.location.file)
            .then(a.location.offset.cmp(&b.location.offset))
    });

    let mut summary = LintSummary::new();
    summary.files_checked = files.len();
    for diagnostic in &diagnostics {
        summary.count(diagnostic);
    }

    if fix {
        let fix_config = FixConfig {
            apply_unsafe: unsafe_fixes,
            dry_run,
            ..Default::default()
        };
        let engine = FixEngine::new();
        for result in engine.apply_fixes(&diagnostics, &fix_config)? {
            summary.fixes_applied += result.applied_count;
            for message in &result.errors {
                error!(file = %result.file.display(), "{message}");
            }
        }
    }

    OutputFormatter::new(format).print_results(&diagnostics, &summary);
    Ok(summary.has_errors())
}

fn lint_file(path: &Path, index: &FileSymbolIndex, config: &SharplintConfig) -> Vec<Diagnostic> {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            let err = SharplintError::io_error(path.to_path_buf(), err);
            error!("{err}");
            return Vec::new();
        }
    };

    let (model, parse_errors) = match FileModel::parse(path.to_path_buf(), source) {
        Ok(parsed) => parsed,
        Err(err) => {
            error!("{err}");
            return Vec::new();
        }
    };

    let mut diagnostics: Vec<Diagnostic> = parse_errors
        .into_iter()
        .map(|parse_error| {
            Diagnostic::new(
                "parse-error",
                Severity::Error,
                parse_error.message,
                model.insertion_at(parse_error.span.start),
            )
        })
        .collect();
    diagnostics.extend(sharplint_rules::check_file(&model, index, config));
    diagnostics
}

fn discover_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
            if entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == "cs")
            {
                files.push(entry.into_path());
            }
        }
    }
    files.sort();
    files.dedup();
    files
}
