//! Command-line interface for the `hookforge` binary.
//!
//! The CLI is a thin shell over the library: it reads a source file, builds
//! an `AnalysisConfig` from flags and an optional JSON config file, runs one
//! pipeline stage and renders the result as text or JSON.
//!
//! ```bash
//! hookforge paths bundle.js --kind all --depth 6
//! hookforge regex bundle.js --target getName --kind method --flexible
//! hookforge smart bundle.js "profile.getName()" --keep-tail 2
//! hookforge test --pattern 'a\.b(?:\(.*?\))?' "a.b(1) a.c"
//! ```

use crate::analysis::Analysis;
use crate::ast::validate_syntax;
use crate::config::{
    AnalysisConfig, CallSuffix, KindFilter, SmartOptions, SynthesisOptions, TieBreak,
    DEFAULT_KEEP_TAIL,
};
use crate::extractors::ExtractorManager;
use crate::matcher::{self, MatchReport};
use crate::synth::{self, Pattern, SmartResult};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fmt::Write;
use std::path::PathBuf;

/// Hook path extraction and regex synthesis for JavaScript sources.
#[derive(Parser, Debug)]
#[command(name = "hookforge", version, about = "Hook path extraction and regex synthesis")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub command: Command,
}

/// Global arguments shared by all subcommands.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Log level for tracing output (overridden by RUST_LOG).
    #[arg(long, global = true, value_enum, default_value = "warn")]
    pub log_level: LogLevel,

    /// Emit JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,
}

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the hook paths found in a source file.
    Paths {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Synthesize a regex from the filtered hook paths.
    Regex {
        #[command(flatten)]
        filter: FilterArgs,
        /// Keep this many trailing segments literal in flexible mode.
        #[arg(long)]
        tail_length: Option<usize>,
        /// Do not append the optional call group to callable paths.
        #[arg(long)]
        no_call_suffix: bool,
        /// Describe how the pattern was built.
        #[arg(long)]
        explain: bool,
    },
    /// Build tail-anchored patterns for a target suffix such as `profile.getName()`.
    Smart {
        /// JavaScript source file.
        file: PathBuf,
        /// Hook target; a trailing `()` marks a call.
        target: String,
        /// Trailing segments kept literal.
        #[arg(long, default_value_t = DEFAULT_KEEP_TAIL)]
        keep_tail: usize,
        /// On equal chain lengths prefer the last chain found.
        #[arg(long)]
        last_found: bool,
    },
    /// Run a pattern against text and list every match.
    Test {
        /// Regex source to test.
        #[arg(long)]
        pattern: String,
        /// Text to test; read from --input when omitted.
        text: Option<String>,
        /// File whose contents are tested.
        #[arg(long, conflicts_with = "text")]
        input: Option<PathBuf>,
    },
    /// Generate test inputs for the synthesized pattern and check them.
    Cases {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Check that a source file parses.
    Validate {
        /// JavaScript source file.
        file: PathBuf,
    },
}

/// Source file plus the catalog filter options.
#[derive(Args, Debug)]
pub struct FilterArgs {
    /// JavaScript source file.
    pub file: PathBuf,

    /// Case-insensitive substring a path's name or text must contain.
    #[arg(long)]
    pub target: Option<String>,

    /// Path kinds to keep.
    #[arg(long, value_enum)]
    pub kind: Option<KindFilter>,

    /// Traversal depth bound (program = level 0).
    #[arg(long)]
    pub depth: Option<usize>,

    /// Use flexible synthesis.
    #[arg(long)]
    pub flexible: bool,

    /// JSON options file (`targetSubstring`, `kind`, `depth`, `flexible`); flags win.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl FilterArgs {
    pub fn to_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                AnalysisConfig::from_json(&json)
                    .with_context(|| format!("invalid config {}", path.display()))?
            }
            None => AnalysisConfig::default(),
        };
        if let Some(target) = &self.target {
            config.target_substring = target.trim().to_string();
        }
        if let Some(kind) = self.kind {
            config.kind = kind;
        }
        if let Some(depth) = self.depth {
            config.depth = depth;
        }
        if self.flexible {
            config.flexible = true;
        }
        Ok(config)
    }
}

/// Run the parsed command and return what should be printed on stdout.
pub fn execute(cli: &Cli) -> Result<String> {
    let json = cli.global.json;
    let manager = ExtractorManager::new();

    match &cli.command {
        Command::Paths { filter } => {
            let analysis = analyze(&manager, filter)?;
            if json {
                return Ok(analysis.to_json()?);
            }
            Ok(render_paths(&analysis))
        }
        Command::Regex {
            filter,
            tail_length,
            no_call_suffix,
            explain,
        } => {
            let analysis = analyze(&manager, filter)?;
            let options = SynthesisOptions {
                call_suffix: if *no_call_suffix {
                    CallSuffix::Omit
                } else {
                    CallSuffix::Optional
                },
                tail_length: *tail_length,
            };
            let pattern = analysis.pattern(&options)?;
            if json {
                return Ok(serde_json::to_string_pretty(&pattern)?);
            }
            Ok(render_pattern(&pattern, *explain))
        }
        Command::Smart {
            file,
            target,
            keep_tail,
            last_found,
        } => {
            let source = manager.read_source(file)?;
            let options = SmartOptions {
                keep_tail: *keep_tail,
                tie_break: if *last_found {
                    TieBreak::LastFound
                } else {
                    TieBreak::FirstFound
                },
                ..SmartOptions::default()
            };
            let result = manager.smart(&source, target, &options)?;
            if json {
                return Ok(serde_json::to_string_pretty(&result)?);
            }
            Ok(render_smart(&result))
        }
        Command::Test {
            pattern,
            text,
            input,
        } => {
            let text = match (text, input) {
                (Some(text), _) => text.clone(),
                (None, Some(path)) => std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                (None, None) => anyhow::bail!("provide TEXT or --input"),
            };
            let report = matcher::test(pattern, &text)?;
            if json {
                return Ok(serde_json::to_string_pretty(&report)?);
            }
            Ok(render_report(&report))
        }
        Command::Cases { filter } => {
            let analysis = analyze(&manager, filter)?;
            let pattern = analysis.pattern(&SynthesisOptions::default())?;
            let cases = synth::generate_test_cases(pattern.paths());
            let outcomes = synth::check_cases(&pattern, cases)?;
            if json {
                return Ok(serde_json::to_string_pretty(&outcomes)?);
            }
            let flexible = pattern.mode() == synth::PatternMode::Flexible;
            let mut out = format!("Pattern: {}\n", pattern);
            for outcome in &outcomes {
                let status = match (outcome.matched, outcome.passed(flexible)) {
                    (true, _) => "match",
                    (false, true) => "skip",
                    (false, false) => "FAIL",
                };
                let _ = writeln!(out, "  [{}] {}: {}", status, outcome.case.name, outcome.case.input);
            }
            Ok(out)
        }
        Command::Validate { file } => {
            let source = manager.read_source(file)?;
            validate_syntax(&source)?;
            Ok(format!("{}: ok\n", file.display()))
        }
    }
}

fn analyze(manager: &ExtractorManager, filter: &FilterArgs) -> Result<Analysis> {
    let config = filter.to_config()?;
    manager
        .analyze_file(&filter.file, &config)
        .with_context(|| format!("failed to analyze {}", filter.file.display()))
}

fn render_paths(analysis: &Analysis) -> String {
    let mut out = format!(
        "{} hook paths ({} extracted)\n",
        analysis.catalog.len(),
        analysis.extracted
    );
    for path in &analysis.catalog {
        let _ = writeln!(out, "  {}", path);
    }
    out
}

fn render_pattern(pattern: &Pattern, explain: bool) -> String {
    let mut out = format!("{}\n", pattern);
    if explain {
        out.push('\n');
        out.push_str(&synth::explain(pattern));
    }
    out
}

fn render_smart(result: &SmartResult) -> String {
    let mut out = format!("Target: {}\n", result.target);
    let _ = writeln!(out, "Loose:  {}", result.loose);
    match (&result.smart, &result.chain) {
        (Some(smart), Some(chain)) => {
            let _ = writeln!(out, "Smart:  {}", smart);
            let _ = writeln!(out, "Chain:  {}", chain);
        }
        _ => out.push_str("Smart:  no chain in source ends with the target\n"),
    }
    out
}

fn render_report(report: &MatchReport) -> String {
    if report.is_empty() {
        return format!("Pattern: {}\nNo matches\n", report.pattern);
    }
    let mut out = format!(
        "Pattern: {}\n{} match(es)\n",
        report.pattern,
        report.count()
    );
    for m in &report.matches {
        let _ = writeln!(
            out,
            "  #{} at {} (length {}): {}",
            m.index, m.start, m.length, m.text
        );
        for (i, group) in m.groups.iter().enumerate() {
            let _ = writeln!(
                out,
                "      group {}: {}",
                i + 1,
                group.as_deref().unwrap_or("<none>")
            );
        }
    }
    out
}
