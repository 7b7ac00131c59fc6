//! # Panic Handler
//!
//! Friendly panic messages and crash reports. The hook always hands the
//! terminal back first (raw mode off, main screen, no mouse capture) so a
//! panic inside the picker never leaves the shell unusable.
//!
//! Release builds print a coloured summary and write a TOML crash report
//! with a backtrace. Debug builds restore the terminal and defer to the
//! default hook.

use std::env;
use std::fs;
use std::io::Write;
use std::panic::{self, PanicHookInfo};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use backtrace::Backtrace;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::consts::APP_NAME;
use crate::picker::terminal;

/// Configuration for the panic handler behavior
#[derive(Debug, Clone)]
pub struct PanicConfig {
  /// Application name shown in messages and report file names
  pub name: String,
  pub version: String,
  pub authors: String,
  /// Crash report directory (defaults to the system temp directory)
  pub report_directory: Option<PathBuf>,
  /// Maximum length for panic messages
  pub max_message_length: usize,
}

impl Default for PanicConfig {
  fn default() -> Self {
    Self {
      name: APP_NAME.to_string(),
      version: env!("CARGO_PKG_VERSION").to_string(),
      authors: env!("CARGO_PKG_AUTHORS").to_string(),
      report_directory: None,
      max_message_length: 500,
    }
  }
}

/// Install the panic hook
pub fn install(config: PanicConfig) {
  let default_hook = panic::take_hook();

  panic::set_hook(Box::new(move |info: &PanicHookInfo| {
    terminal::restore_terminal();

    if cfg!(debug_assertions) {
      default_hook(info);
      return;
    }

    let report = CrashReport::new(info, &config);
    let report_path = report.save(&config).ok();
    display_panic_message(&report, report_path.as_deref(), &config);
  }));
}

/// Everything written to a crash report file
#[derive(Debug, Serialize)]
pub struct CrashReport {
  application: ApplicationSection,
  system: SystemSection,
  panic: PanicSection,
  backtrace: BacktraceSection,
}

#[derive(Debug, Serialize)]
struct ApplicationSection {
  name: String,
  version: String,
  authors: String,
}

#[derive(Debug, Serialize)]
struct SystemSection {
  operating_system: String,
  architecture: String,
  timestamp: String,
}

#[derive(Debug, Default, Serialize)]
struct PanicSection {
  #[serde(skip_serializing_if = "Option::is_none")]
  file: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  line: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  column: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  message: Option<String>,
}

#[derive(Debug, Serialize)]
struct BacktraceSection {
  trace: String,
}

impl CrashReport {
  fn new(info: &PanicHookInfo, config: &PanicConfig) -> Self {
    let location = info.location();
    let panic = PanicSection {
      file: location.map(|l| l.file().to_string()),
      line: location.map(|l| l.line()),
      column: location.map(|l| l.column()),
      message: extract_panic_message(info).map(|m| truncate_message(&m, config.max_message_length)),
    };

    Self::from_parts(panic, format!("{:?}", Backtrace::new()), config)
  }

  fn from_parts(panic: PanicSection, trace: String, config: &PanicConfig) -> Self {
    Self {
      application: ApplicationSection {
        name: config.name.clone(),
        version: config.version.clone(),
        authors: config.authors.clone(),
      },
      system: SystemSection {
        operating_system: env::consts::OS.to_string(),
        architecture: env::consts::ARCH.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
      },
      panic,
      backtrace: BacktraceSection {
        trace: trace.trim_end().to_string(),
      },
    }
  }

  /// Render the report as TOML
  pub fn to_toml(&self) -> Result<String> {
    let body = toml::to_string_pretty(self).context("Failed to serialize crash report")?;
    Ok(format!(
      "# {} Crash Report\n# Generated automatically - safe to share for debugging\n\n{body}",
      self.application.name
    ))
  }

  /// Write the report into the configured directory and return its path
  pub fn save(&self, config: &PanicConfig) -> Result<PathBuf> {
    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!(
      "crash_report_{}_{timestamp}.toml",
      config.name.replace(|c: char| !c.is_alphanumeric(), "_").to_lowercase()
    );

    let report_dir = config.report_directory.clone().unwrap_or_else(env::temp_dir);
    fs::create_dir_all(&report_dir)
      .with_context(|| format!("Failed to create report directory {}", report_dir.display()))?;

    let report_path = report_dir.join(filename);
    let mut file =
      fs::File::create(&report_path).with_context(|| format!("Failed to create {}", report_path.display()))?;
    file
      .write_all(self.to_toml()?.as_bytes())
      .with_context(|| format!("Failed to write {}", report_path.display()))?;

    Ok(report_path)
  }
}

fn extract_panic_message(info: &PanicHookInfo) -> Option<String> {
  info
    .payload()
    .downcast_ref::<&str>()
    .map(|s| s.to_string())
    .or_else(|| info.payload().downcast_ref::<String>().cloned())
}

fn truncate_message(message: &str, max_length: usize) -> String {
  match message.char_indices().nth(max_length) {
    Some((cut, _)) => format!("{}... (truncated)", &message[..cut]),
    None => message.to_string(),
  }
}

fn display_panic_message(report: &CrashReport, report_path: Option<&Path>, config: &PanicConfig) {
  let use_colors = is_terminal::is_terminal(std::io::stderr());

  if use_colors {
    eprintln!("{} {}", config.name.bright_blue().bold(), "just got portal-sick!".red());
  } else {
    eprintln!("{} just got portal-sick!", config.name);
  }

  if let (Some(file), Some(line)) = (&report.panic.file, report.panic.line) {
    if use_colors {
      eprintln!(
        "\n📍 {} {}:{}",
        "Location:".bright_white(),
        file.yellow(),
        line.to_string().yellow().bold()
      );
    } else {
      eprintln!("\n📍 Location: {file}:{line}");
    }
  }

  if let Some(message) = &report.panic.message {
    if use_colors {
      eprintln!("💬 {} {}", "Message:".bright_white(), message.white().italic());
    } else {
      eprintln!("💬 Message: {message}");
    }
  }

  if let Some(path) = report_path {
    if use_colors {
      eprintln!(
        "\n📋 {} {}",
        "Crash report saved:".bright_blue(),
        path.display().to_string().yellow().underline()
      );
    } else {
      eprintln!("\n📋 Crash report saved: {}", path.display());
    }
  }
}
