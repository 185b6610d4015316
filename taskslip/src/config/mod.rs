//! Configuration system for `taskslip`.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/taskslip/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::PathBuf;

use crate::printer::usb::{
    DEFAULT_DEV_DIR, DEFAULT_PRODUCT_ID, DEFAULT_SYSFS_DIR, DEFAULT_VENDOR_ID, UsbLinePrinter,
};

/// Default task snapshot file name.
pub const DEFAULT_TASKS_FILE: &str = "tarefas.json";

/// Default last-print snapshot file name.
pub const DEFAULT_LAST_PRINT_FILE: &str = "ultima_impressao.json";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    storage: StorageFileConfig,
    printer: PrinterFileConfig,
}

/// `[storage]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct StorageFileConfig {
    data_dir: Option<PathBuf>,
    tasks_file: Option<String>,
    last_print_file: Option<String>,
}

/// `[printer]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct PrinterFileConfig {
    vendor_id: Option<u16>,
    product_id: Option<u16>,
    device: Option<PathBuf>,
    dev_dir: Option<PathBuf>,
    sysfs_dir: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Resolved configuration (concrete types, all fields populated)
// ---------------------------------------------------------------------------

/// Printer selection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterConfig {
    /// USB vendor id used to locate the printer.
    pub vendor_id: u16,
    /// USB product id used to locate the printer.
    pub product_id: u16,
    /// Explicit device node; skips the USB id lookup when set.
    pub device: Option<PathBuf>,
    /// Directory holding `lpN` device nodes.
    pub dev_dir: PathBuf,
    /// `usbmisc` class directory scanned for the USB id.
    pub sysfs_dir: PathBuf,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            vendor_id: DEFAULT_VENDOR_ID,
            product_id: DEFAULT_PRODUCT_ID,
            device: None,
            dev_dir: PathBuf::from(DEFAULT_DEV_DIR),
            sysfs_dir: PathBuf::from(DEFAULT_SYSFS_DIR),
        }
    }
}

impl PrinterConfig {
    /// Builds the USB printer device these settings describe.
    #[must_use]
    pub fn to_device(&self) -> UsbLinePrinter {
        UsbLinePrinter::new(self.vendor_id, self.product_id)
            .with_device(self.device.clone())
            .with_dirs(self.dev_dir.clone(), self.sysfs_dir.clone())
    }
}

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Storage --
    /// Directory holding both snapshot files.
    pub data_dir: PathBuf,
    /// Task snapshot file name, relative to `data_dir`.
    pub tasks_file: String,
    /// Last-print snapshot file name, relative to `data_dir`.
    pub last_print_file: String,

    // -- Printer --
    /// Printer selection.
    pub printer: PrinterConfig,
    /// Send receipts to an in-memory printer instead of the device.
    pub dry_run: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            tasks_file: DEFAULT_TASKS_FILE.to_string(),
            last_print_file: DEFAULT_LAST_PRINT_FILE.to_string(),
            printer: PrinterConfig::default(),
            dry_run: false,
        }
    }
}

impl AppConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// If `--config` is given and the file does not exist, returns an error.
    /// If no `--config` is given, the default path
    /// (`~/.config/taskslip/config.toml`) is tried and silently ignored if
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file cannot be read or parsed.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Resolve an `AppConfig` from CLI args alone, ignoring any config file.
    ///
    /// Used when the config file cannot be loaded so that `--data-dir` and
    /// `--device` still point at the right files.
    #[must_use]
    pub fn from_cli(cli: &CliArgs) -> Self {
        Self::resolve(cli, &ConfigFile::default())
    }

    /// Resolve an `AppConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default.
    #[must_use]
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            data_dir: cli
                .data_dir
                .clone()
                .or_else(|| file.storage.data_dir.clone())
                .unwrap_or(defaults.data_dir),
            tasks_file: file
                .storage
                .tasks_file
                .clone()
                .unwrap_or(defaults.tasks_file),
            last_print_file: file
                .storage
                .last_print_file
                .clone()
                .unwrap_or(defaults.last_print_file),
            printer: PrinterConfig {
                vendor_id: file
                    .printer
                    .vendor_id
                    .unwrap_or(defaults.printer.vendor_id),
                product_id: file
                    .printer
                    .product_id
                    .unwrap_or(defaults.printer.product_id),
                device: cli
                    .device
                    .clone()
                    .or_else(|| file.printer.device.clone()),
                dev_dir: file
                    .printer
                    .dev_dir
                    .clone()
                    .unwrap_or(defaults.printer.dev_dir),
                sysfs_dir: file
                    .printer
                    .sysfs_dir
                    .clone()
                    .unwrap_or(defaults.printer.sysfs_dir),
            },
            dry_run: cli.dry_run,
        }
    }

    /// Full path of the task snapshot.
    #[must_use]
    pub fn tasks_path(&self) -> PathBuf {
        self.data_dir.join(&self.tasks_file)
    }

    /// Full path of the last-print snapshot.
    #[must_use]
    pub fn last_print_path(&self) -> PathBuf {
        self.data_dir.join(&self.last_print_file)
    }
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Task list manager with receipt printing")]
pub struct CliArgs {
    /// Directory holding the task and last-print files.
    #[arg(long, env = "TASKSLIP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Printer device node (skips USB id lookup).
    #[arg(long, env = "TASKSLIP_PRINTER")]
    pub device: Option<PathBuf>,

    /// Path to config file (default: `~/.config/taskslip/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print to an in-memory printer and log the bytes instead.
    #[arg(long)]
    pub dry_run: bool,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "TASKSLIP_LOG")]
    pub log_level: String,

    /// Path to log file (default: `$TMPDIR/taskslip.log`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and missing file
/// is treated as empty config.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            // No config dir available, use defaults.
            return Ok(ConfigFile::default());
        };
        config_dir.join("taskslip").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
