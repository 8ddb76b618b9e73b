//! Command line interface.
//!
//! Every subcommand is one page of the calculator. [`run`] executes a parsed
//! [`Cli`] and returns the text to print, so everything except process setup
//! can be tested without spawning the binary.
//!
//! Results print to the terminal unless `--export` or `--output` is given.
//! With `--output` the format comes from `--export`, or else from the file
//! extension; a directory or a name without extension gets a text document.
//! An extension that names no format is an error.

use crate::config::{Settings, Theme};
use crate::diagram::{
    Diagram, DiagramRenderer, DotRenderer, PngRenderer, SubnetEntry, SubnetPlan, TreeRenderer,
};
use crate::error::{Error, Result};
use crate::output::{
    export_report, file_stem, output_path, ExportFormat, Presenter, Report, TerminalPresenter,
};
use crate::processing;
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "ipcalc")]
#[command(author, version, about = "IPv4 network calculator", long_about = None)]
pub struct Cli {
    /// Settings file (JSON). Defaults to ipcalc.json when present.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Colour theme, overrides the settings file.
    #[arg(short, long)]
    pub theme: Option<Theme>,

    #[arg(short, long, default_value = "warn")]
    pub log_level: LevelFilter,

    /// Export the result instead of printing it: csv, json, text or pdf.
    #[arg(short, long)]
    pub export: Option<ExportFormat>,

    /// Export file or directory. Defaults to the configured export directory.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a dotted decimal address to binary
    ToBinary { address: String },
    /// Convert a dotted binary address to decimal
    ToDecimal { binary: String },
    /// Detect the legacy class of an address
    Class { address: String },
    /// Network id, broadcast and host range, e.g. `network 192.168.1.0 24` or `network 192.168.1.0/24`
    Network {
        address: String,
        cidr: Option<String>,
    },
    /// Convert a CIDR prefix to a subnet mask
    CidrToMask { cidr: String },
    /// Convert a subnet mask to a CIDR prefix
    MaskToCidr {
        mask: String,
        /// Reject masks whose one bits are not contiguous
        #[arg(long)]
        strict: bool,
    },
    /// Show the common subnet reference table
    Table,
    /// Draw a network split into named subnets
    Diagram {
        /// Network address shown at the root
        network: String,
        /// A subnet as NAME=HOSTS, repeat for more subnets
        #[arg(short, long = "subnet", value_name = "NAME=HOSTS", required = true)]
        subnets: Vec<SubnetEntry>,
        /// Drawing format. Defaults to the output file extension, else a tree
        #[arg(short, long, value_enum)]
        format: Option<DiagramFormat>,
    },
    /// Show the effective settings
    Config,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramFormat {
    /// Terminal tree
    Tree,
    /// Graphviz DOT source
    Dot,
    /// PNG image, written to a file
    Png,
}

impl DiagramFormat {
    /// Extension of a file in this format. A tree file is plain text.
    pub fn extension(self) -> &'static str {
        match self {
            DiagramFormat::Tree => "txt",
            DiagramFormat::Dot => "dot",
            DiagramFormat::Png => "png",
        }
    }

    /// The drawing format a file extension names. `txt` is left to the
    /// text export of the subnet list.
    pub fn from_extension(ext: &str) -> Option<DiagramFormat> {
        match ext {
            "dot" | "gv" => Some(DiagramFormat::Dot),
            "png" => Some(DiagramFormat::Png),
            _ => None,
        }
    }

    fn accepts_extension(self, ext: &str) -> bool {
        match self {
            DiagramFormat::Tree => ext == "txt",
            DiagramFormat::Dot => matches!(ext, "dot" | "gv"),
            DiagramFormat::Png => ext == "png",
        }
    }
}

impl fmt::Display for DiagramFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DiagramFormat::Tree => f.write_str("tree"),
            DiagramFormat::Dot => f.write_str("dot"),
            DiagramFormat::Png => f.write_str("png"),
        }
    }
}

/// Split `a.b.c.d/nn` into address and prefix text.
pub fn split_address_cidr(text: &str) -> (&str, Option<&str>) {
    match text.split_once('/') {
        Some((addr, cidr)) => (addr, Some(cidr)),
        None => (text, None),
    }
}

/// Apply command line overrides to loaded settings.
pub fn apply_overrides(cli: &Cli, mut settings: Settings) -> Settings {
    if let Some(theme) = cli.theme {
        settings.theme = theme;
    }
    if let Commands::MaskToCidr { strict: true, .. } = cli.command {
        settings.strict_masks = true;
    }
    settings
}

/// Lower-cased extension of an output file. `None` for a directory or a name
/// without extension.
fn file_extension(path: &Path) -> Option<String> {
    if path.is_dir() {
        return None;
    }
    path.extension()?.to_str().map(str::to_lowercase)
}

/// Export format for a report, or `None` to print it.
///
/// # Returns
/// * `Ok(None)` - Neither `--export` nor `--output` was given
/// * `Ok(Some(format))` - `--export`, else the output extension, else text
/// * `Err(Error::InvalidFormat)` - The output extension names no format, or a
///   different one than `--export`
fn report_format(cli: &Cli) -> Result<Option<ExportFormat>> {
    let Some(path) = cli.output.as_deref() else {
        return Ok(cli.export);
    };
    let ext = file_extension(path);
    match (cli.export, ext.as_deref().map(str::parse::<ExportFormat>)) {
        (Some(flag), Some(Ok(named))) if flag != named => Err(Error::InvalidFormat(format!(
            "--export {flag} does not match the extension of {}",
            path.display()
        ))),
        (Some(flag), _) => Ok(Some(flag)),
        (None, Some(Ok(named))) => Ok(Some(named)),
        (None, Some(Err(_))) => Err(Error::InvalidFormat(format!(
            "cannot infer export format from {}, use --export",
            path.display()
        ))),
        (None, None) => Ok(Some(ExportFormat::Text)),
    }
}

/// Build the report of one command.
fn execute(command: &Commands, settings: &Settings) -> Result<Report> {
    log::debug!("execute({command:?})");
    match command {
        Commands::ToBinary { address } => processing::binary_page(address),
        Commands::ToDecimal { binary } => processing::decimal_page(binary),
        Commands::Class { address } => processing::class_page(address),
        Commands::Network { address, cidr } => {
            let (address, cidr) = match cidr {
                Some(cidr) => (address.as_str(), cidr.as_str()),
                None => {
                    let (address, cidr) = split_address_cidr(address);
                    (address, cidr.unwrap_or(""))
                }
            };
            processing::network_page(address, cidr)
        }
        Commands::CidrToMask { cidr } => processing::mask_page(cidr),
        Commands::MaskToCidr { mask, .. } => processing::prefix_page(mask, settings.strict_masks),
        Commands::Table => processing::reference_page(),
        Commands::Diagram {
            network, subnets, ..
        } => SubnetPlan::new(network, subnets.clone())
            .generate()
            .to_report(),
        Commands::Config => Ok(Report::single(
            "Settings",
            vec![
                ("Theme", settings.theme.to_string()),
                ("Export Directory", settings.export_dir.display().to_string()),
                ("Timezone", settings.timezone.clone()),
                ("Strict Masks", settings.strict_masks.to_string()),
                ("Log Config", settings.log_config.display().to_string()),
            ],
        )),
    }
}

fn export(cli: &Cli, settings: &Settings, report: &Report, format: ExportFormat) -> Result<String> {
    let target = cli.output.as_deref().unwrap_or(&settings.export_dir);
    let generated_at = chrono::Utc::now().with_timezone(&settings.tz()?);
    let path = export_report(report, format, target, generated_at)?;
    Ok(format!("Exported to {}\n", path.display()))
}

/// Draw a diagram, or export its subnet list when a report format is asked for.
fn run_diagram(
    cli: &Cli,
    settings: &Settings,
    diagram: &Diagram,
    format: Option<DiagramFormat>,
) -> Result<String> {
    let ext = cli.output.as_deref().and_then(file_extension);
    let format = match format {
        Some(format) => {
            if let Some(export) = cli.export {
                return Err(Error::InvalidFormat(format!(
                    "--format {format} cannot be combined with --export {export}"
                )));
            }
            if let (Some(path), Some(ext)) = (cli.output.as_deref(), ext.as_deref()) {
                if !format.accepts_extension(ext) {
                    return Err(Error::InvalidFormat(format!(
                        "--format {format} cannot be written to {}",
                        path.display()
                    )));
                }
            }
            format
        }
        None => match ext.as_deref().and_then(DiagramFormat::from_extension) {
            Some(format) if cli.export.is_none() => format,
            _ if cli.export.is_some() || ext.is_some() => {
                let format = report_format(cli)?.unwrap_or(ExportFormat::Text);
                return export(cli, settings, &diagram.to_report()?, format);
            }
            _ => DiagramFormat::Tree,
        },
    };

    match (format, cli.output.as_deref()) {
        (DiagramFormat::Tree, None) => Ok(TreeRenderer::new(settings.theme).render(diagram)),
        (DiagramFormat::Dot, None) => Ok(DotRenderer.render(diagram)),
        (format, output) => {
            let target = output.unwrap_or(&settings.export_dir);
            let path = output_path(target, &file_stem(&diagram.title()), format.extension());
            let content = match format {
                DiagramFormat::Tree => TreeRenderer::plain().render(diagram).into_bytes(),
                DiagramFormat::Dot => DotRenderer.render(diagram).into_bytes(),
                DiagramFormat::Png => PngRenderer.render(diagram)?,
            };
            log::info!("Writing {format} diagram to {}", path.display());
            std::fs::write(&path, content)?;
            Ok(format!("Exported to {}\n", path.display()))
        }
    }
}

/// Run a parsed command line and return what should be printed.
pub fn run(cli: &Cli, settings: Settings) -> Result<String> {
    let settings = apply_overrides(cli, settings);

    if let Commands::Diagram {
        network,
        subnets,
        format,
    } = &cli.command
    {
        let diagram = SubnetPlan::new(network, subnets.clone()).generate();
        return run_diagram(cli, &settings, &diagram, *format);
    }

    let report = execute(&cli.command, &settings)?;
    match report_format(cli)? {
        Some(format) => export(cli, &settings, &report, format),
        None => TerminalPresenter::new(settings.theme).present(&report),
    }
}
