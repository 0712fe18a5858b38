//! Shared CLI definitions for csvcards.
//!
//! Used by the main application and by the build script (manpage) and
//! gen_docs binary (command-line-options markdown).

use clap::{CommandFactory, Parser, ValueEnum};
use std::path::Path;

/// Compression format for data files
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum CompressionFormat {
    /// Gzip compression (.gz)
    Gzip,
    /// Zstandard compression (.zst)
    Zstd,
    /// Bzip2 compression (.bz2)
    Bzip2,
    /// XZ compression (.xz)
    Xz,
}

impl CompressionFormat {
    /// Detect compression format from file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            match ext.to_lowercase().as_str() {
                "gz" => Some(Self::Gzip),
                "zst" | "zstd" => Some(Self::Zstd),
                "bz2" | "bz" => Some(Self::Bzip2),
                "xz" => Some(Self::Xz),
                _ => None,
            }
        } else {
            None
        }
    }

    /// Parse the config-file spelling ("gzip", "zstd", "bzip2", "xz")
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "gzip" => Some(Self::Gzip),
            "zstd" => Some(Self::Zstd),
            "bzip2" => Some(Self::Bzip2),
            "xz" => Some(Self::Xz),
            _ => None,
        }
    }

    /// Get file extension for this compression format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Gzip => "gz",
            Self::Zstd => "zst",
            Self::Bzip2 => "bz2",
            Self::Xz => "xz",
        }
    }
}

/// How card colors are chosen for the values of the color-by column.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum ColorPolicy {
    /// Round-robin over a fixed palette, memoized per value until the next file is opened
    #[default]
    Palette,
    /// Hue derived from a hash of the value; stateless, collisions possible
    Hash,
}

impl ColorPolicy {
    /// Parse the config-file spelling ("palette", "hash")
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "palette" => Some(Self::Palette),
            "hash" => Some(Self::Hash),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Palette => "palette",
            Self::Hash => "hash",
        }
    }
}

/// Command-line arguments for csvcards
#[derive(Clone, Parser, Debug, Default)]
#[command(
    name = "csvcards",
    version,
    about = "Inspect CSV files as cards in the terminal",
    long_about = include_str!("../long_about.txt")
)]
pub struct Args {
    /// Path to the CSV file to open. When omitted, start empty and open a file with `o`.
    #[arg(value_name = "PATH")]
    pub path: Option<std::path::PathBuf>,

    /// Skip this many rows after the header when reading a file
    #[arg(long = "skip-rows")]
    pub skip_rows: Option<usize>,

    /// Specify that the file has no header
    #[arg(long = "no-header")]
    pub no_header: Option<bool>,

    /// Field delimiter: a single ASCII character such as `;`, `tab`, or a byte value
    #[arg(long = "delimiter", value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,

    /// Specify the compression format explicitly (gzip, zstd, bzip2, xz)
    /// If not specified, compression is auto-detected from file extension.
    #[arg(long = "compression", value_enum)]
    pub compression: Option<CompressionFormat>,

    /// How cards are colored when a color-by column is selected (default: palette)
    #[arg(long = "color-policy", value_enum)]
    pub color_policy: Option<ColorPolicy>,

    /// Enable debug mode to show operational information
    #[arg(long = "debug", action)]
    pub debug: bool,

    /// Write log records to this file (level from RUST_LOG, default info)
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<std::path::PathBuf>,

    /// Generate default configuration file at ~/.config/csvcards/config.toml
    #[arg(long = "generate-config", action)]
    pub generate_config: bool,

    /// Force overwrite existing config file when using --generate-config
    #[arg(long = "force", requires = "generate_config", action)]
    pub force: bool,
}

/// Parse a delimiter given as one ASCII character, `tab`/`\t`, or a decimal byte.
pub fn parse_delimiter(s: &str) -> Result<u8, String> {
    if matches!(s, "tab" | "\\t" | "\t") {
        return Ok(b'\t');
    }
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return if c.is_ascii() {
            Ok(c as u8)
        } else {
            Err(format!("delimiter must be an ASCII character, got '{c}'"))
        };
    }
    s.parse::<u8>()
        .map_err(|_| format!("invalid delimiter '{s}': use one character, `tab` or a byte value"))
}

/// Escape `|` and newlines for use in markdown table cells.
fn escape_table_cell(s: &str) -> String {
    s.replace('|', "\\|").replace(['\n', '\r'], " ")
}

fn value_placeholder(arg: &clap::Arg) -> String {
    arg.get_value_names()
        .map(|names| {
            names
                .iter()
                .map(|n: &clap::builder::Str| format!("<{}>", n.as_ref() as &str))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}

/// Render command-line options as markdown.
pub fn render_options_markdown() -> String {
    let mut cmd = Args::command();
    cmd.build();

    let mut out = String::from("# Command Line Options\n\n");

    out.push_str("## Usage\n\n```\n");
    let usage = cmd.render_usage();
    out.push_str(&usage.to_string());
    out.push_str("\n```\n\n");

    out.push_str("## Options\n\n");
    out.push_str("| Option | Description |\n");
    out.push_str("|--------|-------------|\n");

    for arg in cmd.get_arguments() {
        let id = arg.get_id().as_ref().to_string();
        if id == "help" || id == "version" {
            continue;
        }

        let option_str = if arg.is_positional() {
            let placeholder = value_placeholder(arg);
            if arg.is_required_set() {
                placeholder
            } else {
                format!("[{placeholder}]")
            }
        } else {
            let mut parts = Vec::new();
            if let Some(s) = arg.get_short() {
                parts.push(format!("-{s}"));
            }
            if let Some(l) = arg.get_long() {
                parts.push(format!("--{l}"));
            }
            let op = parts.join(", ");
            let placeholder = if arg.get_action().takes_values() {
                value_placeholder(arg)
            } else {
                String::new()
            };
            if placeholder.is_empty() {
                op
            } else {
                format!("{op} {placeholder}")
            }
        };

        let help = arg
            .get_help()
            .map(|h| escape_table_cell(&h.to_string()))
            .unwrap_or_else(|| "-".to_string());

        out.push_str(&format!("| `{option_str}` | {help} |\n"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_detection() {
        assert_eq!(
            CompressionFormat::from_extension(Path::new("file.csv.gz")),
            Some(CompressionFormat::Gzip)
        );
        assert_eq!(
            CompressionFormat::from_extension(Path::new("file.csv.zst")),
            Some(CompressionFormat::Zstd)
        );
        assert_eq!(
            CompressionFormat::from_extension(Path::new("file.csv.bz2")),
            Some(CompressionFormat::Bzip2)
        );
        assert_eq!(
            CompressionFormat::from_extension(Path::new("file.csv.xz")),
            Some(CompressionFormat::Xz)
        );
        assert_eq!(
            CompressionFormat::from_extension(Path::new("file.csv")),
            None
        );
        assert_eq!(CompressionFormat::from_extension(Path::new("file")), None);
    }

    #[test]
    fn test_compression_names() {
        assert_eq!(
            CompressionFormat::from_name("GZIP"),
            Some(CompressionFormat::Gzip)
        );
        assert_eq!(CompressionFormat::from_name("lz4"), None);
        assert_eq!(CompressionFormat::Zstd.extension(), "zst");
    }

    #[test]
    fn test_color_policy_names() {
        assert_eq!(ColorPolicy::from_name("palette"), Some(ColorPolicy::Palette));
        assert_eq!(ColorPolicy::from_name("Hash"), Some(ColorPolicy::Hash));
        assert_eq!(ColorPolicy::from_name("rainbow"), None);
        assert_eq!(ColorPolicy::default(), ColorPolicy::Palette);
        assert_eq!(ColorPolicy::Hash.name(), "hash");
    }

    #[test]
    fn test_path_is_optional() {
        let args = Args::try_parse_from(["csvcards"]).unwrap();
        assert!(args.path.is_none());

        let args =
            Args::try_parse_from(["csvcards", "data.csv", "--color-policy", "hash"]).unwrap();
        assert_eq!(args.path.as_deref(), Some(Path::new("data.csv")));
        assert_eq!(args.color_policy, Some(ColorPolicy::Hash));
    }

    #[test]
    fn test_delimiter_accepts_characters() {
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert_eq!(parse_delimiter("|"), Ok(b'|'));
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert_eq!(parse_delimiter("\\t"), Ok(b'\t'));
        assert_eq!(parse_delimiter("59"), Ok(b';'));
        assert_eq!(parse_delimiter("5"), Ok(b'5'));
        assert!(parse_delimiter("é").is_err());
        assert!(parse_delimiter(";;").is_err());

        let args = Args::try_parse_from(["csvcards", "--delimiter", ";"]).unwrap();
        assert_eq!(args.delimiter, Some(b';'));
    }

    #[test]
    fn test_force_requires_generate_config() {
        assert!(Args::try_parse_from(["csvcards", "--force"]).is_err());
        assert!(Args::try_parse_from(["csvcards", "--generate-config", "--force"]).is_ok());
    }

    #[test]
    fn test_render_options_markdown() {
        let md = render_options_markdown();
        assert!(md.starts_with("# Command Line Options"));
        assert!(md.contains("--color-policy"));
        assert!(md.contains("--log-file"));
        assert!(!md.contains("`--help`"));
    }
}
