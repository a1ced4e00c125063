use crate::constants::{verbosity, STDIN_INDICATOR};
use crate::culture::Culture;
use crate::types::TypeTag;
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::fmt::Display;

/// Digest algorithms offered by the `digest` command.
#[derive(Debug, Clone, ValueEnum, Copy, PartialEq)]
#[value(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    /// MD5 over ASCII input.
    Md5,
    /// SHA-256 over UTF-8 input.
    Sha256,
}

impl Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DigestAlgorithm::Md5 => "md5",
            DigestAlgorithm::Sha256 => "sha256",
        };
        write!(f, "{s}")
    }
}

/// Conversion, string and XML/JSON helpers for the shell.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Title-case text with the current culture.
    Capitalize {
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Keep only ASCII letters and digits.
    Filter {
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Split text on a literal separator, one segment per line.
    Split {
        #[arg(value_name = "TEXT")]
        text: String,

        #[arg(short, long)]
        separator: String,
    },

    /// Print an upper-case hex digest of the text.
    Digest {
        #[arg(value_name = "TEXT")]
        text: String,

        #[arg(short, long, value_enum, default_value_t = DigestAlgorithm::Md5)]
        algorithm: DigestAlgorithm,
    },

    /// Convert a literal to another type and print it.
    Convert(ConvertArgs),

    /// Convert an XML document to JSON.
    XmlToJson {
        /// Literal document or `-` to read from stdin.
        #[arg(value_name = "INPUT", default_value = STDIN_INDICATOR)]
        input: String,
    },

    /// Convert a JSON document to XML.
    JsonToXml {
        /// Literal document or `-` to read from stdin.
        #[arg(value_name = "INPUT", default_value = STDIN_INDICATOR)]
        input: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    #[arg(value_name = "VALUE")]
    pub value: String,

    /// Target type, e.g. `i32`, `decimal`, `guid`, `datetime` or `i64?`.
    #[arg(long = "to", value_parser = parse_type_tag)]
    pub to: TypeTag,

    /// Culture used for parsing; defaults to the process locale.
    #[arg(long, value_parser = parse_culture)]
    pub culture: Option<Culture>,

    /// Printed instead of failing when the conversion does not succeed.
    #[arg(long = "default")]
    pub default: Option<String>,
}

fn parse_type_tag(name: &str) -> std::result::Result<TypeTag, String> {
    TypeTag::from_name(name).ok_or_else(|| format!("unknown type '{name}'"))
}

fn parse_culture(name: &str) -> std::result::Result<Culture, String> {
    Culture::from_name(name).ok_or_else(|| format!("unknown culture '{name}'"))
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
