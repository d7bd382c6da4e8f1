//! CLI argument parsing and execution.
//!
//! # Example
//!
//! ```bash
//! depcycles deps.txt
//! cat deps.txt | depcycles --json
//! depcycles --max-chain-len 12 -vv deps.txt
//! ```

use std::path::PathBuf;

use clap::Parser;
use depcycles_edges::{Edge, EdgeReader};

use crate::config::{parse_chain_len, ResearchConfig};
use crate::domain::EntityRegistry;
use crate::error::{Error, Result};
use crate::report::{self, OutputMode};
use crate::research::DependencyResearcher;

/// Depcycles - find every dependency cycle in a directed graph
///
/// Reads whitespace-separated integer pairs `ENTITY DEPENDENCY` and prints
/// each distinct cycle on its own line, sorted.
#[derive(Parser, Debug)]
#[command(name = "depcycles")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Edge list file (reads standard input when omitted)
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Output in JSON format for programmatic use
    #[arg(long)]
    pub json: bool,

    /// Verbose logging to stderr (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Seed from every edge, even those that cannot close a cycle
    #[arg(long)]
    pub no_prune: bool,

    /// Abandon chains longer than N entities instead of failing at the
    /// search limit (results may be incomplete)
    #[arg(long, value_name = "N", value_parser = parse_chain_len)]
    pub max_chain_len: Option<usize>,
}

/// Where the edge list comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input
    Stdin,
    /// A file path
    File(PathBuf),
}

impl Cli {
    /// Parse CLI arguments from command line
    #[must_use]
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    ///
    /// # Errors
    ///
    /// Returns clap's error for unknown flags or invalid values.
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Log filter implied by `-v` flags
    #[must_use]
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Resolve the input source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Argument`] when more than one input is given.
    pub fn input_source(&self) -> Result<InputSource> {
        match self.inputs.as_slice() {
            [] => Ok(InputSource::Stdin),
            [path] => Ok(InputSource::File(path.clone())),
            _ => Err(Error::Argument(format!(
                "Incorrect number of arguments: expected at most one input file, got {}",
                self.inputs.len()
            ))),
        }
    }

    /// Apply command-line overrides on top of a base configuration
    #[must_use]
    pub fn research_config(&self, base: ResearchConfig) -> ResearchConfig {
        ResearchConfig {
            prune_acyclic_seeds: base.prune_acyclic_seeds && !self.no_prune,
            max_chain_len: self.max_chain_len.or(base.max_chain_len),
        }
    }

    /// Output mode selected by `--json`
    #[must_use]
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        }
    }

    /// Read the input, search it, and return the rendered report.
    ///
    /// # Errors
    ///
    /// Returns argument, input, and format errors from the boundary; the
    /// search itself does not fail on valid input.
    pub async fn execute(&self) -> Result<String> {
        let source = self.input_source()?;
        let config = self.research_config(ResearchConfig::from_env());

        let edges = read_edges(&source).await?;
        let registry = EntityRegistry::from_edges(&edges);

        let search = DependencyResearcher::new(&registry, config).find_cycles()?;
        tracing::info!(
            entities = registry.len(),
            cycles = search.cycles.len(),
            truncated = search.is_truncated(),
            "Cycle search finished"
        );

        report::render(&search, self.output_mode())
    }
}

/// Read every edge from the given source.
///
/// # Errors
///
/// Returns [`Error::Input`] if the file cannot be opened and
/// [`Error::Format`] for malformed content.
pub async fn read_edges(source: &InputSource) -> Result<Vec<Edge>> {
    match source {
        InputSource::Stdin => {
            tracing::debug!("Reading edges from standard input");
            Ok(EdgeReader::new(tokio::io::stdin()).read_all().await?)
        }
        InputSource::File(path) => {
            tracing::debug!(path = %path.display(), "Reading edges from file");
            let file = tokio::fs::File::open(path).await.map_err(|source| Error::Input {
                path: path.clone(),
                source,
            })?;
            Ok(EdgeReader::new(file).read_all().await?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("depcycles").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn no_arguments_reads_stdin() {
        let cli = parse(&[]);
        assert_eq!(cli.input_source().unwrap(), InputSource::Stdin);
        assert_eq!(cli.output_mode(), OutputMode::Text);
    }

    #[test]
    fn one_argument_reads_file() {
        let cli = parse(&["deps.txt"]);
        assert_eq!(
            cli.input_source().unwrap(),
            InputSource::File(PathBuf::from("deps.txt"))
        );
    }

    #[test]
    fn two_arguments_are_an_argument_error() {
        let cli = parse(&["a.txt", "b.txt"]);
        let err = cli.input_source().unwrap_err();
        assert!(matches!(err, Error::Argument(_)));
        assert!(err.to_string().contains("Incorrect number of arguments"));
    }

    #[rstest]
    #[case(&[], "warn")]
    #[case(&["-v"], "info")]
    #[case(&["-vv"], "debug")]
    #[case(&["-v", "-v", "-v"], "trace")]
    fn verbosity_maps_to_log_level(#[case] args: &[&str], #[case] expected: &str) {
        assert_eq!(parse(args).log_level(), expected);
    }

    #[test]
    fn flags_override_config() {
        let cli = parse(&["--no-prune", "--max-chain-len", "9", "--json"]);
        let config = cli.research_config(ResearchConfig::default());

        assert!(!config.prune_acyclic_seeds);
        assert_eq!(config.max_chain_len, Some(9));
        assert_eq!(cli.output_mode(), OutputMode::Json);
    }

    #[test]
    fn absent_flags_keep_base_config() {
        let base = ResearchConfig {
            prune_acyclic_seeds: false,
            max_chain_len: Some(5),
        };
        assert_eq!(parse(&[]).research_config(base), base);
    }

    #[test]
    fn chain_len_below_two_is_rejected_by_clap() {
        let result = Cli::try_parse_from(["depcycles", "--max-chain-len", "1"]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn reads_edges_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "1 2\n2 3\n3 1\n").unwrap();

        let edges = read_edges(&InputSource::File(file.path().to_path_buf()))
            .await
            .unwrap();
        assert_eq!(edges, vec![Edge::new(1, 2), Edge::new(2, 3), Edge::new(3, 1)]);
    }

    #[tokio::test]
    async fn missing_file_is_an_input_error() {
        let path = PathBuf::from("definitely/not/here.txt");
        let err = read_edges(&InputSource::File(path.clone())).await.unwrap_err();

        match err {
            Error::Input { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn execute_renders_file_report() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "1 2\n2 3\n3 1\n").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let report = parse(&[path.as_str()]).execute().await.unwrap();
        assert_eq!(report, "1 2 3 1 \n");
    }

    #[tokio::test]
    async fn execute_rejects_extra_arguments_before_reading() {
        let err = parse(&["a.txt", "b.txt"]).execute().await.unwrap_err();
        assert!(matches!(err, Error::Argument(_)));
    }
}
