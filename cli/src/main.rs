//! owlrdf CLI: translate an RDF document into OWL 2 axioms
//!
//! Prints functional syntax, re-serialized RDF, or the parse report.

use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use owlrdf::{
    FunctionalRenderer, OntologyParser, ParseOutcome, ParserConfig, RdfFormat, RdfWriter,
    RendererConfig,
};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "owlrdf", version, about = "RDF to OWL 2 axiom translator")]
struct Cli {
    /// Log resolution passes and handler decisions
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum InputFormat {
    Turtle,
    Ntriples,
    Rdfxml,
}

impl From<InputFormat> for RdfFormat {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::Turtle => RdfFormat::Turtle,
            InputFormat::Ntriples => RdfFormat::NTriples,
            InputFormat::Rdfxml => RdfFormat::RdfXml,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Functional,
    Turtle,
    Ntriples,
    Report,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an RDF document into an ontology
    Parse {
        /// Input document
        file: PathBuf,

        /// Input syntax; guessed from the file extension when omitted
        #[arg(long)]
        format: Option<InputFormat>,

        /// Base IRI for relative references
        #[arg(long)]
        base: Option<String>,

        /// Parser configuration file (YAML, or JSON with a .json extension)
        #[arg(long)]
        config: Option<PathBuf>,

        /// What to print
        #[arg(long, default_value = "functional")]
        output: OutputFormat,

        /// Write full IRIs instead of prefixed names
        #[arg(long)]
        no_abbreviate: bool,
    },
    /// Print the default parser configuration as YAML
    Config,
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdout = std::io::stdout();
    if let Err(e) = run(cli.command, &mut stdout.lock()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands, out: &mut impl Write) -> CliResult<()> {
    match command {
        Commands::Parse {
            file,
            format,
            base,
            config,
            output,
            no_abbreviate,
        } => {
            let mut parser_config = match &config {
                Some(path) => ParserConfig::from_file(path)?,
                None => ParserConfig::default(),
            };
            if base.is_some() {
                parser_config.base_iri = base;
            }
            let format = format
                .map(RdfFormat::from)
                .or_else(|| RdfFormat::from_path(&file))
                .unwrap_or(RdfFormat::Turtle);

            let outcome = OntologyParser::new(parser_config).parse_file(&file, format)?;
            write_outcome(&outcome, output, !no_abbreviate, out)?;

            let issues = outcome.report.issues().len();
            if issues > 0 && !matches!(output, OutputFormat::Report | OutputFormat::Json) {
                eprintln!("{} issue(s) reported; use --output report for details", issues);
            }
            Ok(())
        }
        Commands::Config => {
            write!(out, "{}", serde_yaml::to_string(&ParserConfig::default())?)?;
            Ok(())
        }
    }
}

fn write_outcome(
    outcome: &ParseOutcome,
    output: OutputFormat,
    abbreviate: bool,
    out: &mut impl Write,
) -> CliResult<()> {
    match output {
        OutputFormat::Functional => {
            let renderer =
                FunctionalRenderer::new(RendererConfig::default().with_abbreviation(abbreviate));
            renderer.render_to(&outcome.ontology, out)?;
        }
        OutputFormat::Turtle => {
            write!(out, "{}", RdfWriter::to_document(&outcome.ontology, RdfFormat::Turtle)?)?;
        }
        OutputFormat::Ntriples => {
            write!(out, "{}", RdfWriter::to_document(&outcome.ontology, RdfFormat::NTriples)?)?;
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&outcome.report.summary())?)?;
        }
        OutputFormat::Report => write_report(outcome, out)?,
    }
    Ok(())
}

fn write_report(outcome: &ParseOutcome, out: &mut impl Write) -> CliResult<()> {
    let summary = outcome.report.summary();

    let mut counts = Table::new();
    counts.set_content_arrangement(ContentArrangement::Dynamic);
    counts.set_header(vec!["Metric", "Count"]);
    counts.add_row(vec!["Triples".to_string(), summary.triples.to_string()]);
    counts.add_row(vec!["Consumed".to_string(), summary.consumed.to_string()]);
    counts.add_row(vec![
        "Axioms".to_string(),
        outcome.ontology.axiom_count().to_string(),
    ]);
    counts.add_row(vec!["Conflicts".to_string(), summary.conflicts.to_string()]);
    counts.add_row(vec![
        "Structural errors".to_string(),
        summary.structural_errors.to_string(),
    ]);
    counts.add_row(vec!["Unparsed".to_string(), summary.unparsed.to_string()]);
    counts.add_row(vec!["Unsupported".to_string(), summary.unsupported.to_string()]);
    counts.add_row(vec!["Ambiguous".to_string(), summary.ambiguous.to_string()]);
    counts.add_row(vec!["Inferred".to_string(), summary.inferred.len().to_string()]);
    writeln!(out, "{}", counts)?;

    let mut passes = Table::new();
    passes.set_content_arrangement(ContentArrangement::Dynamic);
    passes.set_header(vec!["Pass", "Kind", "Examined", "Resolved", "Remaining"]);
    for (i, pass) in summary.passes.iter().enumerate() {
        passes.add_row(vec![
            (i + 1).to_string(),
            format!("{:?}", pass.kind),
            pass.examined.to_string(),
            pass.resolved.to_string(),
            pass.remaining.to_string(),
        ]);
    }
    writeln!(out, "{}", passes)?;

    if summary.issues.is_empty() {
        writeln!(out, "(no issues)")?;
        return Ok(());
    }

    let mut issues = Table::new();
    issues.set_content_arrangement(ContentArrangement::Dynamic);
    issues.set_header(vec!["Severity", "Kind", "Message"]);
    for issue in &summary.issues {
        issues.add_row(vec![
            format!("{:?}", issue.severity),
            issue.kind.to_string(),
            issue.message.clone(),
        ]);
    }
    writeln!(out, "{}", issues)?;
    writeln!(out, "{} issue(s)", summary.issues.len())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    const DOC: &str = r#"
        @prefix : <http://example.org/zoo#> .
        @prefix owl: <http://www.w3.org/2002/07/owl#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        <http://example.org/zoo> a owl:Ontology .
        :Lion a owl:Class ; rdfs:subClassOf :Cat .
        :Cat a owl:Class .
        :Lion :roars :Loudly .
    "#;

    fn run_args(args: &[&str]) -> String {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        run(cli.command, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_to_functional_syntax() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zoo.ttl");
        std::fs::write(&path, DOC).unwrap();

        let text = run_args(&["owlrdf", "parse", path.to_str().unwrap()]);
        assert!(text.contains("SubClassOf(:Lion :Cat)"));
        assert!(text.contains("// Generated by owlrdf"));
    }

    #[test]
    fn test_report_and_json_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zoo.ttl");
        std::fs::write(&path, DOC).unwrap();

        let report = run_args(&["owlrdf", "parse", path.to_str().unwrap(), "--output", "report"]);
        assert!(report.contains("Unparsed"));
        assert!(report.contains("unparsed_statement"));

        let json = run_args(&["owlrdf", "parse", path.to_str().unwrap(), "--output", "json"]);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["unparsed"], 1);
    }

    #[test]
    fn test_config_file_applies_fallback_policy() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("zoo.ttl");
        std::fs::write(&doc, DOC).unwrap();
        let config = dir.path().join("parser.yaml");
        std::fs::write(&config, "fallback: materialize_as_annotation\n").unwrap();

        let text = run_args(&[
            "owlrdf",
            "parse",
            doc.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ]);
        assert!(text.contains("AnnotationAssertion(Annotation(<urn:owlrdf:vocab#unparsedStatement>"));
    }

    #[test]
    fn test_default_config_round_trips() {
        let yaml = run_args(&["owlrdf", "config"]);
        let config = ParserConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(config, ParserConfig::default());
    }
}
