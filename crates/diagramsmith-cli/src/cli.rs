//! Command-line interface for the diagramsmith utility
//!
//! Provides a CLI that turns plain-English descriptions into diagram source
//! and recommends architecture patterns for a requirements text.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use diagramsmith::core::logging::{init_logging, LogFormat};
use diagramsmith::patterns::{recommend, MatchConstraints, Recommendation};
use diagramsmith::plugins::{DiagramService, GenerateResponse};
use diagramsmith::{Direction, ExtractionLimits, RenderConfig};

/// Diagramsmith - Turn plain-English descriptions into diagram source
#[derive(Parser)]
#[command(name = "diagramsmith")]
#[command(about = "Turn plain-English descriptions into Mermaid, PlantUML or Python diagrams source")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error); defaults to the environment
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Set log format (compact|pretty|json); defaults to the environment
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate diagram source from a description
    Generate {
        /// Input file containing the description (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the diagram source (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Diagram type (sequence, flowchart, class)
        #[arg(short = 't', long = "type", default_value = "sequence")]
        diagram_type: String,

        /// Output format (mermaid, plantuml, python_diagrams)
        #[arg(short, long, default_value = "mermaid")]
        format: String,

        /// Title overriding the one found in the description
        #[arg(long)]
        title: Option<String>,

        /// Layout direction for notations that support one
        #[arg(long, value_enum, default_value_t = DirectionChoice::Td)]
        direction: DirectionChoice,

        /// Print the full JSON response instead of bare source
        #[arg(long)]
        json: bool,
    },

    /// Print the extracted diagram model as JSON
    Extract {
        /// Input file containing the description (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the JSON model (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Diagram type (sequence, flowchart, class)
        #[arg(short = 't', long = "type", default_value = "sequence")]
        diagram_type: String,
    },

    /// Show supported diagram types and output formats
    Formats {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Recommend architecture patterns for a requirements text
    Recommend {
        /// Input file containing the requirements (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the recommendation (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Reject patterns whose baseline monthly cost exceeds this (USD)
        #[arg(long)]
        max_monthly_cost: Option<f64>,

        /// Reject patterns that typically take longer than this to build
        #[arg(long)]
        max_timeline_weeks: Option<u32>,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Layout directions
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum DirectionChoice {
    /// Top to bottom
    #[default]
    Td,
    /// Left to right
    Lr,
    /// Right to left
    Rl,
    /// Bottom to top
    Bt,
}

impl From<DirectionChoice> for Direction {
    fn from(value: DirectionChoice) -> Self {
        match value {
            DirectionChoice::Td => Direction::TopDown,
            DirectionChoice::Lr => Direction::LeftRight,
            DirectionChoice::Rl => Direction::RightLeft,
            DirectionChoice::Bt => Direction::BottomUp,
        }
    }
}

/// Main CLI application
pub struct DiagramsmithApp {
    service: DiagramService,
}

impl DiagramsmithApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    /// Create a new application instance with a render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            service: DiagramService::with_config(ExtractionLimits::default(), config),
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Explicit flags win; otherwise init_logging consults the environment
        let log_level = cli
            .log_level
            .map(|l| l.as_str())
            .or(if cli.verbose { Some("debug") } else { None });
        if let Err(e) = init_logging(log_level, cli.log_format.map(|f| f.as_str())) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Diagramsmith v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Generate {
                input,
                output,
                diagram_type,
                format,
                title,
                direction,
                json,
            } => {
                self.service = DiagramService::with_config(
                    ExtractionLimits::default(),
                    RenderConfig::with_direction(direction.into()),
                );
                self.generate_command(
                    input,
                    output,
                    &diagram_type,
                    &format,
                    title.as_deref(),
                    json,
                    cli.verbose,
                )
            }
            Commands::Extract {
                input,
                output,
                diagram_type,
            } => self.extract_command(input, output, &diagram_type),
            Commands::Formats { json } => self.formats_command(json, cli.verbose),
            Commands::Recommend {
                input,
                output,
                max_monthly_cost,
                max_timeline_weeks,
                json,
            } => {
                let constraints = MatchConstraints {
                    max_monthly_cost,
                    max_timeline_weeks,
                };
                self.recommend_command(input, output, &constraints, json)
            }
        }
    }

    /// Handle the generate command
    #[allow(clippy::too_many_arguments)]
    fn generate_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        diagram_type: &str,
        format: &str,
        title: Option<&str>,
        json: bool,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        let result = self.service.generate(&content, diagram_type, format, title);

        if json {
            let response = GenerateResponse::from_result(result);
            self.write_output(output, &serde_json::to_string_pretty(&response)?)?;
            return if response.is_success() {
                Ok(())
            } else {
                Err(anyhow!("Diagram generation failed"))
            };
        }

        let diagram = result?;
        info!(
            diagram_type = %diagram.diagram_type,
            elements = diagram.element_count,
            connections = diagram.connection_count,
            "Generated diagram"
        );
        if verbose {
            eprintln!(
                "Generated {} diagram with {} elements and {} connections",
                diagram.diagram_type, diagram.element_count, diagram.connection_count
            );
            for warning in &diagram.warnings {
                eprintln!("Warning: {}", warning);
            }
        }
        self.write_output(output, &diagram.code)
    }

    /// Handle the extract command
    fn extract_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        diagram_type: &str,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        let spec = self.service.extract(&content, diagram_type)?;
        self.write_output(output, &serde_json::to_string_pretty(&spec)?)
    }

    /// Handle the formats command
    fn formats_command(&self, json: bool, verbose: bool) -> Result<()> {
        if verbose {
            eprintln!("Listing supported diagram types and formats");
        }

        let matrix = self.service.supported_types_and_formats();
        if json {
            println!("{}", serde_json::to_string_pretty(&matrix)?);
        } else {
            println!("Supported diagram types and formats:");
            for (diagram_type, formats) in &matrix {
                let names: Vec<String> = formats.iter().map(|f| f.to_string()).collect();
                println!("  {:<10} {}", diagram_type.as_str(), names.join(", "));
            }
            println!();
            println!("Total: {} diagram types supported", matrix.len());
        }

        Ok(())
    }

    /// Handle the recommend command
    fn recommend_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        constraints: &MatchConstraints,
        json: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        let recommendation = recommend(&content, constraints)?;
        info!(
            application_type = %recommendation.analysis.application_type,
            matches = recommendation.matches.len(),
            "Recommended architecture patterns"
        );
        let rendered = if json {
            serde_json::to_string_pretty(&recommendation)?
        } else {
            format_recommendation(&recommendation)
        };
        self.write_output(output, &rendered)
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        let content = match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .with_context(|| format!("Failed to read input file '{}'", path.display()))?,
            _ => {
                let mut content = String::new();
                io::stdin()
                    .read_to_string(&mut content)
                    .context("Failed to read stdin")?;
                content
            }
        };
        debug!(bytes = content.len(), "Read input");
        Ok(content)
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => fs::write(&path, content)
                .with_context(|| format!("Failed to write output file '{}'", path.display())),
            _ => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(content.as_bytes())?;
                if !content.is_empty() && !content.ends_with('\n') {
                    stdout.write_all(b"\n")?;
                }
                stdout.flush()?;
                Ok(())
            }
        }
    }
}

impl Default for DiagramsmithApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Human-readable recommendation report
pub fn format_recommendation(recommendation: &Recommendation) -> String {
    let analysis = &recommendation.analysis;
    let mut lines = vec![
        format!(
            "Application: {} ({} scale, {} security, {} complexity)",
            analysis.application_type, analysis.scale, analysis.security, analysis.complexity
        ),
        format!(
            "Estimated timeline: {}, budget: {}",
            analysis.estimated_timeline, analysis.budget_range
        ),
        String::new(),
    ];

    if recommendation.matches.is_empty() {
        lines.push("No architecture pattern fits these requirements".to_string());
    }

    for (rank, m) in recommendation.matches.iter().enumerate() {
        lines.push(format!(
            "{}. {} (score {:.2}, confidence {:.2})",
            rank + 1,
            m.pattern_name,
            m.match_score,
            m.confidence
        ));
        lines.push(format!(
            "   cost {}, effort {}",
            m.estimated_cost, m.implementation_effort
        ));
        lines.extend(m.reasons.iter().map(|r| format!("   + {}", r)));
        lines.extend(m.concerns.iter().map(|c| format!("   ! {}", c)));
    }

    lines.join("\n")
}
