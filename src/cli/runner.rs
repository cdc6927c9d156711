//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{load_config, validate_config, CsvOptions, PipelineConfig, SourceDefinition};
use crate::error::Result;
use crate::pipeline::Pipeline;
use crate::storage::Session;
use serde_json::{json, Value};

/// Location overrides given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub patents: Option<String>,
    pub dictionary: Option<String>,
    pub output: Option<String>,
}

impl Overrides {
    /// Apply overrides to a loaded configuration and re-validate it
    pub fn apply(&self, config: &mut PipelineConfig) -> Result<()> {
        if let Some(patents) = &self.patents {
            config.patents.location.clone_from(patents);
        }

        if let Some(dictionary) = &self.dictionary {
            match &mut config.dictionary {
                Some(source) => source.location.clone_from(dictionary),
                None => {
                    config.dictionary = Some(SourceDefinition {
                        location: dictionary.clone(),
                        csv: CsvOptions::default(),
                    });
                }
            }
        }

        if let Some(output) = &self.output {
            config.output.location.clone_from(output);
        }

        validate_config(config)
    }
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Run {
                patents,
                dictionary,
                output,
            } => {
                let overrides = Overrides {
                    patents: patents.clone(),
                    dictionary: dictionary.clone(),
                    output: output.clone(),
                };
                self.execute(&overrides).await
            }
            Commands::Validate => self.validate(),
        }
    }

    fn load_config(&self) -> Result<PipelineConfig> {
        tracing::debug!(path = %self.cli.config.display(), "Loading pipeline config");
        load_config(&self.cli.config)
    }

    /// Run the pipeline and print its summary
    async fn execute(&self, overrides: &Overrides) -> Result<()> {
        let mut config = self.load_config()?;
        overrides.apply(&mut config)?;

        let session = Session::open(&config)?;
        let result = Pipeline::new(config).run(&session).await;
        session.close();
        let summary = result?;

        self.output_message(&json!({
            "type": "RUN_SUMMARY",
            "summary": summary,
        }))
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        let config = self.load_config()?;

        self.output_message(&json!({
            "type": "LOG",
            "log": {
                "level": "INFO",
                "message": format!(
                    "Pipeline '{}' is valid: {} -> {}",
                    config.name,
                    config.patents.location,
                    config.output.location
                )
            }
        }))
    }

    fn output_message(&self, msg: &Value) -> Result<()> {
        let rendered = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(msg)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(msg)?,
        };
        println!("{rendered}");
        Ok(())
    }
}
