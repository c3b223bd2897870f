use crate::error::CliError;
use clap::{Args, Subcommand};
use engine_config::{
    job::{CountJob, FilterJoinJob, JobConfig},
    loader,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Subcommand)]
pub enum Commands {
    /// Count rows per distinct value of a column
    Count {
        #[arg(long, help = "Directory of input CSV files")]
        input_dir: PathBuf,

        #[arg(long, help = "Column whose values are counted")]
        key_column: String,

        #[arg(long, default_value = "count", help = "Header of the count column")]
        value_column: String,

        #[command(flatten)]
        run: RunArgs,
    },
    /// Keep rows whose key matches a filtered row of another input
    FilterJoin {
        #[arg(long, help = "Directory of CSV files the filter is applied to")]
        filter_input_dir: PathBuf,

        #[arg(long, default_value = "id", help = "Key column of the filtered files")]
        filter_key_column: String,

        #[arg(long)]
        filter_column: String,

        #[arg(long)]
        filter_value: String,

        #[arg(long, help = "Directory of CSV files to join")]
        join_input_dir: PathBuf,

        #[arg(long, help = "Key column of the joined files")]
        join_key_column: String,

        #[arg(
            long,
            value_delimiter = ',',
            default_value = "date,click_target",
            help = "Columns of the joined files carried into the result"
        )]
        attribute_columns: Vec<String>,

        #[arg(long, default_value = "id", help = "Header of the key column in the result")]
        output_key_column: String,

        #[command(flatten)]
        run: RunArgs,
    },
    /// Run a job described by a JSON file
    Run {
        #[arg(long, help = "Job file path")]
        config: PathBuf,

        #[arg(
            long,
            help = "If specified, writes the JSON run summary to this file instead of stdout"
        )]
        summary: Option<PathBuf>,
    },
}

#[derive(Args)]
pub struct RunArgs {
    #[arg(long, default_value_t = 2, help = "Number of map workers")]
    pub mappers: usize,

    #[arg(long, default_value_t = 2, help = "Number of reduce workers")]
    pub reducers: usize,

    #[arg(long, help = "Result CSV file path")]
    pub output: Option<PathBuf>,

    #[arg(
        long,
        help = "If specified, writes the JSON run summary to this file instead of stdout"
    )]
    pub summary: Option<PathBuf>,
}

/// Turns a subcommand into the job to run and the summary path, loading
/// the job file for `run`.
pub async fn resolve_job(command: Commands) -> Result<(JobConfig, Option<PathBuf>), CliError> {
    match command {
        Commands::Count {
            input_dir,
            key_column,
            value_column,
            run,
        } => {
            let job = CountJob {
                input_dir,
                key_column,
                value_column,
                mapper_count: run.mappers,
                reducer_count: run.reducers,
                output: run.output,
            };
            Ok((JobConfig::Count(job), run.summary))
        }
        Commands::FilterJoin {
            filter_input_dir,
            filter_key_column,
            filter_column,
            filter_value,
            join_input_dir,
            join_key_column,
            attribute_columns,
            output_key_column,
            run,
        } => {
            let job = FilterJoinJob {
                filter_input_dir,
                filter_key_column,
                filter_column,
                filter_value,
                join_input_dir,
                join_key_column,
                attribute_columns,
                output_key_column,
                mapper_count: run.mappers,
                reducer_count: run.reducers,
                output: run.output,
            };
            Ok((JobConfig::FilterJoin(job), run.summary))
        }
        Commands::Run { config, summary } => {
            info!("Loading job file: {}", config.display());
            Ok((loader::load(&config).await?, summary))
        }
    }
}
