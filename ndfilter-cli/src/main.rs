use clap::Parser;
use ndfilter::array::io::{load_gray_any, save_gray_any};
use ndfilter::{
    convolve_any, median_filter_any, rank_filter_any, template_match_any, transform_any, AnyArray,
    DType, Daubechies, ExtendMode, KernelConfig, Transform,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "ndfilter CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum DTypeConfig {
    U8,
    U16,
    I32,
    #[default]
    F32,
    F64,
}

impl From<DTypeConfig> for DType {
    fn from(value: DTypeConfig) -> Self {
        match value {
            DTypeConfig::U8 => DType::U8,
            DTypeConfig::U16 => DType::U16,
            DTypeConfig::I32 => DType::I32,
            DTypeConfig::F32 => DType::F32,
            DTypeConfig::F64 => DType::F64,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ModeConfig {
    #[default]
    Nearest,
    Wrap,
    Mirror,
    Reflect,
    Constant,
    Clamp,
}

impl From<ModeConfig> for ExtendMode {
    fn from(value: ModeConfig) -> Self {
        match value {
            ModeConfig::Nearest => ExtendMode::Nearest,
            ModeConfig::Wrap => ExtendMode::Wrap,
            ModeConfig::Mirror => ExtendMode::Mirror,
            ModeConfig::Reflect => ExtendMode::Reflect,
            ModeConfig::Constant => ExtendMode::Constant,
            ModeConfig::Clamp => ExtendMode::Clamp,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum OperationConfig {
    Convolve {
        shape: [usize; 2],
        weights: Vec<f64>,
    },
    Rank {
        size: [usize; 2],
        rank: usize,
    },
    Median {
        size: [usize; 2],
    },
    TemplateMatch {
        template_path: String,
    },
    Haar {
        #[serde(default)]
        separable: bool,
    },
    Ihaar {
        #[serde(default)]
        separable: bool,
    },
    Daubechies {
        order: usize,
        #[serde(default)]
        separable: bool,
    },
    Idaubechies {
        order: usize,
        #[serde(default)]
        separable: bool,
    },
}

impl Default for OperationConfig {
    fn default() -> Self {
        OperationConfig::Median { size: [3, 3] }
    }
}

impl OperationConfig {
    fn name(&self) -> &'static str {
        match self {
            OperationConfig::Convolve { .. } => "convolve",
            OperationConfig::Rank { .. } => "rank",
            OperationConfig::Median { .. } => "median",
            OperationConfig::TemplateMatch { .. } => "template_match",
            OperationConfig::Haar { .. } => "haar",
            OperationConfig::Ihaar { .. } => "ihaar",
            OperationConfig::Daubechies { .. } => "daubechies",
            OperationConfig::Idaubechies { .. } => "idaubechies",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    input_path: String,
    output_path: Option<String>,
    summary_path: Option<String>,
    dtype: DTypeConfig,
    mode: ModeConfig,
    parallel: bool,
    operation: OperationConfig,
}

#[derive(Debug, Serialize)]
struct Summary {
    operation: &'static str,
    dtype: String,
    shape: Vec<usize>,
    min: f64,
    max: f64,
    mean: f64,
    output_path: Option<String>,
}

impl Summary {
    fn new(operation: &'static str, array: &AnyArray, output_path: Option<String>) -> Self {
        let values = array.view().to_f64_vec();
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let mean = if values.is_empty() {
            0.0
        } else {
            values.iter().sum::<f64>() / values.len() as f64
        };
        Self {
            operation,
            dtype: array.dtype().to_string(),
            shape: array.shape().to_vec(),
            min,
            max,
            mean,
            output_path,
        }
    }
}

fn footprint(dtype: DType, size: [usize; 2]) -> ndfilter::NdFilterResult<AnyArray> {
    AnyArray::from_f64_slice(dtype, &vec![1.0; size[0] * size[1]], &size)
}

fn run(config: &Config, input: AnyArray) -> Result<AnyArray, Box<dyn std::error::Error>> {
    let dtype = input.dtype();
    let kernel_cfg = KernelConfig {
        mode: config.mode.into(),
        parallel: config.parallel,
    };
    kernel_cfg.validate()?;

    let out = match &config.operation {
        OperationConfig::Convolve { shape, weights } => {
            let filter = AnyArray::from_f64_slice(dtype, weights, shape)?;
            convolve_any(&input.view(), &filter.view(), &kernel_cfg)?
        }
        OperationConfig::Rank { size, rank } => {
            let filter = footprint(dtype, *size)?;
            let mut out = AnyArray::zeros(dtype, input.shape())?;
            rank_filter_any(
                &input.view(),
                &filter.view(),
                *rank,
                &kernel_cfg,
                &mut out.view_mut(),
            )?;
            out
        }
        OperationConfig::Median { size } => {
            let filter = footprint(dtype, *size)?;
            median_filter_any(&input.view(), &filter.view(), &kernel_cfg)?
        }
        OperationConfig::TemplateMatch { template_path } => {
            let template = load_gray_any(template_path, dtype)?;
            let mut out = AnyArray::zeros(dtype, input.shape())?;
            template_match_any(&input.view(), &template.view(), &kernel_cfg, &mut out.view_mut())?;
            out
        }
        OperationConfig::Haar { separable } => transformed(input, Transform::Haar, *separable)?,
        OperationConfig::Ihaar { separable } => {
            transformed(input, Transform::InverseHaar, *separable)?
        }
        OperationConfig::Daubechies { order, separable } => {
            let order = Daubechies::from_code(*order)?;
            transformed(input, Transform::Daubechies(order), *separable)?
        }
        OperationConfig::Idaubechies { order, separable } => {
            let order = Daubechies::from_code(*order)?;
            transformed(input, Transform::InverseDaubechies(order), *separable)?
        }
    };
    Ok(out)
}

fn transformed(
    mut array: AnyArray,
    transform: Transform,
    separable: bool,
) -> ndfilter::NdFilterResult<AnyArray> {
    transform_any(&mut array.view_mut(), transform, separable)?;
    Ok(array)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("ndfilter=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.input_path.is_empty() {
        return Err("input_path must be set in the config".into());
    }

    let input = load_gray_any(&config.input_path, config.dtype.into())?;
    tracing::info!(
        input = %config.input_path,
        operation = config.operation.name(),
        "loaded input"
    );
    let output = run(&config, input)?;

    if let Some(path) = &config.output_path {
        save_gray_any(&output.view(), path)?;
    }

    let summary = Summary::new(config.operation.name(), &output, config.output_path.clone());
    let json = serde_json::to_string_pretty(&summary)?;
    match &config.summary_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
