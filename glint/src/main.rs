use clap::{Parser, Subcommand, ValueEnum};
use glint_core::defaults;
use glint_core::glsl::{Dialect, GlslOptions, Precision};
use glint_core::shader::Program;
use glint_core::types::ShaderStage;
use log::{info, warn};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Parser)]
#[command(name = "glint")]
#[command(about = "Generate GLSL and vertex layouts for the stock shader programs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate GLSL source for a program
    Emit {
        /// Stock program name (textured, textured-colored)
        #[arg(value_name = "PROGRAM")]
        program: String,

        /// Which stage to emit
        #[arg(long, value_enum, default_value_t = StageArg::Both)]
        stage: StageArg,

        /// Emit GLSL ES (unguarded precision statements)
        #[arg(long)]
        gles: bool,

        /// Default float precision
        #[arg(long, value_enum, default_value_t = PrecisionArg::Medium)]
        float_precision: PrecisionArg,

        /// Output file (defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print offsets, stride and attribute bindings of a program's layout
    Layout {
        #[arg(value_name = "PROGRAM")]
        program: String,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StageArg {
    Vertex,
    Fragment,
    Both,
}

impl StageArg {
    fn stages(self) -> &'static [ShaderStage] {
        match self {
            StageArg::Vertex => &[ShaderStage::Vertex],
            StageArg::Fragment => &[ShaderStage::Fragment],
            StageArg::Both => &[ShaderStage::Vertex, ShaderStage::Fragment],
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PrecisionArg {
    Low,
    Medium,
    High,
}

impl From<PrecisionArg> for Precision {
    fn from(arg: PrecisionArg) -> Self {
        match arg {
            PrecisionArg::Low => Precision::Low,
            PrecisionArg::Medium => Precision::Medium,
            PrecisionArg::High => Precision::High,
        }
    }
}

#[derive(Debug, Error)]
enum DriverError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("GLSL generation error: {0}")]
    GlslError(#[from] glint_core::GlslError),

    #[error("Unknown program '{0}', expected one of: {known}", known = defaults::PROGRAM_NAMES.join(", "))]
    UnknownProgram(String),
}

fn main() -> Result<(), DriverError> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Emit {
            program,
            stage,
            gles,
            float_precision,
            output,
            verbose,
        } => {
            let dialect = if gles { Dialect::Es } else { Dialect::Desktop };
            let options = GlslOptions::default()
                .with_dialect(dialect)
                .with_float_precision(float_precision.into());
            emit(&program, stage, options, output, verbose)?;
        }
        Commands::Layout { program } => {
            print_layout(&program)?;
        }
    }

    Ok(())
}

fn lookup(name: &str) -> Result<&'static Program, DriverError> {
    defaults::program(name).ok_or_else(|| DriverError::UnknownProgram(name.to_string()))
}

fn emit(
    name: &str,
    stage: StageArg,
    options: GlslOptions,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), DriverError> {
    let program = lookup(name)?;
    if verbose {
        info!("Generating {} with {:?}", program, options);
    }

    let mut text = String::new();
    for stage in stage.stages() {
        let source = match stage {
            ShaderStage::Vertex => program.vertex().to_glsl(&options)?,
            ShaderStage::Fragment => program.fragment().to_glsl(&options)?,
        };
        text.push_str(&format!("// {} shader\n", stage));
        text.push_str(&source);
    }

    match output {
        Some(path) => {
            fs::write(&path, &text)?;
            if verbose {
                info!("Wrote {} bytes to {}", text.len(), path.display());
            }
        }
        None => print!("{}", text),
    }

    Ok(())
}

fn print_layout(name: &str) -> Result<(), DriverError> {
    let layout = defaults::layout(name).ok_or_else(|| DriverError::UnknownProgram(name.to_string()))?;

    println!("{} stride={}", layout, layout.stride());
    for binding in layout.bindings() {
        println!(
            "  {} offset={} components={} kind={:?} normalized={}",
            binding.name, binding.offset, binding.components, binding.element_kind, binding.normalized
        );
    }

    let report = lookup(name)?.interface().check_draw(layout, ["u_ProjMat", "u_Tex"]);
    if !report.is_clean() {
        warn!("Layout does not match program interface: {:?}", report);
    }

    Ok(())
}
