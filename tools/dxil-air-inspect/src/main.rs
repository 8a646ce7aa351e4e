use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use dxil_air::{ConverterConfig, DxilToAir, DEFAULT_MAX_BLOB_BYTES};
use dxil_air_dxbc::{parse_dxil_program_header, DxbcFile};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "dxil-air-inspect",
    about = "Inspect a DXIL shader container and report whether it can be converted to AIR."
)]
struct Args {
    /// Shader blob (DXBC container holding a DXIL part)
    input: PathBuf,

    /// Refuse blobs larger than this many bytes
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_BLOB_BYTES)]
    max_blob_bytes: usize,

    /// Check the header checksum against a plain MD5 of the container with the
    /// checksum field zeroed. This is not the compiler's signing hash, so
    /// compiler-built blobs always fail it
    #[arg(long, action = clap::ArgAction::SetTrue)]
    structural_md5: bool,

    /// Print a single JSON object instead of text
    #[arg(long, action = clap::ArgAction::SetTrue)]
    json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    input: String,
    size_bytes: usize,
    container: Option<ContainerReport>,
    program: Option<ProgramReport>,
    loaded: bool,
    diagnosis: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContainerReport {
    total_size: u32,
    #[serde(skip)]
    summary: String,
    chunks: Vec<ChunkReport>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChunkReport {
    fourcc: String,
    size_bytes: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProgramReport {
    part: String,
    stage: String,
    shader_model: String,
    dxil_version: String,
    bitcode_bytes: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    run(args)
}

fn run(args: Args) -> anyhow::Result<()> {
    let bytes = fs::read(&args.input)
        .with_context(|| format!("read input {}", args.input.display()))?;

    let config = ConverterConfig::default()
        .with_max_blob_bytes(args.max_blob_bytes)
        .with_structural_md5(args.structural_md5);
    let report = inspect(&args.input, &bytes, config);

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("serialize report")?;
        println!("{json}");
    } else {
        print_text(&report);
    }
    Ok(())
}

fn inspect(input: &Path, bytes: &[u8], config: ConverterConfig) -> Report {
    let mut report = Report {
        input: input.display().to_string(),
        size_bytes: bytes.len(),
        container: None,
        program: None,
        loaded: false,
        diagnosis: None,
    };

    match DxbcFile::parse(bytes) {
        Ok(file) => {
            report.container = Some(ContainerReport {
                total_size: file.header().total_size,
                summary: file.debug_summary(),
                chunks: file
                    .chunks()
                    .map(|chunk| ChunkReport {
                        fourcc: chunk.fourcc.to_string(),
                        size_bytes: chunk.data.len(),
                    })
                    .collect(),
            });
            if let Some(part) = file.dxil_chunk() {
                match parse_dxil_program_header(part.data) {
                    Ok(program) => {
                        let (major, minor) = program.dxil_version_parts();
                        report.program = Some(ProgramReport {
                            part: part.fourcc.to_string(),
                            stage: program.stage.to_string(),
                            shader_model: program.model.to_string(),
                            dxil_version: format!("{major}.{minor}"),
                            bitcode_bytes: program.bitcode.len(),
                        });
                    }
                    Err(err) => tracing::debug!("DXIL program header: {err}"),
                }
            }
        }
        Err(err) => tracing::debug!("not a DXBC container: {err}"),
    }

    let converter = DxilToAir::with_config(config);
    match converter.try_load(bytes) {
        Ok(()) => report.loaded = true,
        Err(err) => report.diagnosis = Some(err.to_string()),
    }
    report
}

fn print_text(report: &Report) {
    println!("input: {} ({} bytes)", report.input, report.size_bytes);

    match &report.container {
        Some(container) => println!("{}", container.summary),
        None => println!("container: none"),
    }

    if let Some(program) = &report.program {
        println!(
            "program: {} {} sm{} dxil{} ({} bitcode bytes)",
            program.part,
            program.stage,
            program.shader_model,
            program.dxil_version,
            program.bitcode_bytes
        );
    }

    match &report.diagnosis {
        Some(reason) => println!("load: failed: {reason}"),
        None => println!("load: ok"),
    }
}
