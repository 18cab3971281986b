//! huffbench: time one path of the static HPACK Huffman codec.
//!
//! Reads (or generates) one input, runs a warm-up call, then runs the
//! selected encoder or decoder `count` times into a 16 KiB buffer.

mod config;
mod input_gen;

use std::process;

use config::{BenchConfig, BenchMode, MAX_INPUT_BYTES, OUTPUT_CAPACITY};
use hpack_huffman_core::{
    decode_to_slice, encode, encode_pairs, encode_to_slice, encode_to_vec, ChainConfig,
    ChunkChain, CodecMetrics, Decoder, Error, FixedBuf, Result,
};
use tracing::{debug, error, info, warn};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match BenchConfig::from_args(&args) {
        Ok(Some(config)) => config,
        Ok(None) => return,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("run with --help for usage");
            process::exit(2);
        }
    };

    if config.print_config {
        config.print();
    }

    if let Err(e) = run(&config) {
        error!(error = %e, kind = ?e.kind(), "bench aborted");
        process::exit(1);
    }
}

/// Load the input and run the bench loop.
fn run(config: &BenchConfig) -> Result<()> {
    let input = load_input(config)?;
    info!(mode = %config.mode, input_bytes = input.len(), count = config.count, "starting bench");

    let mut out = vec![0u8; OUTPUT_CAPACITY];
    // Same shape as a one-buffer nghttp2 bufs: one 16 KiB chunk, kept on reset.
    let mut chain = ChunkChain::new(ChainConfig::single(OUTPUT_CAPACITY))?;

    // A failing warm-up means every timed call would fail too.
    let warm = run_once(config, &input, &mut out, &mut chain)?;
    debug!(output_bytes = warm, "warm-up done");

    let mut metrics = CodecMetrics::new();
    let mut last_len = None;
    for _ in 0..config.count {
        match run_once(config, &input, &mut out, &mut chain) {
            Ok(n) => {
                metrics.record_call(input.len(), n);
                last_len = Some(n);
            }
            Err(e) => {
                debug!(error = %e, "call failed");
                metrics.record_failure();
            }
        }
    }
    metrics.complete();

    if let Some(n) = last_len {
        metrics.record_output(&out[..n]);
    }

    if metrics.failures > 0 {
        warn!(failures = metrics.failures, "some calls failed");
    }
    info!(
        calls = metrics.calls,
        elapsed_ms = metrics.duration().as_millis() as u64,
        "bench finished"
    );

    if config.print_metrics {
        metrics.print_summary(&format!("huffbench {}", config.mode));
    }

    Ok(())
}

/// Read the input file, or generate a sample.
///
/// Decode modes need Huffman input, so a generated sample is encoded first.
fn load_input(config: &BenchConfig) -> Result<Vec<u8>> {
    match &config.input_file {
        Some(path) => {
            let data = std::fs::read(path)?;
            if data.is_empty() || data.len() >= MAX_INPUT_BYTES {
                return Err(Error::Config(format!(
                    "input file is either too short or too long ({} bytes, limit {})",
                    data.len(),
                    MAX_INPUT_BYTES - 1
                )));
            }
            Ok(data)
        }
        None => {
            let sample = input_gen::generate_sample_data(config.seed, config.sample_bytes);
            if config.mode.is_decode() {
                Ok(encode_to_vec(&sample))
            } else {
                Ok(sample)
            }
        }
    }
}

/// One call of the selected codec path. Returns the output length in `out`.
fn run_once(
    config: &BenchConfig,
    input: &[u8],
    out: &mut [u8],
    chain: &mut ChunkChain,
) -> Result<usize> {
    match config.mode {
        BenchMode::Single => encode_to_slice(input, out),
        BenchMode::Pair => {
            let mut sink = FixedBuf::new(out);
            encode_pairs(input, &mut sink)
        }
        BenchMode::Chain => {
            let encoded = encode(input, chain);
            let result = match encoded {
                Ok(_) => chain.copy_to(out).map_err(Error::from),
                Err(e) => Err(e),
            };
            chain.reset();
            result
        }
        BenchMode::Final => decode_to_slice(input, out),
        BenchMode::Chunked => {
            let mut sink = FixedBuf::new(out);
            let mut decoder = Decoder::new();
            for piece in input.chunks(config.chunk_bytes) {
                decoder.feed(piece, &mut sink)?;
            }
            decoder.finish(&mut sink)?;
            Ok(sink.filled().len())
        }
    }
}
