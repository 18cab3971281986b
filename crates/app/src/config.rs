//! Configuration for the huffbench application.
//!
//! Handles parsing command-line arguments and filling in defaults
//! (including a generated sample input that is reproducible with a seed).
//!
//! # Philosophy
//!
//! The tool should work with ZERO arguments, using sensible defaults.
//! The resolved configuration can be printed so runs are reproducible.

use std::fmt;
use std::path::PathBuf;

/// Largest input the bench accepts, exclusive.
pub const MAX_INPUT_BYTES: usize = 0x1000;

/// Capacity of the output buffer every call writes into.
pub const OUTPUT_CAPACITY: usize = 0x4000;

/// Which codec path each timed call exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchMode {
    /// Encode one symbol per lookup into a fixed buffer
    Single,
    /// Encode two symbols per lookup into a fixed buffer
    Pair,
    /// Encode into a single-chunk chain, reset after every call
    Chain,
    /// Decode the whole input in one final call
    Final,
    /// Decode in resumable pieces, then finish
    Chunked,
}

impl BenchMode {
    pub const ALL: [BenchMode; 5] = [
        BenchMode::Single,
        BenchMode::Pair,
        BenchMode::Chain,
        BenchMode::Final,
        BenchMode::Chunked,
    ];

    /// Parse a mode name, ignoring case.
    pub fn parse(name: &str) -> Result<Self, String> {
        let lower = name.to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|mode| mode.name() == lower)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|m| m.name()).collect();
                format!("unknown mode: {} (valid: {})", name, valid.join(", "))
            })
    }

    pub fn name(&self) -> &'static str {
        match self {
            BenchMode::Single => "single",
            BenchMode::Pair => "pair",
            BenchMode::Chain => "chain",
            BenchMode::Final => "final",
            BenchMode::Chunked => "chunked",
        }
    }

    /// True for the modes that read Huffman-encoded input.
    pub fn is_decode(&self) -> bool {
        matches!(self, BenchMode::Final | BenchMode::Chunked)
    }
}

impl fmt::Display for BenchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Complete configuration for a bench run.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    // === Input ===
    /// Input file path (None = generate sample)
    pub input_file: Option<PathBuf>,

    /// Size of the generated sample
    pub sample_bytes: usize,

    /// Seed for the generated sample
    pub seed: u64,

    // === Run ===
    /// Codec path to time
    pub mode: BenchMode,

    /// Timed iterations, after one warm-up call
    pub count: u64,

    /// Bytes per resumable call in chunked mode
    pub chunk_bytes: usize,

    // === Behavior ===
    /// Whether to print detailed config
    pub print_config: bool,

    /// Whether to print the metrics summary
    pub print_metrics: bool,
}

impl BenchConfig {
    /// Parse configuration from command-line arguments (program name
    /// excluded).
    ///
    /// Returns `Ok(None)` when help was requested.
    pub fn from_args(args: &[String]) -> Result<Option<Self>, String> {
        let mut input_file: Option<PathBuf> = None;
        let mut seed: Option<u64> = None;
        let mut sample_bytes: usize = 1024;
        let mut mode = BenchMode::Single;
        let mut count: u64 = 1;
        let mut chunk_bytes: usize = 16;
        let mut print_config = false;
        let mut print_metrics = true;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--in" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--in requires a path".to_string());
                    }
                    input_file = Some(PathBuf::from(&args[i]));
                }
                "--count" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--count requires a number".to_string());
                    }
                    count = args[i].parse().map_err(|_| "invalid count")?;
                }
                "--mode" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--mode requires a name".to_string());
                    }
                    mode = BenchMode::parse(&args[i])?;
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--sample-bytes" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--sample-bytes requires a number".to_string());
                    }
                    sample_bytes = args[i].parse().map_err(|_| "invalid sample-bytes")?;
                }
                "--chunk" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--chunk requires a number".to_string());
                    }
                    chunk_bytes = args[i].parse().map_err(|_| "invalid chunk")?;
                }
                "--print-config" => {
                    print_config = true;
                }
                "--no-metrics" => {
                    print_metrics = false;
                }
                "--help" | "-h" => {
                    print_help();
                    return Ok(None);
                }
                _ => {
                    return Err(format!("unknown argument: {}", args[i]));
                }
            }
            i += 1;
        }

        if chunk_bytes == 0 {
            return Err("--chunk must be at least 1".to_string());
        }
        if input_file.is_none() && (sample_bytes == 0 || sample_bytes >= MAX_INPUT_BYTES) {
            return Err(format!(
                "--sample-bytes must be between 1 and {}",
                MAX_INPUT_BYTES - 1
            ));
        }

        // Determine seed (explicit or time-based)
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

        Ok(Some(BenchConfig {
            input_file,
            sample_bytes,
            seed,
            mode,
            // A zero count still runs once.
            count: count.max(1),
            chunk_bytes,
            print_config,
            print_metrics,
        }))
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        match &self.input_file {
            Some(path) => println!("Input file:  {}", path.display()),
            None => println!(
                "Input file:  (generate {} byte sample, seed {})",
                self.sample_bytes, self.seed
            ),
        }
        println!("Mode: {}", self.mode);
        println!("Iterations: {}", self.count);
        if self.mode == BenchMode::Chunked {
            println!("Chunk size: {} bytes", self.chunk_bytes);
        }
        println!("Output capacity: {} bytes", OUTPUT_CAPACITY);
        println!();
    }
}

fn print_help() {
    println!("huffbench: Time the static HPACK Huffman codec");
    println!();
    println!("USAGE:");
    println!("    huffbench [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --in <PATH>             Input file, under 4096 bytes (default: generate sample)");
    println!("    --count <N>             Timed iterations (default: 1)");
    println!("    --mode <MODE>           single | pair | chain | final | chunked (default: single)");
    println!("    --seed <N>              Random seed for the generated sample");
    println!("    --sample-bytes <N>      Generated sample size (default: 1024)");
    println!("    --chunk <N>             Bytes per call in chunked mode (default: 16)");
    println!();
    println!("    --print-config          Print resolved configuration");
    println!("    --no-metrics            Don't print metrics summary");
    println!("    --help, -h              Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    huffbench --count 100000                     # Encode a sample");
    println!("    huffbench --mode pair --seed 42 --count 1000 # Pair encoder, fixed sample");
    println!("    huffbench --in packed.bin --mode final       # Decode a file");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn parse(list: &[&str]) -> BenchConfig {
        BenchConfig::from_args(&args(list)).unwrap().unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]);
        assert!(config.input_file.is_none());
        assert_eq!(config.mode, BenchMode::Single);
        assert_eq!(config.count, 1);
        assert_eq!(config.sample_bytes, 1024);
        assert_eq!(config.chunk_bytes, 16);
        assert!(config.print_metrics);
    }

    #[test]
    fn test_full_arguments() {
        let config = parse(&[
            "--in", "hdr.bin", "--count", "500", "--mode", "Chunked", "--seed", "42", "--chunk",
            "3", "--print-config", "--no-metrics",
        ]);
        assert_eq!(config.input_file, Some(PathBuf::from("hdr.bin")));
        assert_eq!(config.count, 500);
        assert_eq!(config.mode, BenchMode::Chunked);
        assert_eq!(config.seed, 42);
        assert_eq!(config.chunk_bytes, 3);
        assert!(config.print_config);
        assert!(!config.print_metrics);
    }

    #[test]
    fn test_zero_count_runs_once() {
        assert_eq!(parse(&["--count", "0"]).count, 1);
    }

    #[test]
    fn test_mode_names() {
        for mode in BenchMode::ALL {
            assert_eq!(BenchMode::parse(mode.name()), Ok(mode));
        }
        assert_eq!(BenchMode::parse("PAIR"), Ok(BenchMode::Pair));
        assert!(BenchMode::Final.is_decode());
        assert!(!BenchMode::Chain.is_decode());

        let err = BenchMode::parse("zip").unwrap_err();
        assert!(err.contains("single, pair, chain, final, chunked"));
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(BenchConfig::from_args(&args(&["--count"])).is_err());
        assert!(BenchConfig::from_args(&args(&["--count", "many"])).is_err());
        assert!(BenchConfig::from_args(&args(&["--chunk", "0"])).is_err());
        assert!(BenchConfig::from_args(&args(&["--sample-bytes", "4096"])).is_err());
        assert!(BenchConfig::from_args(&args(&["--frobnicate"])).is_err());
    }
}
