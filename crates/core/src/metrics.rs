//! Metrics collection and reporting for repeated codec runs.
//!
//! This module provides observable insights into codec behavior:
//! - Throughput (bytes in per second)
//! - Compression ratio
//! - Call counts and failures
//! - A checksum of the last output, for comparing variants
//!
//! # Thread Safety
//!
//! `CodecMetrics` is NOT thread-safe. For multi-threaded use, keep one per
//! thread and [`merge`](CodecMetrics::merge) them at the end.

use std::time::{Duration, Instant};

/// Counters and timing for a series of encode or decode calls.
#[derive(Debug, Clone)]
pub struct CodecMetrics {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    // === Calls ===
    /// Successful calls
    pub calls: u64,

    /// Calls that returned an error
    pub failures: u64,

    // === Bytes ===
    /// Total bytes handed to the codec
    pub input_bytes: u64,

    /// Total bytes produced by the codec
    pub output_bytes: u64,

    // === Output ===
    /// CRC-32 of the most recent output
    pub last_checksum: Option<u32>,
}

impl CodecMetrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            calls: 0,
            failures: 0,
            input_bytes: 0,
            output_bytes: 0,
            last_checksum: None,
        }
    }

    /// Record one successful call.
    pub fn record_call(&mut self, input_len: usize, output_len: usize) {
        self.calls += 1;
        self.input_bytes += input_len as u64;
        self.output_bytes += output_len as u64;
    }

    /// Record one failed call.
    pub fn record_failure(&mut self) {
        self.failures += 1;
    }

    /// Remember the checksum of `output`.
    pub fn record_output(&mut self, output: &[u8]) {
        self.last_checksum = Some(crc32fast::hash(output));
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Compute output size relative to input (output / input).
    ///
    /// Returns 0.0 if nothing was processed.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.output_bytes as f64 / self.input_bytes as f64
        }
    }

    /// Compute throughput in input bytes/second.
    pub fn throughput_bps(&self) -> f64 {
        let duration_secs = self.duration().as_secs_f64();
        if duration_secs == 0.0 {
            0.0
        } else {
            self.input_bytes as f64 / duration_secs
        }
    }

    /// Average time per successful call.
    pub fn time_per_call(&self) -> Duration {
        if self.calls == 0 {
            Duration::ZERO
        } else {
            self.duration().div_f64(self.calls as f64)
        }
    }

    /// Fold another run's counters into this one.
    ///
    /// Keeps the earliest start, the latest end, and `other`'s checksum if it
    /// has one.
    pub fn merge(&mut self, other: &CodecMetrics) {
        self.start_time = self.start_time.min(other.start_time);
        self.end_time = match (self.end_time, other.end_time) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        self.calls += other.calls;
        self.failures += other.failures;
        self.input_bytes += other.input_bytes;
        self.output_bytes += other.output_bytes;
        if other.last_checksum.is_some() {
            self.last_checksum = other.last_checksum;
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self, label: &str) {
        println!("\n=== {} ===", label);
        println!("Duration: {} ms", self.duration().as_millis());
        println!("Calls: {} ({} failed)", self.calls, self.failures);
        println!("Time per call: {} ns", self.time_per_call().as_nanos());
        println!();
        println!("Input:  {} bytes", self.input_bytes);
        println!("Output: {} bytes", self.output_bytes);
        println!("Ratio: {:.1}%", self.compression_ratio() * 100.0);
        match self.last_checksum {
            Some(crc) => println!("Output CRC-32: {:#010x}", crc),
            None => println!("Output CRC-32: (none)"),
        }
        println!();
        println!("Throughput: {:.2} MB/s", self.throughput_bps() / 1_000_000.0);
        println!();
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             calls={}\n\
             failures={}\n\
             input_bytes={}\n\
             output_bytes={}\n\
             compression_ratio={:.4}\n\
             checksum={}\n",
            self.duration().as_millis(),
            self.calls,
            self.failures,
            self.input_bytes,
            self.output_bytes,
            self.compression_ratio(),
            self.last_checksum
                .map_or_else(|| "none".to_string(), |c| format!("{:08x}", c)),
        )
    }
}

impl Default for CodecMetrics {
    fn default() -> Self {
        Self::new()
    }
}
