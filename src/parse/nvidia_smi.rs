//! nvidia-smi CSV parser
//!
//! Parses the output of `nvidia-smi --query-gpu=<QUERY_FIELDS>
//! --format=csv,noheader,nounits`, one GPU per line.

use crate::domain::{GpuRecord, GpuType, Metric};
use crate::error::ParseError;

/// Queried columns, in output order
pub const QUERY_FIELDS: [&str; 14] = [
    "index",
    "name",
    "driver_version",
    "temperature.gpu",
    "utilization.gpu",
    "utilization.memory",
    "memory.total",
    "memory.free",
    "memory.used",
    "power.draw",
    "power.limit",
    "clocks.gr",
    "clocks.mem",
    "fan.speed",
];

/// CSV without header row or unit suffixes
pub const FORMAT_ARGUMENT: &str = "--format=csv,noheader,nounits";

/// The `--query-gpu=...` argument for [`QUERY_FIELDS`]
pub fn query_argument() -> String {
    format!("--query-gpu={}", QUERY_FIELDS.join(","))
}

/// Parse one CSV row into a `cuda` record
///
/// Numeric columns the tool cannot report (`[N/A]`, `[Not Supported]`)
/// become `Metric::Unknown`. Fan speed falls back to 0 instead, which
/// covers GPUs without a fan sensor.
pub fn parse_line(line: &str) -> Result<GpuRecord, ParseError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < QUERY_FIELDS.len() {
        return Err(ParseError::MissingField {
            field: QUERY_FIELDS[fields.len()],
            line: line.to_string(),
        });
    }

    let index = fields[0]
        .parse::<u32>()
        .map_err(|_| ParseError::InvalidNumber {
            field: QUERY_FIELDS[0],
            value: fields[0].to_string(),
        })?;

    let mut record = GpuRecord::new(index, fields[1], GpuType::Cuda);
    if is_reported(fields[2]) {
        record = record.with_driver_version(fields[2]);
    }

    record.temperature = Metric::parse_field(fields[3]);
    record.utilization.gpu = Metric::parse_field(fields[4]);
    record.utilization.memory = Metric::parse_field(fields[5]);
    record.memory.total = Metric::parse_field(fields[6]);
    record.memory.free = Metric::parse_field(fields[7]);
    record.memory.used = Metric::parse_field(fields[8]);
    record.power.draw = Metric::parse_field(fields[9]);
    record.power.limit = Metric::parse_field(fields[10]);
    record.clocks.graphics = Metric::parse_field(fields[11]);
    record.clocks.memory = Metric::parse_field(fields[12]);
    record.fan.speed = Metric::Known(fields[13].parse().unwrap_or(0));

    Ok(record)
}

/// Parse every non-empty row, dropping malformed ones with a warning
pub fn parse_output(stdout: &str) -> Vec<GpuRecord> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match parse_line(line) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Skipping malformed nvidia-smi row: {}", e);
                None
            }
        })
        .collect()
}

fn is_reported(value: &str) -> bool {
    !value.is_empty() && !value.starts_with('[')
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str =
        "0, Test GPU, 525.60, 45, 10, 5, 8192, 6000, 2192, 50.5, 150.0, 1500, 7000, 30";

    #[test]
    fn test_query_argument() {
        let arg = query_argument();
        assert!(arg.starts_with("--query-gpu=index,name,driver_version,"));
        assert!(arg.ends_with(",clocks.gr,clocks.mem,fan.speed"));
    }

    #[test]
    fn test_parse_sample_line() {
        let record = parse_line(SAMPLE).unwrap();
        assert_eq!(record.index, 0);
        assert_eq!(record.name, "Test GPU");
        assert_eq!(record.driver_version.as_deref(), Some("525.60"));
        assert_eq!(record.temperature, Metric::Known(45));
        assert_eq!(record.utilization.gpu, Metric::Known(10));
        assert_eq!(record.utilization.memory, Metric::Known(5));
        assert_eq!(record.memory.total, Metric::Known(8192));
        assert_eq!(record.memory.free, Metric::Known(6000));
        assert_eq!(record.memory.used, Metric::Known(2192));
        assert_eq!(record.power.draw, Metric::Known(50.5));
        assert_eq!(record.power.limit, Metric::Known(150.0));
        assert_eq!(record.clocks.graphics, Metric::Known(1500));
        assert_eq!(record.clocks.memory, Metric::Known(7000));
        assert_eq!(record.fan.speed, Metric::Known(30));
        assert_eq!(record.gpu_type, GpuType::Cuda);
        assert!(record.model.is_none());
        assert!(record.cores.is_none());
    }

    #[test]
    fn test_empty_fan_defaults_to_zero() {
        let line = "0, Test GPU, 525.60, 45, 10, 5, 8192, 6000, 2192, 50.5, 150.0, 1500, 7000, ";
        let record = parse_line(line).unwrap();
        assert_eq!(record.fan.speed, Metric::Known(0));
    }

    #[test]
    fn test_not_available_fan_defaults_to_zero() {
        let line =
            "1, NVIDIA A100-SXM4-40GB, 535.54, 33, 0, 0, 40960, 40327, 0, 55.1, 400.0, 210, 1215, [N/A]";
        let record = parse_line(line).unwrap();
        assert_eq!(record.fan.speed, Metric::Known(0));
        assert_eq!(record.index, 1);
    }

    #[test]
    fn test_not_available_numeric_becomes_unknown() {
        let line = "0, Test GPU, 525.60, 45, [N/A], [N/A], 8192, 6000, 2192, [N/A], [N/A], 1500, 7000, 30";
        let record = parse_line(line).unwrap();
        assert_eq!(record.utilization.gpu, Metric::Unknown);
        assert_eq!(record.power.draw, Metric::Unknown);
        assert_eq!(record.power.limit, Metric::Unknown);
        assert_eq!(record.temperature, Metric::Known(45));
    }

    #[test]
    fn test_missing_driver_version() {
        let line = "0, Test GPU, [N/A], 45, 10, 5, 8192, 6000, 2192, 50.5, 150.0, 1500, 7000, 30";
        let record = parse_line(line).unwrap();
        assert!(record.driver_version.is_none());
    }

    #[test]
    fn test_short_line_is_rejected() {
        let err = parse_line("0, Test GPU, 525.60").unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingField {
                field: "temperature.gpu",
                ..
            }
        ));
    }

    #[test]
    fn test_bad_index_is_rejected() {
        let line = "x, Test GPU, 525.60, 45, 10, 5, 8192, 6000, 2192, 50.5, 150.0, 1500, 7000, 30";
        assert!(matches!(
            parse_line(line),
            Err(ParseError::InvalidNumber { field: "index", .. })
        ));
    }

    #[test]
    fn test_parse_output_multiple_gpus() {
        let stdout = format!(
            "{}\n1, Second GPU, 525.60, 50, 20, 10, 16384, 8000, 8384, 100.25, 250.0, 1800, 9000, 45\n\n",
            SAMPLE
        );
        let records = parse_output(&stdout);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "Second GPU");
        assert_eq!(records[1].power.draw, Metric::Known(100.25));
    }

    #[test]
    fn test_parse_output_skips_malformed_rows() {
        let stdout = format!("garbage\n{}\n", SAMPLE);
        let records = parse_output(&stdout);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Test GPU");
    }
}
