//! Output formatting utilities
//!
//! Provides table and JSON output formatting for CLI commands.

use crate::cli::args::OutputFormat;
use crate::domain::{GpuRecord, TelemetrySnapshot};
use serde::Serialize;
use std::io::{self, Write};

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", render(data, format)?)
}

/// Render output in the selected format
pub fn render<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<String> {
    match format {
        OutputFormat::Table => Ok(data.to_table()),
        OutputFormat::Json => serde_json::to_string_pretty(data).map_err(io::Error::from),
        OutputFormat::Compact => Ok(data.to_compact()),
    }
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().replace('\n', " | ")
    }
}

impl TableDisplay for GpuRecord {
    fn to_table(&self) -> String {
        let mut output = format!("[{}] {} ({})\n", self.index, self.name, self.gpu_type);

        if let Some(model) = &self.model {
            output.push_str(&format!("  Model: {}\n", model));
        }
        if let Some(driver) = &self.driver_version {
            output.push_str(&format!("  Driver: {}\n", driver));
        }
        if let Some(cores) = self.cores {
            output.push_str(&format!("  GPU Cores: {}\n", cores));
        }

        output.push_str(&format!("  Temperature: {}°C\n", self.temperature));
        output.push_str(&format!(
            "  Utilization: GPU {}%, Memory {}%\n",
            self.utilization.gpu, self.utilization.memory
        ));
        output.push_str(&format!(
            "  Memory: {} / {} MiB used ({} MiB free)\n",
            self.memory.used, self.memory.total, self.memory.free
        ));
        output.push_str(&format!(
            "  Power: {} / {} W\n",
            self.power.draw, self.power.limit
        ));
        output.push_str(&format!(
            "  Clocks: Graphics {} MHz, Memory {} MHz\n",
            self.clocks.graphics, self.clocks.memory
        ));
        output.push_str(&format!("  Fan: {}%", self.fan.speed));

        output
    }

    fn to_compact(&self) -> String {
        format!(
            "{}:{} {}°C {}% {}/{}MiB",
            self.index,
            self.short_name(),
            self.temperature,
            self.utilization.gpu,
            self.memory.used,
            self.memory.total
        )
    }
}

impl TableDisplay for TelemetrySnapshot {
    fn to_table(&self) -> String {
        let mut output = format!("Platform: {}\n", self.platform);
        output.push_str(&format!("nvidia-smi: {}\n", yes_no(self.has_nvidia_smi)));
        output.push_str(&format!("Apple Silicon GPU: {}\n", yes_no(self.has_mps)));

        if let Some(error) = &self.error {
            output.push_str(&format!("\n✗ {}\n", error));
            return output;
        }

        if self.gpus.is_empty() {
            output.push_str("\nNo GPUs detected\n");
            return output;
        }

        for gpu in &self.gpus {
            output.push('\n');
            output.push_str(&gpu.to_table());
            output.push('\n');
        }

        output
    }

    fn to_compact(&self) -> String {
        if let Some(error) = &self.error {
            return format!("{}: error: {}", self.platform, error);
        }
        if self.gpus.is_empty() {
            return format!("{}: no GPUs", self.platform);
        }
        self.gpus
            .iter()
            .map(|g| g.to_compact())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// GPU list entry for display
#[derive(Debug, Clone, Serialize)]
pub struct GpuListEntry {
    pub index: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub gpu_type: String,
    pub memory_total_mib: Option<u64>,
}

impl From<&GpuRecord> for GpuListEntry {
    fn from(record: &GpuRecord) -> Self {
        Self {
            index: record.index,
            name: record.name.clone(),
            gpu_type: record.gpu_type.to_string(),
            memory_total_mib: record.memory.total.known(),
        }
    }
}

impl TableDisplay for GpuListEntry {
    fn to_table(&self) -> String {
        match self.memory_total_mib {
            Some(total) => format!(
                "[{}] {} ({}, {} MiB)",
                self.index, self.name, self.gpu_type, total
            ),
            None => format!("[{}] {} ({})", self.index, self.name, self.gpu_type),
        }
    }

    fn to_compact(&self) -> String {
        format!("{}:{}", self.index, self.name)
    }
}

/// GPU list for display
#[derive(Debug, Clone, Serialize)]
pub struct GpuList {
    pub platform: String,
    pub gpus: Vec<GpuListEntry>,
}

impl From<&TelemetrySnapshot> for GpuList {
    fn from(snapshot: &TelemetrySnapshot) -> Self {
        Self {
            platform: snapshot.platform.to_string(),
            gpus: snapshot.gpus.iter().map(GpuListEntry::from).collect(),
        }
    }
}

impl TableDisplay for GpuList {
    fn to_table(&self) -> String {
        let mut output = format!("Platform: {}\n", self.platform);
        output.push_str(&format!("GPUs Found: {}\n", self.gpus.len()));

        if !self.gpus.is_empty() {
            output.push('\n');
        }
        for gpu in &self.gpus {
            output.push_str(&gpu.to_table());
            output.push('\n');
        }

        output
    }

    fn to_compact(&self) -> String {
        self.gpus
            .iter()
            .map(|g| g.to_compact())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
