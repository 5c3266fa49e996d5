//! `sysctl -n` scalar values

use crate::error::ParseError;

/// Key holding the CPU brand string
pub const CPU_BRAND_KEY: &str = "machdep.cpu.brand_string";

/// Key holding physical memory in bytes
pub const MEMSIZE_KEY: &str = "hw.memsize";

/// Brand prefix shared by every Apple Silicon chip ("Apple M1", "Apple M2 Pro", ...)
pub const APPLE_SILICON_PREFIX: &str = "Apple M";

/// Trimmed CPU brand string
pub fn parse_brand(stdout: &str) -> &str {
    stdout.trim()
}

/// Whether a CPU brand string names an Apple Silicon chip
pub fn is_apple_silicon(brand: &str) -> bool {
    brand.trim().starts_with(APPLE_SILICON_PREFIX)
}

/// Physical memory size in bytes
pub fn parse_memsize(stdout: &str) -> Result<u64, ParseError> {
    let value = stdout.trim();
    value.parse().map_err(|_| ParseError::InvalidNumber {
        field: MEMSIZE_KEY,
        value: value.to_string(),
    })
}
