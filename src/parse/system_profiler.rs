//! `system_profiler SPDisplaysDataType` core count

use crate::error::ParseError;
use crate::parse::LabelMatcher;
use std::sync::LazyLock;

/// Data type argument for the displays report
pub const DISPLAYS_DATA_TYPE: &str = "SPDisplaysDataType";

static CORES: LazyLock<LabelMatcher> =
    LazyLock::new(|| LabelMatcher::new("Total Number of Cores:"));

/// Integrated GPU core count from the displays report
pub fn parse_core_count(text: &str) -> Result<u32, ParseError> {
    let cores = CORES.require(text)?;
    u32::try_from(cores).map_err(|_| ParseError::InvalidNumber {
        field: "Total Number of Cores",
        value: cores.to_string(),
    })
}
