//! `vm_stat` page counters
//!
//! vm_stat prints lines such as `Pages active:   123456.`. Only the four
//! counters needed for used/free memory are extracted; a counter that is
//! missing from the output counts as zero pages.

use crate::parse::{bytes_to_mb, LabelMatcher};
use std::sync::LazyLock;

/// Page size used to convert page counts to bytes
pub const PAGE_SIZE_BYTES: u64 = 4096;

static ACTIVE: LazyLock<LabelMatcher> = LazyLock::new(|| LabelMatcher::new("Pages active:"));
static WIRED: LazyLock<LabelMatcher> = LazyLock::new(|| LabelMatcher::new("Pages wired down:"));
static INACTIVE: LazyLock<LabelMatcher> = LazyLock::new(|| LabelMatcher::new("Pages inactive:"));
static FREE: LazyLock<LabelMatcher> = LazyLock::new(|| LabelMatcher::new("Pages free:"));

/// Page counts extracted from vm_stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VmStat {
    pub active: u64,
    pub wired: u64,
    pub inactive: u64,
    pub free: u64,
}

impl VmStat {
    /// Parse vm_stat output
    pub fn parse(text: &str) -> Self {
        Self {
            active: page_count(&ACTIVE, text),
            wired: page_count(&WIRED, text),
            inactive: page_count(&INACTIVE, text),
            free: page_count(&FREE, text),
        }
    }

    /// Active plus wired memory in MiB
    pub fn used_mb(&self) -> u64 {
        pages_to_mb(self.active.saturating_add(self.wired))
    }

    /// Free plus inactive memory in MiB
    pub fn free_mb(&self) -> u64 {
        pages_to_mb(self.free.saturating_add(self.inactive))
    }
}

// Counters come straight from tool output; clamp instead of overflowing.
fn pages_to_mb(pages: u64) -> u64 {
    bytes_to_mb(pages.saturating_mul(PAGE_SIZE_BYTES))
}

fn page_count(matcher: &LabelMatcher, text: &str) -> u64 {
    matcher.find(text).unwrap_or_else(|| {
        log::debug!("vm_stat: no '{}' line, assuming 0", matcher.label());
        0
    })
}
