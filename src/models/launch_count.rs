/// Outcome of reading one integer field from a platform usage record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRead {
    Value(i64),
    /// The field does not exist on this platform revision
    Missing,
    /// The field exists but could not be read
    Unreadable(String),
}

/// Launch count extracted from an aggregated usage record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchCount {
    Known(u32),
    Unknown,
}

impl LaunchCount {
    /// Count reported to the shell; an unknown count reads as zero launches
    pub fn or_zero(self) -> u32 {
        match self {
            LaunchCount::Known(count) => count,
            LaunchCount::Unknown => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_zero() {
        assert_eq!(LaunchCount::Known(12).or_zero(), 12);
        assert_eq!(LaunchCount::Unknown.or_zero(), 0);
    }
}
