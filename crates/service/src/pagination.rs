//! Pagination utilities for service layer
//!
//! Query-string offsets and page sizes are untrusted: they arrive as signed
//! integers and are clamped here before reaching the store.

/// Pagination parameters
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    /// rows to skip
    pub offset: i64,
    /// rows per page
    pub limit: i64,
}

impl Pagination {
    pub const MAX_LIMIT: i64 = 100;

    pub fn new(offset: i64, limit: i64) -> Self { Self { offset, limit } }

    /// Clamp to sane bounds and convert to `u64`
    pub fn normalize(self) -> (u64, u64) {
        let offset = self.offset.max(0) as u64;
        let limit = self.limit.clamp(1, Self::MAX_LIMIT) as u64;
        (offset, limit)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { offset: 0, limit: 5 } }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn normalize_clamps_negatives() {
        let (offset, limit) = Pagination::new(-10, -1).normalize();
        assert_eq!(offset, 0);
        assert_eq!(limit, 1);
    }

    #[test]
    fn normalize_clamps_upper_bound() {
        let (offset, limit) = Pagination::new(40, 1000).normalize();
        assert_eq!(offset, 40);
        assert_eq!(limit, 100);
    }

    #[test]
    fn default_values_are_sane() {
        let d = Pagination::default();
        assert_eq!(d.offset, 0);
        assert_eq!(d.limit, 5);
    }
}
