//! LIMIT records.

use crate::error::{QbError, QbResult};

/// Offset used by [`Limit::default`].
pub const DEFAULT_OFFSET: u64 = 0;
/// Amount used by [`Limit::default`].
pub const DEFAULT_AMOUNT: u64 = 25;

/// `LIMIT offset, amount`.
///
/// Both parts must be present for the limit to render; the renderer rejects an
/// amount without an offset and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub offset: Option<u64>,
    pub amount: Option<u64>,
}

impl Limit {
    /// Create a limit from optional parts. `amount` must be at least 1.
    pub fn new(offset: Option<u64>, amount: Option<u64>) -> QbResult<Self> {
        if amount == Some(0) {
            return Err(QbError::InvalidLimit);
        }
        Ok(Self { offset, amount })
    }

    /// Both parts present.
    pub fn page(offset: u64, amount: u64) -> QbResult<Self> {
        Self::new(Some(offset), Some(amount))
    }

    /// Render as `LIMIT offset, amount`, or `None` when neither part is set.
    pub(crate) fn to_sql(self) -> QbResult<Option<String>> {
        match (self.offset, self.amount) {
            (Some(offset), Some(amount)) => Ok(Some(format!("LIMIT {offset}, {amount}"))),
            (None, Some(_)) => Err(QbError::AmountWithoutOffset),
            (Some(_), None) => Err(QbError::OffsetWithoutAmount),
            (None, None) => Ok(None),
        }
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self {
            offset: Some(DEFAULT_OFFSET),
            amount: Some(DEFAULT_AMOUNT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_amount_is_rejected() {
        assert!(matches!(Limit::page(0, 0), Err(QbError::InvalidLimit)));
    }

    #[test]
    fn renders_only_complete_limits() {
        assert_eq!(
            Limit::page(0, 10).unwrap().to_sql().unwrap().as_deref(),
            Some("LIMIT 0, 10")
        );
        assert_eq!(Limit::new(None, None).unwrap().to_sql().unwrap(), None);
        assert!(matches!(
            Limit::new(None, Some(10)).unwrap().to_sql(),
            Err(QbError::AmountWithoutOffset)
        ));
        assert!(matches!(
            Limit::new(Some(5), None).unwrap().to_sql(),
            Err(QbError::OffsetWithoutAmount)
        ));
    }

    #[test]
    fn default_is_first_page_of_25() {
        assert_eq!(Limit::default(), Limit::page(0, 25).unwrap());
    }
}
