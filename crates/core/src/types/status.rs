//! Order status as reported by the order service.

use serde::{Deserialize, Serialize};

/// Status of a completed order.
///
/// The backend reports a free-form uppercase tag. The client only
/// distinguishes freshly created orders from everything else, so unknown
/// tags deserialize into [`OrderStatus::Other`] instead of failing the
/// whole order list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order was accepted and is being processed.
    #[default]
    Created,
    /// Any other backend status tag.
    #[serde(other)]
    Other,
}

impl OrderStatus {
    /// Whether the order is in the freshly created state.
    #[must_use]
    pub const fn is_created(self) -> bool {
        matches!(self, Self::Created)
    }

    /// Uppercase tag for display.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Other => "PROCESSED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_created_deserializes() {
        let status: OrderStatus = serde_json::from_str("\"CREATED\"").unwrap();
        assert_eq!(status, OrderStatus::Created);
        assert!(status.is_created());
    }

    #[test]
    fn test_unknown_tags_map_to_other() {
        let status: OrderStatus = serde_json::from_str("\"SHIPPED\"").unwrap();
        assert_eq!(status, OrderStatus::Other);
        assert!(!status.is_created());
    }
}
