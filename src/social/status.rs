//! Status-to-label mapping.
//!
//! Backend lifecycle enums map to a display label and a tag color through a
//! fixed table; no other part of the system interprets statuses.

use crate::api::types::{ContributionStatus, TicketStatus};
use crate::social::text::titleize;

/// Color of a status tag on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagColor {
    Green,
    Blue,
    Orange,
    Purple,
    Pink,
    Gray,
}

/// A status rendered for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTag {
    pub label: String,
    pub color: TagColor,
}

impl StatusTag {
    pub fn new(label: impl Into<String>, color: TagColor) -> Self {
        Self {
            label: label.into(),
            color,
        }
    }
}

/// Ticket statuses: open tickets get the green treatment.
pub fn ticket_status_tag(status: TicketStatus) -> StatusTag {
    match status {
        TicketStatus::Open => StatusTag::new("Open", TagColor::Green),
        TicketStatus::Closed => StatusTag::new("Closed", TagColor::Gray),
    }
}

/// Contribution statuses. `closed` reads as "Archived" in the product.
pub fn contribution_status_tag(status: ContributionStatus) -> StatusTag {
    match status {
        ContributionStatus::Draft => StatusTag::new(titleize("draft"), TagColor::Gray),
        ContributionStatus::InReview => StatusTag::new("In Review", TagColor::Blue),
        ContributionStatus::Merged => StatusTag::new(titleize("merged"), TagColor::Purple),
        ContributionStatus::Closed => StatusTag::new("Archived", TagColor::Orange),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_open_is_green() {
        assert_eq!(
            ticket_status_tag(TicketStatus::Open),
            StatusTag::new("Open", TagColor::Green)
        );
    }

    #[test]
    fn test_ticket_closed_is_gray() {
        assert_eq!(
            ticket_status_tag(TicketStatus::Closed),
            StatusTag::new("Closed", TagColor::Gray)
        );
    }

    #[test]
    fn test_contribution_in_review_is_blue() {
        assert_eq!(
            contribution_status_tag(ContributionStatus::InReview),
            StatusTag::new("In Review", TagColor::Blue)
        );
    }

    #[test]
    fn test_contribution_closed_reads_archived() {
        assert_eq!(
            contribution_status_tag(ContributionStatus::Closed),
            StatusTag::new("Archived", TagColor::Orange)
        );
    }

    #[test]
    fn test_contribution_merged_is_purple() {
        assert_eq!(
            contribution_status_tag(ContributionStatus::Merged),
            StatusTag::new("Merged", TagColor::Purple)
        );
    }

    #[test]
    fn test_contribution_draft_is_gray() {
        assert_eq!(
            contribution_status_tag(ContributionStatus::Draft),
            StatusTag::new("Draft", TagColor::Gray)
        );
    }
}
