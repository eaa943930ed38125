// Minimal name/date sheet served by DownloadPdf. It has no event, no table
// and no footer.

use chrono::{DateTime, Local};

use super::layout::{Block, Layout, TextStyle};
use crate::types::DISPLAY_TIMESTAMP;

pub const SUMMARY_TITLE: &str = "User Information";

pub fn layout(username: &str, now: DateTime<Local>) -> Layout {
    Layout {
        title: SUMMARY_TITLE.to_string(),
        blocks: vec![
            Block::Paragraph {
                text: SUMMARY_TITLE.to_string(),
                style: TextStyle::Title,
            },
            Block::Rule,
            Block::Paragraph {
                text: format!("Name: {}", username),
                style: TextStyle::Body,
            },
            Block::Paragraph {
                text: format!("Date: {}", now.format(DISPLAY_TIMESTAMP)),
                style: TextStyle::Body,
            },
        ],
    }
}
