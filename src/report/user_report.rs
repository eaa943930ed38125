// Full registration report returned by SendDataToDB.

use chrono::{DateTime, Local};

use super::layout::{Block, Layout, Table, TextStyle};
use crate::types::{UserEvent, DISPLAY_TIMESTAMP};

pub const REPORT_TITLE: &str = "User Information Report";

pub const HEADER: [&str; 2] = ["Field", "Value"];
pub const ROW_LABELS: [&str; 4] = ["Name", "Email", "Age", "Created"];

/// Title, separator, field/value table, footer
pub fn layout(event: &UserEvent, generated_at: DateTime<Local>) -> Layout {
    let values = [
        event.username.clone(),
        event.email.clone(),
        event.age.to_string(),
        event.timestamp.format(DISPLAY_TIMESTAMP).to_string(),
    ];

    let rows = ROW_LABELS
        .iter()
        .zip(values)
        .map(|(label, value)| [label.to_string(), value])
        .collect();

    Layout {
        title: REPORT_TITLE.to_string(),
        blocks: vec![
            Block::Paragraph {
                text: REPORT_TITLE.to_string(),
                style: TextStyle::Title,
            },
            Block::Rule,
            Block::Table(Table {
                header: HEADER.map(str::to_string),
                rows,
            }),
            Block::Spacer,
            Block::Paragraph {
                text: format!("Generated on: {}", generated_at.format(DISPLAY_TIMESTAMP)),
                style: TextStyle::Body,
            },
        ],
    }
}
