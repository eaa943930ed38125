/// Visual weight of a paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Title,
    Heading,
    Body,
}

/// Two-column table with a header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: [String; 2],
    pub rows: Vec<[String; 2]>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph { text: String, style: TextStyle },
    /// Horizontal separator line
    Rule,
    /// One empty body line
    Spacer,
    Table(Table),
}

/// Page content, top to bottom. `title` goes into the document metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Layout {
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Table(table) => Some(table),
            _ => None,
        })
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Paragraph { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
