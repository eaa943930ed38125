// Minimal single-page PDF writer for the fixed report layouts.
// Uses the standard Helvetica fonts, so no font files are embedded.

use chrono::{DateTime, Local};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, StringFormat, Stream};

use super::layout::{Block, Layout, Table, TextStyle};
use super::ArtifactError;

// A4 in points
const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 50.0;

const TABLE_WIDTH_RATIO: f32 = 0.9;
const TABLE_SPACING: f32 = 10.0;
const CELL_PADDING: f32 = 5.0;

const REGULAR_FONT: &[u8] = b"F1";
const BOLD_FONT: &[u8] = b"F2";

#[derive(Clone, Copy)]
struct Rgb(f32, f32, f32);

const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);
const DARK_GRAY: Rgb = Rgb(0.25, 0.25, 0.25);
const LIGHT_GRAY: Rgb = Rgb(0.75, 0.75, 0.75);

struct Font {
    name: &'static [u8],
    size: f32,
    color: Rgb,
}

impl TextStyle {
    fn font(self) -> Font {
        match self {
            TextStyle::Title => Font { name: BOLD_FONT, size: 16.0, color: DARK_GRAY },
            TextStyle::Heading => Font { name: BOLD_FONT, size: 12.0, color: DARK_GRAY },
            TextStyle::Body => Font { name: REGULAR_FONT, size: 11.0, color: BLACK },
        }
    }
}

/// Lays blocks out top to bottom and collects the content stream operations
struct Canvas {
    operations: Vec<Operation>,
    cursor_y: f32,
}

impl Canvas {
    fn new() -> Self {
        Self {
            operations: Vec::new(),
            cursor_y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.operations.push(Operation::new(operator, operands));
    }

    fn fill_color(&mut self, color: Rgb) {
        self.push("rg", vec![color.0.into(), color.1.into(), color.2.into()]);
    }

    fn stroke_color(&mut self, color: Rgb) {
        self.push("RG", vec![color.0.into(), color.1.into(), color.2.into()]);
    }

    fn text_at(&mut self, x: f32, y: f32, text: &str, font: &Font) {
        self.fill_color(font.color);
        self.push("BT", vec![]);
        self.push("Tf", vec![Object::Name(font.name.to_vec()), font.size.into()]);
        self.push("Td", vec![x.into(), y.into()]);
        self.push("Tj", vec![Object::String(latin1(text), StringFormat::Literal)]);
        self.push("ET", vec![]);
    }

    fn paragraph(&mut self, text: &str, style: TextStyle) {
        let font = style.font();
        let line_height = font.size * 1.5;
        self.cursor_y -= line_height;
        self.text_at(MARGIN, self.cursor_y, text, &font);
    }

    fn rule(&mut self) {
        self.cursor_y -= 8.0;
        self.stroke_color(DARK_GRAY);
        self.push("w", vec![0.75f32.into()]);
        self.push("m", vec![MARGIN.into(), self.cursor_y.into()]);
        self.push("l", vec![(PAGE_WIDTH - MARGIN).into(), self.cursor_y.into()]);
        self.push("S", vec![]);
        self.cursor_y -= 4.0;
    }

    fn spacer(&mut self) {
        self.cursor_y -= TextStyle::Body.font().size * 1.5;
    }

    fn table(&mut self, table: &Table) {
        let content_width = PAGE_WIDTH - 2.0 * MARGIN;
        let width = content_width * TABLE_WIDTH_RATIO;
        let left = MARGIN + (content_width - width) / 2.0;
        let column_width = width / 2.0;

        self.cursor_y -= TABLE_SPACING;

        self.row(left, column_width, &table.header, TextStyle::Heading, Some(LIGHT_GRAY));
        for row in &table.rows {
            self.row(left, column_width, row, TextStyle::Body, None);
        }

        self.cursor_y -= TABLE_SPACING;
    }

    fn row(&mut self, left: f32, column_width: f32, cells: &[String; 2], style: TextStyle, background: Option<Rgb>) {
        let font = style.font();
        let height = font.size + 2.0 * CELL_PADDING + 2.0;
        let bottom = self.cursor_y - height;

        for (index, text) in cells.iter().enumerate() {
            let x = left + column_width * index as f32;

            if let Some(color) = background {
                self.fill_color(color);
                self.push("re", vec![x.into(), bottom.into(), column_width.into(), height.into()]);
                self.push("f", vec![]);
            }

            self.stroke_color(BLACK);
            self.push("w", vec![0.5f32.into()]);
            self.push("re", vec![x.into(), bottom.into(), column_width.into(), height.into()]);
            self.push("S", vec![]);

            self.text_at(x + CELL_PADDING, bottom + CELL_PADDING + 1.0, text, &font);
        }

        self.cursor_y = bottom;
    }
}

/// Render `layout` into an in-memory PDF document
pub(crate) fn render(layout: &Layout, created: DateTime<Local>) -> Result<Document, ArtifactError> {
    let mut canvas = Canvas::new();
    for block in &layout.blocks {
        match block {
            Block::Paragraph { text, style } => canvas.paragraph(text, *style),
            Block::Rule => canvas.rule(),
            Block::Spacer => canvas.spacer(),
            Block::Table(table) => canvas.table(table),
        }
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let content = Content {
        operations: canvas.operations,
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });

    let kids: Vec<Object> = vec![page_id.into()];
    let media_box: Vec<Object> = vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()];
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => media_box,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(latin1(&layout.title), StringFormat::Literal),
        "Author" => Object::string_literal("System"),
        "Producer" => Object::string_literal(concat!("islemler-api ", env!("CARGO_PKG_VERSION"))),
        "CreationDate" => Object::string_literal(pdf_date(created)),
    });
    doc.trailer.set("Info", info_id);

    doc.compress();
    Ok(doc)
}

/// PDF date string, e.g. `D:20240131142500+03'00'`
fn pdf_date(at: DateTime<Local>) -> String {
    let offset = at.format("%z").to_string();
    let (hours, minutes) = offset.split_at(offset.len().saturating_sub(2));
    format!("D:{}{}'{}'", at.format("%Y%m%d%H%M%S"), hours, minutes)
}

/// The standard fonts use WinAnsiEncoding; anything outside Latin-1 becomes '?'
fn latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn encodes_latin1_and_replaces_the_rest() {
        assert_eq!(latin1("Ayaz"), b"Ayaz".to_vec());
        assert_eq!(latin1("é"), vec![0xE9]);
        assert_eq!(latin1("ğ"), b"?".to_vec());
    }

    #[test]
    fn formats_pdf_dates() {
        let at = Local.with_ymd_and_hms(2024, 1, 31, 14, 25, 0).unwrap();
        let date = pdf_date(at);
        assert!(date.starts_with("D:20240131142500"), "{}", date);
        assert!(date.ends_with('\''), "{}", date);
    }

    #[test]
    fn renders_a_single_page_document() {
        let layout = Layout {
            title: "Test".to_string(),
            blocks: vec![
                Block::Paragraph { text: "Heading".to_string(), style: TextStyle::Title },
                Block::Rule,
                Block::Table(Table {
                    header: ["Field".to_string(), "Value".to_string()],
                    rows: vec![["Name:".to_string(), "alice".to_string()]],
                }),
                Block::Spacer,
                Block::Paragraph { text: "Footer".to_string(), style: TextStyle::Body },
            ],
        };

        let doc = render(&layout, Local::now()).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }
}
