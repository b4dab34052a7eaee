use std::path::PathBuf;

/// Rows of display text under a header row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>
}

impl Table {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    /// Two-column table from label/value pairs.
    pub fn from_pairs<K: ToString, V: ToString>(header: [&str; 2], pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        Self {
            header: header.iter().map(|title| title.to_string()).collect(),
            rows: pairs.into_iter()
                .map(|(key, value)| vec![key.to_string(), value.to_string()])
                .collect()
        }
    }
}

/// One typed section of a report, laid out in order by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Heading(String),
    Paragraph(String),
    Bullets(Vec<String>),
    Table(Table),
    /// A captioned image kept whole on a single page.
    Chart {
        title: String,
        path: PathBuf
    },
    PageBreak
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    title: String,
    blocks: Vec<Block>
}

impl Document {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn headings(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Heading(text) => Some(text.as_str()),
            _ => None
        })
    }
}

/// Accumulates blocks; each tier composer takes the builder and hands it back extended.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    title: String,
    blocks: Vec<Block>
}

impl DocumentBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), blocks: Vec::new() }
    }

    pub fn title(self, text: impl Into<String>) -> Self {
        self.push(Block::Title(text.into()))
    }

    pub fn heading(self, text: impl Into<String>) -> Self {
        self.push(Block::Heading(text.into()))
    }

    pub fn paragraph(self, text: impl Into<String>) -> Self {
        self.push(Block::Paragraph(text.into()))
    }

    pub fn bullets(self, items: Vec<String>) -> Self {
        self.push(Block::Bullets(items))
    }

    pub fn table(self, table: Table) -> Self {
        self.push(Block::Table(table))
    }

    pub fn chart(self, title: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.push(Block::Chart { title: title.into(), path: path.into() })
    }

    pub fn page_break(self) -> Self {
        self.push(Block::PageBreak)
    }

    pub fn build(self) -> Document {
        Document { title: self.title, blocks: self.blocks }
    }

    fn push(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }
}
