//! Raw table cell handed from the table locator to the extractors.

/// One `td` of a data row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    /// Inner markup of the cell, tags included
    pub markup: String,

    /// `href` of the first anchor inside the cell, if any
    pub href: Option<String>,
}

impl Cell {
    /// Cell with markup and no anchor.
    pub fn text(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            href: None,
        }
    }

    /// Cell with markup and an anchor target.
    pub fn linked(markup: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            href: Some(href.into()),
        }
    }
}
