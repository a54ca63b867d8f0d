//! PDF text loader.

use std::path::Path;

use crate::error::{LoadError, LoadResult};
use crate::types::Text;

/// Extract the text of every page of a PDF, in page order.
pub fn load_pdf_from_path(path: impl AsRef<Path>) -> LoadResult<Text> {
    let pages = pdf_extract::extract_text_by_pages(path.as_ref()).map_err(|e| LoadError::Pdf {
        message: e.to_string(),
    })?;
    Ok(join_pages(pages))
}

/// Concatenate extracted page texts, each followed by one newline.
///
/// Pages whose extraction is empty are skipped. Whitespace-only pages are kept verbatim so line
/// positions match the document.
pub fn join_pages<I, S>(pages: I) -> Text
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for page in pages {
        let page = page.as_ref();
        if page.is_empty() {
            continue;
        }
        out.push_str(page);
        out.push('\n');
    }
    Text::new(out)
}
