//! Plain-text loader.

use std::fs;
use std::path::Path;

use crate::error::LoadResult;
use crate::types::Text;

/// Read a UTF-8 text file verbatim.
pub fn load_text_from_path(path: impl AsRef<Path>) -> LoadResult<Text> {
    let bytes = fs::read(path)?;
    Ok(Text::new(String::from_utf8(bytes)?))
}
