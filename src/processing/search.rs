//! Line search over [`crate::types::Text`].

use crate::types::Text;

/// Lines of `text` containing `keyword`, compared case-insensitively, in source order.
///
/// Returned lines keep their original casing. An empty keyword matches every line.
pub fn search_lines(text: &Text, keyword: &str) -> Vec<String> {
    let needle = keyword.to_lowercase();
    text.lines()
        .filter(|line| line.to_lowercase().contains(&needle))
        .map(str::to_owned)
        .collect()
}
