//! Category name resolution against a raster's flag table.

use glob::Pattern;

use crate::error::{MaskError, MaskResult};

/// Maps user tokens to category names declared on a raster.
///
/// A token that names a category exactly resolves to that name alone.
/// Any other token is treated as a shell glob (`*`, `?`, `[...]`) and
/// resolves to every matching name, in declaration order.
#[derive(Debug, Clone, Copy)]
pub struct CategoryResolver<'a> {
    categories: &'a [(String, i64)],
}

impl<'a> CategoryResolver<'a> {
    pub fn new(categories: &'a [(String, i64)]) -> Self {
        Self { categories }
    }

    /// All category names in declaration order.
    pub fn names(&self) -> Vec<String> {
        self.categories.iter().map(|(n, _)| n.clone()).collect()
    }

    /// Resolve a token to the category names it selects.
    pub fn resolve(&self, token: &str) -> MaskResult<Vec<String>> {
        if self.categories.iter().any(|(n, _)| n == token) {
            return Ok(vec![token.to_string()]);
        }

        // An unparseable pattern can only ever match itself, which the
        // exact-match path above already ruled out.
        let matches: Vec<String> = match Pattern::new(token) {
            Ok(pattern) => self
                .categories
                .iter()
                .filter(|(n, _)| pattern.matches(n))
                .map(|(n, _)| n.clone())
                .collect(),
            Err(_) => Vec::new(),
        };

        if matches.is_empty() {
            return Err(MaskError::NoMatch {
                token: token.to_string(),
                valid: self.names(),
            });
        }
        Ok(matches)
    }

    /// Integer code for a resolved category name.
    pub fn code_of(&self, name: &str) -> Option<i64> {
        self.categories
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, code)| *code)
    }
}
