//! Masks anchored directly to raster codes.

use std::cell::RefCell;
use std::rc::Rc;

use chuk_common::BoolGrid;
use tracing::trace;

use crate::error::MaskResult;
use crate::mask::{Mask, MaskRef};
use crate::raster::FlagRaster;

/// Evaluation state of a [`LeafMask`].
#[derive(Debug, Clone, Default)]
enum MaskState {
    #[default]
    Unevaluated,
    Evaluated(Rc<BoolGrid>),
}

/// A mask selecting categories of a single flag raster.
///
/// The selection is kept as the tokens the caller supplied, in insertion
/// order, and is re-resolved against the raster on evaluation. Any change
/// to the selection clears the cached grid before returning.
#[derive(Debug)]
pub struct LeafMask {
    raster: Rc<FlagRaster>,
    selection: RefCell<Vec<String>>,
    include_missing: bool,
    state: RefCell<MaskState>,
}

impl LeafMask {
    pub fn new(raster: impl Into<Rc<FlagRaster>>, include_missing: bool) -> Self {
        Self {
            raster: raster.into(),
            selection: RefCell::new(Vec::new()),
            include_missing,
            state: RefCell::new(MaskState::Unevaluated),
        }
    }

    pub fn raster(&self) -> &FlagRaster {
        &self.raster
    }

    pub fn include_missing(&self) -> bool {
        self.include_missing
    }

    /// Every category declared on the raster.
    pub fn all_categories(&self) -> Vec<String> {
        self.raster.resolver().names()
    }

    /// Category names selected so far.
    ///
    /// Each token's matches are appended in turn, so a category selected by
    /// two tokens appears twice.
    pub fn selected_categories(&self) -> MaskResult<Vec<String>> {
        let resolver = self.raster.resolver();
        let mut names = Vec::new();
        for token in self.selection.borrow().iter() {
            names.extend(resolver.resolve(token)?);
        }
        Ok(names)
    }

    /// Tokens in the order they were added.
    pub fn selection(&self) -> Vec<String> {
        self.selection.borrow().clone()
    }

    /// Add a category name or pattern to the selection.
    ///
    /// Returns the names the token matched. A token that matches nothing is
    /// rejected and leaves the selection and cache untouched.
    pub fn add_category(&self, token: &str) -> MaskResult<Vec<String>> {
        let matched = self.raster.resolver().resolve(token)?;
        self.selection.borrow_mut().push(token.to_string());
        self.state.replace(MaskState::Unevaluated);
        trace!(token, matched = ?matched, "Added mask category");
        Ok(matched)
    }

    pub fn is_evaluated(&self) -> bool {
        matches!(*self.state.borrow(), MaskState::Evaluated(_))
    }

    fn evaluate(&self) -> MaskResult<BoolGrid> {
        let resolver = self.raster.resolver();
        let mut codes = Vec::new();
        for name in self.selected_categories()? {
            if let Some(code) = resolver.code_of(&name) {
                codes.push(code as f64);
            }
        }

        let include_missing = self.include_missing;
        Ok(self.raster.values().map(|&v| {
            if v.is_nan() {
                include_missing
            } else {
                codes.contains(&v)
            }
        }))
    }
}

impl Mask for LeafMask {
    fn to_array(&self) -> MaskResult<Rc<BoolGrid>> {
        if let MaskState::Evaluated(grid) = &*self.state.borrow() {
            return Ok(Rc::clone(grid));
        }
        let grid = Rc::new(self.evaluate()?);
        self.state.replace(MaskState::Evaluated(Rc::clone(&grid)));
        Ok(grid)
    }

    fn into_mask_ref(self: Rc<Self>) -> MaskRef {
        self
    }
}
