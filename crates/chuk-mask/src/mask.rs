//! The mask capability shared by leaf and combined masks.

use std::fmt;
use std::rc::Rc;

use chuk_common::BoolGrid;

use crate::combined::{CombinedMask, Operator};
use crate::error::{MaskError, MaskResult};

/// Shared handle to any mask.
pub type MaskRef = Rc<dyn Mask>;

/// A boolean grid, or a lazy description of one.
///
/// Combinators never mutate their receiver: they wrap it, together with
/// any other operands, in a new [`CombinedMask`]. The same leaf can sit
/// under any number of combinations.
pub trait Mask: fmt::Debug {
    /// Evaluate the mask.
    ///
    /// Callers must treat the returned grid as read-only; a leaf hands
    /// out its cached grid rather than a copy.
    fn to_array(&self) -> MaskResult<Rc<BoolGrid>>;

    /// Upcast to a [`MaskRef`].
    fn into_mask_ref(self: Rc<Self>) -> MaskRef;

    /// Number of `true` cells.
    fn count(&self) -> MaskResult<usize> {
        Ok(self.to_array()?.count_true())
    }

    /// `count() / total cells`, where every axis counts towards the total,
    /// including any non-spatial ones. An empty grid gives NaN.
    fn fraction(&self) -> MaskResult<f64> {
        let grid = self.to_array()?;
        Ok(grid.count_true() as f64 / grid.len() as f64)
    }

    /// AND of this mask with `others`.
    fn and_mask(self: Rc<Self>, others: Vec<MaskRef>) -> Rc<CombinedMask> {
        let mut children = vec![self.into_mask_ref()];
        children.extend(others);
        Rc::new(CombinedMask::wrap(children, Operator::And))
    }

    /// OR of this mask with `others`.
    fn or_mask(self: Rc<Self>, others: Vec<MaskRef>) -> Rc<CombinedMask> {
        let mut children = vec![self.into_mask_ref()];
        children.extend(others);
        Rc::new(CombinedMask::wrap(children, Operator::Or))
    }

    /// Complement of this mask.
    fn not_mask(self: Rc<Self>) -> Rc<CombinedMask> {
        Rc::new(CombinedMask::wrap(vec![self.into_mask_ref()], Operator::Not))
    }
}

fn combine(masks: Vec<MaskRef>, op: Operator) -> MaskResult<MaskRef> {
    if masks.is_empty() {
        return Err(MaskError::InvalidArgument(format!(
            "{} needs at least one mask",
            op
        )));
    }
    Ok(Rc::new(CombinedMask::wrap(masks, op)))
}

/// AND over a list of masks.
pub fn combine_and(masks: Vec<MaskRef>) -> MaskResult<MaskRef> {
    combine(masks, Operator::And)
}

/// OR over a list of masks.
pub fn combine_or(masks: Vec<MaskRef>) -> MaskResult<MaskRef> {
    combine(masks, Operator::Or)
}

/// NOT of a single mask.
pub fn negate(mask: MaskRef) -> MaskRef {
    Rc::new(CombinedMask::wrap(vec![mask], Operator::Not))
}
