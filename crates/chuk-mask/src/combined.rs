//! Masks built from other masks with AND, OR and NOT.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use chuk_common::BoolGrid;

use crate::error::{MaskError, MaskResult};
use crate::mask::{Mask, MaskRef};

/// Combination operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    And,
    Or,
    Not,
}

impl FromStr for Operator {
    type Err = MaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "and" => Ok(Operator::And),
            "or" => Ok(Operator::Or),
            "not" => Ok(Operator::Not),
            _ => Err(MaskError::InvalidArgument(format!(
                "Unknown operator '{}', expected one of and, or, not",
                s
            ))),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Not => "not",
        };
        write!(f, "{}", s)
    }
}

/// A mask derived from one or more child masks.
///
/// Nothing is cached here: every evaluation re-evaluates the children,
/// which may serve their own cached grids.
#[derive(Debug, Clone)]
pub struct CombinedMask {
    children: Vec<MaskRef>,
    op: Operator,
}

impl CombinedMask {
    /// Combine `children` with `op`.
    ///
    /// Fails with [`MaskError::InvalidArgument`] when there are no children,
    /// or when `op` is NOT and more than one child is given.
    pub fn new(children: Vec<MaskRef>, op: Operator) -> MaskResult<Self> {
        if children.is_empty() {
            return Err(MaskError::InvalidArgument(
                "Must combine at least one mask".to_string(),
            ));
        }
        if op == Operator::Not && children.len() != 1 {
            return Err(MaskError::InvalidArgument(format!(
                "not takes exactly one mask, got {}",
                children.len()
            )));
        }
        Ok(Self::wrap(children, op))
    }

    /// Like [`CombinedMask::new`], with the operator given by name.
    pub fn parse(children: Vec<MaskRef>, op: &str) -> MaskResult<Self> {
        Self::new(children, op.parse()?)
    }

    /// Construction for callers that already uphold the child invariants.
    pub(crate) fn wrap(children: Vec<MaskRef>, op: Operator) -> Self {
        debug_assert!(!children.is_empty());
        debug_assert!(op != Operator::Not || children.len() == 1);
        Self { children, op }
    }

    pub fn operator(&self) -> Operator {
        self.op
    }

    pub fn children(&self) -> &[MaskRef] {
        &self.children
    }

    fn reduce<F>(&self, f: F) -> MaskResult<BoolGrid>
    where
        F: Fn(&BoolGrid, &BoolGrid) -> chuk_common::ChukResult<BoolGrid>,
    {
        let mut grids = self.children.iter().map(|child| child.to_array());
        let first = match grids.next() {
            Some(grid) => grid?,
            None => return Err(MaskError::InvalidArgument("No masks to combine".to_string())),
        };
        let mut acc = (*first).clone();
        for grid in grids {
            let grid = grid?;
            if grid.shape() != acc.shape() {
                return Err(MaskError::ShapeMismatch {
                    expected: acc.shape().to_vec(),
                    actual: grid.shape().to_vec(),
                });
            }
            acc = f(&acc, &grid)?;
        }
        Ok(acc)
    }
}

impl Mask for CombinedMask {
    fn to_array(&self) -> MaskResult<Rc<BoolGrid>> {
        let grid = match self.op {
            Operator::Not => {
                let child = self.children.first().ok_or_else(|| {
                    MaskError::InvalidArgument("not takes exactly one mask".to_string())
                })?;
                !&*child.to_array()?
            }
            Operator::And => self.reduce(BoolGrid::try_and)?,
            Operator::Or => self.reduce(BoolGrid::try_or)?,
        };
        Ok(Rc::new(grid))
    }

    fn into_mask_ref(self: Rc<Self>) -> MaskRef {
        self
    }
}
