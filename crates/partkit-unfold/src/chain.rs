//! Bend chains and the unfolding driver.

use partkit_math::Tolerance;
use partkit_shape::{Edge, Face, Selection, SubObject};
use serde::{Deserialize, Serialize};

use crate::bend::{calculate_bend, AppliedBend, Bend, BendResolution};
use crate::UnfoldError;

/// A primary face followed by `(bend edge, face)` links.
///
/// Each link's face is attached to the previous face (the primary face for
/// the first link) along the link's edge.
#[derive(Debug, Clone, PartialEq)]
pub struct BendChain {
    /// Reference face; its plane is the plane of the flat pattern.
    pub primary: Face,
    /// Bend edges and the faces they lead to, in order.
    pub links: Vec<(Edge, Face)>,
}

impl BendChain {
    /// Chain from its parts.
    pub fn new(primary: Face, links: Vec<(Edge, Face)>) -> Self {
        Self { primary, links }
    }

    /// Read a chain from sub-objects in pick order: `face, (edge, face)*`.
    pub fn from_sub_objects<'a>(
        subs: impl IntoIterator<Item = &'a SubObject>,
    ) -> Result<Self, UnfoldError> {
        let mut subs = subs.into_iter().enumerate();
        let primary = match subs.next() {
            None => return Err(UnfoldError::EmptyChain),
            Some((index, sub)) => expect_face(index, sub)?,
        };

        let mut links = Vec::new();
        while let Some((index, sub)) = subs.next() {
            let edge = sub.as_edge().cloned().ok_or(UnfoldError::MalformedChain {
                index,
                expected: "Edge",
                found: sub.kind(),
            })?;
            let face = match subs.next() {
                Some((index, sub)) => expect_face(index, sub)?,
                None => {
                    return Err(UnfoldError::MalformedChain {
                        index: index + 1,
                        expected: "Face",
                        found: "end of selection",
                    })
                }
            };
            links.push((edge, face));
        }
        Ok(Self { primary, links })
    }

    /// Read a chain from a selection, across all selected objects.
    pub fn from_selection(selection: &Selection) -> Result<Self, UnfoldError> {
        Self::from_sub_objects(selection.sub_objects())
    }

    /// Number of bends.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the chain has no bends.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// All faces, primary first.
    pub fn faces(&self) -> impl Iterator<Item = &Face> {
        std::iter::once(&self.primary).chain(self.links.iter().map(|(_, f)| f))
    }

    /// Compute every bend of the chain, first bend first.
    ///
    /// Bends are measured on the folded geometry, so each one relates a face
    /// to its predecessor as selected.
    pub fn bends(&self) -> Result<Vec<Bend>, UnfoldError> {
        let mut prev = &self.primary;
        let mut bends = Vec::with_capacity(self.links.len());
        for (index, (edge, face)) in self.links.iter().enumerate() {
            bends.push(calculate_bend(index, prev, edge, face)?);
            prev = face;
        }
        Ok(bends)
    }
}

fn expect_face(index: usize, sub: &SubObject) -> Result<Face, UnfoldError> {
    sub.as_face().cloned().ok_or(UnfoldError::MalformedChain {
        index,
        expected: "Face",
        found: sub.kind(),
    })
}

/// Unfolding settings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UnfoldOptions {
    /// How each bend's rotation direction is chosen.
    #[serde(default)]
    pub resolution: BendResolution,
    /// Tolerance for the corrective normal check.
    #[serde(default)]
    pub tolerance: Tolerance,
}

/// A flattened face and the bends applied to get it there.
#[derive(Debug, Clone, PartialEq)]
pub struct UnfoldReport {
    /// The face laid into the primary face's plane.
    pub face: Face,
    /// Bends in the order they were applied (outermost first).
    pub steps: Vec<AppliedBend>,
}

/// Lay the last face of the chain into the plane of the primary face.
///
/// The input chain is not modified. A chain without bends returns the
/// primary face unchanged.
pub fn unfold(chain: &BendChain, options: &UnfoldOptions) -> Result<UnfoldReport, UnfoldError> {
    let bends = chain.bends()?;
    let last = chain
        .links
        .last()
        .map(|(_, face)| face)
        .unwrap_or(&chain.primary);
    let report = flatten(last, &bends, options)?;
    log::info!(
        "unfolded {} bend(s), {} corrected",
        report.steps.len(),
        report.steps.iter().filter(|s| s.corrected).count()
    );
    Ok(report)
}

/// Lay every face of the chain into the plane of the primary face.
///
/// The first report is the primary face itself; report `i` is face `i`
/// unfolded through the first `i` bends.
pub fn unfold_all(
    chain: &BendChain,
    options: &UnfoldOptions,
) -> Result<Vec<UnfoldReport>, UnfoldError> {
    let bends = chain.bends()?;
    let mut reports = Vec::with_capacity(chain.links.len() + 1);
    reports.push(UnfoldReport {
        face: chain.primary.clone(),
        steps: Vec::new(),
    });
    for (i, (_, face)) in chain.links.iter().enumerate() {
        reports.push(flatten(face, &bends[..=i], options)?);
    }
    log::info!("unfolded {} face(s)", reports.len());
    Ok(reports)
}

fn flatten(
    face: &Face,
    bends: &[Bend],
    options: &UnfoldOptions,
) -> Result<UnfoldReport, UnfoldError> {
    let mut face = face.clone();
    let mut steps = Vec::with_capacity(bends.len());
    for (index, bend) in bends.iter().enumerate().rev() {
        let (rotated, applied) =
            bend.apply(index, &face, options.resolution, &options.tolerance)?;
        face = rotated;
        steps.push(applied);
    }
    Ok(UnfoldReport { face, steps })
}
