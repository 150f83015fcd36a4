//! Small assembly utilities: triangle faces, shells, solids, promotion.

use partkit_math::{newell_normal, Tolerance};

use crate::{EdgeCensus, Face, Selection, Shape, ShapeError, Shell, Solid, VertexPool};

/// Build a triangular face from the three unique vertices in a selection.
///
/// Vertices are gathered from every selected sub-object (vertices, edge
/// endpoints, face corners) and deduplicated, so two edges sharing a
/// corner count as three vertices. The triangle follows discovery order.
pub fn make_triangle_face(selection: &Selection, tol: &Tolerance) -> Result<Face, ShapeError> {
    let mut pool = VertexPool::new(*tol);
    for sub in selection.sub_objects() {
        for p in sub.vertices() {
            pool.insert(p);
        }
    }
    if pool.len() != 3 {
        return Err(ShapeError::VertexCount {
            expected: 3,
            found: pool.len(),
        });
    }
    if newell_normal(pool.points()).is_none() {
        return Err(ShapeError::DegenerateFace);
    }
    Ok(Face::from_polygon(pool.points()))
}

/// Collect the faces a solid should be built from.
///
/// For each selected object, all of its faces are used when it has any;
/// otherwise the faces picked on it.
pub fn solid_faces_from_selection(selection: &Selection) -> Vec<Face> {
    let mut faces = Vec::new();
    for object in &selection.objects {
        if object.faces.is_empty() {
            faces.extend(object.sub_objects.iter().filter_map(|s| s.as_face()).cloned());
        } else {
            faces.extend(object.faces.iter().cloned());
        }
    }
    faces
}

/// Group faces into a shell.
pub fn make_shell(faces: Vec<Face>) -> Result<Shell, ShapeError> {
    if faces.is_empty() {
        return Err(ShapeError::NoFaces);
    }
    Ok(Shell { faces })
}

/// Close a shell into a solid.
///
/// Every edge must be shared by exactly two faces.
pub fn make_solid(shell: Shell, tol: &Tolerance) -> Result<Solid, ShapeError> {
    let census = EdgeCensus::from_faces(&shell.faces, tol);
    let free_edges = census.boundary().len();
    let non_manifold_edges = census.non_manifold().len();
    if free_edges > 0 || non_manifold_edges > 0 {
        return Err(ShapeError::OpenShell {
            free_edges,
            non_manifold_edges,
        });
    }
    let solid = Solid { shell };
    let volume = solid.volume()?;
    log::info!(
        "built solid from {} faces, volume {volume:.6}",
        solid.shell.faces.len()
    );
    Ok(solid)
}

/// Turn every selected sub-object into an independent shape.
pub fn promote_selected(selection: &Selection) -> Vec<(String, Shape)> {
    selection
        .objects
        .iter()
        .flat_map(|object| {
            object.sub_objects.iter().enumerate().map(move |(i, sub)| {
                let name = format!("{}_{}{}", object.name, sub.kind(), i + 1);
                (name, Shape::from(sub.clone()))
            })
        })
        .collect()
}
