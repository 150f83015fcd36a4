//! Subcommand bodies: input text in, output text out.

use anyhow::{anyhow, bail, Context, Result};
use partkit_airfoil::{AirfoilImport, AirfoilProfile};
use partkit_cam::post::{MacroPost, PostProcessor, SketchPost};
use partkit_cam::{emit_gcode, CamSettings, ChainElement, DepthMode, MachiningProfile};
use partkit_math::Tolerance;
use partkit_shape::{
    make_shell, make_solid, make_triangle_face, merge_faces, promote_selected,
    solid_faces_from_selection, Selection, Shape, ShapeDocument,
};
use partkit_simplify::simplify_face;
use partkit_unfold::{unfold as unfold_chain, unfold_all, BendChain, BendResolution, UnfoldOptions};

fn selection(json: &str) -> Result<Selection> {
    let selection = Selection::from_json(json).context("parsing selection document")?;
    if selection.is_empty() {
        bail!("nothing selected");
    }
    Ok(selection)
}

fn document(name: &str, shape: Shape) -> Result<String> {
    Ok(ShapeDocument::single(name, shape).to_json()?)
}

pub fn unfold(json: &str, all: bool, legacy: bool) -> Result<String> {
    let chain = BendChain::from_selection(&selection(json)?)?;
    let options = UnfoldOptions {
        resolution: if legacy {
            BendResolution::DetectAndCorrect
        } else {
            BendResolution::Signed
        },
        ..UnfoldOptions::default()
    };

    if !all {
        let report = unfold_chain(&chain, &options)?;
        return document("Unfolded", Shape::Face(report.face));
    }
    let mut doc = ShapeDocument::default();
    for (i, report) in unfold_all(&chain, &options)?.into_iter().enumerate() {
        doc.push(format!("Unfolded{i}"), Shape::Face(report.face));
    }
    Ok(doc.to_json()?)
}

pub fn gcode(json: &str, preset: Option<&str>, config: Option<&str>, sketch: bool) -> Result<String> {
    let selection = selection(json)?;
    let elements: Vec<ChainElement> = selection
        .sub_objects()
        .flat_map(ChainElement::from_sub_object)
        .collect();

    let profile = preset
        .map(|name| MachiningProfile::preset(name).ok_or_else(|| anyhow!("unknown profile {name}")))
        .transpose()?;
    let settings = match (config, profile) {
        (Some(text), _) => CamSettings::from_toml_str(text)?,
        (None, Some(profile)) if sketch => CamSettings::sketch_with(profile),
        (None, None) if sketch => CamSettings::sketch(),
        (None, profile) => {
            CamSettings::with_profile(profile.unwrap_or_else(MachiningProfile::pocket))
        }
    };

    let post: Box<dyn PostProcessor> = if sketch {
        let z_cut = match settings.profile.depth {
            DepthMode::Fixed { z_cut } => z_cut,
            DepthMode::FromGeometry => SketchPost::default().z_cut,
        };
        Box::new(SketchPost::new(z_cut))
    } else {
        Box::new(MacroPost)
    };
    Ok(emit_gcode(&elements, &settings, post.as_ref())?)
}

pub fn simplify(json: &str) -> Result<String> {
    let selection = selection(json)?;
    let face = selection
        .sub_objects()
        .find_map(|s| s.as_face())
        .ok_or_else(|| anyhow!("select a face to simplify"))?;
    document("Simplified", Shape::Face(simplify_face(face)?))
}

pub fn merge(json: &str) -> Result<String> {
    let faces = solid_faces_from_selection(&selection(json)?);
    if faces.len() < 2 {
        bail!("select at least two faces to merge, found {}", faces.len());
    }
    document("Merged", Shape::Face(merge_faces(&faces, &Tolerance::NEAR)?))
}

pub fn triangle(json: &str) -> Result<String> {
    let face = make_triangle_face(&selection(json)?, &Tolerance::NEAR)?;
    document("Triangle", Shape::Face(face))
}

pub fn solid(json: &str) -> Result<String> {
    let shell = make_shell(solid_faces_from_selection(&selection(json)?))?;
    let solid = make_solid(shell, &Tolerance::NEAR)?;
    document("Solid", Shape::Solid(solid))
}

pub fn promote(json: &str) -> Result<String> {
    let mut doc = ShapeDocument::default();
    for (name, shape) in promote_selected(&selection(json)?) {
        doc.push(name, shape);
    }
    Ok(doc.to_json()?)
}

pub fn airfoil(text: &str, span: f64, station: f64) -> Result<String> {
    let profile = AirfoilProfile::parse(text)?;
    let import = AirfoilImport {
        target_span: span,
        station_x: station,
        ..AirfoilImport::default()
    };
    let face = import.build_face(&profile)?;
    let name = if profile.name.is_empty() {
        "Airfoil".to_string()
    } else {
        profile.name.clone()
    };
    document(&name, Shape::Face(face))
}
