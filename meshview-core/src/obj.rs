/// Parser for the line-oriented OBJ subset used by mesh assets
///
/// Supported directives: `o <title>`, `v <x> <y> <z>` and `f <i> <j> <k>`
/// with 1-based indices into the vertices declared so far. Faces must be
/// triangles. Blank lines and `#` comments are skipped; any other directive
/// is ignored with a warning.
use log::{debug, info, warn};
use nalgebra::Point3;
use nom::{
    character::complete::{space0, space1, u64 as decimal},
    combinator::all_consuming,
    number::complete::float,
    IResult,
};
use std::fs;
use std::path::Path;

use crate::error::{Error, ParseError, ParseErrorKind};
use crate::geometry::{Triangle, Vertex};
use crate::mesh::Mesh;

/// Parsed asset: a shared vertex pool and faces indexing into it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjModel {
    title: Option<String>,
    vertices: Vec<Point3<f32>>,
    faces: Vec<[usize; 3]>,
}

impl ObjModel {
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    /// Faces as 0-based indices into [`ObjModel::vertices`]
    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    /// Build a mesh where every triangle owns copies of its vertices
    pub fn into_mesh(self) -> Mesh {
        let vertex = |index: usize| Vertex::from(self.vertices[index]);
        let triangles = self
            .faces
            .iter()
            .map(|&[a, b, c]| Triangle::new(vertex(a), vertex(b), vertex(c)))
            .collect();

        let mesh = Mesh::from_triangles(triangles);
        match self.title {
            Some(title) => mesh.with_title(title),
            None => mesh,
        }
    }
}

/// Parse asset text into an [`ObjModel`]
pub fn parse_obj(input: &str) -> Result<ObjModel, ParseError> {
    let mut model = ObjModel::default();

    for (index, raw) in input.lines().enumerate() {
        let line_number = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (keyword, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        match keyword {
            "o" => model.title = Some(rest.trim().to_string()),
            "v" => {
                let (x, y, z) = parse_vertex_line(rest)
                    .map_err(|kind| ParseError::new(line_number, kind))?;
                model.vertices.push(Point3::new(x, y, z));
            }
            "f" => {
                let face = parse_face_line(rest, model.vertices.len())
                    .map_err(|kind| ParseError::new(line_number, kind))?;
                model.faces.push(face);
            }
            other => warn!("line {line_number}: skipping unsupported `{other}` directive"),
        }
    }

    debug!(
        "parsed {} vertices and {} faces",
        model.vertices.len(),
        model.faces.len()
    );
    Ok(model)
}

/// Read and parse an asset file into a mesh
pub fn load_obj(path: impl AsRef<Path>) -> Result<Mesh, Error> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let model = parse_obj(&text).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        "loaded {}: {} vertices, {} triangles",
        path.display(),
        model.vertices.len(),
        model.faces.len()
    );
    Ok(model.into_mesh())
}

fn number(input: &str) -> IResult<&str, f32> {
    float(input)
}

fn vertex_index(input: &str) -> IResult<&str, u64> {
    decimal(input)
}

fn parse_vector3(input: &str) -> IResult<&str, (f32, f32, f32)> {
    let (input, _) = space0(input)?;
    let (input, x) = number(input)?;
    let (input, _) = space1(input)?;
    let (input, y) = number(input)?;
    let (input, _) = space1(input)?;
    let (input, z) = number(input)?;
    let (input, _) = space0(input)?;
    Ok((input, (x, y, z)))
}

fn parse_index3(input: &str) -> IResult<&str, (u64, u64, u64)> {
    let (input, _) = space0(input)?;
    let (input, a) = vertex_index(input)?;
    let (input, _) = space1(input)?;
    let (input, b) = vertex_index(input)?;
    let (input, _) = space1(input)?;
    let (input, c) = vertex_index(input)?;
    let (input, _) = space0(input)?;
    Ok((input, (a, b, c)))
}

fn parse_vertex_line(rest: &str) -> Result<(f32, f32, f32), ParseErrorKind> {
    if let Ok((_, xyz)) = all_consuming(parse_vector3)(rest) {
        return Ok(xyz);
    }

    let tokens = three_tokens("v", rest)?;
    let bad = tokens
        .iter()
        .copied()
        .find(|token| all_consuming(number)(*token).is_err())
        .unwrap_or(tokens[0]);
    Err(ParseErrorKind::InvalidNumber(bad.to_string()))
}

fn parse_face_line(rest: &str, available: usize) -> Result<[usize; 3], ParseErrorKind> {
    let Ok((_, (a, b, c))) = all_consuming(parse_index3)(rest) else {
        let tokens = three_tokens("f", rest)?;
        let bad = tokens
            .iter()
            .copied()
            .find(|token| all_consuming(vertex_index)(*token).is_err())
            .unwrap_or(tokens[0]);
        return Err(ParseErrorKind::InvalidIndex(bad.to_string()));
    };

    let resolve = |index: u64| match usize::try_from(index) {
        Ok(position) if (1..=available).contains(&position) => Ok(position - 1),
        _ => Err(ParseErrorKind::IndexOutOfRange { index, available }),
    };
    Ok([resolve(a)?, resolve(b)?, resolve(c)?])
}

fn three_tokens<'a>(directive: &'static str, rest: &'a str) -> Result<Vec<&'a str>, ParseErrorKind> {
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    if tokens.len() == 3 {
        Ok(tokens)
    } else {
        Err(ParseErrorKind::TokenCount {
            directive,
            expected: 3,
            found: tokens.len(),
        })
    }
}
