//! Reading and writing the textual graph format.
//!
//! ```text
//! <vertices> [<edges>]
//! <from> <to>
//! ...
//! ```
//!
//! Blank lines are skipped. Without a declared edge count every remaining line
//! is an edge; with one, exactly that many edge lines are read.

use crate::error::{GraphError, Result};
use crate::models::{Edge, EdgeList};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Load an edge list from a file
pub fn load_edge_list(path: impl AsRef<Path>) -> Result<EdgeList> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let list = parse_edge_list(BufReader::new(file))?;
    debug!(
        path = %path.display(),
        vertices = list.vertices,
        edges = list.edge_count(),
        "loaded edge list"
    );
    Ok(list)
}

/// Parse an edge list. Vertex ranges are checked by the graph builders.
pub fn parse_edge_list(reader: impl BufRead) -> Result<EdgeList> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(index, line)| line.map(|line| (index + 1, line)))
        .filter(|line| !matches!(line, Ok((_, text)) if text.trim().is_empty()));

    let (header_line, header) = lines.next().transpose()?.ok_or(GraphError::EmptyInput)?;
    let (vertices, declared) = parse_header(header_line, &header)?;

    let mut edges: Vec<Edge> = Vec::with_capacity(declared.unwrap_or_default().min(1 << 16));
    for line in lines {
        if declared.is_some_and(|expected| edges.len() == expected) {
            let (line, _) = line?;
            warn!(line, "ignoring input after the declared edge count");
            break;
        }
        let (line, text) = line?;
        edges.push(parse_edge(line, &text)?);
    }

    if let Some(expected) = declared {
        if edges.len() < expected {
            return Err(GraphError::EdgeCountMismatch {
                expected,
                found: edges.len(),
            });
        }
    }

    Ok(EdgeList::new(vertices, edges))
}

fn parse_header(line: usize, text: &str) -> Result<(usize, Option<usize>)> {
    let malformed = || GraphError::MalformedHeader {
        line,
        content: text.trim().to_string(),
    };

    let fields: Vec<&str> = text.split_whitespace().collect();
    match fields.as_slice() {
        [vertices] => Ok((vertices.parse().map_err(|_| malformed())?, None)),
        [vertices, edges] => Ok((
            vertices.parse().map_err(|_| malformed())?,
            Some(edges.parse().map_err(|_| malformed())?),
        )),
        _ => Err(malformed()),
    }
}

fn parse_edge(line: usize, text: &str) -> Result<Edge> {
    let malformed = || GraphError::MalformedEdge {
        line,
        content: text.trim().to_string(),
    };

    let fields: Vec<&str> = text.split_whitespace().collect();
    match fields.as_slice() {
        [from, to] => Ok((
            from.parse().map_err(|_| malformed())?,
            to.parse().map_err(|_| malformed())?,
        )),
        _ => Err(malformed()),
    }
}

/// Write an edge list with a `<vertices> <edges>` header
pub fn write_edge_list(list: &EdgeList, mut writer: impl Write) -> Result<()> {
    writeln!(writer, "{} {}", list.vertices, list.edge_count())?;
    for (from, to) in &list.edges {
        writeln!(writer, "{from} {to}")?;
    }
    writer.flush()?;
    Ok(())
}
