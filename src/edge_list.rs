//! CSV edge lists in, CSV distance tables out.
//!
//! Input rows are `source,target,weight` after a header line. Output rows are
//! `vertex_id,distance`, cheapest first.

use std::io;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Writer};

use crate::error::LoadError;
use crate::graph::WeightedGraph;
use crate::{Edge, VertexId, Weight, INFINITY};

const COLUMNS: [&str; 3] = ["source", "target", "weight"];

fn field<T: std::str::FromStr<Err = std::num::ParseIntError>>(
    record: &StringRecord,
    index: usize,
    line: u64,
) -> Result<T, LoadError> {
    let column = COLUMNS[index];
    let raw = record
        .get(index)
        .ok_or(LoadError::MissingField { line, column })?
        .trim();
    raw.parse().map_err(|source| LoadError::InvalidField {
        line,
        column,
        value: raw.to_string(),
        source,
    })
}

pub fn read_edges<R: io::Read>(reader: R) -> Result<Vec<Edge>, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true) // first line names the columns
        .flexible(true)
        .from_reader(reader);

    let mut edges = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        let source: VertexId = field(&record, 0, line)?;
        let target: VertexId = field(&record, 1, line)?;
        let weight: Weight = field(&record, 2, line)?;
        edges.push(Edge::new(source, target, weight));
    }
    Ok(edges)
}

pub fn read_edges_from_path(path: impl AsRef<Path>) -> Result<Vec<Edge>, LoadError> {
    let file = std::fs::File::open(path.as_ref())?;
    read_edges(file)
}

/// Reads an edge list straight into a graph of the requested kind.
pub fn load_graph<G: WeightedGraph + Default>(path: impl AsRef<Path>) -> Result<G, LoadError> {
    let mut graph = G::default();
    for edge in read_edges_from_path(path)? {
        graph.add_edge(edge.source, edge.target, edge.weight);
    }
    Ok(graph)
}

/// Writes `vertex_id,distance` rows sorted by distance, then id.
///
/// Unreached vertices are skipped unless `include_unreachable` is set, in which
/// case their distance is written as `inf`. Returns the number of rows.
pub fn write_distances<W: io::Write>(
    writer: W,
    distances: &[Weight],
    include_unreachable: bool,
) -> Result<usize, csv::Error> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(["vertex_id", "distance"])?;

    let mut rows: Vec<(VertexId, Weight)> = distances
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, d)| include_unreachable || d != INFINITY)
        .collect();
    rows.sort_by_key(|&(id, d)| (d, id));

    for &(id, d) in &rows {
        let val = if d == INFINITY {
            String::from("inf")
        } else {
            d.to_string()
        };
        wtr.write_record(&[id.to_string(), val])?;
    }
    wtr.flush()?;
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DirectedGraph, UndirectedGraph};

    #[test]
    fn reads_edges() {
        let data = "source,target,weight\n0,1,6\n0, 2 ,2\n2,1,1\n";
        let edges = read_edges(data.as_bytes()).unwrap();
        assert_eq!(
            edges,
            vec![Edge::new(0, 1, 6), Edge::new(0, 2, 2), Edge::new(2, 1, 1)]
        );
        let g: DirectedGraph = edges.into_iter().collect();
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn reports_bad_field() {
        let data = "source,target,weight\n0,1,6\n0,x,2\n";
        match read_edges(data.as_bytes()) {
            Err(LoadError::InvalidField { line, column, value, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(column, "target");
                assert_eq!(value, "x");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn reports_missing_field() {
        let data = "source,target,weight\n0,1\n";
        assert!(matches!(
            read_edges(data.as_bytes()),
            Err(LoadError::MissingField { line: 2, column: "weight" })
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        let result: Result<UndirectedGraph, _> = load_graph("/definitely/not/here.csv");
        match result {
            Err(LoadError::Io(err)) => assert_eq!(err.kind(), io::ErrorKind::NotFound),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn writes_sorted_distances() {
        let distances = vec![0, 6, INFINITY, 2];
        let mut buf = Vec::new();
        let rows = write_distances(&mut buf, &distances, false).unwrap();
        assert_eq!(rows, 3);
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "vertex_id,distance\n0,0\n3,2\n1,6\n"
        );

        let mut buf = Vec::new();
        let rows = write_distances(&mut buf, &distances, true).unwrap();
        assert_eq!(rows, 4);
        assert!(String::from_utf8(buf).unwrap().ends_with("2,inf\n"));
    }
}
