//! Trivial edge-list loader for the CLI demo.
//!
//! Graph acquisition (OSM extracts, GTFS feeds, or any other real-world
//! network format) is explicitly out of scope for this crate; this reader
//! exists only so `tnr preprocess` has something to point at on the command
//! line. Format: one `source,target,length` triple per line, `#`-prefixed
//! lines and blank lines ignored.

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::graph::Graph;

pub fn load_edge_list(path: &Path) -> Result<Graph<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading edge list at {}", path.display()))?;

    let mut graph = Graph::new();
    for (lineno, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let [source, target, length] = fields[..] else {
            bail!("{}:{}: expected `source,target,length`, got `{line}`", path.display(), lineno + 1);
        };
        let length: f64 = length
            .parse()
            .with_context(|| format!("{}:{}: invalid length `{length}`", path.display(), lineno + 1))?;
        graph
            .add_edge(source.to_string(), target.to_string(), length)
            .with_context(|| format!("{}:{}: invalid edge", path.display(), lineno + 1))?;
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_edges_and_skips_comments_and_blanks() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# comment\na,b,1.5\n\nb,c,2.0").unwrap();
        let graph = load_edge_list(file.path()).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_length(&"a".to_string(), &"b".to_string()).unwrap(), 1.5);
    }

    #[test]
    fn rejects_malformed_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "a,b").unwrap();
        assert!(load_edge_list(file.path()).is_err());
    }
}
