use crate::analysis::Reachability;
use crate::graph::UsageGraph;
use std::io::{self, Write};

/// Line-oriented dump of the usage graph for diffing between runs.
///
/// ```text
/// node <id> <kind> <name> <file>:<line>:<column> live|dead
/// edge <source> -> <target> <edge-kind> <file>:<line>:<column>
/// ```
pub struct DebugExporter<'a> {
    graph: &'a UsageGraph,
    reachability: &'a Reachability,
}

impl<'a> DebugExporter<'a> {
    pub fn new(graph: &'a UsageGraph, reachability: &'a Reachability) -> Self {
        Self {
            graph,
            reachability,
        }
    }

    pub fn write<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        for symbol in self.graph.symbols() {
            writeln!(
                out,
                "node {} {} {} {} {}",
                symbol.id,
                symbol.kind.display_name(),
                symbol.name,
                symbol.location,
                if self.reachability.is_live(symbol.id) {
                    "live"
                } else {
                    "dead"
                }
            )?;
        }

        for symbol in self.graph.symbols() {
            let mut edges: Vec<_> = self.graph.references_from(symbol.id).collect();
            edges.sort_by(|a, b| {
                (a.0, &a.1.location, a.1.kind).cmp(&(b.0, &b.1.location, b.1.kind))
            });
            for (target, edge) in edges {
                writeln!(out, "edge {} -> {} {} {}", symbol.id, target, edge.kind, edge.location)?;
            }
        }

        Ok(())
    }

    pub fn render(&self) -> io::Result<String> {
        let mut buffer = Vec::new();
        self.write(&mut buffer)?;
        String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
