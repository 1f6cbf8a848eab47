// Parallel graph builder using rayon

use super::builder::{prepare, sorted_files, PendingEdge};
use super::UsageGraph;
use crate::error::Result;
use crate::model::SemanticModel;
use rayon::prelude::*;
use tracing::{debug, info};

/// Builds the same graph as [`super::UsageGraphBuilder`], scanning files on
/// the rayon pool and merging their edges back in path order
pub struct ParallelGraphBuilder<'m, M: SemanticModel + ?Sized> {
    model: &'m M,
}

impl<'m, M: SemanticModel + ?Sized> ParallelGraphBuilder<'m, M> {
    pub fn new(model: &'m M) -> Self {
        Self { model }
    }

    pub fn build(self) -> Result<UsageGraph> {
        let (mut graph, scanner) = prepare(self.model)?;
        let files = sorted_files(self.model);

        info!("Scanning {} files in parallel...", files.len());

        let per_file: Vec<Vec<PendingEdge>> = files
            .par_iter()
            .map(|file| scanner.scan(&graph, file, self.model.occurrences(file)))
            .collect();

        for (file, edges) in files.iter().zip(per_file) {
            debug!("{}: {} edges", file.display(), edges.len());
            for (from, to, edge) in edges {
                graph.add_edge(from, to, edge);
            }
        }

        info!(
            "Usage graph: {} symbols, {} edges",
            graph.symbol_count(),
            graph.edge_count()
        );
        Ok(graph)
    }
}
