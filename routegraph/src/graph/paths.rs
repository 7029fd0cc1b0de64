//! Depth-first enumeration of simple trading paths between two currencies.

use super::PairGraph;
use petgraph::graph::NodeIndex;

/// Enumerates all simple paths from `start` to `end` visiting at most
/// `max_len` currencies, both endpoints included.
///
/// A path is emitted when the walk reaches `end` with at least two nodes;
/// enumeration never continues through the end node, so `end` appears only
/// as the final element. Emission order follows the adjacency order of the
/// underlying graph and carries no meaning.
pub fn simple_paths(
    graph: &PairGraph,
    start: NodeIndex,
    end: NodeIndex,
    max_len: usize,
) -> Vec<Vec<NodeIndex>> {
    let mut paths = Vec::new();
    let mut visited = vec![false; graph.node_count()];
    let mut path = vec![start];
    visit(graph, end, max_len, &mut visited, &mut path, &mut paths);
    paths
}

fn visit(
    graph: &PairGraph,
    end: NodeIndex,
    max_len: usize,
    visited: &mut [bool],
    path: &mut Vec<NodeIndex>,
    paths: &mut Vec<Vec<NodeIndex>>,
) {
    if path.len() > max_len {
        return;
    }

    let current = *path.last().expect("path always contains the start node");
    if current == end && path.len() > 1 {
        paths.push(path.clone());
        return;
    }

    visited[current.index()] = true;
    for next in graph.neighbors(current) {
        if !visited[next.index()] {
            path.push(next);
            visit(graph, end, max_len, visited, path, paths);
            path.pop();
        }
    }
    visited[current.index()] = false;
}
