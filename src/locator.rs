//! Enclosing-context locator
//!
//! The search shared by every language adapter: walk a parsed tree and
//! keep the largest-by-row-span node that fully contains the queried
//! range. Grammar differences live entirely in the adapters; the walk
//! relies only on child iteration and node positions.

use crate::range::LineRange;
use tree_sitter::Node;

/// Find the largest node (by spanned rows) that fully contains `range`.
///
/// The candidate is replaced only on a strictly larger row span, so
/// among equally sized nodes the first one visited wins. Visit order is
/// depth-first pre-order with siblings left to right, which puts a node
/// ahead of its descendants. A node spanning a single line has span 0
/// and never becomes the candidate.
///
/// The walk is iterative with an explicit stack, so deeply nested input
/// cannot overflow the call stack. Each node is judged on its own span
/// only; a grammar emitting inconsistent spans degrades the answer
/// instead of breaking the traversal.
pub fn find_enclosing_node<'tree>(root: Node<'tree>, range: &LineRange) -> Option<Node<'tree>> {
    let mut largest: Option<Node<'tree>> = None;
    let mut largest_span = 0usize;

    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if encloses(&node, range) {
            let span = row_span(&node);
            if span > largest_span {
                largest_span = span;
                largest = Some(node);
            }
        }

        // Reverse push keeps sibling visit order left to right.
        for i in (0..node.child_count()).rev() {
            if let Some(child) = node.child(i) {
                stack.push(child);
            }
        }
    }

    largest
}

/// Containment check: the node's rows, widened to 1-based lines, must
/// cover both ends of the range.
fn encloses(node: &Node, range: &LineRange) -> bool {
    let first_line = node.start_position().row as u32 + 1;
    let last_line = node.end_position().row as u32 + 1;
    first_line <= range.start() && range.end() <= last_line
}

/// Size metric: number of row transitions the node spans. Column width
/// is not part of the metric.
fn row_span(node: &Node) -> usize {
    node.end_position()
        .row
        .saturating_sub(node.start_position().row)
}
