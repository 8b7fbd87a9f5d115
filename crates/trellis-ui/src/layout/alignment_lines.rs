//! Alignment-line computation and the adaptive speculation around line queries.
//!
//! A node computes its lines during a layout only when something will read them:
//! it was queried before it was laid out, its parent is computing or holding
//! lines of its own, or it was queried after its layout in this pass or the
//! previous one. A query that finds the lines missing lays the node out again
//! with lines required.

use super::LayoutTree;
use trellis_core::{NodeId, Phase};
use trellis_ui_layout::{AlignmentLine, AlignmentLineMap, IntPx, LayoutError, MeasureResult};

impl LayoutTree {
    /// Value of `line` for `node` in the node's own coordinates, laying the node
    /// out first when its lines are not available yet.
    pub(crate) fn query_alignment_line(
        &mut self,
        node: NodeId,
        line: &AlignmentLine,
        phase: Phase,
    ) -> Result<Option<IntPx>, LayoutError> {
        let pass = self.pass;
        let target = self.node_mut(node)?;
        match phase {
            Phase::Measure => target.lines.read_in_parent_measure = true,
            Phase::Layout => target.lines.read_in_parent_layout = true,
        }

        if target.needs_layout || (target.laid_out_pass != pass && !target.lines.calculated) {
            log::trace!("early layout of #{} for {:?}", node, line);
            target.lines.forced = true;
            self.layout_node(node, false)?;
        } else if target.laid_out_pass == pass {
            target.lines.queried_after_layout = Some(pass);
            if !target.lines.calculated {
                log::trace!("#{} relaid out for {:?} queried after placement", node, line);
                target.lines.forced = true;
                self.layout_node(node, false)?;
            }
        }
        Ok(self.node(node)?.lines.values.get(line))
    }

    /// Merges the lines of placed children at their positions, applies the
    /// policy's provided lines on top and runs the result out through the
    /// modifier chain.
    pub(crate) fn compute_lines(
        &mut self,
        node: NodeId,
        children: &[NodeId],
        result: &MeasureResult,
    ) -> Result<AlignmentLineMap, LayoutError> {
        let mut merged = AlignmentLineMap::new();
        for &child in children {
            let target = self.node(child)?;
            if !target.placed {
                continue;
            }
            if target.needs_layout || !target.lines.calculated {
                self.layout_node(child, false)?;
            }
            let target = self.node(child)?;
            for (line, value) in target.lines.values.iter() {
                merged.merge(line, value + line.offset_of(target.position));
            }
        }
        merged.extend_overriding(&result.alignment_lines);

        let target = self.node(node)?;
        let mut lines = merged;
        for (modifier, offset) in target
            .modifiers
            .iter()
            .zip(target.layer_offsets.iter())
            .rev()
        {
            lines = lines
                .iter()
                .filter_map(|(line, value)| {
                    modifier
                        .modify_alignment_line(&line, Some(value + line.offset_of(*offset)))
                        .map(|value| (line, value))
                })
                .collect();
        }
        Ok(lines)
    }

    /// Invalidates whatever part of the parent consumed `node`'s previous lines.
    pub(crate) fn notify_lines_changed(&mut self, node: NodeId) -> Result<(), LayoutError> {
        let target = self.node(node)?;
        let Some(parent) = target.parent else {
            return Ok(());
        };
        let read_in_measure = target.lines.read_in_parent_measure;
        let read_in_layout = target.lines.read_in_parent_layout;
        let parent_holds_lines = self.node(parent)?.lines.calculated;
        if read_in_measure {
            self.request_measure(parent);
        } else if read_in_layout || parent_holds_lines {
            self.request_layout(parent);
        }
        Ok(())
    }
}
