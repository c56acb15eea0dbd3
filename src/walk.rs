//! Filtered pre-order traversal over a [`RenderHost`] tree.

use crate::foundation::core::NodeId;
use crate::host::RenderHost;

/// Verdict of a walk predicate for one node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visit {
    /// Yield the node and descend into it.
    Accept,
    /// Do not yield the node, but still descend into it.
    Skip,
    /// Do not yield the node and prune its subtree.
    Reject,
}

/// Lazy pre-order iterator over the descendants of a root (the root itself is not visited).
///
/// The predicate is a plain function of the host and the node, so the walk holds no state
/// beyond its stack and can be restarted with [`PreorderWalk::restart`] or cloned mid-way.
pub struct PreorderWalk<'h, H: RenderHost + ?Sized, F> {
    host: &'h H,
    root: NodeId,
    filter: F,
    stack: Vec<NodeId>,
}

impl<'h, H, F> PreorderWalk<'h, H, F>
where
    H: RenderHost + ?Sized,
    F: Fn(&H, NodeId) -> Visit,
{
    /// Start a walk below `root`.
    pub fn new(host: &'h H, root: NodeId, filter: F) -> Self {
        let mut walk = Self {
            host,
            root,
            filter,
            stack: Vec::new(),
        };
        walk.restart();
        walk
    }

    /// Rewind to the first descendant of the root.
    pub fn restart(&mut self) {
        self.stack.clear();
        self.push_children(self.root);
    }

    fn push_children(&mut self, node: NodeId) {
        self.stack.extend(self.host.children(node).into_iter().rev());
    }
}

impl<H, F> Clone for PreorderWalk<'_, H, F>
where
    H: RenderHost + ?Sized,
    F: Clone,
{
    fn clone(&self) -> Self {
        Self {
            host: self.host,
            root: self.root,
            filter: self.filter.clone(),
            stack: self.stack.clone(),
        }
    }
}

impl<H, F> Iterator for PreorderWalk<'_, H, F>
where
    H: RenderHost + ?Sized,
    F: Fn(&H, NodeId) -> Visit,
{
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match (self.filter)(self.host, node) {
                Visit::Accept => {
                    self.push_children(node);
                    return Some(node);
                }
                Visit::Skip => self.push_children(node),
                Visit::Reject => {}
            }
        }
        None
    }
}

/// Walk every descendant of `root` that `filter` accepts.
pub fn walk<H, F>(host: &H, root: NodeId, filter: F) -> PreorderWalk<'_, H, F>
where
    H: RenderHost + ?Sized,
    F: Fn(&H, NodeId) -> Visit,
{
    PreorderWalk::new(host, root, filter)
}

#[cfg(test)]
#[path = "../tests/unit/walk.rs"]
mod tests;
