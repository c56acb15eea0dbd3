use std::path::Path;

use crate::foundation::core::{DomRect, NodeId};
use crate::foundation::error::{SkeletonError, SkeletonResult};
use crate::host::style::ComputedStyle;
use crate::host::{NodeKind, RenderHost};

/// Serialized form of one node of a recorded render tree.
///
/// Text nodes may carry the rect the browser reported for their line box; it becomes the box of
/// the wrapper created by [`RenderHost::wrap_in_container`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum NodeDef {
    /// Raw text.
    Text {
        /// Text data.
        text: String,
        /// Recorded line box, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rect: Option<DomRect>,
    },
    /// Element with a laid-out border box.
    Element {
        /// Tag name.
        #[serde(default = "default_tag")]
        tag: String,
        /// Border box.
        rect: DomRect,
        /// Computed style subset.
        #[serde(default)]
        style: ComputedStyle,
        /// Children in document order.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<NodeDef>,
    },
}

fn default_tag() -> String {
    "div".to_owned()
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
struct SnapshotDef {
    root: NodeDef,
}

#[derive(Clone, Debug)]
enum NodeData {
    Element {
        tag: String,
        rect: DomRect,
        style: ComputedStyle,
    },
    Text {
        text: String,
        rect: Option<DomRect>,
    },
}

#[derive(Clone, Debug)]
struct Slot {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    alive: bool,
}

/// Arena-backed [`RenderHost`] over a recorded snapshot of a rendered tree.
///
/// Layout is frozen at record time. The one exception is
/// [`RenderHost::set_line_height`], which re-flows the touched element by keeping its line count
/// and recomputing each line's advance from the new `line-height`.
///
/// Slots freed at the end of the arena are reclaimed, so the id of a discarded node may be
/// issued again.
#[derive(Clone, Debug)]
pub struct MemoryHost {
    slots: Vec<Slot>,
    document: NodeId,
    root: NodeId,
}

const DOCUMENT_TAG: &str = "#document";

impl MemoryHost {
    /// Create a host holding a single root element.
    ///
    /// The root sits under a hidden document node, so it can be swapped out like any other
    /// attached element.
    pub fn new(root_rect: DomRect, root_style: ComputedStyle) -> Self {
        let mut host = Self {
            slots: Vec::new(),
            document: NodeId(0),
            root: NodeId(0),
        };
        host.document = host.alloc(
            NodeData::Element {
                tag: DOCUMENT_TAG.to_owned(),
                rect: root_rect,
                style: ComputedStyle::default(),
            },
            None,
        );
        host.root = host.alloc(
            NodeData::Element {
                tag: "div".to_owned(),
                rect: root_rect,
                style: root_style,
            },
            Some(host.document),
        );
        host.push_child(host.document, host.root);
        host
    }

    /// Build a host from a node tree; the top node becomes [`MemoryHost::root`].
    pub fn from_def(def: &NodeDef) -> SkeletonResult<Self> {
        let NodeDef::Element {
            tag,
            rect,
            style,
            children,
        } = def
        else {
            return Err(SkeletonError::invalid_root("snapshot root must be an element"));
        };

        let mut host = Self::new(*rect, style.clone());
        let root = host.root;
        if let Some(slot) = host.slots.get_mut(root.0 as usize)
            && let NodeData::Element { tag: t, .. } = &mut slot.data
        {
            t.clone_from(tag);
        }
        for child in children {
            host.append_def(root, child)?;
        }
        Ok(host)
    }

    /// Parse a `{ "root": <node> }` snapshot document.
    pub fn from_json(s: &str) -> SkeletonResult<Self> {
        let snapshot: SnapshotDef = serde_json::from_str(s)?;
        Self::from_def(&snapshot.root)
    }

    /// Load a snapshot document from disk.
    pub fn from_path(path: &Path) -> SkeletonResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            SkeletonError::Other(
                anyhow::Error::new(e).context(format!("read snapshot '{}'", path.display())),
            )
        })?;
        Self::from_json(&s)
    }

    /// The snapshot's root element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Hidden parent of the root element.
    pub fn document(&self) -> NodeId {
        self.document
    }

    /// Append a new element under `parent`.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        rect: DomRect,
        style: ComputedStyle,
    ) -> SkeletonResult<NodeId> {
        self.element_slot(parent)?;
        let id = self.alloc(
            NodeData::Element {
                tag: tag.to_ascii_lowercase(),
                rect,
                style,
            },
            Some(parent),
        );
        self.push_child(parent, id);
        Ok(id)
    }

    /// Append a new text node under `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> SkeletonResult<NodeId> {
        self.element_slot(parent)?;
        let id = self.alloc(
            NodeData::Text {
                text: text.to_owned(),
                rect: None,
            },
            Some(parent),
        );
        self.push_child(parent, id);
        Ok(id)
    }

    /// Serialize the subtree under `node` back into its definition form.
    pub fn to_def(&self, node: NodeId) -> SkeletonResult<NodeDef> {
        let slot = self.live_slot(node)?;
        Ok(match &slot.data {
            NodeData::Text { text, rect } => NodeDef::Text {
                text: text.clone(),
                rect: *rect,
            },
            NodeData::Element { tag, rect, style } => NodeDef::Element {
                tag: tag.clone(),
                rect: *rect,
                style: style.clone(),
                children: slot
                    .children
                    .iter()
                    .map(|c| self.to_def(*c))
                    .collect::<SkeletonResult<Vec<_>>>()?,
            },
        })
    }

    /// Number of live nodes, attached or not.
    pub fn live_nodes(&self) -> usize {
        self.slots.iter().filter(|s| s.alive).count()
    }

    /// Number of arena slots, including dead ones not yet reclaimed.
    ///
    /// Discarding the most recently allocated subtree (a measurement copy, say) gives its slots
    /// back, so repeated measurements do not grow the arena.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn append_def(&mut self, parent: NodeId, def: &NodeDef) -> SkeletonResult<NodeId> {
        match def {
            NodeDef::Text { text, rect } => {
                let id = self.append_text(parent, text)?;
                if let Some(slot) = self.slots.get_mut(id.0 as usize) {
                    slot.data = NodeData::Text {
                        text: text.clone(),
                        rect: *rect,
                    };
                }
                Ok(id)
            }
            NodeDef::Element {
                tag,
                rect,
                style,
                children,
            } => {
                let id = self.append_element(parent, tag, *rect, style.clone())?;
                for child in children {
                    self.append_def(id, child)?;
                }
                Ok(id)
            }
        }
    }

    fn alloc(&mut self, data: NodeData, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.slots.len() as u32);
        self.slots.push(Slot {
            data,
            parent,
            children: Vec::new(),
            alive: true,
        });
        id
    }

    fn push_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(slot) = self.slots.get_mut(parent.0 as usize) {
            slot.children.push(child);
        }
    }

    fn live_slot(&self, node: NodeId) -> SkeletonResult<&Slot> {
        self.slots
            .get(node.0 as usize)
            .filter(|s| s.alive)
            .ok_or_else(|| SkeletonError::host(format!("unknown node {}", node.0)))
    }

    fn live_slot_mut(&mut self, node: NodeId) -> SkeletonResult<&mut Slot> {
        self.slots
            .get_mut(node.0 as usize)
            .filter(|s| s.alive)
            .ok_or_else(|| SkeletonError::host(format!("unknown node {}", node.0)))
    }

    fn element_slot(&self, node: NodeId) -> SkeletonResult<(&DomRect, &ComputedStyle)> {
        match &self.live_slot(node)?.data {
            NodeData::Element { rect, style, .. } => Ok((rect, style)),
            NodeData::Text { .. } => Err(SkeletonError::host(format!(
                "node {} is a text node, expected an element",
                node.0
            ))),
        }
    }

    fn clone_subtree(&mut self, node: NodeId, parent: Option<NodeId>) -> SkeletonResult<NodeId> {
        let slot = self.live_slot(node)?;
        let data = slot.data.clone();
        let children = slot.children.clone();
        let id = self.alloc(data, parent);
        for child in children {
            let copy = self.clone_subtree(child, Some(id))?;
            self.push_child(id, copy);
        }
        Ok(id)
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        let Some(slot) = self.slots.get(node.0 as usize).filter(|s| s.alive) else {
            return;
        };
        match &slot.data {
            NodeData::Text { text, .. } => out.push_str(text),
            NodeData::Element { .. } => {
                for child in &slot.children {
                    self.collect_text(*child, out);
                }
            }
        }
    }
}

impl RenderHost for MemoryHost {
    fn contains(&self, node: NodeId) -> bool {
        self.live_slot(node).is_ok()
    }

    fn kind(&self, node: NodeId) -> SkeletonResult<NodeKind> {
        Ok(match &self.live_slot(node)?.data {
            NodeData::Element { tag, .. } => NodeKind::Element { tag: tag.clone() },
            NodeData::Text { .. } => NodeKind::Text,
        })
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.live_slot(node).ok().and_then(|s| s.parent)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.live_slot(node)
            .map(|s| s.children.clone())
            .unwrap_or_default()
    }

    fn bounding_box(&self, node: NodeId) -> SkeletonResult<DomRect> {
        self.element_slot(node).map(|(rect, _)| *rect)
    }

    fn computed_style(&self, node: NodeId) -> SkeletonResult<ComputedStyle> {
        self.element_slot(node).map(|(_, style)| style.clone())
    }

    fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn wrap_in_container(&mut self, node: NodeId) -> SkeletonResult<NodeId> {
        let slot = self.live_slot(node)?;
        let NodeData::Text { rect: text_rect, .. } = &slot.data else {
            return Err(SkeletonError::host(format!(
                "node {} is not a text node",
                node.0
            )));
        };
        let text_rect = *text_rect;
        let parent = slot
            .parent
            .ok_or_else(|| SkeletonError::host(format!("text node {} is detached", node.0)))?;

        let (parent_rect, parent_style) = self.element_slot(parent)?;
        let padding = parent_style.padding_edges().unwrap_or_default();
        let rect = text_rect.unwrap_or_else(|| parent_rect.inset(&padding));
        let style = ComputedStyle {
            font_size: parent_style.font_size.clone(),
            line_height: parent_style.line_height.clone(),
            font: parent_style.font.clone(),
            ..ComputedStyle::default()
        };

        let span = self.alloc(
            NodeData::Element {
                tag: "span".to_owned(),
                rect,
                style,
            },
            Some(parent),
        );
        if let Some(p) = self.slots.get_mut(parent.0 as usize)
            && let Some(pos) = p.children.iter().position(|c| *c == node)
        {
            p.children[pos] = span;
        }
        self.push_child(span, node);
        self.live_slot_mut(node)?.parent = Some(span);
        Ok(span)
    }

    fn duplicate(&mut self, node: NodeId) -> SkeletonResult<NodeId> {
        self.clone_subtree(node, None)
    }

    fn replace(&mut self, current: NodeId, replacement: NodeId) -> SkeletonResult<()> {
        let parent = self
            .live_slot(current)?
            .parent
            .ok_or_else(|| SkeletonError::host(format!("node {} is detached", current.0)))?;
        if self.live_slot(replacement)?.parent.is_some() {
            return Err(SkeletonError::host(format!(
                "replacement node {} is still attached",
                replacement.0
            )));
        }

        let siblings = &mut self.live_slot_mut(parent)?.children;
        let pos = siblings
            .iter()
            .position(|c| *c == current)
            .ok_or_else(|| SkeletonError::host(format!("node {} not under its parent", current.0)))?;
        siblings[pos] = replacement;

        self.live_slot_mut(replacement)?.parent = Some(parent);
        self.live_slot_mut(current)?.parent = None;
        Ok(())
    }

    fn set_line_height(&mut self, node: NodeId, value: &str) -> SkeletonResult<()> {
        let (rect, style) = self.element_slot(node)?;
        let font_size = style.font_size_px()?;
        let old_factor = style.line_height_factor()?;
        let mut next = style.clone();
        next.line_height = value.to_owned();
        let new_factor = next.line_height_factor()?;

        let pad = style.padding_edges().unwrap_or_default().vertical();
        let content_h = (rect.height - pad).max(0.0);
        let lines = (content_h / (font_size * old_factor)).round().max(1.0);
        let mut rect = *rect;
        rect.height = lines * font_size * new_factor + pad;

        if let NodeData::Element {
            rect: r, style: s, ..
        } = &mut self.live_slot_mut(node)?.data
        {
            *r = rect;
            *s = next;
        }
        Ok(())
    }

    fn discard(&mut self, node: NodeId) {
        if let Some(parent) = self.parent(node)
            && let Some(p) = self.slots.get_mut(parent.0 as usize)
        {
            p.children.retain(|c| *c != node);
        }
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(slot) = self.slots.get_mut(id.0 as usize) {
                slot.alive = false;
                slot.parent = None;
                stack.extend(slot.children.iter().copied());
            }
        }
        while self.slots.last().is_some_and(|s| !s.alive) {
            self.slots.pop();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/memory.rs"]
mod tests;
