use crate::analyze::Diagnostics;
use crate::foundation::core::NodeId;
use crate::host::{NodeKind, RenderHost};
use crate::walk::{Visit, walk};

// Not `White_Space` in Unicode, but browsers treat the byte-order mark as blank.
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Return `true` when `text` contains a non-whitespace character.
pub fn has_visible_text(text: &str) -> bool {
    text.chars().any(|c| !c.is_whitespace() && c != BYTE_ORDER_MARK)
}

fn has_element_sibling<H: RenderHost + ?Sized>(host: &H, node: NodeId) -> bool {
    let Some(parent) = host.parent(node) else {
        return false;
    };
    host.children(parent)
        .into_iter()
        .filter(|sibling| *sibling != node)
        .any(|sibling| host.kind(sibling).is_ok_and(|k| k.is_element()))
}

fn needs_wrapper<H: RenderHost + ?Sized>(host: &H, node: NodeId) -> Visit {
    match host.kind(node) {
        Ok(NodeKind::Text) if has_visible_text(&host.text_content(node)) => {
            if has_element_sibling(host, node) {
                Visit::Accept
            } else {
                Visit::Skip
            }
        }
        _ => Visit::Skip,
    }
}

/// Give every visible text node that shares its parent with an element a `span` of its own.
///
/// Afterwards each such text node is the only child of its container, so the container's box
/// describes the text alone. Running it again finds nothing to wrap.
pub fn wrap_bare_text<H: RenderHost + ?Sized>(
    host: &mut H,
    root: NodeId,
    diagnostics: &mut Diagnostics,
) -> usize {
    let pending: Vec<NodeId> = walk(&*host, root, needs_wrapper::<H>).collect();
    let mut wrapped = 0;
    for node in pending {
        match host.wrap_in_container(node) {
            Ok(_) => wrapped += 1,
            Err(e) => diagnostics.push(node, &e),
        }
    }
    wrapped
}

#[cfg(test)]
#[path = "../../tests/unit/analyze/prepass.rs"]
mod tests;
