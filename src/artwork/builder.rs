use crate::{
    artwork::{
        document::{ArtworkDocument, LayerDoc, NodeDoc, PatternDoc},
        source::{LayerHandle, NodeId, NodeKind, PatternHandle},
    },
    foundation::error::ExportResult,
};

/// Incremental builder for [`ArtworkDocument`] trees.
///
/// Children must be added before the group or layer that links them. Layers are appended in
/// top-to-bottom order.
#[derive(Default)]
pub struct ArtworkBuilder {
    doc: ArtworkDocument,
}

impl ArtworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&mut self, node: NodeDoc) -> NodeId {
        self.doc.nodes.push(node);
        NodeId((self.doc.nodes.len() - 1) as u32)
    }

    /// Add `node` as a group whose children are `children`, in paint order.
    pub fn group(&mut self, mut node: NodeDoc, children: &[NodeId]) -> NodeId {
        node.first_child = self.link(children).map(|n| n.0);
        self.node(node)
    }

    /// Add a placed instance of `pattern`.
    pub fn symbol(&mut self, node: NodeDoc, pattern: PatternHandle) -> NodeId {
        self.node(NodeDoc {
            kind: NodeKind::Symbol,
            symbol: Some(pattern.0),
            ..node
        })
    }

    /// Add a plugin group that renders `result` and keeps `children` as its source art.
    pub fn plugin_group(&mut self, node: NodeDoc, result: NodeId, children: &[NodeId]) -> NodeId {
        let first_child = self.link(children).map(|n| n.0);
        self.node(NodeDoc {
            kind: NodeKind::PluginGroup,
            result: Some(result.0),
            first_child,
            ..node
        })
    }

    pub fn pattern(&mut self, name: impl Into<String>, content: Option<NodeId>) -> PatternHandle {
        self.doc.patterns.push(PatternDoc {
            name: name.into(),
            content: content.map(|n| n.0),
        });
        PatternHandle((self.doc.patterns.len() - 1) as u32)
    }

    pub fn layer(&mut self, name: impl Into<String>, art: &[NodeId]) -> LayerHandle {
        self.push_layer(name.into(), true, art)
    }

    pub fn hidden_layer(&mut self, name: impl Into<String>, art: &[NodeId]) -> LayerHandle {
        self.push_layer(name.into(), false, art)
    }

    pub fn build(self) -> ExportResult<ArtworkDocument> {
        self.doc.validate()?;
        Ok(self.doc)
    }

    fn push_layer(&mut self, name: String, visible: bool, art: &[NodeId]) -> LayerHandle {
        let art = self.link(art).map(|n| n.0);
        self.doc.layers.push(LayerDoc { name, visible, art });
        LayerHandle((self.doc.layers.len() - 1) as u32)
    }

    fn link(&mut self, nodes: &[NodeId]) -> Option<NodeId> {
        for pair in nodes.windows(2) {
            if let Some(node) = self.doc.nodes.get_mut(pair[0].0 as usize) {
                node.next_sibling = Some(pair[1].0);
            }
        }
        nodes.first().copied()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/artwork/builder.rs"]
mod tests;
