//! Deferred computation graph.
//!
//! In deferred mode, operations do not compute anything: they append an
//! [`OperationNode`] to the ambient [`Graph`] and hand back a symbolic
//! placeholder tensor. The graph is an append-only record intended for a
//! downstream executor; executing it is out of scope for this crate.

use std::collections::BTreeMap;

use crate::tensor::Tensor;
use crate::tensor_data::TensorData;
use crate::types::DType;

/// Attribute value attached to an operation node.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Int(i64),
    IntList(Vec<i64>),
    AxisList(Vec<usize>),
    Shape(Vec<usize>),
}

/// A single recorded operation: kind, input tensor references, output
/// placeholder(s) and an attribute map. Immutable once appended.
#[derive(Debug, Clone)]
pub struct OperationNode {
    kind: &'static str,
    inputs: Vec<Tensor>,
    outputs: Vec<Tensor>,
    attrs: BTreeMap<String, AttrValue>,
}

impl OperationNode {
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn inputs(&self) -> &[Tensor] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Tensor] {
        &self.outputs
    }

    pub fn attrs(&self) -> &BTreeMap<String, AttrValue> {
        &self.attrs
    }

    /// Looks up a single attribute by name.
    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }
}

/// Append-only operation graph populated during deferred execution.
#[derive(Debug, Default)]
pub struct Graph {
    nodes: Vec<OperationNode>,
    placeholder_count: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a symbolic placeholder tensor for the output of a deferred
    /// operation. The placeholder carries the dtype and inferred shape of
    /// the not-yet-computed result.
    pub fn placeholder(&mut self, dtype: DType, shape: Vec<usize>) -> Tensor {
        self.placeholder_count += 1;
        log::trace!(
            "creating placeholder #{} (dtype {:?}, shape {:?})",
            self.placeholder_count,
            dtype,
            shape
        );
        Tensor::from_data(TensorData::new_symbolic(dtype, shape))
    }

    /// Appends an operation node to the graph.
    pub fn append_op(
        &mut self,
        kind: &'static str,
        inputs: Vec<Tensor>,
        outputs: Vec<Tensor>,
        attrs: BTreeMap<String, AttrValue>,
    ) {
        log::trace!("appending '{}' node (graph size {})", kind, self.nodes.len());
        self.nodes.push(OperationNode {
            kind,
            inputs,
            outputs,
            attrs,
        });
    }

    /// Number of nodes recorded so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of placeholder tensors created through this graph.
    pub fn num_placeholders(&self) -> usize {
        self.placeholder_count
    }

    /// Returns the node at `index`, if any.
    pub fn node(&self, index: usize) -> Option<&OperationNode> {
        self.nodes.get(index)
    }

    /// All recorded nodes, in append order.
    pub fn nodes(&self) -> &[OperationNode] {
        &self.nodes
    }
}
