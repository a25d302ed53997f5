use crate::types::{EId, EType, Hop, Label, VId, Weight};

/// Which optional columns an invocation produces.
///
/// Fixed once from the inputs the caller supplied and shared by every hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Schema {
    pub weight: bool,
    pub edge_type: bool,
    pub label: bool,
}

fn column<T>(present: bool) -> Option<Vec<T>> {
    if present {
        Some(Vec::new())
    } else {
        None
    }
}

fn extend<T>(column: &mut Option<Vec<T>>, other: Option<Vec<T>>) {
    if let (Some(column), Some(other)) = (column.as_mut(), other) {
        column.extend(other);
    }
}

/// The edges produced by one hop on one worker.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HopOutput {
    pub src: Vec<VId>,
    pub dst: Vec<VId>,
    pub edge_id: Vec<EId>,
    pub weight: Option<Vec<Weight>>,
    pub edge_type: Option<Vec<EType>>,
    pub label: Option<Vec<Label>>,
}

impl HopOutput {
    pub fn new(schema: Schema) -> Self {
        Self {
            src: Vec::new(),
            dst: Vec::new(),
            edge_id: Vec::new(),
            weight: column(schema.weight),
            edge_type: column(schema.edge_type),
            label: column(schema.label),
        }
    }

    pub fn schema(&self) -> Schema {
        Schema {
            weight: self.weight.is_some(),
            edge_type: self.edge_type.is_some(),
            label: self.label.is_some(),
        }
    }

    pub fn len(&self) -> usize {
        self.dst.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dst.is_empty()
    }

    pub fn push(
        &mut self,
        src: VId,
        dst: VId,
        edge_id: EId,
        weight: Option<Weight>,
        edge_type: Option<EType>,
        label: Option<Label>,
    ) {
        self.src.push(src);
        self.dst.push(dst);
        self.edge_id.push(edge_id);
        if let (Some(column), Some(value)) = (self.weight.as_mut(), weight) {
            column.push(value);
        }
        if let (Some(column), Some(value)) = (self.edge_type.as_mut(), edge_type) {
            column.push(value);
        }
        if let (Some(column), Some(value)) = (self.label.as_mut(), label) {
            column.push(value);
        }
    }

    pub fn append(&mut self, other: HopOutput) {
        self.src.extend(other.src);
        self.dst.extend(other.dst);
        self.edge_id.extend(other.edge_id);
        extend(&mut self.weight, other.weight);
        extend(&mut self.edge_type, other.edge_type);
        extend(&mut self.label, other.label);
    }

    fn is_aligned(&self) -> bool {
        let n = self.dst.len();
        self.src.len() == n
            && self.edge_id.len() == n
            && self.weight.as_ref().map_or(true, |c| c.len() == n)
            && self.edge_type.as_ref().map_or(true, |c| c.len() == n)
            && self.label.as_ref().map_or(true, |c| c.len() == n)
    }
}

/// Per-edge result columns accumulated over all hops.
///
/// Rows are only ever appended. Every present column has the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    schema: Schema,
    src: Vec<VId>,
    dst: Vec<VId>,
    edge_id: Vec<EId>,
    hop: Vec<Hop>,
    weight: Option<Vec<Weight>>,
    edge_type: Option<Vec<EType>>,
    label: Option<Vec<Label>>,
}

impl ResultTable {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            src: Vec::new(),
            dst: Vec::new(),
            edge_id: Vec::new(),
            hop: Vec::new(),
            weight: column(schema.weight),
            edge_type: column(schema.edge_type),
            label: column(schema.label),
        }
    }

    /// Appends the rows of `output`, all tagged with `hop`.
    pub fn append(&mut self, hop: Hop, output: HopOutput) {
        assert_eq!(output.schema(), self.schema, "hop output schema differs");
        assert!(output.is_aligned(), "hop output columns differ in length");
        self.hop.extend(std::iter::repeat(hop).take(output.len()));
        self.src.extend(output.src);
        self.dst.extend(output.dst);
        self.edge_id.extend(output.edge_id);
        extend(&mut self.weight, output.weight);
        extend(&mut self.edge_type, output.edge_type);
        extend(&mut self.label, output.label);
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn len(&self) -> usize {
        self.dst.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dst.is_empty()
    }

    pub fn src(&self) -> &[VId] {
        &self.src
    }

    pub fn dst(&self) -> &[VId] {
        &self.dst
    }

    pub fn edge_id(&self) -> &[EId] {
        &self.edge_id
    }

    pub fn hop(&self) -> &[Hop] {
        &self.hop
    }

    pub fn weight(&self) -> Option<&[Weight]> {
        self.weight.as_deref()
    }

    pub fn edge_type(&self) -> Option<&[EType]> {
        self.edge_type.as_deref()
    }

    pub fn label(&self) -> Option<&[Label]> {
        self.label.as_deref()
    }

    /// Gives up the `(src, dst, weight, edge_id)` columns.
    pub(crate) fn into_edges(self) -> (Vec<VId>, Vec<VId>, Option<Vec<Weight>>, Vec<EId>) {
        (self.src, self.dst, self.weight, self.edge_id)
    }
}
