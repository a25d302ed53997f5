use crate::{
    error::{Err, Result},
    types::{EId, EType, Weight},
};

/// Optional per-edge attributes, indexed by edge id.
///
/// They travel with sampled edges as payload only and never bias selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeProperties<'a> {
    weights: Option<&'a [Weight]>,
    types: Option<&'a [EType]>,
}

impl<'a> EdgeProperties<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(mut self, weights: &'a [Weight]) -> Self {
        self.weights = Some(weights);
        self
    }

    pub fn with_types(mut self, types: &'a [EType]) -> Self {
        self.types = Some(types);
        self
    }

    /// The same view with the edge types dropped.
    pub fn without_types(mut self) -> Self {
        self.types = None;
        self
    }

    pub fn has_weights(&self) -> bool {
        self.weights.is_some()
    }

    pub fn has_types(&self) -> bool {
        self.types.is_some()
    }

    /// Checks that every present view covers all `num_edge_ids` edges.
    pub fn validate(&self, num_edge_ids: usize) -> Result<()> {
        let lens = self
            .weights
            .map(|w| w.len())
            .into_iter()
            .chain(self.types.map(|t| t.len()));
        for values in lens {
            if values != num_edge_ids {
                return Err(Err::PropertyLengthMismatch {
                    edges: num_edge_ids,
                    values,
                });
            }
        }
        Ok(())
    }

    pub fn weight(&self, edge_id: EId) -> Option<Weight> {
        self.weights.map(|w| w[edge_id as usize])
    }

    pub fn edge_type(&self, edge_id: EId) -> Option<EType> {
        self.types.map(|t| t[edge_id as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let weights = [0.5, 1.5];
        let types = [1, 2, 3];
        assert_eq!(EdgeProperties::new().validate(7), Ok(()));
        assert_eq!(EdgeProperties::new().with_weights(&weights).validate(2), Ok(()));
        assert_eq!(
            EdgeProperties::new()
                .with_weights(&weights)
                .with_types(&types)
                .validate(2),
            Err(Err::PropertyLengthMismatch {
                edges: 2,
                values: 3
            })
        );
    }

    #[test]
    fn test_lookup() {
        let weights = [0.5, 1.5];
        let props = EdgeProperties::new().with_weights(&weights);
        assert_eq!(props.weight(1), Some(1.5));
        assert_eq!(props.edge_type(1), None);
    }
}
