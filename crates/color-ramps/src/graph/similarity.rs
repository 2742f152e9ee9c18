use super::ColorGraph;
use crate::api::ConfigError;
use crate::{PaletteSnapshot, SimilarityTest};

/// Connect every pair of palette colors that passes `test`.
///
/// Spatial layout is ignored; all palette colors become nodes.
pub fn similarity_graph(
    snapshot: &PaletteSnapshot,
    test: &SimilarityTest,
) -> Result<ColorGraph, ConfigError> {
    test.validate("graph.similarity")?;

    let samples: Vec<_> = snapshot.iter().collect();
    let mut graph = ColorGraph::new();
    for (id, _) in &samples {
        graph.add_node(*id);
    }

    for (i, (a, sa)) in samples.iter().enumerate() {
        for (b, sb) in &samples[i + 1..] {
            if test.matches(sa, sb) {
                graph.add_edge(*a, *b, None);
            }
        }
    }

    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Built similarity graph"
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn greys() -> PaletteSnapshot {
        [
            (0, Color::rgb(51, 51, 51)),
            (1, Color::rgb(60, 60, 60)),
            (2, Color::rgb(200, 200, 200)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_hsv_similarity_edges() {
        let test = SimilarityTest::Hsv {
            hue_degrees: 10.0,
            saturation: 0.1,
            value: 0.1,
        };
        let graph = similarity_graph(&greys(), &test).unwrap();
        assert!(graph.contains_edge(0, 1));
        assert!(!graph.contains_edge(1, 2));
        assert!(graph.contains_node(2));
        assert_eq!(graph.edge_weight(0, 1), None);
    }

    #[test]
    fn test_delta_e_similarity_edges() {
        let graph = similarity_graph(&greys(), &SimilarityTest::DeltaE { max_delta_e: 200.0 }).unwrap();
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_invalid_bound_rejected() {
        let result = similarity_graph(&greys(), &SimilarityTest::DeltaE { max_delta_e: -3.0 });
        assert!(result.is_err());
    }
}
