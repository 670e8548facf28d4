//! Product similarity network
//!
//! Cosine similarity between products over the eight key factors,
//! edges at or above a threshold, the top-degree core nodes plus their
//! first-order neighbors, laid out on a circle with labeled cores.

use std::collections::BTreeSet;

use vizdeck_core::{Axes, Color, Dataset, Mark, StaticFigure, UnitError, UnitOutput};
use vizdeck_plugin::{AmbientCanvas, ProducerKind, UnitMeta, VizUnit};

use crate::columns;
use crate::helpers::{circular_layout, complete_rows, cosine, oranges, standardize};

const SIMILARITY_THRESHOLD: f64 = 0.80;
const CORE_COUNT: usize = 10;
const EDGE_COLOR: Color = Color::rgb(0x99, 0x99, 0x99);
const LABEL_COLOR: Color = Color::rgb(0x33, 0x33, 0x33);

pub struct SimilarityNetwork;

impl VizUnit for SimilarityNetwork {
    fn meta(&self) -> UnitMeta {
        UnitMeta {
            name: "similarity_network",
            title: "模型 ④",
            description: "产品主-次关系散点图（核心节点 Top-10）",
        }
    }

    fn producer(&self) -> Option<ProducerKind> {
        Some(ProducerKind::TakesData)
    }

    fn produce_with_data(
        &self,
        data: &Dataset,
        _canvas: &mut AmbientCanvas,
    ) -> Result<Option<UnitOutput>, UnitError> {
        let (mut values, kept) = complete_rows(data, columns::NETWORK_COLUMNS)?;
        standardize(&mut values);

        let names = data.text(columns::PRODUCT_NAME)?;
        let labels: Vec<String> = kept
            .iter()
            .map(|&row| names.get(row).cloned().unwrap_or_default())
            .collect();
        let n = labels.len();

        // row vectors across the standardized factor columns
        let rows: Vec<Vec<f64>> = (0..n)
            .map(|i| values.iter().map(|col| col[i]).collect())
            .collect();

        let mut edges: Vec<(usize, usize)> = Vec::new();
        let mut degree = vec![0usize; n];
        for i in 0..n {
            for j in (i + 1)..n {
                if cosine(&rows[i], &rows[j]) >= SIMILARITY_THRESHOLD {
                    edges.push((i, j));
                    degree[i] += 1;
                    degree[j] += 1;
                }
            }
        }

        // top-degree cores, then their first-order neighborhood
        let mut by_degree: Vec<usize> = (0..n).collect();
        by_degree.sort_by(|&a, &b| degree[b].cmp(&degree[a]).then(a.cmp(&b)));
        let cores: BTreeSet<usize> = by_degree.iter().copied().take(CORE_COUNT).collect();
        let mut keep = cores.clone();
        for &(i, j) in &edges {
            if cores.contains(&i) {
                keep.insert(j);
            }
            if cores.contains(&j) {
                keep.insert(i);
            }
        }

        let nodes: Vec<usize> = keep.into_iter().collect();
        let positions = circular_layout(nodes.len());
        let index_of = |node: usize| nodes.iter().position(|&k| k == node);

        let segments: Vec<((f64, f64), (f64, f64))> = edges
            .iter()
            .filter_map(|&(i, j)| Some((index_of(i)?, index_of(j)?)))
            .map(|(a, b)| (positions[a], positions[b]))
            .collect();

        let max_degree = nodes.iter().map(|&k| degree[k]).max().unwrap_or(1).max(1);
        let node_sizes: Vec<f64> = nodes.iter().map(|&k| 80.0 + degree[k] as f64 * 20.0).collect();
        let node_colors: Vec<Color> = nodes
            .iter()
            .map(|&k| oranges(0.3 + 0.7 * degree[k] as f64 / max_degree as f64))
            .collect();
        let node_labels: Vec<String> = nodes.iter().map(|&k| labels[k].clone()).collect();

        let core_points: Vec<(f64, f64)> = nodes
            .iter()
            .enumerate()
            .filter(|(_, k)| cores.contains(k))
            .map(|(idx, _)| positions[idx])
            .collect();
        let core_texts: Vec<String> = nodes
            .iter()
            .filter(|k| cores.contains(*k))
            .map(|&k| labels[k].clone())
            .collect();

        let (x, y): (Vec<f64>, Vec<f64>) = positions.iter().copied().unzip();
        let axes = Axes::new()
            .with_title("产品主-次关系散点图（核心节点 Top-10）")
            .with_mark(Mark::Segments {
                segments,
                color: EDGE_COLOR,
                width: 0.8,
            })
            .with_mark(Mark::Scatter {
                x,
                y,
                sizes: node_sizes,
                colors: node_colors,
                labels: node_labels,
            })
            .with_mark(Mark::Annotations {
                points: core_points,
                texts: core_texts,
                color: LABEL_COLOR,
            });

        let figure = StaticFigure::new(14.0, 10.0).with_axes(axes);
        Ok(Some(UnitOutput::Static(figure)))
    }
}
