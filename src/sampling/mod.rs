//! This module implements an iterative refinement of a node pairwise similarity matrix
//! by randomized sampling of nodes.
//!
//! At each iteration a subset of nodes is selected, either the nodes of highest degree
//! or a uniform random subset. The similarity of each selected node to every other node
//! is recomputed from the jaccard overlap of their adjacency neighbourhoods, and the
//! resulting matrix is row normalized before feeding the next iteration.

pub mod params;

pub mod selector;
pub mod refiner;
