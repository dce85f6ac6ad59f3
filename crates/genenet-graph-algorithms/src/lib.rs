pub mod common;
pub mod community;
pub mod pathfinding;
pub mod centrality;
pub mod similarity;

pub use common::GraphView;
pub use community::{connected_components, ComponentPartition};
pub use pathfinding::{bfs, bfs_distances, closest_label, shortest_path_between, PathResult};
pub use centrality::{betweenness_centrality, degree_centrality};
pub use similarity::{distance_matrix, SetDistance};
