//! Hierarchical genre distance.
//!
//! Genres live in a fixed, hand-authored tree. Each known genre label maps to
//! a dot-separated path from a root to its node, e.g.
//! `fiction.prose.speculative.fantasy`. The distance between two genres counts
//! the edges between their nodes, normalized by `2 * max_depth`:
//!
//! ```text
//! distance = min((depth_a + depth_b - 2 * common_level) / (2 * max_depth), 1.0)
//! ```
//!
//! Labels without a path are opaque and always maximally distant, even from
//! an identical label.

use std::collections::HashMap;
use tracing::warn;

/// Default depth used to normalize distances. The standard tree is 4 levels deep.
pub const DEFAULT_MAX_DEPTH: usize = 4;

const PATH_SEPARATOR: char = '.';

/// A node of the genre tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreNode {
    pub name: String,
    pub children: Vec<GenreNode>,
}

impl GenreNode {
    pub fn leaf(name: &str) -> Self {
        Self {
            name: name.to_string(),
            children: Vec::new(),
        }
    }

    pub fn branch(name: &str, children: Vec<GenreNode>) -> Self {
        Self {
            name: name.to_string(),
            children,
        }
    }
}

/// Genre tree plus the static `genre label -> path` lookup table.
#[derive(Debug, Clone)]
pub struct GenreTaxonomy {
    roots: Vec<GenreNode>,
    paths: HashMap<String, String>,
    max_depth: usize,
}

impl Default for GenreTaxonomy {
    fn default() -> Self {
        Self::standard()
    }
}

impl GenreTaxonomy {
    /// Build a taxonomy from a forest of genre trees.
    ///
    /// Every node name becomes a label mapped to its own path. If two nodes
    /// share a name, the first one in depth-first order keeps the label.
    pub fn new(roots: Vec<GenreNode>) -> Self {
        let mut paths = HashMap::new();
        for root in &roots {
            register_paths(root, "", &mut paths);
        }
        Self {
            roots,
            paths,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Map an additional label onto the path of an existing node label.
    ///
    /// Unknown targets are skipped with a warning, so the alias stays unmapped.
    pub fn with_alias(mut self, label: &str, target: &str) -> Self {
        match self.paths.get(target).cloned() {
            Some(path) => {
                self.paths.insert(label.to_string(), path);
            }
            None => warn!("Genre alias '{}' targets unknown genre '{}'", label, target),
        }
        self
    }

    /// Configure the normalization depth (default: 4)
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// The built-in book genre tree.
    ///
    /// Labels used by Russian-language catalog exports are registered as
    /// aliases of their English nodes.
    pub fn standard() -> Self {
        use GenreNode as N;

        let fiction = N::branch(
            "fiction",
            vec![
                N::branch(
                    "prose",
                    vec![
                        N::leaf("classics"),
                        N::branch(
                            "novel",
                            vec![N::leaf("romance"), N::leaf("historical_novel")],
                        ),
                        N::branch(
                            "speculative",
                            vec![
                                N::leaf("science_fiction"),
                                N::leaf("dystopia"),
                                N::leaf("fantasy"),
                            ],
                        ),
                        N::leaf("adventure"),
                        N::leaf("detective"),
                        N::leaf("satire"),
                    ],
                ),
                N::leaf("poetry"),
                N::leaf("drama"),
            ],
        );
        let nonfiction = N::branch(
            "nonfiction",
            vec![
                N::leaf("biography"),
                N::leaf("science"),
                N::leaf("popular_science"),
                N::leaf("history"),
                N::leaf("psychology"),
            ],
        );
        let children = N::branch(
            "children",
            vec![
                N::leaf("fairy_tale"),
                N::leaf("educational"),
                N::leaf("children_adventure"),
            ],
        );

        Self::new(vec![fiction, nonfiction, children])
            .with_alias("классика", "classics")
            .with_alias("антиутопия", "dystopia")
            .with_alias("фэнтези", "fantasy")
            .with_alias("сказка", "fairy_tale")
            .with_alias("роман", "novel")
            .with_alias("детектив", "detective")
            .with_alias("фантастика", "speculative")
            .with_alias("приключения", "adventure")
            .with_alias("сатира", "satire")
    }

    pub fn roots(&self) -> &[GenreNode] {
        &self.roots
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Path of a genre label, if the label is mapped
    pub fn path(&self, genre: &str) -> Option<&str> {
        self.paths.get(genre).map(String::as_str)
    }

    pub fn is_mapped(&self, genre: &str) -> bool {
        self.paths.contains_key(genre)
    }

    /// Distance in `[0, 1]` using the configured max depth
    pub fn distance(&self, genre_a: &str, genre_b: &str) -> f32 {
        self.distance_with_depth(genre_a, genre_b, self.max_depth)
    }

    /// Distance in `[0, 1]` normalized by an explicit max depth
    pub fn distance_with_depth(&self, genre_a: &str, genre_b: &str, max_depth: usize) -> f32 {
        let (Some(path_a), Some(path_b)) = (self.path(genre_a), self.path(genre_b)) else {
            return 1.0;
        };
        if path_a == path_b {
            return 0.0;
        }

        let segments_a: Vec<&str> = path_a.split(PATH_SEPARATOR).collect();
        let segments_b: Vec<&str> = path_b.split(PATH_SEPARATOR).collect();
        let common = common_level(&segments_a, &segments_b);

        let edges = segments_a.len() + segments_b.len() - 2 * common;
        let distance = edges as f32 / (2 * max_depth.max(1)) as f32;
        distance.min(1.0)
    }
}

fn register_paths(node: &GenreNode, prefix: &str, paths: &mut HashMap<String, String>) {
    let path = if prefix.is_empty() {
        node.name.clone()
    } else {
        format!("{}{}{}", prefix, PATH_SEPARATOR, node.name)
    };
    for child in &node.children {
        register_paths(child, &path, paths);
    }
    paths.entry(node.name.clone()).or_insert(path);
}

/// Number of leading segments shared by two paths
fn common_level(a: &[&str], b: &[&str]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}
