/// Build and query options, filled in by the caller (or the command line tool)
/// and passed explicitly to the acceleration structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Nodes holding at most this many primitives are not split further.
    pub max_prims_in_node: u8,
    /// Worker threads for batch queries, 0 uses the rayon default.
    pub n_threads: u32,
    /// Demote the build summary from info to debug.
    pub quiet: bool
}

impl Options {
    pub fn new(max_prims_in_node: u8, n_threads: u32, quiet: bool) -> Options {
        Options {
            // a leaf must be allowed to hold at least one primitive
            max_prims_in_node: max_prims_in_node.max(1),
            n_threads,
            quiet
        }
    }
}

impl Default for Options {
    fn default() -> Options {
        Options {
            max_prims_in_node: 2,
            n_threads: 0,
            quiet: false
        }
    }
}
