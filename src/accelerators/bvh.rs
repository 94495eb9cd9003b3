use crate::core::math::Float;
use crate::core::scene::SceneGeometry;
use crate::core::shape::Shape;
use crate::core::interaction::SurfaceInteraction;
use crate::core::stats_accumulator::StatsAccumulator;
use crate::core::geometry::{Bounds3f, Point3f, Ray};
use crate::core::utils::slice_extension::SliceExtension;
use crate::core::options::Options;
use crate::core::error::{AccelError, Result};
use smallvec::SmallVec;
use rayon::prelude::*;
use std::sync::Arc;
use std::mem;

/// Largest scene a hierarchy can be built over. Both the primitive
/// permutation and the `2N - 1` node offsets are stored as u32.
pub const MAX_PRIMITIVES: usize = (std::u32::MAX / 2) as usize;

/// Traversal keeps this many pending nodes inline before spilling to the heap.
const INLINE_STACK_SIZE: usize = 64;

type NodeStack = SmallVec<[u32; INLINE_STACK_SIZE]>;

/// Bounding volume hierarchy over the primitives of a `SceneGeometry`.
///
/// Nodes are split at the spatial midpoint of the longest axis of their
/// bounds. The tree is flattened into a single array where the two children
/// of an interior node are stored next to each other, and the primitives
/// are referenced through a permutation so every node covers a contiguous
/// range of it.
pub struct BVHAccel {
    geometry: Arc<SceneGeometry>,
    max_prims_in_node: u8,
    primitive_indices: Vec<u32>,
    nodes: Vec<LinearBVHNode>,
    max_depth: usize
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[repr(C)]
pub struct LinearBVHNode {
    pub bounds: Bounds3f,
    /// leaf: first entry in the permutation, interior: index of the first child
    pub offset: u32,
    pub n_primitives: u32,  // 0 -> interior node
    pub axis: u8   // interior node: xyz
}

impl LinearBVHNode {
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.n_primitives > 0
    }
}

#[derive(Default)]
struct BuildStats {
    leaves: i64,
    interior: i64,
    unsplittable: i64
}

/// Checks that a scene of `count` primitives can be indexed by the hierarchy.
pub fn check_primitive_count(count: usize) -> Result<()> {
    if count == 0 {
        return Err(AccelError::EmptyScene);
    }
    if count > MAX_PRIMITIVES {
        return Err(AccelError::TooManyPrimitives { count, max: MAX_PRIMITIVES });
    }
    Ok(())
}

impl BVHAccel {
    pub fn new(geometry: Arc<SceneGeometry>) -> Result<BVHAccel> {
        BVHAccel::with_options(geometry, &Options::default())
    }

    pub fn with_options(geometry: Arc<SceneGeometry>, options: &Options) -> Result<BVHAccel> {
        let num_primitives = geometry.len();
        check_primitive_count(num_primitives)?;
        let max_prims_in_node = options.max_prims_in_node.max(1);

        // Compute bounds and centroids once for all primitives
        let meshes = geometry.meshes();
        let primitive_bounds: Vec<Bounds3f> = geometry.primitives().iter()
            .map(|p| p.world_bound(meshes))
            .collect();
        let centroids: Vec<Point3f> = geometry.primitives().iter()
            .map(|p| p.centroid(meshes))
            .collect();

        let mut primitive_indices: Vec<u32> = (0..num_primitives as u32).collect();
        let mut nodes = vec![LinearBVHNode::default(); 2 * num_primitives - 1];
        nodes[0] = LinearBVHNode {
            bounds: range_bounds(&primitive_bounds, &primitive_indices),
            offset: 0,
            n_primitives: num_primitives as u32,
            axis: 0
        };
        let mut total_nodes = 1;
        let mut max_depth = 0;
        let mut stats = BuildStats::default();
        let accumulator = StatsAccumulator::instance();

        // Subdivide with an explicit work list of (node, depth)
        let mut todo: Vec<(usize, usize)> = vec![(0, 0)];
        while let Some((node_index, depth)) = todo.pop() {
            let node = nodes[node_index];
            let first = node.offset as usize;
            let count = node.n_primitives as usize;

            let split = if count > max_prims_in_node as usize {
                let range = &mut primitive_indices[first..first + count];
                let split = split_range(&node.bounds, range, &centroids);
                if split.is_none() {
                    stats.unsplittable += 1;
                    debug!("BVH node {} with {} primitives could not be split", node_index, count);
                }
                split
            } else {
                None
            };

            match split {
                Some((axis, n_left)) => {
                    let left = total_nodes;
                    total_nodes += 2;
                    debug_assert!(total_nodes <= nodes.len());
                    let left_range = &primitive_indices[first..first + n_left];
                    let right_range = &primitive_indices[first + n_left..first + count];
                    nodes[left] = LinearBVHNode {
                        bounds: range_bounds(&primitive_bounds, left_range),
                        offset: first as u32,
                        n_primitives: n_left as u32,
                        axis: 0
                    };
                    nodes[left + 1] = LinearBVHNode {
                        bounds: range_bounds(&primitive_bounds, right_range),
                        offset: (first + n_left) as u32,
                        n_primitives: (count - n_left) as u32,
                        axis: 0
                    };
                    let interior = &mut nodes[node_index];
                    interior.offset = left as u32;
                    interior.n_primitives = 0;
                    interior.axis = axis as u8;
                    stats.interior += 1;
                    todo.push((left + 1, depth + 1));
                    todo.push((left, depth + 1));
                }
                None => {
                    stats.leaves += 1;
                    max_depth = max_depth.max(depth);
                    accumulator.report_ratio("BVH/Primitives per leaf node", count as i64, 1);
                    accumulator.report_int_distribution("BVH/Leaf depth", depth as i64);
                }
            }
        }

        nodes.truncate(total_nodes);
        nodes.shrink_to_fit();

        let tree_bytes = total_nodes * mem::size_of::<LinearBVHNode>()
            + num_primitives * mem::size_of::<u32>();
        accumulator.report_counter("BVH/Leaf nodes", stats.leaves);
        accumulator.report_counter("BVH/Interior nodes", stats.interior);
        accumulator.report_counter("BVH/Unsplittable nodes", stats.unsplittable);
        accumulator.report_memory_counter("Memory/BVH tree", tree_bytes as i64);

        let level = if options.quiet { log::Level::Debug } else { log::Level::Info };
        log!(level, "BVH created with {} nodes for {} primitives ({:.2} MB), max depth {}",
            total_nodes,
            num_primitives,
            tree_bytes as f64 / (1024.0 * 1024.0),
            max_depth
        );

        Ok(BVHAccel {
            geometry,
            max_prims_in_node,
            primitive_indices,
            nodes,
            max_depth
        })
    }

    pub fn geometry(&self) -> &SceneGeometry {
        &self.geometry
    }

    pub fn nodes(&self) -> &[LinearBVHNode] {
        &self.nodes
    }

    /// The primitive permutation that leaf ranges index into.
    pub fn primitive_indices(&self) -> &[u32] {
        &self.primitive_indices
    }

    /// Depth of the deepest leaf, the root being at depth 0.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn max_prims_in_node(&self) -> u8 {
        self.max_prims_in_node
    }

    pub fn world_bound(&self) -> Bounds3f {
        self.nodes[0].bounds
    }

    #[inline]
    fn node_stack(&self) -> NodeStack {
        let mut stack = NodeStack::new();
        // at most one pending node per level
        if self.max_depth > INLINE_STACK_SIZE {
            stack.reserve(self.max_depth);
        }
        stack
    }

    /// Find the nearest hit along the ray. `ray.t_max` is narrowed to the hit
    /// distance and is otherwise left untouched.
    pub fn intersect(&self, ray: &mut Ray) -> Option<SurfaceInteraction> {
        let meshes = self.geometry.meshes();
        let primitives = self.geometry.primitives();
        let dir_is_neg = ray.dir_is_neg();
        // Follow ray through BVH nodes to find primitive intersections
        let mut nodes_to_visit = self.node_stack();
        let mut current_node_index = 0_usize;
        let mut si: Option<SurfaceInteraction> = None;
        loop {
            let node = &self.nodes[current_node_index];
            // Check ray against BVH node
            if node.bounds.intersect_p(ray) {
                if node.is_leaf() {
                    // Intersect ray with primitives in leaf BVH node
                    let first = node.offset as usize;
                    for &index in &self.primitive_indices[first..first + node.n_primitives as usize] {
                        if let Some(mut isect) = primitives[index as usize].intersect(meshes, ray) {
                            isect.primitive = Some(index as usize);
                            si = Some(isect);
                        }
                    }
                    match nodes_to_visit.pop() {
                        Some(next) => current_node_index = next as usize,
                        None => break
                    }
                } else if dir_is_neg[node.axis as usize] != 0 {
                    // Put far BVH node on _nodesToVisit_ stack, advance to near node
                    nodes_to_visit.push(node.offset);
                    current_node_index = node.offset as usize + 1;
                } else {
                    nodes_to_visit.push(node.offset + 1);
                    current_node_index = node.offset as usize;
                }
            } else {
                match nodes_to_visit.pop() {
                    Some(next) => current_node_index = next as usize,
                    None => break
                }
            }
        }
        si
    }

    /// Returns true as soon as any hit within `[RAY_EPSILON, ray.t_max]` is found.
    pub fn intersect_p(&self, ray: &Ray) -> bool {
        let meshes = self.geometry.meshes();
        let primitives = self.geometry.primitives();
        let dir_is_neg = ray.dir_is_neg();
        let mut nodes_to_visit = self.node_stack();
        let mut current_node_index = 0_usize;
        loop {
            let node = &self.nodes[current_node_index];
            if node.bounds.intersect_p(ray) {
                if node.is_leaf() {
                    let first = node.offset as usize;
                    for &index in &self.primitive_indices[first..first + node.n_primitives as usize] {
                        if primitives[index as usize].intersect_p(meshes, ray) {
                            return true;
                        }
                    }
                    match nodes_to_visit.pop() {
                        Some(next) => current_node_index = next as usize,
                        None => break
                    }
                } else if dir_is_neg[node.axis as usize] != 0 {
                    nodes_to_visit.push(node.offset);
                    current_node_index = node.offset as usize + 1;
                } else {
                    nodes_to_visit.push(node.offset + 1);
                    current_node_index = node.offset as usize;
                }
            } else {
                match nodes_to_visit.pop() {
                    Some(next) => current_node_index = next as usize,
                    None => break
                }
            }
        }
        false
    }

    /// Nearest hit for each ray, computed in parallel on the current rayon pool.
    pub fn intersect_batch(&self, rays: &mut [Ray]) -> Vec<Option<SurfaceInteraction>> {
        rays.par_iter_mut()
            .map(|ray| self.intersect(ray))
            .collect()
    }
}

/// Tight bounds of a range of the permutation.
fn range_bounds(primitive_bounds: &[Bounds3f], range: &[u32]) -> Bounds3f {
    range.iter().fold(Bounds3f::default(), |b, &i| b.union(&primitive_bounds[i as usize]))
}

/// Partition `range` at the midpoint of the longest axis of `bounds`.
/// Returns the split axis and the size of the lower half, or None when every
/// centroid falls on the same side.
fn split_range(bounds: &Bounds3f, range: &mut [u32], centroids: &[Point3f]) -> Option<(usize, usize)> {
    let axis = bounds.maximum_extent();
    let mid: Float = bounds.min[axis] + bounds.diagonal()[axis] * 0.5;
    let n_left = range.partition(|&i| centroids[i as usize][axis] < mid);
    if n_left == 0 || n_left == range.len() {
        None
    } else {
        Some((axis, n_left))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::Rng;
    use crate::core::mesh::TriangleMesh;
    use crate::core::primitive::Primitive;
    use crate::core::geometry::{Vector3f, Normal3f};
    use crate::core::math::consts::RAY_EPSILON;
    use approx::assert_relative_eq;

    fn random_spheres(n: usize, seed: u64) -> SceneGeometry {
        let mut rng = Rng::new(seed);
        let mut geometry = SceneGeometry::new();
        for _ in 0..n {
            let center = Point3f::new(
                rng.uniform_float_range(-20.0, 20.0),
                rng.uniform_float_range(-20.0, 20.0),
                rng.uniform_float_range(-20.0, 20.0)
            );
            geometry.add_sphere(center, 1.0);
        }
        geometry
    }

    fn random_ray(rng: &mut Rng) -> Ray {
        let o = Point3f::new(
            rng.uniform_float_range(-25.0, 25.0),
            rng.uniform_float_range(-25.0, 25.0),
            rng.uniform_float_range(-25.0, 25.0)
        );
        loop {
            let d = Vector3f::new(
                rng.uniform_float_range(-1.0, 1.0),
                rng.uniform_float_range(-1.0, 1.0),
                rng.uniform_float_range(-1.0, 1.0)
            );
            if d.length_squared() > 1e-4 {
                return Ray::new(o, d.normalize());
            }
        }
    }

    fn build(geometry: SceneGeometry, max_prims_in_node: u8) -> BVHAccel {
        let options = Options::new(max_prims_in_node, 0, true);
        BVHAccel::with_options(Arc::new(geometry), &options).unwrap()
    }

    fn assert_leaves_cover_permutation(bvh: &BVHAccel) {
        let n = bvh.geometry().len();
        let mut seen = vec![0_u32; n];
        for node in bvh.nodes().iter().filter(|node| node.is_leaf()) {
            let first = node.offset as usize;
            for &i in &bvh.primitive_indices()[first..first + node.n_primitives as usize] {
                seen[i as usize] += 1;
            }
        }
        assert!(seen.iter().all(|&count| count == 1));
    }

    fn assert_bounds_nested_and_tight(bvh: &BVHAccel) {
        let meshes = bvh.geometry().meshes();
        let primitives = bvh.geometry().primitives();
        for node in bvh.nodes() {
            if node.is_leaf() {
                let first = node.offset as usize;
                let tight = bvh.primitive_indices()[first..first + node.n_primitives as usize].iter()
                    .fold(Bounds3f::default(), |b, &i| b.union(&primitives[i as usize].world_bound(meshes)));
                assert_eq!(node.bounds, tight);
            } else {
                let left = &bvh.nodes()[node.offset as usize];
                let right = &bvh.nodes()[node.offset as usize + 1];
                assert!(node.bounds.contains(&left.bounds));
                assert!(node.bounds.contains(&right.bounds));
                assert_eq!(node.bounds, left.bounds.union(&right.bounds));
            }
        }
    }

    #[test]
    fn empty_scene() {
        let result = BVHAccel::new(Arc::new(SceneGeometry::new()));
        assert_eq!(result.err(), Some(AccelError::EmptyScene));
    }

    #[test]
    fn primitive_count_limit() {
        assert!(check_primitive_count(1).is_ok());
        assert!(check_primitive_count(MAX_PRIMITIVES).is_ok());
        assert_eq!(check_primitive_count(MAX_PRIMITIVES + 1),
            Err(AccelError::TooManyPrimitives { count: MAX_PRIMITIVES + 1, max: MAX_PRIMITIVES }));
    }

    #[test]
    fn single_primitive_is_a_leaf_root() {
        let mut geometry = SceneGeometry::new();
        geometry.add_sphere(Point3f::zero(), 1.0);
        let bvh = build(geometry, 2);
        assert_eq!(bvh.nodes().len(), 1);
        assert!(bvh.nodes()[0].is_leaf());
        assert_eq!(bvh.max_depth(), 0);
    }

    #[test]
    fn structure_invariants() {
        let bvh = build(random_spheres(500, 11), 2);
        assert!(bvh.nodes().len() <= 2 * 500 - 1);
        assert_leaves_cover_permutation(&bvh);
        assert_bounds_nested_and_tight(&bvh);
        // every node is either a non-empty leaf or an interior node with a valid child pair
        assert!(bvh.nodes().iter().all(|n| n.is_leaf() || (n.offset as usize + 1) < bvh.nodes().len()));
        assert_eq!(bvh.world_bound(), bvh.geometry().world_bound());
    }

    #[test]
    fn one_primitive_per_leaf() {
        // well separated spheres on a line always split
        let mut geometry = SceneGeometry::new();
        for i in 0..33 {
            geometry.add_sphere(Point3f::new(i as Float * 3.0, 0.0, 0.0), 1.0);
        }
        let bvh = build(geometry, 1);
        assert_eq!(bvh.nodes().len(), 2 * 33 - 1);
        assert!(bvh.nodes().iter().filter(|n| n.is_leaf()).all(|n| n.n_primitives == 1));
        assert_leaves_cover_permutation(&bvh);
    }

    #[test]
    fn matches_linear_scan() {
        let bvh = build(random_spheres(1000, 5), 2);
        let geometry = bvh.geometry();
        let mut rng = Rng::new(99);
        let mut hits = 0;
        for _ in 0..10_000 {
            let ray = random_ray(&mut rng);
            let mut bvh_ray = ray;
            let mut linear_ray = ray;
            let bvh_hit = bvh.intersect(&mut bvh_ray);
            let linear_hit = geometry.intersect_linear(&mut linear_ray);
            assert_eq!(bvh_hit.is_some(), linear_hit.is_some(), "ray {}", ray);
            if let (Some(a), Some(b)) = (bvh_hit, linear_hit) {
                assert!((a.t_hit - b.t_hit).abs() <= 1e-4, "ray {}: {} vs {}", ray, a.t_hit, b.t_hit);
                assert_eq!(bvh_ray.t_max, a.t_hit);
                hits += 1;
            } else {
                assert!(bvh_ray.t_max.is_infinite());
            }
            assert_eq!(bvh.intersect_p(&ray), bvh_hit.is_some());
        }
        assert!(hits > 0);
    }

    fn random_point(rng: &mut Rng, extent: Float) -> Point3f {
        Point3f::new(
            rng.uniform_float_range(-extent, extent),
            rng.uniform_float_range(-extent, extent),
            rng.uniform_float_range(-extent, extent)
        )
    }

    /// Random triangle soup, every other face flat in an axis plane, plus spheres.
    fn random_triangles_and_spheres(n_triangles: usize, n_spheres: usize, seed: u64) -> SceneGeometry {
        let mut rng = Rng::new(seed);
        let mut positions = Vec::with_capacity(3 * n_triangles);
        for i in 0..n_triangles {
            let anchor = random_point(&mut rng, 20.0);
            let mut a = random_point(&mut rng, 2.0) - Point3f::zero();
            let mut b = random_point(&mut rng, 2.0) - Point3f::zero();
            if i % 2 == 0 {
                let axis = rng.uniform_uint32_bounded(3) as usize;
                a[axis] = 0.0;
                b[axis] = 0.0;
            }
            positions.push(anchor);
            positions.push(anchor + a);
            positions.push(anchor + b);
        }
        let indices = (0..positions.len() as u32).collect();
        let mut geometry = SceneGeometry::new();
        geometry.add_mesh(TriangleMesh::from_positions(positions, None, indices).unwrap());
        for _ in 0..n_spheres {
            let center = random_point(&mut rng, 20.0);
            geometry.add_sphere(center, rng.uniform_float_range(0.5, 1.5));
        }
        geometry
    }

    #[test]
    fn triangle_soup_matches_linear_scan() {
        let bvh = build(random_triangles_and_spheres(2000, 300, 17), 2);
        let geometry = bvh.geometry();
        let axes = [
            Vector3f::new(1.0, 0.0, 0.0),
            Vector3f::new(0.0, -1.0, 0.0),
            Vector3f::new(0.0, 0.0, 1.0),
            Vector3f::new(-0.0, 0.0, -1.0),
        ];
        let mut rng = Rng::new(23);
        let mut triangle_hits = 0;
        for i in 0..20_000 {
            // every fourth ray runs parallel to an axis
            let ray = if i % 4 == 0 {
                let d = axes[rng.uniform_uint32_bounded(axes.len() as u32) as usize];
                Ray::new(random_point(&mut rng, 25.0), d)
            } else {
                random_ray(&mut rng)
            };
            let mut bvh_ray = ray;
            let mut linear_ray = ray;
            let bvh_hit = bvh.intersect(&mut bvh_ray);
            let linear_hit = geometry.intersect_linear(&mut linear_ray);
            assert_eq!(bvh_hit.is_some(), linear_hit.is_some(), "ray {}", ray);
            if let (Some(a), Some(b)) = (bvh_hit, linear_hit) {
                assert!((a.t_hit - b.t_hit).abs() <= 1e-4, "ray {}: {} vs {}", ray, a.t_hit, b.t_hit);
                if let Some(Primitive::Triangle(_)) = a.primitive.map(|i| geometry.primitives()[i]) {
                    triangle_hits += 1;
                }
            }
            assert_eq!(bvh.intersect_p(&ray), geometry.intersect_linear_p(&ray), "ray {}", ray);
        }
        assert!(triangle_hits > 0);
    }

    #[test]
    fn identical_rays_identical_results() {
        let bvh = build(random_spheres(200, 3), 2);
        let mut a = Ray::new(Point3f::new(-30.0, 0.5, 0.25), Vector3f::new(1.0, 0.01, 0.02));
        let mut b = Ray::new(Point3f::new(-30.0, 0.5, 0.25), Vector3f::new(1.0, 0.01, 0.02));
        assert_eq!(a, b);
        assert_eq!(bvh.intersect(&mut a), bvh.intersect(&mut b));
        assert_eq!(a, b);
    }

    #[test]
    fn axis_parallel_rays() {
        let bvh = build(random_spheres(300, 21), 2);
        let geometry = bvh.geometry();
        let directions = [
            Vector3f::new(1.0, 0.0, 0.0),
            Vector3f::new(-1.0, 0.0, 0.0),
            Vector3f::new(0.0, 1.0, 0.0),
            Vector3f::new(0.0, -0.0, -1.0),
        ];
        let mut rng = Rng::new(4);
        for d in &directions {
            for _ in 0..500 {
                let o = Point3f::new(
                    rng.uniform_float_range(-25.0, 25.0),
                    rng.uniform_float_range(-25.0, 25.0),
                    rng.uniform_float_range(-25.0, 25.0)
                );
                let mut bvh_ray = Ray::new(o, *d);
                let mut linear_ray = Ray::new(o, *d);
                let bvh_hit = bvh.intersect(&mut bvh_ray);
                let linear_hit = geometry.intersect_linear(&mut linear_ray);
                assert_eq!(bvh_hit.map(|si| si.t_hit), linear_hit.map(|si| si.t_hit));
            }
        }
    }

    #[test]
    fn origin_on_surface_no_self_hit() {
        let mut geometry = SceneGeometry::new();
        geometry.add_sphere(Point3f::zero(), 1.0);
        geometry.add_sphere(Point3f::new(0.0, 0.0, 10.0), 1.0);
        let bvh = build(geometry, 1);
        // leave the first sphere from its surface, towards the second
        let mut ray = Ray::new(Point3f::new(0.0, 0.0, 1.0), Vector3f::new(0.0, 0.0, 1.0));
        let si = bvh.intersect(&mut ray).unwrap();
        assert_eq!(si.primitive, Some(1));
        assert_relative_eq!(si.t_hit, 8.0);
        assert!(si.t_hit >= RAY_EPSILON);
    }

    #[test]
    fn coincident_primitives_stay_in_one_leaf() {
        let mut geometry = SceneGeometry::new();
        for _ in 0..10 {
            geometry.add_sphere(Point3f::new(1.0, 2.0, 3.0), 0.5);
        }
        let before = StatsAccumulator::instance().counter("BVH/Unsplittable nodes");
        let bvh = build(geometry, 2);
        assert_eq!(bvh.nodes().len(), 1);
        assert_eq!(bvh.nodes()[0].n_primitives, 10);
        assert!(StatsAccumulator::instance().counter("BVH/Unsplittable nodes") >= before + 1);

        let mut ray = Ray::new(Point3f::new(1.0, 2.0, 10.0), Vector3f::new(0.0, 0.0, -1.0));
        let si = bvh.intersect(&mut ray).unwrap();
        assert_relative_eq!(si.t_hit, 6.5);
    }

    #[test]
    fn deep_tree_grows_the_stack() {
        // each split peels off only the farthest sphere
        let mut geometry = SceneGeometry::new();
        for k in 0..72 {
            geometry.add_sphere(Point3f::new((3.0 as Float).powi(k), 0.0, 0.0), 0.25);
        }
        let bvh = build(geometry, 2);
        assert!(bvh.max_depth() > INLINE_STACK_SIZE);
        assert_leaves_cover_permutation(&bvh);

        // travelling +x descends into the lower half first, pushing every far child
        let mut ray = Ray::new(Point3f::zero(), Vector3f::new(1.0, 0.0, 0.0));
        let si = bvh.intersect(&mut ray).unwrap();
        assert_eq!(si.primitive, Some(0));
        assert_relative_eq!(si.t_hit, 0.75);
        assert!(bvh.intersect_p(&Ray::new(Point3f::zero(), Vector3f::new(1.0, 0.0, 0.0))));
    }

    #[test]
    fn triangles_and_spheres() {
        let positions = vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(1.0, 1.0, 0.0),
            Point3f::new(0.0, 1.0, 0.0),
        ];
        let mut geometry = SceneGeometry::new();
        geometry.add_mesh(TriangleMesh::from_positions(positions, None, vec![0, 1, 2, 0, 2, 3]).unwrap());
        geometry.add_sphere(Point3f::new(-3.0, -3.0, 0.0), 1.0);
        geometry.add_sphere(Point3f::new(4.0, 4.0, 4.0), 1.0);
        let bvh = build(geometry, 1);

        let mut ray = Ray::new(Point3f::new(0.5, 0.5, 1.0), Vector3f::new(0.0, 0.0, -1.0));
        let si = bvh.intersect(&mut ray).unwrap();
        assert_relative_eq!(si.t_hit, 1.0);
        assert_eq!(si.n, Normal3f::new(0.0, 0.0, 1.0));
        assert!(si.primitive == Some(0) || si.primitive == Some(1));

        let mut ray = Ray::new(Point3f::new(-3.0, -3.0, 5.0), Vector3f::new(0.0, 0.0, -1.0));
        let si = bvh.intersect(&mut ray).unwrap();
        assert_eq!(si.primitive, Some(2));
        assert_relative_eq!(si.t_hit, 4.0);
        assert_relative_eq!(si.p.z, 1.0);
        assert_relative_eq!(si.n.z, 1.0);
    }

    #[test]
    fn batch_matches_sequential() {
        let bvh = build(random_spheres(400, 8), 2);
        let mut rng = Rng::new(17);
        let rays: Vec<Ray> = (0..2000).map(|_| random_ray(&mut rng)).collect();
        let mut batch = rays.clone();
        let results = bvh.intersect_batch(&mut batch);
        for ((ray, batched), result) in rays.iter().zip(&batch).zip(&results) {
            let mut sequential = *ray;
            assert_eq!(bvh.intersect(&mut sequential), *result);
            assert_eq!(sequential, *batched);
        }
    }

    #[test]
    fn shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BVHAccel>();
        assert_send_sync::<SceneGeometry>();
        assert_send_sync::<crate::core::scene::Scene>();
    }

    #[test]
    fn reports_build_statistics() {
        let before = StatsAccumulator::instance().counter("BVH/Leaf nodes");
        let bvh = build(random_spheres(64, 2), 2);
        let leaves = bvh.nodes().iter().filter(|n| n.is_leaf()).count() as i64;
        assert!(StatsAccumulator::instance().counter("BVH/Leaf nodes") >= before + leaves);
        assert!(StatsAccumulator::instance().memory_counter("Memory/BVH tree") > 0);
        assert!(StatsAccumulator::instance().int_distribution("BVH/Leaf depth").is_some());
    }
}
