use super::error::{AccelError, Result};
use super::geometry::{Point3f, Normal3f, Vector3f, Bounds3f};

/// A mesh vertex: position plus shading normal.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Vertex {
    pub p: Point3f,
    pub n: Normal3f
}

impl Vertex {
    pub fn new(p: Point3f, n: Normal3f) -> Vertex {
        Vertex { p, n }
    }
}

/// Handle to a mesh stored in a `SceneGeometry` arena.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub u32);

/// An indexed triangle mesh. Every three consecutive indices form one
/// triangle, wound counter clockwise when seen from the front.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleMesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>
}

impl TriangleMesh {
    /// Creates a mesh, checking that the index buffer describes whole
    /// triangles and only references existing vertices.
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Result<TriangleMesh> {
        if indices.len() % 3 != 0 {
            return Err(AccelError::IndexCountNotTriangles(indices.len()));
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(AccelError::VertexIndexOutOfRange { index, n_vertices: vertices.len() });
        }
        Ok(TriangleMesh { vertices, indices })
    }

    /// Creates a mesh from separate position and normal buffers. Without
    /// normals, each vertex gets the area weighted average of the face normals
    /// around it.
    pub fn from_positions(positions: Vec<Point3f>, normals: Option<Vec<Normal3f>>, indices: Vec<u32>) -> Result<TriangleMesh> {
        let normals = match normals {
            Some(normals) => {
                if normals.len() != positions.len() {
                    return Err(AccelError::NormalCountMismatch { positions: positions.len(), normals: normals.len() });
                }
                normals
            }
            None => vec![Normal3f::zero(); positions.len()]
        };
        let vertices = positions.into_iter().zip(normals).map(|(p, n)| Vertex::new(p, n)).collect();
        let mut mesh = TriangleMesh::new(vertices, indices)?;
        if mesh.vertices.iter().all(|v| v.n == Normal3f::zero()) {
            mesh.compute_vertex_normals();
        }
        Ok(mesh)
    }

    fn compute_vertex_normals(&mut self) {
        let mut sums = vec![Vector3f::zero(); self.vertices.len()];
        for tri in self.indices.chunks(3) {
            let p0 = self.vertices[tri[0] as usize].p;
            let p1 = self.vertices[tri[1] as usize].p;
            let p2 = self.vertices[tri[2] as usize].p;
            // unnormalized, so larger faces weigh more
            let face = (p1 - p0).cross(&(p2 - p0));
            for &i in tri {
                sums[i as usize] += face;
            }
        }
        for (vertex, sum) in self.vertices.iter_mut().zip(sums) {
            if sum.length_squared() > 0.0 {
                vertex.n = Normal3f::from(sum.normalize());
            }
        }
    }

    #[inline]
    pub fn n_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// The three vertices of triangle `index`.
    #[inline]
    pub fn triangle(&self, index: usize) -> [&Vertex; 3] {
        let i = 3 * index;
        [
            &self.vertices[self.indices[i] as usize],
            &self.vertices[self.indices[i + 1] as usize],
            &self.vertices[self.indices[i + 2] as usize]
        ]
    }

    pub fn bounds(&self) -> Bounds3f {
        let mut b = Bounds3f::default();
        for v in &self.vertices {
            b.grow_by(&v.p);
        }
        b
    }
}
