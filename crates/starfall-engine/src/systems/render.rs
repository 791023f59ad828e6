use crate::assets::registry::TextureRegistry;
use crate::components::body::Body;
use crate::core::scene::BodyStore;
use crate::extensions::transform::TransformGraph;
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::instance::{FrameBuffers, MeshInstance, PointVertex};
use crate::systems::effects::DestructionEffect;
use crate::systems::starfield::PointCloud;

/// Mesh instance for a body at its current world transform.
pub fn mesh_instance(body: &Body, graph: &TransformGraph) -> MeshInstance {
    let (scale, rotation, translation) = graph.world_matrix(body).to_scale_rotation_translation();
    let color = body.material.color;
    MeshInstance {
        position: translation.to_array(),
        shape: body.geometry.shape_kind(),
        rotation: rotation.to_array(),
        extents: (body.geometry.half_extents() * scale).to_array(),
        emissive: body.material.emissive,
        color: [color.r, color.g, color.b],
        alpha: body.material.opacity.alpha(),
    }
}

/// Rebuild the frame from scene state.
///
/// Opaque bodies are written before translucent ones so the host can draw
/// them in one pass each. Points come after: the starfield first, then one
/// batch per live particle system. Textures that are not loaded yet (or
/// failed) are left out and the points render untextured.
pub fn build_frame(
    buffers: &mut FrameBuffers,
    camera: &PerspectiveCamera,
    graph: &TransformGraph,
    bodies: &BodyStore,
    destruction: &DestructionEffect,
    starfield: Option<&PointCloud>,
    textures: &TextureRegistry,
) {
    buffers.clear();
    buffers.camera = camera.uniform();

    let visible = || bodies.iter().filter(|b| b.visible);
    for body in visible().filter(|b| b.material.opacity.alpha() >= 1.0) {
        buffers.push_mesh(mesh_instance(body, graph));
    }
    for body in visible().filter(|b| b.material.opacity.alpha() < 1.0) {
        buffers.push_mesh(mesh_instance(body, graph));
    }

    if let Some(stars) = starfield {
        let m = &stars.material;
        let size = if m.size_attenuation { m.size } else { -m.size };
        let color = [m.color.r, m.color.g, m.color.b];
        let texture = textures.resolve(m.texture).map(|t| t.0);
        buffers.push_points(
            stars.positions.iter().map(|p| PointVertex {
                position: p.to_array(),
                size,
                color,
                alpha: 1.0,
            }),
            texture,
            m.alpha_test,
        );
    }

    for system in destruction.iter() {
        let c = system.material.color;
        let alpha = system.opacity().max(0.0);
        buffers.push_points(
            system.positions.iter().map(|p| PointVertex {
                position: p.to_array(),
                size: system.point_size,
                color: [c.r, c.g, c.b],
                alpha,
            }),
            None,
            0.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::BodyId;
    use crate::assets::registry::TextureId;
    use crate::components::geometry::Geometry;
    use crate::components::material::{Color, Material};
    use crate::systems::effects::rng::Rng;
    use crate::systems::starfield::{generate, StarfieldConfig};
    use glam::Vec3;

    fn scene() -> (TransformGraph, BodyStore) {
        let mut graph = TransformGraph::new();
        let mut store = BodyStore::new();
        let glow = Body::new(
            BodyId(1),
            Geometry::sphere(8.5, 16, 16),
            Material::translucent(Color::from_hex(0xff4500), 0.2),
        );
        let sun = Body::new(BodyId(2), Geometry::sphere(8.0, 16, 16), Material::new(Color::from_hex(0xffa500)))
            .with_position(Vec3::new(1.0, 2.0, 3.0));
        for b in [glow, sun] {
            graph.attach(None, b.id).unwrap();
            store.spawn(b);
        }
        (graph, store)
    }

    #[test]
    fn opaque_meshes_come_first() {
        let (graph, store) = scene();
        let mut buf = FrameBuffers::new();
        build_frame(&mut buf, &PerspectiveCamera::default(), &graph, &store, &DestructionEffect::default(), None, &TextureRegistry::new());
        assert_eq!(buf.mesh_count(), 2);
        assert_eq!(buf.meshes[0].position, [1.0, 2.0, 3.0]);
        assert_eq!(buf.meshes[0].extents, [8.0, 8.0, 8.0]);
        assert!((buf.meshes[1].alpha - 0.2).abs() < 1e-6);
    }

    #[test]
    fn hidden_bodies_are_skipped() {
        let (graph, mut store) = scene();
        store.get_mut(BodyId(2)).unwrap().visible = false;
        let mut buf = FrameBuffers::new();
        build_frame(&mut buf, &PerspectiveCamera::default(), &graph, &store, &DestructionEffect::default(), None, &TextureRegistry::new());
        assert_eq!(buf.mesh_count(), 1);
    }

    #[test]
    fn star_texture_only_used_once_ready() {
        let (graph, store) = scene();
        let mut textures = TextureRegistry::new();
        let star = textures.request("star", "circle.png");
        let config = StarfieldConfig { count: 10, ..Default::default() };
        let cloud = generate(&config, Some(star), &mut Rng::new(1));
        let fx = DestructionEffect::default();
        let cam = PerspectiveCamera::default();
        let mut buf = FrameBuffers::new();

        build_frame(&mut buf, &cam, &graph, &store, &fx, Some(&cloud), &textures);
        assert_eq!(buf.point_count(), 10);
        assert_eq!(buf.point_batches[0].texture, -1.0);

        textures.mark_loaded(TextureId(0), true);
        build_frame(&mut buf, &cam, &graph, &store, &fx, Some(&cloud), &textures);
        assert_eq!(buf.point_batches[0].texture, 0.0);
        assert_eq!(buf.point_batches[0].alpha_test, 0.5);
    }

    #[test]
    fn particles_carry_shared_opacity() {
        let (graph, store) = scene();
        let mut fx = DestructionEffect::default();
        let sun = store.get(BodyId(2)).unwrap();
        fx.spawn(sun, graph.world_matrix(sun), &mut Rng::new(3));
        fx.tick(0.1);
        let mut buf = FrameBuffers::new();
        build_frame(&mut buf, &PerspectiveCamera::default(), &graph, &store, &fx, None, &TextureRegistry::new());
        assert_eq!(buf.point_count() as usize, fx.point_count());
        assert!(buf.points.iter().all(|p| (p.alpha - 0.99).abs() < 1e-6));
        assert!(buf.points.iter().all(|p| (p.size - 0.1).abs() < 1e-6));
    }
}
